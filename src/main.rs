//! Headless driver for the site's localized routing.
//!
//! Usage:
//!   locale-router table                   # Print every language's routes
//!   locale-router validate <url>          # Validate and correct a URL
//!   locale-router switch <url> <lang>     # URL after a language switch
//!   locale-router section <url> <key>     # URL after a section jump
//!
//! Each command finishes by printing the routing metrics as JSON.

use anyhow::{bail, Context, Result};
use locale_router::config::{Config, TranslationsLocation};
use locale_router::i18n::{
    DirTranslationSource, HttpTranslationSource, Language, TranslationProvider,
    TranslationService,
};
use locale_router::navigation::{
    MemoryNavigator, MemoryViewport, NavigationCoordinator, Navigator,
};
use locale_router::routing::{localize, RouteCatalog};
use std::sync::Arc;
use tracing::{info, warn};

const USAGE: &str = "usage: locale-router <table | validate <url> | switch <url> <lang> | section <url> <key>>";

fn provider_for(config: &Config) -> Arc<dyn TranslationProvider> {
    match &config.translations {
        TranslationsLocation::Url(url) => {
            Arc::new(TranslationService::new(HttpTranslationSource::new(url.clone())))
        }
        TranslationsLocation::Dir(dir) => {
            Arc::new(TranslationService::new(DirTranslationSource::new(dir.clone())))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables are set elsewhere)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_router=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let catalog = Arc::new(RouteCatalog::site());
    let provider = provider_for(&config);

    if let [command] = args.as_slice() {
        if command == "table" {
            for language in Language::all() {
                let translations = provider
                    .get_translation(language)
                    .await
                    .with_context(|| format!("Failed to load {} translations", language))?;
                let routes = localize(&catalog, &translations, language);

                println!("{} ({})", language.name(), language.native_name());
                for route in routes.routes() {
                    let target = routes
                        .target_for(route.entry.key)
                        .unwrap_or_else(|| routes.landing_target());
                    println!("  {:<22} {}", route.entry.key, target);
                }
                for key in routes.missing_keys() {
                    println!("  {:<22} (missing)", key);
                }
            }
            return Ok(());
        }
    }

    let url = args.get(1).context(USAGE)?;
    let navigator = Arc::new(MemoryNavigator::new(url.clone()));
    let coordinator = NavigationCoordinator::new(
        catalog,
        provider,
        navigator.clone(),
        Arc::new(MemoryViewport::headless()),
        config.navigation_settings(),
    );
    if let Err(e) = coordinator.initialize().await {
        if e.is_fatal() {
            return Err(e).context("Failed to initialize routing");
        }
        // The URL's own language may still load below.
        warn!("Starting without default routes: {}", e);
    }

    let url_report = coordinator.handle_url(url).await;

    match (args[0].as_str(), args.get(2)) {
        ("validate", None) => {
            println!("{:?}", url_report.validation);
        }
        ("switch", Some(code)) => {
            let language = Language::from_code(code)?;
            let report = coordinator.switch_language(language).await;
            if let Some(failure) = report.failure {
                bail!("Language switch failed: {}", failure);
            }
        }
        ("section", Some(key)) => {
            let report = coordinator.navigate_to_section(key).await;
            if let Some(failure) = report.failure {
                info!("Section navigation recovered from: {}", failure);
            }
        }
        _ => bail!(USAGE),
    }

    println!("{}", navigator.current_url());
    println!(
        "{}",
        serde_json::to_string_pretty(&coordinator.metrics().report())?
    );
    Ok(())
}
