use crate::i18n::Language;
use crate::navigation::{HeaderLayout, NavigationSettings};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Where translation files are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationsLocation {
    /// `{url}/{code}.json` over HTTP.
    Url(String),
    /// `{dir}/{code}.json` on disk.
    Dir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    // Languages
    pub default_language: Language,
    pub translations: TranslationsLocation,

    // Header geometry
    pub header_height_desktop: f64,
    pub header_height_mobile: f64,
    pub mobile_breakpoint: u32,

    // Timing
    pub anchor_scroll_delay_ms: u64,
    /// 0 disables the bound.
    pub translation_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_language = match std::env::var("DEFAULT_LANGUAGE") {
            Ok(code) => Language::from_code(&code)
                .with_context(|| format!("DEFAULT_LANGUAGE '{}' is not supported", code))?,
            Err(_) => Language::default_language(),
        };

        let translations = match std::env::var("TRANSLATIONS_URL") {
            Ok(url) if !url.trim().is_empty() => {
                TranslationsLocation::Url(url.trim().trim_end_matches('/').to_string())
            }
            _ => TranslationsLocation::Dir(
                std::env::var("TRANSLATIONS_DIR")
                    .unwrap_or_else(|_| "assets/i18n".to_string())
                    .into(),
            ),
        };

        Ok(Self {
            default_language,
            translations,

            // Header geometry
            header_height_desktop: std::env::var("HEADER_HEIGHT_DESKTOP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(80.0),
            header_height_mobile: std::env::var("HEADER_HEIGHT_MOBILE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60.0),
            mobile_breakpoint: std::env::var("MOBILE_BREAKPOINT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(768),

            // Timing
            anchor_scroll_delay_ms: std::env::var("ANCHOR_SCROLL_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            translation_timeout_ms: std::env::var("TRANSLATION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
        })
    }

    pub fn navigation_settings(&self) -> NavigationSettings {
        NavigationSettings {
            default_language: self.default_language,
            header: HeaderLayout {
                desktop_height: self.header_height_desktop,
                mobile_height: self.header_height_mobile,
                mobile_breakpoint: self.mobile_breakpoint,
            },
            anchor_scroll_delay: Duration::from_millis(self.anchor_scroll_delay_ms),
            translation_timeout: (self.translation_timeout_ms > 0)
                .then(|| Duration::from_millis(self.translation_timeout_ms)),
        }
    }
}
