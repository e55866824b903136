//! Navigation coordinator.
//!
//! Drives every navigation the site performs: section jumps, language
//! switches and incoming URLs. Each request runs through
//! `Idle -> CapturingScroll -> TranslatingTarget -> Navigating -> Settling -> Idle`
//! while holding the transition lock, so requests never interleave. The
//! coordinator is the only writer of the active language, the route table,
//! the navigator and the viewport.

use crate::error::RoutingError;
use crate::i18n::{Language, TranslationProvider, TranslationTable};
use crate::metrics::RoutingMetrics;
use crate::navigation::state::{active_language, LanguagePublisher};
use crate::navigation::{
    ActiveLanguage, HeaderLayout, NavigationRequest, Navigator, ScrollPosition, Viewport,
};
use crate::routing::{
    localize, resolve_after_language_change, validate, LocalizedRouteTable, LocalizedRoutes,
    NavigationTarget, ParsedUrl, RouteCatalog, RouteEntry, Validation,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct NavigationSettings {
    /// Replaces missing or unsupported language prefixes.
    pub default_language: Language,
    pub header: HeaderLayout,
    /// Pause before an anchor scroll so layout can settle.
    pub anchor_scroll_delay: Duration,
    /// Upper bound on loading one language's translations; `None` waits
    /// forever.
    pub translation_timeout: Option<Duration>,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            default_language: Language::default_language(),
            header: HeaderLayout::default(),
            anchor_scroll_delay: Duration::from_millis(100),
            translation_timeout: Some(Duration::from_secs(10)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    CapturingScroll,
    TranslatingTarget,
    Navigating,
    Settling,
}

/// What happened to the address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The target was already displayed.
    None,
    FragmentOnly,
    Full,
}

/// What happened to the scroll position.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollAction {
    None,
    Anchor { id: String, offset: ScrollPosition },
    Restore(ScrollPosition),
    Top,
}

/// Outcome of a section jump or language switch.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationReport {
    pub target: Option<NavigationTarget>,
    pub transition: Transition,
    pub scroll: ScrollAction,
    /// The problem the coordinator recovered from, if any.
    pub failure: Option<RoutingError>,
}

impl NavigationReport {
    fn unchanged(failure: Option<RoutingError>) -> Self {
        Self {
            target: None,
            transition: Transition::None,
            scroll: ScrollAction::None,
            failure,
        }
    }
}

/// Outcome of handling an incoming URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlReport {
    /// Language the URL was validated against.
    pub language: Language,
    /// `None` when no route table could be loaded at all.
    pub validation: Option<Validation>,
    pub scroll: ScrollAction,
    pub failure: Option<RoutingError>,
}

pub struct NavigationCoordinator {
    catalog: Arc<RouteCatalog>,
    provider: Arc<dyn TranslationProvider>,
    navigator: Arc<dyn Navigator>,
    viewport: Arc<dyn Viewport>,
    settings: NavigationSettings,
    table: RwLock<Arc<LocalizedRouteTable>>,
    publisher: LanguagePublisher,
    active: ActiveLanguage,
    phase: Mutex<NavPhase>,
    transition: tokio::sync::Mutex<()>,
    metrics: Arc<RoutingMetrics>,
    /// Languages whose missing keys were already counted.
    counted_missing: Mutex<HashSet<Language>>,
}

impl NavigationCoordinator {
    pub fn new(
        catalog: Arc<RouteCatalog>,
        provider: Arc<dyn TranslationProvider>,
        navigator: Arc<dyn Navigator>,
        viewport: Arc<dyn Viewport>,
        settings: NavigationSettings,
    ) -> Self {
        let (publisher, active) = active_language(settings.default_language);
        Self {
            catalog,
            provider,
            navigator,
            viewport,
            settings,
            table: RwLock::new(Arc::new(LocalizedRouteTable::new())),
            publisher,
            active,
            phase: Mutex::new(NavPhase::Idle),
            transition: tokio::sync::Mutex::new(()),
            metrics: Arc::new(RoutingMetrics::new()),
            counted_missing: Mutex::new(HashSet::new()),
        }
    }

    pub fn active_language(&self) -> ActiveLanguage {
        self.active.clone()
    }

    pub fn phase(&self) -> NavPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn routes(&self) -> Arc<LocalizedRouteTable> {
        Arc::clone(&self.table.read().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn metrics(&self) -> Arc<RoutingMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// Load the active language's translations and install its routes.
    pub async fn initialize(&self) -> Result<(), RoutingError> {
        let _transition = self.transition.lock().await;
        let language = self.active.get();

        self.rebuild_routes(language).await?;
        self.provider.use_language(language).await?;
        info!("Routing initialized for {}", language.name());
        Ok(())
    }

    /// Catalog entry shown by the current URL: the fragment's section if the
    /// URL has one, otherwise the path's route.
    pub fn current_route(&self) -> Option<RouteEntry> {
        let routes = self.routes_for(self.active.get())?;
        let current = ParsedUrl::parse(&self.navigator.current_url());

        current
            .fragment
            .as_deref()
            .and_then(|fragment| routes.find_by_fragment(fragment))
            .or_else(|| routes.match_path(&current.segment))
            .map(|route| route.entry)
    }

    /// Link target for catalog entry `key` in the active language.
    pub fn link_for(&self, key: &str) -> Option<NavigationTarget> {
        self.routes_for(self.active.get())?.target_for(key)
    }

    /// Jump to the section or page registered under `key`.
    ///
    /// Unknown keys, and keys without a translation in the active language,
    /// lead to the landing section.
    pub async fn navigate_to_section(&self, key: &str) -> NavigationReport {
        let _transition = self.transition.lock().await;
        // Section jumps settle on their own anchor or the top; nothing to
        // capture.
        self.set_phase(NavPhase::CapturingScroll);
        self.set_phase(NavPhase::TranslatingTarget);

        let language = self.active.get();
        let Some(routes) = self.routes_for(language) else {
            error!("No routes loaded for {}, ignoring navigation to '{}'", language, key);
            self.set_phase(NavPhase::Idle);
            return NavigationReport::unchanged(Some(RoutingError::RouteTableMissing));
        };

        let (target, mut failure) = match routes.target_for(key) {
            Some(target) => (target, None),
            None => {
                warn!(
                    "'{}' is not available in {}, navigating to the landing section",
                    key, language
                );
                let missing = RoutingError::MissingTranslationKey {
                    language: language.code().to_string(),
                    key: key.to_string(),
                };
                (routes.landing_target(), Some(missing))
            }
        };

        let (transition, scroll) = match self.go(&target, false).await {
            Ok(transition) => {
                let to_top = target.fragment.is_none()
                    && (transition == Transition::Full || target == routes.landing_target());
                let scroll = self
                    .settle(target.fragment.as_deref(), None, to_top)
                    .await;
                (transition, scroll)
            }
            Err(e) => {
                failure = Some(e);
                (Transition::None, self.settle(None, None, true).await)
            }
        };

        self.set_phase(NavPhase::Idle);
        NavigationReport {
            target: Some(target),
            transition,
            scroll,
            failure,
        }
    }

    /// Switch the site to `language`, keeping the visitor on the same content.
    ///
    /// The active language only changes once the new routes are installed
    /// and the address bar shows the translated URL. Switching to the
    /// current language does nothing.
    pub async fn switch_language(&self, language: Language) -> NavigationReport {
        let _transition = self.transition.lock().await;

        let old = self.publisher.current();
        if language == old {
            debug!("Already showing {}, nothing to switch", language);
            return NavigationReport::unchanged(None);
        }

        self.set_phase(NavPhase::CapturingScroll);
        let saved = self
            .viewport
            .is_browser()
            .then(|| self.viewport.scroll_position());

        self.set_phase(NavPhase::TranslatingTarget);
        let new_routes = match self.rebuild_routes(language).await {
            Ok(routes) => routes,
            Err(e) => return self.abort_switch(old, language, e),
        };
        if let Err(e) = self.provider.use_language(language).await {
            return self.abort_switch(old, language, e);
        }
        let old_routes = self
            .routes_for(old)
            .unwrap_or_else(|| Arc::clone(&new_routes));

        let current_url = self.navigator.current_url();
        let current = ParsedUrl::parse(&current_url);
        let target = resolve_after_language_change(
            &old_routes,
            &new_routes,
            &current_url,
            current.fragment.as_deref(),
        );

        match self.go(&target, true).await {
            Ok(transition) => {
                let to_top = target == new_routes.landing_target();
                let scroll = self
                    .settle(target.fragment.as_deref(), saved, to_top)
                    .await;

                self.publisher.publish(language);
                self.metrics.record_language_switch();
                info!("Switched language {} -> {} at {}", old, language, target);
                self.set_phase(NavPhase::Idle);

                NavigationReport {
                    target: Some(target),
                    transition,
                    scroll,
                    failure: None,
                }
            }
            Err(e) => {
                self.metrics.record_aborted_switch();
                if let Err(revert) = self.provider.use_language(old).await {
                    warn!("Could not restore {} translations: {}", old, revert);
                }
                let scroll = self.settle(None, saved, true).await;
                self.set_phase(NavPhase::Idle);

                NavigationReport {
                    target: Some(target),
                    transition: Transition::None,
                    scroll,
                    failure: Some(e),
                }
            }
        }
    }

    /// Validate an incoming URL and redirect to its canonical form if needed.
    ///
    /// A missing or unsupported language prefix is replaced by the default
    /// language. A supported prefix other than the active language makes
    /// that language active.
    /// A URL naming no route is redirected to the landing and reported as
    /// `UnresolvedPath`.
    pub async fn handle_url(&self, url: &str) -> UrlReport {
        let _transition = self.transition.lock().await;
        self.set_phase(NavPhase::TranslatingTarget);

        let parsed = ParsedUrl::parse(url);
        let requested = match Language::from_code(&parsed.language) {
            Ok(language) => language,
            Err(e) => {
                debug!("{}, using {}", e, self.settings.default_language);
                self.settings.default_language
            }
        };

        let mut failure = None;
        let active = self.active.get();
        let language = if requested != active || self.routes_for(requested).is_none() {
            match self.adopt_language(requested).await {
                Ok(()) => requested,
                Err(e) => {
                    warn!("Staying on {}: {}", active, e);
                    failure = Some(e);
                    active
                }
            }
        } else {
            active
        };

        let Some(routes) = self.routes_for(language) else {
            error!("No routes available for {}, cannot validate '{}'", language, url);
            self.set_phase(NavPhase::Idle);
            return UrlReport {
                language,
                validation: None,
                scroll: ScrollAction::None,
                failure,
            };
        };

        let validation = validate(url, &routes);
        self.set_phase(NavPhase::Navigating);

        let mut landed = parsed;
        match &validation {
            Validation::Ok { .. } => self.metrics.record_validation_ok(),
            Validation::Corrected { url: redirect, .. } | Validation::Fallback { url: redirect } => {
                if matches!(validation, Validation::Corrected { .. }) {
                    self.metrics.record_validation_corrected();
                } else {
                    self.metrics.record_validation_fallback();
                    if failure.is_none() {
                        failure = Some(RoutingError::UnresolvedPath {
                            language: language.code().to_string(),
                            segment: landed.segment.clone(),
                        });
                    }
                }

                let target_url = ParsedUrl::parse(redirect);
                let target = NavigationTarget::new(
                    language,
                    &target_url.segment,
                    target_url.fragment.as_deref(),
                );
                info!("Redirecting '{}' to '{}'", url, target);

                match self
                    .navigator
                    .navigate(NavigationRequest::to_target(&target, true))
                    .await
                {
                    Ok(()) => {
                        self.metrics.record_full_navigation();
                        landed = target_url;
                    }
                    Err(e) => {
                        warn!("Redirect failed, staying on '{}': {}", url, e);
                        self.metrics.record_navigation_failure();
                        failure = Some(e);
                    }
                }
            }
        }

        let fragment = landed
            .fragment
            .as_deref()
            .filter(|fragment| routes.find_by_fragment(fragment).is_some());
        let scroll = self.settle(fragment, None, false).await;

        self.publisher.publish(language);
        self.set_phase(NavPhase::Idle);

        UrlReport {
            language,
            validation: Some(validation),
            scroll,
            failure,
        }
    }

    fn set_phase(&self, phase: NavPhase) {
        let mut current = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        if *current != phase {
            debug!("Navigation phase {:?} -> {:?}", *current, phase);
            *current = phase;
        }
    }

    fn routes_for(&self, language: Language) -> Option<Arc<LocalizedRoutes>> {
        self.routes().get(language)
    }

    async fn load_translation(
        &self,
        language: Language,
    ) -> Result<Arc<TranslationTable>, RoutingError> {
        let load = self.provider.get_translation(language);
        match self.settings.translation_timeout {
            Some(limit) => tokio::time::timeout(limit, load).await.map_err(|_| {
                RoutingError::TranslationTimeout {
                    language: language.code().to_string(),
                    timeout: limit,
                }
            })?,
            None => load.await,
        }
    }

    /// Localize the catalog for `language` and swap in a table containing it.
    /// On failure the previous table stays in place.
    async fn rebuild_routes(
        &self,
        language: Language,
    ) -> Result<Arc<LocalizedRoutes>, RoutingError> {
        let translations = self.load_translation(language).await.map_err(|e| {
            error!("{}", e);
            e
        })?;

        let routes = Arc::new(localize(&self.catalog, &translations, language));
        if !routes.is_complete() {
            warn!(
                "{} routes are missing keys: {:?}",
                language.name(),
                routes.missing_keys()
            );
            let first_time = self
                .counted_missing
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(language);
            if first_time {
                self.metrics.record_missing_keys(routes.missing_keys().len());
            }
        }

        let rebuilt = Arc::new(self.routes().with_routes(Arc::clone(&routes)));
        if let Err(e) = self.navigator.install_routes(Arc::clone(&rebuilt)) {
            error!("Keeping previous routes, router rejected the new table: {}", e);
            return Err(e);
        }

        *self.table.write().unwrap_or_else(|e| e.into_inner()) = rebuilt;
        debug!("Installed {} {} routes", routes.routes().len(), language);
        Ok(routes)
    }

    /// Load `language` and make the provider use it, without navigating.
    async fn adopt_language(&self, language: Language) -> Result<(), RoutingError> {
        self.rebuild_routes(language).await?;
        self.provider.use_language(language).await
    }

    fn abort_switch(&self, old: Language, new: Language, e: RoutingError) -> NavigationReport {
        error!("Language switch {} -> {} abandoned: {}", old, new, e);
        self.metrics.record_aborted_switch();
        self.set_phase(NavPhase::Idle);
        NavigationReport::unchanged(Some(e))
    }

    /// Bring the address bar to `target`, doing as little as possible.
    async fn go(
        &self,
        target: &NavigationTarget,
        replace_url: bool,
    ) -> Result<Transition, RoutingError> {
        self.set_phase(NavPhase::Navigating);
        let current = ParsedUrl::parse(&self.navigator.current_url());

        if target.same_path(&current) {
            if target.same_fragment(&current) {
                self.metrics.record_skipped_navigation();
                return Ok(Transition::None);
            }
            self.navigator.update_fragment(target.fragment.as_deref());
            self.metrics.record_fragment_navigation();
            return Ok(Transition::FragmentOnly);
        }

        match self
            .navigator
            .navigate(NavigationRequest::to_target(target, replace_url))
            .await
        {
            Ok(()) => {
                self.metrics.record_full_navigation();
                Ok(Transition::Full)
            }
            Err(e) => {
                warn!("Navigation to {} failed: {}", target, e);
                self.metrics.record_navigation_failure();
                Err(e)
            }
        }
    }

    /// Scroll after a navigation: to the anchor if there is one, else back to
    /// the saved position, else to the top when `to_top` is set.
    async fn settle(
        &self,
        fragment: Option<&str>,
        saved: Option<ScrollPosition>,
        to_top: bool,
    ) -> ScrollAction {
        self.set_phase(NavPhase::Settling);
        if !self.viewport.is_browser() {
            return ScrollAction::None;
        }

        if let Some(id) = fragment {
            tokio::time::sleep(self.settings.anchor_scroll_delay).await;
            let offset = self.settings.header.offset_for(self.viewport.as_ref());
            self.viewport.set_offset(offset);
            self.viewport.scroll_to_anchor(id);
            return ScrollAction::Anchor {
                id: id.to_string(),
                offset,
            };
        }

        if let Some(position) = saved {
            self.viewport.scroll_to_position(position);
            return ScrollAction::Restore(position);
        }

        if to_top {
            self.viewport.scroll_to_position(ScrollPosition::TOP);
            return ScrollAction::Top;
        }

        ScrollAction::None
    }
}
