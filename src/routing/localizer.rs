//! Localizer: materializes the catalog into one language's concrete paths and
//! anchor ids.

use crate::i18n::{Language, TranslationTable};
use crate::routing::{NavigationTarget, RouteCatalog, RouteEntry, RouteKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// A catalog entry resolved for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedRoute {
    pub entry: RouteEntry,
    /// Translated path segment; empty only for the landing entry.
    pub path: String,
    pub fragment: Option<String>,
}

/// All routes of one language, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedRoutes {
    language: Language,
    routes: Vec<LocalizedRoute>,
    landing: usize,
    missing_keys: Vec<&'static str>,
}

/// Resolve every catalog entry through `table`.
///
/// Entries whose path or fragment key is missing are left out and reported
/// through `missing_keys()`. So are entries other than the landing that
/// resolve to the empty path or to a path an earlier entry already claimed.
/// The landing entry is always present: without a translation it sits at the
/// language root.
pub fn localize(
    catalog: &RouteCatalog,
    table: &TranslationTable,
    language: Language,
) -> LocalizedRoutes {
    let mut routes = Vec::with_capacity(catalog.len());
    let mut missing_keys = Vec::new();
    let mut landing = 0;

    for entry in catalog.entries() {
        let path = match table.get(entry.key) {
            Some(path) => path.trim_matches('/').to_string(),
            None if entry.is_landing() => {
                warn!(
                    "Landing key '{}' missing for {}, using the language root",
                    entry.key, language
                );
                missing_keys.push(entry.key);
                String::new()
            }
            None => {
                warn!(
                    "Translation key '{}' missing for {}, route unavailable",
                    entry.key, language
                );
                missing_keys.push(entry.key);
                continue;
            }
        };

        let fragment = match entry.fragment_key {
            Some(key) => match table.get(key) {
                Some(fragment) if !fragment.is_empty() => Some(fragment.to_string()),
                _ => {
                    warn!(
                        "Fragment key '{}' missing for {}, route unavailable",
                        key, language
                    );
                    missing_keys.push(key);
                    continue;
                }
            },
            None => None,
        };

        if !entry.is_landing() {
            if path.is_empty() {
                warn!(
                    "'{}' resolves to the empty path in {}, which only the landing may use",
                    entry.key, language
                );
                continue;
            }
            if routes.iter().any(|r: &LocalizedRoute| r.path == path) {
                warn!(
                    "'{}' resolves to '{}' in {}, already taken by another route",
                    entry.key, path, language
                );
                continue;
            }
        } else {
            landing = routes.len();
        }

        routes.push(LocalizedRoute {
            entry: *entry,
            path,
            fragment,
        });
    }

    LocalizedRoutes {
        language,
        routes,
        landing,
        missing_keys,
    }
}

impl LocalizedRoutes {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn routes(&self) -> &[LocalizedRoute] {
        &self.routes
    }

    pub fn missing_keys(&self) -> &[&'static str] {
        &self.missing_keys
    }

    pub fn is_complete(&self) -> bool {
        self.missing_keys.is_empty()
    }

    pub fn landing(&self) -> &LocalizedRoute {
        &self.routes[self.landing]
    }

    /// The localized form of catalog entry `key`, if available in this
    /// language.
    pub fn route(&self, key: &str) -> Option<&LocalizedRoute> {
        self.routes.iter().find(|route| route.entry.key == key)
    }

    /// Exact reverse lookup of a translated path segment. The empty segment is
    /// the landing by definition.
    pub fn find_by_path(&self, segment: &str) -> Option<&LocalizedRoute> {
        if segment.is_empty() {
            return Some(self.landing());
        }
        self.routes.iter().find(|route| route.path == segment)
    }

    /// Lenient reverse lookup: ignores case (Unicode-aware) and surrounding
    /// slashes.
    pub fn match_path(&self, segment: &str) -> Option<&LocalizedRoute> {
        let segment = segment.trim_matches('/');
        self.find_by_path(segment).or_else(|| {
            let lowered = segment.to_lowercase();
            self.routes
                .iter()
                .find(|route| !route.path.is_empty() && route.path.to_lowercase() == lowered)
        })
    }

    /// Reverse lookup of a translated anchor id.
    pub fn find_by_fragment(&self, fragment: &str) -> Option<&LocalizedRoute> {
        self.routes
            .iter()
            .find(|route| route.fragment.as_deref() == Some(fragment))
    }

    /// Where a link to catalog entry `key` points in this language.
    ///
    /// Sections live inside the main view, so they share the landing's path
    /// and differ by anchor. Pages are their own path. Unavailable entries
    /// yield `None`.
    pub fn target_for(&self, key: &str) -> Option<NavigationTarget> {
        let route = self.route(key)?;
        let target = match route.entry.kind {
            RouteKind::Section => NavigationTarget::new(
                self.language,
                &self.landing().path,
                route.fragment.as_deref(),
            ),
            RouteKind::Page => NavigationTarget::new(self.language, &route.path, None),
        };
        Some(target)
    }

    /// The canonical URL path of a route, e.g. `/de/ueber-mich`.
    pub fn path_of(&self, route: &LocalizedRoute) -> String {
        NavigationTarget::new(self.language, &route.path, None).path_string()
    }

    pub fn landing_target(&self) -> NavigationTarget {
        NavigationTarget::new(self.language, &self.landing().path, None)
    }
}

/// Localized routes for every loaded language.
///
/// Immutable: `with_routes` builds a new table, so readers holding the old
/// `Arc` never observe a half-rebuilt state.
#[derive(Debug, Clone, Default)]
pub struct LocalizedRouteTable {
    languages: HashMap<Language, Arc<LocalizedRoutes>>,
}

impl LocalizedRouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routes(&self, routes: impl Into<Arc<LocalizedRoutes>>) -> Self {
        let routes = routes.into();
        let mut languages = self.languages.clone();
        languages.insert(routes.language(), routes);
        Self { languages }
    }

    pub fn get(&self, language: Language) -> Option<Arc<LocalizedRoutes>> {
        self.languages.get(&language).cloned()
    }

    pub fn contains(&self, language: Language) -> bool {
        self.languages.contains_key(&language)
    }

    pub fn languages(&self) -> Vec<Language> {
        Language::all()
            .into_iter()
            .filter(|language| self.contains(*language))
            .collect()
    }
}
