//! Route catalog: the language-neutral list of every navigable unit.
//!
//! Nothing outside this module spells out a route. Paths and anchor ids only
//! exist after a catalog entry's keys have been resolved through a
//! translation table (see `localizer`).

use crate::error::RoutingError;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// Part of the single-page main view, reached through an anchor.
    Section,
    /// A standalone document (legal notice, privacy policy).
    Page,
}

/// One navigable unit. Identity is the translation key of its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteEntry {
    pub key: &'static str,
    pub fragment_key: Option<&'static str>,
    pub kind: RouteKind,
}

impl RouteEntry {
    /// The main view's entry point: a section without an anchor.
    pub const fn landing(key: &'static str) -> Self {
        Self {
            key,
            fragment_key: None,
            kind: RouteKind::Section,
        }
    }

    pub const fn section(key: &'static str, fragment_key: &'static str) -> Self {
        Self {
            key,
            fragment_key: Some(fragment_key),
            kind: RouteKind::Section,
        }
    }

    pub const fn page(key: &'static str) -> Self {
        Self {
            key,
            fragment_key: None,
            kind: RouteKind::Page,
        }
    }

    pub fn is_landing(&self) -> bool {
        self.kind == RouteKind::Section && self.fragment_key.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCatalog {
    entries: Vec<RouteEntry>,
    landing: usize,
}

impl RouteCatalog {
    /// Build a catalog, checking that keys are unique across paths and
    /// fragments, that exactly one landing entry exists and that pages carry
    /// no fragment.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RoutingError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            let keys = std::iter::once(entry.key).chain(entry.fragment_key);
            for key in keys {
                if !seen.insert(key) {
                    return Err(RoutingError::InvalidCatalog(format!(
                        "duplicate translation key '{}'",
                        key
                    )));
                }
            }
            if entry.kind == RouteKind::Page && entry.fragment_key.is_some() {
                return Err(RoutingError::InvalidCatalog(format!(
                    "page '{}' must not have a fragment",
                    entry.key
                )));
            }
        }

        let landings: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_landing())
            .map(|(index, _)| index)
            .collect();

        match landings.as_slice() {
            [landing] => Ok(Self {
                landing: *landing,
                entries,
            }),
            [] => Err(RoutingError::InvalidCatalog(
                "no landing section".to_string(),
            )),
            _ => Err(RoutingError::InvalidCatalog(format!(
                "{} sections without a fragment, expected exactly one landing",
                landings.len()
            ))),
        }
    }

    /// The site's catalog: the landing section, four anchored sections of the
    /// main view and two standalone legal pages.
    pub fn site() -> Self {
        Self {
            entries: vec![
                RouteEntry::landing("routes.home"),
                RouteEntry::section("routes.aboutMe", "routes.aboutMeFragment"),
                RouteEntry::section("routes.skills", "routes.skillsFragment"),
                RouteEntry::section("routes.portfolio", "routes.portfolioFragment"),
                RouteEntry::section("routes.contact", "routes.contactFragment"),
                RouteEntry::page("routes.legalNotice"),
                RouteEntry::page("routes.privacyPolicy"),
            ],
            landing: 0,
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn landing(&self) -> &RouteEntry {
        &self.entries[self.landing]
    }

    pub fn get(&self, key: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Anchored sections of the main view, in page order.
    pub fn sections(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == RouteKind::Section && !entry.is_landing())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteCatalog {
    fn default() -> Self {
        Self::site()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_catalog_passes_validation() {
        let site = RouteCatalog::site();
        let rebuilt = RouteCatalog::new(site.entries().to_vec()).expect("valid catalog");
        assert_eq!(rebuilt, site);
    }

    #[test]
    fn test_site_catalog_shape() {
        let site = RouteCatalog::site();
        assert_eq!(site.landing().key, "routes.home");
        assert_eq!(site.sections().count(), 4);
        assert_eq!(
            site.entries()
                .iter()
                .filter(|e| e.kind == RouteKind::Page)
                .count(),
            2
        );
        assert!(site
            .entries()
            .iter()
            .filter(|e| e.kind == RouteKind::Page)
            .all(|e| e.fragment_key.is_none()));
    }

    #[test]
    fn test_get_by_key() {
        let site = RouteCatalog::site();
        let about = site.get("routes.aboutMe").unwrap();
        assert_eq!(about.fragment_key, Some("routes.aboutMeFragment"));
        assert!(site.get("routes.blog").is_none());
    }

    #[test]
    fn test_new_rejects_duplicate_keys() {
        let err = RouteCatalog::new(vec![
            RouteEntry::landing("home"),
            RouteEntry::section("about", "home"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_new_rejects_missing_landing() {
        let err = RouteCatalog::new(vec![RouteEntry::section("about", "aboutFragment")]).unwrap_err();
        assert!(err.to_string().contains("no landing"));
    }

    #[test]
    fn test_new_rejects_two_landings() {
        assert!(RouteCatalog::new(vec![
            RouteEntry::landing("home"),
            RouteEntry::landing("start"),
        ])
        .is_err());
    }

    #[test]
    fn test_new_rejects_page_with_fragment() {
        let page = RouteEntry {
            key: "imprint",
            fragment_key: Some("imprintFragment"),
            kind: RouteKind::Page,
        };
        assert!(RouteCatalog::new(vec![RouteEntry::landing("home"), page]).is_err());
    }

    #[test]
    fn test_landing_is_found_anywhere_in_list() {
        let catalog = RouteCatalog::new(vec![
            RouteEntry::page("imprint"),
            RouteEntry::landing("home"),
        ])
        .unwrap();
        assert_eq!(catalog.landing().key, "home");
    }
}
