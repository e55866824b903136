//! URL validator / corrector.
//!
//! Checks an incoming URL against one language's localized routes and, when
//! it is not the canonical form, computes the URL to redirect to. Redirects
//! are meant to replace the current history entry.

use crate::routing::{LocalizedRoutes, NavigationTarget, ParsedUrl};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The URL is the canonical form of route `key`.
    Ok { key: &'static str },
    /// The URL names route `key` but not in canonical form (case, slashes,
    /// language prefix).
    Corrected { key: &'static str, url: String },
    /// The URL names no known route; go to the landing section.
    Fallback { url: String },
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        matches!(self, Validation::Ok { .. })
    }

    /// URL to redirect to, if any.
    pub fn redirect(&self) -> Option<&str> {
        match self {
            Validation::Ok { .. } => None,
            Validation::Corrected { url, .. } | Validation::Fallback { url } => Some(url.as_str()),
        }
    }
}

/// Validate `url` against `routes`.
///
/// Only the path decides the outcome; the query string is ignored and the
/// fragment is carried into a corrected URL only when `routes` knows it.
/// Re-validating a corrected or fallback URL always yields `Ok`.
pub fn validate(url: &str, routes: &LocalizedRoutes) -> Validation {
    let parsed = ParsedUrl::parse(url);

    let Some(route) = routes.match_path(&parsed.segment) else {
        let fallback = routes.landing_target();
        warn!(
            "'{}' matches no {} route, falling back to {}",
            parsed.segment,
            routes.language(),
            fallback
        );
        return Validation::Fallback {
            url: fallback.url(),
        };
    };

    let expected = routes.path_of(route);
    if parsed.raw_path == expected {
        return Validation::Ok {
            key: route.entry.key,
        };
    }

    let fragment = parsed
        .fragment
        .as_deref()
        .filter(|fragment| routes.find_by_fragment(fragment).is_some());
    let corrected = NavigationTarget::new(routes.language(), &route.path, fragment);
    debug!("Correcting '{}' to '{}'", parsed.raw_path, corrected);

    Validation::Corrected {
        key: route.entry.key,
        url: corrected.url(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, TranslationTable};
    use crate::routing::{localize, RouteCatalog};
    use proptest::prelude::*;

    fn german() -> LocalizedRoutes {
        let table: TranslationTable = [
            ("routes.home", ""),
            ("routes.aboutMe", "ueber-mich"),
            ("routes.aboutMeFragment", "ueber-mich-id"),
            ("routes.skills", "faehigkeiten"),
            ("routes.skillsFragment", "faehigkeiten-id"),
            ("routes.portfolio", "portfolio"),
            ("routes.portfolioFragment", "portfolio-id"),
            ("routes.contact", "kontakt"),
            ("routes.contactFragment", "kontakt-id"),
            ("routes.legalNotice", "impressum"),
            ("routes.privacyPolicy", "datenschutz"),
        ]
        .into_iter()
        .collect();
        localize(&RouteCatalog::site(), &table, Language::GERMAN)
    }

    // ==================== Ok Tests ====================

    #[test]
    fn test_canonical_url_is_ok() {
        assert_eq!(
            validate("/de/ueber-mich", &german()),
            Validation::Ok {
                key: "routes.aboutMe"
            }
        );
    }

    #[test]
    fn test_language_root_is_ok() {
        assert_eq!(
            validate("/de", &german()),
            Validation::Ok { key: "routes.home" }
        );
    }

    #[test]
    fn test_fragment_and_query_are_ignored() {
        assert!(validate("/de#kontakt-id", &german()).is_ok());
        assert!(validate("/de/impressum?ref=footer", &german()).is_ok());
        assert!(validate("https://example.com/de/datenschutz", &german()).is_ok());
    }

    #[test]
    fn test_percent_encoded_path_is_ok() {
        let table: TranslationTable = [("routes.home", ""), ("routes.legalNotice", "über-uns")]
            .into_iter()
            .collect();
        let routes = localize(&RouteCatalog::site(), &table, Language::GERMAN);

        assert_eq!(
            validate("/de/%C3%BCber-uns", &routes),
            Validation::Ok {
                key: "routes.legalNotice"
            }
        );
        assert_eq!(
            validate("/de/%C3%9Cber-uns", &routes),
            Validation::Corrected {
                key: "routes.legalNotice",
                url: "/de/über-uns".to_string()
            }
        );
    }

    // ==================== Corrected Tests ====================

    #[test]
    fn test_trailing_slash_is_corrected() {
        assert_eq!(
            validate("/de/ueber-mich/", &german()),
            Validation::Corrected {
                key: "routes.aboutMe",
                url: "/de/ueber-mich".to_string()
            }
        );
        assert_eq!(validate("/de/", &german()).redirect(), Some("/de"));
    }

    #[test]
    fn test_case_is_corrected() {
        assert_eq!(
            validate("/DE/Ueber-Mich", &german()).redirect(),
            Some("/de/ueber-mich")
        );
    }

    #[test]
    fn test_foreign_language_prefix_is_corrected() {
        assert_eq!(
            validate("/fr/ueber-mich", &german()).redirect(),
            Some("/de/ueber-mich")
        );
    }

    #[test]
    fn test_missing_language_is_corrected_to_root() {
        assert_eq!(validate("/", &german()).redirect(), Some("/de"));
        assert_eq!(validate("", &german()).redirect(), Some("/de"));
    }

    #[test]
    fn test_correction_keeps_known_fragment_only() {
        assert_eq!(
            validate("/de/#kontakt-id", &german()).redirect(),
            Some("/de#kontakt-id")
        );
        assert_eq!(validate("/de/#contact-id", &german()).redirect(), Some("/de"));
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_typo_falls_back_to_landing() {
        assert_eq!(
            validate("/de/uber-mich", &german()),
            Validation::Fallback {
                url: "/de".to_string()
            }
        );
    }

    #[test]
    fn test_deep_path_falls_back_to_landing() {
        assert_eq!(
            validate("/de/ueber-mich/extra", &german()).redirect(),
            Some("/de")
        );
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_redirects_validate_ok(
            lang in "(de|DE|en|fr)?",
            segment in "(ueber-mich|Ueber-Mich|kontakt|impressum|uber-mich|[a-z]{0,8})",
            trailing in "(/|//)?",
            fragment in "(#kontakt-id|#nope)?",
        ) {
            let routes = german();
            let url = format!("/{}/{}{}{}", lang, segment, trailing, fragment);
            let first = validate(&url, &routes);
            if let Some(redirect) = first.redirect() {
                prop_assert!(validate(redirect, &routes).is_ok(), "{} -> {}", url, redirect);
            }
        }
    }
}
