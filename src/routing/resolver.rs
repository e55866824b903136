//! Language-change resolver: finds the URL in the new language that shows
//! the same content the current URL shows in the old one.

use crate::routing::{LocalizedRoutes, NavigationTarget, ParsedUrl};
use tracing::{debug, warn};

/// Translate `current_url` (and its fragment) from `old`'s language into
/// `new`'s.
///
/// Never fails: an unknown path lands on the landing section of the new
/// language. The fragment is resolved independently of the path, so it
/// survives a path that no longer matches. A fragment already in the new
/// language is kept as is; an unknown one is dropped.
pub fn resolve_after_language_change(
    old: &LocalizedRoutes,
    new: &LocalizedRoutes,
    current_url: &str,
    current_fragment: Option<&str>,
) -> NavigationTarget {
    let parsed = ParsedUrl::parse(current_url);
    let current_fragment = current_fragment
        .filter(|fragment| !fragment.is_empty())
        .or(parsed.fragment.as_deref());

    let path_entry = match old.match_path(&parsed.segment) {
        Some(route) => route.entry,
        None => {
            warn!(
                "Path '{}' is not a {} route, switching to the {} landing",
                parsed.segment,
                old.language(),
                new.language()
            );
            new.landing().entry
        }
    };

    let path = match new.route(path_entry.key) {
        Some(route) => route.path.as_str(),
        None => {
            warn!(
                "'{}' is unavailable in {}, switching to the landing",
                path_entry.key,
                new.language()
            );
            new.landing().path.as_str()
        }
    };

    let fragment = current_fragment.and_then(|fragment| {
        let translated = old
            .find_by_fragment(fragment)
            .and_then(|origin| new.route(origin.entry.key))
            .and_then(|route| route.fragment.as_deref());

        match translated {
            Some(translated) => Some(translated),
            None => match new.find_by_fragment(fragment) {
                Some(route) => route.fragment.as_deref(),
                None => {
                    debug!(
                        "Dropping fragment '{}' unknown to {} and {}",
                        fragment,
                        old.language(),
                        new.language()
                    );
                    None
                }
            },
        }
    });

    NavigationTarget::new(new.language(), path, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, TranslationTable};
    use crate::routing::{localize, RouteCatalog};
    use proptest::prelude::*;

    fn table(pairs: &[(&str, &str)]) -> TranslationTable {
        pairs.iter().copied().collect()
    }

    fn german() -> LocalizedRoutes {
        localize(
            &RouteCatalog::site(),
            &table(&[
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
            ]),
            Language::GERMAN,
        )
    }

    fn english() -> LocalizedRoutes {
        localize(
            &RouteCatalog::site(),
            &table(&[
                ("routes.home", ""),
                ("routes.aboutMe", "about-me"),
                ("routes.aboutMeFragment", "about-me-id"),
                ("routes.skills", "skills"),
                ("routes.skillsFragment", "skills-id"),
                ("routes.contact", "contact"),
                ("routes.contactFragment", "contact-id"),
                ("routes.legalNotice", "legal-notice"),
                ("routes.privacyPolicy", "privacy-policy"),
            ]),
            Language::ENGLISH,
        )
    }

    #[test]
    fn test_path_and_fragment_are_translated() {
        let target = resolve_after_language_change(
            &german(),
            &english(),
            "/de/ueber-mich",
            Some("ueber-mich-id"),
        );

        assert_eq!(target.segments(), vec!["en", "about-me"]);
        assert_eq!(target.fragment.as_deref(), Some("about-me-id"));
    }

    #[test]
    fn test_fragment_read_from_url_when_not_given() {
        let target =
            resolve_after_language_change(&german(), &english(), "/de#kontakt-id", None);
        assert_eq!(target.url(), "/en#contact-id");
    }

    #[test]
    fn test_landing_without_fragment() {
        let target = resolve_after_language_change(&german(), &english(), "/de", None);
        assert_eq!(target.url(), "/en");
    }

    #[test]
    fn test_unknown_path_falls_back_to_landing_but_keeps_fragment() {
        let target = resolve_after_language_change(
            &german(),
            &english(),
            "/de/uber-mich",
            Some("faehigkeiten-id"),
        );
        assert_eq!(target.path, None);
        assert_eq!(target.fragment.as_deref(), Some("skills-id"));
    }

    #[test]
    fn test_page_is_translated() {
        let target = resolve_after_language_change(&english(), &german(), "/en/privacy-policy", None);
        assert_eq!(target.url(), "/de/datenschutz");
    }

    #[test]
    fn test_route_missing_in_new_language_falls_back_to_landing() {
        let target = resolve_after_language_change(
            &german(),
            &english(),
            "/de/portfolio",
            Some("portfolio-id"),
        );
        assert_eq!(target.url(), "/en");
    }

    #[test]
    fn test_fragment_already_in_new_language_is_kept() {
        let target =
            resolve_after_language_change(&german(), &english(), "/de", Some("contact-id"));
        assert_eq!(target.fragment.as_deref(), Some("contact-id"));
    }

    #[test]
    fn test_unknown_fragment_is_dropped() {
        let target = resolve_after_language_change(&german(), &english(), "/de", Some("nope"));
        assert_eq!(target.fragment, None);
    }

    #[test]
    fn test_same_language_is_identity() {
        let target = resolve_after_language_change(
            &german(),
            &german(),
            "/de/kontakt",
            Some("kontakt-id"),
        );
        assert_eq!(target.url(), "/de/kontakt#kontakt-id");
    }

    proptest! {
        #[test]
        fn prop_fragment_preserved_across_switch(index in 0usize..3, on_landing in any::<bool>()) {
            let old = german();
            let new = english();
            // Sections available in both languages.
            let keys = ["routes.aboutMe", "routes.skills", "routes.contact"];
            let key = keys[index];
            let old_route = old.route(key).unwrap();
            let url = if on_landing { "/de".to_string() } else { old.path_of(old_route) };

            let target = resolve_after_language_change(
                &old,
                &new,
                &url,
                old_route.fragment.as_deref(),
            );

            prop_assert_eq!(target.fragment, new.route(key).unwrap().fragment.clone());
        }
    }
}
