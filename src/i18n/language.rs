//! Language type: validated language code.
//!
//! A `Language` can only be constructed from a code present in the registry,
//! so holding one is proof that the code is supported.

use crate::error::RoutingError;
use crate::i18n::{LanguageConfig, LanguageRegistry};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "de", "en")
    code: &'static str,
}

impl Language {
    pub const GERMAN: Language = Language { code: "de" };

    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is known and enabled (case-insensitive)
    /// * `Err(RoutingError::InvalidLanguage)` otherwise
    pub fn from_code(code: &str) -> Result<Language, RoutingError> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            _ => Err(RoutingError::InvalidLanguage(code.to_string())),
        }
    }

    /// Create a Language from a code, replacing anything unsupported with
    /// `fallback`.
    pub fn from_code_or(code: &str, fallback: Language) -> Language {
        Self::from_code(code).unwrap_or(fallback)
    }

    /// The registry's default language.
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }

    /// All enabled languages in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry, which cannot happen for a
    /// Language built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_german_constant() {
        let german = Language::GERMAN;
        assert_eq!(german.code(), "de");
        assert_eq!(german.name(), "German");
        assert!(german.is_default());
    }

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.native_name(), "English");
        assert!(!english.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_uses_registry_spelling() {
        assert_eq!(Language::from_code("DE").unwrap(), Language::GERMAN);
        assert_eq!(Language::from_code("en").unwrap().code(), "en");
    }

    #[test]
    fn test_from_code_invalid() {
        let err = Language::from_code("fr").unwrap_err();
        assert_eq!(err, RoutingError::InvalidLanguage("fr".to_string()));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    #[test]
    fn test_from_code_or_falls_back() {
        assert_eq!(
            Language::from_code_or("fr", Language::GERMAN),
            Language::GERMAN
        );
        assert_eq!(
            Language::from_code_or("en", Language::GERMAN),
            Language::ENGLISH
        );
    }

    // ==================== Registry Access Tests ====================

    #[test]
    fn test_default_language() {
        assert_eq!(Language::default_language(), Language::GERMAN);
        assert_eq!(Language::default(), Language::GERMAN);
    }

    #[test]
    fn test_all_lists_enabled_languages() {
        assert_eq!(Language::all(), vec![Language::GERMAN, Language::ENGLISH]);
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::ENGLISH.to_string(), "en");
        assert_eq!(format!("/{}", Language::GERMAN), "/de");
    }
}
