//! Error taxonomy for localization and navigation.
//!
//! Every variant is recoverable inside the crate: the coordinator logs it and
//! falls back to a known-good state instead of handing it to the rendering
//! layer.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// Language code outside the supported set.
    #[error("Unknown language code: '{0}'")]
    InvalidLanguage(String),

    /// Path segment that matches no route of the given language.
    #[error("Path segment '{segment}' matches no route for language '{language}'")]
    UnresolvedPath { language: String, segment: String },

    /// A catalog key absent from a loaded translation table.
    #[error("Translation key '{key}' is missing for language '{language}'")]
    MissingTranslationKey { language: String, key: String },

    /// The underlying navigation call rejected.
    #[error("Navigation to '{url}' failed: {reason}")]
    NavigationFailure { url: String, reason: String },

    /// The router configuration has no language slot to install routes under.
    #[error("Route configuration has no language slot")]
    RouteTableMissing,

    #[error("Failed to load translations for '{language}': {reason}")]
    TranslationLoad { language: String, reason: String },

    #[error("Loading translations for '{language}' timed out after {timeout:?}")]
    TranslationTimeout { language: String, timeout: Duration },

    #[error("Invalid route catalog: {0}")]
    InvalidCatalog(String),
}

impl RoutingError {
    /// Whether the error leaves the coordinator without a usable route table.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RoutingError::RouteTableMissing)
    }
}
