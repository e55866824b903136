//! Translation sources: where per-language translation files come from.
//!
//! Each source produces one `TranslationTable` per language. Sources are not
//! cached; caching is the provider's job.

use crate::error::RoutingError;
use crate::i18n::{Language, TranslationTable};
use crate::retry::{retry, RetryConfig, Retryable};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Load the full translation table for `language`.
    async fn load(&self, language: Language) -> Result<TranslationTable, RoutingError>;
}

fn load_error(language: Language, reason: impl ToString) -> RoutingError {
    RoutingError::TranslationLoad {
        language: language.code().to_string(),
        reason: reason.to_string(),
    }
}

// ==================== HTTP ====================

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
}

impl Retryable for FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Status(status) => status.is_server_error(),
        }
    }
}

/// Fetches `{base_url}/{code}.json`, the layout static site builds publish
/// translation files under.
#[derive(Debug, Clone)]
pub struct HttpTranslationSource {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpTranslationSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            retry: RetryConfig::translation_fetch(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn url_for(&self, language: Language) -> String {
        format!(
            "{}/{}.json",
            self.base_url.trim_end_matches('/'),
            language.code()
        )
    }
}

#[async_trait]
impl TranslationSource for HttpTranslationSource {
    async fn load(&self, language: Language) -> Result<TranslationTable, RoutingError> {
        let url = self.url_for(language);
        let client = &self.client;
        let target = url.as_str();
        debug!("Fetching translations from {}", url);

        let body = retry(
            &self.retry,
            &format!("Loading {} translations", language.name()),
            || async move {
                let response = client.get(target).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status));
                }
                Ok::<_, FetchError>(response.text().await?)
            },
        )
        .await
        .map_err(|e| load_error(language, e))?;

        TranslationTable::from_json_str(&body).map_err(|e| load_error(language, e))
    }
}

// ==================== Directory ====================

/// Reads `{dir}/{code}.json` from the local filesystem.
#[derive(Debug, Clone)]
pub struct DirTranslationSource {
    dir: PathBuf,
}

impl DirTranslationSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl TranslationSource for DirTranslationSource {
    async fn load(&self, language: Language) -> Result<TranslationTable, RoutingError> {
        let path = self.dir.join(format!("{}.json", language.code()));
        debug!("Reading translations from {}", path.display());

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| load_error(language, format!("{}: {}", path.display(), e)))?;

        TranslationTable::from_json_str(&text).map_err(|e| load_error(language, e))
    }
}

// ==================== Static ====================

/// In-memory tables, for pre-rendering and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslationSource {
    tables: HashMap<Language, TranslationTable>,
}

impl StaticTranslationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, language: Language, table: TranslationTable) -> Self {
        self.tables.insert(language, table);
        self
    }
}

#[async_trait]
impl TranslationSource for StaticTranslationSource {
    async fn load(&self, language: Language) -> Result<TranslationTable, RoutingError> {
        self.tables
            .get(&language)
            .cloned()
            .ok_or_else(|| load_error(language, "no translations registered"))
    }
}
