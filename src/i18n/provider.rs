//! Translation provider: the contract the router consumes, plus the caching
//! service that implements it on top of a `TranslationSource`.

use crate::error::RoutingError;
use crate::i18n::{Language, TranslationSource, TranslationTable};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Emitted whenever the provider's active table changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LangChangeEvent {
    pub lang: Language,
}

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Load (or return the cached) table for `language`.
    async fn get_translation(&self, language: Language)
        -> Result<Arc<TranslationTable>, RoutingError>;

    /// Synchronous lookup in the active table. Unknown keys come back
    /// unchanged, so a missing label shows its key instead of nothing.
    fn instant(&self, key: &str) -> String;

    /// Make `language` the active table, loading it first if needed.
    async fn use_language(&self, language: Language) -> Result<(), RoutingError>;

    /// Stream of active-table changes.
    fn on_lang_change(&self) -> BoxStream<'static, LangChangeEvent>;
}

const EVENT_CAPACITY: usize = 16;

pub struct TranslationService<S> {
    source: S,
    cache: RwLock<HashMap<Language, Arc<TranslationTable>>>,
    current: RwLock<Option<Language>>,
    events: broadcast::Sender<LangChangeEvent>,
}

impl<S: TranslationSource> TranslationService<S> {
    pub fn new(source: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            events,
        }
    }

    /// Language whose table `instant` reads from, if any was activated.
    pub fn current_language(&self) -> Option<Language> {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn cached(&self, language: Language) -> Option<Arc<TranslationTable>> {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&language)
            .cloned()
    }
}

#[async_trait]
impl<S: TranslationSource> TranslationProvider for TranslationService<S> {
    async fn get_translation(
        &self,
        language: Language,
    ) -> Result<Arc<TranslationTable>, RoutingError> {
        if let Some(table) = self.cached(language) {
            debug!("Translations for {} served from cache", language);
            return Ok(table);
        }

        let table = Arc::new(self.source.load(language).await?);
        info!("Loaded {} translations for {}", table.len(), language.name());

        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(language, Arc::clone(&table));
        Ok(table)
    }

    fn instant(&self, key: &str) -> String {
        let Some(language) = self.current_language() else {
            return key.to_string();
        };
        match self.cached(language).and_then(|t| t.get(key).map(str::to_string)) {
            Some(value) => value,
            None => {
                warn!("No {} translation for '{}'", language, key);
                key.to_string()
            }
        }
    }

    async fn use_language(&self, language: Language) -> Result<(), RoutingError> {
        self.get_translation(language).await?;

        let previous = self
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .replace(language);

        if previous != Some(language) {
            // No subscribers is fine.
            let _ = self.events.send(LangChangeEvent { lang: language });
        }
        Ok(())
    }

    fn on_lang_change(&self) -> BoxStream<'static, LangChangeEvent> {
        let receiver = self.events.subscribe();
        stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => return Some((event, receiver)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Language change subscriber lagged by {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}
