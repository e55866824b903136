//! Active-language state: one writer, many read-only observers.

use crate::i18n::Language;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

/// Read side of the active language. Cheap to clone; every clone observes the
/// same value.
#[derive(Debug, Clone)]
pub struct ActiveLanguage {
    receiver: watch::Receiver<Language>,
}

/// Write side. Only the navigation coordinator holds one.
#[derive(Debug)]
pub(crate) struct LanguagePublisher {
    sender: watch::Sender<Language>,
}

pub(crate) fn active_language(initial: Language) -> (LanguagePublisher, ActiveLanguage) {
    let (sender, receiver) = watch::channel(initial);
    (LanguagePublisher { sender }, ActiveLanguage { receiver })
}

impl LanguagePublisher {
    /// Publish `language`; observers are only woken if it changed.
    pub(crate) fn publish(&self, language: Language) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == language {
                false
            } else {
                *current = language;
                true
            }
        })
    }

    pub(crate) fn current(&self) -> Language {
        *self.sender.borrow()
    }
}

impl ActiveLanguage {
    pub fn get(&self) -> Language {
        *self.receiver.borrow()
    }

    /// Wait for the next change. `None` once the coordinator is gone.
    pub async fn changed(&mut self) -> Option<Language> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    /// The current value followed by every change.
    pub fn stream(&self) -> BoxStream<'static, Language> {
        let mut receiver = self.receiver.clone();
        let first = *receiver.borrow_and_update();
        stream::once(async move { first })
            .chain(stream::unfold(receiver, |mut receiver| async move {
                receiver.changed().await.ok()?;
                let language = *receiver.borrow_and_update();
                Some((language, receiver))
            }))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_initial_value() {
        let (_publisher, active) = active_language(Language::GERMAN);
        assert_eq!(active.get(), Language::GERMAN);
    }

    #[test]
    fn test_publish_reports_real_changes_only() {
        let (publisher, active) = active_language(Language::GERMAN);

        assert!(!publisher.publish(Language::GERMAN));
        assert!(publisher.publish(Language::ENGLISH));

        assert_eq!(active.get(), Language::ENGLISH);
        assert_eq!(publisher.current(), Language::ENGLISH);
    }

    #[tokio::test]
    async fn test_changed_wakes_every_subscriber() {
        let (publisher, active) = active_language(Language::GERMAN);
        let mut header = active.clone();
        let mut footer = active.clone();

        publisher.publish(Language::ENGLISH);

        assert_eq!(header.changed().await, Some(Language::ENGLISH));
        assert_eq!(footer.changed().await, Some(Language::ENGLISH));
    }

    #[tokio::test]
    async fn test_changed_returns_none_when_publisher_dropped() {
        let (publisher, mut active) = active_language(Language::GERMAN);
        drop(publisher);
        assert_eq!(active.changed().await, None);
    }

    #[tokio::test]
    async fn test_stream_starts_with_current_value() {
        let (publisher, active) = active_language(Language::GERMAN);
        let mut languages = active.stream();

        assert_eq!(languages.next().await, Some(Language::GERMAN));
        publisher.publish(Language::ENGLISH);
        assert_eq!(languages.next().await, Some(Language::ENGLISH));

        drop(publisher);
        assert_eq!(languages.next().await, None);
    }
}
