//! Retry with exponential backoff for flaky fetches.
//!
//! Errors decide for themselves whether another attempt is worthwhile through
//! `Retryable`; a missing translation file will not appear on a second try,
//! an overloaded server might answer.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Errors that know whether repeating the failed operation can help.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts including the first; 0 is treated as 1
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Growth factor between consecutive delays
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Translation files: 3 attempts, waiting 200ms then 400ms.
    pub fn translation_fetch() -> Self {
        Self::new(3, Duration::from_millis(200))
            .with_max_delay(Duration::from_secs(1))
            .with_backoff_multiplier(2.0)
    }

    /// The waits between attempts, one per retry.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        let initial_ms = self.initial_delay.as_millis() as f64;
        (0..self.max_attempts.saturating_sub(1)).map(move |retry| {
            let delay_ms = initial_ms * self.backoff_multiplier.powi(retry as i32);
            Duration::from_millis(delay_ms as u64).min(self.max_delay)
        })
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::translation_fetch()
    }
}

/// Run `operation` until it succeeds, fails with an error that is not
/// retryable, or runs out of attempts. The last error is returned.
pub async fn retry<T, E, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + fmt::Display,
{
    let mut delays = config.delays();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => {
                debug!("{} failed permanently: {}", operation_name, e);
                return Err(e);
            }
            Err(e) => match delays.next() {
                Some(delay) => {
                    warn!(
                        "{} failed on attempt {} ({}), retrying in {:?}",
                        operation_name, attempt, e, delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    warn!(
                        "{} gave up after {} attempts: {}",
                        operation_name, attempt, e
                    );
                    return Err(e);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Unavailable(u32),
        NotFound,
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TestError::Unavailable(attempt) => write!(f, "503 on attempt {}", attempt),
                TestError::NotFound => f.write_str("404"),
            }
        }
    }

    impl Retryable for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Unavailable(_))
        }
    }

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig::new(max_attempts, Duration::from_millis(5))
    }

    // ==================== RetryConfig Tests ====================

    #[test]
    fn test_translation_fetch_preset() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(
            config.delays().collect::<Vec<_>>(),
            vec![Duration::from_millis(200), Duration::from_millis(400)]
        );
    }

    #[test]
    fn test_delays_grow_and_respect_max() {
        let config = RetryConfig::new(6, Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(3))
            .with_backoff_multiplier(2.0);

        let delays: Vec<_> = config.delays().map(|d| d.as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 3, 3, 3]);
    }

    #[test]
    fn test_single_or_zero_attempts_never_wait() {
        assert_eq!(fast(1).delays().count(), 0);
        assert_eq!(fast(0).delays().count(), 0);
    }

    // ==================== retry Tests ====================

    #[tokio::test]
    async fn test_retry_succeeds_first_attempt() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<u32, TestError> = retry(&fast(3), "test", || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_retryable_error() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = retry(&fast(3), "test", || {
            let calls = calls.clone();
            async move {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 => Err(TestError::Unavailable(0)),
                    _ => Ok("loaded"),
                }
            }
        })
        .await;

        assert_eq!(result, Ok("loaded"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_stops_on_permanent_error() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), TestError> = retry(&fast(5), "test", || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TestError::NotFound)
            }
        })
        .await;

        assert_eq!(result, Err(TestError::NotFound));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_returns_last_error_when_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), TestError> = retry(&fast(4), "test", || {
            let calls = calls.clone();
            async move { Err(TestError::Unavailable(calls.fetch_add(1, Ordering::SeqCst))) }
        })
        .await;

        assert_eq!(result, Err(TestError::Unavailable(3)));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_retry_with_zero_attempts_still_runs_once() {
        let result: Result<(), TestError> =
            retry(&fast(0), "test", || async { Err(TestError::Unavailable(0)) }).await;

        assert_eq!(result, Err(TestError::Unavailable(0)));
    }
}
