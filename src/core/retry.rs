//! Retry logic with exponential backoff
//!
//! Platform APIs fail transiently (rate limits, quota windows, upstream
//! 5xx); this module wraps a single publish call in a bounded retry policy.
//! Permanent failures (unknown platform, missing credential, rejected
//! content) are classified non-retryable and fail on the first attempt.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Options for retry behavior, surfaced through configuration
///
/// `max_attempts: 1` disables retries entirely, reproducing the legacy
/// single-shot dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound on the delay between retries
    pub max_delay: Duration,
    /// Backoff multiplier applied after each attempt
    pub backoff_multiplier: f64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

/// Failure fragments that indicate a transient platform-side condition
const RETRYABLE_PATTERNS: &[&str] = &[
    "timed out",
    "timeout",
    "rate limit",
    "too many requests",
    "429",
    "502",
    "503",
    "504",
    "quota exceeded",
    "temporarily unavailable",
    "service unavailable",
    "connection reset",
    "connection refused",
];

/// Executes publish calls with exponential backoff on transient failures
pub struct RetryManager {
    options: RetryOptions,
}

impl RetryManager {
    pub fn new(options: RetryOptions) -> Self {
        Self { options }
    }

    /// Execute the given async operation with retry logic
    ///
    /// The operation is re-invoked only while its error message matches a
    /// retryable pattern and attempts remain; the last error is returned
    /// otherwise.
    pub async fn retry<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut delay = self.options.initial_delay;
        let attempts = self.options.max_attempts.max(1);

        for attempt in 1..=attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if attempt >= attempts || !self.is_retryable_error(&error) {
                        return Err(error);
                    }

                    sleep(delay).await;

                    delay = Duration::from_secs_f64(
                        delay.as_secs_f64() * self.options.backoff_multiplier,
                    )
                    .min(self.options.max_delay);
                }
            }
        }

        unreachable!("retry loop returns on the final attempt")
    }

    /// Check if an error should be retried
    fn is_retryable_error<E: std::fmt::Display>(&self, error: &E) -> bool {
        let message = error.to_string().to_lowercase();

        RETRYABLE_PATTERNS
            .iter()
            .any(|pattern| message.contains(pattern))
    }
}
