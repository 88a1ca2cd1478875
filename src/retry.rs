//! Retry configuration for upstream directory calls.
//!
//! Provides the backoff policy applied by the operations service around every
//! upstream call. Classification lives on the error type itself
//! ([`DirectoryError::is_retryable`](crate::error::DirectoryError::is_retryable));
//! this module only decides how long to wait between attempts.

use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,
    /// Initial backoff duration before the first retry.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential backoff.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with the specified max retries.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Create a config with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Create a config for quick retries (smaller backoffs, for tests).
    pub fn quick() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(100),
            backoff_multiplier: 2.0,
        }
    }

    /// Delay before retry number `attempt` (zero-based).
    ///
    /// Exponential growth from `initial_backoff`, capped at `max_backoff`.
    /// A `suggested` pause reported by upstream (Retry-After) raises the
    /// computed delay but never exceeds the cap.
    pub fn backoff_delay(&self, attempt: u32, suggested: Option<Duration>) -> Duration {
        let exponential =
            self.initial_backoff.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let computed = Duration::from_millis(exponential.min(u64::MAX as f64) as u64);
        computed
            .max(suggested.unwrap_or(Duration::ZERO))
            .min(self.max_backoff)
    }
}
