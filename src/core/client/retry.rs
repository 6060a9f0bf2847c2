use std::future::Future;
use std::time::Duration;

use crate::core::RawgError;

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`, capped at `max`.
    Exponential {
        /// The delay before the first retry.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// Exponential doubling starting at `base`, capped at 30 seconds.
    #[must_use]
    pub const fn doubling(base: Duration) -> Self {
        Self::Exponential {
            base,
            factor: 2.0,
            max: Duration::from_secs(30),
        }
    }

    /// Delay to sleep after the failed attempt with zero-based index `attempt`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential { base, factor, max } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if !secs.is_finite() || secs >= max.as_secs_f64() {
                    *max
                } else {
                    Duration::from_secs_f64(secs)
                }
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism. When disabled every call gets one attempt.
    pub enabled: bool,
    /// The total number of attempts, including the first one.
    pub max_attempts: u32,
    /// The backoff strategy to use between attempts.
    pub backoff: Backoff,
    /// HTTP status codes that should trigger a retry. 429 maps to [`RawgError::RateLimited`].
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection and other transport errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            backoff: Backoff::doubling(Duration::from_secs(1)),
            retry_on_status: vec![429],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// Whether `err` is transient under this policy.
    #[must_use]
    pub fn should_retry(&self, err: &RawgError) -> bool {
        match err {
            RawgError::RateLimited { .. } => self.retry_on_status.contains(&429),
            RawgError::Status { status, .. } => self.retry_on_status.contains(status),
            RawgError::Timeout { .. } => self.retry_on_timeout,
            RawgError::Connect { .. } | RawgError::Transport(_) => self.retry_on_connect,
            _ => false,
        }
    }

    const fn attempts(&self) -> u32 {
        if self.enabled && self.max_attempts > 1 {
            self.max_attempts
        } else {
            1
        }
    }
}

/// Defines the behavior of the in-memory cache for an API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheMode {
    /// Read from the cache if a non-expired entry is present; otherwise, fetch from the network
    /// and write the response to the cache. (Default)
    Use,
    /// Always fetch from the network, bypassing any cached entry, and write the new response to the cache.
    Refresh,
    /// Always fetch from the network and do not read from or write to the cache.
    Bypass,
}

/// One scheduled retry, handed to the observer before the backoff sleep.
#[derive(Debug)]
pub struct RetryAttempt<'a> {
    /// One-based number of the attempt that just failed.
    pub attempt: u32,
    /// How long the wrapper will sleep before the next attempt.
    pub delay: Duration,
    /// The failure that triggered the retry.
    pub error: &'a RawgError,
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the attempt budget is spent.
///
/// On exhaustion the last error is returned unchanged. `on_retry` is invoked once per scheduled
/// retry, which makes the schedule observable for logging and tests.
///
/// # Errors
///
/// Returns the error of the final attempt, or the first non-retryable error.
pub async fn retry_with_backoff<T, F, Fut, O>(
    cfg: &RetryConfig,
    mut op: F,
    mut on_retry: O,
) -> Result<T, RawgError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RawgError>>,
    O: FnMut(&RetryAttempt<'_>),
{
    let attempts = cfg.attempts();
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(err) => {
                attempt += 1;
                if attempt >= attempts || !cfg.should_retry(&err) {
                    return Err(err);
                }
                let delay = cfg.backoff.delay_for(attempt - 1);
                on_retry(&RetryAttempt {
                    attempt,
                    delay,
                    error: &err,
                });
                tokio::time::sleep(delay).await;
            }
        }
    }
}
