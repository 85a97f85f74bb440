//! Retry and timeout policies for store and model calls

use std::future::Future;
use std::time::Duration;

use tracing::warn;
use vdr_domain::constants::UPSERT_MAX_ATTEMPTS;
use vdr_domain::error::{Error, Result};

/// Delay between two attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately
    None,
    /// Constant delay
    Fixed(Duration),
    /// Doubling delay, capped at `max`
    Exponential {
        /// Delay after the first failure
        initial: Duration,
        /// Upper bound
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Self::None => Duration::ZERO,
            Self::Fixed(delay) => delay,
            Self::Exponential { initial, max } => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                initial.saturating_mul(factor).min(max)
            }
        }
    }
}

/// Predicate deciding whether an error is worth another attempt
pub type RetryPredicate = fn(&Error) -> bool;

/// Retry every failure
pub fn retry_any(_: &Error) -> bool {
    true
}

/// Retry only transport, timeout and I/O failures
pub fn retry_transient(error: &Error) -> bool {
    error.is_transient()
}

/// Bounded retry policy
///
/// # Example
///
/// ```ignore
/// let policy = RetryPolicy::new(3).with_backoff(Backoff::None);
/// policy.run("upsert", |_| store.upsert_points("pages", &points)).await?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay between attempts
    pub backoff: Backoff,
    /// Which errors are retried
    pub retryable: RetryPredicate,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: UPSERT_MAX_ATTEMPTS,
            backoff: Backoff::Exponential {
                initial: Duration::from_millis(100),
                max: Duration::from_secs(5),
            },
            retryable: retry_any,
        }
    }
}

impl RetryPolicy {
    /// Policy with `max_attempts` attempts and the default backoff
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Replace the backoff
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Replace the retry predicate
    pub fn with_predicate(mut self, retryable: RetryPredicate) -> Self {
        self.retryable = retryable;
        self
    }

    /// Run `op` until it succeeds, a non-retryable error occurs or attempts run out
    ///
    /// `op` receives the 1-based attempt number. The last error is returned.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && (self.retryable)(&e) => {
                    let delay = self.backoff.delay(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => {
                    warn!(operation, attempt, error = %e, "Attempt failed, giving up");
                    return Err(e);
                }
            }
        }
    }
}

/// Bound `future` by `timeout`, mapping expiry to [`Error::Timeout`]
pub async fn with_timeout<T, Fut>(operation: &str, timeout: Duration, future: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(Error::timeout(operation, timeout)),
    }
}
