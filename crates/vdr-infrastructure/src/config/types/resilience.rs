//! Retry and deadline configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vdr_application::use_cases::{Backoff, RetryPolicy};
use vdr_domain::constants::UPSERT_MAX_ATTEMPTS;

use crate::constants::{
    DEFAULT_BACKOFF_INITIAL_MS, DEFAULT_BACKOFF_MAX_MS, DEFAULT_MODEL_TIMEOUT_SECS,
    DEFAULT_STORE_TIMEOUT_SECS,
};

/// Retry and deadline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResilienceConfig {
    /// Attempts per batch upsert
    pub upsert_max_attempts: u32,
    /// First backoff delay
    pub backoff_initial_ms: u64,
    /// Backoff ceiling
    pub backoff_max_ms: u64,
    /// Deadline of one store call
    pub store_timeout_secs: u64,
    /// Deadline of one model call
    pub model_timeout_secs: u64,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            upsert_max_attempts: UPSERT_MAX_ATTEMPTS,
            backoff_initial_ms: DEFAULT_BACKOFF_INITIAL_MS,
            backoff_max_ms: DEFAULT_BACKOFF_MAX_MS,
            store_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
            model_timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
        }
    }
}

impl ResilienceConfig {
    /// Upsert retry policy
    pub fn retry_policy(&self) -> RetryPolicy {
        let backoff = if self.backoff_initial_ms == 0 {
            Backoff::None
        } else {
            Backoff::Exponential {
                initial: Duration::from_millis(self.backoff_initial_ms),
                max: Duration::from_millis(self.backoff_max_ms.max(self.backoff_initial_ms)),
            }
        };
        RetryPolicy::new(self.upsert_max_attempts).with_backoff(backoff)
    }

    /// Store call deadline
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// Model call deadline
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }
}
