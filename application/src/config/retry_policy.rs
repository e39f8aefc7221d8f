//! Retry policy for collaborator calls.
//!
//! [`RetryPolicy`] controls how often the answer resolver calls the LLM
//! collaborator again after a failed attempt, and how long it waits in
//! between. Backoff doubles after every retry, with no jitter and no cap.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded retry with exponential backoff.
///
/// | Retry | Delay before it (default) |
/// |-------|---------------------------|
/// | 1     | 1 s                       |
/// | 2     | 2 s                       |
/// | 3     | 4 s                       |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt (`max_retries + 1` attempts in total).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    // ==================== Builder Methods ====================

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    // ==================== Queries ====================

    /// Total number of attempts, first call included.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (1-indexed).
    ///
    /// Saturates at [`Duration::MAX`] instead of overflowing.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let secs = self.initial_backoff.as_secs_f64() * 2f64.powi(exponent);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}
