//! Solve parameters: per-request pipeline settings.
//!
//! [`SolveParams`] groups the static settings both use cases read: which
//! model answers, how failures are retried, how long a collaborator call may
//! take, and whether options are split out of recognized text.

use super::retry_policy::RetryPolicy;
use serde::{Deserialize, Serialize};
use snapquiz_domain::Model;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveParams {
    /// Model asked for the answer.
    pub model: Model,
    /// Retry/backoff policy for the LLM collaborator.
    pub retry: RetryPolicy,
    /// Per-call timeout for the LLM collaborator.
    pub timeout: Duration,
    /// Split OCR text into question + options before resolving.
    pub extract_options: bool,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(30),
            extract_options: false,
        }
    }
}

impl SolveParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_extract_options(mut self, enabled: bool) -> Self {
        self.extract_options = enabled;
        self
    }
}
