//! Configuration validation issues.
//!
//! Loaders report every problem they find as a [`ConfigIssue`] instead of
//! failing on the first one, so that a single startup shows all of them.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model identifier is empty or whitespace.
    EmptyModelName { field: String },
    /// A timeout is zero.
    ZeroTimeout { field: String },
    /// The initial backoff is negative, zero or not finite.
    InvalidBackoff { field: String },
    /// The server bind address does not parse as `host:port`.
    InvalidBindAddress { value: String },
    /// A required URL is empty.
    EmptyUrl { field: String },
    /// No API credential is available for the LLM collaborator.
    MissingApiKey { env: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
