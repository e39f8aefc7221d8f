//! Errors raised while turning collaborator replies into domain values.

use thiserror::Error;

/// Why a collaborator reply could not be used.
///
/// Everything except [`ReplyError::UnrecognizedOcrShape`] is retryable by
/// the answer resolver: a fresh model call may well produce a usable reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    #[error("Could not find JSON in model output: {0:?}")]
    NoJsonPayload(String),

    #[error("Invalid JSON in model output: {0}")]
    InvalidJson(String),

    #[error("JSON payload in model output is not an object")]
    NotAnObject,

    #[error("Parsed JSON missing 'choice' key")]
    MissingChoice,

    #[error("Unrecognized OCR output shape: {0}")]
    UnrecognizedOcrShape(String),
}

impl ReplyError {
    /// Malformed replies: no payload could be located or parsed.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ReplyError::NoJsonPayload(_) | ReplyError::InvalidJson(_) | ReplyError::NotAnObject
        )
    }

    /// Schema violations: the payload parsed but lacks required keys.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, ReplyError::MissingChoice)
    }
}
