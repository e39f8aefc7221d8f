//! OCR service port
//!
//! Defines the interface for the OCR collaborator.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to the OCR collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("OCR timeout")]
    Timeout,

    #[error("OCR prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// OCR collaborator
///
/// Implementations return the recognition result as raw JSON; flattening it
/// into text is done by the domain OCR normalizers.
#[async_trait]
pub trait OcrService: Send + Sync {
    /// Recognize text in an encoded image (PNG, JPEG, ...).
    async fn recognize(&self, image: &[u8]) -> Result<Value, OcrError>;
}
