//! LLM Gateway port
//!
//! Defines the interface for communicating with the LLM collaborator.

use async_trait::async_trait;
use serde_json::Value;
use snapquiz_domain::Model;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// Returns the collaborator's reply as raw JSON; the application layer picks
/// the text out of it with the domain reply normalizers, so adapters stay
/// free of reply-shape assumptions.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a single prompt and return the raw reply.
    ///
    /// `timeout` bounds this call only.
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        timeout: Duration,
    ) -> Result<Value, GatewayError>;
}
