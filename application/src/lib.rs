//! Application layer for snapquiz
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RetryPolicy, SolveParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    ocr_service::{OcrError, OcrService},
};
pub use use_cases::resolve_answer::{
    AttemptError, ResolveAnswerError, ResolveAnswerInput, ResolveAnswerUseCase,
};
pub use use_cases::solve_screenshot::{
    SolveScreenshotError, SolveScreenshotUseCase, SolvedScreenshot,
};
