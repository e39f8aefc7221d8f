//! Infrastructure layer for snapquiz
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod gradio;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLlmConfig, FileLoggingConfig, FileOcrConfig,
    FilePipelineConfig, FileServerConfig,
};
pub use gemini::GeminiGateway;
pub use gradio::GradioOcrClient;
pub use logging::JsonlAnswerLogger;
