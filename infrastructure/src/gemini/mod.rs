//! Gemini REST adapter for the LLM gateway port.

pub mod gateway;

pub use gateway::GeminiGateway;
