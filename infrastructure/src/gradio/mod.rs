//! Gradio HTTP API adapter for the OCR service port.
//!
//! Works with any Gradio app whose endpoint takes one image and returns the
//! recognition result as its first output (e.g. a PaddleOCR Space).

pub mod client;
mod sse;

pub use client::GradioOcrClient;
