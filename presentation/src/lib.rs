//! Presentation layer for snapquiz
//!
//! This crate contains CLI definitions, output formatters,
//! progress indicators, and the HTTP server.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use progress::Spinner;
pub use server::{AppState, router, start_server};
