//! Progress indicators for long-running CLI commands

pub mod spinner;

pub use spinner::Spinner;
