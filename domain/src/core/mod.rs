//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: LLM models the resolver can address
//! - [`question::Question`]: a non-blank question to answer
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
