//! Domain layer for snapquiz
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Question and options
//!
//! A [`Question`] is answered against an [`OptionSet`]. Options are labelled
//! `A`, `B`, `C`... in input order; an empty set means free response.
//!
//! ## Normalized answer
//!
//! Collaborator replies are repaired into a [`NormalizedAnswer`]
//! (`choice`, `confidence`, `explanation`) by [`parse_answer`]. Only a
//! missing or unparseable payload, or a missing `choice`, is an error.
//!
//! ## Reply normalizers
//!
//! OCR and LLM collaborators return loosely-shaped JSON. Each known shape is
//! handled by a [`ReplyNormalizer`] adapter, picked at runtime by a
//! [`NormalizerChain`].

pub mod config;
pub mod core;
pub mod prompt;
pub mod quiz;
pub mod reply;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{error::DomainError, model::Model, question::Question};
pub use prompt::PromptTemplate;
pub use quiz::{
    answer::{NormalizedAnswer, coerce_confidence, normalize_choice},
    extract::{ExtractedQuestion, split_question_and_options},
    option_set::{MAX_OPTIONS, OptionSet},
};
pub use reply::{
    NormalizerChain, ReplyError, ReplyNormalizer, locate_json_payload, parse_answer,
};
