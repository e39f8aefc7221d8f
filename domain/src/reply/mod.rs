//! Collaborator reply handling.
//!
//! Turns the loosely-shaped output of the OCR and LLM collaborators into
//! domain values:
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`NormalizerChain::llm`] | raw LLM reply | reply text |
//! | [`NormalizerChain::ocr`] | raw OCR result | recognized text |
//! | [`parse_answer`] | reply text + options | [`NormalizedAnswer`](crate::NormalizedAnswer) |

pub mod error;
pub mod llm;
pub mod normalizer;
pub mod ocr;
pub mod payload;

pub use error::ReplyError;
pub use normalizer::{NormalizerChain, ReplyNormalizer};
pub use payload::{locate_json_payload, parse_answer, parse_payload};
