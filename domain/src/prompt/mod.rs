//! Prompt domain
//!
//! Renders questions and options into the instruction sent to the LLM collaborator.

mod template;

pub use template::{EXAMPLE_REPLY, PromptTemplate};
