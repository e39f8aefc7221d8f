//! Multiple-choice quiz concepts.
//!
//! - [`option_set::OptionSet`]: ordered, letter-labelled answer options
//! - [`answer::NormalizedAnswer`]: the fixed `{choice, confidence, explanation}` result
//! - [`extract::split_question_and_options`]: question/option recovery from OCR text

pub mod answer;
pub mod extract;
pub mod option_set;
