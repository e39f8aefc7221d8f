//! Prompt template for the answer resolver

use crate::quiz::option_set::OptionSet;

/// Example reply embedded in every prompt.
pub const EXAMPLE_REPLY: &str = r#"{"choice":"A","confidence":0.85,"explanation":"Because ..."}"#;

/// Templates for generating collaborator prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Instruction header describing the required JSON reply
    pub fn answer_instructions() -> &'static str {
        r#"You are an assistant that answers multiple-choice questions.
Respond ONLY with a single valid JSON object (no extra text) with keys:
 - choice: the single letter of the chosen option (e.g. "A") or the option text.
 - confidence: a numeric confidence from 0.0 to 1.0 (estimate).
 - explanation: a short (1-2 sentences) rationale for the choice."#
    }

    /// Labelled options block, one `"A. text"` line per option
    pub fn options_block(options: &OptionSet) -> String {
        options
            .labelled()
            .map(|(label, text)| format!("{}. {}", label, text.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Full prompt for a question and its options.
    ///
    /// Deterministic: the same inputs always render the same string.
    pub fn answer_prompt(question: &str, options: &OptionSet) -> String {
        format!(
            r#"{}

Question: {}
Options:
{}

Return only JSON. Example:
{}"#,
            Self::answer_instructions(),
            question.trim(),
            Self::options_block(options),
            EXAMPLE_REPLY
        )
        .trim()
        .to_string()
    }
}
