//! JSON payload extraction and answer normalization.
//!
//! Models are asked for a bare JSON object but often wrap it in prose or
//! markdown fences. The payload is taken to be everything between the first
//! `{` and the last `}` of the reply text.

use super::error::ReplyError;
use crate::core::string::preview;
use crate::quiz::answer::{NormalizedAnswer, coerce_confidence, coerce_explanation, normalize_choice};
use crate::quiz::option_set::OptionSet;
use serde_json::{Map, Value};

/// Longest reply excerpt quoted in error messages.
const ERROR_PREVIEW_LEN: usize = 200;

/// Locate the JSON payload inside free-form reply text.
pub fn locate_json_payload(text: &str) -> Result<&str, ReplyError> {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(&text[start..=end]),
        _ => Err(ReplyError::NoJsonPayload(preview(text, ERROR_PREVIEW_LEN))),
    }
}

/// Locate and parse the payload as a JSON object.
pub fn parse_payload(text: &str) -> Result<Map<String, Value>, ReplyError> {
    let json_str = locate_json_payload(text)?;
    match serde_json::from_str::<Value>(json_str) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ReplyError::NotAnObject),
        Err(e) => Err(ReplyError::InvalidJson(e.to_string())),
    }
}

/// Parse reply text into a [`NormalizedAnswer`].
///
/// Fails when no object can be located or parsed, or when it has no
/// `choice`. `confidence` and `explanation` never cause a failure.
pub fn parse_answer(text: &str, options: &OptionSet) -> Result<NormalizedAnswer, ReplyError> {
    let payload = parse_payload(text)?;

    let choice = payload
        .get("choice")
        .and_then(|raw| normalize_choice(raw, options))
        .ok_or(ReplyError::MissingChoice)?;

    Ok(NormalizedAnswer {
        choice,
        confidence: coerce_confidence(payload.get("confidence")),
        explanation: coerce_explanation(payload.get("explanation")),
    })
}
