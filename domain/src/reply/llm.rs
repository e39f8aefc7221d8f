//! LLM reply shapes.

use super::error::ReplyError;
use super::normalizer::ReplyNormalizer;
use serde_json::Value;

/// Reply exposing the generated text directly: `{"text": "..."}`.
pub struct DirectTextReply;

impl ReplyNormalizer for DirectTextReply {
    fn name(&self) -> &'static str {
        "direct_text"
    }

    fn accepts(&self, reply: &Value) -> bool {
        reply
            .get("text")
            .and_then(Value::as_str)
            .is_some_and(|text| !text.is_empty())
    }

    fn normalize(&self, reply: &Value) -> Result<String, ReplyError> {
        Ok(reply
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

/// Reply carrying a list of candidates: `{"candidates": [...]}`.
///
/// Each candidate contributes one fragment, taken from the first of:
/// - `content` as a string
/// - `content.parts[].text`, concatenated (Gemini REST shape)
/// - `text` as a string
///
/// Fragments are joined with newlines in collaborator order. A candidate
/// with none of these contributes an empty fragment.
pub struct CandidateListReply;

impl CandidateListReply {
    fn fragment(candidate: &Value) -> String {
        match candidate.get("content") {
            Some(Value::String(content)) if !content.is_empty() => return content.clone(),
            Some(content @ Value::Object(_)) => {
                if let Some(parts) = content.get("parts").and_then(Value::as_array) {
                    let joined: String = parts
                        .iter()
                        .filter_map(|part| part.get("text").and_then(Value::as_str))
                        .collect();
                    if !joined.is_empty() {
                        return joined;
                    }
                }
            }
            _ => {}
        }
        candidate
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

impl ReplyNormalizer for CandidateListReply {
    fn name(&self) -> &'static str {
        "candidate_list"
    }

    fn accepts(&self, reply: &Value) -> bool {
        reply.get("candidates").is_some_and(Value::is_array)
    }

    fn normalize(&self, reply: &Value) -> Result<String, ReplyError> {
        let candidates = reply
            .get("candidates")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(candidates
            .iter()
            .map(Self::fragment)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::normalizer::NormalizerChain;
    use serde_json::json;

    #[test]
    fn test_direct_text_preferred() {
        let reply = json!({
            "text": "  {\"choice\":\"A\"}  ",
            "candidates": [{"content": "ignored"}]
        });
        assert_eq!(NormalizerChain::llm().normalize(&reply).unwrap(), "{\"choice\":\"A\"}");
    }

    #[test]
    fn test_flat_candidates_joined_with_newlines() {
        let reply = json!({
            "candidates": [
                {"content": "Sure!"},
                {"text": "{\"choice\":\"B\"}"},
                {"finishReason": "STOP"},
                {"content": "Done"}
            ]
        });
        assert_eq!(
            CandidateListReply.normalize(&reply).unwrap(),
            "Sure!\n{\"choice\":\"B\"}\n\nDone"
        );
    }

    #[test]
    fn test_gemini_rest_candidates() {
        let reply = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "```json\n{\"choice\":"}, {"text": "\"C\"}\n```"}]
                },
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-2.0-flash"
        });
        assert_eq!(
            NormalizerChain::llm().normalize(&reply).unwrap(),
            "```json\n{\"choice\":\"C\"}\n```"
        );
    }

    #[test]
    fn test_empty_candidate_list() {
        let reply = json!({"candidates": []});
        assert_eq!(NormalizerChain::llm().normalize(&reply).unwrap(), "");
    }

    #[test]
    fn test_blank_direct_text_is_not_accepted() {
        assert!(!DirectTextReply.accepts(&json!({"text": ""})));
        assert!(!DirectTextReply.accepts(&json!({"text": 42})));
    }
}
