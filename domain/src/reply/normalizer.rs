//! Reply normalizers: adapters from collaborator reply shapes to flat text.
//!
//! Collaborators do not document their output shapes, so each known shape
//! gets its own [`ReplyNormalizer`]. A [`NormalizerChain`] inspects a reply
//! at runtime and hands it to the first adapter that accepts it.

use super::error::ReplyError;
use super::llm::{CandidateListReply, DirectTextReply};
use super::ocr::{OcrRecordList, StringifiedReply};
use serde_json::Value;

/// Adapter for one known collaborator reply shape.
pub trait ReplyNormalizer: Send + Sync {
    /// Short adapter name, used in logs.
    fn name(&self) -> &'static str;

    /// Whether this adapter recognizes the structure of `reply`.
    fn accepts(&self, reply: &Value) -> bool;

    /// Flatten an accepted reply into text.
    fn normalize(&self, reply: &Value) -> Result<String, ReplyError>;
}

/// Ordered set of adapters; the first accepting adapter wins.
pub struct NormalizerChain {
    normalizers: Vec<Box<dyn ReplyNormalizer>>,
}

impl NormalizerChain {
    /// An empty chain. Every reply normalizes to `""`.
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// Append an adapter (lower priority than those already added).
    pub fn with(mut self, normalizer: impl ReplyNormalizer + 'static) -> Self {
        self.normalizers.push(Box::new(normalizer));
        self
    }

    /// Adapters for LLM collaborator replies.
    ///
    /// A reply matching neither shape yields `""`, which then fails payload
    /// location like any other empty reply.
    pub fn llm() -> Self {
        Self::new().with(DirectTextReply).with(CandidateListReply)
    }

    /// Adapters for OCR collaborator results.
    pub fn ocr() -> Self {
        Self::new().with(OcrRecordList).with(StringifiedReply)
    }

    /// The adapter that would handle `reply`, if any.
    pub fn select(&self, reply: &Value) -> Option<&dyn ReplyNormalizer> {
        self.normalizers
            .iter()
            .find(|n| n.accepts(reply))
            .map(|n| &**n)
    }

    /// Flatten `reply` with the first accepting adapter, trimming the result.
    pub fn normalize(&self, reply: &Value) -> Result<String, ReplyError> {
        match self.select(reply) {
            Some(normalizer) => normalizer.normalize(reply).map(|text| text.trim().to_string()),
            None => Ok(String::new()),
        }
    }
}

impl Default for NormalizerChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NormalizerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.normalizers.iter().map(|n| n.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Shouting;

    impl ReplyNormalizer for Shouting {
        fn name(&self) -> &'static str {
            "shouting"
        }

        fn accepts(&self, reply: &Value) -> bool {
            reply.get("shout").is_some()
        }

        fn normalize(&self, reply: &Value) -> Result<String, ReplyError> {
            Ok(reply["shout"].as_str().unwrap_or_default().to_uppercase())
        }
    }

    #[test]
    fn test_empty_chain_yields_empty_text() {
        assert_eq!(NormalizerChain::new().normalize(&json!({"text": "hi"})).unwrap(), "");
    }

    #[test]
    fn test_first_accepting_adapter_wins() {
        let chain = NormalizerChain::new().with(Shouting).with(StringifiedReply);
        assert_eq!(chain.select(&json!({"shout": "a"})).unwrap().name(), "shouting");
        assert_eq!(chain.normalize(&json!({"shout": " hey "})).unwrap(), "HEY");
        assert_eq!(chain.select(&json!("plain")).unwrap().name(), "stringified");
    }

    #[test]
    fn test_llm_chain_selection() {
        let chain = NormalizerChain::llm();
        assert_eq!(chain.select(&json!({"text": "x"})).unwrap().name(), "direct_text");
        assert_eq!(
            chain.select(&json!({"text": "", "candidates": []})).unwrap().name(),
            "candidate_list"
        );
        assert!(chain.select(&json!({"promptFeedback": {}})).is_none());
        assert_eq!(chain.normalize(&json!({"promptFeedback": {}})).unwrap(), "");
    }

    #[test]
    fn test_ocr_chain_selection() {
        let chain = NormalizerChain::ocr();
        assert_eq!(chain.select(&json!([[]])).unwrap().name(), "ocr_record_list");
        assert_eq!(chain.select(&json!({"text": "x"})).unwrap().name(), "stringified");
    }

    #[test]
    fn test_debug_lists_adapter_names() {
        assert_eq!(
            format!("{:?}", NormalizerChain::llm()),
            r#"["direct_text", "candidate_list"]"#
        );
    }
}
