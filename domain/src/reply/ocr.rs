//! OCR result shapes.

use super::error::ReplyError;
use super::normalizer::ReplyNormalizer;
use crate::core::string::preview;
use serde_json::Value;

const SHAPE_PREVIEW_LEN: usize = 120;

/// PaddleOCR-style result: `[[ [geometry, [text, score]], ... ]]`.
///
/// Only the first page (outer element 0) is read. Record texts are joined
/// with single spaces in the order the collaborator returned them.
///
/// Any list that does not follow this layout is rejected instead of being
/// flattened into a misleading string.
pub struct OcrRecordList;

impl OcrRecordList {
    fn record_text(record: &Value) -> Option<&str> {
        record.get(1)?.get(0)?.as_str()
    }
}

impl ReplyNormalizer for OcrRecordList {
    fn name(&self) -> &'static str {
        "ocr_record_list"
    }

    fn accepts(&self, reply: &Value) -> bool {
        reply.is_array()
    }

    fn normalize(&self, reply: &Value) -> Result<String, ReplyError> {
        let unrecognized = || ReplyError::UnrecognizedOcrShape(preview(&reply.to_string(), SHAPE_PREVIEW_LEN));

        let records = reply
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(unrecognized)?;

        let texts = records
            .iter()
            .map(Self::record_text)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(unrecognized)?;

        Ok(texts.join(" "))
    }
}

/// Fallback for opaque results: strings as-is, anything else as JSON text.
pub struct StringifiedReply;

impl ReplyNormalizer for StringifiedReply {
    fn name(&self) -> &'static str {
        "stringified"
    }

    fn accepts(&self, _reply: &Value) -> bool {
        true
    }

    fn normalize(&self, reply: &Value) -> Result<String, ReplyError> {
        Ok(match reply {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
