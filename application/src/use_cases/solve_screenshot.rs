//! Solve Screenshot use case.
//!
//! Image bytes in, [`NormalizedAnswer`] out: OCR the image, flatten the OCR
//! result into text, optionally split out lettered options, then hand the
//! question to [`ResolveAnswerUseCase`].

use super::resolve_answer::{ResolveAnswerError, ResolveAnswerInput, ResolveAnswerUseCase};
use crate::config::SolveParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::ocr_service::{OcrError, OcrService};
use serde::{Deserialize, Serialize};
use snapquiz_domain::core::string::preview;
use snapquiz_domain::{
    NormalizedAnswer, NormalizerChain, OptionSet, Question, ReplyError,
    split_question_and_options,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while solving a screenshot
#[derive(Error, Debug)]
pub enum SolveScreenshotError {
    #[error("No image provided")]
    EmptyImage,

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("Unreadable OCR output: {0}")]
    UnreadableOcrOutput(#[from] ReplyError),

    #[error("No text recognized in image")]
    NoTextRecognized,

    #[error(transparent)]
    Resolve(#[from] ResolveAnswerError),
}

/// Result of a solved screenshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedScreenshot {
    /// Flattened OCR text, before any option splitting.
    pub question_text: String,
    pub answer: NormalizedAnswer,
}

/// Use case for answering a quiz question from a screenshot.
#[derive(Clone)]
pub struct SolveScreenshotUseCase {
    ocr: Arc<dyn OcrService>,
    resolver: ResolveAnswerUseCase,
    normalizers: Arc<NormalizerChain>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SolveScreenshotUseCase {
    pub fn new(ocr: Arc<dyn OcrService>, resolver: ResolveAnswerUseCase) -> Self {
        Self {
            ocr,
            resolver,
            normalizers: Arc::new(NormalizerChain::ocr()),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Replace the OCR result normalizers.
    pub fn with_normalizers(mut self, normalizers: NormalizerChain) -> Self {
        self.normalizers = Arc::new(normalizers);
        self
    }

    /// Create with a conversation logger.
    ///
    /// Only events emitted here (OCR text) go to this logger; the resolver
    /// keeps its own.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        image: &[u8],
        params: &SolveParams,
    ) -> Result<SolvedScreenshot, SolveScreenshotError> {
        if image.is_empty() {
            return Err(SolveScreenshotError::EmptyImage);
        }

        info!(bytes = image.len(), "Running OCR");
        let raw = self.ocr.recognize(image).await?;
        let text = self.normalizers.normalize(&raw)?;
        debug!("OCR text: {}", preview(&text, 200));

        self.conversation_logger.log(ConversationEvent::new(
            "ocr_text",
            serde_json::json!({
                "bytes": image.len(),
                "text": &text,
            }),
        ));

        let (question, options) = if params.extract_options {
            let extracted = split_question_and_options(&text);
            (extracted.question, extracted.options)
        } else {
            (text.clone(), OptionSet::empty())
        };

        let question = Question::try_new(question).ok_or(SolveScreenshotError::NoTextRecognized)?;
        if !options.is_empty() {
            info!(options = options.len(), "Split options out of OCR text");
        }

        let input = ResolveAnswerInput::from_params(question, options, params);
        let answer = self.resolver.execute(input).await?;

        Ok(SolvedScreenshot {
            question_text: text,
            answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::{GatewayError, LlmGateway};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use snapquiz_domain::{Model, ReplyNormalizer};
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockOcr {
        result: Result<Value, OcrError>,
        calls: Mutex<usize>,
    }

    impl MockOcr {
        fn new(result: Result<Value, OcrError>) -> Self {
            Self {
                result,
                calls: Mutex::new(0),
            }
        }

        fn records(texts: &[&str]) -> Self {
            let records: Vec<Value> = texts
                .iter()
                .map(|t| json!([[[0, 0], [1, 1]], [t, 0.99]]))
                .collect();
            Self::new(Ok(json!([records])))
        }
    }

    #[async_trait]
    impl OcrService for MockOcr {
        async fn recognize(&self, _image: &[u8]) -> Result<Value, OcrError> {
            *self.calls.lock().unwrap() += 1;
            self.result.clone()
        }
    }

    struct MockGateway {
        reply: Value,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn text(text: &str) -> Self {
            Self {
                reply: json!({ "text": text }),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn generate(
            &self,
            _model: &Model,
            prompt: &str,
            _timeout: Duration,
        ) -> Result<Value, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn solver(ocr: Arc<MockOcr>, gateway: Arc<MockGateway>) -> SolveScreenshotUseCase {
        SolveScreenshotUseCase::new(ocr, ResolveAnswerUseCase::new(gateway))
    }

    /// Reads results shaped like `{"lines": ["..", ".."]}`.
    struct LinesResult;

    impl ReplyNormalizer for LinesResult {
        fn name(&self) -> &'static str {
            "lines"
        }

        fn accepts(&self, reply: &Value) -> bool {
            reply.get("lines").is_some_and(Value::is_array)
        }

        fn normalize(&self, reply: &Value) -> Result<String, ReplyError> {
            let lines: Vec<&str> = reply["lines"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .collect();
            Ok(lines.join(" "))
        }
    }

    const PNG: &[u8] = b"\x89PNG fake";

    // ==================== Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_solves_from_ocr_records() {
        let ocr = Arc::new(MockOcr::records(&["What is 2+2?", "(a) 3 (b) 4"]));
        let gateway = Arc::new(MockGateway::text(
            r#"{"choice":"b","confidence":0.95,"explanation":"arithmetic"}"#,
        ));

        let solved = solver(ocr.clone(), gateway.clone())
            .execute(PNG, &SolveParams::default())
            .await
            .unwrap();

        assert_eq!(solved.question_text, "What is 2+2? (a) 3 (b) 4");
        assert_eq!(solved.answer.choice, "b");
        assert_eq!(solved.answer.confidence, 0.95);
        assert_eq!(*ocr.calls.lock().unwrap(), 1);

        // Without option extraction the whole text is the question.
        let prompts = gateway.prompts.lock().unwrap();
        assert!(prompts[0].contains("Question: What is 2+2? (a) 3 (b) 4\nOptions:\n\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_options_maps_text_choice() {
        let ocr = Arc::new(MockOcr::records(&[
            "Who is the father of C?",
            "a) Dennis Ritchie b) James Gosling",
        ]));
        let gateway = Arc::new(MockGateway::text(
            r#"{"choice":"Dennis Ritchie","confidence":0.99,"explanation":"Bell Labs"}"#,
        ));

        let params = SolveParams::default().with_extract_options(true);
        let solved = solver(ocr, gateway.clone())
            .execute(PNG, &params)
            .await
            .unwrap();

        assert_eq!(solved.answer.choice, "A");
        let prompts = gateway.prompts.lock().unwrap();
        assert!(prompts[0].contains("Question: Who is the father of C?\n"));
        assert!(prompts[0].contains("A. Dennis Ritchie\nB. James Gosling"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stringified_ocr_result() {
        let ocr = Arc::new(MockOcr::new(Ok(json!("Capital of France?"))));
        let gateway = Arc::new(MockGateway::text(r#"{"choice":"Paris"}"#));

        let solved = solver(ocr, gateway)
            .execute(PNG, &SolveParams::default())
            .await
            .unwrap();

        assert_eq!(solved.question_text, "Capital of France?");
        assert_eq!(solved.answer.choice, "Paris");
        assert_eq!(solved.answer.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_empty_image_is_rejected_before_ocr() {
        let ocr = Arc::new(MockOcr::records(&["unused"]));
        let gateway = Arc::new(MockGateway::text("{}"));

        let err = solver(ocr.clone(), gateway)
            .execute(&[], &SolveParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SolveScreenshotError::EmptyImage));
        assert_eq!(err.to_string(), "No image provided");
        assert_eq!(*ocr.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_ocr_text() {
        let ocr = Arc::new(MockOcr::new(Ok(json!([[]]))));
        let gateway = Arc::new(MockGateway::text("{}"));

        let err = solver(ocr, gateway.clone())
            .execute(PNG, &SolveParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SolveScreenshotError::NoTextRecognized));
        assert!(gateway.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_ocr_shape() {
        let ocr = Arc::new(MockOcr::new(Ok(json!([{"unexpected": true}]))));
        let gateway = Arc::new(MockGateway::text("{}"));

        let err = solver(ocr, gateway)
            .execute(PNG, &SolveParams::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SolveScreenshotError::UnreadableOcrOutput(ReplyError::UnrecognizedOcrShape(_))
        ));
    }

    #[tokio::test]
    async fn test_ocr_failure_propagates() {
        let ocr = Arc::new(MockOcr::new(Err(OcrError::Timeout)));
        let gateway = Arc::new(MockGateway::text("{}"));

        let err = solver(ocr, gateway)
            .execute(PNG, &SolveParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "OCR failed: OCR timeout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_failure_is_transparent() {
        let ocr = Arc::new(MockOcr::records(&["Q?"]));
        let gateway = Arc::new(MockGateway::text("no json here"));

        let params = SolveParams::default()
            .with_retry(crate::config::RetryPolicy::default().with_max_retries(0));
        let err = solver(ocr, gateway)
            .execute(PNG, &params)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "LLM request failed after 1 attempts: Could not find JSON in model output: \"no json here\""
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_ocr_normalizers() {
        let ocr = Arc::new(MockOcr::new(Ok(json!({
            "lines": ["Largest planet?", "(a) Mars (b) Jupiter"]
        }))));
        let gateway = Arc::new(MockGateway::text(r#"{"choice":"Jupiter","confidence":0.8}"#));

        let params = SolveParams::default().with_extract_options(true);
        let solved = solver(ocr, gateway)
            .with_normalizers(NormalizerChain::new().with(LinesResult))
            .execute(PNG, &params)
            .await
            .unwrap();

        assert_eq!(solved.question_text, "Largest planet? (a) Mars (b) Jupiter");
        assert_eq!(solved.answer.choice, "B");
    }
}
