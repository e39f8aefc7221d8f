//! Resolve Answer use case.
//!
//! Asks the LLM collaborator a question and repairs its reply into a
//! [`NormalizedAnswer`]:
//!
//! 1. Render the prompt ([`PromptTemplate::answer_prompt`])
//! 2. Call the gateway with a per-call timeout
//! 3. Pick the reply text out of the raw reply ([`NormalizerChain::llm`])
//! 4. Parse and normalize the JSON payload ([`parse_answer`])
//!
//! A failure in any of steps 2-4 is retried with exponential backoff until
//! the [`RetryPolicy`] is exhausted. All failure kinds are equally retryable.

use crate::config::{RetryPolicy, SolveParams};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use snapquiz_domain::core::string::truncate;
use snapquiz_domain::{
    Model, NormalizedAnswer, NormalizerChain, OptionSet, PromptTemplate, Question, ReplyError,
    parse_answer,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single attempt failed. Every variant is retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Reply(#[from] ReplyError),
}

impl AttemptError {
    /// Failure category recorded in the answer log.
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptError::Gateway(_) => "gateway",
            AttemptError::Reply(e) if e.is_malformed() => "malformed_reply",
            AttemptError::Reply(e) if e.is_schema_violation() => "schema_violation",
            AttemptError::Reply(_) => "unreadable_reply",
        }
    }
}

/// Errors that escape the retry loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveAnswerError {
    #[error("LLM request failed after {attempts} attempts: {last_error}")]
    Exhausted {
        attempts: u32,
        last_error: AttemptError,
    },
}

impl ResolveAnswerError {
    /// Number of attempts made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            ResolveAnswerError::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// The failure of the final attempt.
    pub fn last_error(&self) -> &AttemptError {
        match self {
            ResolveAnswerError::Exhausted { last_error, .. } => last_error,
        }
    }
}

/// Input for the [`ResolveAnswerUseCase`].
#[derive(Debug, Clone)]
pub struct ResolveAnswerInput {
    pub question: Question,
    pub options: OptionSet,
    pub model: Model,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl ResolveAnswerInput {
    /// Create an input with the default model, retry policy and timeout.
    pub fn new(question: Question, options: OptionSet) -> Self {
        Self::from_params(question, options, &SolveParams::default())
    }

    /// Create an input from pipeline parameters.
    pub fn from_params(question: Question, options: OptionSet, params: &SolveParams) -> Self {
        Self {
            question,
            options,
            model: params.model.clone(),
            retry: params.retry.clone(),
            timeout: params.timeout,
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.retry.initial_backoff = backoff;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Use case for resolving a question into a [`NormalizedAnswer`].
#[derive(Clone)]
pub struct ResolveAnswerUseCase {
    gateway: Arc<dyn LlmGateway>,
    normalizers: Arc<NormalizerChain>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ResolveAnswerUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            normalizers: Arc::new(NormalizerChain::llm()),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Replace the reply normalizers (for collaborators with other reply shapes).
    pub fn with_normalizers(mut self, normalizers: NormalizerChain) -> Self {
        self.normalizers = Arc::new(normalizers);
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Resolve the question, retrying failed attempts with backoff.
    pub async fn execute(
        &self,
        input: ResolveAnswerInput,
    ) -> Result<NormalizedAnswer, ResolveAnswerError> {
        let prompt = PromptTemplate::answer_prompt(input.question.content(), &input.options);
        let total_attempts = input.retry.total_attempts();

        info!(
            model = %input.model,
            options = input.options.len(),
            "Resolving answer: {}",
            truncate(input.question.content(), 100)
        );

        let mut attempt = 0;
        loop {
            attempt += 1;

            let error = match self.attempt(&input, &prompt).await {
                Ok(answer) => {
                    info!(
                        attempt,
                        choice = %answer.choice,
                        confidence = answer.confidence,
                        "Answer resolved"
                    );
                    self.conversation_logger.log(ConversationEvent::new(
                        "answer_resolved",
                        serde_json::json!({
                            "model": input.model.to_string(),
                            "attempts": attempt,
                            "answer": &answer,
                        }),
                    ));
                    return Ok(answer);
                }
                Err(error) => error,
            };

            self.conversation_logger.log(ConversationEvent::new(
                "llm_attempt_failed",
                serde_json::json!({
                    "model": input.model.to_string(),
                    "attempt": attempt,
                    "kind": error.kind(),
                    "error": error.to_string(),
                }),
            ));

            if attempt >= total_attempts {
                warn!(attempts = attempt, "Giving up: {}", error);
                self.conversation_logger.log(ConversationEvent::new(
                    "resolve_failed",
                    serde_json::json!({
                        "model": input.model.to_string(),
                        "attempts": attempt,
                        "error": error.to_string(),
                    }),
                ));
                return Err(ResolveAnswerError::Exhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }

            let delay = input.retry.backoff_for(attempt);
            warn!(
                attempt,
                max_attempts = total_attempts,
                delay_ms = delay.as_millis() as u64,
                "Attempt failed, retrying: {}",
                error
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// One gateway call plus reply parsing.
    async fn attempt(
        &self,
        input: &ResolveAnswerInput,
        prompt: &str,
    ) -> Result<NormalizedAnswer, AttemptError> {
        let reply = self
            .gateway
            .generate(&input.model, prompt, input.timeout)
            .await?;

        let text = self.normalizers.normalize(&reply)?;
        debug!(bytes = text.len(), "Reply text: {}", truncate(&text, 200));

        Ok(parse_answer(&text, &input.options)?)
    }
}
