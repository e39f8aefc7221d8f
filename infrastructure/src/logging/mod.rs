//! Logging infrastructure: structured answer logging.
//!
//! Provides [`JsonlAnswerLogger`], a JSONL file writer that implements
//! the [`ConversationLogger`](snapquiz_application::ConversationLogger) port.

mod answer_logger;

pub use answer_logger::JsonlAnswerLogger;
