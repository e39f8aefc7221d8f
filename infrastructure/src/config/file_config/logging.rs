//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rolling `snapquiz.log` files. Console only when unset.
    pub dir: Option<PathBuf>,
    /// JSONL file recording every solved question. Disabled when unset.
    pub answer_log: Option<PathBuf>,
}
