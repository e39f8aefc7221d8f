//! LLM collaborator configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};
use snapquiz_domain::Model;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Model identifier (default: "gemini-2.0-flash")
    pub model: String,
    /// Environment variable name for the API key (default: "GOOGLE_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL of the Gemini REST API.
    pub base_url: String,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
    /// Delay before the first retry, in seconds. Doubles after every retry.
    pub initial_backoff_secs: f64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: Model::default().to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_retries: 2,
            timeout_secs: 30,
            initial_backoff_secs: 1.0,
        }
    }
}

impl FileLlmConfig {
    /// The API key: `api_key` if set, otherwise the `api_key_env` variable.
    ///
    /// Blank values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}
