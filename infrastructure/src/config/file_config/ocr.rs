//! OCR collaborator configuration from TOML (`[ocr]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOcrConfig {
    /// Base URL of the Gradio app serving the OCR model.
    pub base_url: String,
    /// Gradio endpoint name, without the leading slash (default: "predict").
    pub api_name: String,
    /// Environment variable holding an optional bearer token (default: "HF_TOKEN").
    pub token_env: String,
    /// Timeout for the whole upload + predict exchange, in seconds.
    pub timeout_secs: u64,
}

impl Default for FileOcrConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7860".to_string(),
            api_name: "predict".to_string(),
            token_env: "HF_TOKEN".to_string(),
            timeout_secs: 60,
        }
    }
}

impl FileOcrConfig {
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}
