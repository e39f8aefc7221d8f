//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! after validation.

mod llm;
mod logging;
mod ocr;
mod pipeline;
mod server;

pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use ocr::FileOcrConfig;
pub use pipeline::FilePipelineConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use snapquiz_application::{RetryPolicy, SolveParams};
use snapquiz_domain::{ConfigIssue, ConfigIssueCode, Model};
use std::net::SocketAddr;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP server settings
    pub server: FileServerConfig,
    /// LLM collaborator settings
    pub llm: FileLlmConfig,
    /// OCR collaborator settings
    pub ocr: FileOcrConfig,
    /// Screenshot pipeline settings
    pub pipeline: FilePipelineConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Pure: environment variables are not consulted here, see
    /// [`FileConfig::credential_issues`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.llm.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "llm.model".to_string(),
                },
                "llm.model: model name cannot be empty",
            ));
        }

        for (field, secs) in [
            ("llm.timeout_secs", self.llm.timeout_secs),
            ("ocr.timeout_secs", self.ocr.timeout_secs),
        ] {
            if secs == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroTimeout {
                        field: field.to_string(),
                    },
                    format!("{}: timeout must be at least 1 second", field),
                ));
            }
        }

        let backoff = self.llm.initial_backoff_secs;
        if backoff <= 0.0 || Duration::try_from_secs_f64(backoff).is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidBackoff {
                    field: "llm.initial_backoff_secs".to_string(),
                },
                format!(
                    "llm.initial_backoff_secs: expected a positive number of seconds within range, got {}",
                    backoff
                ),
            ));
        }

        for (field, url) in [
            ("llm.base_url", &self.llm.base_url),
            ("ocr.base_url", &self.ocr.base_url),
        ] {
            if url.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyUrl {
                        field: field.to_string(),
                    },
                    format!("{}: URL cannot be empty", field),
                ));
            }
        }

        if self.server.bind.parse::<SocketAddr>().is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidBindAddress {
                    value: self.server.bind.clone(),
                },
                format!(
                    "server.bind: '{}' is not a valid host:port address",
                    self.server.bind
                ),
            ));
        }

        issues
    }

    /// Warn when no LLM credential can be found.
    pub fn credential_issues(&self) -> Vec<ConfigIssue> {
        if self.llm.resolve_api_key().is_some() {
            return Vec::new();
        }
        vec![ConfigIssue::warning(
            ConfigIssueCode::MissingApiKey {
                env: self.llm.api_key_env.clone(),
            },
            format!(
                "no LLM API key: set {} or llm.api_key; requests will be rejected",
                self.llm.api_key_env
            ),
        )]
    }

    /// Pipeline parameters for the use cases.
    ///
    /// Call [`FileConfig::validate`] first; backoff values it rejects fall
    /// back to the default policy here.
    pub fn to_solve_params(&self) -> SolveParams {
        let default_retry = RetryPolicy::default();
        let initial_backoff = Duration::try_from_secs_f64(self.llm.initial_backoff_secs)
            .unwrap_or(default_retry.initial_backoff);

        SolveParams::default()
            .with_model(Model::from(self.llm.model.trim()))
            .with_retry(
                default_retry
                    .with_max_retries(self.llm.max_retries)
                    .with_initial_backoff(initial_backoff),
            )
            .with_timeout(Duration::from_secs(self.llm.timeout_secs))
            .with_extract_options(self.pipeline.extract_options)
    }
}
