//! Configuration file loading for snapquiz
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SNAPQUIZ_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./snapquiz.toml` or `./.snapquiz.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/snapquiz/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLlmConfig, FileLoggingConfig, FileOcrConfig, FilePipelineConfig,
    FileServerConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
