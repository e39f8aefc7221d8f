//! Pipeline configuration from TOML (`[pipeline]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Split recognized text into question + lettered options.
    pub extract_options: bool,
}
