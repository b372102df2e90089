//! Pipeline configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! { "max_depth": 10000, "root_order": "by_reach", "record_path": "graph.json" }
//! ```

use crate::analysis::RootOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Longest dependency chain, in vertices, the evaluator will follow.
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Order of the root set; the first root is the primary result.
    #[serde(default)]
    pub root_order: RootOrder,
    /// Whether the operation spec has a header and a footer line.
    #[serde(default = "default_operations_framed")]
    pub operations_framed: bool,
    /// When set, the canonical record is written here and read back
    /// before loading.
    #[serde(default)]
    pub record_path: Option<PathBuf>,
}

fn default_operations_framed() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            root_order: RootOrder::Declared,
            operations_framed: true,
            record_path: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }
}
