//! # Configuration
//!
//! Run settings read from an optional `storecheck.json` next to the binary's
//! working directory. Every field has a default, so a missing file runs the
//! checks against the public Fake Store API. The per-request timeout is fixed
//! at 30 seconds for every run and is not configurable.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "storecheck.json";
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub base_url: String,
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            report: ReportConfig::default(),
        }
    }
}

/// Where run results go besides the console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ReportConfig {
    pub format: OutputFormat,
    pub json_path: Option<PathBuf>,
    pub history_db: Option<PathBuf>,
}

/// Console output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: format!("failed to read: {e}"),
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: format!("failed to parse: {e}"),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(DEFAULT_TIMEOUT_MS)
    }
}
