//! Configuration file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{QuestError, Result};

/// Default location of the config file
pub const DEFAULT_CONFIG_FILE: &str = "quest.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where goals, score and achievements are saved
    pub save_file: PathBuf,
    /// Directory of goal template TOML files
    pub templates_dir: PathBuf,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_file: PathBuf::from("goals.txt"),
            templates_dir: PathBuf::from("data/goals"),
            log_filter: "quest_tracker=info".to_string(),
        }
    }
}

impl Config {
    /// Read a config file, returning `None` if it does not exist.
    ///
    /// Callers fall back to [`Config::default`]; the binary reads the config
    /// before logging is set up, so reporting the fallback is left to it.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| QuestError::Config(format!("Failed to read {:?}: {}", path, e)))?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|e| QuestError::Config(format!("Failed to parse {:?}: {}", path, e)))
    }
}
