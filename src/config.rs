//! Dashboard Configuration
//! Optional JSON overrides for data location, sampling and chart sizes.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// File looked up in the working directory at start-up.
pub const CONFIG_FILE: &str = "explorer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            max_words: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub max_rows: usize,
    pub sample_rows: usize,
    pub sample_seed: u64,
    pub default_year_range: (i32, i32),
    pub top_journals: usize,
    pub preview_rows: usize,
    pub word_cloud: WordCloudConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/metadata.csv"),
            max_rows: 20_000,
            sample_rows: 5_000,
            sample_seed: 42,
            default_year_range: (2020, 2021),
            top_journals: 10,
            preview_rows: 10,
            word_cloud: WordCloudConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Defaults when the file is absent; a broken file is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "{e}; using default configuration");
                Self::default()
            }
        }
    }
}
