//! Loads user settings from `<home>/config.toml`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::storage::DEFAULT_QUOTA_BYTES;
use super::view::SortMode;
use crate::api::StoreError;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Data file, relative to the home directory unless absolute.
    pub data_file: PathBuf,
    pub quota_bytes: u64,
    pub default_sort: SortMode,
    /// Usage percentage above which writes log a quota warning.
    pub quota_warning_percent: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("prompts.json"),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            default_sort: SortMode::Recent,
            quota_warning_percent: 90.0,
        }
    }
}

impl Config {
    /// Reads `config.toml` from `base_dir`. A missing file yields the defaults.
    pub fn load(base_dir: &Path) -> Result<Self, StoreError> {
        let config_path = base_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            StoreError::Configuration(format!("Failed to read {}: {}", config_path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, StoreError> {
        toml::from_str(content)
            .map_err(|e| StoreError::Configuration(format!("Failed to parse config.toml: {}", e)))
    }

    pub fn data_path(&self, base_dir: &Path) -> PathBuf {
        if self.data_file.is_absolute() {
            self.data_file.clone()
        } else {
            base_dir.join(&self.data_file)
        }
    }
}
