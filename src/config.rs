//! Runtime configuration read from an optional TOML file.
//!
//! Every field has a default, so an empty or missing file is a valid config.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::post::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "default_bulk_path")]
    pub path: PathBuf,
    /// Data rows to read; unset reads the whole file.
    #[serde(default = "default_rows")]
    pub rows: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            path: default_bulk_path(),
            rows: default_rows(),
        }
    }
}

fn default_bulk_path() -> PathBuf {
    PathBuf::from("user_details.csv")
}

fn default_rows() -> Option<usize> {
    None
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
