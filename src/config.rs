//! Configuration management for tbgrep.
//!
//! Loads `~/.config/tbgrep/config.toml` when it exists and falls back to
//! defaults otherwise. The config only supplies defaults; command-line flags
//! always win.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::revlines::DEFAULT_BLOCK_SIZE;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Default normalization flags for stats reports
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportConfig {
    /// Treat tracebacks with varying line numbers as the same
    #[serde(default)]
    pub ignore_line_numbers: bool,
    /// Treat tracebacks with varying exception values as the same
    #[serde(default)]
    pub ignore_exception_values: bool,
}

/// Scan tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Bytes read per backwards step when scanning a file in reverse
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("tbgrep").join("config.toml"))
    }

    /// Load configuration, returning defaults when no file exists.
    ///
    /// Environments without a resolvable config directory also get defaults;
    /// only an unreadable or malformed config file is an error.
    pub fn load() -> Result<Self> {
        let Ok(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
