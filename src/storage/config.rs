//! Configuration handling for Tick
//!
//! Configuration is stored in `~/.config/tick/config.toml` (path per
//! platform conventions). Everything is optional; a missing file means
//! defaults.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::Filter;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Path to the store file (default: the platform data dir)
    pub store_path: Option<PathBuf>,

    /// Filter applied by `tick list` when none is given
    pub default_filter: Option<Filter>,
}

impl Config {
    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        let config_dir = match Self::config_dir() {
            Some(dir) => dir,
            None => return Ok(Self::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))
    }

    /// Returns the user config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "tick", "tick-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Resolves the store file path: CLI override, then config, then the
    /// platform data directory.
    pub fn resolve_store_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path);
        }
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("dev", "tick", "tick-cli")
            .context("Could not determine a data directory for the store")?;
        Ok(dirs.data_dir().join("store.json"))
    }
}
