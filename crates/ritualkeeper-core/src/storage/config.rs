//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Account display name for first-run account creation
//! - Suggestion-service endpoint and API key
//! - Stats window size
//!
//! Configuration is stored at `~/.config/ritualkeeper/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;

/// Suggestion-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Endpoint answering suggestion requests. Empty means not configured;
    /// the local fallback list is used instead.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Stats/display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/ritualkeeper/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Username for the account created on first run.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub suggest: SuggestConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_window_days() -> u32 {
    30
}

impl Config {
    fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}
