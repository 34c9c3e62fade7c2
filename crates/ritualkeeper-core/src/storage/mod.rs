//! Persistence: the pluggable document store and the TOML config.

mod config;
mod store;

pub use config::Config;
pub use store::{FileStore, MemoryStore, Store};

use std::path::PathBuf;

/// Logical document keys. Each key maps to one independently written
/// JSON document.
pub mod keys {
    pub const ACCOUNT: &str = "account";
    pub const RITUALS: &str = "rituals";
    pub const LOGS: &str = "logs";
    pub const UNLOCKS: &str = "unlocks";
}

/// Returns `~/.config/ritualkeeper[-dev]/` based on RITUALKEEPER_ENV.
///
/// Set RITUALKEEPER_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RITUALKEEPER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ritualkeeper-dev")
    } else {
        base_dir.join("ritualkeeper")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
