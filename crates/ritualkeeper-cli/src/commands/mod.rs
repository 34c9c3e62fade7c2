pub mod achievements;
pub mod data;
pub mod inventory;
pub mod profile;
pub mod ritual;
pub mod shop;
pub mod stats;
pub mod suggest;

use ritualkeeper_core::{Config, FileStore, HabitService, SystemClock};

/// Open the service against the default data directory, creating the
/// account on first run from the configured username.
pub fn open_service() -> Result<HabitService<FileStore, SystemClock>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let username = config.username.as_deref().unwrap_or("keeper");
    let store = FileStore::open()?;
    Ok(HabitService::open(store, SystemClock, username)?)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    Config::load()
}
