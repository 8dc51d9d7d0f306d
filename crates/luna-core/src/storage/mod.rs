mod config;
pub mod snapshot;

pub use config::{Config, CycleConfig, InsightsConfig, ProfileConfig};
pub use snapshot::{JsonFileStore, MemoryStore, SnapshotStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `LUNA_HOME` overrides the location outright. Otherwise
/// `~/.config/luna[-dev]/` is used, with `LUNA_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("LUNA_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("LUNA_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("luna-dev")
            } else {
                base_dir.join("luna")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
