mod config;
pub mod snapshot;

pub use config::Config;
pub use snapshot::{Snapshot, SnapshotStore};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/attention-stream[-dev]/` based on ATTENTION_ENV.
///
/// Set ATTENTION_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ATTENTION_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("attention-stream-dev")
    } else {
        base_dir.join("attention-stream")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
