pub mod event_db;
mod settings;

pub use event_db::{CompletionOutcome, EventDb};
pub use settings::Settings;

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/pawcal[-dev]/` based on PAWCAL_ENV.
///
/// Set PAWCAL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PAWCAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pawcal-dev")
    } else {
        base_dir.join("pawcal")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
