//! TOML-based application settings.
//!
//! Stores the due-soon/alarm threshold and the default export directory.
//! Settings are stored at `~/.config/pawcal/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError};

/// Application settings.
///
/// Serialized to/from TOML at `~/.config/pawcal/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Days before a due date during which an event counts as due soon;
    /// also the default ICS alarm lead time.
    #[serde(default = "default_reminder_days")]
    pub default_reminder_days: u32,
    /// Default directory for exported .ics files.
    #[serde(default)]
    pub export_dir: Option<String>,
}

fn default_reminder_days() -> u32 {
    7
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_reminder_days: default_reminder_days(),
            export_dir: None,
        }
    }
}

impl Settings {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be parsed,
    /// or if the defaults cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(settings)
            }
            Err(_) => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning defaults on error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a settings value as a string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_reminder_days" => Some(self.default_reminder_days.to_string()),
            "export_dir" => Some(self.export_dir.clone().unwrap_or_default()),
            _ => None,
        }
    }

    /// Set a settings value by key and persist. Unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the settings cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        match key {
            "default_reminder_days" => {
                self.default_reminder_days =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as a day count"),
                    })?;
            }
            "export_dir" => {
                self.export_dir = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_reminder_days, 7);
        assert_eq!(parsed.export_dir, None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Settings = toml::from_str("").unwrap();
        assert_eq!(parsed.default_reminder_days, 7);
    }

    #[test]
    fn get_known_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("default_reminder_days").as_deref(), Some("7"));
        assert_eq!(settings.get("export_dir").as_deref(), Some(""));
        assert!(settings.get("missing_key").is_none());
    }
}
