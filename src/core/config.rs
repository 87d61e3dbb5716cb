use crate::core::error::{Result, ViewportMemoryError};
use crate::core::storage::Storage;
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_REMEMBER_MAX_FILES: i64 = 20;

/// User-facing settings, stored apart from the remembered states.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// History size; zero or less keeps every file.
    pub remember_max_files: i64,
    pub persist_states: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            remember_max_files: DEFAULT_REMEMBER_MAX_FILES,
            persist_states: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing or unreadable.
    pub fn load_or_default(storage: &Storage) -> Self {
        let settings_file = storage.settings_file();
        if !settings_file.exists() {
            log::debug!("No settings at {}, using defaults", settings_file.display());
            return Self::default();
        }

        let parsed = fs::read_to_string(&settings_file)
            .map_err(|e| ViewportMemoryError::storage_read_failed(&settings_file, e))
            .and_then(|content| {
                serde_json::from_str::<Settings>(&content)
                    .map_err(|e| ViewportMemoryError::storage_parse_failed(&settings_file, e))
            });

        match parsed {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &Storage) -> Result<()> {
        storage.ensure_dir()?;

        let settings_file = storage.settings_file();
        let content =
            serde_json::to_string_pretty(self).map_err(ViewportMemoryError::serialization_failed)?;
        fs::write(&settings_file, content)
            .map_err(|e| ViewportMemoryError::storage_write_failed(&settings_file, e))?;

        log::debug!("Saved settings to {}", settings_file.display());
        Ok(())
    }

    /// Whether history eviction is active.
    pub fn is_bounded(&self) -> bool {
        self.remember_max_files > 0
    }
}

/// Parse a boolean setting value as typed on the command line.
pub fn parse_bool_setting(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(ViewportMemoryError::invalid_setting(
            name,
            format!("expected true or false, got '{other}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.remember_max_files, 20);
        assert!(settings.persist_states);
        assert!(settings.is_bounded());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::at(temp_dir.path().join("nested"));
        assert_eq!(Settings::load_or_default(&storage), Settings::default());
    }

    #[test]
    fn test_save_then_load() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let storage = Storage::at(temp_dir.path());
        let settings = Settings {
            remember_max_files: 0,
            persist_states: false,
        };
        settings.save(&storage)?;

        let content = fs::read_to_string(storage.settings_file())?;
        assert!(content.contains("\"rememberMaxFiles\": 0"));
        assert!(content.contains("\"persistStates\": false"));
        assert_eq!(Settings::load_or_default(&storage), settings);
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let storage = Storage::at(temp_dir.path());
        fs::write(storage.settings_file(), r#"{ "rememberMaxFiles": 5 }"#)?;

        let settings = Settings::load_or_default(&storage);
        assert_eq!(settings.remember_max_files, 5);
        assert!(settings.persist_states);
        Ok(())
    }

    #[test]
    fn test_corrupt_file_gives_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let storage = Storage::at(temp_dir.path());
        fs::write(storage.settings_file(), "not json")?;
        assert_eq!(Settings::load_or_default(&storage), Settings::default());
        Ok(())
    }

    #[test]
    fn test_parse_bool_setting() {
        assert!(parse_bool_setting("persist", "TRUE").unwrap());
        assert!(!parse_bool_setting("persist", "off").unwrap());
        assert!(parse_bool_setting("persist", "maybe").is_err());
    }
}
