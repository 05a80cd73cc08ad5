//! Gearsmith settings with persistence
//!
//! Settings are saved to `~/.config/gearsmith/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use gearsmith_core::{Discipline, SubStyle};
use gearsmith_engine::AccountMode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearsmithSettings {
    pub selection: SelectionSettings,
    pub data: DataSettings,
    pub logging: LoggingSettings,
}

impl GearsmithSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gearsmith"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific file, or return defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(path) = Self::settings_path() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to a specific file, creating its directory
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Defaults for `select` when no request file is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Budget in coins
    pub budget: u64,
    pub discipline: Discipline,
    pub sub_style: SubStyle,
    pub account_mode: AccountMode,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            budget: 10_000_000,
            discipline: Discipline::Melee,
            sub_style: SubStyle::Unspecified,
            account_mode: AccountMode::Standard,
        }
    }
}

/// Data sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Catalog snapshot file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `gearsmith_engine=debug`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: GearsmithSettings = toml::from_str(
            r#"
            [selection]
            discipline = "ranged"

            [data]
            catalog = "/tmp/catalog.json"
            "#,
        )
        .unwrap();
        assert_eq!(settings.selection.discipline, Discipline::Ranged);
        assert_eq!(settings.selection.budget, 10_000_000);
        assert_eq!(settings.data.catalog, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("gearsmith-settings-{}", std::process::id()))
            .join("settings.toml");
        let mut settings = GearsmithSettings::default();
        settings.selection.budget = 42;
        settings.selection.account_mode = AccountMode::Ironman;
        settings.save_to(&path).unwrap();

        let loaded = GearsmithSettings::load_from(&path);
        assert_eq!(loaded, settings);
        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir).unwrap();
        }
    }

    #[test]
    fn test_bad_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("gearsmith-bad-{}.toml", std::process::id()));
        fs::write(&path, "selection = 3").unwrap();
        assert_eq!(GearsmithSettings::load_from(&path), GearsmithSettings::default());
        fs::remove_file(&path).unwrap();
    }
}
