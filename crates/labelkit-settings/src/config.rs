//! Configuration management for LabelKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Data directories (system and user template locations)
//! - XML output preferences (units used when writing lengths)

use crate::error::{SettingsError, SettingsResult};
use labelkit_core::units::Units;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "labelkit";
const TEMPLATES_DIR: &str = "templates";
const CONFIG_FILE: &str = "config.toml";

/// Template data directory settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Directory holding the installed paper, category and template files
    pub system_dir: PathBuf,
    /// Directory holding user-defined templates
    pub user_dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            system_dir: default_system_dir(),
            user_dir: default_user_dir(),
        }
    }
}

/// XML output settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct XmlSettings {
    /// Units used for lengths written to template files
    #[serde(default)]
    pub default_units: Units,
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Data directories
    #[serde(default)]
    pub data: DataSettings,
    /// XML output preferences
    #[serde(default)]
    pub xml: XmlSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default location of the configuration file
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                "config file must be .json or .toml".to_string(),
            ));
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load config from file, falling back to defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                "config file must be .json or .toml".to_string(),
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.data.system_dir.as_os_str().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "data.system_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.data.user_dir.as_os_str().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "data.user_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.data.system_dir == self.data.user_dir {
            return Err(SettingsError::InvalidSetting {
                key: "data.user_dir".to_string(),
                reason: "must differ from data.system_dir".to_string(),
            });
        }

        Ok(())
    }
}

fn default_system_dir() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/usr/share").join(APP_DIR).join(TEMPLATES_DIR)
    }
    #[cfg(not(unix))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(TEMPLATES_DIR)
    }
}

fn default_user_dir() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR).join(TEMPLATES_DIR),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format!(".{}", APP_DIR)),
    }
}
