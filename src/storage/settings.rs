//! User settings
//!
//! Optional `config.toml` in the platform config directory
//! (`~/.config/npm-pick/config.toml` on Linux). A missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::project_dirs;

/// Settings file name inside the application config directory
pub const SETTINGS_FILE: &str = "config.toml";

/// Package manager used when nothing else is configured
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse settings {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Program launched as `<package_manager> run <script>`
    pub package_manager: String,

    /// Draw the picker on the alternate screen
    pub alt_screen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            alt_screen: true,
        }
    }
}

impl Settings {
    /// Returns the default settings file location
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Loads settings from the default location
    pub fn load() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads settings from `path`, falling back to defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
