use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::ConfigError;
use crate::targets::CleanupTarget;

/// Global cachesweep configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Wait for a keypress before exiting an interactive run
    #[serde(default = "default_pause_on_exit")]
    pub pause_on_exit: bool,

    /// Rows above the bottom of the window where the live panel is drawn
    #[serde(default = "default_panel_offset")]
    pub panel_offset: u16,

    /// Default target labels to skip
    #[serde(default)]
    pub exclude_labels: Vec<String>,

    /// Additional targets appended to the OS defaults
    #[serde(default)]
    pub extra_targets: Vec<CleanupTarget>,
}

/// The live panel is three lines tall and must fit above the bottom edge
pub const MIN_PANEL_OFFSET: u16 = 3;

fn default_pause_on_exit() -> bool {
    true
}
fn default_panel_offset() -> u16 {
    13
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pause_on_exit: default_pause_on_exit(),
            panel_offset: default_panel_offset(),
            exclude_labels: Vec::new(),
            extra_targets: Vec::new(),
        }
    }
}

impl Config {
    /// Get the cachesweep data directory (~/.cachesweep)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(".cachesweep")
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.panel_offset < MIN_PANEL_OFFSET {
            return Err(ConfigError::InvalidValue {
                key: "panel_offset".to_string(),
                value: config.panel_offset.to_string(),
            });
        }
        Ok(config)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(write_err)
    }

    /// Set a scalar value by key name
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "pause_on_exit" => self.pause_on_exit = value.parse().map_err(|_| invalid())?,
            "panel_offset" => {
                let offset: u16 = value.parse().map_err(|_| invalid())?;
                if offset < MIN_PANEL_OFFSET {
                    return Err(invalid());
                }
                self.panel_offset = offset;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Check if a target label is excluded (case-insensitive)
    pub fn is_excluded(&self, label: &str) -> bool {
        self.exclude_labels
            .iter()
            .any(|l| l.eq_ignore_ascii_case(label))
    }
}
