//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/kintree/kintree.toml`
//! 3. Environment variables: `KINTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::Side;

/// User-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding snapshot files. `None` means the platform data
    /// dir (e.g. `~/.local/share/kintree`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Side used when `--side` is not given.
    pub default_side: Side,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_side: Side::Fatherside,
        }
    }
}

/// Global config directory: `$XDG_CONFIG_HOME/kintree`
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Global config file path: `$XDG_CONFIG_HOME/kintree/kintree.toml`
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("kintree.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_dir` - Optional directory containing `kintree.toml`,
    ///   overriding the global XDG location (used by tests)
    pub fn load(config_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let file_path = match config_dir {
            Some(dir) => Some(dir.join("kintree.toml")),
            None => global_config_path(),
        };

        let mut builder = Config::builder();
        if let Some(path) = file_path {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(Environment::with_prefix("KINTREE").separator("__"));

        let config = builder.build().map_err(config_err)?;

        let mut settings = Self::default();
        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("default_side") {
            settings.default_side = match val.to_lowercase().as_str() {
                "motherside" => Side::Motherside,
                "fatherside" => Side::Fatherside,
                other => {
                    return Err(ApplicationError::Config {
                        message: format!("unknown default_side: {}", other),
                    })
                }
            };
        }
        Ok(settings)
    }

    /// Render the effective settings as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
