//! Configuration loading.
//!
//! Settings come from a TOML file resolved in this order: the `--config`
//! flag, `$KANBAN_CONFIG`, then `$HOME/.kanban/config.toml`. A missing file
//! means defaults; an unreadable or malformed one is logged and ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "KANBAN_CONFIG";

/// Settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Defaults applied when creating records
    #[serde(default)]
    pub defaults: Defaults,

    /// Board view settings
    #[serde(default)]
    pub board: BoardConfig,
}

/// Field defaults for newly created tasks and categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Category name for tasks created without one
    #[serde(default = "default_category")]
    pub category: String,

    /// Colour token for categories created without one
    #[serde(default = "default_category_color")]
    pub category_color: String,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_category_color() -> String {
    "#3B82F6".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            category: default_category(),
            category_color: default_category_color(),
        }
    }
}

/// Interactive board settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Show archived cards when the board opens
    #[serde(default)]
    pub show_archived: bool,
}

impl Config {
    /// Parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve and load the configuration, falling back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let Some(path) = config_path(explicit) else {
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring invalid config");
                Self::default()
            }
        }
    }
}

/// Location of the configuration file, if one can be determined.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".kanban").join("config.toml"))
}
