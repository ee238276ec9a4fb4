//! Configuration system for pathquill.
//!
//! Settings are read from `~/.config/pathquill/config.toml`. Every field is
//! optional in the file; missing fields take their defaults, and command-line
//! arguments override whatever was loaded.
//!
//! # Example
//!
//! ```
//! use pathquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert!(config.normalize_patterns);
//! assert_eq!(config.log_level, "warn");
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: "json".to_string(),
//!     ..Config::default()
//! };
//! assert!(!custom.unknown_is_match);
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Configuration for the pathquill application.
///
/// # Fields
///
/// * `patterns_file` - Pattern file used by `query` when none is given (default: none)
/// * `normalize_patterns` - Normalize patterns before adding them to a set (default: true)
/// * `unknown_is_match` - Count unknown results as matches for the exit status (default: false)
/// * `log_level` - Default log filter when `RUST_LOG` is unset (default: "warn")
/// * `output_format` - "text" or "json" (default: "text")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pattern file used when `query` gets no `--patterns`
    #[serde(default)]
    pub patterns_file: Option<String>,

    /// Normalize patterns before inserting them into a matching set
    #[serde(default = "default_normalize_patterns")]
    pub normalize_patterns: bool,

    /// Treat unknown results as matches when computing the exit status
    #[serde(default)]
    pub unknown_is_match: bool,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "text" or "json"
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

fn default_normalize_patterns() -> bool {
    true
}

/// Returns the default log filter.
fn default_log_level() -> String {
    "warn".to_string()
}

/// Returns the default output format.
fn default_output_format() -> String {
    "text".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns_file: None,
            normalize_patterns: default_normalize_patterns(),
            unknown_is_match: false,
            log_level: default_log_level(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/pathquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("pathquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        debug!("Loading config from {}", path.display());

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring invalid config file {}: {}", path.display(), err);
                Self::default()
            }),
            Err(err) => {
                warn!("Could not read config file {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path` as pretty TOML.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// True when output should be JSON.
    pub fn json_output(&self) -> bool {
        self.output_format.eq_ignore_ascii_case("json")
    }
}
