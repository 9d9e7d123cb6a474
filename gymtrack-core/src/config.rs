//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/gymtrack/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/gymtrack/` (~/.config/gymtrack/)
//! - Data: `$XDG_DATA_HOME/gymtrack/` (~/.local/share/gymtrack/)
//! - State/Logs: `$XDG_STATE_HOME/gymtrack/` (~/.local/state/gymtrack/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard analytics configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Number of members listed as top performers
    #[serde(default = "default_top_performers")]
    pub top_performers: usize,

    /// Number of workout types listed in the breakdown
    #[serde(default = "default_top_workout_types")]
    pub top_workout_types: usize,

    /// Include period-over-period comparison in dashboards
    #[serde(default = "default_include_trends")]
    pub include_trends: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_performers: default_top_performers(),
            top_workout_types: default_top_workout_types(),
            include_trends: default_include_trends(),
        }
    }
}

impl AnalyticsConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.top_performers == 0 {
            return Err(Error::Config(
                "analytics.top_performers must be at least 1".to_string(),
            ));
        }
        if self.top_workout_types == 0 {
            return Err(Error::Config(
                "analytics.top_workout_types must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_top_performers() -> usize {
    5
}

fn default_top_workout_types() -> usize {
    8
}

fn default_include_trends() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.analytics.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/gymtrack/config.toml` (~/.config/gymtrack/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("gymtrack").join("config.toml")
    }

    /// Returns the data directory path (for SQLite database)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("gymtrack")
    }

    /// Returns the state directory path (for logs)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("gymtrack")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/gymtrack/gymtrack.db` (~/.local/share/gymtrack/gymtrack.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("gymtrack.db")
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("gymtrack.log")
    }
}
