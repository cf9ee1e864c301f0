//! Configuration file loading with precedence handling.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::responsive::BreakpointThresholds;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed fine but is outside its allowed range.
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/paneflow/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Total transition duration in milliseconds.
    #[serde(default)]
    pub default_duration_ms: Option<u64>,

    /// How many layout switches the back-history retains.
    #[serde(default)]
    pub history_capacity: Option<usize>,

    /// Widths at or below this many pixels are mobile.
    #[serde(default)]
    pub mobile_max_width: Option<u32>,

    /// Widths above mobile and at or below this many pixels are tablet.
    #[serde(default)]
    pub tablet_max_width: Option<u32>,

    /// Key the persisted session blob is stored under.
    #[serde(default)]
    pub persistence_key: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Total transition duration in milliseconds.
    pub default_duration_ms: u64,
    /// How many layout switches the back-history retains.
    pub history_capacity: usize,
    /// Mobile/tablet boundary in pixels.
    pub mobile_max_width: u32,
    /// Tablet/desktop boundary in pixels.
    pub tablet_max_width: u32,
    /// Key the persisted session blob is stored under.
    pub persistence_key: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 300,
            history_capacity: 10,
            mobile_max_width: 768,
            tablet_max_width: 1024,
            persistence_key: "paneflow.state".to_string(),
            log_file_path: default_log_path(),
        }
    }
}

impl EngineConfig {
    /// The transition duration as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// The breakpoint thresholds this config describes.
    pub fn thresholds(&self) -> BreakpointThresholds {
        BreakpointThresholds {
            mobile_max: self.mobile_max_width,
            tablet_max: self.tablet_max_width,
        }
    }

    /// Reject configurations whose thresholds cannot classify a width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tablet_max_width <= self.mobile_max_width {
            return Err(ConfigError::InvalidValue {
                field: "tablet_max_width",
                reason: format!(
                    "must exceed mobile_max_width ({} <= {})",
                    self.tablet_max_width, self.mobile_max_width
                ),
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/paneflow/paneflow.log` on Unix-like systems,
/// or the appropriate platform path elsewhere. If the state directory
/// cannot be determined, falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("paneflow").join("paneflow.log")
    } else {
        PathBuf::from("paneflow.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/paneflow/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("paneflow").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `PANEFLOW_CONFIG` environment variable
/// 3. Default path `~/.config/paneflow/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PANEFLOW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise
/// use the hardcoded default.
pub fn merge_config(config_file: Option<ConfigFile>) -> EngineConfig {
    let defaults = EngineConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    EngineConfig {
        default_duration_ms: config
            .default_duration_ms
            .unwrap_or(defaults.default_duration_ms),
        history_capacity: config.history_capacity.unwrap_or(defaults.history_capacity),
        mobile_max_width: config.mobile_max_width.unwrap_or(defaults.mobile_max_width),
        tablet_max_width: config.tablet_max_width.unwrap_or(defaults.tablet_max_width),
        persistence_key: config.persistence_key.unwrap_or(defaults.persistence_key),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PANEFLOW_DURATION_MS`: Override the transition duration.
///
/// Unparseable values are ignored with a warning rather than failing
/// startup.
pub fn apply_env_overrides(mut config: EngineConfig) -> EngineConfig {
    if let Ok(raw) = std::env::var("PANEFLOW_DURATION_MS") {
        match raw.parse::<u64>() {
            Ok(ms) => config.default_duration_ms = ms,
            Err(_) => {
                tracing::warn!(value = %raw, "ignoring unparseable PANEFLOW_DURATION_MS");
            }
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: EngineConfig,
    duration_override: Option<u64>,
    log_file_override: Option<PathBuf>,
) -> EngineConfig {
    if let Some(ms) = duration_override {
        config.default_duration_ms = ms;
    }

    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
