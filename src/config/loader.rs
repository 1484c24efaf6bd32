//! Configuration file loading with precedence handling.

use crate::model::{Endpoint, DEFAULT_HOST, DEFAULT_PORT};
use crate::source::RECONNECT_INTERVAL;
use crate::state::{SessionSettings, DEFAULT_INITIAL_Y_MAX, DEFAULT_SAMPLE_COUNT};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "RTT_SCOPE_CONFIG";

/// Environment variable overriding the server host.
pub const HOST_ENV_VAR: &str = "RTT_SCOPE_HOST";

/// Environment variable overriding the server port.
pub const PORT_ENV_VAR: &str = "RTT_SCOPE_PORT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rtt-scope/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// RTT server host name or address.
    #[serde(default)]
    pub host: Option<String>,

    /// RTT server TCP port.
    #[serde(default)]
    pub port: Option<u16>,

    /// Number of samples kept on screen.
    #[serde(default)]
    pub sample_count: Option<usize>,

    /// Initial upper bound of the y axis.
    #[serde(default)]
    pub initial_y_max: Option<f64>,

    /// Whether auto-scale starts enabled.
    #[serde(default)]
    pub auto_scale: Option<bool>,

    /// Delay between reconnection attempts, in milliseconds.
    #[serde(default)]
    pub reconnect_interval_ms: Option<u64>,

    /// Directory snapshot files are written into.
    #[serde(default)]
    pub snapshot_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Buffer capacity N (at least 1).
    pub sample_count: usize,
    /// Initial y axis maximum.
    pub initial_y_max: f64,
    /// Auto-scale on startup.
    pub auto_scale: bool,
    /// Reconnection interval.
    pub reconnect_interval: Duration,
    /// Snapshot output directory.
    pub snapshot_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            sample_count: DEFAULT_SAMPLE_COUNT,
            initial_y_max: DEFAULT_INITIAL_Y_MAX,
            auto_scale: true,
            reconnect_interval: RECONNECT_INTERVAL,
            snapshot_dir: PathBuf::from("."),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Server endpoint.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    /// Parameters for a new scope session.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            sample_count: self.sample_count,
            initial_y_max: self.initial_y_max,
            auto_scale: self.auto_scale,
            snapshot_dir: self.snapshot_dir.clone(),
        }
    }
}

/// Values given explicitly on the command line.
///
/// `None` means the flag was not passed and lower layers win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--host`
    pub host: Option<String>,
    /// `--port`
    pub port: Option<u16>,
    /// `--points`
    pub sample_count: Option<usize>,
    /// `--y-max`
    pub initial_y_max: Option<f64>,
    /// `--no-auto-scale` (maps to `Some(false)`)
    pub auto_scale: Option<bool>,
    /// `--snapshot-dir`
    pub snapshot_dir: Option<PathBuf>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rtt-scope/rtt-scope.log` on Unix-like systems,
/// or the platform equivalent; falls back to the current directory when no
/// state directory is known.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("rtt-scope").join("rtt-scope.log")
    } else {
        PathBuf::from("rtt-scope.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
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

/// Resolve default config file path.
///
/// Returns `~/.config/rtt-scope/config.toml` on Unix, appropriate path on
/// other platforms, `None` if no config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rtt-scope").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `RTT_SCOPE_CONFIG` environment variable
/// 3. Default path `~/.config/rtt-scope/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV_VAR) {
        Ok(env_path) if env_path.is_empty() => {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(_)) => {
            return Err(ConfigError::InvalidPath(format!(
                "{CONFIG_ENV_VAR} is not valid UTF-8"
            )));
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Parse an initial y-axis maximum (clap `value_parser`).
///
/// Accepts finite values above zero only.
pub fn parse_y_max(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid number: {err}"))?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("must be a finite number above 0, got {value}"))
    }
}

/// `value` if usable as the initial y maximum, warning otherwise.
fn checked_y_max(value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        tracing::warn!(value, "Ignoring initial_y_max (must be finite and above 0)");
        None
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        host: config.host.unwrap_or(defaults.host),
        port: config.port.unwrap_or(defaults.port),
        sample_count: config
            .sample_count
            .unwrap_or(defaults.sample_count)
            .max(1),
        initial_y_max: config
            .initial_y_max
            .and_then(checked_y_max)
            .unwrap_or(defaults.initial_y_max),
        auto_scale: config.auto_scale.unwrap_or(defaults.auto_scale),
        reconnect_interval: config
            .reconnect_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.reconnect_interval),
        snapshot_dir: config.snapshot_dir.unwrap_or(defaults.snapshot_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `RTT_SCOPE_HOST`: override host
/// - `RTT_SCOPE_PORT`: override port (ignored unless a valid port number)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(host) = std::env::var(HOST_ENV_VAR) {
        if !host.is_empty() {
            config.host = host;
        }
    }

    if let Ok(port) = std::env::var(PORT_ENV_VAR) {
        match port.trim().parse::<u16>() {
            Ok(port) => config.port = port,
            Err(err) => tracing::warn!(value = %port, error = %err, "Ignoring {PORT_ENV_VAR}"),
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
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }
    if let Some(sample_count) = overrides.sample_count {
        config.sample_count = sample_count.max(1);
    }
    if let Some(initial_y_max) = overrides.initial_y_max.and_then(checked_y_max) {
        config.initial_y_max = initial_y_max;
    }
    if let Some(auto_scale) = overrides.auto_scale {
        config.auto_scale = auto_scale;
    }
    if let Some(snapshot_dir) = overrides.snapshot_dir {
        config.snapshot_dir = snapshot_dir;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
