//! Configuration module for the snapshot listener.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `RAZORSNAP_` and use double
//! underscores to separate nested levels:
//! - `RAZORSNAP_OUTPUT__FILE_NAME=razor.json` sets `output.file_name`
//! - `RAZORSNAP_LISTENER__RESOLVE_TIMEOUT_MS=5000` sets `listener.resolve_timeout_ms`
//! - `RAZORSNAP_LOGGING__LEVEL=debug` sets `logging.level`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the per-workspace settings directory
pub const SETTINGS_DIR: &str = ".razorsnap";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    /// Snapshot output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Per-event listener behavior
    #[serde(default)]
    pub listener: ListenerConfig,

    /// Logging settings (binary only)
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// File name appended to the intermediate output directory
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Create the intermediate output directory when it does not exist yet
    #[serde(default = "default_true")]
    pub create_missing_dirs: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ListenerConfig {
    /// Allow projects to request a debugger wait through the debug property
    #[serde(default = "default_false")]
    pub allow_debugger_wait: bool,

    /// Upper bound for a debugger wait, in seconds
    #[serde(default = "default_debugger_wait_timeout_secs")]
    pub debugger_wait_timeout_secs: u64,

    /// Optional deadline for tag helper resolution, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_file_name() -> String {
    crate::path::CONFIGURATION_FILE_NAME.to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_debugger_wait_timeout_secs() -> u64 {
    60
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            create_missing_dirs: true,
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            allow_debugger_wait: false,
            debugger_wait_timeout_secs: default_debugger_wait_timeout_secs(),
            resolve_timeout_ms: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ListenerConfig {
    pub fn resolve_timeout(&self) -> Option<Duration> {
        self.resolve_timeout_ms.map(Duration::from_millis)
    }

    pub fn debugger_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.debugger_wait_timeout_secs)
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(SETTINGS_DIR).join("settings.toml"));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels, single underscore stays
            .merge(Env::prefixed("RAZORSNAP_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for the settings directory
    /// from the current directory up to the root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(SETTINGS_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join("settings.toml"));
            }
        }

        None
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(
        dir: &Path,
        force: bool,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = dir.join(SETTINGS_DIR).join("settings.toml");

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = r#"# razorsnap configuration

[output]
# File written inside each project's intermediate output directory
file_name = "project.razor.json"

# Create the intermediate output directory if the build has not yet
create_missing_dirs = true

[listener]
# Honor the _DebugRazorSnapshot_ project property and wait for a debugger.
# Development only.
allow_debugger_wait = false
debugger_wait_timeout_secs = 60

# Deadline for tag helper resolution in milliseconds (unset = no deadline)
# resolve_timeout_ms = 30000

[logging]
# Overridden by RUST_LOG when set
level = "info"
"#;

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}
