//! Configuration loading

use anyhow::{bail, Result};
use netsentry_common::Endpoints;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file name searched for on startup
pub const CONFIG_FILE: &str = ".netsentry.toml";

/// Find a config file by walking up the directory tree, then checking global config.
///
/// Search order:
/// 1. Current directory and parent directories (walking up to root)
/// 2. Global config at ~/.config/netsentry/
///
/// Returns the path if found, None otherwise.
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let start = std::env::current_dir().ok()?;

    for dir in start.ancestors() {
        let candidate = dir.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    // Fallback: Check global config
    let global_path = dirs::config_dir()?.join("netsentry").join(filename);
    global_path.exists().then_some(global_path)
}

// ============================================================================
// Dashboard Configuration (.netsentry.toml)
// ============================================================================

/// Top-level dashboard configuration
#[derive(Debug, Default, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection section
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Polling periods, in seconds
#[derive(Debug, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_traffic_secs")]
    pub traffic_secs: u64,
    #[serde(default = "default_alerts_secs")]
    pub alerts_secs: u64,
    #[serde(default = "default_packets_secs")]
    pub packets_secs: u64,
    #[serde(default = "default_error_packets_secs")]
    pub error_packets_secs: u64,
}

/// Logging section
#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log file used while the dashboard owns the terminal
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_traffic_secs() -> u64 {
    5
}

fn default_alerts_secs() -> u64 {
    5
}

fn default_packets_secs() -> u64 {
    1
}

fn default_error_packets_secs() -> u64 {
    1
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            traffic_secs: default_traffic_secs(),
            alerts_secs: default_alerts_secs(),
            packets_secs: default_packets_secs(),
            error_packets_secs: default_error_packets_secs(),
        }
    }
}

impl PollingConfig {
    pub fn traffic(&self) -> Duration {
        Duration::from_secs(self.traffic_secs)
    }

    pub fn alerts(&self) -> Duration {
        Duration::from_secs(self.alerts_secs)
    }

    pub fn packets(&self) -> Duration {
        Duration::from_secs(self.packets_secs)
    }

    pub fn error_packets(&self) -> Duration {
        Duration::from_secs(self.error_packets_secs)
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LoggingConfig {
    /// Configured log file, or `netsentry.log` in the platform data dir
    /// (falling back to the working directory)
    pub fn file_path(&self) -> PathBuf {
        if let Some(path) = &self.file {
            return path.clone();
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("netsentry"))
            .unwrap_or_default()
            .join("netsentry.log")
    }
}

impl DashboardConfig {
    /// Load config from .netsentry.toml
    ///
    /// Search order:
    /// 1. Walk up directory tree from cwd looking for .netsentry.toml
    /// 2. Check ~/.config/netsentry/.netsentry.toml (global fallback)
    /// 3. Fall back to defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = find_config_file(CONFIG_FILE) {
            tracing::debug!("Loading config from: {}", config_path.display());
            return Self::load_from_path(&config_path);
        }

        // No config file found, return defaults
        tracing::debug!("No {} found, using defaults", CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break the pollers
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("traffic_secs", self.polling.traffic_secs),
            ("alerts_secs", self.polling.alerts_secs),
            ("packets_secs", self.polling.packets_secs),
            ("error_packets_secs", self.polling.error_packets_secs),
        ];
        for (name, secs) in periods {
            if secs == 0 {
                bail!("polling.{} must be at least 1", name);
            }
        }
        if self.backend.timeout_secs == 0 {
            bail!("backend.timeout_secs must be at least 1");
        }
        Ok(())
    }
}
