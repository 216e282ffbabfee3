// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration management.
//!
//! Configuration is stored in `config.toml` inside the data directory and
//! includes:
//! - `[remote]`: where queued operations are replayed
//! - `[sync]`: retry limit, auto-sync period and connectivity probe
//! - `[features]`: optional behavior toggles
//!
//! A missing file means defaults. `ELECTROSPOT_REMOTE_URL` and
//! `ELECTROSPOT_API_KEY` override the `[remote]` section.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::sync::{SyncSettings, DEFAULT_REQUEST_TIMEOUT};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "electrospot";

/// Remote used when none is configured: JSON tables next to the queue.
pub const DEFAULT_REMOTE_URL: &str = "file:remote";

/// Small endpoint answering 200, used to confirm connectivity.
pub const DEFAULT_PROBE_URL: &str = "https://httpbin.org/status/200";

/// Configuration stored in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
}

/// Remote store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Remote URL. Formats:
    /// - `memory:` - in-process tables, lost on exit
    /// - `file:<dir>` - JSON tables, relative to the data directory
    /// - `http://...` or `https://...` - REST backend
    #[serde(default = "default_remote_url")]
    pub url: String,
    /// Sent as the `apikey` header and as a bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds (default: 10000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Sync behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Failed attempts after which an operation is no longer retried (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Auto-sync period in seconds (default: 300).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Endpoint of the connectivity probe. Empty disables the probe, which
    /// then always reports reachable.
    #[serde(default = "default_probe_url")]
    pub probe_url: String,
    /// Probe timeout in milliseconds (default: 5000).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Allow `spot visitor` (default: true).
    #[serde(default = "default_true")]
    pub visitor_mode: bool,
}

fn default_remote_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_millis() as u64
}

fn default_max_retries() -> u32 {
    3
}

fn default_interval_secs() -> u64 {
    300
}

fn default_probe_url() -> String {
    DEFAULT_PROBE_URL.to_string()
}

fn default_probe_timeout_ms() -> u64 {
    5_000
}

fn default_true() -> bool {
    true
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: default_remote_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            max_retries: default_max_retries(),
            interval_secs: default_interval_secs(),
            probe_url: default_probe_url(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        FeaturesConfig { visitor_mode: true }
    }
}

impl Config {
    /// Loads configuration from `dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.sync.interval_secs == 0 {
            return Err(Error::Config(
                "sync.interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.remote.url.is_empty() {
            return Err(Error::Config("remote.url cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Applies `ELECTROSPOT_REMOTE_URL` and `ELECTROSPOT_API_KEY`.
    pub fn with_env_overrides(self) -> Self {
        self.with_remote_overrides(env::remote_url(), env::api_key())
    }

    /// Replaces the remote URL and API key when given.
    pub fn with_remote_overrides(mut self, url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = url {
            self.remote.url = url;
        }
        if api_key.is_some() {
            self.remote.api_key = api_key;
        }
        self
    }

    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            max_retries: self.sync.max_retries,
            interval: Duration::from_secs(self.sync.interval_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.remote.timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.sync.probe_timeout_ms)
    }
}

/// Resolves the data directory.
///
/// `ELECTROSPOT_DIR`, else `$XDG_DATA_HOME/electrospot`, else the platform
/// data directory (`~/.local/share/electrospot` on Linux).
pub fn data_dir() -> Result<PathBuf> {
    resolve_data_dir(env::data_dir(), env::xdg_data_home(), dirs::data_dir())
}

/// Resolution order behind [`data_dir`].
pub fn resolve_data_dir(
    explicit: Option<PathBuf>,
    xdg_data_home: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    xdg_data_home
        .or(platform)
        .map(|base| base.join(APP_DIR_NAME))
        .ok_or_else(|| {
            Error::Config(
                "cannot determine data directory\n  hint: set ELECTROSPOT_DIR".to_string(),
            )
        })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
