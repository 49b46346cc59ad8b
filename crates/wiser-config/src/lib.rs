//! Configuration for the wiser tools.
//!
//! A TOML file, `WISER_*` environment variables and secret resolution
//! (env, keyring, plaintext), translated into `wiser_core::HubSettings`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wiser_core::HubSettings;

/// Environment variable holding the hub secret. Wins over keyring and file.
pub const SECRET_ENV: &str = "WISER_SECRET";
const ENV_PREFIX: &str = "WISER_";
const KEYRING_SERVICE: &str = "wiser";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no hub host configured (set `host` in {path} or WISER_HOST)")]
    MissingHost { path: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Hub address, e.g. `192.168.1.20`.
    pub host: Option<String>,

    /// Hub secret (plaintext -- prefer the keyring or WISER_SECRET).
    pub secret: Option<String>,

    /// Seconds between full refreshes.
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,

    /// Readings below this (°C) are sensor glitches.
    #[serde(default = "default_minimum")]
    pub minimum: f64,

    /// Boost setpoint (°C).
    #[serde(default = "default_boost_temp")]
    pub boost_temp: f64,

    /// Boost duration (minutes).
    #[serde(default = "default_boost_time")]
    pub boost_time: u32,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Setpoint (°C) every room drops to in away mode.
    #[serde(default = "default_away_temperature")]
    pub away_temperature: f64,

    /// Default output format for the CLI.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            secret: None,
            scan_interval: default_scan_interval(),
            minimum: default_minimum(),
            boost_temp: default_boost_temp(),
            boost_time: default_boost_time(),
            timeout: default_timeout(),
            away_temperature: default_away_temperature(),
            output: default_output(),
        }
    }
}

fn default_scan_interval() -> u64 {
    300
}
fn default_minimum() -> f64 {
    -5.0
}
fn default_boost_temp() -> f64 {
    20.0
}
fn default_boost_time() -> u32 {
    30
}
fn default_timeout() -> u64 {
    5
}
fn default_away_temperature() -> f64 {
    10.0
}
fn default_output() -> String {
    "table".into()
}

impl Config {
    /// Build coordinator settings with an already-resolved secret.
    pub fn to_hub_settings(
        &self,
        secret: Option<SecretString>,
    ) -> Result<HubSettings, ConfigError> {
        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::MissingHost {
                path: config_path().display().to_string(),
            })?;

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        Ok(HubSettings {
            host: host.to_owned(),
            secret,
            scan_interval: Duration::from_secs(self.scan_interval),
            minimum_temperature: self.minimum,
            boost_temperature: self.boost_temp,
            boost_minutes: self.boost_time,
            timeout: Duration::from_secs(self.timeout),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "wiser").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("wiser");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from `path` (missing file is fine) layered under `WISER_*` env vars.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent
/// directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Secret resolution ───────────────────────────────────────────────

/// Resolve the hub secret: `WISER_SECRET`, then the system keyring entry
/// for the configured host, then plaintext in the file.
pub fn resolve_secret(cfg: &Config) -> Option<SecretString> {
    // 1. Env var
    if let Ok(secret) = std::env::var(SECRET_ENV) {
        if !secret.is_empty() {
            return Some(SecretString::from(secret));
        }
    }

    // 2. System keyring
    if let Some(host) = cfg.host.as_deref() {
        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, host) {
            if let Ok(secret) = entry.get_password() {
                return Some(SecretString::from(secret));
            }
        }
    }

    // 3. Plaintext in config
    cfg.secret.clone().map(SecretString::from)
}

/// Store the hub secret in the system keyring under the hub's host.
pub fn store_secret(host: &str, secret: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, host)?.set_password(secret)?;
    Ok(())
}
