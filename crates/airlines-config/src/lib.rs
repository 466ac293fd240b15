//! Shared configuration for the airlines CLI.
//!
//! TOML file + environment layering via figment, and translation into
//! `airlines_core` / `airlines_api` runtime settings. The CLI applies its
//! own flag overrides on top of the loaded [`Config`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use airlines_api::{AirlineSource, AssetSource, RemoteSource, TlsMode, TransportConfig};
use airlines_core::{ControllerConfig, ProbeConfig};

/// Prefix for environment overrides, nested with `__`
/// (e.g. `AIRLINES_SOURCE__KIND=remote`).
pub const ENV_PREFIX: &str = "AIRLINES_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to build airline source: {0}")]
    Source(#[from] airlines_api::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Where the airline list comes from.
    #[serde(default)]
    pub source: SourceSettings,

    /// List controller tuning.
    #[serde(default)]
    pub controller: ControllerSettings,

    /// Connectivity probe tuning.
    #[serde(default)]
    pub connectivity: ConnectivitySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Source backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// JSON document on disk, or the bundled one.
    #[default]
    Asset,
    /// `GET {base_url}/airlines.json`.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,

    /// Asset document path. Unset means the bundled document.
    pub asset_path: Option<PathBuf>,

    /// Remote base URL (required when `kind = "remote"`).
    pub base_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Accept invalid TLS certificates from the remote endpoint.
    #[serde(default)]
    pub insecure: bool,

    /// Custom CA certificate for the remote endpoint.
    pub ca_cert: Option<PathBuf>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            asset_path: None,
            base_url: None,
            timeout_secs: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ControllerSettings {
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
        }
    }
}

fn default_settle_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectivitySettings {
    #[serde(default = "default_probe_addr")]
    pub probe_addr: String,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
}

impl Default for ConnectivitySettings {
    fn default() -> Self {
        Self {
            probe_addr: default_probe_addr(),
            interval_ms: default_interval_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            failure_threshold: default_failure_threshold(),
        }
    }
}

fn default_probe_addr() -> String {
    "1.1.1.1:443".into()
}
fn default_interval_ms() -> u64 {
    5000
}
fn default_connect_timeout_ms() -> u64 {
    3000
}
fn default_failure_threshold() -> u32 {
    2
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "airlines", "airlines").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("airlines");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config: defaults, then the TOML file (`path` or the
/// platform default), then `AIRLINES_*` environment variables.
///
/// A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to runtime settings ─────────────────────────────────

impl Config {
    /// Reject values the runtime cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "source.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.connectivity.interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "connectivity.interval_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.connectivity.failure_threshold == 0 {
            return Err(ConfigError::Validation {
                field: "connectivity.failure_threshold".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            settle_delay: Duration::from_millis(self.controller.settle_ms),
        }
    }

    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            address: self.connectivity.probe_addr.clone(),
            interval: Duration::from_millis(self.connectivity.interval_ms),
            connect_timeout: Duration::from_millis(self.connectivity.connect_timeout_ms),
            failure_threshold: self.connectivity.failure_threshold,
        }
    }

    pub fn transport_config(&self) -> TransportConfig {
        let tls = if self.source.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.source.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.source.timeout_secs),
        }
    }

    /// Build the configured airline source.
    pub fn build_source(&self) -> Result<Arc<dyn AirlineSource>, ConfigError> {
        match self.source.kind {
            SourceKind::Asset => {
                let source = self
                    .source
                    .asset_path
                    .as_ref()
                    .map_or_else(AssetSource::bundled, AssetSource::from_path);
                Ok(Arc::new(source))
            }
            SourceKind::Remote => {
                let raw = self
                    .source
                    .base_url
                    .as_deref()
                    .ok_or_else(|| ConfigError::Validation {
                        field: "source.base_url".into(),
                        reason: "required when source.kind is \"remote\"".into(),
                    })?;
                let base: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
                    field: "source.base_url".into(),
                    reason: format!("invalid URL: {raw}"),
                })?;
                Ok(Arc::new(RemoteSource::new(&base, &self.transport_config())?))
            }
        }
    }
}
