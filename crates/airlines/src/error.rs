//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use airlines_config::ConfigError;
use airlines_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const DATA: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connectivity ─────────────────────────────────────────────────
    #[error("No internet connection")]
    #[diagnostic(
        code(airlines::offline),
        help("Reconnect and try again, or use the bundled data with --source asset.")
    )]
    Offline,

    #[error("Could not reach {url}")]
    #[diagnostic(
        code(airlines::connection_failed),
        help(
            "Check that the endpoint is running and accessible.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(airlines::timeout),
        help("Increase the timeout with --timeout or check the endpoint.")
    )]
    Timeout { seconds: u64 },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(airlines::data),
        help("The airline document is malformed. Check the file or endpoint contents.")
    )]
    Data { message: String },

    #[error("Source responded with HTTP {status}")]
    #[diagnostic(code(airlines::http_status), help("URL: {url}"))]
    Http { status: u16, url: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(airlines::not_found),
        help("Run: airlines {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    /// `watch --once` finished on an error view.
    #[error("{message}")]
    #[diagnostic(code(airlines::load_failed))]
    LoadFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(airlines::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(airlines::config_exists),
        help("Pass --force to overwrite it, or edit it directly.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(airlines::config),
        help("Check the config file (airlines config path) and AIRLINES_* variables.")
    )]
    Config(Box<ConfigError>),

    // ── Internal / IO / Serialization ────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(airlines::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(airlines::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(airlines::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to render TOML: {0}")]
    #[diagnostic(code(airlines::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Offline | Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Data { .. } => exit_code::DATA,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Offline => CliError::Offline,

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Parse { message } => CliError::Data { message },

            CoreError::Api { status, url } => CliError::Http { status, url },

            CoreError::AirlineNotFound { id } => CliError::NotFound {
                resource_type: "airline".into(),
                identifier: id,
                list_command: "list".into(),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::AlreadyStarted => CliError::Internal("controller already started".into()),

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Source(source) => CoreError::from(source).into(),
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(Box::new(other)),
        }
    }
}
