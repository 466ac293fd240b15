// ── Core error types ──
//
// User-facing errors from airlines-core. Consumers never match on
// transport details directly; `From<airlines_api::Error>` folds source
// failures into the variants below while keeping the source message.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connectivity ─────────────────────────────────────────────────
    /// Synthetic error raised by the controller while offline.
    #[error("No internet connection")]
    Offline,

    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    /// Malformed payload; `message` is the source's own text.
    #[error("{message}")]
    Parse { message: String },

    #[error("Source responded with HTTP {status} ({url})")]
    Api { status: u16, url: String },

    #[error("Airline not found: {id}")]
    AirlineNotFound { id: String },

    // ── Lifecycle ────────────────────────────────────────────────────
    #[error("Controller already started")]
    AlreadyStarted,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from source errors ────────────────────────────────────

impl From<airlines_api::Error> for CoreError {
    fn from(err: airlines_api::Error) -> Self {
        match err {
            airlines_api::Error::Asset { .. } | airlines_api::Error::Deserialization { .. } => {
                CoreError::Parse {
                    message: err.to_string(),
                }
            }
            airlines_api::Error::Transport(ref e) => {
                // A raw transport timeout carries no configured duration.
                if e.is_timeout() || e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Internal(err.to_string())
                }
            }
            airlines_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            airlines_api::Error::Status { status, url } => CoreError::Api { status, url },
            airlines_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            airlines_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
        }
    }
}
