use thiserror::Error;

/// Top-level error type for the `airlines-api` crate.
///
/// Covers every failure mode of both sources: reading or parsing the
/// bundled document, and transport, status, and payload failures of the
/// remote endpoint. `airlines-core` surfaces the display string verbatim.
#[derive(Debug, Error)]
pub enum Error {
    // ── Bundled document ────────────────────────────────────────────
    /// The bundled document could not be read or parsed.
    #[error("Failed to parse assets JSON: {message}")]
    Asset { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote endpoint ─────────────────────────────────────────────
    /// The endpoint answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error a later attempt may not hit.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the payload itself was malformed.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Asset { .. } | Self::Deserialization { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn asset_error_carries_prefix() {
        let err = Error::Asset {
            message: "bad json".into(),
        };
        assert_eq!(err.to_string(), "Failed to parse assets JSON: bad json");
        assert!(err.is_parse());
        assert!(!err.is_transient());
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Status {
            status: 503,
            url: "https://example.com/airlines.json".into(),
        };
        assert!(err.is_transient());

        let err = Error::Status {
            status: 404,
            url: "https://example.com/airlines.json".into(),
        };
        assert!(!err.is_transient());
    }
}
