// Remote endpoint source
//
// Issues a single `GET {base}/airlines.json` per fetch. No retries, no
// caching: each call is a fresh request.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::Airline;
use crate::source::AirlineSource;
use crate::transport::TransportConfig;

/// Document name appended to the configured base URL.
pub const ENDPOINT_PATH: &str = "airlines.json";

/// Airline source backed by an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl RemoteSource {
    /// Create a source for `base_url` using a client built from `transport`.
    pub fn new(base_url: &Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            endpoint: endpoint_url(base_url)?,
            timeout: transport.timeout,
        })
    }

    /// Create a source with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &Url) -> Result<Self, Error> {
        Ok(Self {
            http,
            endpoint: endpoint_url(base_url)?,
            timeout: TransportConfig::default().timeout,
        })
    }

    /// The fully resolved document URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Resolve the document URL, treating `base` as a directory even when it
/// lacks a trailing slash (`https://host/v1` → `https://host/v1/airlines.json`).
fn endpoint_url(base: &Url) -> Result<Url, Error> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(ENDPOINT_PATH)?)
}

#[async_trait]
impl AirlineSource for RemoteSource {
    async fn fetch(&self) -> Result<Vec<Airline>, Error> {
        debug!("GET {}", self.endpoint);

        let resp = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = resp.text().await.map_err(|e| self.map_transport(e))?;

        let airlines: Vec<Airline> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        debug!(count = airlines.len(), "fetched remote airline list");
        Ok(airlines)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

impl RemoteSource {
    fn map_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}
