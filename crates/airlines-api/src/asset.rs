// Bundled-document source
//
// Reads an airline list from a JSON document, either a file on disk or a
// document compiled into the binary. Read and parse failures both surface
// as `Error::Asset`, so the caller sees a single "failed to parse" message.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Error;
use crate::model::Airline;
use crate::source::AirlineSource;

/// The document shipped with the crate.
const BUNDLED: &str = include_str!("../assets/airlines.json");

#[derive(Debug, Clone)]
enum Origin {
    File(PathBuf),
    Document(Arc<str>),
}

/// Airline source backed by a JSON document.
#[derive(Debug, Clone)]
pub struct AssetSource {
    origin: Origin,
}

impl AssetSource {
    /// Read the document from `path` on every fetch.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::File(path.into()),
        }
    }

    /// Serve an in-memory document.
    pub fn from_document(document: impl Into<Arc<str>>) -> Self {
        Self {
            origin: Origin::Document(document.into()),
        }
    }

    /// The airline list compiled into this crate.
    pub fn bundled() -> Self {
        Self::from_document(BUNDLED)
    }

    async fn read(&self) -> Result<Arc<str>, Error> {
        match &self.origin {
            Origin::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| Error::Asset {
                        message: format!("{}: {e}", path.display()),
                    })?;
                Ok(Arc::from(text))
            }
            Origin::Document(doc) => Ok(Arc::clone(doc)),
        }
    }
}

/// Parse a document into an ordered airline list.
///
/// A literal `null` document is treated as an empty list.
pub fn parse_document(text: &str) -> Result<Vec<Airline>, Error> {
    serde_json::from_str::<Option<Vec<Airline>>>(text)
        .map(Option::unwrap_or_default)
        .map_err(|e| Error::Asset {
            message: e.to_string(),
        })
}

#[async_trait]
impl AirlineSource for AssetSource {
    async fn fetch(&self) -> Result<Vec<Airline>, Error> {
        let text = self.read().await?;
        let airlines = parse_document(&text)?;
        debug!(count = airlines.len(), source = %self.describe(), "parsed airline document");
        Ok(airlines)
    }

    fn describe(&self) -> String {
        match &self.origin {
            Origin::File(path) => path.display().to_string(),
            Origin::Document(_) => "<bundled>".into(),
        }
    }
}
