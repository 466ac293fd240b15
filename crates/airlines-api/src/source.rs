use async_trait::async_trait;

use crate::error::Error;
use crate::model::Airline;

/// Capability to produce the current list of airlines.
///
/// Invoked on demand; implementations perform I/O on every call and never
/// cache. Failures are reported once, with no retries at this layer.
#[async_trait]
pub trait AirlineSource: Send + Sync {
    /// Fetch the full, ordered list of airlines.
    async fn fetch(&self) -> Result<Vec<Airline>, Error>;

    /// Short human-readable description for logs (path or URL).
    fn describe(&self) -> String;
}
