// Airline record as carried by both the bundled document and the remote
// endpoint. Field names on the wire are snake_case and must stay that way
// for compatibility with existing documents.

use serde::{Deserialize, Serialize};

/// A single airline entry. Immutable once deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    /// Unique identifier (typically the IATA code).
    pub id: String,
    pub name: String,
    pub country: String,
    pub headquarters: String,
    pub fleet_size: u32,
    /// Homepage URL.
    pub website: String,
    pub logo_url: String,
}
