// airlines-api: airline directory sources (bundled JSON document + remote endpoint)

pub mod asset;
pub mod error;
pub mod model;
pub mod remote;
pub mod source;
pub mod transport;

pub use asset::AssetSource;
pub use error::Error;
pub use model::Airline;
pub use remote::RemoteSource;
pub use source::AirlineSource;
pub use transport::{TlsMode, TransportConfig};
