//! Reactive core between `airlines-api` sources and UI consumers (CLI).
//!
//! - **[`Controller`]**: owns the single reactive task that subscribes to a
//!   [`ConnectivityMonitor`] for its whole lifetime and turns connectivity
//!   transitions into fetches from an [`AirlineSource`]. At most one
//!   successful fetch happens per online period; a newer transition always
//!   supersedes an in-flight fetch.
//!
//! - **[`ListMachine`]**: the synchronous state machine behind the
//!   controller: [`UiState`], the offline flag, the fetch gate, and the
//!   generation counter that discards stale fetch results.
//!
//! - **Connectivity** ([`connectivity`]): [`ConnectivityStatus`] plus the
//!   [`CallbackMonitor`] bridge for push-style platform notifications, the
//!   TCP [`ProbeMonitor`], and the fixed [`StaticMonitor`].
//!
//! - **Search** ([`filter`]): case-insensitive name/country filtering and the
//!   [`ListView`] projection the list screen renders.
//!
//! [`AirlineSource`]: airlines_api::AirlineSource

pub mod config;
pub mod connectivity;
pub mod controller;
pub mod error;
pub mod filter;
pub mod state;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use airlines_api::{Airline, AirlineSource};
pub use config::ControllerConfig;
pub use connectivity::{
    CallbackMonitor, ConnectivityMonitor, ConnectivityStatus, ProbeConfig, ProbeMonitor,
    StaticMonitor, StatusReporter, StatusStream,
};
pub use controller::{Controller, fetch_once};
pub use error::CoreError;
pub use filter::{ListView, filter, find_by_id, project};
pub use state::{ListMachine, OFFLINE_MESSAGE, Transition, UiState};
pub use stream::StateStream;
