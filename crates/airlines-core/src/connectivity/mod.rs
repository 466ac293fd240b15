// ── Connectivity monitoring ──
//
// A monitor turns some platform notion of "network reachability" into a
// live stream of `ConnectivityStatus` values. Subscribing registers with
// the platform; dropping the stream releases that registration.

mod callback;
mod probe;

use std::pin::Pin;

use futures_core::Stream;
use futures_util::StreamExt;
use futures_util::stream;
use serde::Serialize;
use strum::{Display, EnumString};

pub use callback::{CallbackMonitor, StatusReporter};
pub use probe::{ProbeConfig, ProbeMonitor};

/// Network reachability as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    Available,
    Lost,
    Unavailable,
    Losing,
}

impl ConnectivityStatus {
    /// Everything except `Available` counts as offline.
    pub fn is_offline(self) -> bool {
        self != Self::Available
    }
}

/// Live, unbounded stream of connectivity transitions.
pub type StatusStream = Pin<Box<dyn Stream<Item = ConnectivityStatus> + Send>>;

/// Capability to observe network reachability.
///
/// Every transition the underlying platform reports is delivered in arrival
/// order. No deduplication or debouncing happens at this layer.
pub trait ConnectivityMonitor: Send + Sync {
    /// Register for notifications. Dropping the stream unregisters.
    fn observe(&self) -> StatusStream;
}

/// Monitor that reports one fixed status and then stays silent.
///
/// Used when the caller already knows the answer (`--assume-online`).
#[derive(Debug, Clone, Copy)]
pub struct StaticMonitor {
    status: ConnectivityStatus,
}

impl StaticMonitor {
    pub fn new(status: ConnectivityStatus) -> Self {
        Self { status }
    }

    pub fn online() -> Self {
        Self::new(ConnectivityStatus::Available)
    }
}

impl ConnectivityMonitor for StaticMonitor {
    fn observe(&self) -> StatusStream {
        stream::once(std::future::ready(self.status))
            .chain(stream::pending())
            .boxed()
    }
}
