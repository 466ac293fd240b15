// ── TCP reachability probe ──
//
// For hosts without a network-change notification API: periodically opens
// a TCP connection to a well-known address and reports transitions derived
// from the outcomes.

use std::time::Duration;

use async_stream::stream;
use tokio::net::TcpStream;
use tracing::{debug, trace};

use super::{ConnectivityMonitor, ConnectivityStatus, StatusStream};

/// Probe tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// `host:port` to connect to.
    pub address: String,
    /// Pause between probes.
    pub interval: Duration,
    /// Per-probe connect timeout.
    pub connect_timeout: Duration,
    /// Consecutive failures after `Available` before reporting `Lost`.
    /// Failures below the threshold report `Losing`.
    pub failure_threshold: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            address: "1.1.1.1:443".into(),
            interval: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(3),
            failure_threshold: 2,
        }
    }
}

/// Monitor that derives connectivity from periodic TCP connects.
#[derive(Debug, Clone)]
pub struct ProbeMonitor {
    config: ProbeConfig,
}

impl ProbeMonitor {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }
}

impl ConnectivityMonitor for ProbeMonitor {
    fn observe(&self) -> StatusStream {
        let config = self.config.clone();
        debug!(address = %config.address, interval = ?config.interval, "starting connectivity probe");

        Box::pin(stream! {
            let mut tracker = ProbeTracker::new(config.failure_threshold);
            loop {
                let reachable = probe(&config.address, config.connect_timeout).await;
                trace!(address = %config.address, reachable, "probe finished");
                if let Some(status) = tracker.record(reachable) {
                    yield status;
                }
                tokio::time::sleep(config.interval).await;
            }
        })
    }
}

async fn probe(address: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(address)).await,
        Ok(Ok(_))
    )
}

/// Turns a sequence of probe outcomes into status transitions.
#[derive(Debug)]
struct ProbeTracker {
    threshold: u32,
    failures: u32,
    last: Option<ConnectivityStatus>,
}

impl ProbeTracker {
    fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            failures: 0,
            last: None,
        }
    }

    /// Record one probe outcome; returns the new status when it changed.
    fn record(&mut self, reachable: bool) -> Option<ConnectivityStatus> {
        let next = if reachable {
            self.failures = 0;
            ConnectivityStatus::Available
        } else {
            self.failures = self.failures.saturating_add(1);
            match self.last {
                None => ConnectivityStatus::Unavailable,
                Some(ConnectivityStatus::Available | ConnectivityStatus::Losing) => {
                    if self.failures >= self.threshold {
                        ConnectivityStatus::Lost
                    } else {
                        ConnectivityStatus::Losing
                    }
                }
                Some(other) => other,
            }
        };

        if self.last == Some(next) {
            return None;
        }
        self.last = Some(next);
        Some(next)
    }
}
