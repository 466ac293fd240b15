// ── Callback bridge ──
//
// Adapts callback-style platform notifications (one function call per
// network event) into per-subscriber streams. Each subscriber gets its own
// unbounded queue so no transition is ever dropped for a slow consumer.

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, trace};

use super::{ConnectivityMonitor, ConnectivityStatus, StatusStream};

#[derive(Default)]
struct Registry {
    next_id: u64,
    /// Most recent report, replayed to new subscribers the way platform
    /// callbacks fire immediately for the current network on registration.
    last: Option<ConnectivityStatus>,
    subscribers: Vec<(u64, mpsc::UnboundedSender<ConnectivityStatus>)>,
}

#[derive(Default)]
struct Shared {
    registry: Mutex<Registry>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Monitor fed by an external callback source through [`StatusReporter`].
#[derive(Clone, Default)]
pub struct CallbackMonitor {
    shared: Arc<Shared>,
}

impl CallbackMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for the platform side; call [`StatusReporter::report`] from
    /// the network callbacks.
    pub fn reporter(&self) -> StatusReporter {
        StatusReporter {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().subscribers.len()
    }
}

impl ConnectivityMonitor for CallbackMonitor {
    fn observe(&self) -> StatusStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut registry = self.shared.lock();

        if let Some(last) = registry.last {
            // The receiver is alive, so this cannot fail.
            let _ = tx.send(last);
        }

        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.push((id, tx));
        debug!(id, subscribers = registry.subscribers.len(), "connectivity subscriber registered");
        drop(registry);

        Box::pin(Subscription {
            id,
            shared: Arc::clone(&self.shared),
            inner: UnboundedReceiverStream::new(rx),
        })
    }
}

/// Platform-side handle that pushes transitions to every subscriber.
#[derive(Clone)]
pub struct StatusReporter {
    shared: Arc<Shared>,
}

impl StatusReporter {
    /// Deliver `status` to all current subscribers. Returns how many
    /// received it.
    pub fn report(&self, status: ConnectivityStatus) -> usize {
        let mut registry = self.shared.lock();
        registry.last = Some(status);
        registry
            .subscribers
            .retain(|(_, tx)| tx.send(status).is_ok());
        trace!(%status, delivered = registry.subscribers.len(), "connectivity reported");
        registry.subscribers.len()
    }
}

/// Registered stream. Unregisters itself when dropped.
struct Subscription {
    id: u64,
    shared: Arc<Shared>,
    inner: UnboundedReceiverStream<ConnectivityStatus>,
}

impl Stream for Subscription {
    type Item = ConnectivityStatus;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut registry = self.shared.lock();
        registry.subscribers.retain(|(id, _)| *id != self.id);
        debug!(id = self.id, subscribers = registry.subscribers.len(), "connectivity subscriber released");
    }
}
