// ── Airline list controller ──
//
// Owns the single reactive task: subscribe to connectivity once, feed each
// status to the `ListMachine`, run fetch sequences, and publish the results
// through watch channels. All state mutation happens inside that task.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use airlines_api::{Airline, AirlineSource};

use crate::config::ControllerConfig;
use crate::connectivity::{ConnectivityMonitor, StatusStream};
use crate::error::CoreError;
use crate::filter::{ListView, find_by_id, project};
use crate::state::{ListMachine, Transition, UiState};
use crate::stream::StateStream;

type FetchOutcome = (u64, Result<Vec<Airline>, airlines_api::Error>);
type FetchFuture = Pin<Box<dyn Future<Output = FetchOutcome> + Send>>;

// ── Controller ───────────────────────────────────────────────────

/// Connectivity-gated airline list.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Call [`start()`](Self::start)
/// to spawn the reactive task; [`shutdown()`](Self::shutdown) (or dropping
/// the last handle) stops it and releases the connectivity subscription.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    source: Arc<dyn AirlineSource>,
    monitor: Arc<dyn ConnectivityMonitor>,
    shared: Arc<Published>,
    query: watch::Sender<String>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Values written by the reactive task and read by consumers.
struct Published {
    ui_state: watch::Sender<UiState>,
    offline: watch::Sender<bool>,
    notice: watch::Sender<bool>,
    fetches: AtomicU64,
}

impl Published {
    /// Push the machine's state to subscribers. Receivers only wake when a
    /// value actually differs.
    fn publish(&self, machine: &ListMachine) {
        let ui = machine.ui();
        self.ui_state.send_if_modified(|current| {
            if current == ui {
                return false;
            }
            *current = ui.clone();
            true
        });
        let offline = machine.is_offline();
        self.offline.send_if_modified(|current| {
            let changed = *current != offline;
            *current = offline;
            changed
        });
    }
}

impl Controller {
    /// Create a controller. Does NOT subscribe or fetch -- call
    /// [`start()`](Self::start).
    pub fn new(
        config: ControllerConfig,
        source: Arc<dyn AirlineSource>,
        monitor: Arc<dyn ConnectivityMonitor>,
    ) -> Self {
        let machine = ListMachine::new();
        let (ui_state, _) = watch::channel(machine.ui().clone());
        let (offline, _) = watch::channel(machine.is_offline());
        let (notice, _) = watch::channel(false);
        let (query, _) = watch::channel(String::new());

        Self {
            inner: Arc::new(ControllerInner {
                config,
                source,
                monitor,
                shared: Arc::new(Published {
                    ui_state,
                    offline,
                    notice,
                    fetches: AtomicU64::new(0),
                }),
                query,
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Subscribe to connectivity and spawn the reactive task.
    ///
    /// The subscription is taken synchronously, so statuses reported after
    /// this returns are never missed. Must be called inside a Tokio runtime.
    pub fn start(&self) -> Result<(), CoreError> {
        let mut task = self
            .inner
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if task.is_some() || self.inner.cancel.is_cancelled() {
            return Err(CoreError::AlreadyStarted);
        }

        let statuses = self.inner.monitor.observe();
        info!(
            source = %self.inner.source.describe(),
            settle = ?self.inner.config.settle_delay,
            "starting airline list controller"
        );

        *task = Some(tokio::spawn(reactive_loop(
            Arc::clone(&self.inner.shared),
            Arc::clone(&self.inner.source),
            self.inner.config.settle_delay,
            statuses,
            self.inner.cancel.clone(),
        )));
        Ok(())
    }

    /// Whether the reactive task is still running.
    pub fn is_running(&self) -> bool {
        self.inner
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the reactive task and wait for it to release its subscription.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let handle = self
            .inner
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "controller task ended abnormally");
            }
        }
        debug!("airline list controller stopped");
    }

    // ── Observable state ─────────────────────────────────────────

    /// Current UI state snapshot.
    pub fn ui_state(&self) -> UiState {
        self.inner.shared.ui_state.borrow().clone()
    }

    pub fn subscribe_ui(&self) -> StateStream<UiState> {
        StateStream::new(self.inner.shared.ui_state.subscribe())
    }

    /// True iff the most recent connectivity status was not `Available`.
    pub fn is_offline(&self) -> bool {
        *self.inner.shared.offline.borrow()
    }

    pub fn subscribe_offline(&self) -> StateStream<bool> {
        StateStream::new(self.inner.shared.offline.subscribe())
    }

    /// Whether the offline notice is pending. Raised on every online to
    /// offline transition until dismissed.
    pub fn offline_notice(&self) -> bool {
        *self.inner.shared.notice.borrow()
    }

    pub fn subscribe_notice(&self) -> StateStream<bool> {
        StateStream::new(self.inner.shared.notice.subscribe())
    }

    pub fn dismiss_notice(&self) {
        self.inner.shared.notice.send_replace(false);
    }

    /// Number of source calls made so far. Counted when the settle delay
    /// elapses, so a sequence superseded while settling is not counted.
    pub fn fetch_count(&self) -> u64 {
        self.inner.shared.fetches.load(Ordering::Relaxed)
    }

    // ── Search & detail ──────────────────────────────────────────

    /// Set the search query used by [`visible()`](Self::visible).
    pub fn search(&self, query: impl Into<String>) {
        self.inner.query.send_replace(query.into());
    }

    pub fn query(&self) -> String {
        self.inner.query.borrow().clone()
    }

    pub fn subscribe_query(&self) -> StateStream<String> {
        StateStream::new(self.inner.query.subscribe())
    }

    /// The list view for the current state and query.
    pub fn visible(&self) -> ListView {
        let ui = self.ui_state();
        project(&ui, self.is_offline(), &self.inner.query.borrow())
    }

    /// Detail lookup in the currently loaded list.
    pub fn find(&self, id: &str) -> Option<Airline> {
        let ui = self.ui_state();
        let items = ui.items()?;
        find_by_id(items, id).ok().cloned()
    }
}

// ── Reactive loop ────────────────────────────────────────────────

/// Drive the machine from connectivity statuses until cancelled or the
/// status stream ends. The stream is dropped on every exit path, which
/// releases the monitor registration.
async fn reactive_loop(
    shared: Arc<Published>,
    source: Arc<dyn AirlineSource>,
    settle_delay: Duration,
    mut statuses: StatusStream,
    cancel: CancellationToken,
) {
    let mut machine = ListMachine::new();
    let mut in_flight: Option<FetchFuture> = None;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            next = statuses.next() => {
                let Some(status) = next else {
                    debug!("connectivity stream ended");
                    break;
                };

                // A new status supersedes whatever fetch is running.
                if in_flight.take().is_some() {
                    debug!(%status, "superseding in-flight fetch");
                }

                let transition = machine.on_status(status);
                shared.publish(&machine);

                match transition {
                    Transition::Offline { edge } => {
                        if edge {
                            info!(%status, "connectivity lost");
                            shared.notice.send_replace(true);
                        }
                    }
                    Transition::Fetch { generation } => {
                        debug!(%status, generation, "online without data, fetching");
                        in_flight = Some(Box::pin(fetch_sequence(
                            Arc::clone(&shared),
                            Arc::clone(&source),
                            settle_delay,
                            generation,
                        )));
                    }
                    Transition::Idle => debug!(%status, "online with data, nothing to do"),
                }
            }
            (generation, result) = poll_in_flight(&mut in_flight) => {
                in_flight = None;
                if let Err(ref e) = result {
                    warn!(error = %e, generation, "airline fetch failed");
                }
                if machine.on_fetch_result(generation, result) {
                    shared.publish(&machine);
                } else {
                    debug!(generation, "discarding stale fetch result");
                }
            }
        }
    }

    drop(statuses);
    debug!("reactive loop exited, connectivity subscription released");
}

/// Settle, then fetch. Dropping the future cancels it at either await.
async fn fetch_sequence(
    shared: Arc<Published>,
    source: Arc<dyn AirlineSource>,
    settle_delay: Duration,
    generation: u64,
) -> FetchOutcome {
    if !settle_delay.is_zero() {
        tokio::time::sleep(settle_delay).await;
    }
    shared.fetches.fetch_add(1, Ordering::Relaxed);
    debug!(generation, source = %source.describe(), "fetching airlines");
    (generation, source.fetch().await)
}

async fn poll_in_flight(slot: &mut Option<FetchFuture>) -> FetchOutcome {
    match slot {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

// ── One-shot mode ────────────────────────────────────────────────

/// Fetch once without connectivity gating (single CLI invocations).
pub async fn fetch_once(source: &dyn AirlineSource) -> Result<Vec<Airline>, CoreError> {
    debug!(source = %source.describe(), "one-shot fetch");
    source.fetch().await.map_err(CoreError::from)
}
