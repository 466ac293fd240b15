// ── List state machine ──
//
// Synchronous heart of the controller. Owns the UI state, the offline flag,
// and the fetch gate; every connectivity transition bumps a generation so
// results from superseded fetches can be recognised and dropped.

use std::sync::Arc;

use serde::Serialize;

use airlines_api::Airline;

use crate::connectivity::ConnectivityStatus;
use crate::error::CoreError;

/// Message shown while offline.
pub const OFFLINE_MESSAGE: &str = "No internet connection";

/// What the list screen is showing. Replaced wholesale on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum UiState {
    Loading,
    Success(Arc<[Airline]>),
    Error(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Items of a `Success` state.
    pub fn items(&self) -> Option<&[Airline]> {
        match self {
            Self::Success(items) => Some(items.as_ref()),
            _ => None,
        }
    }

    /// Message of an `Error` state.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Outcome of feeding a connectivity status to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Offline observed. `edge` is true when this status took the machine
    /// from online to offline.
    Offline { edge: bool },
    /// Online and nothing fetched yet: a fetch sequence tagged with
    /// `generation` should start.
    Fetch { generation: u64 },
    /// Online with data already fetched; state retained.
    Idle,
}

/// Connectivity-gated fetch state.
#[derive(Debug, Clone)]
pub struct ListMachine {
    ui: UiState,
    offline: bool,
    has_fetched: bool,
    generation: u64,
}

impl Default for ListMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ListMachine {
    pub fn new() -> Self {
        Self {
            ui: UiState::Loading,
            offline: false,
            has_fetched: false,
            generation: 0,
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn has_fetched(&self) -> bool {
        self.has_fetched
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one connectivity status.
    pub fn on_status(&mut self, status: ConnectivityStatus) -> Transition {
        self.generation += 1;

        let offline = status.is_offline();
        let edge = offline && !self.offline;
        self.offline = offline;

        if offline {
            self.ui = UiState::Error(CoreError::Offline.to_string());
            self.has_fetched = false;
            return Transition::Offline { edge };
        }

        if self.has_fetched {
            Transition::Idle
        } else {
            self.ui = UiState::Loading;
            Transition::Fetch {
                generation: self.generation,
            }
        }
    }

    /// Apply the result of the fetch sequence started for `generation`.
    ///
    /// Returns `false` (and changes nothing) when a later status has
    /// superseded that sequence.
    pub fn on_fetch_result(
        &mut self,
        generation: u64,
        result: Result<Vec<Airline>, airlines_api::Error>,
    ) -> bool {
        if generation != self.generation || self.offline {
            return false;
        }

        match result {
            Ok(items) => {
                self.ui = UiState::Success(items.into());
                self.has_fetched = true;
            }
            Err(err) => {
                self.ui = UiState::Error(err.to_string());
                self.has_fetched = false;
            }
        }
        true
    }
}
