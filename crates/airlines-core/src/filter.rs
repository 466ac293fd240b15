// ── Search and list projection ──
//
// Pure functions over a fetched list; nothing here mutates the source.

use serde::Serialize;

use airlines_api::Airline;

use crate::error::CoreError;
use crate::state::UiState;

/// Items whose name or country contains `query`, ignoring case.
///
/// An empty query keeps every item. Order is preserved.
pub fn filter<'a>(items: &'a [Airline], query: &str) -> Vec<&'a Airline> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&needle) || a.country.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Look up one airline by id. Exact matches win over case-insensitive ones.
pub fn find_by_id<'a>(items: &'a [Airline], id: &str) -> Result<&'a Airline, CoreError> {
    items
        .iter()
        .find(|a| a.id == id)
        .or_else(|| items.iter().find(|a| a.id.eq_ignore_ascii_case(id)))
        .ok_or_else(|| CoreError::AirlineNotFound { id: id.into() })
}

/// What the list screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum ListView {
    /// Offline blocks data display regardless of the UI state.
    Offline,
    Loading,
    Error(String),
    /// Data loaded but nothing matches the query.
    Empty,
    Items(Vec<Airline>),
}

impl ListView {
    /// Whether the view is the outcome of a finished fetch.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Empty | Self::Items(_))
    }
}

/// Project controller state plus the search query into a [`ListView`].
pub fn project(ui: &UiState, offline: bool, query: &str) -> ListView {
    if offline {
        return ListView::Offline;
    }
    match ui {
        UiState::Loading => ListView::Loading,
        UiState::Error(message) => ListView::Error(message.clone()),
        UiState::Success(items) => {
            let visible = filter(items, query);
            if visible.is_empty() {
                ListView::Empty
            } else {
                ListView::Items(visible.into_iter().cloned().collect())
            }
        }
    }
}
