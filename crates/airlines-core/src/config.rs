// ── Runtime controller configuration ──
//
// Built by the CLI from the loaded config file; core never reads files.

use std::time::Duration;

/// Delay between entering `Loading` and calling the source.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Tuning for a single [`Controller`](crate::Controller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Fixed pause before each fetch so rapid connectivity flaps don't
    /// flicker the list. Zero disables it.
    pub settle_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}
