//! Shared last-value cell for vendor-reported units.

use std::sync::{Arc, Mutex, PoisonError};

use crate::Units;

/// Holds the units value of the most recent successful exchange.
///
/// Cloning shares the same slot. Concurrent writers race benignly: the last
/// write wins. Callers that need the units of one specific call should read
/// them from that call's result instead of from the tracker.
#[derive(Debug, Clone, Default)]
pub struct UnitsTracker {
    slot: Arc<Mutex<Option<Units>>>,
}

impl UnitsTracker {
    /// Empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with `units`.
    pub fn record(&self, units: Units) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(units);
    }

    /// Overwrite the slot when `units` is present; otherwise leave it alone.
    pub fn record_opt(&self, units: Option<&Units>) {
        if let Some(u) = units {
            self.record(u.clone());
        }
    }

    /// Last recorded value.
    #[must_use]
    pub fn current(&self) -> Option<Units> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
