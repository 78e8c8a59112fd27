//! Single-slot mutual exclusion for user-driven operations.
//!
//! The ledger is owned by one logical actor, so the only discipline needed
//! is rejecting a second operation while one is still in flight. The guard
//! is an explicit Idle -> Busy -> Idle state machine; re-entrant calls get
//! [`CoreError::OperationInProgress`] rather than a silent no-op.

use crate::error::CoreError;

#[derive(Debug, Default)]
pub struct OpGuard {
    busy: bool,
}

impl OpGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions Idle -> Busy, rejecting when already busy.
    pub fn begin(&mut self) -> Result<(), CoreError> {
        if self.busy {
            return Err(CoreError::OperationInProgress);
        }
        self.busy = true;
        Ok(())
    }

    /// Transitions back to Idle. Safe to call from both success and failure
    /// paths; finishing an idle guard is a no-op.
    pub fn finish(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}
