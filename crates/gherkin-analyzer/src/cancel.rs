//! Cooperative cancellation.
//!
//! A [`CancellationToken`] is created by the caller of a query and passed
//! down the call chain explicitly; the resolver polls it between candidate
//! comparisons. Cancellation is the only abort path; there is no timeout.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use thiserror::Error;

/// Resolution was aborted on request. Not an error condition to report:
/// the caller discards the query and re-issues it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("resolution was cancelled")]
pub struct Cancelled;

/// Cloneable cancellation flag shared between a query and its initiator.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Observed at the next poll point.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Poll point: fails once `cancel` has been requested.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }
        Ok(())
    }
}
