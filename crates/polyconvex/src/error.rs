//! Error taxonomy for verification calls.

use thiserror::Error;

/// Failure of a single verification call. No partial verdict accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The polygon has no points; rejected before any work is scheduled.
    #[error("invalid input: polygon has no points")]
    EmptyPolygon,

    /// A worker count of zero was requested.
    #[error("invalid input: worker count must be at least 1")]
    ZeroWorkers,

    /// A worker task faulted during compute or merge.
    #[error("worker for batch {batch} failed: {reason}")]
    WorkerFailure { batch: usize, reason: String },

    /// The sign collection lock was poisoned by a faulting worker.
    #[error("sign collection poisoned by a failed worker")]
    PoisonedCollection,
}

impl VerifyError {
    /// Precondition violations detected before any task is spawned.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyPolygon | Self::ZeroWorkers)
    }
}
