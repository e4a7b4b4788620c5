//! Splits the triple-index space `[0, n)` into contiguous worker batches.
//!
//! Model
//! - Effective workers `w = min(W, max(1, n))`; never more batches than
//!   triples, never zero batches.
//! - With `base = n / w` and `rem = n % w`, the first `rem` batches hold
//!   `base + 1` indices and the rest hold `base`.
//! - Batches are ascending and disjoint, and cover `[0, n)` exactly once.
//!   Index `i` still resolves to `triple(points, i)`, so a batch that ends
//!   at `n - 1` wraps onto points `0` and `1` like any interior index.

use crate::error::VerifyError;
use std::ops::Range;

/// Contiguous half-open range of triple indices owned by one worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkBatch {
    /// Position of the batch in ascending order (also the worker id).
    pub id: usize,
    pub range: Range<usize>,
}

impl WorkBatch {
    #[inline]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Effective worker count after clamping to the number of triples.
#[inline]
pub fn effective_workers(n: usize, requested: usize) -> usize {
    requested.min(n.max(1))
}

/// Balanced, gap-free batches for `n` triples and `workers` requested workers.
pub fn partition(n: usize, workers: usize) -> Result<Vec<WorkBatch>, VerifyError> {
    if n == 0 {
        return Err(VerifyError::EmptyPolygon);
    }
    if workers == 0 {
        return Err(VerifyError::ZeroWorkers);
    }
    let w = effective_workers(n, workers);
    let base = n / w;
    let rem = n % w;
    let mut start = 0;
    let batches = (0..w)
        .map(|id| {
            let len = base + usize::from(id < rem);
            let range = start..start + len;
            start += len;
            WorkBatch { id, range }
        })
        .collect();
    Ok(batches)
}
