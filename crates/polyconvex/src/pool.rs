//! Parallel verifier: fan out batches, merge signs under a lock, decide once.
//!
//! Model
//! - One scoped worker per `WorkBatch`. A worker classifies every triple of
//!   its batch into a local `Vec<bool>` without touching shared state, then
//!   takes the `SignCollection` lock once and appends the whole vector.
//! - The collection is created per call and owned by it. Workers only write;
//!   the post-join step is the single reader.
//! - Every handle is joined before anything is decided. A worker fault
//!   (panic, poisoned lock, refused spawn) still lets the running workers
//!   finish; the first failure in batch order is returned and `decide`
//!   never runs.

use crate::cfg::VerifyCfg;
use crate::decide::decide;
use crate::error::VerifyError;
use crate::geom::{triple, ExactSign, Point, TurnClassifier};
use crate::partition::{partition, WorkBatch};
use std::any::Any;
use std::sync::Mutex;
use std::thread;

/// Per-call multiset of sign flags written by the workers.
#[derive(Debug, Default)]
pub struct SignCollection {
    flags: Mutex<Vec<bool>>,
}

impl SignCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a worker's local flags in one critical section.
    pub fn merge(&self, local: Vec<bool>) -> Result<(), VerifyError> {
        let mut guard = self
            .flags
            .lock()
            .map_err(|_| VerifyError::PoisonedCollection)?;
        guard.extend(local);
        Ok(())
    }

    /// Consumes the collection after all writers have joined.
    pub fn into_flags(self) -> Result<Vec<bool>, VerifyError> {
        self.flags
            .into_inner()
            .map_err(|_| VerifyError::PoisonedCollection)
    }
}

/// Parallel convexity test with exact zero comparison.
pub fn is_convex_parallel(points: &[Point], workers: usize) -> Result<bool, VerifyError> {
    is_convex_parallel_with(points, workers, &ExactSign)
}

/// Parallel convexity test driven by a `VerifyCfg`.
pub fn is_convex_parallel_cfg(points: &[Point], cfg: &VerifyCfg) -> Result<bool, VerifyError> {
    is_convex_parallel_with(points, cfg.workers, &cfg.classifier())
}

/// Parallel convexity test with a caller-chosen classifier.
pub fn is_convex_parallel_with<C: TurnClassifier>(
    points: &[Point],
    workers: usize,
    classifier: &C,
) -> Result<bool, VerifyError> {
    let flags = collect_signs(points, workers, classifier)?;
    Ok(decide(&flags))
}

/// Runs the worker phase and returns the merged flags (in merge order).
pub fn collect_signs<C: TurnClassifier>(
    points: &[Point],
    workers: usize,
    classifier: &C,
) -> Result<Vec<bool>, VerifyError> {
    collect_signs_on(points, workers, classifier, |id| {
        thread::Builder::new().name(format!("polyconvex-w{id}"))
    })
}

/// Worker phase with a per-batch thread builder.
///
/// A builder that the OS refuses stops further spawning; the workers already
/// running are joined before the spawn failure is returned.
fn collect_signs_on<C, B>(
    points: &[Point],
    workers: usize,
    classifier: &C,
    builder: B,
) -> Result<Vec<bool>, VerifyError>
where
    C: TurnClassifier,
    B: Fn(usize) -> thread::Builder,
{
    let batches = partition(points.len(), workers)?;
    tracing::debug!(
        n = points.len(),
        requested = workers,
        effective = batches.len(),
        "parallel verify"
    );
    let signs = SignCollection::new();

    let first_failure = thread::scope(|s| {
        let mut handles = Vec::with_capacity(batches.len());
        let mut spawn_failure: Option<VerifyError> = None;
        for batch in &batches {
            let signs = &signs;
            let spawned = builder(batch.id)
                .spawn_scoped(s, move || run_batch(points, batch, classifier, signs));
            match spawned {
                Ok(handle) => handles.push((batch.id, handle)),
                Err(e) => {
                    tracing::warn!(batch = batch.id, error = %e, "worker spawn failed");
                    spawn_failure = Some(VerifyError::WorkerFailure {
                        batch: batch.id,
                        reason: e.to_string(),
                    });
                    break;
                }
            }
        }

        // Joined batches all precede the one that failed to spawn.
        let mut first: Option<VerifyError> = None;
        for (id, handle) in handles {
            let outcome = match handle.join() {
                Ok(res) => res,
                Err(payload) => Err(VerifyError::WorkerFailure {
                    batch: id,
                    reason: panic_message(payload.as_ref()),
                }),
            };
            if let Err(e) = outcome {
                tracing::warn!(batch = id, error = %e, "worker failed");
                first.get_or_insert(e);
            }
        }
        first.or(spawn_failure)
    });

    if let Some(e) = first_failure {
        return Err(e);
    }
    signs.into_flags()
}

fn run_batch<C: TurnClassifier>(
    points: &[Point],
    batch: &WorkBatch,
    classifier: &C,
    signs: &SignCollection,
) -> Result<(), VerifyError> {
    let local: Vec<bool> = batch
        .range
        .clone()
        .filter_map(|i| {
            let [p1, p2, p3] = triple(points, i);
            classifier.classify(p1, p2, p3)
        })
        .collect();
    tracing::trace!(batch = batch.id, flags = local.len(), "merge");
    signs.merge(local)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
