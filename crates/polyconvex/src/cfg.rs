//! Verification configuration.
//!
//! Policy
//! - Exact zero comparison is the default. `collinear_eps > 0` is an opt-in
//!   deviation and changes verdicts on nearly collinear inputs.

use crate::geom::{ExactSign, Point, ToleranceSign, TurnClassifier};

/// Tunables for one verification call.
#[derive(Clone, Copy, Debug)]
pub struct VerifyCfg {
    /// Requested worker count (clamped to the polygon size by `partition`).
    pub workers: usize,
    /// Collinearity tolerance on `|cross|`. `0.0` means exact comparison.
    pub collinear_eps: f64,
}

impl Default for VerifyCfg {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            collinear_eps: 0.0,
        }
    }
}

impl VerifyCfg {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    /// The classifier selected by `collinear_eps`.
    pub fn classifier(&self) -> Classifier {
        if self.collinear_eps > 0.0 {
            Classifier::Tolerance(ToleranceSign {
                eps: self.collinear_eps,
            })
        } else {
            Classifier::Exact(ExactSign)
        }
    }
}

/// Classifier chosen from a `VerifyCfg`.
#[derive(Clone, Copy, Debug)]
pub enum Classifier {
    Exact(ExactSign),
    Tolerance(ToleranceSign),
}

impl TurnClassifier for Classifier {
    #[inline]
    fn classify(&self, p1: Point, p2: Point, p3: Point) -> Option<bool> {
        match self {
            Classifier::Exact(c) => c.classify(p1, p2, p3),
            Classifier::Tolerance(c) => c.classify(p1, p2, p3),
        }
    }
}

/// Available hardware parallelism, falling back to 4.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
