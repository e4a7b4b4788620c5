//! Parallel polygon-convexity verification.
//!
//! A closed polygon is convex (by this crate's rule) when all nonzero boundary
//! turns share one rotational sense, or when there are no nonzero turns.
//! `serial::is_convex_serial` is the reference; `pool::is_convex_parallel`
//! splits the turn tests across scoped workers and must agree with it for
//! every polygon and worker count.
//!
//! Layout
//! - `geom`: cross product, triple resolution, turn classifiers.
//! - `decide`: the shared convexity rule.
//! - `partition`: balanced worker batches over `[0, n)`.
//! - `pool`: fan-out, locked merge, join, decide.
//! - `shapes`, `svg`: polygon producers and rendering for the CLI and benches.

pub mod api;
pub mod cfg;
pub mod decide;
pub mod error;
pub mod geom;
pub mod partition;
pub mod pool;
pub mod shapes;
pub mod serial;
pub mod svg;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::VerifyCfg;
pub use error::VerifyError;
pub use geom::Point;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::VerifyCfg;
    pub use crate::error::VerifyError;
    pub use crate::geom::{cross_product_sign, ExactSign, Point, ToleranceSign, TurnClassifier};
    pub use crate::pool::{is_convex_parallel, is_convex_parallel_cfg};
    pub use crate::shapes::{draw_polygon, ReplayToken, Shape};
    pub use crate::serial::is_convex_serial;
}

/// Serial verdict under `cfg` (the worker count is ignored).
pub fn verify_serial(points: &[Point], cfg: &VerifyCfg) -> Result<bool, VerifyError> {
    serial::is_convex_serial_with(points, &cfg.classifier())
}
