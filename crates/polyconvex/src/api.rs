//! Flat re-export surface for the CLI, benches and other callers.

pub use crate::cfg::{default_workers, Classifier, VerifyCfg};
pub use crate::decide::decide;
pub use crate::error::VerifyError;
pub use crate::geom::{cross_product_sign, triple, ExactSign, Point, ToleranceSign, TurnClassifier};
pub use crate::partition::{effective_workers, partition, WorkBatch};
pub use crate::pool::{
    collect_signs, is_convex_parallel, is_convex_parallel_cfg, is_convex_parallel_with,
    SignCollection,
};
pub use crate::shapes::{
    draw_polygon, GeneratorError, PolygonGenerator, PolygonSample, ReplayToken, Shape,
    ShapeStream,
};
pub use crate::serial::{is_convex_serial, is_convex_serial_with};
pub use crate::svg::{render_svg, verdict_title, RenderCfg};
pub use crate::verify_serial;
