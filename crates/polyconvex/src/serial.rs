//! Single-threaded reference verifier.
//!
//! This is the correctness oracle: `pool::is_convex_parallel` must return the
//! same verdict for every polygon and every worker count.

use crate::decide::decide;
use crate::error::VerifyError;
use crate::geom::{triple, ExactSign, Point, TurnClassifier};

/// Serial convexity test with exact zero comparison.
pub fn is_convex_serial(points: &[Point]) -> Result<bool, VerifyError> {
    is_convex_serial_with(points, &ExactSign)
}

/// Serial convexity test with a caller-chosen classifier.
pub fn is_convex_serial_with<C: TurnClassifier>(
    points: &[Point],
    classifier: &C,
) -> Result<bool, VerifyError> {
    if points.is_empty() {
        return Err(VerifyError::EmptyPolygon);
    }
    let flags: Vec<bool> = (0..points.len())
        .filter_map(|i| {
            let [p1, p2, p3] = triple(points, i);
            classifier.classify(p1, p2, p3)
        })
        .collect();
    Ok(decide(&flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ToleranceSign;
    use nalgebra::vector;

    #[test]
    fn convex_pentagon() {
        let pts = [
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![3.0, 1.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0],
        ];
        assert_eq!(is_convex_serial(&pts), Ok(true));
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(is_convex_serial(&[]), Err(VerifyError::EmptyPolygon));
    }

    #[test]
    fn tiny_polygons_are_vacuous() {
        assert_eq!(is_convex_serial(&[vector![1.0, 2.0]]), Ok(true));
        assert_eq!(
            is_convex_serial(&[vector![0.0, 0.0], vector![1.0, 1.0]]),
            Ok(true)
        );
    }

    #[test]
    fn tolerance_hides_small_dent() {
        // The dent at (1, 1e-12) is below the tolerance.
        let pts = [
            vector![0.0, 0.0],
            vector![1.0, 1e-12],
            vector![2.0, 0.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0],
        ];
        assert_eq!(is_convex_serial(&pts), Ok(false));
        assert_eq!(
            is_convex_serial_with(&pts, &ToleranceSign { eps: 1e-9 }),
            Ok(true)
        );
    }
}
