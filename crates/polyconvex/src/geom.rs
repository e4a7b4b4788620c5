//! Turn primitive for closed polygons.
//!
//! - `cross_product_sign`: signed cross product of the two edge vectors
//!   meeting at the middle point of a vertex triple.
//! - `triple`: resolves triple `i` of a closed boundary, wrapping at the seam.
//! - `TurnClassifier`: maps a triple to an optional sign flag. `None` marks a
//!   collinear (degenerate) triple that contributes no flag at all.
//!
//! References
//! - Code cross-refs: `decide::decide`, `serial::is_convex_serial`,
//!   `pool::is_convex_parallel`

use nalgebra::Vector2;

/// A polygon vertex `(x, y)`.
pub type Point = Vector2<f64>;

/// Signed cross product `(p2 - p1) × (p3 - p2)`.
///
/// Positive for a left (counterclockwise) turn at `p2`, negative for a right
/// turn, zero when the three points are collinear.
#[inline]
pub fn cross_product_sign(p1: Point, p2: Point, p3: Point) -> f64 {
    (p2.x - p1.x) * (p3.y - p2.y) - (p2.y - p1.y) * (p3.x - p2.x)
}

/// Triple `i` of the closed boundary: `(p[i], p[(i+1) % n], p[(i+2) % n])`.
///
/// Pre: `points` is non-empty and `i < points.len()`.
#[inline]
pub fn triple(points: &[Point], i: usize) -> [Point; 3] {
    let n = points.len();
    [points[i], points[(i + 1) % n], points[(i + 2) % n]]
}

/// Derives the sign flag of a vertex triple.
///
/// Implementations must be pure: the serial and parallel verifiers call
/// `classify` on arbitrary threads and in arbitrary order.
pub trait TurnClassifier: Sync {
    /// `Some(true)` for a positive turn, `Some(false)` for a negative one,
    /// `None` for a collinear triple.
    fn classify(&self, p1: Point, p2: Point, p3: Point) -> Option<bool>;
}

/// Exact zero comparison: only a scalar equal to `0.0` is collinear.
///
/// Non-finite scalars are recorded as negative turns.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactSign;

impl TurnClassifier for ExactSign {
    #[inline]
    fn classify(&self, p1: Point, p2: Point, p3: Point) -> Option<bool> {
        let c = cross_product_sign(p1, p2, p3);
        if c == 0.0 {
            None
        } else {
            Some(c > 0.0)
        }
    }
}

/// Opt-in tolerance: `|c| <= eps` counts as collinear.
///
/// Deviates from exact comparison for `eps > 0`; with `eps == 0.0` it agrees
/// with `ExactSign` on every input.
#[derive(Clone, Copy, Debug)]
pub struct ToleranceSign {
    pub eps: f64,
}

impl TurnClassifier for ToleranceSign {
    #[inline]
    fn classify(&self, p1: Point, p2: Point, p3: Point) -> Option<bool> {
        let c = cross_product_sign(p1, p2, p3);
        if c.abs() <= self.eps {
            None
        } else {
            Some(c > 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn cross_sign_left_right_collinear() {
        let o = vector![0.0, 0.0];
        let e = vector![1.0, 0.0];
        assert!(cross_product_sign(o, e, vector![1.0, 1.0]) > 0.0);
        assert!(cross_product_sign(o, e, vector![1.0, -1.0]) < 0.0);
        assert_eq!(cross_product_sign(o, e, vector![2.0, 0.0]), 0.0);
    }

    #[test]
    fn cross_matches_formula() {
        let (p1, p2, p3) = (vector![1.0, 1.0], vector![3.0, 1.0], vector![4.0, 3.0]);
        // (3-1)*(3-1) - (1-1)*(4-3) = 4
        assert_eq!(cross_product_sign(p1, p2, p3), 4.0);
    }

    #[test]
    fn triple_wraps_at_seam() {
        let pts = [vector![0.0, 0.0], vector![1.0, 0.0], vector![1.0, 1.0]];
        assert_eq!(triple(&pts, 1), [pts[1], pts[2], pts[0]]);
        assert_eq!(triple(&pts, 2), [pts[2], pts[0], pts[1]]);
        let single = [vector![5.0, 5.0]];
        assert_eq!(triple(&single, 0), [single[0]; 3]);
    }

    #[test]
    fn exact_and_tolerance_classifiers() {
        let o = vector![0.0, 0.0];
        let e = vector![1.0, 0.0];
        let nearly = vector![2.0, 1e-12];
        assert_eq!(ExactSign.classify(o, e, nearly), Some(true));
        assert_eq!(ToleranceSign { eps: 1e-9 }.classify(o, e, nearly), None);
        assert_eq!(ToleranceSign { eps: 0.0 }.classify(o, e, nearly), Some(true));
        assert_eq!(ExactSign.classify(o, e, vector![3.0, 0.0]), None);
    }

    #[test]
    fn nan_is_recorded_negative() {
        let o = vector![0.0, 0.0];
        let e = vector![1.0, 0.0];
        assert_eq!(ExactSign.classify(o, e, vector![f64::NAN, 1.0]), Some(false));
    }
}
