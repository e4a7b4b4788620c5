//! Polygon producers for benchmarks and demos (reproducible via replay tokens).
//!
//! Shapes
//! - `Regular`: equally spaced points on a circle. Convex for n ≥ 3.
//! - `Radial`: sorted uniform angles with jittered radius. Star-shaped and
//!   almost always concave.
//! - `Spiky`: equally spaced angles, radius cycling through a long, a mid and
//!   a short spoke (`i mod 4`). Concave for n ≥ 8.
//! - `Zigzag`: deterministic two-radius star (`15` on every fourth point,
//!   `8` elsewhere). Cheap to build for very large n.
//!
//! Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//! so any sample of a stream can be regenerated on its own.

use crate::geom::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use thiserror::Error;

/// Error type shared by all producers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    #[error("invalid generator params: {reason}")]
    InvalidParams { reason: String },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

/// Polygon family to draw from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Regular { radius: f64 },
    Radial { radius: f64, jitter: f64 },
    Spiky,
    Zigzag,
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Radial {
            radius: 10.0,
            jitter: 2.0,
        }
    }
}

impl Shape {
    fn validate(&self) -> Result<(), GeneratorError> {
        match *self {
            Shape::Regular { radius } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(GeneratorError::invalid("radius must be finite and > 0"));
                }
            }
            Shape::Radial { radius, jitter } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(GeneratorError::invalid("radius must be finite and > 0"));
                }
                if !(jitter.is_finite() && jitter >= 0.0) {
                    return Err(GeneratorError::invalid("jitter must be finite and >= 0"));
                }
            }
            Shape::Spiky | Shape::Zigzag => {}
        }
        Ok(())
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one polygon with `n` points.
pub fn draw_polygon(shape: Shape, n: usize, tok: ReplayToken) -> Result<Vec<Point>, GeneratorError> {
    if n < 3 {
        return Err(GeneratorError::invalid("need at least 3 points"));
    }
    shape.validate()?;
    let mut rng = tok.to_std_rng();
    let step = TAU / (n as f64);
    let polar = |theta: f64, r: f64| Point::new(r * theta.cos(), r * theta.sin());
    let pts: Vec<Point> = match shape {
        Shape::Regular { radius } => (0..n).map(|i| polar(i as f64 * step, radius)).collect(),
        Shape::Radial { radius, jitter } => {
            let mut angles: Vec<f64> = (0..n).map(|_| rng.gen::<f64>() * TAU).collect();
            angles.sort_by(|a, b| a.total_cmp(b));
            angles
                .into_iter()
                .map(|th| {
                    let u = (rng.gen::<f64>() * 2.0 - 1.0) * jitter;
                    polar(th, radius + u)
                })
                .collect()
        }
        Shape::Spiky => (0..n)
            .map(|i| {
                let (base, amp) = match i % 4 {
                    0 => (15.0, 2.0),
                    2 => (8.0, 1.0),
                    _ => (12.0, 1.5),
                };
                let r = base + (rng.gen::<f64>() * 2.0 - 1.0) * amp;
                polar(i as f64 * step, r)
            })
            .collect(),
        Shape::Zigzag => (0..n)
            .map(|i| {
                let r = if i % 4 == 0 { 15.0 } else { 8.0 };
                polar(i as f64 * step, r)
            })
            .collect(),
    };
    Ok(pts)
}

/// A single polygon plus replay metadata.
#[derive(Clone, Debug)]
pub struct PolygonSample {
    pub points: Vec<Point>,
    pub replay: ReplayToken,
}

/// Common trait for reproducible polygon sources.
pub trait PolygonGenerator {
    fn generate_next(&mut self) -> Result<PolygonSample, GeneratorError>;

    fn regenerate(&self, replay: &ReplayToken) -> Result<Vec<Point>, GeneratorError>;
}

/// Stream of polygons of one shape and size; sample `k` uses index `k`.
#[derive(Clone, Debug)]
pub struct ShapeStream {
    shape: Shape,
    points: usize,
    seed: u64,
    next_index: u64,
}

impl ShapeStream {
    pub fn new(shape: Shape, points: usize, seed: u64) -> Result<Self, GeneratorError> {
        if points < 3 {
            return Err(GeneratorError::invalid("need at least 3 points"));
        }
        shape.validate()?;
        Ok(Self {
            shape,
            points,
            seed,
            next_index: 0,
        })
    }
}

impl PolygonGenerator for ShapeStream {
    fn generate_next(&mut self) -> Result<PolygonSample, GeneratorError> {
        let replay = ReplayToken {
            seed: self.seed,
            index: self.next_index,
        };
        self.next_index = self.next_index.wrapping_add(1);
        let points = self.regenerate(&replay)?;
        Ok(PolygonSample { points, replay })
    }

    fn regenerate(&self, replay: &ReplayToken) -> Result<Vec<Point>, GeneratorError> {
        draw_polygon(self.shape, self.points, *replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::is_convex_serial;

    const TOK: ReplayToken = ReplayToken { seed: 42, index: 7 };

    #[test]
    fn reproducible_draw() {
        let a = draw_polygon(Shape::default(), 64, TOK).unwrap();
        let b = draw_polygon(Shape::default(), 64, TOK).unwrap();
        assert_eq!(a, b);
        let c = draw_polygon(Shape::default(), 64, ReplayToken { index: 8, ..TOK }).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn regular_is_convex_and_spiky_is_not() {
        let reg = draw_polygon(Shape::Regular { radius: 1.0 }, 50, TOK).unwrap();
        assert_eq!(is_convex_serial(&reg), Ok(true));
        let spiky = draw_polygon(Shape::Spiky, 40, TOK).unwrap();
        assert_eq!(is_convex_serial(&spiky), Ok(false));
        let zig = draw_polygon(Shape::Zigzag, 16, TOK).unwrap();
        assert_eq!(is_convex_serial(&zig), Ok(false));
    }

    #[test]
    fn rejects_bad_params() {
        assert!(draw_polygon(Shape::Zigzag, 2, TOK).is_err());
        assert!(draw_polygon(Shape::Regular { radius: -1.0 }, 8, TOK).is_err());
        assert!(ShapeStream::new(
            Shape::Radial {
                radius: 1.0,
                jitter: f64::NAN
            },
            8,
            1
        )
        .is_err());
    }

    #[test]
    fn stream_regenerates_samples() {
        let mut gen = ShapeStream::new(Shape::Spiky, 32, 2025).unwrap();
        let s0 = gen.generate_next().unwrap();
        let s1 = gen.generate_next().unwrap();
        assert_eq!(s1.replay.index, 1);
        assert_eq!(gen.regenerate(&s0.replay).unwrap(), s0.points);
        assert_ne!(s0.points, s1.points);
    }
}
