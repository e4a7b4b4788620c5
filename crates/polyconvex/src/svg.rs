//! Minimal SVG rendering of a polygon and its verdict.
//!
//! The document keeps an equal aspect ratio (one uniform scale for both axes),
//! flips `y` so the polygon appears in math orientation, and carries a title
//! line "Polygon is CONVEX" (green) or "Polygon is CONCAVE" (red).

use crate::error::VerifyError;
use crate::geom::Point;
use std::fmt::Write;

/// Drawing options.
#[derive(Clone, Copy, Debug)]
pub struct RenderCfg {
    /// Side length of the square plot area in pixels.
    pub size: f64,
    /// Padding around the plot area in pixels.
    pub margin: f64,
    /// Vertex marker radius in pixels; `0` disables markers.
    pub marker_radius: f64,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            size: 600.0,
            margin: 40.0,
            marker_radius: 3.0,
        }
    }
}

/// Title text for a verdict.
pub fn verdict_title(convex: bool) -> &'static str {
    if convex {
        "Polygon is CONVEX"
    } else {
        "Polygon is CONCAVE"
    }
}

/// Render `points` (closed) with the verdict as an SVG document.
pub fn render_svg(points: &[Point], convex: bool, cfg: RenderCfg) -> Result<String, VerifyError> {
    if points.is_empty() {
        return Err(VerifyError::EmptyPolygon);
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let span = (max_x - min_x).max(max_y - min_y);
    let scale = if span > 0.0 && span.is_finite() {
        cfg.size / span
    } else {
        1.0
    };
    let to_px = |p: &Point| {
        (
            cfg.margin + (p.x - min_x) * scale,
            cfg.margin + cfg.size - (p.y - min_y) * scale,
        )
    };

    let width = cfg.size + 2.0 * cfg.margin;
    let height = width + cfg.margin;
    let color = if convex { "green" } else { "red" };
    let mut path = String::new();
    for (k, p) in points.iter().enumerate() {
        let (x, y) = to_px(p);
        let cmd = if k == 0 { 'M' } else { 'L' };
        let _ = write!(path, "{cmd}{x:.3},{y:.3} ");
    }
    path.push('Z');

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" font-size="20" text-anchor="middle" fill="{color}">{}</text>"#,
        width / 2.0,
        cfg.margin * 0.6,
        verdict_title(convex)
    );
    let _ = writeln!(
        svg,
        r#"  <path d="{path}" fill="skyblue" fill-opacity="0.4" stroke="blue" stroke-width="1.5"/>"#
    );
    if cfg.marker_radius > 0.0 {
        for p in points {
            let (x, y) = to_px(p);
            let _ = writeln!(
                svg,
                r#"  <circle cx="{x:.3}" cy="{y:.3}" r="{:.1}" fill="blue"/>"#,
                cfg.marker_radius
            );
        }
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn renders_title_and_markers() {
        let pts = [vector![0.0, 0.0], vector![2.0, 0.0], vector![2.0, 2.0]];
        let svg = render_svg(&pts, true, RenderCfg::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Polygon is CONVEX"));
        assert!(svg.contains(r#"fill="green""#));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains('Z'));

        let concave = render_svg(&pts, false, RenderCfg::default()).unwrap();
        assert!(concave.contains("Polygon is CONCAVE"));
    }

    #[test]
    fn uniform_scale_and_flipped_y() {
        let pts = [vector![0.0, 0.0], vector![10.0, 0.0], vector![10.0, 5.0]];
        let cfg = RenderCfg {
            size: 100.0,
            margin: 0.0,
            marker_radius: 0.0,
        };
        let svg = render_svg(&pts, true, cfg).unwrap();
        assert!(svg.contains("M0.000,100.000 L100.000,100.000 L100.000,50.000 Z"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(
            render_svg(&[], true, RenderCfg::default()),
            Err(VerifyError::EmptyPolygon)
        );
    }
}
