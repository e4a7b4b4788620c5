//! Text report over sweep results.
//!
//! Per row: timings, speedup, parallel efficiency and a status band. The
//! summary adds mean/max/min speedup, the best row and the crossover size
//! (smallest polygon where some worker count beats serial).

use crate::sweep::SweepRow;
use std::fmt;
use std::fmt::Write;

/// Aggregate speedup statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub mean_speedup: f64,
    pub max_speedup: f64,
    pub min_speedup: f64,
    pub best_points: usize,
    pub best_workers: usize,
    /// Smallest point count with a speedup above 1, if any.
    pub crossover_points: Option<usize>,
}

/// Coarse verdict on one speedup value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    MuchSlower,
    Slower,
    Even,
    Faster,
    MuchFaster,
}

impl Status {
    pub fn of(speedup: f64) -> Self {
        if speedup < 0.8 {
            Status::MuchSlower
        } else if speedup < 0.95 {
            Status::Slower
        } else if speedup < 1.05 {
            Status::Even
        } else if speedup < 1.2 {
            Status::Faster
        } else {
            Status::MuchFaster
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::MuchSlower => "much slower",
            Status::Slower => "slower",
            Status::Even => "even",
            Status::Faster => "faster",
            Status::MuchFaster => "much faster",
        };
        f.pad(s)
    }
}

pub fn summarize(rows: &[SweepRow]) -> Option<Summary> {
    let best = rows
        .iter()
        .max_by(|a, b| a.speedup.total_cmp(&b.speedup))?;
    let mean = rows.iter().map(|r| r.speedup).sum::<f64>() / rows.len() as f64;
    let max = rows.iter().map(|r| r.speedup).fold(f64::NEG_INFINITY, f64::max);
    let min = rows.iter().map(|r| r.speedup).fold(f64::INFINITY, f64::min);
    let crossover = rows
        .iter()
        .filter(|r| r.speedup > 1.0)
        .map(|r| r.points)
        .min();
    Some(Summary {
        mean_speedup: mean,
        max_speedup: max,
        min_speedup: min,
        best_points: best.points,
        best_workers: best.workers,
        crossover_points: crossover,
    })
}

/// `(serial - parallel) / serial` in percent; 0 when serial is 0.
pub fn improvement_pct(row: &SweepRow) -> f64 {
    if row.serial_s > 0.0 {
        (row.serial_s - row.parallel_s) / row.serial_s * 100.0
    } else {
        0.0
    }
}

pub fn render(rows: &[SweepRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<8} {:<12} {:<12} {:<10} {:<10} {:<10} {:<12}",
        "points",
        "workers",
        "serial (s)",
        "parallel (s)",
        "speedup",
        "diff (%)",
        "eff (%)",
        "status"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));
    for r in rows {
        let _ = writeln!(
            out,
            "{:<12} {:<8} {:<12.6} {:<12.6} {:<10.2} {:<10.1} {:<10.1} {:<12}",
            r.points,
            r.workers,
            r.serial_s,
            r.parallel_s,
            r.speedup,
            improvement_pct(r),
            r.efficiency * 100.0,
            Status::of(r.speedup)
        );
    }
    if let Some(s) = summarize(rows) {
        let _ = writeln!(out);
        let _ = writeln!(out, "mean speedup: {:.2}x", s.mean_speedup);
        let _ = writeln!(out, "max speedup:  {:.2}x", s.max_speedup);
        let _ = writeln!(out, "min speedup:  {:.2}x", s.min_speedup);
        let _ = writeln!(
            out,
            "best: {} points, {} workers ({:.2}x)",
            s.best_points, s.best_workers, s.max_speedup
        );
        match s.crossover_points {
            Some(n) => {
                let _ = writeln!(out, "crossover: parallel wins from {n} points");
            }
            None => {
                let _ = writeln!(out, "crossover: none, serial wins at every size");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<SweepRow> {
        vec![
            SweepRow::new(1000, 2, 1.0, 1.0, true, true),
            SweepRow::new(1000, 4, 1.0, 0.25, true, true),
            SweepRow::new(5000, 4, 2.0, 1.0, true, true),
        ]
    }

    #[test]
    fn summary_stats() {
        let s = summarize(&rows()).unwrap();
        assert!((s.mean_speedup - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.max_speedup, 4.0);
        assert_eq!(s.min_speedup, 1.0);
        assert_eq!((s.best_points, s.best_workers), (1000, 4));
        assert_eq!(s.crossover_points, Some(1000));
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn crossover_is_smallest_size_beating_serial() {
        let rows = vec![
            SweepRow::new(100, 4, 1.0, 2.0, true, true),
            SweepRow::new(1000, 4, 1.0, 1.0, true, true),
            SweepRow::new(50_000, 4, 3.0, 1.0, true, true),
            SweepRow::new(10_000, 2, 1.1, 1.0, true, true),
        ];
        assert_eq!(summarize(&rows).unwrap().crossover_points, Some(10_000));
        // Exactly 1.0 does not count as a win.
        assert_eq!(summarize(&rows[..2]).unwrap().crossover_points, None);
    }

    #[test]
    fn status_bands() {
        assert_eq!(Status::of(0.5), Status::MuchSlower);
        assert_eq!(Status::of(0.8), Status::Slower);
        assert_eq!(Status::of(0.95), Status::Even);
        assert_eq!(Status::of(1.05), Status::Faster);
        assert_eq!(Status::of(1.2), Status::MuchFaster);
        assert_eq!(Status::MuchSlower.to_string(), "much slower");
    }

    #[test]
    fn improvement_handles_zero_serial() {
        assert_eq!(improvement_pct(&rows()[1]), 75.0);
        let zero = SweepRow::new(10, 1, 0.0, 0.0, true, true);
        assert_eq!(improvement_pct(&zero), 0.0);
    }

    #[test]
    fn rendered_table_lists_rows_and_best() {
        let text = render(&rows());
        assert_eq!(text.lines().filter(|l| l.starts_with("1000")).count(), 2);
        assert!(text.contains("best: 1000 points, 4 workers (4.00x)"));
        assert!(text.contains("crossover: parallel wins from 1000 points"));
        // 4x on 4 workers is full efficiency.
        let row = text.lines().find(|l| l.contains("0.250000")).unwrap();
        assert!(row.contains("100.0") && row.contains("much faster"));
        assert!(text.lines().nth(2).unwrap().contains("even"));
    }

    #[test]
    fn slow_sweep_reports_no_crossover() {
        let rows = vec![SweepRow::new(1000, 8, 1.0, 2.0, true, true)];
        let text = render(&rows);
        assert!(text.contains("crossover: none"));
        assert!(text.contains("much slower"));
        assert!(text.contains("6.2") || text.contains("6.3"));
    }
}
