//! Benchmark sweep over polygon sizes and worker counts.
//!
//! One polygon is drawn per size and reused for every worker count. Each
//! cell times `repeats` serial and parallel runs and keeps the means. A
//! verdict mismatch between the two paths aborts the sweep.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use polyconvex::api::{
    is_convex_parallel, is_convex_serial, PolygonGenerator, PolygonSample, Shape, ShapeStream,
};
use std::fs::File;
use std::path::Path;
use std::time::Instant;

/// Sweep parameters.
#[derive(Clone, Debug)]
pub struct SweepCfg {
    pub sizes: Vec<usize>,
    pub threads: Vec<usize>,
    pub repeats: usize,
    pub shape: Shape,
    pub seed: u64,
}

/// One (size, workers) measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepRow {
    pub points: usize,
    pub workers: usize,
    pub serial_s: f64,
    pub parallel_s: f64,
    pub speedup: f64,
    pub efficiency: f64,
    pub serial_convex: bool,
    pub parallel_convex: bool,
}

impl SweepRow {
    pub fn new(
        points: usize,
        workers: usize,
        serial_s: f64,
        parallel_s: f64,
        serial_convex: bool,
        parallel_convex: bool,
    ) -> Self {
        let speedup = if parallel_s > 0.0 {
            serial_s / parallel_s
        } else {
            1.0
        };
        Self {
            points,
            workers,
            serial_s,
            parallel_s,
            speedup,
            efficiency: speedup / workers.max(1) as f64,
            serial_convex,
            parallel_convex,
        }
    }
}

pub fn run_sweep(cfg: &SweepCfg) -> Result<Vec<SweepRow>> {
    if cfg.repeats == 0 {
        bail!("repeats must be at least 1");
    }
    let mut rows = Vec::with_capacity(cfg.sizes.len() * cfg.threads.len());
    for &n in &cfg.sizes {
        let sample = draw_sample(cfg.shape, n, cfg.seed)?;
        tracing::debug!(
            points = n,
            seed = sample.replay.seed,
            index = sample.replay.index,
            "sweep polygon"
        );
        let poly = sample.points;
        let (serial_s, serial_convex) = timed(cfg.repeats, || is_convex_serial(&poly))?;
        for &w in &cfg.threads {
            let (parallel_s, parallel_convex) = timed(cfg.repeats, || is_convex_parallel(&poly, w))?;
            if serial_convex != parallel_convex {
                bail!("verdict mismatch at n={n}, workers={w}: serial={serial_convex}, parallel={parallel_convex}");
            }
            let row = SweepRow::new(n, w, serial_s, parallel_s, serial_convex, parallel_convex);
            tracing::info!(
                points = n,
                workers = w,
                serial_s,
                parallel_s,
                speedup = row.speedup,
                convex = serial_convex,
                "sweep_cell"
            );
            rows.push(row);
        }
    }
    Ok(rows)
}

/// First sample of the `(shape, n, seed)` stream; replayable from its token.
pub fn draw_sample(shape: Shape, n: usize, seed: u64) -> Result<PolygonSample> {
    let mut stream = ShapeStream::new(shape, n, seed)
        .with_context(|| format!("configuring {n}-point {shape:?} stream"))?;
    stream
        .generate_next()
        .with_context(|| format!("drawing {n}-point {shape:?}"))
}

/// Mean wall time over `repeats` calls and the (last) verdict.
fn timed<F, E>(repeats: usize, mut f: F) -> Result<(f64, bool)>
where
    F: FnMut() -> std::result::Result<bool, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut total = 0.0;
    let mut verdict = false;
    for _ in 0..repeats {
        let start = Instant::now();
        verdict = f()?;
        total += start.elapsed().as_secs_f64();
    }
    Ok((total / repeats as f64, verdict))
}

pub fn rows_to_frame(rows: &[SweepRow]) -> PolarsResult<DataFrame> {
    df!(
        "points" => rows.iter().map(|r| r.points as u64).collect::<Vec<_>>(),
        "workers" => rows.iter().map(|r| r.workers as u64).collect::<Vec<_>>(),
        "serial_s" => rows.iter().map(|r| r.serial_s).collect::<Vec<_>>(),
        "parallel_s" => rows.iter().map(|r| r.parallel_s).collect::<Vec<_>>(),
        "speedup" => rows.iter().map(|r| r.speedup).collect::<Vec<_>>(),
        "efficiency" => rows.iter().map(|r| r.efficiency).collect::<Vec<_>>(),
        "serial_convex" => rows.iter().map(|r| r.serial_convex).collect::<Vec<_>>(),
        "parallel_convex" => rows.iter().map(|r| r.parallel_convex).collect::<Vec<_>>(),
    )
}

pub fn write_csv<P: AsRef<Path>>(rows: &[SweepRow], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut df = rows_to_frame(rows)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SweepRow>> {
    let path = path.as_ref();
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    let points = usize_col(&df, "points")?;
    let workers = usize_col(&df, "workers")?;
    let serial_s = f64_col(&df, "serial_s")?;
    let parallel_s = f64_col(&df, "parallel_s")?;
    let serial_convex = bool_col(&df, "serial_convex")?;
    let parallel_convex = bool_col(&df, "parallel_convex")?;
    Ok((0..df.height())
        .map(|i| {
            SweepRow::new(
                points[i],
                workers[i],
                serial_s[i],
                parallel_s[i],
                serial_convex[i],
                parallel_convex[i],
            )
        })
        .collect())
}

fn f64_col(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let s = df.column(name)?.cast(&DataType::Float64)?;
    s.f64()?
        .into_iter()
        .map(|v| v.with_context(|| format!("null in column {name}")))
        .collect()
}

fn usize_col(df: &DataFrame, name: &str) -> Result<Vec<usize>> {
    let s = df.column(name)?.cast(&DataType::UInt64)?;
    s.u64()?
        .into_iter()
        .map(|v| {
            let v = v.with_context(|| format!("null in column {name}"))?;
            usize::try_from(v).with_context(|| format!("{name}={v} out of range"))
        })
        .collect()
}

fn bool_col(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    let s = df.column(name)?.cast(&DataType::Boolean)?;
    s.bool()?
        .into_iter()
        .map(|v| v.with_context(|| format!("null in column {name}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_cfg(shape: Shape) -> SweepCfg {
        SweepCfg {
            sizes: vec![50, 200],
            threads: vec![1, 2, 4],
            repeats: 2,
            shape,
            seed: 5,
        }
    }

    #[test]
    fn sweep_covers_grid_and_agrees() {
        let rows = run_sweep(&small_cfg(Shape::Spiky)).unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.serial_convex == r.parallel_convex));
        assert!(rows.iter().all(|r| !r.serial_convex));
        assert_eq!(rows[3].points, 200);
        assert_eq!(rows[3].workers, 1);

        let convex = run_sweep(&small_cfg(Shape::Regular { radius: 1.0 })).unwrap();
        assert!(convex.iter().all(|r| r.parallel_convex));
    }

    #[test]
    fn speedup_and_efficiency() {
        let r = SweepRow::new(10, 4, 2.0, 1.0, true, true);
        assert_eq!(r.speedup, 2.0);
        assert_eq!(r.efficiency, 0.5);
        let zero = SweepRow::new(10, 2, 1.0, 0.0, true, true);
        assert_eq!(zero.speedup, 1.0);
    }

    #[test]
    fn sweep_polygons_replay_from_their_token() {
        let sample = draw_sample(Shape::default(), 64, 11).unwrap();
        let stream = ShapeStream::new(Shape::default(), 64, 11).unwrap();
        assert_eq!(stream.regenerate(&sample.replay).unwrap(), sample.points);
        assert!(draw_sample(Shape::Spiky, 2, 11).is_err());
    }

    #[test]
    fn zero_repeats_rejected() {
        let mut cfg = small_cfg(Shape::Zigzag);
        cfg.repeats = 0;
        assert!(run_sweep(&cfg).is_err());
    }

    #[test]
    fn csv_file_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/sweep.csv");
        let rows = vec![
            SweepRow::new(1000, 2, 0.5, 0.25, false, false),
            SweepRow::new(2000, 8, 1.0, 0.5, true, true),
        ];
        write_csv(&rows, &path).unwrap();
        let back = read_csv(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].points, 2000);
        assert_eq!(back[1].workers, 8);
        assert!(back[1].parallel_convex);
        assert!((back[0].speedup - 2.0).abs() < 1e-12);
    }
}
