use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use polyconvex::api::{
    is_convex_parallel_cfg, render_svg, verify_serial, Point, RenderCfg, Shape, VerifyCfg,
};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod report;
mod sweep;

use provenance::{write_sidecar, Payload};
use sweep::SweepCfg;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Polygon convexity checks, sweeps and reports")]
struct Cmd {
    /// Optional run label; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Verify one polygon (serial and parallel) and print a JSON verdict
    Check {
        #[command(flatten)]
        source: Source,
        #[arg(long, default_value_t = polyconvex::api::default_workers())]
        workers: usize,
        /// Collinearity tolerance; 0 keeps exact comparison
        #[arg(long, default_value_t = 0.0)]
        eps: f64,
    },
    /// Time serial vs parallel across sizes and worker counts, write CSV
    Sweep {
        #[arg(long, value_delimiter = ',', default_value = "50000,100000,200000,500000,1000000")]
        sizes: Vec<usize>,
        #[arg(long, value_delimiter = ',', default_value = "1,2,4,8,16")]
        threads: Vec<usize>,
        #[arg(long, default_value_t = 2)]
        repeats: usize,
        #[arg(long, value_enum, default_value_t = ShapeArg::Spiky)]
        shape: ShapeArg,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: String,
    },
    /// Print a speedup table for a sweep CSV, or the provenance block
    Report {
        #[arg(long)]
        from: Option<String>,
    },
    /// Render a polygon with its verdict as SVG
    Render {
        #[command(flatten)]
        source: Source,
        #[arg(long, default_value_t = polyconvex::api::default_workers())]
        workers: usize,
        #[arg(long)]
        out: String,
    },
}

/// Where the polygon comes from: a JSON file of `[x, y]` pairs, or a generator.
#[derive(Args, Clone)]
struct Source {
    #[arg(long, conflicts_with = "shape")]
    input: Option<String>,
    #[arg(long, value_enum, default_value_t = ShapeArg::Radial)]
    shape: ShapeArg,
    #[arg(long, default_value_t = 100)]
    points: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeArg {
    Regular,
    Radial,
    Spiky,
    Zigzag,
}

impl From<ShapeArg> for Shape {
    fn from(s: ShapeArg) -> Self {
        match s {
            ShapeArg::Regular => Shape::Regular { radius: 10.0 },
            ShapeArg::Radial => Shape::default(),
            ShapeArg::Spiky => Shape::Spiky,
            ShapeArg::Zigzag => Shape::Zigzag,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Check {
            source,
            workers,
            eps,
        } => check(source, workers, eps, cmd.tag),
        Action::Sweep {
            sizes,
            threads,
            repeats,
            shape,
            seed,
            out,
        } => {
            let cfg = SweepCfg {
                sizes,
                threads,
                repeats,
                shape: shape.into(),
                seed,
            };
            run_sweep(cfg, out, cmd.tag)
        }
        Action::Report { from } => report(from, cmd.tag),
        Action::Render {
            source,
            workers,
            out,
        } => render(source, workers, out, cmd.tag),
    }
}

fn load_points(source: &Source) -> Result<Vec<Point>> {
    match &source.input {
        Some(path) => {
            let raw = std::fs::read(path).with_context(|| format!("reading {path}"))?;
            let pairs: Vec<[f64; 2]> =
                serde_json::from_slice(&raw).with_context(|| format!("parsing {path}"))?;
            Ok(pairs.into_iter().map(|[x, y]| Point::new(x, y)).collect())
        }
        None => Ok(sweep::draw_sample(source.shape.into(), source.points, source.seed)?.points),
    }
}

/// JSON verdict printed by `check`.
#[derive(Debug, Serialize)]
struct CheckOutput {
    points: usize,
    workers: usize,
    convex: bool,
    serial_convex: bool,
    elapsed_s: f64,
    tag: Option<String>,
}

fn check(source: Source, workers: usize, eps: f64, tag: Option<String>) -> Result<()> {
    let points = load_points(&source)?;
    let verdict = verify_points(&points, workers, eps, tag)?;
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

fn verify_points(
    points: &[Point],
    workers: usize,
    eps: f64,
    tag: Option<String>,
) -> Result<CheckOutput> {
    let cfg = VerifyCfg {
        workers,
        collinear_eps: eps,
    };
    tracing::info!(n = points.len(), workers, eps, tag = ?tag, "check");
    let serial = verify_serial(points, &cfg)?;
    let start = Instant::now();
    let convex = is_convex_parallel_cfg(points, &cfg)?;
    let elapsed = start.elapsed().as_secs_f64();
    Ok(CheckOutput {
        points: points.len(),
        workers,
        convex,
        serial_convex: serial,
        elapsed_s: elapsed,
        tag,
    })
}

fn run_sweep(cfg: SweepCfg, out: String, tag: Option<String>) -> Result<()> {
    tracing::info!(sizes = ?cfg.sizes, threads = ?cfg.threads, repeats = cfg.repeats, out, tag = ?tag, "sweep");
    let rows = sweep::run_sweep(&cfg)?;
    sweep::write_csv(&rows, &out)?;
    let payload = Payload::new(serde_json::json!({
        "sizes": cfg.sizes,
        "threads": cfg.threads,
        "repeats": cfg.repeats,
        "shape": format!("{:?}", cfg.shape),
        "seed": cfg.seed,
    }))
    .with_tag(tag);
    write_sidecar(&out, payload)?;
    print!("{}", report::render(&rows));
    Ok(())
}

fn report(from: Option<String>, tag: Option<String>) -> Result<()> {
    match from {
        Some(path) => {
            tracing::info!(from = path, "report");
            let rows = sweep::read_csv(&path)?;
            print!("{}", report::render(&rows));
        }
        None => println!("{}", serde_json::to_string_pretty(&provenance::summary(tag))?),
    }
    Ok(())
}

fn render(source: Source, workers: usize, out: String, tag: Option<String>) -> Result<()> {
    let points = load_points(&source)?;
    tracing::info!(n = points.len(), workers, out, "render");
    let convex = is_convex_parallel_cfg(&points, &VerifyCfg::with_workers(workers))?;
    let svg = render_svg(&points, convex, RenderCfg::default())?;
    let out_path = Path::new(&out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, svg).with_context(|| format!("writing {out}"))?;
    let payload = Payload::new(serde_json::json!({
        "input": source.input,
        "shape": format!("{:?}", source.shape),
        "points": points.len(),
        "seed": source.seed,
        "workers": workers,
        "convex": convex,
    }))
    .with_tag(tag);
    write_sidecar(out_path, payload)?;
    Ok(())
}
