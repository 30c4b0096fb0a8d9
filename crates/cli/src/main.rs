use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use fortune::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser, Debug)]
#[command(name = "mapgenerator")]
#[command(about = "Voronoi edges of integer sites via Fortune's sweep")]
struct Cmd {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Compute the edges for the given and/or random sites
    Edges(EdgesArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Debug)]
struct EdgesArgs {
    /// Sites as `X,Y`
    #[arg(value_name = "X,Y")]
    sites: Vec<Point>,
    #[arg(long, default_value_t = 1000)]
    width: i64,
    #[arg(long, default_value_t = 1000)]
    height: i64,
    /// Scatter this many random sites in addition to the given ones
    #[arg(long)]
    random: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Print JSON rows instead of `x1,y1 -> x2,y2` lines
    #[arg(long)]
    json: bool,
    /// Write JSON rows to this file plus a provenance sidecar
    #[arg(long)]
    out: Option<PathBuf>,
}

/// One output row; edges without an end are never emitted.
#[derive(Debug, PartialEq, Serialize)]
struct EdgeRow {
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
}

impl EdgeRow {
    fn from_edge(edge: &Edge) -> Option<Self> {
        let end = edge.end?;
        Some(Self {
            x1: edge.start.x,
            y1: edge.start.y,
            x2: end.x,
            y2: end.y,
        })
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(log_level(cmd.verbose))
        .init();
    match cmd.action {
        Action::Edges(args) => edges(args),
        Action::Report => report(),
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Given sites first, then random ones; random sites that hit a given one are skipped.
fn collect_sites(args: &EdgesArgs, canvas: &Canvas) -> Result<Vec<Point>> {
    let mut sites = args.sites.clone();
    if let Some(count) = args.random {
        let given: BTreeSet<Point> = sites.iter().copied().collect();
        let scattered = scatter(canvas, count, args.seed).context("scattering random sites")?;
        let before = sites.len();
        sites.extend(scattered.into_iter().filter(|p| !given.contains(p)));
        tracing::info!(
            requested = count,
            added = sites.len() - before,
            seed = args.seed,
            "random_sites"
        );
    }
    Ok(sites)
}

fn compute(canvas: Canvas, sites: &[Point]) -> Result<BTreeSet<Edge>> {
    let mut algo = FortunesAlgorithm::new(canvas, sites).context("invalid input")?;
    algo.get_areas().context("sweep failed")
}

fn edges(args: EdgesArgs) -> Result<()> {
    let canvas = Canvas::new(args.width, args.height).context("invalid canvas")?;
    let sites = collect_sites(&args, &canvas)?;
    tracing::info!(sites = sites.len(), width = canvas.width, height = canvas.height, "sweep");
    let edges = compute(canvas, &sites)?;
    tracing::info!(edges = edges.len(), "done");

    let rows: Vec<EdgeRow> = edges.iter().filter_map(EdgeRow::from_edge).collect();
    if let Some(out) = &args.out {
        write_rows(out, &rows)?;
        let seed = args.random.map(|_| args.seed);
        let prov = provenance::Provenance::new(canvas, sites.len(), seed, rows.len(), out);
        let sidecar = provenance::write_sidecar(out, &prov)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote");
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for edge in &edges {
            println!("{edge}");
        }
    }
    Ok(())
}

fn write_rows(out: &Path, rows: &[EdgeRow]) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(rows)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn report() -> Result<()> {
    let v = serde_json::json!({
        "name": "mapgenerator",
        "version": fortune::VERSION,
        "code_rev": provenance::code_rev(),
    });
    println!("{}", serde_json::to_string_pretty(&v)?);
    Ok(())
}
