//! Plan Pareto-optimal ship routes across a chart image.
//!
//! Run: cargo run --bin floe-route -- chart.png --start 40,60 --goal 700,500

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use floe_chart::Chart;
use floe_core::{Vec2, VesselProfile};
use floe_demos::{Report, load_config, load_vessel, parse_objective, parse_position};
use floe_paths::{Connectivity, Objective};
use floe_plan::Planner;

/// Size of the blank chart used when the image cannot be loaded.
const FALLBACK_CHART_SIZE: (u32, u32) = (800, 600);

/// Multi-objective route planner for raster nautical charts.
///
/// Prints every route that is not beaten on risk, time and fuel at once,
/// then smooths the route that is best for the chosen objective.
#[derive(Parser)]
#[command(name = "floe-route")]
#[command(version)]
struct Cli {
    /// Chart image (PNG or JPEG). Open water is blue.
    chart: PathBuf,

    /// Start position in chart pixels, as X,Y
    #[arg(long, value_parser = parse_position)]
    start: Vec2,

    /// Goal position in chart pixels, as X,Y
    #[arg(long, value_parser = parse_position)]
    goal: Vec2,

    /// Planner configuration as JSON; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vessel profile as JSON ({"base_speed":..,"base_fuel_rate":..,"durability":..})
    #[arg(long, conflicts_with_all = ["speed", "fuel_rate", "durability"])]
    vessel: Option<PathBuf>,

    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    #[arg(long, default_value_t = 1.0)]
    fuel_rate: f64,

    #[arg(long, default_value_t = 1.0)]
    durability: f64,

    /// Reject non-positive vessel fields instead of clamping them
    #[arg(long)]
    strict_vessel: bool,

    /// Grid cell size in pixels
    #[arg(long)]
    spacing: Option<u32>,

    /// Seed for the classification noise
    #[arg(long)]
    seed: Option<u64>,

    /// Allow diagonal moves
    #[arg(long)]
    diagonal: bool,

    /// Give up the search after this many milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Objective used to pick the route to smooth: risk, time or fuel
    #[arg(long, value_parser = parse_objective, default_value = "time")]
    objective: Objective,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Default::default(),
    };
    if let Some(spacing) = cli.spacing {
        config.spacing = spacing;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.diagonal {
        config.router.connectivity = Connectivity::Eight;
    }
    config.strict_vessel |= cli.strict_vessel;

    let vessel = match &cli.vessel {
        Some(path) => load_vessel(path)?,
        None => VesselProfile::new(cli.speed, cli.fuel_rate, cli.durability),
    };

    let chart = Chart::open_or_blank(&cli.chart, FALLBACK_CHART_SIZE);
    let mut planner = Planner::new(config);
    let task = planner.spawn(
        &chart,
        cli.start,
        cli.goal,
        vessel,
        cli.deadline_ms.map(Duration::from_millis),
    )?;
    let routes = task.join()?;
    log::info!("found {} non-dominated routes", routes.len());

    let chosen = routes
        .select(cli.objective)
        .context("route set is empty")?;
    let grid = planner.prepare(&chart);
    let refined = planner.refine(&chart, &grid, chosen, cli.start, cli.goal);
    let report = Report::new(&routes, cli.objective, &refined).context("route set is empty")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
