//! Shared pieces of the `floe-route` command-line planner: argument
//! parsing helpers, configuration loading and report rendering.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use floe_core::{Point, Vec2, VesselProfile};
use floe_paths::{CostVector, Objective, RefinedPath, RouteShape};
use floe_plan::{PlannerConfig, RouteSet};
use serde::Serialize;

/// Parse an `X,Y` pixel position.
pub fn parse_position(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(format!("position {s:?} is not finite"));
    }
    Ok(Vec2::new(x, y))
}

/// Parse an objective name: `risk`, `time` or `fuel`.
pub fn parse_objective(s: &str) -> Result<Objective, String> {
    Objective::ALL
        .into_iter()
        .find(|o| o.to_string().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| format!("unknown objective {s:?}, expected risk, time or fuel"))
}

pub fn load_config(path: &Path) -> Result<PlannerConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing planner config {}", path.display()))
}

pub fn load_vessel(path: &Path) -> Result<VesselProfile> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing vessel profile {}", path.display()))
}

/// Machine-readable result of one planning run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub start: Point,
    pub goal: Point,
    pub objective: Objective,
    pub routes: Vec<RouteSummary>,
    pub chosen: usize,
    pub refined: &'a RefinedPath,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub cost: CostVector,
    pub cells: usize,
    /// Objectives this route is the best choice for.
    pub best_for: Vec<Objective>,
}

impl<'a> Report<'a> {
    /// Summarize `routes`, marking the route chosen for `objective`.
    pub fn new(routes: &RouteSet, objective: Objective, refined: &'a RefinedPath) -> Option<Self> {
        let chosen_cost = routes.select(objective)?.cost;
        let choices = routes.choices();
        let summaries: Vec<RouteSummary> = routes
            .iter()
            .map(|r| RouteSummary {
                cost: r.cost,
                cells: r.cells.len(),
                best_for: choices
                    .iter()
                    .filter(|(_, c)| c.cost == r.cost)
                    .map(|&(o, _)| o)
                    .collect(),
            })
            .collect();
        let chosen = summaries.iter().position(|s| s.cost == chosen_cost)?;
        Some(Self {
            start: routes.start,
            goal: routes.goal,
            objective,
            routes: summaries,
            chosen,
            refined,
        })
    }

    /// Human-readable rendering.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} non-dominated routes from cell {} to cell {}",
            self.routes.len(),
            self.start,
            self.goal
        );
        for (i, r) in self.routes.iter().enumerate() {
            let marker = if i == self.chosen { '*' } else { ' ' };
            let best: Vec<String> = r.best_for.iter().map(|o| format!("min {o}")).collect();
            let _ = writeln!(out, "{marker} {i:>3}  {}  ({} cells) {}", r.cost, r.cells, best.join(", "));
        }
        let shape = match self.refined.shape {
            RouteShape::Smoothed => "smoothed curve",
            RouteShape::Polyline => "polyline (smoothing left the water)",
        };
        let _ = writeln!(
            out,
            "route {} by min {}: {} waypoints, {} points, {shape}",
            self.chosen,
            self.objective,
            self.refined.waypoints.len(),
            self.refined.points.len()
        );
        out
    }
}
