//! Route planning across raster nautical charts.
//!
//! [`Planner`] ties the pipeline together:
//!
//! 1. classify the chart into a cost grid ([`floe_chart::TerrainClassifier`]),
//! 2. keep the navigable component of the first navigable cell
//!    ([`floe_paths::ConnectivityFilter`]),
//! 3. search every Pareto-optimal route ([`floe_paths::ParetoRouter`]),
//! 4. smooth a chosen route ([`floe_paths::PathRefiner`]).
//!
//! Steps 1 and 2 are cached per chart and grid spacing in a [`ChartCache`].
//! Step 3 can run on a background thread with cancellation and a deadline
//! through [`Planner::spawn`].

mod cache;
mod config;
mod error;
mod planner;
mod routes;
mod task;

pub use cache::{ChartCache, ChartKey};
pub use config::PlannerConfig;
pub use error::PlanError;
pub use planner::Planner;
pub use routes::{ParetoRoute, RouteSet};
pub use task::PlanTask;
