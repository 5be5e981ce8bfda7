//! Multi-objective route search on classified cost grids.
//!
//! This crate provides the search and post-processing stages of the
//! planner:
//!
//! - **Connectivity filtering** ([`ConnectivityFilter`]): demote navigable
//!   cells that are not 4-connected to an anchor cell.
//! - **Pareto search** ([`ParetoRouter`]): a label-setting generalization of
//!   Dijkstra to `(risk, time, fuel)` cost vectors that returns every
//!   non-dominated cost vector at the goal.
//! - **Refinement** ([`PathRefiner`]): string-pulling of a reconstructed
//!   cell path, Catmull-Rom smoothing and pixel-level validation.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | connectivity filtering |
//! | [`VectorPather`] : [`Pather`] | Pareto search |
//!
//! [`GridPather`] implements both for a [`CostGrid`](floe_core::CostGrid)
//! and a [`VesselProfile`](floe_core::VesselProfile).

mod config;
mod connectivity;
mod cost;
mod distance;
mod frontier;
mod label;
mod neighbors;
mod pareto;
mod pather;
mod refine;
mod traits;

pub use config::{RefineConfig, RouterConfig};
pub use connectivity::ConnectivityFilter;
pub use cost::{CostVector, Objective, dominates};
pub use distance::{manhattan, octile};
pub use label::{Label, LabelId};
pub use neighbors::Connectivity;
pub use pareto::{ParetoRouter, SearchControl, SearchInterrupted, SearchStats};
pub use pather::GridPather;
pub use refine::{PathRefiner, RefinedPath, RouteShape, catmull_rom, reconstruct};
pub use traits::{Pather, VectorPather};
