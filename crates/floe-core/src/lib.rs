//! **floe-core**: shared types for ice-aware ship routing.
//!
//! This crate provides the foundational types used across the *floe*
//! crates: integer grid geometry, continuous chart coordinates, the
//! row-major cost grid produced by terrain classification, and vessel
//! profiles with their clamp policy.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod vessel;

pub use cell::Cell;
pub use geom::{Point, Range, Vec2};
pub use grid::{CostGrid, Grid};
pub use vessel::{MIN_PROFILE_VALUE, VesselError, VesselProfile};
