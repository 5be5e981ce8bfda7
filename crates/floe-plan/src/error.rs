//! Error types for route planning.

use floe_core::{Point, Vec2, VesselError};
use floe_paths::SearchInterrupted;

/// Errors that can occur while planning a route.
///
/// An empty Pareto frontier is reported as
/// [`NoFeasibleRoute`](Self::NoFeasibleRoute); any `Ok` route set holds at
/// least one route, however costly.
///
/// ```
/// use floe_core::Point;
/// use floe_plan::PlanError;
///
/// let err = PlanError::NoFeasibleRoute {
///     start: Point::new(0, 0),
///     goal: Point::new(4, 2),
/// };
/// assert!(err.to_string().contains("no feasible route"));
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlanError {
    /// The vessel profile was rejected.
    #[error(transparent)]
    Vessel(#[from] VesselError),

    /// A requested position lies outside the chart raster.
    #[error("position {pos} lies outside the {width}x{height} chart")]
    OutsideChart { pos: Vec2, width: u32, height: u32 },

    /// The start position is not on navigable water.
    #[error("start position {0} is not navigable")]
    StartNotNavigable(Vec2),

    /// The goal position is not on navigable water.
    #[error("goal position {0} is not navigable")]
    GoalNotNavigable(Vec2),

    /// The search exhausted every route without reaching the goal.
    #[error("no feasible route from cell {start} to cell {goal}")]
    NoFeasibleRoute { start: Point, goal: Point },

    /// The search was cancelled or ran past its deadline.
    #[error(transparent)]
    Interrupted(#[from] SearchInterrupted),

    /// The background planning thread panicked.
    #[error("planning worker panicked")]
    WorkerPanicked,
}

impl PlanError {
    /// Whether the error means "no route" rather than a failure to look for
    /// one.
    pub fn is_no_route(&self) -> bool {
        matches!(self, Self::NoFeasibleRoute { .. })
    }
}
