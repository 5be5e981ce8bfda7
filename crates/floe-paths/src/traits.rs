use floe_core::Point;

use crate::cost::CostVector;

/// Minimal search interface: neighbor enumeration.
pub trait Pather {
    /// Append the traversable neighbors of `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with vector-valued edge costs.
pub trait VectorPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Every component must be
    /// `≥ 0`; the search relies on costs never decreasing along a path.
    fn cost(&self, from: Point, to: Point) -> CostVector;

    /// Lower bound on the time still needed to travel from `from` to `to`.
    /// Only used to order the search; must never overestimate.
    fn estimate_time(&self, _from: Point, _to: Point) -> f64 {
        0.0
    }
}
