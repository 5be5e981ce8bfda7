//! Pareto route sets and picking a route by objective.

use floe_core::Point;
use floe_paths::{CostVector, Objective};

/// One non-dominated route: its realized cost and its grid path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParetoRoute {
    pub cost: CostVector,
    /// Grid cells from the start cell to the goal cell.
    pub cells: Vec<Point>,
}

/// The Pareto frontier between two cells.
///
/// Routes are sorted lexicographically by `(risk, time, fuel)` and no route
/// dominates another.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSet {
    pub start: Point,
    pub goal: Point,
    pub routes: Vec<ParetoRoute>,
}

impl RouteSet {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParetoRoute> {
        self.routes.iter()
    }

    /// The route minimal in `objective`. Ties are broken by the remaining
    /// objectives in `(risk, time, fuel)` order.
    pub fn select(&self, objective: Objective) -> Option<&ParetoRoute> {
        let order = tiebreak_order(objective);
        self.routes
            .iter()
            .min_by(|a, b| a.cost.cmp_by(&b.cost, order))
    }

    /// The minimal route of every objective, in [`Objective::ALL`] order.
    /// Several objectives may pick the same route.
    pub fn choices(&self) -> Vec<(Objective, &ParetoRoute)> {
        Objective::ALL
            .iter()
            .filter_map(|&o| self.select(o).map(|r| (o, r)))
            .collect()
    }
}

fn tiebreak_order(first: Objective) -> [Objective; 3] {
    let mut order = [first; 3];
    let mut rest = Objective::ALL.iter().filter(|&&o| o != first);
    for slot in &mut order[1..] {
        if let Some(&o) = rest.next() {
            *slot = o;
        }
    }
    order
}
