//! Edge cost model of a vessel on a classified grid.

use std::f64::consts::SQRT_2;

use floe_core::{CostGrid, Point, VesselProfile};

use crate::config::RouterConfig;
use crate::cost::CostVector;
use crate::distance::{manhattan, octile};
use crate::neighbors::Connectivity;
use crate::traits::{Pather, VectorPather};

/// [`VectorPather`] over a [`CostGrid`] for one vessel.
///
/// Moving into cell `M` over a step of length `d` (1, or √2 diagonally)
/// costs:
///
/// ```text
/// risk = max(0, M.risk + α · M.weather / durability)
/// fuel = base_fuel_rate · M.fuel · (1 + γ · M.weather / durability) · d
/// time = M.time · d / base_speed
/// ```
///
/// Diagonal steps between two blocked cells that touch at a corner are not
/// offered. The vessel profile is clamped on construction. Time and fuel increments
/// are floored at zero as well, so hand-built grids with out-of-range
/// multipliers still yield non-negative edge costs.
#[derive(Debug, Clone)]
pub struct GridPather<'a> {
    grid: &'a CostGrid,
    vessel: VesselProfile,
    alpha: f64,
    gamma: f64,
    connectivity: Connectivity,
    /// Lower bound on the time needed per unit of distance; 0 disables the
    /// heuristic.
    min_time_rate: f64,
}

impl<'a> GridPather<'a> {
    pub fn new(grid: &'a CostGrid, vessel: VesselProfile, config: &RouterConfig) -> Self {
        let vessel = vessel.clamped();
        let min_time_rate = if config.heuristic {
            grid.iter()
                .filter(|(_, c)| c.navigable)
                .map(|(_, c)| c.time.max(0.0) / vessel.base_speed)
                .fold(f64::INFINITY, f64::min)
        } else {
            0.0
        };
        Self {
            grid,
            vessel,
            alpha: config.alpha,
            gamma: config.gamma,
            connectivity: config.connectivity,
            min_time_rate: if min_time_rate.is_finite() { min_time_rate } else { 0.0 },
        }
    }

    /// The clamped vessel profile used for costing.
    #[inline]
    pub fn vessel(&self) -> &VesselProfile {
        &self.vessel
    }

    #[inline]
    pub fn grid(&self) -> &CostGrid {
        self.grid
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.connectivity.neighbors_into(p, buf, |n| {
            self.grid.is_navigable(n) && !self.grid.is_pinched(p, n)
        });
    }
}

impl VectorPather for GridPather<'_> {
    fn cost(&self, from: Point, to: Point) -> CostVector {
        let Some(m) = self.grid.get(to) else {
            return CostVector::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        };
        let d = if from.is_diagonal_to(to) { SQRT_2 } else { 1.0 };
        let v = &self.vessel;
        let exposure = m.weather / v.durability;
        CostVector {
            risk: (m.risk + self.alpha * exposure).max(0.0),
            time: (m.time * d / v.base_speed).max(0.0),
            fuel: (v.base_fuel_rate * m.fuel * (1.0 + self.gamma * exposure) * d).max(0.0),
        }
    }

    fn estimate_time(&self, from: Point, to: Point) -> f64 {
        if self.min_time_rate == 0.0 {
            return 0.0;
        }
        let dist = match self.connectivity {
            Connectivity::Four => f64::from(manhattan(from, to)),
            Connectivity::Eight => octile(from, to),
        };
        dist * self.min_time_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::Cell;

    fn grid() -> CostGrid {
        CostGrid::from_fn(3, 3, |p| {
            if p == Point::new(1, 1) {
                Cell::uniform(9.0).blocked()
            } else {
                Cell::uniform(2.0).with_time(2.0).with_fuel(1.5).with_weather(4.0)
            }
        })
    }

    #[test]
    fn cost_formulas() {
        let g = grid();
        let pather = GridPather::new(&g, VesselProfile::new(2.0, 3.0, 2.0), &RouterConfig::default());
        let c = pather.cost(Point::new(0, 0), Point::new(1, 0));
        // risk = 2 + 0.5 * 4 / 2
        assert!((c.risk - 3.0).abs() < 1e-12);
        // time = 2 * 1 / 2
        assert!((c.time - 1.0).abs() < 1e-12);
        // fuel = 3 * 1.5 * (1 + 0.3 * 4 / 2)
        assert!((c.fuel - 7.2).abs() < 1e-12);
    }

    #[test]
    fn diagonal_steps_scale_time_and_fuel_only() {
        let g = grid();
        let cfg = RouterConfig::default().with_connectivity(Connectivity::Eight);
        let pather = GridPather::new(&g, VesselProfile::default(), &cfg);
        let straight = pather.cost(Point::new(0, 0), Point::new(1, 0));
        let diag = pather.cost(Point::new(1, 0), Point::new(2, 1));
        assert_eq!(diag.risk, straight.risk);
        assert!((diag.time - straight.time * SQRT_2).abs() < 1e-12);
        assert!((diag.fuel - straight.fuel * SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn negative_risk_is_floored() {
        let g = CostGrid::new(2, 1, Cell::uniform(-5.0));
        let pather = GridPather::new(&g, VesselProfile::default(), &RouterConfig::default());
        assert_eq!(pather.cost(Point::new(0, 0), Point::new(1, 0)).risk, 0.0);
    }

    #[test]
    fn zero_profile_is_clamped_before_division() {
        let g = grid();
        let pather = GridPather::new(&g, VesselProfile::new(0.0, 0.0, 0.0), &RouterConfig::default());
        assert_eq!(*pather.vessel(), VesselProfile::new(0.1, 0.1, 0.1));
        let c = pather.cost(Point::new(0, 0), Point::new(1, 0));
        assert!(c.risk.is_finite() && c.time.is_finite() && c.fuel.is_finite());
        // time = 2 / 0.1
        assert!((c.time - 20.0).abs() < 1e-9);
    }

    #[test]
    fn neighbors_skip_blocked_and_out_of_bounds() {
        let g = grid();
        let pather = GridPather::new(&g, VesselProfile::default(), &RouterConfig::default());
        let mut buf = Vec::new();
        pather.neighbors(Point::new(1, 0), &mut buf);
        buf.sort();
        assert_eq!(buf, vec![Point::new(0, 0), Point::new(2, 0)]);
    }

    #[test]
    fn diagonals_do_not_squeeze_between_blocked_cells() {
        let g = CostGrid::from_fn(2, 2, |p| {
            if p.x == p.y { Cell::uniform(1.0) } else { Cell::uniform(1.0).blocked() }
        });
        let cfg = RouterConfig::default().with_connectivity(Connectivity::Eight);
        let pather = GridPather::new(&g, VesselProfile::default(), &cfg);
        let mut buf = Vec::new();
        pather.neighbors(Point::new(0, 0), &mut buf);
        assert!(buf.is_empty());

        // One open side is enough to round the corner.
        let g = grid();
        let pather = GridPather::new(&g, VesselProfile::default(), &cfg);
        let mut buf = Vec::new();
        pather.neighbors(Point::new(1, 0), &mut buf);
        buf.sort();
        assert_eq!(
            buf,
            vec![Point::new(0, 0), Point::new(2, 0), Point::new(0, 1), Point::new(2, 1)]
        );
    }

    #[test]
    fn estimate_is_a_lower_bound() {
        let g = grid();
        let pather = GridPather::new(&g, VesselProfile::default(), &RouterConfig::default());
        // Four steps of time 2 each at speed 1.
        assert_eq!(pather.estimate_time(Point::new(0, 0), Point::new(2, 2)), 8.0);
        let off = GridPather::new(&g, VesselProfile::default(), &RouterConfig::default().with_heuristic(false));
        assert_eq!(off.estimate_time(Point::new(0, 0), Point::new(2, 2)), 0.0);
    }
}
