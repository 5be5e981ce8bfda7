//! Restricting the navigable area to one 4-connected component.

use std::collections::VecDeque;

use floe_core::{CostGrid, Point};

use crate::neighbors::Connectivity;
use crate::traits::Pather;

/// Cardinal moves between navigable cells.
struct WaterPather<'a>(&'a CostGrid);

impl Pather for WaterPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        Connectivity::Four.neighbors_into(p, buf, |n| self.0.is_navigable(n));
    }
}

/// Demotes navigable cells that cannot be reached from an anchor cell.
///
/// After filtering, the navigable cells of the grid form a single
/// component under 4-connectivity. The filter keeps its buffers between
/// calls.
#[derive(Debug, Default)]
pub struct ConnectivityFilter {
    reached: Vec<bool>,
    queue: VecDeque<usize>,
    nbuf: Vec<Point>,
}

impl ConnectivityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first navigable cell in row-major order.
    pub fn first_navigable(grid: &CostGrid) -> Option<Point> {
        grid.iter().find(|(_, c)| c.navigable).map(|(p, _)| p)
    }

    /// Anchor at the first navigable cell in row-major order and demote
    /// everything not connected to it. Returns the anchor, or `None` if the
    /// grid has no navigable cell.
    pub fn apply(&mut self, grid: &mut CostGrid) -> Option<Point> {
        let anchor = Self::first_navigable(grid)?;
        self.retain_from(grid, anchor);
        Some(anchor)
    }

    /// Demote every navigable cell not 4-connected to `anchor`. Returns the
    /// number of demoted cells.
    ///
    /// A non-navigable or out-of-bounds anchor reaches nothing, so every
    /// cell is demoted.
    pub fn retain_from(&mut self, grid: &mut CostGrid, anchor: Point) -> usize {
        self.reached.clear();
        self.reached.resize(grid.len(), false);
        self.queue.clear();

        if let Some(ai) = grid.index(anchor).filter(|_| grid.is_navigable(anchor)) {
            self.reached[ai] = true;
            self.queue.push_back(ai);
        } else {
            log::warn!("connectivity anchor {anchor} is not navigable");
        }

        let pather = WaterPather(grid);
        while let Some(ci) = self.queue.pop_front() {
            let cp = grid.point(ci);
            self.nbuf.clear();
            pather.neighbors(cp, &mut self.nbuf);
            for &np in &self.nbuf {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if !self.reached[ni] {
                    self.reached[ni] = true;
                    self.queue.push_back(ni);
                }
            }
        }

        let isolated: Vec<Point> = grid
            .iter()
            .filter(|&(p, c)| c.navigable && grid.index(p).is_some_and(|i| !self.reached[i]))
            .map(|(p, _)| p)
            .collect();
        for &p in &isolated {
            grid.demote(p);
        }
        log::debug!(
            "connectivity from {anchor}: kept {} cells, demoted {}",
            grid.navigable_count(),
            isolated.len()
        );
        isolated.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::Cell;

    /// Build a grid from rows of `~` (water) and `#` (ice).
    fn chart(rows: &[&str]) -> CostGrid {
        let h = rows.len() as i32;
        let w = rows[0].len() as i32;
        CostGrid::from_fn(w, h, |p| {
            let ch = rows[p.y as usize].as_bytes()[p.x as usize];
            if ch == b'~' {
                Cell::uniform(1.0)
            } else {
                Cell::uniform(9.0).blocked()
            }
        })
    }

    #[test]
    fn anchor_is_first_navigable_row_major() {
        let g = chart(&["##~", "~~~"]);
        assert_eq!(ConnectivityFilter::first_navigable(&g), Some(Point::new(2, 0)));
        assert_eq!(ConnectivityFilter::first_navigable(&chart(&["##"])), None);
    }

    #[test]
    fn isolated_pockets_are_demoted() {
        let mut g = chart(&[
            "~~#~~", //
            "~~#~#", //
            "###~~", //
            "~#~##", //
        ]);
        let mut f = ConnectivityFilter::new();
        assert_eq!(f.apply(&mut g), Some(Point::new(0, 0)));
        assert_eq!(g.navigable_count(), 4);
        for p in [Point::new(0, 0), Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)] {
            assert!(g.is_navigable(p));
        }
        assert!(!g.is_navigable(Point::new(3, 0)));
        assert!(!g.is_navigable(Point::new(0, 3)));
    }

    #[test]
    fn diagonal_contact_does_not_connect() {
        let mut g = chart(&["~#", "#~"]);
        ConnectivityFilter::new().apply(&mut g);
        assert!(g.is_navigable(Point::new(0, 0)));
        assert!(!g.is_navigable(Point::new(1, 1)));
    }

    #[test]
    fn explicit_anchor() {
        let mut g = chart(&["~#~", "~#~"]);
        let demoted = ConnectivityFilter::new().retain_from(&mut g, Point::new(2, 1));
        assert_eq!(demoted, 2);
        assert!(g.is_navigable(Point::new(2, 0)));
        assert!(!g.is_navigable(Point::new(0, 0)));
    }

    #[test]
    fn blocked_anchor_demotes_everything() {
        let mut g = chart(&["~#~"]);
        let demoted = ConnectivityFilter::new().retain_from(&mut g, Point::new(1, 0));
        assert_eq!(demoted, 2);
        assert_eq!(g.navigable_count(), 0);
    }

    #[test]
    fn filter_is_idempotent_and_reusable() {
        let mut g = chart(&["~~#~", "#~#~"]);
        let mut f = ConnectivityFilter::new();
        f.apply(&mut g);
        let once = g.clone();
        f.apply(&mut g);
        assert_eq!(g, once);
        assert_eq!(g.navigable_count(), 3);
    }

    #[test]
    fn empty_grid_has_no_anchor() {
        let mut g = CostGrid::new(0, 0, Cell::default());
        assert_eq!(ConnectivityFilter::new().apply(&mut g), None);
    }
}
