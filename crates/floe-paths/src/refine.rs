//! From a frontier label to a drawable route: reconstruction, string-pulling,
//! Catmull-Rom smoothing and pixel-level validation.

use floe_core::{CostGrid, Point, Vec2};

use crate::config::RefineConfig;
use crate::label::LabelId;
use crate::pareto::ParetoRouter;

/// The grid path of a label of the router's last search, start first and
/// the label's own cell last. Empty if `id` is unknown.
pub fn reconstruct(router: &ParetoRouter, id: LabelId) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cur = router.label(id);
    while let Some(label) = cur {
        path.push(label.node);
        cur = label.parent.and_then(|p| router.label(p));
    }
    path.reverse();
    path
}

/// Point on the uniform Catmull-Rom segment from `p1` (`t = 0`) to `p2`
/// (`t = 1`), with `p0` and `p3` shaping the end tangents.
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f64) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    (p0 * (-t + 2.0 * t2 - t3)
        + p1 * (2.0 - 5.0 * t2 + 3.0 * t3)
        + p2 * (t + 4.0 * t2 - 3.0 * t3)
        + p3 * (t3 - t2))
        * 0.5
}

/// Which geometry a [`RefinedPath`] ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RouteShape {
    /// The spline passed pixel validation.
    Smoothed,
    /// The spline was rejected; `points` are the pruned waypoints.
    Polyline,
}

/// A refined route in chart pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefinedPath {
    /// Pruned grid waypoints.
    pub waypoints: Vec<Point>,
    pub points: Vec<Vec2>,
    pub shape: RouteShape,
}

/// Turns grid paths into smooth, validated pixel routes.
#[derive(Debug, Clone, Copy)]
pub struct PathRefiner<'a> {
    grid: &'a CostGrid,
    spacing: f64,
    config: RefineConfig,
}

impl<'a> PathRefiner<'a> {
    /// A refiner for `grid`, whose cells are `spacing` pixels wide.
    pub fn new(grid: &'a CostGrid, spacing: f64, config: RefineConfig) -> Self {
        Self {
            grid,
            spacing,
            config,
        }
    }

    /// Whether the straight segment between two cells stays on navigable
    /// cells.
    ///
    /// The segment is sampled at least once per half cell and each sample
    /// is rounded to the nearest cell. Consecutive samples may not slip
    /// diagonally between two blocked cells. A cell always sees itself.
    pub fn line_of_sight(&self, a: Point, b: Point) -> bool {
        if a == b {
            return true;
        }
        if !self.grid.is_navigable(a) || !self.grid.is_navigable(b) {
            return false;
        }
        let samples = (2.0 * a.distance(b)).ceil().max(1.0) as u32;
        let (ax, ay) = (f64::from(a.x), f64::from(a.y));
        let (dx, dy) = (f64::from(b.x - a.x), f64::from(b.y - a.y));
        let mut prev = a;
        (1..=samples).all(|i| {
            let p = if i == samples {
                b
            } else {
                let t = f64::from(i) / f64::from(samples);
                Point::new((ax + dx * t).round() as i32, (ay + dy * t).round() as i32)
            };
            let clear = self.grid.is_navigable(p) && !self.grid.is_pinched(prev, p);
            prev = p;
            clear
        })
    }

    /// String-pulling: keep only the waypoints needed to stay in line of
    /// sight. The first and last cells are always kept.
    pub fn prune(&self, path: &[Point]) -> Vec<Point> {
        let Some((&first, _)) = path.split_first() else {
            return Vec::new();
        };
        let mut out = vec![first];
        let mut i = 0;
        while i + 1 < path.len() {
            let next = (i + 2..path.len())
                .rev()
                .find(|&j| self.line_of_sight(path[i], path[j]))
                .unwrap_or(i + 1);
            out.push(path[next]);
            i = next;
        }
        out
    }

    /// Cell centers of `waypoints`, with the first and last replaced by the
    /// exact endpoints.
    pub fn polyline(&self, waypoints: &[Point], start: Vec2, end: Vec2) -> Vec<Vec2> {
        if waypoints.len() < 2 {
            return vec![start, end];
        }
        let mut pts: Vec<Vec2> = waypoints.iter().map(|p| p.center(self.spacing)).collect();
        let last = pts.len() - 1;
        pts[0] = start;
        pts[last] = end;
        pts
    }

    /// Catmull-Rom spline through the polyline of `waypoints`.
    ///
    /// End points are duplicated to pin the boundary tangents. Each segment
    /// contributes `samples_per_segment` points and the curve ends exactly
    /// at `end`.
    pub fn smooth(&self, waypoints: &[Point], start: Vec2, end: Vec2) -> Vec<Vec2> {
        let pts = self.polyline(waypoints, start, end);
        let steps = self.config.samples_per_segment.max(1);
        let mut ctrl = Vec::with_capacity(pts.len() + 2);
        ctrl.push(pts[0]);
        ctrl.extend_from_slice(&pts);
        ctrl.push(pts[pts.len() - 1]);

        let mut curve = Vec::with_capacity((pts.len() - 1) * steps as usize + 1);
        for w in ctrl.windows(4) {
            for s in 0..steps {
                let t = f64::from(s) / f64::from(steps);
                curve.push(catmull_rom(w[0], w[1], w[2], w[3], t));
            }
        }
        curve.push(end);
        curve
    }

    /// Prune `path`, smooth it and validate the curve against
    /// `navigable_px`. Falls back to the pruned polyline when any checked
    /// sample is not navigable.
    pub fn refine(
        &self,
        path: &[Point],
        start: Vec2,
        end: Vec2,
        navigable_px: impl Fn(Vec2) -> bool,
    ) -> RefinedPath {
        let waypoints = self.prune(path);
        let curve = self.smooth(&waypoints, start, end);
        let stride = self.config.validation_stride.max(1);
        let last = curve.len() - 1;
        let valid = curve
            .iter()
            .enumerate()
            .filter(|&(i, _)| i % stride == 0 || i == last)
            .all(|(_, &p)| p.is_finite() && navigable_px(p));
        if valid {
            return RefinedPath {
                waypoints,
                points: curve,
                shape: RouteShape::Smoothed,
            };
        }
        log::warn!(
            "smoothed route from {start} to {end} leaves navigable water, using {} waypoints",
            waypoints.len()
        );
        let points = self.polyline(&waypoints, start, end);
        RefinedPath {
            waypoints,
            points,
            shape: RouteShape::Polyline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::Cell;

    fn chart(rows: &[&str]) -> CostGrid {
        let h = rows.len() as i32;
        let w = rows[0].len() as i32;
        CostGrid::from_fn(w, h, |p| {
            if rows[p.y as usize].as_bytes()[p.x as usize] == b'~' {
                Cell::uniform(1.0)
            } else {
                Cell::uniform(1.0).blocked()
            }
        })
    }

    fn refiner(grid: &CostGrid) -> PathRefiner<'_> {
        PathRefiner::new(grid, 10.0, RefineConfig::default())
    }

    #[test]
    fn cell_sees_itself() {
        let g = chart(&["#"]);
        assert!(refiner(&g).line_of_sight(Point::new(0, 0), Point::new(0, 0)));
        assert!(refiner(&g).line_of_sight(Point::new(5, 5), Point::new(5, 5)));
    }

    #[test]
    fn line_of_sight_blocked_by_ice() {
        let g = chart(&[
            "~~~~", //
            "~~#~", //
            "~~~~", //
        ]);
        let r = refiner(&g);
        assert!(r.line_of_sight(Point::new(0, 0), Point::new(3, 0)));
        assert!(!r.line_of_sight(Point::new(0, 1), Point::new(3, 1)));
        assert!(!r.line_of_sight(Point::new(0, 0), Point::new(9, 0)));
    }

    #[test]
    fn line_of_sight_does_not_slip_between_touching_ice() {
        let g = chart(&[
            "~#", //
            "#~", //
        ]);
        let r = refiner(&g);
        assert!(!r.line_of_sight(Point::new(0, 0), Point::new(1, 1)));
        let g = chart(&[
            "~~", //
            "#~", //
        ]);
        assert!(refiner(&g).line_of_sight(Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn prune_straightens_open_water() {
        let g = chart(&["~~~~~", "~~~~~"]);
        let path: Vec<Point> = (0..5).map(|x| Point::new(x, 0)).chain([Point::new(4, 1)]).collect();
        let pruned = refiner(&g).prune(&path);
        assert_eq!(pruned.first(), Some(&Point::new(0, 0)));
        assert_eq!(pruned.last(), Some(&Point::new(4, 1)));
        assert!(pruned.len() <= path.len());
        assert_eq!(pruned.len(), 2);
    }

    #[test]
    fn prune_keeps_corner_around_ice() {
        let g = chart(&[
            "~~~", //
            "##~", //
            "~~~", //
        ]);
        let path = vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(1, 2),
            Point::new(0, 2),
        ];
        let pruned = refiner(&g).prune(&path);
        assert_eq!(
            pruned,
            vec![Point::new(0, 0), Point::new(2, 0), Point::new(2, 2), Point::new(0, 2)]
        );
    }

    #[test]
    fn prune_short_paths() {
        let g = chart(&["~~"]);
        let r = refiner(&g);
        assert!(r.prune(&[]).is_empty());
        assert_eq!(r.prune(&[Point::new(1, 0)]), vec![Point::new(1, 0)]);
    }

    #[test]
    fn catmull_rom_interpolates_control_points() {
        let p = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0), Vec2::new(3.0, 1.0), Vec2::new(4.0, 4.0)];
        assert_eq!(catmull_rom(p[0], p[1], p[2], p[3], 0.0), p[1]);
        let end = catmull_rom(p[0], p[1], p[2], p[3], 1.0);
        assert!(end.distance(p[2]) < 1e-12);
    }

    #[test]
    fn smooth_emits_fixed_samples_and_hits_anchors() {
        let g = chart(&["~~~~"]);
        let r = refiner(&g);
        let wps = [Point::new(0, 0), Point::new(2, 0), Point::new(3, 0)];
        let start = Vec2::new(1.0, 4.0);
        let end = Vec2::new(38.0, 6.0);
        let curve = r.smooth(&wps, start, end);
        assert_eq!(curve.len(), 2 * 10 + 1);
        assert_eq!(curve[0], start);
        assert_eq!(curve[curve.len() - 1], end);
        assert!(curve[10].distance(Point::new(2, 0).center(10.0)) < 1e-9);
    }

    #[test]
    fn single_waypoint_smooths_to_anchor_pair() {
        let g = chart(&["~"]);
        let start = Vec2::new(1.0, 1.0);
        let end = Vec2::new(8.0, 8.0);
        let curve = refiner(&g).smooth(&[Point::new(0, 0)], start, end);
        assert_eq!(curve.first(), Some(&start));
        assert_eq!(curve.last(), Some(&end));
    }

    #[test]
    fn refine_keeps_valid_curve() {
        let g = chart(&["~~~", "~~~"]);
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0), Point::new(2, 1)];
        let out = refiner(&g).refine(&path, Vec2::new(5.0, 5.0), Vec2::new(25.0, 15.0), |_| true);
        assert_eq!(out.shape, RouteShape::Smoothed);
        assert_eq!(out.points.last(), Some(&Vec2::new(25.0, 15.0)));
    }

    #[test]
    fn refine_falls_back_to_polyline() {
        let g = chart(&["~~~", "~~~"]);
        let path = [Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)];
        let start = Vec2::new(5.0, 5.0);
        let end = Vec2::new(25.0, 15.0);
        // Only the exact polyline vertices count as water.
        let out = refiner(&g).refine(&path, start, end, |p| p == start);
        assert_eq!(out.shape, RouteShape::Polyline);
        assert_eq!(out.points.first(), Some(&start));
        assert_eq!(out.points.last(), Some(&end));
        assert_eq!(out.points.len(), out.waypoints.len());
    }

    #[test]
    fn final_point_is_always_validated() {
        let g = chart(&["~~~"]);
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        let end = Vec2::new(25.0, 5.0);
        let r = PathRefiner::new(&g, 10.0, RefineConfig {
            samples_per_segment: 10,
            validation_stride: 1000,
        });
        let out = r.refine(&path, Vec2::new(5.0, 5.0), end, |p| p != end);
        assert_eq!(out.shape, RouteShape::Polyline);
    }
}
