//! The planning pipeline: classify, filter, search, refine.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use floe_chart::{Chart, TerrainClassifier};
use floe_core::{CostGrid, Point, Vec2, VesselProfile};
use floe_paths::{
    ConnectivityFilter, GridPather, ParetoRouter, PathRefiner, RefinedPath, RouterConfig,
    SearchControl, reconstruct,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cache::{ChartCache, ChartKey};
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::routes::{ParetoRoute, RouteSet};
use crate::task::PlanTask;

/// Plans Pareto-optimal routes across charts.
///
/// The planner owns the classification cache and a reusable router.
/// Classified grids are cached per chart and spacing; changing the
/// classification settings through [`set_config`](Self::set_config)
/// clears the cache.
#[derive(Debug)]
pub struct Planner {
    config: PlannerConfig,
    classifier: TerrainClassifier,
    cache: ChartCache,
    router: ParetoRouter,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            classifier: TerrainClassifier::new(config.classifier),
            router: ParetoRouter::new(Default::default())
                .with_check_interval(config.router.interrupt_check_interval),
            cache: ChartCache::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Replace the configuration. Cached grids are dropped when the
    /// classification settings change.
    pub fn set_config(&mut self, config: PlannerConfig) {
        if config.classifier != self.config.classifier || config.seed != self.config.seed {
            log::debug!("classification settings changed, clearing {} cached grids", self.cache.len());
            self.cache.clear();
        }
        self.classifier = TerrainClassifier::new(config.classifier);
        self.router = ParetoRouter::new(self.router.range())
            .with_check_interval(config.router.interrupt_check_interval);
        self.config = config;
    }

    #[inline]
    pub fn classifier(&self) -> &TerrainClassifier {
        &self.classifier
    }

    #[inline]
    pub fn cache(&self) -> &ChartCache {
        &self.cache
    }

    #[inline]
    pub fn cache_mut(&mut self) -> &mut ChartCache {
        &mut self.cache
    }

    /// The classified, connectivity-filtered grid of `chart`, from the cache
    /// if present.
    pub fn prepare(&mut self, chart: &Chart) -> Arc<CostGrid> {
        let key = ChartKey::new(chart.id(), self.config.spacing.max(1));
        let classifier = &self.classifier;
        let config = &self.config;
        self.cache
            .get_or_insert_with(key, || classify_and_filter(classifier, chart, config))
    }

    /// Map pixel endpoints to grid cells, checking that both lie on the
    /// chart, on water pixels and on navigable cells.
    pub fn locate(&self, chart: &Chart, grid: &CostGrid, start: Vec2, goal: Vec2) -> Result<(Point, Point), PlanError> {
        let spacing = f64::from(self.config.spacing.max(1));
        let cell = |pos: Vec2| -> Result<Point, PlanError> {
            let inside = pos.is_finite()
                && pos.x >= 0.0
                && pos.y >= 0.0
                && pos.x < f64::from(chart.width())
                && pos.y < f64::from(chart.height());
            if !inside {
                return Err(PlanError::OutsideChart {
                    pos,
                    width: chart.width(),
                    height: chart.height(),
                });
            }
            Ok(pos.cell(spacing))
        };
        let s = cell(start)?;
        let g = cell(goal)?;
        if !grid.is_navigable(s) || !self.classifier.is_water_at(chart, start) {
            return Err(PlanError::StartNotNavigable(start));
        }
        if !grid.is_navigable(g) || !self.classifier.is_water_at(chart, goal) {
            return Err(PlanError::GoalNotNavigable(goal));
        }
        Ok((s, g))
    }

    /// Every Pareto-optimal route between two chart positions.
    pub fn plan(&mut self, chart: &Chart, start: Vec2, goal: Vec2, vessel: VesselProfile) -> Result<RouteSet, PlanError> {
        self.plan_with(chart, start, goal, vessel, &SearchControl::default())
    }

    /// Like [`plan`](Self::plan), stopping early when `control` asks to.
    pub fn plan_with(
        &mut self,
        chart: &Chart,
        start: Vec2,
        goal: Vec2,
        vessel: VesselProfile,
        control: &SearchControl,
    ) -> Result<RouteSet, PlanError> {
        let vessel = self.check_vessel(vessel)?;
        let grid = self.prepare(chart);
        let (s, g) = self.locate(chart, &grid, start, goal)?;
        if self.router.range() != grid.bounds() {
            self.router.set_range(grid.bounds());
        }
        search_routes(&mut self.router, &grid, vessel, &self.config.router, s, g, control)
    }

    /// Start planning on a background thread.
    ///
    /// Classification and endpoint checks run on the calling thread, so
    /// their errors are returned here. The search itself runs on the worker
    /// and stops after `timeout`, if given.
    pub fn spawn(
        &mut self,
        chart: &Chart,
        start: Vec2,
        goal: Vec2,
        vessel: VesselProfile,
        timeout: Option<Duration>,
    ) -> Result<PlanTask, PlanError> {
        let vessel = self.check_vessel(vessel)?;
        let grid = self.prepare(chart);
        let (s, g) = self.locate(chart, &grid, start, goal)?;

        let cancel = Arc::new(AtomicBool::new(false));
        let mut control = SearchControl::new().with_cancel(Arc::clone(&cancel));
        if let Some(timeout) = timeout {
            control = control.with_timeout(timeout);
        }
        let router_config = self.config.router;
        let handle = std::thread::spawn(move || {
            let mut router = ParetoRouter::new(grid.bounds())
                .with_check_interval(router_config.interrupt_check_interval);
            search_routes(&mut router, &grid, vessel, &router_config, s, g, &control)
        });
        Ok(PlanTask::new(handle, cancel))
    }

    /// Smooth `route` into chart pixel coordinates, validating the curve
    /// against the chart's water pixels.
    pub fn refine(&self, chart: &Chart, grid: &CostGrid, route: &ParetoRoute, start: Vec2, goal: Vec2) -> RefinedPath {
        let refiner = PathRefiner::new(grid, f64::from(self.config.spacing.max(1)), self.config.refine);
        refiner.refine(&route.cells, start, goal, |p| self.classifier.is_water_at(chart, p))
    }

    fn check_vessel(&self, vessel: VesselProfile) -> Result<VesselProfile, PlanError> {
        if self.config.strict_vessel {
            VesselProfile::strict(vessel.base_speed, vessel.base_fuel_rate, vessel.durability)?;
        }
        Ok(vessel)
    }
}

fn classify_and_filter(classifier: &TerrainClassifier, chart: &Chart, config: &PlannerConfig) -> CostGrid {
    let spacing = config.spacing.max(1);
    let mut grid = match config.seed {
        Some(seed) => classifier.classify(chart, spacing, &mut StdRng::seed_from_u64(seed)),
        None => classifier.classify(chart, spacing, &mut rand::rng()),
    };
    if ConnectivityFilter::new().apply(&mut grid).is_none() {
        log::warn!("chart {} has no navigable cell at spacing {spacing}", chart.id());
    }
    grid
}

fn search_routes(
    router: &mut ParetoRouter,
    grid: &CostGrid,
    vessel: VesselProfile,
    config: &RouterConfig,
    start: Point,
    goal: Point,
    control: &SearchControl,
) -> Result<RouteSet, PlanError> {
    let pather = GridPather::new(grid, vessel, config);
    let ids = router.pareto_frontier_with(&pather, start, goal, control)?.to_vec();
    if ids.is_empty() {
        return Err(PlanError::NoFeasibleRoute { start, goal });
    }
    let router = &*router;
    let routes = ids
        .into_iter()
        .filter_map(|id| {
            let cost = router.cost(id)?;
            Some(ParetoRoute {
                cost,
                cells: reconstruct(router, id),
            })
        })
        .collect();
    Ok(RouteSet { start, goal, routes })
}
