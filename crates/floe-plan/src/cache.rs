//! Explicit cache of classified and filtered cost grids.

use std::collections::HashMap;
use std::sync::Arc;

use floe_chart::ChartId;
use floe_core::CostGrid;

/// Identifies one classification: which chart, at which grid spacing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartKey {
    pub chart: ChartId,
    pub spacing: u32,
}

impl ChartKey {
    pub fn new(chart: ChartId, spacing: u32) -> Self {
        Self { chart, spacing }
    }
}

/// Classified grids keyed by [`ChartKey`].
///
/// Classification draws random noise, so a cached grid is not what a fresh
/// classification would produce. Entries live until they are invalidated;
/// callers that change a chart's pixels or the classifier settings must
/// invalidate the affected keys.
#[derive(Debug, Default)]
pub struct ChartCache {
    grids: HashMap<ChartKey, Arc<CostGrid>>,
}

impl ChartCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ChartKey) -> Option<Arc<CostGrid>> {
        self.grids.get(key).cloned()
    }

    /// The grid for `key`, computing and storing it with `f` on a miss.
    pub fn get_or_insert_with(&mut self, key: ChartKey, f: impl FnOnce() -> CostGrid) -> Arc<CostGrid> {
        if let Some(grid) = self.grids.get(&key) {
            log::debug!("chart cache hit for {} at spacing {}", key.chart, key.spacing);
            return Arc::clone(grid);
        }
        log::debug!("chart cache miss for {} at spacing {}", key.chart, key.spacing);
        let grid = Arc::new(f());
        self.grids.insert(key, Arc::clone(&grid));
        grid
    }

    /// Store `grid` under `key`, returning the entry it replaces.
    pub fn insert(&mut self, key: ChartKey, grid: CostGrid) -> Option<Arc<CostGrid>> {
        self.grids.insert(key, Arc::new(grid))
    }

    /// Drop the entry for `key`. Returns whether there was one.
    pub fn invalidate(&mut self, key: &ChartKey) -> bool {
        self.grids.remove(key).is_some()
    }

    /// Drop every entry of `chart`, whatever its spacing. Returns the number
    /// of dropped entries.
    pub fn invalidate_chart(&mut self, chart: ChartId) -> usize {
        let before = self.grids.len();
        self.grids.retain(|k, _| k.chart != chart);
        before - self.grids.len()
    }

    pub fn clear(&mut self) {
        self.grids.clear();
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::Cell;

    #[test]
    fn computes_once_per_key() {
        let mut cache = ChartCache::new();
        let key = ChartKey::new(ChartId(1), 10);
        let mut calls = 0;
        let a = cache.get_or_insert_with(key, || {
            calls += 1;
            CostGrid::new(2, 2, Cell::default())
        });
        let b = cache.get_or_insert_with(key, || {
            calls += 1;
            CostGrid::new(3, 3, Cell::default())
        });
        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn spacing_is_part_of_the_key() {
        let mut cache = ChartCache::new();
        cache.insert(ChartKey::new(ChartId(1), 10), CostGrid::new(1, 1, Cell::default()));
        assert!(cache.get(&ChartKey::new(ChartId(1), 20)).is_none());
        assert!(cache.get(&ChartKey::new(ChartId(1), 10)).is_some());
    }

    #[test]
    fn invalidation() {
        let mut cache = ChartCache::new();
        for (chart, spacing) in [(1, 10), (1, 20), (2, 10)] {
            cache.insert(ChartKey::new(ChartId(chart), spacing), CostGrid::new(1, 1, Cell::default()));
        }
        assert!(cache.invalidate(&ChartKey::new(ChartId(2), 10)));
        assert!(!cache.invalidate(&ChartKey::new(ChartId(2), 10)));
        assert_eq!(cache.invalidate_chart(ChartId(1)), 2);
        assert!(cache.is_empty());
    }
}
