//! Multi-objective label-setting search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::{Duration, Instant};

use floe_core::{Point, Range};

use crate::cost::{CostVector, Objective};
use crate::frontier::Frontier;
use crate::label::{Label, LabelArena, LabelId};
use crate::traits::VectorPather;

/// Reason a search stopped before exhausting its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchInterrupted {
    #[error("search cancelled")]
    Cancelled,
    #[error("search deadline exceeded")]
    DeadlineExceeded,
}

/// Cooperative cancellation and deadline for a search.
///
/// The default control never interrupts.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Report whether the search must stop now.
    pub fn check(&self) -> Result<(), SearchInterrupted> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|c| c.load(AtomicOrdering::Relaxed))
        {
            return Err(SearchInterrupted::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(SearchInterrupted::DeadlineExceeded);
        }
        Ok(())
    }
}

/// Counters of the last search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Labels admitted to some frontier, the start label included.
    pub labels_created: usize,
    pub labels_expanded: usize,
    /// Candidates discarded because a frontier member dominated or equaled
    /// them.
    pub labels_rejected: usize,
    /// Labels discarded because a goal label dominated them.
    pub labels_pruned: usize,
    /// Queue entries skipped because their label had left its frontier.
    pub labels_stale: usize,
    pub goal_frontier: usize,
}

/// Queue entry ordered by `(risk, time + estimate, fuel)`, then insertion
/// order.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    risk: f64,
    time: f64,
    fuel: f64,
    seq: u64,
    id: LabelId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest key first.
        other
            .risk
            .total_cmp(&self.risk)
            .then_with(|| other.time.total_cmp(&self.time))
            .then_with(|| other.fuel.total_cmp(&self.fuel))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Pareto route search over a grid rectangle.
///
/// `ParetoRouter` owns the label arena, the per-node frontiers and the open
/// queue so that repeated searches over the same range reuse their
/// allocations. Frontiers are invalidated lazily with a generation counter.
///
/// The queue order only decides which label is processed next. Admission
/// is decided by exact dominance alone, so the returned goal frontier holds
/// every non-dominated cost vector reachable at the goal, one label per
/// distinct vector.
#[derive(Debug)]
pub struct ParetoRouter {
    range: Range,
    width: usize,
    arena: LabelArena,
    frontiers: Vec<Frontier>,
    generation: u32,
    open: BinaryHeap<QueueEntry>,
    seq: u64,
    nbuf: Vec<Point>,
    result: Vec<LabelId>,
    stats: SearchStats,
    check_interval: u32,
}

impl ParetoRouter {
    /// Create a router for the given grid rectangle.
    pub fn new(range: Range) -> Self {
        Self {
            range,
            width: range.width().max(0) as usize,
            arena: LabelArena::default(),
            frontiers: vec![Frontier::default(); range.len()],
            generation: 0,
            open: BinaryHeap::new(),
            seq: 0,
            nbuf: Vec::with_capacity(8),
            result: Vec::new(),
            stats: SearchStats::default(),
            check_interval: 256,
        }
    }

    /// Number of queue pops between two [`SearchControl`] checks. Zero
    /// disables checking.
    pub fn with_check_interval(mut self, interval: u32) -> Self {
        self.check_interval = interval;
        self
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Replace the underlying range. Labels of the previous search are
    /// dropped.
    pub fn set_range(&mut self, range: Range) {
        self.range = range;
        self.width = range.width().max(0) as usize;
        self.frontiers.clear();
        self.frontiers.resize(range.len(), Frontier::default());
        self.generation = 0;
        self.arena.clear();
        self.result.clear();
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        let q = p - self.range.min;
        Some(q.y as usize * self.width + q.x as usize)
    }

    /// Compute the Pareto frontier of routes from `from` to `to`.
    ///
    /// Returns the goal labels sorted lexicographically by
    /// `(risk, time, fuel)`. The slice is empty when `to` cannot be
    /// reached or either endpoint lies outside the range. Labels stay
    /// valid until the next search.
    pub fn pareto_frontier<P: VectorPather>(&mut self, pather: &P, from: Point, to: Point) -> &[LabelId] {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let outcome = self.search(pather, from, to, &SearchControl::default(), &mut nbuf);
        self.nbuf = nbuf;
        debug_assert!(outcome.is_ok());
        &self.result
    }

    /// Like [`pareto_frontier`](Self::pareto_frontier), but checks
    /// `control` periodically and stops early when it asks to.
    ///
    /// An interrupted search leaves no result behind.
    pub fn pareto_frontier_with<P: VectorPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        control: &SearchControl,
    ) -> Result<&[LabelId], SearchInterrupted> {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let outcome = self.search(pather, from, to, control, &mut nbuf);
        self.nbuf = nbuf;
        outcome.inspect_err(|_| self.result.clear())?;
        Ok(&self.result)
    }

    /// A label of the last search.
    #[inline]
    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.arena.try_get(id)
    }

    #[inline]
    pub fn cost(&self, id: LabelId) -> Option<CostVector> {
        self.label(id).map(|l| l.cost)
    }

    /// Counters of the last search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Labels of the frontier at `p` after the last search, or an empty
    /// slice if the search never reached `p`.
    pub fn frontier_at(&self, p: Point) -> &[LabelId] {
        match self.idx(p) {
            Some(i) if self.frontiers[i].generation() == self.generation => self.frontiers[i].ids(),
            _ => &[],
        }
    }

    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: generation 0 is what fresh frontiers carry.
            for f in &mut self.frontiers {
                f.refresh(0);
            }
            self.generation = 1;
        }
        self.generation
    }

    fn enqueue(&mut self, id: LabelId, estimate: f64) {
        let c = *self.arena.cost(id);
        self.seq += 1;
        self.open.push(QueueEntry {
            risk: c.risk,
            time: c.time + estimate,
            fuel: c.fuel,
            seq: self.seq,
            id,
        });
    }

    fn search<P: VectorPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        control: &SearchControl,
        nbuf: &mut Vec<Point>,
    ) -> Result<(), SearchInterrupted> {
        self.arena.clear();
        self.open.clear();
        self.result.clear();
        self.seq = 0;
        self.stats = SearchStats::default();
        let generation = self.next_generation();

        let (Some(si), Some(gi)) = (self.idx(from), self.idx(to)) else {
            log::debug!("pareto search {from} -> {to}: endpoint outside {}", self.range);
            return Ok(());
        };
        self.frontiers[si].refresh(generation);
        self.frontiers[gi].refresh(generation);

        let start = self.arena.push(Label {
            cost: CostVector::ZERO,
            node: from,
            parent: None,
        });
        self.frontiers[si].admit(&mut self.arena, start);
        self.enqueue(start, pather.estimate_time(from, to));

        let mut pops: u32 = 0;
        while let Some(entry) = self.open.pop() {
            pops = pops.wrapping_add(1);
            if self.check_interval > 0 && pops % self.check_interval == 0 {
                control.check()?;
            }

            let id = entry.id;
            if !self.arena.is_live(id) {
                self.stats.labels_stale += 1;
                continue;
            }
            let label = *self.arena.get(id);
            if self.frontiers[gi].dominates(&self.arena, &label.cost) {
                self.stats.labels_pruned += 1;
                continue;
            }
            if label.node == to {
                // Stays in the goal frontier; never extended.
                continue;
            }
            self.stats.labels_expanded += 1;

            nbuf.clear();
            pather.neighbors(label.node, nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let candidate = label.cost + pather.cost(label.node, np);
                if self.frontiers[gi].dominates(&self.arena, &candidate) {
                    self.stats.labels_pruned += 1;
                    continue;
                }
                let frontier = &mut self.frontiers[ni];
                frontier.refresh(generation);
                if frontier.covers(&self.arena, &candidate) {
                    self.stats.labels_rejected += 1;
                    continue;
                }
                let child = self.arena.push(Label {
                    cost: candidate,
                    node: np,
                    parent: Some(id),
                });
                self.frontiers[ni].admit(&mut self.arena, child);
                self.enqueue(child, pather.estimate_time(np, to));
            }
        }

        self.result.extend_from_slice(self.frontiers[gi].ids());
        let arena = &self.arena;
        self.result
            .sort_by(|&a, &b| arena.cost(a).cmp_by(arena.cost(b), Objective::ALL));
        self.stats.labels_created = self.arena.len();
        self.stats.goal_frontier = self.result.len();
        log::debug!(
            "pareto search {from} -> {to}: {} routes, {} labels created, {} expanded, {} rejected, {} pruned, {} stale",
            self.stats.goal_frontier,
            self.stats.labels_created,
            self.stats.labels_expanded,
            self.stats.labels_rejected,
            self.stats.labels_pruned,
            self.stats.labels_stale,
        );
        Ok(())
    }
}
