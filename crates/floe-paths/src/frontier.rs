//! Per-node Pareto frontiers.

use crate::cost::CostVector;
use crate::label::{LabelArena, LabelId};

/// The non-dominated labels at one node.
///
/// No member dominates another, and no two members share a cost vector.
/// A frontier remembers the search generation it was last used in so that
/// stale frontiers can be emptied lazily.
#[derive(Debug, Default, Clone)]
pub(crate) struct Frontier {
    ids: Vec<LabelId>,
    generation: u32,
}

impl Frontier {
    /// Empty the frontier if it was last touched in another generation.
    #[inline]
    pub(crate) fn refresh(&mut self, generation: u32) {
        if self.generation != generation {
            self.ids.clear();
            self.generation = generation;
        }
    }

    #[inline]
    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub(crate) fn ids(&self) -> &[LabelId] {
        &self.ids
    }

    /// Whether some member dominates or equals `cost`.
    pub(crate) fn covers(&self, arena: &LabelArena, cost: &CostVector) -> bool {
        self.ids.iter().any(|&id| arena.cost(id).covers(cost))
    }

    /// Whether some member strictly dominates `cost`.
    pub(crate) fn dominates(&self, arena: &LabelArena, cost: &CostVector) -> bool {
        self.ids.iter().any(|&id| arena.cost(id).dominates(cost))
    }

    /// Insert `id`, retiring every member its cost dominates.
    ///
    /// The caller must have checked that the frontier does not cover the
    /// new label.
    pub(crate) fn admit(&mut self, arena: &mut LabelArena, id: LabelId) {
        let cost = *arena.cost(id);
        self.ids.retain(|&other| {
            let keep = !cost.dominates(arena.cost(other));
            if !keep {
                arena.retire(other);
            }
            keep
        });
        self.ids.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use floe_core::Point;

    fn push(arena: &mut LabelArena, r: f64, t: f64, f: f64) -> LabelId {
        arena.push(Label {
            cost: CostVector::new(r, t, f),
            node: Point::new(0, 0),
            parent: None,
        })
    }

    #[test]
    fn admit_removes_dominated_members() {
        let mut arena = LabelArena::default();
        let mut fr = Frontier::default();
        let a = push(&mut arena, 2.0, 2.0, 2.0);
        let b = push(&mut arena, 1.0, 5.0, 1.0);
        fr.admit(&mut arena, a);
        fr.admit(&mut arena, b);
        assert_eq!(fr.ids(), &[a, b]);

        let c = push(&mut arena, 1.0, 1.0, 1.0);
        assert!(!fr.covers(&arena, arena.cost(c)));
        fr.admit(&mut arena, c);
        assert_eq!(fr.ids(), &[c]);
        assert!(!arena.is_live(a));
        assert!(!arena.is_live(b));
        assert!(arena.is_live(c));
    }

    #[test]
    fn equal_cost_is_covered() {
        let mut arena = LabelArena::default();
        let mut fr = Frontier::default();
        let a = push(&mut arena, 1.0, 2.0, 3.0);
        fr.admit(&mut arena, a);
        let dup = CostVector::new(1.0, 2.0, 3.0);
        assert!(fr.covers(&arena, &dup));
        assert!(!fr.dominates(&arena, &dup));
        assert!(fr.dominates(&arena, &CostVector::new(1.0, 2.0, 3.5)));
    }

    #[test]
    fn refresh_clears_stale_generation() {
        let mut arena = LabelArena::default();
        let mut fr = Frontier::default();
        fr.refresh(1);
        let a = push(&mut arena, 1.0, 1.0, 1.0);
        fr.admit(&mut arena, a);
        fr.refresh(1);
        assert_eq!(fr.ids().len(), 1);
        fr.refresh(2);
        assert!(fr.ids().is_empty());
    }
}
