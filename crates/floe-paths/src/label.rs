//! Append-only label arena.
//!
//! Labels form a tree through their parent links: many labels may share one
//! predecessor. Labels are addressed by stable [`LabelId`] indices and never
//! change once pushed. Whether a label still belongs to its node's frontier
//! is tracked beside it, not in it.

use floe_core::Point;

use crate::cost::CostVector;

/// Stable index of a [`Label`] in the arena of one search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(u32);

impl LabelId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A partial path: its accumulated cost, the cell it ends at, and the label
/// it extends (`None` for the start label).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub cost: CostVector,
    pub node: Point,
    pub parent: Option<LabelId>,
}

#[derive(Debug, Default)]
pub(crate) struct LabelArena {
    labels: Vec<Label>,
    live: Vec<bool>,
}

impl LabelArena {
    /// Drop every label, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.labels.clear();
        self.live.clear();
    }

    pub(crate) fn push(&mut self, label: Label) -> LabelId {
        let id = LabelId(self.labels.len() as u32);
        self.labels.push(label);
        self.live.push(true);
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: LabelId) -> &Label {
        &self.labels[id.index()]
    }

    /// Look up a label that may come from another search.
    #[inline]
    pub(crate) fn try_get(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(id.index())
    }

    #[inline]
    pub(crate) fn cost(&self, id: LabelId) -> &CostVector {
        &self.labels[id.index()].cost
    }

    /// Mark a label as removed from its frontier. Its record stays in place
    /// for any descendant that still points at it.
    #[inline]
    pub(crate) fn retire(&mut self, id: LabelId) {
        self.live[id.index()] = false;
    }

    #[inline]
    pub(crate) fn is_live(&self, id: LabelId) -> bool {
        self.live[id.index()]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_retire() {
        let mut arena = LabelArena::default();
        let root = arena.push(Label {
            cost: CostVector::ZERO,
            node: Point::new(0, 0),
            parent: None,
        });
        let child = arena.push(Label {
            cost: CostVector::new(1.0, 1.0, 1.0),
            node: Point::new(1, 0),
            parent: Some(root),
        });
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(child).parent, Some(root));
        arena.retire(root);
        assert!(!arena.is_live(root));
        assert!(arena.is_live(child));
        // Retired labels remain addressable.
        assert_eq!(arena.get(root).node, Point::new(0, 0));
        arena.clear();
        assert!(arena.try_get(child).is_none());
    }
}
