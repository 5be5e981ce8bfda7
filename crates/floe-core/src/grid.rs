//! The [`Grid`] type, a fixed-size, row-major 2D array.
//!
//! Unlike a shared-buffer view, a `Grid` owns its cells outright so that a
//! classified chart can be moved into an `Arc` and searched from a worker
//! thread.

use crate::cell::Cell;
use crate::geom::{Point, Range};

/// The per-cell cost model produced by terrain classification.
pub type CostGrid = Grid<Cell>;

/// A fixed-size 2D grid of `T`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Clone> Grid<T> {
    /// Create a grid of the given dimensions with every cell set to `fill`.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            cells: vec![fill; (w as usize) * (h as usize)],
            width: w,
            height: h,
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` at every point, in row-major order.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        let cells = Range::sized(w, h).iter().map(&mut f).collect();
        Self {
            cells,
            width: w,
            height: h,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding range of the grid, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::sized(self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + p.x as usize)
    }

    /// Point at a flat row-major index.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width.max(1) as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).map(move |i| &mut self.cells[i])
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }

    /// Row-major slice of all cells.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Grid<Cell> {
    /// Whether `p` is inside the grid and navigable.
    #[inline]
    pub fn is_navigable(&self, p: Point) -> bool {
        self.get(p).is_some_and(|c| c.navigable)
    }

    /// Number of navigable cells.
    pub fn navigable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.navigable).count()
    }

    /// Whether `a` and `b` touch only at a corner squeezed between two
    /// blocked cells. A vessel cannot pass diagonally between them.
    pub fn is_pinched(&self, a: Point, b: Point) -> bool {
        a.is_diagonal_to(b)
            && !self.is_navigable(Point::new(b.x, a.y))
            && !self.is_navigable(Point::new(a.x, b.y))
    }

    /// Clear the navigability flag of `p`. No-op if out of bounds.
    ///
    /// Navigability can only ever be removed after classification.
    pub fn demote(&mut self, p: Point) {
        if let Some(c) = self.get_mut(p) {
            c.navigable = false;
        }
    }
}
