use floe_core::Point;

const CARDINAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

const ALL: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

/// Grid adjacency used when expanding a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Up, right, down, left.
    #[default]
    Four,
    /// Cardinal plus diagonal neighbors.
    Eight,
}

impl Connectivity {
    /// Offsets of the neighbors of a cell.
    #[inline]
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Self::Four => &CARDINAL,
            Self::Eight => &ALL,
        }
    }

    /// Append the neighbors of `p` for which `keep` returns `true`.
    pub fn neighbors_into(self, p: Point, buf: &mut Vec<Point>, keep: impl Fn(Point) -> bool) {
        for &d in self.offsets() {
            let n = p + d;
            if keep(n) {
                buf.push(n);
            }
        }
    }
}
