//! Cost vectors and Pareto dominance.
//!
//! All three objectives are minimized. `a` dominates `b` when it is no
//! worse in every objective and strictly better in at least one; this is a
//! strict partial order (irreflexive, asymmetric, transitive).

use std::fmt;
use std::ops::Add;

/// One of the three optimized objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Objective {
    Risk,
    Time,
    Fuel,
}

impl Objective {
    pub const ALL: [Objective; 3] = [Objective::Risk, Objective::Time, Objective::Fuel];
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Risk => "risk",
            Self::Time => "time",
            Self::Fuel => "fuel",
        })
    }
}

/// Accumulated `(risk, time, fuel)` cost of a partial path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostVector {
    pub risk: f64,
    pub time: f64,
    pub fuel: f64,
}

impl CostVector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(risk: f64, time: f64, fuel: f64) -> Self {
        Self { risk, time, fuel }
    }

    #[inline]
    pub fn get(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Risk => self.risk,
            Objective::Time => self.time,
            Objective::Fuel => self.fuel,
        }
    }

    /// Whether `self` dominates `other`.
    #[inline]
    pub fn dominates(&self, other: &CostVector) -> bool {
        dominates(self, other)
    }

    /// Whether `self` dominates `other` or equals it. A frontier admits a
    /// candidate only if no member covers it, which keeps a single
    /// representative per cost vector.
    #[inline]
    pub fn covers(&self, other: &CostVector) -> bool {
        self == other || dominates(self, other)
    }

    /// Lexicographic comparison in the given objective order, with a total
    /// order on floats.
    pub fn cmp_by(&self, other: &CostVector, order: [Objective; 3]) -> std::cmp::Ordering {
        order
            .iter()
            .map(|&o| self.get(o).total_cmp(&other.get(o)))
            .find(|ord| ord.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

impl Add for CostVector {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.risk + rhs.risk, self.time + rhs.time, self.fuel + rhs.fuel)
    }
}

impl fmt::Display for CostVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "risk {:.2}, time {:.2}, fuel {:.2}",
            self.risk, self.time, self.fuel
        )
    }
}

/// Checks if `a` dominates `b`: `a` is no worse in every objective and
/// strictly better in at least one.
#[inline]
pub fn dominates(a: &CostVector, b: &CostVector) -> bool {
    a.risk <= b.risk
        && a.time <= b.time
        && a.fuel <= b.fuel
        && (a.risk < b.risk || a.time < b.time || a.fuel < b.fuel)
}
