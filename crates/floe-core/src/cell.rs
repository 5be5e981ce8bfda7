//! The [`Cell`] type: per-cell cost attributes of a classified chart.

/// Cost attributes of one grid cell.
///
/// Attributes are set once by terrain classification. `navigable` may later
/// be cleared (never set) by the connectivity filter.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Baseline hazard plus noise, `≥ 0`.
    pub risk: f64,
    /// Duration multiplier, `≥ 1`.
    pub time: f64,
    /// Fuel consumption multiplier, `≥ 1`.
    pub fuel: f64,
    /// Environmental severity, `≥ 0`.
    pub weather: f64,
    pub navigable: bool,
}

impl Cell {
    /// A navigable cell with the given risk and neutral multipliers and no
    /// weather. Handy for synthetic grids.
    #[inline]
    pub const fn uniform(risk: f64) -> Self {
        Self {
            risk,
            time: 1.0,
            fuel: 1.0,
            weather: 0.0,
            navigable: true,
        }
    }

    /// A non-navigable copy of `self`.
    #[inline]
    pub const fn blocked(mut self) -> Self {
        self.navigable = false;
        self
    }

    /// Set the time multiplier (builder).
    #[inline]
    pub const fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Set the fuel multiplier (builder).
    #[inline]
    pub const fn with_fuel(mut self, fuel: f64) -> Self {
        self.fuel = fuel;
        self
    }

    /// Set the weather severity (builder).
    #[inline]
    pub const fn with_weather(mut self, weather: f64) -> Self {
        self.weather = weather;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}
