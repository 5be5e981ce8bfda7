//! Vessel profiles and their clamp policy.
//!
//! Every profile field ends up as a divisor or a multiplier in the edge
//! cost formulas. The router only ever sees [`VesselProfile::clamped`]
//! values, so a zero, negative or non-finite field can never produce a
//! division by zero or an unbounded cost.

/// Smallest value any profile field may take once clamped.
pub const MIN_PROFILE_VALUE: f64 = 0.1;

/// Errors reported by [`VesselProfile::strict`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum VesselError {
    /// A field is zero, negative, or not a finite number.
    #[error("vessel {field} must be a positive finite number, got {value}")]
    InvalidParameter { field: &'static str, value: f64 },
}

/// Performance characteristics of a ship.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VesselProfile {
    /// Cells per unit time in open water.
    pub base_speed: f64,
    /// Fuel burnt per unit distance in open water.
    pub base_fuel_rate: f64,
    /// Resistance to weather; divides the weather penalties.
    pub durability: f64,
}

impl VesselProfile {
    /// Create a profile. Fields are stored as given; use
    /// [`clamped`](Self::clamped) or [`strict`](Self::strict) before
    /// using them in cost formulas.
    pub const fn new(base_speed: f64, base_fuel_rate: f64, durability: f64) -> Self {
        Self {
            base_speed,
            base_fuel_rate,
            durability,
        }
    }

    /// Create a profile, rejecting any field that is not a positive finite
    /// number.
    pub fn strict(base_speed: f64, base_fuel_rate: f64, durability: f64) -> Result<Self, VesselError> {
        let profile = Self::new(base_speed, base_fuel_rate, durability);
        for (field, value) in profile.fields() {
            if !(value.is_finite() && value > 0.0) {
                return Err(VesselError::InvalidParameter { field, value });
            }
        }
        Ok(profile)
    }

    /// A copy with every field raised to at least [`MIN_PROFILE_VALUE`].
    ///
    /// Non-finite values (NaN and both infinities) are treated as the
    /// minimum, so every cost term stays finite.
    pub fn clamped(self) -> Self {
        let out = Self::new(
            clamp_field(self.base_speed),
            clamp_field(self.base_fuel_rate),
            clamp_field(self.durability),
        );
        if out != self {
            log::warn!("vessel profile {self:?} clamped to {out:?}");
        }
        out
    }

    /// Whether [`clamped`](Self::clamped) would leave the profile unchanged.
    pub fn is_within_bounds(&self) -> bool {
        self.fields()
            .iter()
            .all(|&(_, v)| clamp_field(v) == v)
    }

    fn fields(&self) -> [(&'static str, f64); 3] {
        [
            ("base_speed", self.base_speed),
            ("base_fuel_rate", self.base_fuel_rate),
            ("durability", self.durability),
        ]
    }
}

impl Default for VesselProfile {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

#[inline]
fn clamp_field(v: f64) -> f64 {
    if v.is_finite() { v.max(MIN_PROFILE_VALUE) } else { MIN_PROFILE_VALUE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_raises_small_and_negative_fields() {
        let p = VesselProfile::new(0.0, -3.0, 0.05).clamped();
        assert_eq!(p, VesselProfile::new(0.1, 0.1, 0.1));
    }

    #[test]
    fn clamp_keeps_valid_fields() {
        let p = VesselProfile::new(12.5, 0.1, 3.0);
        assert!(p.is_within_bounds());
        assert_eq!(p.clamped(), p);
    }

    #[test]
    fn clamp_maps_nan_to_minimum() {
        let p = VesselProfile::new(f64::NAN, 1.0, 1.0).clamped();
        assert_eq!(p.base_speed, MIN_PROFILE_VALUE);
    }

    #[test]
    fn clamp_maps_infinities_to_minimum() {
        let p = VesselProfile::new(1.0, f64::INFINITY, f64::NEG_INFINITY);
        assert!(!p.is_within_bounds());
        let p = p.clamped();
        assert_eq!(p, VesselProfile::new(1.0, MIN_PROFILE_VALUE, MIN_PROFILE_VALUE));
        assert!(p.is_within_bounds());
    }

    #[test]
    fn strict_rejects_non_positive() {
        let err = VesselProfile::strict(1.0, 0.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            VesselError::InvalidParameter {
                field: "base_fuel_rate",
                value: 0.0
            }
        );
        assert!(err.to_string().contains("base_fuel_rate"));
        assert!(VesselProfile::strict(1.0, 1.0, f64::INFINITY).is_err());
        assert!(VesselProfile::strict(-1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn strict_accepts_small_positive_values() {
        // Strict only rejects; it does not apply the clamp floor.
        let p = VesselProfile::strict(0.05, 1.0, 1.0).unwrap();
        assert!(!p.is_within_bounds());
        assert_eq!(p.clamped().base_speed, MIN_PROFILE_VALUE);
    }
}
