//! Search and refinement parameters.

use crate::neighbors::Connectivity;

/// Parameters of the Pareto search and of the edge cost model.
///
/// ```
/// use floe_paths::{Connectivity, RouterConfig};
///
/// let config = RouterConfig::default()
///     .with_blend(0.0, 0.0)
///     .with_connectivity(Connectivity::Eight);
/// assert_eq!(config.alpha, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Weight of `weather / durability` in the risk increment.
    pub alpha: f64,
    /// Weight of `weather / durability` in the fuel increment.
    pub gamma: f64,
    pub connectivity: Connectivity,
    /// Order the queue by an admissible time-to-goal estimate (A*-style).
    pub heuristic: bool,
    /// Number of queue pops between two cancellation/deadline checks.
    pub interrupt_check_interval: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            gamma: 0.3,
            connectivity: Connectivity::Four,
            heuristic: true,
            interrupt_check_interval: 256,
        }
    }
}

impl RouterConfig {
    pub fn with_blend(mut self, alpha: f64, gamma: f64) -> Self {
        self.alpha = alpha;
        self.gamma = gamma;
        self
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_heuristic(mut self, heuristic: bool) -> Self {
        self.heuristic = heuristic;
        self
    }
}

/// Parameters of path smoothing and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RefineConfig {
    /// Curve samples emitted per spline segment.
    pub samples_per_segment: u32,
    /// Validate every n-th curve sample (1 = all of them). The final point
    /// is always validated.
    pub validation_stride: usize,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            samples_per_segment: 10,
            validation_stride: 1,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn router_config_round_trip() {
        let cfg = RouterConfig::default().with_connectivity(Connectivity::Eight);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RouterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn refine_config_defaults_missing_fields() {
        let cfg: RefineConfig = serde_json::from_str(r#"{"validation_stride": 4}"#).unwrap();
        assert_eq!(cfg.validation_stride, 4);
        assert_eq!(cfg.samples_per_segment, 10);
    }
}
