//! Planner configuration.

use floe_chart::ClassifierConfig;
use floe_paths::{RefineConfig, RouterConfig};

/// Everything a [`Planner`](crate::Planner) needs besides the chart and
/// the vessel.
///
/// With the `serde` feature enabled this loads from JSON; missing fields
/// take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Grid cell edge length in chart pixels.
    pub spacing: u32,
    /// Seed for classification noise. `None` draws from the thread RNG, so
    /// two classifications of the same chart differ.
    pub seed: Option<u64>,
    /// Reject vessel profiles with non-positive fields instead of clamping
    /// them.
    pub strict_vessel: bool,
    pub classifier: ClassifierConfig,
    pub router: RouterConfig,
    pub refine: RefineConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            spacing: 50,
            seed: None,
            strict_vessel: false,
            classifier: ClassifierConfig::default(),
            router: RouterConfig::default(),
            refine: RefineConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strict_vessel(mut self, strict: bool) -> Self {
        self.strict_vessel = strict;
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_router(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }

    pub fn with_refine(mut self, refine: RefineConfig) -> Self {
        self.refine = refine;
        self
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use floe_paths::Connectivity;

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: PlannerConfig =
            serde_json::from_str(r#"{"spacing": 20, "seed": 7, "router": {"connectivity": "Eight"}}"#).unwrap();
        assert_eq!(cfg.spacing, 20);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.router.connectivity, Connectivity::Eight);
        assert_eq!(cfg.router.alpha, 0.5);
        assert_eq!(cfg.refine, RefineConfig::default());
    }

    #[test]
    fn round_trip() {
        let cfg = PlannerConfig::default().with_seed(3).with_spacing(10);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PlannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
