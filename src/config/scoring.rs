//! Scoring weight configuration for functional scores.

use crate::core::metrics;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Relative weight of each metric inside its region's score.
///
/// ```toml
/// [weights]
/// default = 1.0
/// forward_head_ratio = 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for metrics without an explicit entry
    #[serde(rename = "default", default = "default_metric_weight")]
    pub default_weight: f64,

    #[serde(flatten)]
    pub metrics: BTreeMap<String, f64>,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        let metrics = [
            (metrics::FORWARD_HEAD_RATIO, 3.0),
            (metrics::SHOULDER_TILT, 1.5),
            (metrics::LATERAL_SPINAL_TILT, 1.5),
            (metrics::PELVIC_TILT, 1.5),
            (metrics::KNEE_SYMMETRY, 1.5),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        Self {
            default_weight: default_metric_weight(),
            metrics,
        }
    }
}

impl ScoringWeights {
    pub fn weight(&self, metric: &str) -> f64 {
        self.metrics
            .get(metric)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Apply per-metric overrides; the default weight is replaced too.
    pub fn merge(&mut self, overrides: &ScoringWeights) {
        self.default_weight = overrides.default_weight;
        self.metrics
            .extend(overrides.metrics.iter().map(|(k, v)| (k.clone(), *v)));
    }

    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && weight >= 0.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Self::is_valid_weight(self.default_weight) {
            return Err(ConfigError::invalid(
                "weights.default",
                "weight must be a finite, non-negative number",
            ));
        }

        match self
            .metrics
            .iter()
            .find(|(_, weight)| !Self::is_valid_weight(**weight))
        {
            Some((name, _)) => Err(ConfigError::invalid(
                format!("weights.{name}"),
                "weight must be a finite, non-negative number",
            )),
            None => Ok(()),
        }
    }
}

fn default_metric_weight() -> f64 {
    1.0
}
