//! Regional functional scores in [0, 100].
//!
//! Each scored metric contributes a penalty proportional to how far it sits
//! outside its normal band, measured in normal-band half-widths and capped at
//! one, then multiplied by the metric's weight:
//!
//! ```text
//! p_i   = min(1, d_i / h_i) * w_i
//! score = max(0, 100 - 100 * sum(p_i) / sum(w_i))
//! ```
//!
//! Informational metrics (no threshold table) are ignored. A region with no
//! scorable measurement has no score at all.

use crate::classification::{DeviationFlag, Severity};
use crate::config::{ScoringWeights, ThresholdTable};
use crate::core::AngleMeasurement;
use crate::errors::AssessmentError;
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalScore {
    pub region: String,
    pub score: f64,
    /// Number of measurements that entered the score
    pub scored_metrics: usize,
    pub flags: Vec<DeviationFlag>,
}

impl FunctionalScore {
    pub fn worst_severity(&self) -> Severity {
        self.flags
            .iter()
            .map(|flag| flag.severity)
            .max()
            .unwrap_or(Severity::Normal)
    }
}

pub struct FunctionalScorer<'a> {
    thresholds: &'a ThresholdTable,
    weights: &'a ScoringWeights,
}

impl<'a> FunctionalScorer<'a> {
    pub fn new(thresholds: &'a ThresholdTable, weights: &'a ScoringWeights) -> Self {
        Self {
            thresholds,
            weights,
        }
    }

    /// Weighted penalty for one measurement, `None` when it is informational.
    ///
    /// The penalty grows from the nearest normal-band bound, so a value lying
    /// exactly on that bound contributes nothing even though the classifier
    /// flags it as mild. Flags and scores can therefore disagree at the bound:
    /// a region can carry a mild flag and still score 100.
    pub fn penalty(&self, measurement: &AngleMeasurement) -> Option<(f64, f64)> {
        let normal = self.thresholds.get(&measurement.name)?.normal;
        let weight = self.weights.weight(&measurement.name);
        let deviation = normal.deviation(measurement.value);
        let relative = (deviation / normal.half_width()).min(1.0);
        Some((relative * weight, weight))
    }

    /// Score one region. Fails with `InsufficientLandmarks` when none of the
    /// measurements can be scored.
    pub fn score_region(
        &self,
        region: &str,
        measurements: &[AngleMeasurement],
        flags: &[DeviationFlag],
    ) -> Result<FunctionalScore, AssessmentError> {
        let penalties: Vec<(f64, f64)> = measurements
            .iter()
            .filter_map(|measurement| self.penalty(measurement))
            .collect();

        if penalties.is_empty() {
            return Err(AssessmentError::insufficient(region));
        }

        let (penalty, total_weight) = penalties
            .iter()
            .fold((0.0, 0.0), |(p, w), (pi, wi)| (p + pi, w + wi));

        // All-zero weights carry no information, so nothing is lost
        let score = if total_weight > 0.0 {
            (MAX_SCORE - MAX_SCORE * penalty / total_weight).clamp(0.0, MAX_SCORE)
        } else {
            MAX_SCORE
        };

        Ok(FunctionalScore {
            region: region.to_string(),
            score,
            scored_metrics: penalties.len(),
            flags: flags
                .iter()
                .filter(|flag| flag.region == region)
                .cloned()
                .collect(),
        })
    }
}
