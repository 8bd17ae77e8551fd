//! Per-region movement quality derived from a region's flags and score.
//!
//! Each built-in region maps its metrics onto the pattern a deviation in that
//! metric indicates. Patterns are checked in the order compensatory,
//! restricted, hypermobile; a region with none of those flags that still
//! scores below its cut-off is restricted.

use crate::core::{metrics, regions};
use crate::scoring::FunctionalScore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score below which a region without a specific finding counts as restricted.
pub const DEFAULT_RESTRICTED_BELOW: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    Normal,
    Compensatory,
    Restricted,
    Hypermobile,
}

impl MovementPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementPattern::Normal => "normal",
            MovementPattern::Compensatory => "compensatory",
            MovementPattern::Restricted => "restricted",
            MovementPattern::Hypermobile => "hypermobile",
        }
    }
}

impl fmt::Display for MovementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementQuality {
    pub region: String,
    pub pattern: MovementPattern,
    /// Flagged metrics behind the pattern, in flag order
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct MovementRule {
    pub region: &'static str,
    pub compensatory: &'static [&'static str],
    pub restricted: &'static [&'static str],
    pub hypermobile: &'static [&'static str],
    pub restricted_below: f64,
}

impl MovementRule {
    const fn fallback() -> Self {
        Self {
            region: "",
            compensatory: &[],
            restricted: &[],
            hypermobile: &[],
            restricted_below: DEFAULT_RESTRICTED_BELOW,
        }
    }
}

pub const MOVEMENT_RULES: &[MovementRule] = &[
    MovementRule {
        region: regions::CERVICAL,
        compensatory: &[metrics::FORWARD_HEAD_RATIO, metrics::HEAD_LATERAL_TILT],
        restricted: &[metrics::NECK_INCLINATION],
        hypermobile: &[],
        restricted_below: 70.0,
    },
    MovementRule {
        region: regions::SHOULDER,
        compensatory: &[
            metrics::LEFT_SHOULDER_PROTRACTION,
            metrics::RIGHT_SHOULDER_PROTRACTION,
            metrics::SCAPULAR_ASYMMETRY,
        ],
        restricted: &[metrics::LEFT_ELBOW_FLEXION, metrics::RIGHT_ELBOW_FLEXION],
        hypermobile: &[],
        restricted_below: 70.0,
    },
    MovementRule {
        region: regions::SPINAL,
        compensatory: &[metrics::LATERAL_SPINAL_TILT],
        restricted: &[metrics::SAGITTAL_CURVATURE],
        hypermobile: &[],
        restricted_below: 60.0,
    },
    MovementRule {
        region: regions::PELVIC,
        compensatory: &[
            metrics::PELVIC_TILT,
            metrics::LEFT_PELVIC_SAGITTAL_TILT,
            metrics::RIGHT_PELVIC_SAGITTAL_TILT,
        ],
        restricted: &[],
        hypermobile: &[],
        restricted_below: 70.0,
    },
    MovementRule {
        region: regions::LOWER_EXTREMITY,
        compensatory: &[metrics::KNEE_SYMMETRY],
        restricted: &[metrics::LEFT_KNEE_FLEXION, metrics::RIGHT_KNEE_FLEXION],
        hypermobile: &[metrics::LEFT_KNEE_VALGUS, metrics::RIGHT_KNEE_VALGUS],
        restricted_below: 70.0,
    },
];

/// Rule for `region`; regions without one are judged by score alone.
pub fn movement_rule(region: &str) -> MovementRule {
    MOVEMENT_RULES
        .iter()
        .find(|rule| rule.region == region)
        .copied()
        .unwrap_or_else(MovementRule::fallback)
}

fn flagged_in(score: &FunctionalScore, group: &[&str]) -> Vec<String> {
    score
        .flags
        .iter()
        .filter(|flag| group.iter().any(|metric| *metric == flag.metric))
        .map(|flag| flag.metric.clone())
        .collect()
}

pub fn classify_movement(score: &FunctionalScore) -> MovementQuality {
    let rule = movement_rule(&score.region);

    let (pattern, metrics) = [
        (MovementPattern::Compensatory, rule.compensatory),
        (MovementPattern::Restricted, rule.restricted),
        (MovementPattern::Hypermobile, rule.hypermobile),
    ]
    .into_iter()
    .map(|(pattern, group)| (pattern, flagged_in(score, group)))
    .find(|(_, metrics)| !metrics.is_empty())
    .unwrap_or_else(|| {
        if score.score < rule.restricted_below {
            let all = score.flags.iter().map(|flag| flag.metric.clone()).collect();
            (MovementPattern::Restricted, all)
        } else {
            (MovementPattern::Normal, Vec::new())
        }
    });

    MovementQuality {
        region: score.region.clone(),
        pattern,
        metrics,
    }
}

/// One entry per assessed region, in score order.
pub fn assess_movement_quality(scores: &[FunctionalScore]) -> Vec<MovementQuality> {
    scores.iter().map(classify_movement).collect()
}
