//! Multi-region compensation patterns recognised from a report's flags.
//!
//! A pattern is present when every one of its metric groups has at least one
//! flagged metric. Patterns are descriptive only and never change scores.

use crate::classification::DeviationFlag;
use crate::core::metrics;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationKind {
    UpperCrossed,
    LowerCrossed,
    LateralChain,
}

impl CompensationKind {
    pub const ALL: [CompensationKind; 3] = [
        CompensationKind::UpperCrossed,
        CompensationKind::LowerCrossed,
        CompensationKind::LateralChain,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            CompensationKind::UpperCrossed => "upper crossed syndrome",
            CompensationKind::LowerCrossed => "lower crossed syndrome",
            CompensationKind::LateralChain => "lateral chain dysfunction",
        }
    }

    fn groups(&self) -> &'static [&'static [&'static str]] {
        match self {
            CompensationKind::UpperCrossed => &[
                &[metrics::FORWARD_HEAD_RATIO],
                &[
                    metrics::LEFT_SHOULDER_PROTRACTION,
                    metrics::RIGHT_SHOULDER_PROTRACTION,
                ],
            ],
            CompensationKind::LowerCrossed => &[
                &[
                    metrics::LEFT_PELVIC_SAGITTAL_TILT,
                    metrics::RIGHT_PELVIC_SAGITTAL_TILT,
                ],
                &[metrics::SAGITTAL_CURVATURE],
            ],
            CompensationKind::LateralChain => &[
                &[metrics::SHOULDER_TILT, metrics::SCAPULAR_ASYMMETRY],
                &[metrics::PELVIC_TILT],
            ],
        }
    }
}

impl fmt::Display for CompensationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationPattern {
    pub kind: CompensationKind,
    /// Flagged metrics that satisfied the pattern, in flag order
    pub metrics: Vec<String>,
}

fn in_group(group: &[&str], flag: &DeviationFlag) -> bool {
    group.iter().any(|metric| *metric == flag.metric)
}

fn match_pattern(kind: CompensationKind, flags: &[DeviationFlag]) -> Option<CompensationPattern> {
    let groups = kind.groups();
    if !groups
        .iter()
        .all(|group| flags.iter().any(|flag| in_group(group, flag)))
    {
        return None;
    }

    let metrics = flags
        .iter()
        .filter(|flag| groups.iter().any(|group| in_group(group, flag)))
        .map(|flag| flag.metric.clone())
        .collect();
    Some(CompensationPattern { kind, metrics })
}

pub fn detect_patterns(flags: &[DeviationFlag]) -> Vec<CompensationPattern> {
    CompensationKind::ALL
        .into_iter()
        .filter_map(|kind| match_pattern(kind, flags))
        .collect()
}
