//! Injury risk per body part.
//!
//! A body part's risk follows the worst severity among the flags on its
//! metrics: normal is low, mild is moderate, moderate is high and severe is
//! critical. Parts with no measured metric are left out.

use super::RiskLevel;
use crate::classification::{DeviationFlag, Severity};
use crate::core::{metrics, AngleMeasurement};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Neck,
    Shoulder,
    LowerBack,
    Knee,
}

impl BodyPart {
    pub const ALL: [BodyPart; 4] = [
        BodyPart::Neck,
        BodyPart::Shoulder,
        BodyPart::LowerBack,
        BodyPart::Knee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Neck => "neck",
            BodyPart::Shoulder => "shoulder",
            BodyPart::LowerBack => "lower_back",
            BodyPart::Knee => "knee",
        }
    }

    /// Metrics whose deviations load this body part.
    pub fn metrics(&self) -> &'static [&'static str] {
        match self {
            BodyPart::Neck => &[
                metrics::FORWARD_HEAD_RATIO,
                metrics::NECK_INCLINATION,
                metrics::HEAD_LATERAL_TILT,
            ],
            BodyPart::Shoulder => &[
                metrics::SHOULDER_TILT,
                metrics::SCAPULAR_ASYMMETRY,
                metrics::LEFT_SHOULDER_PROTRACTION,
                metrics::RIGHT_SHOULDER_PROTRACTION,
            ],
            BodyPart::LowerBack => &[
                metrics::SAGITTAL_CURVATURE,
                metrics::LATERAL_SPINAL_TILT,
                metrics::PELVIC_TILT,
                metrics::LEFT_PELVIC_SAGITTAL_TILT,
                metrics::RIGHT_PELVIC_SAGITTAL_TILT,
            ],
            BodyPart::Knee => &[
                metrics::KNEE_SYMMETRY,
                metrics::LEFT_KNEE_VALGUS,
                metrics::RIGHT_KNEE_VALGUS,
                metrics::LEFT_KNEE_FLEXION,
                metrics::RIGHT_KNEE_FLEXION,
            ],
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryRisk {
    pub body_part: BodyPart,
    pub risk_level: RiskLevel,
    /// Flagged metrics that raised the level
    pub metrics: Vec<String>,
}

pub fn risk_for_severity(severity: Severity) -> RiskLevel {
    match severity {
        Severity::Normal => RiskLevel::Low,
        Severity::Mild => RiskLevel::Moderate,
        Severity::Moderate => RiskLevel::High,
        Severity::Severe => RiskLevel::Critical,
    }
}

fn owns(part: BodyPart, metric: &str) -> bool {
    part.metrics().iter().any(|owned| *owned == metric)
}

pub fn assess_injury_risk(
    measurements: &[AngleMeasurement],
    flags: &[DeviationFlag],
) -> Vec<InjuryRisk> {
    BodyPart::ALL
        .iter()
        .filter(|part| measurements.iter().any(|m| owns(**part, &m.name)))
        .map(|part| {
            let relevant: Vec<&DeviationFlag> = flags
                .iter()
                .filter(|flag| owns(*part, &flag.metric))
                .collect();
            let worst = relevant
                .iter()
                .map(|flag| flag.severity)
                .max()
                .unwrap_or(Severity::Normal);

            InjuryRisk {
                body_part: *part,
                risk_level: risk_for_severity(worst),
                metrics: relevant.iter().map(|flag| flag.metric.clone()).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Band;
    use crate::core::MeasurementUnit;
    use pretty_assertions::assert_eq;

    fn measured(name: &str) -> AngleMeasurement {
        AngleMeasurement {
            name: name.to_string(),
            region: "any".to_string(),
            value: 0.0,
            unit: MeasurementUnit::Degrees,
            landmarks: Vec::new(),
            confidence: 1.0,
        }
    }

    fn flag(metric: &str, severity: Severity) -> DeviationFlag {
        DeviationFlag {
            metric: metric.to_string(),
            region: "any".to_string(),
            severity,
            value: 1.0,
            unit: MeasurementUnit::Degrees,
            band: Band::symmetric(0.5),
        }
    }

    #[test]
    fn test_worst_flag_sets_level() {
        let risks = assess_injury_risk(
            &[measured(metrics::FORWARD_HEAD_RATIO), measured(metrics::HEAD_LATERAL_TILT)],
            &[
                flag(metrics::HEAD_LATERAL_TILT, Severity::Mild),
                flag(metrics::FORWARD_HEAD_RATIO, Severity::Moderate),
            ],
        );
        assert_eq!(
            risks,
            vec![InjuryRisk {
                body_part: BodyPart::Neck,
                risk_level: RiskLevel::High,
                metrics: vec![
                    metrics::HEAD_LATERAL_TILT.to_string(),
                    metrics::FORWARD_HEAD_RATIO.to_string(),
                ],
            }]
        );
    }

    #[test]
    fn test_unmeasured_parts_are_skipped() {
        let risks = assess_injury_risk(&[measured(metrics::KNEE_SYMMETRY)], &[]);
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].body_part, BodyPart::Knee);
        assert_eq!(risks[0].risk_level, RiskLevel::Low);
        assert!(risks[0].metrics.is_empty());

        assert!(assess_injury_risk(&[], &[]).is_empty());
    }

    #[test]
    fn test_severe_flag_is_critical() {
        let risks = assess_injury_risk(
            &[measured(metrics::PELVIC_TILT)],
            &[flag(metrics::PELVIC_TILT, Severity::Severe)],
        );
        assert_eq!(risks[0].body_part, BodyPart::LowerBack);
        assert_eq!(risks[0].risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_body_part_names() {
        assert_eq!(BodyPart::LowerBack.to_string(), "lower_back");
        assert_eq!(
            serde_json::to_string(&BodyPart::LowerBack).unwrap(),
            "\"lower_back\""
        );
    }
}
