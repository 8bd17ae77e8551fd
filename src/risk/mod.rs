pub mod compensation;
pub mod injury;
pub mod movement;

pub use compensation::{detect_patterns, CompensationKind, CompensationPattern};
pub use injury::{assess_injury_risk, BodyPart, InjuryRisk};
pub use movement::{assess_movement_quality, MovementPattern, MovementQuality};

use crate::classification::{DeviationFlag, Severity};
use crate::scoring::FunctionalScore;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,      // overall >= 90
    Moderate, // 75..90
    High,     // 60..75
    Critical, // < 60
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Unweighted mean of the assessed regional scores
    pub overall_score: f64,
    /// Level the overall score maps to on its own
    pub score_level: RiskLevel,
    /// Final level after the severe-finding override
    pub risk_level: RiskLevel,
    pub severe_override: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RiskStratifier {
    pub low_threshold: f64,      // Default: 90
    pub moderate_threshold: f64, // Default: 75
    pub high_threshold: f64,     // Default: 60
}

impl Default for RiskStratifier {
    fn default() -> Self {
        Self {
            low_threshold: 90.0,
            moderate_threshold: 75.0,
            high_threshold: 60.0,
        }
    }
}

impl RiskStratifier {
    /// Mean of the regional scores; `None` when no region was assessed.
    pub fn overall_score(&self, scores: &[FunctionalScore]) -> Option<f64> {
        if scores.is_empty() {
            return None;
        }
        let total: f64 = scores.iter().map(|s| s.score).sum();
        Some(total / scores.len() as f64)
    }

    pub fn level_for_score(&self, score: f64) -> RiskLevel {
        if score >= self.low_threshold {
            RiskLevel::Low
        } else if score >= self.moderate_threshold {
            RiskLevel::Moderate
        } else if score >= self.high_threshold {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    /// A single severe finding raises the level to at least `High`, however
    /// good the other regions are.
    pub fn apply_severity_override(&self, level: RiskLevel, flags: &[DeviationFlag]) -> RiskLevel {
        if flags.iter().any(|flag| flag.severity == Severity::Severe) {
            level.max(RiskLevel::High)
        } else {
            level
        }
    }

    pub fn stratify(
        &self,
        scores: &[FunctionalScore],
        flags: &[DeviationFlag],
    ) -> Option<RiskAssessment> {
        let overall_score = self.overall_score(scores)?;
        let score_level = self.level_for_score(overall_score);
        let risk_level = self.apply_severity_override(score_level, flags);

        if risk_level != score_level {
            tracing::debug!(
                overall_score,
                %score_level,
                %risk_level,
                "severe deviation raised risk level"
            );
        }

        Some(RiskAssessment {
            overall_score,
            score_level,
            risk_level,
            severe_override: risk_level != score_level,
        })
    }
}
