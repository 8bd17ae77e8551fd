//! Per-frame assessment reports and the engine that builds them.

use crate::classification::{DeviationClassifier, DeviationFlag, Severity};
use crate::config::EngineConfig;
use crate::core::{AngleMeasurement, RegionMeasurements, Snapshot};
use crate::errors::{AssessmentError, ConfigError};
use crate::extractors::RegionRegistry;
use crate::risk::{
    assess_injury_risk, assess_movement_quality, detect_patterns, BodyPart, CompensationPattern,
    InjuryRisk, MovementQuality, RiskLevel, RiskStratifier,
};
use crate::scoring::{FunctionalScore, FunctionalScorer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Every registered region was assessed
    Complete,
    /// At least one region was assessed and at least one was not
    Partial,
    /// Empty snapshot, or no region had enough visible landmarks
    NoBodyDetected,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Complete => "complete",
            AssessmentStatus::Partial => "partial",
            AssessmentStatus::NoBodyDetected => "no body detected",
        }
    }
}

/// Everything computed for one snapshot. Built once by [`AssessmentEngine`]
/// and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub frame_id: u64,
    pub timestamp_ms: i64,
    pub status: AssessmentStatus,
    pub measurements: Vec<AngleMeasurement>,
    pub flags: Vec<DeviationFlag>,
    pub regional_scores: Vec<FunctionalScore>,
    pub assessed_regions: Vec<String>,
    pub unassessed_regions: Vec<String>,
    pub overall_score: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    /// Whether a severe flag raised the risk level above what the score implies
    pub severe_override: bool,
    pub compensation_patterns: Vec<CompensationPattern>,
    /// Movement pattern of every assessed region
    #[serde(default)]
    pub movement_quality: Vec<MovementQuality>,
    #[serde(default)]
    pub injury_risks: Vec<InjuryRisk>,
}

impl AssessmentReport {
    fn no_body(snapshot: &Snapshot, regions: Vec<String>) -> Self {
        Self {
            frame_id: snapshot.frame_id(),
            timestamp_ms: snapshot.timestamp_ms(),
            status: AssessmentStatus::NoBodyDetected,
            measurements: Vec::new(),
            flags: Vec::new(),
            regional_scores: Vec::new(),
            assessed_regions: Vec::new(),
            unassessed_regions: regions,
            overall_score: None,
            risk_level: None,
            severe_override: false,
            compensation_patterns: Vec::new(),
            movement_quality: Vec::new(),
            injury_risks: Vec::new(),
        }
    }

    pub fn is_body_detected(&self) -> bool {
        self.status != AssessmentStatus::NoBodyDetected
    }

    pub fn score_for(&self, region: &str) -> Option<&FunctionalScore> {
        self.regional_scores.iter().find(|s| s.region == region)
    }

    pub fn movement_for(&self, region: &str) -> Option<&MovementQuality> {
        self.movement_quality.iter().find(|m| m.region == region)
    }

    pub fn injury_risk_for(&self, body_part: BodyPart) -> Option<RiskLevel> {
        self.injury_risks
            .iter()
            .find(|risk| risk.body_part == body_part)
            .map(|risk| risk.risk_level)
    }

    pub fn measurement(&self, metric: &str) -> Option<&AngleMeasurement> {
        self.measurements.iter().find(|m| m.name == metric)
    }

    pub fn flag_for(&self, metric: &str) -> Option<&DeviationFlag> {
        self.flags.iter().find(|f| f.metric == metric)
    }

    pub fn worst_severity(&self) -> Severity {
        self.flags
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(Severity::Normal)
    }
}

/// Stateless, thread-safe assessment pipeline.
///
/// One engine can serve any number of threads; each call to
/// [`assess`](Self::assess) only reads the engine and the snapshot.
#[derive(Debug, Default)]
pub struct AssessmentEngine {
    config: EngineConfig,
    registry: RegionRegistry,
    stratifier: RiskStratifier,
}

impl AssessmentEngine {
    /// Engine over the built-in regions. Fails when `config` does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_registry(config, RegionRegistry::builtin())
    }

    pub fn with_registry(config: EngineConfig, registry: RegionRegistry) -> Result<Self, ConfigError> {
        config.validate()?;
        if registry.is_empty() {
            warn!("assessment engine created with no registered regions");
        }
        Ok(Self {
            config,
            registry,
            stratifier: RiskStratifier::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Raw per-region measurements, before classification.
    pub fn extract(&self, snapshot: &Snapshot) -> Vec<RegionMeasurements> {
        self.registry
            .extract_all(snapshot, self.config.min_visibility)
    }

    pub fn assess(&self, snapshot: &Snapshot) -> AssessmentReport {
        let _span = debug_span!("assess", frame_id = snapshot.frame_id()).entered();

        if let Err(e) = snapshot.ensure_not_empty() {
            debug!(error = %e, "no body detected");
            return AssessmentReport::no_body(snapshot, self.region_names());
        }

        let extracted = self.extract(snapshot);
        self.build_report(snapshot, extracted)
    }

    /// Assess independent snapshots in parallel. Reports come back in input order.
    pub fn assess_batch(&self, snapshots: &[Snapshot]) -> Vec<AssessmentReport> {
        snapshots
            .par_iter()
            .map(|snapshot| self.assess(snapshot))
            .collect()
    }

    /// Classify, score and stratify measurements extracted from `snapshot`.
    ///
    /// Regions without a registered extractor are ignored.
    pub fn build_report(
        &self,
        snapshot: &Snapshot,
        extracted: Vec<RegionMeasurements>,
    ) -> AssessmentReport {
        let classifier = DeviationClassifier::new(&self.config.thresholds);
        let scorer = FunctionalScorer::new(&self.config.thresholds, &self.config.weights);

        let mut measurements = Vec::new();
        let mut flags = Vec::new();
        let mut regional_scores = Vec::new();
        let mut assessed_regions = Vec::new();
        let mut unassessed_regions = Vec::new();

        for region in extracted {
            let Some(extractor) = self.registry.get(&region.region) else {
                warn!(region = %region.region, "no extractor registered for region");
                continue;
            };

            let region_flags = extractor.classify(&region.measurements, &classifier);
            match extractor.score(&region.measurements, &region_flags, &scorer) {
                Ok(score) => {
                    assessed_regions.push(region.region.clone());
                    regional_scores.push(score);
                }
                Err(AssessmentError::InsufficientLandmarks { region: name }) => {
                    debug!(region = %name, "region unassessed");
                    unassessed_regions.push(name);
                }
                Err(e) => {
                    debug!(region = %region.region, error = %e, "region unassessed");
                    unassessed_regions.push(region.region.clone());
                }
            }

            flags.extend(region_flags);
            measurements.extend(region.measurements);
        }

        let status = if regional_scores.is_empty() {
            AssessmentStatus::NoBodyDetected
        } else if unassessed_regions.is_empty() {
            AssessmentStatus::Complete
        } else {
            AssessmentStatus::Partial
        };

        let risk = self.stratifier.stratify(&regional_scores, &flags);
        let compensation_patterns = detect_patterns(&flags);
        let movement_quality = assess_movement_quality(&regional_scores);
        let injury_risks = assess_injury_risk(&measurements, &flags);

        debug!(
            status = status.as_str(),
            assessed = assessed_regions.len(),
            flags = flags.len(),
            overall = risk.map(|r| r.overall_score),
            "frame assessed"
        );

        AssessmentReport {
            frame_id: snapshot.frame_id(),
            timestamp_ms: snapshot.timestamp_ms(),
            status,
            measurements,
            flags,
            regional_scores,
            assessed_regions,
            unassessed_regions,
            overall_score: risk.map(|r| r.overall_score),
            risk_level: risk.map(|r| r.risk_level),
            severe_override: risk.is_some_and(|r| r.severe_override),
            compensation_patterns,
            movement_quality,
            injury_risks,
        }
    }

    fn region_names(&self) -> Vec<String> {
        self.registry.regions().map(str::to_string).collect()
    }
}
