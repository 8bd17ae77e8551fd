//! Biomechanical posture assessment over pose-estimation landmarks.
//!
//! A [`Snapshot`] of body landmarks flows through region extractors, the
//! deviation classifier, the functional scorer and the risk stratifier into
//! one immutable [`AssessmentReport`]:
//!
//! ```
//! use posturemap::{AssessmentEngine, AssessmentStatus, Snapshot};
//!
//! let engine = AssessmentEngine::default();
//! let report = engine.assess(&Snapshot::empty(0, 0));
//! assert_eq!(report.status, AssessmentStatus::NoBodyDetected);
//! ```

// Export modules for library usage
pub mod classification;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod extractors;
pub mod geometry;
pub mod io;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod smoothing;

// Re-export commonly used types
pub use crate::core::{
    metrics, regions, AngleMeasurement, Landmark, LandmarkId, MeasurementUnit, Point3,
    RegionMeasurements, Snapshot,
};

pub use crate::classification::{DeviationClassifier, DeviationFlag, Severity};

pub use crate::config::{
    load_config, load_config_from_path, EngineConfig, PosturemapConfig, ScoringWeights,
    SmoothingConfig, SmoothingMethod, ThresholdBands, ThresholdPreset, ThresholdTable,
};

pub use crate::errors::{AssessmentError, ConfigError};

pub use crate::extractors::{LandmarkView, RegionExtractor, RegionRegistry};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::report::{AssessmentEngine, AssessmentReport, AssessmentStatus};

pub use crate::risk::{
    BodyPart, CompensationKind, CompensationPattern, InjuryRisk, MovementPattern,
    MovementQuality, RiskAssessment, RiskLevel, RiskStratifier,
};

pub use crate::scoring::{FunctionalScore, FunctionalScorer};

pub use crate::smoothing::{MeasurementSmoother, SmoothedEngine};
