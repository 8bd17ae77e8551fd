//! Per-region metric extraction and the registry of assessed regions.
//!
//! Each region implements [`RegionExtractor`]. Extraction is region
//! specific; classification and scoring default to the shared, table-driven
//! implementations and may be overridden by a region that needs to.

pub mod cervical;
pub mod lower_extremity;
pub mod pelvic;
pub mod shoulder;
pub mod spinal;

pub use cervical::CervicalExtractor;
pub use lower_extremity::LowerExtremityExtractor;
pub use pelvic::PelvicExtractor;
pub use shoulder::ShoulderExtractor;
pub use spinal::SpinalExtractor;

use crate::classification::{DeviationClassifier, DeviationFlag};
use crate::core::{AngleMeasurement, Landmark, LandmarkId, MeasurementUnit, Point3, Snapshot};
use crate::core::RegionMeasurements;
use crate::errors::AssessmentError;
use crate::scoring::{FunctionalScore, FunctionalScorer};
use tracing::{debug, trace};

pub trait RegionExtractor: Send + Sync {
    fn region(&self) -> &str;

    /// Measurements for this region, in a stable order. Metrics whose inputs
    /// are missing, insufficiently visible or degenerate are left out.
    fn extract(&self, view: &LandmarkView<'_>) -> Vec<AngleMeasurement>;

    fn classify(
        &self,
        measurements: &[AngleMeasurement],
        classifier: &DeviationClassifier<'_>,
    ) -> Vec<DeviationFlag> {
        classifier.classify_all(measurements)
    }

    fn score(
        &self,
        measurements: &[AngleMeasurement],
        flags: &[DeviationFlag],
        scorer: &FunctionalScorer<'_>,
    ) -> Result<FunctionalScore, AssessmentError> {
        scorer.score_region(self.region(), measurements, flags)
    }
}

/// Read-only view of a snapshot that hides landmarks below the
/// visibility threshold.
#[derive(Debug, Clone, Copy)]
pub struct LandmarkView<'a> {
    snapshot: &'a Snapshot,
    min_visibility: f64,
}

impl<'a> LandmarkView<'a> {
    pub fn new(snapshot: &'a Snapshot, min_visibility: f64) -> Self {
        Self {
            snapshot,
            min_visibility,
        }
    }

    pub fn visible(&self, id: LandmarkId) -> Option<&'a Landmark> {
        self.snapshot
            .get(id)
            .filter(|landmark| landmark.is_visible(self.min_visibility))
    }

    pub fn min_visibility(&self) -> f64 {
        self.min_visibility
    }
}

/// Static description of one metric an extractor produces.
#[derive(Debug, Clone, Copy)]
pub struct Metric {
    pub region: &'static str,
    pub name: &'static str,
    pub unit: MeasurementUnit,
}

impl Metric {
    pub const fn degrees(region: &'static str, name: &'static str) -> Self {
        Self {
            region,
            name,
            unit: MeasurementUnit::Degrees,
        }
    }

    pub const fn ratio(region: &'static str, name: &'static str) -> Self {
        Self {
            region,
            name,
            unit: MeasurementUnit::Ratio,
        }
    }

    /// Gather `ids` from the view and run `compute` on their positions.
    ///
    /// Returns `None` instead of a value when any input is not visible or
    /// the geometry is degenerate.
    pub fn measure<const N: usize>(
        &self,
        view: &LandmarkView<'_>,
        ids: [LandmarkId; N],
        compute: impl FnOnce([Point3; N]) -> Result<f64, AssessmentError>,
    ) -> Option<AngleMeasurement> {
        let mut points = [Point3::default(); N];
        let mut confidence = 1.0_f64;

        for (slot, id) in points.iter_mut().zip(ids) {
            let Some(landmark) = view.visible(id) else {
                trace!(
                    metric = self.name,
                    landmark = %id,
                    "skipping metric: landmark missing or below visibility threshold"
                );
                return None;
            };
            *slot = landmark.position;
            confidence = confidence.min(landmark.visibility);
        }

        match compute(points) {
            Ok(value) if value.is_finite() => {
                trace!(metric = self.name, value, confidence, "measured");
                Some(AngleMeasurement {
                    name: self.name.to_string(),
                    region: self.region.to_string(),
                    value,
                    unit: self.unit,
                    landmarks: ids.to_vec(),
                    confidence,
                })
            }
            Ok(value) => {
                debug!(metric = self.name, value, "skipping metric: non-finite value");
                None
            }
            Err(e) => {
                debug!(metric = self.name, error = %e, "skipping metric");
                None
            }
        }
    }
}

/// Ordered set of regions the engine assesses.
pub struct RegionRegistry {
    extractors: Vec<Box<dyn RegionExtractor>>,
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for RegionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.regions()).finish()
    }
}

impl RegionRegistry {
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Cervical, shoulder, spinal, pelvic and lower-extremity regions.
    pub fn builtin() -> Self {
        Self::empty()
            .with(CervicalExtractor)
            .with(ShoulderExtractor)
            .with(SpinalExtractor)
            .with(PelvicExtractor)
            .with(LowerExtremityExtractor)
    }

    /// Register a region. A region registered under an existing name replaces it
    /// in place.
    pub fn with(mut self, extractor: impl RegionExtractor + 'static) -> Self {
        let extractor: Box<dyn RegionExtractor> = Box::new(extractor);
        match self
            .extractors
            .iter()
            .position(|existing| existing.region() == extractor.region())
        {
            Some(index) => self.extractors[index] = extractor,
            None => self.extractors.push(extractor),
        }
        self
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.extractors.iter().map(|extractor| extractor.region())
    }

    pub fn extractors(&self) -> impl Iterator<Item = &dyn RegionExtractor> {
        self.extractors.iter().map(|extractor| extractor.as_ref())
    }

    pub fn get(&self, region: &str) -> Option<&dyn RegionExtractor> {
        self.extractors()
            .find(|extractor| extractor.region() == region)
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Run every registered extractor over one snapshot.
    pub fn extract_all(&self, snapshot: &Snapshot, min_visibility: f64) -> Vec<RegionMeasurements> {
        let view = LandmarkView::new(snapshot, min_visibility);
        self.extractors()
            .map(|extractor| RegionMeasurements::new(extractor.region(), extractor.extract(&view)))
            .collect()
    }
}
