use super::landmark::LandmarkId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    Degrees,
    /// Dimensionless offset normalized by a body dimension
    Ratio,
}

impl MeasurementUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            MeasurementUnit::Degrees => "°",
            MeasurementUnit::Ratio => "",
        }
    }
}

/// A named angle or alignment value computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleMeasurement {
    pub name: String,
    pub region: String,
    pub value: f64,
    pub unit: MeasurementUnit,
    /// Input landmarks in the order the computation consumed them
    pub landmarks: Vec<LandmarkId>,
    /// Minimum visibility over `landmarks`
    pub confidence: f64,
}

impl AngleMeasurement {
    /// Copy of this measurement carrying a different value.
    pub fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }
}

/// Measurements extracted for one anatomical region, in extraction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMeasurements {
    pub region: String,
    pub measurements: Vec<AngleMeasurement>,
}

impl RegionMeasurements {
    pub fn new(region: impl Into<String>, measurements: Vec<AngleMeasurement>) -> Self {
        Self {
            region: region.into(),
            measurements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}
