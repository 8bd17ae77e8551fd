use crate::core::metrics;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An open interval `(lower, upper)`.
///
/// Written as a two-element array in TOML: `normal = [-3.0, 3.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
}

impl From<[f64; 2]> for Band {
    fn from([lower, upper]: [f64; 2]) -> Self {
        Band { lower, upper }
    }
}

impl From<Band> for [f64; 2] {
    fn from(band: Band) -> Self {
        [band.lower, band.upper]
    }
}

impl Band {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub const fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Values sitting exactly on a bound are outside.
    pub fn contains(&self, value: f64) -> bool {
        self.lower < value && value < self.upper
    }

    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }

    /// Distance from `value` to the nearest bound, 0 when inside or on a bound.
    pub fn deviation(&self, value: f64) -> f64 {
        (self.lower - value).max(value - self.upper).max(0.0)
    }

    pub fn encloses(&self, inner: &Band) -> bool {
        self.lower <= inner.lower && inner.upper <= self.upper
    }

    /// Widen or narrow about the centre.
    pub fn scaled(&self, factor: f64) -> Band {
        let center = self.center();
        let half = self.half_width() * factor;
        Band::new(center - half, center + half)
    }

    fn is_well_formed(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper
    }
}

/// Nested reference ranges for one metric. Values inside `normal` are
/// unremarkable; each wider band bounds one more severity tier and anything
/// outside `moderate` is severe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBands {
    pub normal: Band,
    pub mild: Band,
    pub moderate: Band,
}

impl ThresholdBands {
    pub const fn new(normal: Band, mild: Band, moderate: Band) -> Self {
        Self {
            normal,
            mild,
            moderate,
        }
    }

    /// Bands centred on zero, for signed metrics where either direction is a deviation.
    pub const fn symmetric(normal: f64, mild: f64, moderate: f64) -> Self {
        Self::new(
            Band::symmetric(normal),
            Band::symmetric(mild),
            Band::symmetric(moderate),
        )
    }

    /// Bands centred on `center`, each given by its half-width.
    pub const fn centered(center: f64, normal: f64, mild: f64, moderate: f64) -> Self {
        Self::new(
            Band::new(center - normal, center + normal),
            Band::new(center - mild, center + mild),
            Band::new(center - moderate, center + moderate),
        )
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.normal.scaled(factor),
            self.mild.scaled(factor),
            self.moderate.scaled(factor),
        )
    }

    pub fn validate(&self, metric: &str) -> Result<(), ConfigError> {
        for (tier, band) in [
            ("normal", &self.normal),
            ("mild", &self.mild),
            ("moderate", &self.moderate),
        ] {
            if !band.is_well_formed() {
                return Err(ConfigError::invalid(
                    format!("thresholds.{metric}.{tier}"),
                    format!(
                        "band must be finite with lower < upper, got [{}, {}]",
                        band.lower, band.upper
                    ),
                ));
            }
        }

        if !self.mild.encloses(&self.normal) || !self.moderate.encloses(&self.mild) {
            return Err(ConfigError::invalid(
                format!("thresholds.{metric}"),
                "bands must be nested: normal within mild within moderate",
            ));
        }

        Ok(())
    }
}

/// Reference ranges keyed by metric name. Metrics without an entry are
/// informational: they are reported but never flagged or scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    bands: BTreeMap<String, ThresholdBands>,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::clinical_defaults()
    }
}

impl ThresholdTable {
    pub fn empty() -> Self {
        Self {
            bands: BTreeMap::new(),
        }
    }

    /// Approximate adult standing-posture norms. Angles are in degrees,
    /// offsets are ratios of the normalising body dimension.
    pub fn clinical_defaults() -> Self {
        let defaults = [
            (metrics::NECK_INCLINATION, ThresholdBands::symmetric(10.0, 20.0, 30.0)),
            (metrics::FORWARD_HEAD_RATIO, ThresholdBands::symmetric(0.15, 0.25, 0.35)),
            (metrics::HEAD_LATERAL_TILT, ThresholdBands::symmetric(5.0, 10.0, 15.0)),
            (metrics::SHOULDER_TILT, ThresholdBands::symmetric(3.0, 6.0, 10.0)),
            (metrics::LEFT_SHOULDER_PROTRACTION, ThresholdBands::symmetric(0.15, 0.25, 0.35)),
            (metrics::RIGHT_SHOULDER_PROTRACTION, ThresholdBands::symmetric(0.15, 0.25, 0.35)),
            (metrics::SCAPULAR_ASYMMETRY, ThresholdBands::symmetric(0.05, 0.10, 0.15)),
            (metrics::LATERAL_SPINAL_TILT, ThresholdBands::symmetric(3.0, 6.0, 10.0)),
            (metrics::SAGITTAL_CURVATURE, ThresholdBands::centered(180.0, 10.0, 20.0, 30.0)),
            (metrics::PELVIC_TILT, ThresholdBands::symmetric(3.0, 6.0, 10.0)),
            (metrics::LEFT_PELVIC_SAGITTAL_TILT, ThresholdBands::symmetric(5.0, 10.0, 15.0)),
            (metrics::RIGHT_PELVIC_SAGITTAL_TILT, ThresholdBands::symmetric(5.0, 10.0, 15.0)),
            (metrics::LEFT_KNEE_FLEXION, ThresholdBands::centered(180.0, 15.0, 25.0, 40.0)),
            (metrics::RIGHT_KNEE_FLEXION, ThresholdBands::centered(180.0, 15.0, 25.0, 40.0)),
            (metrics::LEFT_KNEE_VALGUS, ThresholdBands::symmetric(0.05, 0.10, 0.15)),
            (metrics::RIGHT_KNEE_VALGUS, ThresholdBands::symmetric(0.05, 0.10, 0.15)),
            (metrics::KNEE_SYMMETRY, ThresholdBands::symmetric(5.0, 10.0, 20.0)),
        ];

        Self {
            bands: defaults
                .into_iter()
                .map(|(name, bands)| (name.to_string(), bands))
                .collect(),
        }
    }

    pub fn get(&self, metric: &str) -> Option<&ThresholdBands> {
        self.bands.get(metric)
    }

    pub fn insert(&mut self, metric: impl Into<String>, bands: ThresholdBands) {
        self.bands.insert(metric.into(), bands);
    }

    /// Apply per-metric overrides; metrics not mentioned keep their bands.
    pub fn merge(&mut self, overrides: impl IntoIterator<Item = (String, ThresholdBands)>) {
        self.bands.extend(overrides);
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            bands: self
                .bands
                .iter()
                .map(|(name, bands)| (name.clone(), bands.scaled(factor)))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThresholdBands)> {
        self.bands.iter().map(|(name, bands)| (name.as_str(), bands))
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bands
            .iter()
            .try_for_each(|(name, bands)| bands.validate(name))
    }
}
