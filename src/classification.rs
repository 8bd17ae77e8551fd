//! Deviation classification against the per-metric threshold table.

use crate::config::{Band, ThresholdBands, ThresholdTable};
use crate::core::{AngleMeasurement, MeasurementUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A measurement that fell outside its normal band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationFlag {
    pub metric: String,
    pub region: String,
    pub severity: Severity,
    pub value: f64,
    pub unit: MeasurementUnit,
    /// The widest band the value still fell outside of
    pub band: Band,
}

/// Tier for `value`. Bands are open, so a value sitting exactly on a
/// boundary belongs to the stricter tier.
pub fn severity_for(bands: &ThresholdBands, value: f64) -> Severity {
    if bands.normal.contains(value) {
        Severity::Normal
    } else if bands.mild.contains(value) {
        Severity::Mild
    } else if bands.moderate.contains(value) {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}

fn exceeded_band(bands: &ThresholdBands, severity: Severity) -> Band {
    match severity {
        Severity::Normal | Severity::Mild => bands.normal,
        Severity::Moderate => bands.mild,
        Severity::Severe => bands.moderate,
    }
}

pub struct DeviationClassifier<'a> {
    table: &'a ThresholdTable,
}

impl<'a> DeviationClassifier<'a> {
    pub fn new(table: &'a ThresholdTable) -> Self {
        Self { table }
    }

    /// `None` for informational metrics (no table) as well as for values in
    /// the normal band.
    pub fn severity_of(&self, measurement: &AngleMeasurement) -> Option<Severity> {
        self.table
            .get(&measurement.name)
            .map(|bands| severity_for(bands, measurement.value))
    }

    pub fn classify(&self, measurement: &AngleMeasurement) -> Option<DeviationFlag> {
        let bands = self.table.get(&measurement.name)?;
        let severity = severity_for(bands, measurement.value);
        if severity == Severity::Normal {
            return None;
        }

        tracing::trace!(
            metric = %measurement.name,
            value = measurement.value,
            %severity,
            "deviation"
        );
        Some(DeviationFlag {
            metric: measurement.name.clone(),
            region: measurement.region.clone(),
            severity,
            value: measurement.value,
            unit: measurement.unit,
            band: exceeded_band(bands, severity),
        })
    }

    pub fn classify_all(&self, measurements: &[AngleMeasurement]) -> Vec<DeviationFlag> {
        measurements.iter().filter_map(|m| self.classify(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics;

    fn measurement(name: &str, value: f64) -> AngleMeasurement {
        AngleMeasurement {
            name: name.to_string(),
            region: "test".to_string(),
            value,
            unit: MeasurementUnit::Degrees,
            landmarks: Vec::new(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_tiers() {
        let bands = ThresholdBands::symmetric(3.0, 6.0, 10.0);
        assert_eq!(severity_for(&bands, 0.0), Severity::Normal);
        assert_eq!(severity_for(&bands, -4.0), Severity::Mild);
        assert_eq!(severity_for(&bands, 8.0), Severity::Moderate);
        assert_eq!(severity_for(&bands, -25.0), Severity::Severe);
    }

    #[test]
    fn test_boundary_goes_to_stricter_tier() {
        let bands = ThresholdBands::symmetric(3.0, 6.0, 10.0);
        assert_eq!(severity_for(&bands, 3.0), Severity::Mild);
        assert_eq!(severity_for(&bands, -6.0), Severity::Moderate);
        assert_eq!(severity_for(&bands, 10.0), Severity::Severe);
    }

    #[test]
    fn test_centered_bands() {
        let bands = ThresholdBands::centered(180.0, 15.0, 25.0, 40.0);
        assert_eq!(severity_for(&bands, 178.0), Severity::Normal);
        assert_eq!(severity_for(&bands, 160.0), Severity::Mild);
        assert_eq!(severity_for(&bands, 130.0), Severity::Severe);
    }

    #[test]
    fn test_classify_records_exceeded_band() {
        let table = ThresholdTable::clinical_defaults();
        let classifier = DeviationClassifier::new(&table);

        let flag = classifier
            .classify(&measurement(metrics::PELVIC_TILT, 7.0))
            .unwrap();
        assert_eq!(flag.severity, Severity::Moderate);
        assert_eq!(flag.band, Band::symmetric(6.0));
        assert_eq!(flag.region, "test");
    }

    #[test]
    fn test_normal_and_informational_produce_no_flag() {
        let table = ThresholdTable::clinical_defaults();
        let classifier = DeviationClassifier::new(&table);

        assert!(classifier
            .classify(&measurement(metrics::PELVIC_TILT, 1.0))
            .is_none());
        assert!(classifier
            .classify(&measurement(metrics::LEFT_ELBOW_FLEXION, 20.0))
            .is_none());
        assert_eq!(
            classifier.severity_of(&measurement(metrics::LEFT_ELBOW_FLEXION, 20.0)),
            None
        );
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let table = ThresholdTable::clinical_defaults();
        let classifier = DeviationClassifier::new(&table);
        let flags = classifier.classify_all(&[
            measurement(metrics::SHOULDER_TILT, 12.0),
            measurement(metrics::PELVIC_TILT, 0.5),
            measurement(metrics::HEAD_LATERAL_TILT, -6.0),
        ]);
        let names: Vec<_> = flags.iter().map(|f| f.metric.as_str()).collect();
        assert_eq!(names, vec![metrics::SHOULDER_TILT, metrics::HEAD_LATERAL_TILT]);
        assert_eq!(flags[0].severity, Severity::Severe);
        assert_eq!(flags[1].severity, Severity::Mild);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Severe > Severity::Moderate);
        assert!(Severity::Mild > Severity::Normal);
    }
}
