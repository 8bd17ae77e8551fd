//! Head and neck alignment.

use super::{LandmarkView, Metric, RegionExtractor};
use crate::core::{metrics, regions, AngleMeasurement, LandmarkId};
use crate::geometry;

const NECK_INCLINATION: Metric = Metric::degrees(regions::CERVICAL, metrics::NECK_INCLINATION);
const FORWARD_HEAD_RATIO: Metric = Metric::ratio(regions::CERVICAL, metrics::FORWARD_HEAD_RATIO);
const HEAD_LATERAL_TILT: Metric = Metric::degrees(regions::CERVICAL, metrics::HEAD_LATERAL_TILT);

const HEAD_AND_SHOULDERS: [LandmarkId; 4] = [
    LandmarkId::LeftEar,
    LandmarkId::RightEar,
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CervicalExtractor;

impl RegionExtractor for CervicalExtractor {
    fn region(&self) -> &str {
        regions::CERVICAL
    }

    fn extract(&self, view: &LandmarkView<'_>) -> Vec<AngleMeasurement> {
        [
            // Ear midpoint over shoulder midpoint, against the vertical
            NECK_INCLINATION.measure(view, HEAD_AND_SHOULDERS, |[le, re, ls, rs]| {
                geometry::vertical_inclination(&le.midpoint(&re), &ls.midpoint(&rs))
            }),
            // Horizontal ear-to-shoulder offset in shoulder widths
            FORWARD_HEAD_RATIO.measure(view, HEAD_AND_SHOULDERS, |[le, re, ls, rs]| {
                let offset = le.midpoint(&re).x - ls.midpoint(&rs).x;
                geometry::normalized_offset(offset, ls.distance(&rs))
            }),
            HEAD_LATERAL_TILT.measure(
                view,
                [LandmarkId::LeftEar, LandmarkId::RightEar],
                |[le, re]| geometry::line_tilt(&le, &re),
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::{snapshot_from, upright, upright_with};

    fn extract(snapshot: &crate::core::Snapshot) -> Vec<AngleMeasurement> {
        CervicalExtractor.extract(&LandmarkView::new(snapshot, 0.5))
    }

    fn value(measurements: &[AngleMeasurement], name: &str) -> Option<f64> {
        measurements.iter().find(|m| m.name == name).map(|m| m.value)
    }

    #[test]
    fn test_upright_head_is_neutral() {
        let measurements = extract(&upright());
        assert_eq!(measurements.len(), 3);
        for measurement in &measurements {
            assert!(measurement.value.abs() < 1e-9, "{measurement:?}");
        }
    }

    #[test]
    fn test_forward_head_is_measured_in_shoulder_widths() {
        let snapshot = upright_with(&[
            (LandmarkId::LeftEar, [0.46, 0.15]),
            (LandmarkId::RightEar, [0.66, 0.15]),
        ]);
        let measurements = extract(&snapshot);

        let ratio = value(&measurements, metrics::FORWARD_HEAD_RATIO).unwrap();
        assert!((ratio - 0.3).abs() < 1e-9);

        let inclination = value(&measurements, metrics::NECK_INCLINATION).unwrap();
        let expected = (0.06_f64).atan2(0.15).to_degrees();
        assert!((inclination - expected).abs() < 1e-9);
    }

    #[test]
    fn test_head_tilt_sign() {
        let snapshot = upright_with(&[(LandmarkId::RightEar, [0.60, 0.18])]);
        let tilt = value(&extract(&snapshot), metrics::HEAD_LATERAL_TILT).unwrap();
        assert!(tilt > 0.0);
    }

    #[test]
    fn test_ears_only_yield_head_tilt_only() {
        let snapshot = snapshot_from(
            &[
                (LandmarkId::LeftEar, [0.40, 0.15]),
                (LandmarkId::RightEar, [0.60, 0.15]),
            ],
            0.9,
        );
        let measurements = extract(&snapshot);
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].name, metrics::HEAD_LATERAL_TILT);
    }
}
