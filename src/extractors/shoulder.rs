//! Shoulder girdle levelness, protraction and arm angles.

use super::{LandmarkView, Metric, RegionExtractor};
use crate::core::{metrics, regions, AngleMeasurement, LandmarkId};
use crate::geometry;

const SHOULDER_TILT: Metric = Metric::degrees(regions::SHOULDER, metrics::SHOULDER_TILT);
const LEFT_PROTRACTION: Metric =
    Metric::ratio(regions::SHOULDER, metrics::LEFT_SHOULDER_PROTRACTION);
const RIGHT_PROTRACTION: Metric =
    Metric::ratio(regions::SHOULDER, metrics::RIGHT_SHOULDER_PROTRACTION);
const SCAPULAR_ASYMMETRY: Metric = Metric::ratio(regions::SHOULDER, metrics::SCAPULAR_ASYMMETRY);
const LEFT_ELBOW_FLEXION: Metric = Metric::degrees(regions::SHOULDER, metrics::LEFT_ELBOW_FLEXION);
const RIGHT_ELBOW_FLEXION: Metric =
    Metric::degrees(regions::SHOULDER, metrics::RIGHT_ELBOW_FLEXION);

#[derive(Debug, Clone, Copy, Default)]
pub struct ShoulderExtractor;

impl RegionExtractor for ShoulderExtractor {
    fn region(&self) -> &str {
        regions::SHOULDER
    }

    fn extract(&self, view: &LandmarkView<'_>) -> Vec<AngleMeasurement> {
        use LandmarkId::*;

        [
            SHOULDER_TILT.measure(view, [LeftShoulder, RightShoulder], |[l, r]| {
                geometry::line_tilt(&l, &r)
            }),
            LEFT_PROTRACTION.measure(view, [LeftEar, LeftShoulder, RightShoulder], |[ear, s, other]| {
                geometry::normalized_offset(ear.x - s.x, s.distance(&other))
            }),
            RIGHT_PROTRACTION.measure(view, [RightEar, RightShoulder, LeftShoulder], |[ear, s, other]| {
                geometry::normalized_offset(ear.x - s.x, s.distance(&other))
            }),
            // Positive when the left shoulder sits higher
            SCAPULAR_ASYMMETRY.measure(view, [LeftShoulder, RightShoulder], |[l, r]| {
                geometry::normalized_offset(r.y - l.y, l.distance(&r))
            }),
            LEFT_ELBOW_FLEXION.measure(view, [LeftShoulder, LeftElbow, LeftWrist], |[s, e, w]| {
                geometry::joint_angle(&s, &e, &w)
            }),
            RIGHT_ELBOW_FLEXION.measure(view, [RightShoulder, RightElbow, RightWrist], |[s, e, w]| {
                geometry::joint_angle(&s, &e, &w)
            }),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::{upright, upright_with};

    fn extract(snapshot: &crate::core::Snapshot) -> Vec<AngleMeasurement> {
        ShoulderExtractor.extract(&LandmarkView::new(snapshot, 0.5))
    }

    fn value(measurements: &[AngleMeasurement], name: &str) -> f64 {
        measurements
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
            .unwrap_or_else(|| panic!("missing {name}"))
    }

    #[test]
    fn test_level_shoulders() {
        let measurements = extract(&upright());
        assert_eq!(measurements.len(), 6);
        assert!(value(&measurements, metrics::SHOULDER_TILT).abs() < 1e-9);
        assert!(value(&measurements, metrics::SCAPULAR_ASYMMETRY).abs() < 1e-9);
        assert!(value(&measurements, metrics::LEFT_SHOULDER_PROTRACTION).abs() < 1e-9);
    }

    #[test]
    fn test_dropped_right_shoulder() {
        let snapshot = upright_with(&[(LandmarkId::RightShoulder, [0.60, 0.32])]);
        let measurements = extract(&snapshot);
        assert!(value(&measurements, metrics::SHOULDER_TILT) > 0.0);
        assert!(value(&measurements, metrics::SCAPULAR_ASYMMETRY) > 0.09);
    }

    #[test]
    fn test_straight_arm_is_180() {
        let snapshot = upright_with(&[
            (LandmarkId::LeftElbow, [0.40, 0.45]),
            (LandmarkId::LeftWrist, [0.40, 0.60]),
        ]);
        let flexion = value(&extract(&snapshot), metrics::LEFT_ELBOW_FLEXION);
        assert!((flexion - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_wrist_drops_only_that_arm() {
        let snapshot = crate::core::Snapshot::from_landmarks(
            1,
            0,
            upright()
                .landmarks()
                .filter(|l| l.id != LandmarkId::RightWrist)
                .copied(),
        );
        let measurements = extract(&snapshot);
        assert_eq!(measurements.len(), 5);
        assert!(measurements
            .iter()
            .all(|m| m.name != metrics::RIGHT_ELBOW_FLEXION));
    }
}
