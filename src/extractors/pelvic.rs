//! Pelvic obliquity and thigh inclination.

use super::{LandmarkView, Metric, RegionExtractor};
use crate::core::{metrics, regions, AngleMeasurement, LandmarkId};
use crate::geometry;

const PELVIC_TILT: Metric = Metric::degrees(regions::PELVIC, metrics::PELVIC_TILT);
const LEFT_SAGITTAL_TILT: Metric =
    Metric::degrees(regions::PELVIC, metrics::LEFT_PELVIC_SAGITTAL_TILT);
const RIGHT_SAGITTAL_TILT: Metric =
    Metric::degrees(regions::PELVIC, metrics::RIGHT_PELVIC_SAGITTAL_TILT);

#[derive(Debug, Clone, Copy, Default)]
pub struct PelvicExtractor;

impl RegionExtractor for PelvicExtractor {
    fn region(&self) -> &str {
        regions::PELVIC
    }

    fn extract(&self, view: &LandmarkView<'_>) -> Vec<AngleMeasurement> {
        use LandmarkId::*;

        [
            PELVIC_TILT.measure(view, [LeftHip, RightHip], |[l, r]| geometry::line_tilt(&l, &r)),
            LEFT_SAGITTAL_TILT.measure(view, [LeftHip, LeftKnee], |[hip, knee]| {
                geometry::vertical_inclination(&hip, &knee)
            }),
            RIGHT_SAGITTAL_TILT.measure(view, [RightHip, RightKnee], |[hip, knee]| {
                geometry::vertical_inclination(&hip, &knee)
            }),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
