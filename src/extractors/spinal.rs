//! Trunk alignment between the shoulder girdle, pelvis and base of support.

use super::{LandmarkView, Metric, RegionExtractor};
use crate::core::{metrics, regions, AngleMeasurement, LandmarkId};
use crate::geometry;

const LATERAL_SPINAL_TILT: Metric = Metric::degrees(regions::SPINAL, metrics::LATERAL_SPINAL_TILT);
const SAGITTAL_CURVATURE: Metric = Metric::degrees(regions::SPINAL, metrics::SAGITTAL_CURVATURE);

#[derive(Debug, Clone, Copy, Default)]
pub struct SpinalExtractor;

impl RegionExtractor for SpinalExtractor {
    fn region(&self) -> &str {
        regions::SPINAL
    }

    fn extract(&self, view: &LandmarkView<'_>) -> Vec<AngleMeasurement> {
        use LandmarkId::*;

        [
            LATERAL_SPINAL_TILT.measure(
                view,
                [LeftShoulder, RightShoulder, LeftHip, RightHip],
                |[ls, rs, lh, rh]| {
                    geometry::vertical_inclination(&ls.midpoint(&rs), &lh.midpoint(&rh))
                },
            ),
            // Trunk-over-legs angle at the hip midpoint; 180 is a straight column
            SAGITTAL_CURVATURE.measure(
                view,
                [LeftShoulder, RightShoulder, LeftHip, RightHip, LeftAnkle, RightAnkle],
                |[ls, rs, lh, rh, la, ra]| {
                    geometry::joint_angle(
                        &ls.midpoint(&rs),
                        &lh.midpoint(&rh),
                        &la.midpoint(&ra),
                    )
                },
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
