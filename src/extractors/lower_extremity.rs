//! Knee angles, frontal-plane knee alignment and stance geometry.

use super::{LandmarkView, Metric, RegionExtractor};
use crate::core::{metrics, regions, AngleMeasurement, LandmarkId, Point3};
use crate::errors::AssessmentError;
use crate::geometry;

const LEFT_KNEE_FLEXION: Metric =
    Metric::degrees(regions::LOWER_EXTREMITY, metrics::LEFT_KNEE_FLEXION);
const RIGHT_KNEE_FLEXION: Metric =
    Metric::degrees(regions::LOWER_EXTREMITY, metrics::RIGHT_KNEE_FLEXION);
const LEFT_KNEE_VALGUS: Metric = Metric::ratio(regions::LOWER_EXTREMITY, metrics::LEFT_KNEE_VALGUS);
const RIGHT_KNEE_VALGUS: Metric =
    Metric::ratio(regions::LOWER_EXTREMITY, metrics::RIGHT_KNEE_VALGUS);
const KNEE_SYMMETRY: Metric = Metric::degrees(regions::LOWER_EXTREMITY, metrics::KNEE_SYMMETRY);
const STANCE_WIDTH_RATIO: Metric =
    Metric::ratio(regions::LOWER_EXTREMITY, metrics::STANCE_WIDTH_RATIO);

/// Horizontal knee offset from the hip-ankle path, in leg lengths.
///
/// Zero for a straight leg; the sign follows the image x axis.
fn knee_offset(hip: &Point3, knee: &Point3, ankle: &Point3) -> Result<f64, AssessmentError> {
    let offset = (knee.x - hip.x) - (ankle.x - knee.x);
    geometry::normalized_offset(offset, hip.distance(knee) + knee.distance(ankle))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LowerExtremityExtractor;

impl RegionExtractor for LowerExtremityExtractor {
    fn region(&self) -> &str {
        regions::LOWER_EXTREMITY
    }

    fn extract(&self, view: &LandmarkView<'_>) -> Vec<AngleMeasurement> {
        use LandmarkId::*;

        let left_leg = [LeftHip, LeftKnee, LeftAnkle];
        let right_leg = [RightHip, RightKnee, RightAnkle];

        [
            LEFT_KNEE_FLEXION.measure(view, left_leg, |[h, k, a]| geometry::joint_angle(&h, &k, &a)),
            RIGHT_KNEE_FLEXION.measure(view, right_leg, |[h, k, a]| geometry::joint_angle(&h, &k, &a)),
            LEFT_KNEE_VALGUS.measure(view, left_leg, |[h, k, a]| knee_offset(&h, &k, &a)),
            RIGHT_KNEE_VALGUS.measure(view, right_leg, |[h, k, a]| knee_offset(&h, &k, &a)),
            KNEE_SYMMETRY.measure(
                view,
                [LeftHip, LeftKnee, LeftAnkle, RightHip, RightKnee, RightAnkle],
                |[lh, lk, la, rh, rk, ra]| {
                    Ok(geometry::joint_angle(&lh, &lk, &la)? - geometry::joint_angle(&rh, &rk, &ra)?)
                },
            ),
            STANCE_WIDTH_RATIO.measure(
                view,
                [LeftAnkle, RightAnkle, LeftHip, RightHip],
                |[la, ra, lh, rh]| geometry::normalized_offset((la.x - ra.x).abs(), (lh.x - rh.x).abs()),
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
