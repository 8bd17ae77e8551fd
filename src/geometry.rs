//! Pure vector and angle math over landmark positions.
//!
//! All angles are returned in degrees. Frame-space conventions follow the
//! pose estimator: `x` grows to the right and `y` grows downward.

use crate::core::Point3;
use crate::errors::AssessmentError;

/// Vectors shorter than this are treated as zero-length.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Interior angle at `vertex` formed by the rays towards `a` and `c`, in [0, 180].
///
/// Fails when either ray collapses or when `a` and `c` coincide.
pub fn joint_angle(a: &Point3, vertex: &Point3, c: &Point3) -> Result<f64, AssessmentError> {
    let ba = a.sub(vertex);
    let bc = c.sub(vertex);
    let (len_ba, len_bc) = (ba.norm(), bc.norm());
    if len_ba < DEGENERATE_EPSILON
        || len_bc < DEGENERATE_EPSILON
        || a.distance(c) < DEGENERATE_EPSILON
    {
        return Err(AssessmentError::degenerate("joint_angle"));
    }

    let cosine = (ba.dot(&bc) / (len_ba * len_bc)).clamp(-1.0, 1.0);
    Ok(cosine.acos().to_degrees())
}

/// Signed tilt of the line `from -> to` against the horizontal, in [-90, 90].
///
/// Positive when `to` sits lower in the frame than `from`, independent of
/// which side of the image either point is on. For a left/right landmark
/// pair, positive therefore means the left side is high.
pub fn line_tilt(from: &Point3, to: &Point3) -> Result<f64, AssessmentError> {
    let dx = (to.x - from.x).abs();
    let dy = to.y - from.y;
    if dx < DEGENERATE_EPSILON && dy.abs() < DEGENERATE_EPSILON {
        return Err(AssessmentError::degenerate("line_tilt"));
    }
    Ok(dy.atan2(dx).to_degrees())
}

/// Signed inclination of the segment `upper -> lower` against the vertical,
/// in [-90, 90]. Positive when `upper` lies to the right of `lower`.
pub fn vertical_inclination(upper: &Point3, lower: &Point3) -> Result<f64, AssessmentError> {
    let dx = upper.x - lower.x;
    let dy = (lower.y - upper.y).abs();
    if dx.abs() < DEGENERATE_EPSILON && dy < DEGENERATE_EPSILON {
        return Err(AssessmentError::degenerate("vertical_inclination"));
    }
    Ok(dx.atan2(dy).to_degrees())
}

/// `offset / length`, failing when the reference length collapses.
pub fn normalized_offset(offset: f64, length: f64) -> Result<f64, AssessmentError> {
    if length.abs() < DEGENERATE_EPSILON {
        return Err(AssessmentError::degenerate("normalized_offset"));
    }
    Ok(offset / length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(&p(1.0, 0.0), &p(0.0, 0.0), &p(0.0, 1.0)).unwrap();
        assert!((angle - 90.0).abs() < EPS);
    }

    #[test]
    fn test_straight_line_is_180() {
        let angle = joint_angle(&p(0.5, 0.2), &p(0.5, 0.5), &p(0.5, 0.9)).unwrap();
        assert!((angle - 180.0).abs() < EPS);
    }

    #[test]
    fn test_joint_angle_uses_depth() {
        let angle = joint_angle(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert!((angle - 90.0).abs() < EPS);
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let b = p(0.3, 0.3);
        assert!(matches!(
            joint_angle(&b, &b, &p(0.1, 0.9)),
            Err(AssessmentError::DegenerateGeometry { .. })
        ));
        assert!(matches!(
            joint_angle(&p(0.1, 0.9), &b, &b),
            Err(AssessmentError::DegenerateGeometry { .. })
        ));
        assert!(line_tilt(&b, &b).is_err());
        assert!(vertical_inclination(&b, &b).is_err());
    }

    #[test]
    fn test_coincident_outer_points_are_degenerate() {
        let outer = p(0.2, 0.3);
        assert!(matches!(
            joint_angle(&outer, &p(0.5, 0.5), &outer),
            Err(AssessmentError::DegenerateGeometry { .. })
        ));
        // a sharp but distinct fold still measures
        let folded = joint_angle(&outer, &p(0.5, 0.5), &p(0.2, 0.31)).unwrap();
        assert!(folded > 0.0 && folded < 5.0);
    }

    #[test]
    fn test_level_line_has_zero_tilt() {
        let tilt = line_tilt(&p(0.6, 0.3), &p(0.4, 0.3)).unwrap();
        assert!(tilt.abs() < EPS);
    }

    #[test]
    fn test_tilt_sign_distinguishes_high_side() {
        // Second point lower in the frame (larger y)
        let left_high = line_tilt(&p(0.6, 0.30), &p(0.4, 0.35)).unwrap();
        let right_high = line_tilt(&p(0.6, 0.35), &p(0.4, 0.30)).unwrap();
        assert!(left_high > 0.0);
        assert!(right_high < 0.0);
        assert!((left_high + right_high).abs() < EPS);
    }

    #[test]
    fn test_tilt_is_mirror_invariant() {
        let a = line_tilt(&p(0.6, 0.30), &p(0.4, 0.35)).unwrap();
        let b = line_tilt(&p(0.4, 0.30), &p(0.6, 0.35)).unwrap();
        assert!((a - b).abs() < EPS);
    }

    #[test]
    fn test_vertical_inclination() {
        assert!(vertical_inclination(&p(0.5, 0.2), &p(0.5, 0.6)).unwrap().abs() < EPS);
        let leaning = vertical_inclination(&p(0.6, 0.5), &p(0.5, 0.6)).unwrap();
        assert!((leaning - 45.0).abs() < EPS);
        let other_way = vertical_inclination(&p(0.4, 0.5), &p(0.5, 0.6)).unwrap();
        assert!((other_way + 45.0).abs() < EPS);
    }

    #[test]
    fn test_normalized_offset() {
        assert_eq!(normalized_offset(0.05, 0.2).unwrap(), 0.25);
        assert!(normalized_offset(0.05, 0.0).is_err());
    }

    fn coord() -> impl Strategy<Value = f64> {
        -1.0..1.0f64
    }

    fn point() -> impl Strategy<Value = Point3> {
        (coord(), coord(), coord()).prop_map(|(x, y, z)| Point3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn joint_angle_is_symmetric_and_bounded(a in point(), b in point(), c in point()) {
            prop_assume!(a.distance(&b) > 1e-6 && c.distance(&b) > 1e-6);
            prop_assume!(a.distance(&c) > 1e-6);
            let forward = joint_angle(&a, &b, &c).unwrap();
            let backward = joint_angle(&c, &b, &a).unwrap();
            prop_assert!((forward - backward).abs() < 1e-9);
            prop_assert!((0.0..=180.0).contains(&forward));
        }

        #[test]
        fn line_tilt_is_bounded(a in point(), b in point()) {
            prop_assume!(a.distance(&b) > 1e-6);
            prop_assume!((a.x - b.x).abs() > 1e-9 || (a.y - b.y).abs() > 1e-9);
            let tilt = line_tilt(&a, &b).unwrap();
            prop_assert!((-90.0..=90.0).contains(&tilt));
        }
    }
}
