// Shared fixtures for posturemap integration tests
#![allow(dead_code)]

use posturemap::{Landmark, LandmarkId, Point3, Snapshot};

/// Upright, symmetric standing figure in normalized image coordinates.
pub fn upright_rows() -> Vec<(LandmarkId, [f64; 2])> {
    use LandmarkId::*;
    vec![
        (Nose, [0.50, 0.12]),
        (LeftEar, [0.40, 0.15]),
        (RightEar, [0.60, 0.15]),
        (LeftShoulder, [0.40, 0.30]),
        (RightShoulder, [0.60, 0.30]),
        (LeftElbow, [0.38, 0.45]),
        (RightElbow, [0.62, 0.45]),
        (LeftWrist, [0.38, 0.60]),
        (RightWrist, [0.62, 0.60]),
        (LeftHip, [0.40, 0.55]),
        (RightHip, [0.60, 0.55]),
        (LeftKnee, [0.40, 0.75]),
        (RightKnee, [0.60, 0.75]),
        (LeftAnkle, [0.40, 0.95]),
        (RightAnkle, [0.60, 0.95]),
    ]
}

pub fn snapshot(frame_id: u64, rows: &[(LandmarkId, [f64; 2])]) -> Snapshot {
    Snapshot::from_landmarks(
        frame_id,
        frame_id as i64 * 33,
        rows.iter()
            .map(|(id, [x, y])| Landmark::new(*id, Point3::new(*x, *y, 0.0), 0.95)),
    )
}

pub fn upright(frame_id: u64) -> Snapshot {
    snapshot(frame_id, &upright_rows())
}

/// Upright figure with some landmarks moved.
pub fn posed(frame_id: u64, moves: &[(LandmarkId, [f64; 2])]) -> Snapshot {
    let rows: Vec<_> = upright_rows()
        .into_iter()
        .map(|(id, position)| {
            moves
                .iter()
                .find(|(moved, _)| *moved == id)
                .map_or((id, position), |(_, to)| (id, *to))
        })
        .collect();
    snapshot(frame_id, &rows)
}

/// Both ears shifted forward by 0.06, 0.3 shoulder widths.
pub fn forward_head(frame_id: u64) -> Snapshot {
    posed(
        frame_id,
        &[
            (LandmarkId::LeftEar, [0.46, 0.15]),
            (LandmarkId::RightEar, [0.66, 0.15]),
        ],
    )
}

/// Right hip dropped far enough for a severe pelvic tilt.
pub fn dropped_hip(frame_id: u64) -> Snapshot {
    posed(frame_id, &[(LandmarkId::RightHip, [0.60, 0.60])])
}

/// Hips shifted forward of the knees: both thighs lean about 11 degrees and
/// the trunk bends at the hips.
pub fn pelvis_forward(frame_id: u64) -> Snapshot {
    posed(
        frame_id,
        &[
            (LandmarkId::LeftHip, [0.44, 0.55]),
            (LandmarkId::RightHip, [0.64, 0.55]),
        ],
    )
}

/// Right shoulder and right hip both dropped by 0.02.
pub fn right_side_dropped(frame_id: u64) -> Snapshot {
    posed(
        frame_id,
        &[
            (LandmarkId::RightShoulder, [0.60, 0.32]),
            (LandmarkId::RightHip, [0.60, 0.57]),
        ],
    )
}

/// Upright figure with the given landmarks reported at `visibility`.
pub fn dimmed(frame_id: u64, ids: &[LandmarkId], visibility: f64) -> Snapshot {
    Snapshot::from_landmarks(
        frame_id,
        frame_id as i64 * 33,
        upright_rows().into_iter().map(|(id, [x, y])| {
            let visibility = if ids.contains(&id) { visibility } else { 0.95 };
            Landmark::new(id, Point3::new(x, y, 0.0), visibility)
        }),
    )
}

/// The upright figure as a MediaPipe `[x, y, z, visibility]` array.
pub fn upright_mediapipe_rows() -> Vec<[f64; 4]> {
    let mut rows = vec![[0.0, 0.0, 0.0, 0.0]; LandmarkId::COUNT];
    for (id, [x, y]) in upright_rows() {
        rows[id.index()] = [x, y, 0.0, 0.95];
    }
    rows
}
