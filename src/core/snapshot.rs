use super::landmark::{Landmark, LandmarkId, Point3};
use crate::errors::AssessmentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All landmarks detected in one frame.
///
/// Holds at most one landmark per identifier. When the source reports the
/// same identifier twice, the more visible detection is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotRecord", into = "SnapshotRecord")]
pub struct Snapshot {
    frame_id: u64,
    timestamp_ms: i64,
    landmarks: BTreeMap<LandmarkId, Landmark>,
}

/// Wire shape of a snapshot: a flat landmark list.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotRecord {
    frame_id: u64,
    #[serde(default)]
    timestamp_ms: i64,
    #[serde(default)]
    landmarks: Vec<Landmark>,
}

impl From<SnapshotRecord> for Snapshot {
    fn from(record: SnapshotRecord) -> Self {
        Snapshot::from_landmarks(record.frame_id, record.timestamp_ms, record.landmarks)
    }
}

impl From<Snapshot> for SnapshotRecord {
    fn from(snapshot: Snapshot) -> Self {
        SnapshotRecord {
            frame_id: snapshot.frame_id,
            timestamp_ms: snapshot.timestamp_ms,
            landmarks: snapshot.landmarks.into_values().collect(),
        }
    }
}

impl Snapshot {
    pub fn empty(frame_id: u64, timestamp_ms: i64) -> Self {
        Self {
            frame_id,
            timestamp_ms,
            landmarks: BTreeMap::new(),
        }
    }

    pub fn from_landmarks(
        frame_id: u64,
        timestamp_ms: i64,
        landmarks: impl IntoIterator<Item = Landmark>,
    ) -> Self {
        landmarks
            .into_iter()
            .fold(Self::empty(frame_id, timestamp_ms), Self::with_landmark)
    }

    /// Build a snapshot from MediaPipe's indexed `[x, y, z, visibility]` rows.
    /// Rows past the 33-point topology are ignored.
    pub fn from_mediapipe(frame_id: u64, timestamp_ms: i64, rows: &[[f64; 4]]) -> Self {
        let landmarks = rows.iter().enumerate().filter_map(|(index, row)| {
            LandmarkId::from_index(index)
                .map(|id| Landmark::new(id, Point3::new(row[0], row[1], row[2]), row[3]))
        });
        Self::from_landmarks(frame_id, timestamp_ms, landmarks)
    }

    /// Return a snapshot that also contains `landmark`.
    pub fn with_landmark(mut self, landmark: Landmark) -> Self {
        let landmark = Landmark::new(landmark.id, landmark.position, landmark.visibility);
        match self.landmarks.get(&landmark.id) {
            Some(existing) if existing.visibility >= landmark.visibility => {
                tracing::trace!(
                    landmark = %landmark.id,
                    frame_id = self.frame_id,
                    "dropping less visible duplicate landmark"
                );
            }
            _ => {
                self.landmarks.insert(landmark.id, landmark);
            }
        }
        self
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn get(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.get(&id)
    }

    pub fn landmarks(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.values()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn ensure_not_empty(&self) -> Result<(), AssessmentError> {
        if self.is_empty() {
            Err(AssessmentError::EmptySnapshot {
                frame_id: self.frame_id,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmark(id: LandmarkId, visibility: f64) -> Landmark {
        Landmark::new(id, Point3::new(0.5, 0.5, 0.0), visibility)
    }

    #[test]
    fn test_duplicate_keeps_more_visible() {
        let snapshot = Snapshot::from_landmarks(
            1,
            0,
            vec![
                landmark(LandmarkId::Nose, 0.4),
                landmark(LandmarkId::Nose, 0.9),
                landmark(LandmarkId::Nose, 0.6),
            ],
        );
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(LandmarkId::Nose).map(|l| l.visibility), Some(0.9));
    }

    #[test]
    fn test_from_mediapipe_maps_indices() {
        let mut rows = vec![[0.0, 0.0, 0.0, 0.0]; 34];
        rows[11] = [0.4, 0.3, 0.0, 0.95];
        rows[33] = [9.0, 9.0, 9.0, 1.0];
        let snapshot = Snapshot::from_mediapipe(7, 1000, &rows);

        assert_eq!(snapshot.len(), LandmarkId::COUNT);
        let shoulder = snapshot.get(LandmarkId::LeftShoulder).unwrap();
        assert_eq!(shoulder.position, Point3::new(0.4, 0.3, 0.0));
        assert_eq!(shoulder.visibility, 0.95);
    }

    #[test]
    fn test_empty_snapshot_is_reported() {
        let snapshot = Snapshot::empty(3, 0);
        assert_eq!(
            snapshot.ensure_not_empty(),
            Err(AssessmentError::EmptySnapshot { frame_id: 3 })
        );
    }

    #[test]
    fn test_deserialize_from_landmark_list() {
        let json = r#"{
            "frame_id": 12,
            "timestamp_ms": 400,
            "landmarks": [
                {"id": "left_ear", "x": 0.4, "y": 0.15, "z": 0.0, "visibility": 0.9},
                {"id": "right_ear", "x": 0.6, "y": 0.15, "z": 0.0, "visibility": 0.8}
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.frame_id(), 12);
        assert_eq!(snapshot.timestamp_ms(), 400);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get(LandmarkId::RightEar).is_some());
    }

    #[test]
    fn test_missing_landmarks_field_is_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"frame_id": 1}"#).unwrap();
        assert!(snapshot.is_empty());
    }
}
