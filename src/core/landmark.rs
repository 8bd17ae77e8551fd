use serde::{Deserialize, Serialize};
use std::fmt;

/// Body points reported by the pose estimator, numbered as in the
/// 33-point MediaPipe pose topology.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LandmarkId {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkId {
    /// Number of identifiers in the topology.
    pub const COUNT: usize = 33;

    pub const ALL: [LandmarkId; Self::COUNT] = [
        LandmarkId::Nose,
        LandmarkId::LeftEyeInner,
        LandmarkId::LeftEye,
        LandmarkId::LeftEyeOuter,
        LandmarkId::RightEyeInner,
        LandmarkId::RightEye,
        LandmarkId::RightEyeOuter,
        LandmarkId::LeftEar,
        LandmarkId::RightEar,
        LandmarkId::MouthLeft,
        LandmarkId::MouthRight,
        LandmarkId::LeftShoulder,
        LandmarkId::RightShoulder,
        LandmarkId::LeftElbow,
        LandmarkId::RightElbow,
        LandmarkId::LeftWrist,
        LandmarkId::RightWrist,
        LandmarkId::LeftPinky,
        LandmarkId::RightPinky,
        LandmarkId::LeftIndex,
        LandmarkId::RightIndex,
        LandmarkId::LeftThumb,
        LandmarkId::RightThumb,
        LandmarkId::LeftHip,
        LandmarkId::RightHip,
        LandmarkId::LeftKnee,
        LandmarkId::RightKnee,
        LandmarkId::LeftAnkle,
        LandmarkId::RightAnkle,
        LandmarkId::LeftHeel,
        LandmarkId::RightHeel,
        LandmarkId::LeftFootIndex,
        LandmarkId::RightFootIndex,
    ];

    /// Look up an identifier by its MediaPipe pose index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LandmarkId::Nose => "nose",
            LandmarkId::LeftEyeInner => "left_eye_inner",
            LandmarkId::LeftEye => "left_eye",
            LandmarkId::LeftEyeOuter => "left_eye_outer",
            LandmarkId::RightEyeInner => "right_eye_inner",
            LandmarkId::RightEye => "right_eye",
            LandmarkId::RightEyeOuter => "right_eye_outer",
            LandmarkId::LeftEar => "left_ear",
            LandmarkId::RightEar => "right_ear",
            LandmarkId::MouthLeft => "mouth_left",
            LandmarkId::MouthRight => "mouth_right",
            LandmarkId::LeftShoulder => "left_shoulder",
            LandmarkId::RightShoulder => "right_shoulder",
            LandmarkId::LeftElbow => "left_elbow",
            LandmarkId::RightElbow => "right_elbow",
            LandmarkId::LeftWrist => "left_wrist",
            LandmarkId::RightWrist => "right_wrist",
            LandmarkId::LeftPinky => "left_pinky",
            LandmarkId::RightPinky => "right_pinky",
            LandmarkId::LeftIndex => "left_index",
            LandmarkId::RightIndex => "right_index",
            LandmarkId::LeftThumb => "left_thumb",
            LandmarkId::RightThumb => "right_thumb",
            LandmarkId::LeftHip => "left_hip",
            LandmarkId::RightHip => "right_hip",
            LandmarkId::LeftKnee => "left_knee",
            LandmarkId::RightKnee => "right_knee",
            LandmarkId::LeftAnkle => "left_ankle",
            LandmarkId::RightAnkle => "right_ankle",
            LandmarkId::LeftHeel => "left_heel",
            LandmarkId::RightHeel => "right_heel",
            LandmarkId::LeftFootIndex => "left_foot_index",
            LandmarkId::RightFootIndex => "right_foot_index",
        }
    }
}

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A position in the estimator's normalized frame space.
///
/// `x` grows to the right and `y` grows downward, both roughly in [0, 1];
/// `z` is depth relative to the hip midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn midpoint(&self, other: &Point3) -> Point3 {
        Point3 {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }

    pub fn sub(&self, other: &Point3) -> Point3 {
        Point3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(&self, other: &Point3) -> f64 {
        self.sub(other).norm()
    }
}

/// One detected body point. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: LandmarkId,
    #[serde(flatten)]
    pub position: Point3,
    /// Detection confidence in [0, 1]
    pub visibility: f64,
}

impl Landmark {
    /// Visibility outside [0, 1] (or NaN) is clamped into range.
    pub fn new(id: LandmarkId, position: Point3, visibility: f64) -> Self {
        let visibility = if visibility.is_nan() {
            0.0
        } else {
            visibility.clamp(0.0, 1.0)
        };
        Self {
            id,
            position,
            visibility,
        }
    }

    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility >= threshold
    }
}
