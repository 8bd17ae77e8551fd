//! Names of the built-in regions and metrics.
//!
//! Regions and metrics are identified by plain strings so that additional
//! extractors and threshold tables can be registered without touching the
//! pipeline; these constants only name the ones shipped with the crate.

pub mod regions {
    pub const CERVICAL: &str = "cervical";
    pub const SHOULDER: &str = "shoulder";
    pub const SPINAL: &str = "spinal";
    pub const PELVIC: &str = "pelvic";
    pub const LOWER_EXTREMITY: &str = "lower_extremity";
}

pub mod metrics {
    // cervical
    pub const NECK_INCLINATION: &str = "neck_inclination";
    pub const FORWARD_HEAD_RATIO: &str = "forward_head_ratio";
    pub const HEAD_LATERAL_TILT: &str = "head_lateral_tilt";

    // shoulder complex
    pub const SHOULDER_TILT: &str = "shoulder_tilt";
    pub const LEFT_SHOULDER_PROTRACTION: &str = "left_shoulder_protraction";
    pub const RIGHT_SHOULDER_PROTRACTION: &str = "right_shoulder_protraction";
    pub const SCAPULAR_ASYMMETRY: &str = "scapular_asymmetry";
    pub const LEFT_ELBOW_FLEXION: &str = "left_elbow_flexion";
    pub const RIGHT_ELBOW_FLEXION: &str = "right_elbow_flexion";

    // spinal alignment
    pub const LATERAL_SPINAL_TILT: &str = "lateral_spinal_tilt";
    pub const SAGITTAL_CURVATURE: &str = "sagittal_curvature";

    // pelvic alignment
    pub const PELVIC_TILT: &str = "pelvic_tilt";
    pub const LEFT_PELVIC_SAGITTAL_TILT: &str = "left_pelvic_sagittal_tilt";
    pub const RIGHT_PELVIC_SAGITTAL_TILT: &str = "right_pelvic_sagittal_tilt";

    // lower extremity
    pub const LEFT_KNEE_FLEXION: &str = "left_knee_flexion";
    pub const RIGHT_KNEE_FLEXION: &str = "right_knee_flexion";
    pub const LEFT_KNEE_VALGUS: &str = "left_knee_valgus";
    pub const RIGHT_KNEE_VALGUS: &str = "right_knee_valgus";
    pub const KNEE_SYMMETRY: &str = "knee_symmetry";
    pub const STANCE_WIDTH_RATIO: &str = "stance_width_ratio";
}
