//! Error types for the assessment pipeline and its configuration.
//!
//! Every [`AssessmentError`] is recovered inside the pipeline:
//!
//! - `DegenerateGeometry`: the single measurement is skipped
//! - `InsufficientLandmarks`: the region is reported as unassessed
//! - `EmptySnapshot`: the report is marked "no body detected"
//!
//! [`ConfigError`] is the only error a caller ever has to handle, and only
//! when loading or validating configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// Two input points coincide, so a direction vector has zero length.
    #[error("degenerate geometry in {context}: zero-length vector")]
    DegenerateGeometry { context: &'static str },

    /// A region produced no scoreable measurement.
    #[error("insufficient landmarks to assess region '{region}'")]
    InsufficientLandmarks { region: String },

    #[error("snapshot for frame {frame_id} contains no landmarks")]
    EmptySnapshot { frame_id: u64 },
}

impl AssessmentError {
    pub fn degenerate(context: &'static str) -> Self {
        AssessmentError::DegenerateGeometry { context }
    }

    pub fn insufficient(region: impl Into<String>) -> Self {
        AssessmentError::InsufficientLandmarks {
            region: region.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        assert_eq!(
            AssessmentError::degenerate("line_tilt").to_string(),
            "degenerate geometry in line_tilt: zero-length vector"
        );
        assert_eq!(
            AssessmentError::insufficient("pelvic").to_string(),
            "insufficient landmarks to assess region 'pelvic'"
        );
        assert_eq!(
            ConfigError::invalid("min_visibility", "must be within [0, 1]").to_string(),
            "invalid value for 'min_visibility': must be within [0, 1]"
        );
    }
}
