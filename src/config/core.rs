use super::presets::ThresholdPreset;
use super::scoring::ScoringWeights;
use super::thresholds::{ThresholdBands, ThresholdTable};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest accepted smoothing window (about four seconds at 30 Hz).
pub const MAX_SMOOTHING_WINDOW: usize = 120;

/// How the smoothing stage averages a metric's recent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    /// Arithmetic mean of the last `window` values
    #[default]
    Windowed,
    /// Exponential moving average with `alpha = 2 / (window + 1)`
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Number of frames to smooth over; 0 disables smoothing
    #[serde(default)]
    pub window: usize,

    #[serde(default)]
    pub method: SmoothingMethod,
}

impl SmoothingConfig {
    pub fn is_enabled(&self) -> bool {
        self.window > 0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window > MAX_SMOOTHING_WINDOW {
            return Err(ConfigError::invalid(
                "smoothing.window",
                format!(
                    "window of {} exceeds the maximum of {MAX_SMOOTHING_WINDOW}",
                    self.window
                ),
            ));
        }
        Ok(())
    }
}

/// Fully resolved settings for one assessment engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Landmarks below this visibility are treated as missing
    pub min_visibility: f64,
    pub thresholds: ThresholdTable,
    pub weights: ScoringWeights,
    pub smoothing: SmoothingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_visibility: default_min_visibility(),
            thresholds: ThresholdTable::clinical_defaults(),
            weights: ScoringWeights::default(),
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_preset(preset: ThresholdPreset) -> Self {
        Self {
            thresholds: preset.thresholds(),
            ..Self::default()
        }
    }

    pub fn with_min_visibility(mut self, min_visibility: f64) -> Self {
        self.min_visibility = min_visibility;
        self
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingConfig) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdTable) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(ConfigError::invalid(
                "min_visibility",
                format!("must be within [0, 1], got {}", self.min_visibility),
            ));
        }
        self.thresholds.validate()?;
        self.weights.validate()?;
        self.smoothing.validate()
    }
}

/// Contents of a `.posturemap.toml` file. Every section is optional and
/// layers on top of the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PosturemapConfig {
    /// Population preset the threshold overrides are applied on top of
    #[serde(default)]
    pub preset: Option<ThresholdPreset>,

    #[serde(default)]
    pub min_visibility: Option<f64>,

    /// Per-metric reference ranges
    #[serde(default)]
    pub thresholds: Option<BTreeMap<String, ThresholdBands>>,

    /// Per-metric scoring weights
    #[serde(default)]
    pub weights: Option<ScoringWeights>,

    #[serde(default)]
    pub smoothing: Option<SmoothingConfig>,
}

impl PosturemapConfig {
    /// Layer this file over the defaults and validate the result.
    /// `preset` takes precedence over the file's own `preset` key.
    pub fn resolve(&self, preset: Option<ThresholdPreset>) -> Result<EngineConfig, ConfigError> {
        let preset = preset.or(self.preset).unwrap_or_default();
        let mut config = EngineConfig::with_preset(preset);

        if let Some(min_visibility) = self.min_visibility {
            config.min_visibility = min_visibility;
        }
        if let Some(thresholds) = &self.thresholds {
            config.thresholds.merge(thresholds.clone());
        }
        if let Some(weights) = &self.weights {
            config.weights.merge(weights);
        }
        if let Some(smoothing) = self.smoothing {
            config.smoothing = smoothing;
        }

        config.validate()?;
        Ok(config)
    }
}

fn default_min_visibility() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::thresholds::Band;
    use crate::core::metrics;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.min_visibility, 0.5);
        assert!(!config.smoothing.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_visibility_out_of_range_is_invalid() {
        let config = EngineConfig::default().with_min_visibility(1.5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_visibility"));
    }

    #[test]
    fn test_oversized_smoothing_window_is_invalid() {
        let config = EngineConfig::default().with_smoothing(SmoothingConfig {
            window: MAX_SMOOTHING_WINDOW + 1,
            method: SmoothingMethod::Windowed,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_file_resolves_to_defaults() {
        let resolved = PosturemapConfig::default().resolve(None).unwrap();
        assert_eq!(resolved, EngineConfig::default());
    }

    #[test]
    fn test_explicit_preset_beats_file_preset() {
        let file = PosturemapConfig {
            preset: Some(ThresholdPreset::Lenient),
            ..Default::default()
        };
        let resolved = file.resolve(Some(ThresholdPreset::Strict)).unwrap();
        assert_eq!(resolved.thresholds, ThresholdPreset::Strict.thresholds());
    }

    #[test]
    fn test_threshold_override_applies_after_preset() {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(
            metrics::PELVIC_TILT.to_string(),
            ThresholdBands::symmetric(1.0, 2.0, 3.0),
        );
        let file = PosturemapConfig {
            preset: Some(ThresholdPreset::Lenient),
            thresholds: Some(thresholds),
            ..Default::default()
        };
        let resolved = file.resolve(None).unwrap();
        assert_eq!(
            resolved.thresholds.get(metrics::PELVIC_TILT).map(|b| b.normal),
            Some(Band::symmetric(1.0))
        );
        assert_eq!(
            resolved.thresholds.get(metrics::SHOULDER_TILT).map(|b| b.normal),
            Some(Band::symmetric(3.75))
        );
    }
}
