//! Population presets for the reference ranges.
//!
//! - **Strict**: narrower bands, e.g. for athletes or post-rehabilitation checks
//! - **Balanced**: the clinical defaults
//! - **Lenient**: wider bands, e.g. for older adults or chronic conditions

use super::thresholds::ThresholdTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPreset {
    Strict,
    #[default]
    Balanced,
    Lenient,
}

impl ThresholdPreset {
    /// Factor applied to every band's half-width.
    pub fn band_scale(self) -> f64 {
        match self {
            ThresholdPreset::Strict => 0.75,
            ThresholdPreset::Balanced => 1.0,
            ThresholdPreset::Lenient => 1.25,
        }
    }

    pub fn thresholds(self) -> ThresholdTable {
        match self {
            ThresholdPreset::Balanced => ThresholdTable::clinical_defaults(),
            preset => ThresholdTable::clinical_defaults().scaled(preset.band_scale()),
        }
    }
}
