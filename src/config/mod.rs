//! Engine configuration: reference ranges, scoring weights, visibility
//! cut-off and temporal smoothing, plus the `.posturemap.toml` loader.

mod core;
mod loader;
pub mod presets;
mod scoring;
mod thresholds;

pub use self::core::{
    EngineConfig, PosturemapConfig, SmoothingConfig, SmoothingMethod, MAX_SMOOTHING_WINDOW,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path, parse_config,
    CONFIG_FILE_NAME,
};
pub use presets::ThresholdPreset;
pub use scoring::ScoringWeights;
pub use thresholds::{Band, ThresholdBands, ThresholdTable};
