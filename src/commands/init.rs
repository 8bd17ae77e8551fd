use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Posturemap Configuration

# Reference range preset: "strict", "balanced" or "lenient"
preset = "balanced"

# Landmarks below this visibility are treated as missing
min_visibility = 0.5

# Per-metric reference ranges. Each band is an open interval [lower, upper];
# values outside "moderate" are severe. Listed metrics replace the defaults.
#
# [thresholds.forward_head_ratio]
# normal = [-0.15, 0.15]
# mild = [-0.25, 0.25]
# moderate = [-0.35, 0.35]

[weights]
default = 1.0
forward_head_ratio = 3.0
shoulder_tilt = 1.5
lateral_spinal_tilt = 1.5
pelvic_tilt = 1.5
knee_symmetry = 1.5

[smoothing]
# Frames to average over; 0 disables smoothing
window = 0
# "windowed" or "exponential"
method = "windowed"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))
}
