use crate::config::{self, EngineConfig, PosturemapConfig};
use crate::core::Snapshot;
use crate::io::{self, OutputFormat};
use crate::report::{AssessmentEngine, AssessmentReport};
use crate::smoothing::SmoothedEngine;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct AssessConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub preset: Option<crate::cli::ThresholdPreset>,
    pub min_visibility: Option<f64>,
    pub smoothing_window: Option<usize>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_assess(config: AssessConfig) -> Result<()> {
    let engine_config = resolve_engine_config(&config)?;
    let snapshots = io::read_snapshots(&config.input)?;
    let engine = AssessmentEngine::new(engine_config).context("invalid configuration")?;

    let reports = assess_snapshots(&engine, &snapshots);
    write_reports(&reports, config.format, config.output.as_ref())
}

/// File config (explicit or discovered), then preset, then command-line overrides.
pub fn resolve_engine_config(config: &AssessConfig) -> Result<EngineConfig> {
    let file_config: PosturemapConfig = match &config.config {
        Some(path) => config::load_config_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => config::load_config(),
    };

    let mut engine_config = file_config
        .resolve(config.preset.map(Into::into))
        .context("invalid configuration")?;

    if let Some(min_visibility) = config.min_visibility {
        engine_config.min_visibility = min_visibility;
    }
    if let Some(window) = config.smoothing_window {
        engine_config.smoothing.window = window;
    }

    engine_config.validate().context("invalid configuration")?;
    Ok(engine_config)
}

/// Frames of one session go through a single smoother in order when smoothing
/// is enabled; otherwise they are assessed in parallel.
pub fn assess_snapshots(engine: &AssessmentEngine, snapshots: &[Snapshot]) -> Vec<AssessmentReport> {
    if engine.config().smoothing.is_enabled() {
        log::info!(
            "Assessing {} frames sequentially with a {}-frame smoothing window",
            snapshots.len(),
            engine.config().smoothing.window
        );
        let mut session = SmoothedEngine::new(engine);
        snapshots.iter().map(|s| session.assess(s)).collect()
    } else {
        log::info!("Assessing {} frames", snapshots.len());
        engine.assess_batch(snapshots)
    }
}

fn write_reports(
    reports: &[AssessmentReport],
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    let mut writer = io::create_writer(format, writer);
    writer.write_reports(reports)?;
    Ok(())
}
