use anyhow::Result;
use clap::Parser;
use posturemap::cli::{Cli, Commands};
use posturemap::commands::{self, AssessConfig};
use tracing_subscriber::EnvFilter;

fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

// RUST_LOG wins over -v flags
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("posturemap={}", log_level(verbosity))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Assess {
            input,
            config,
            preset,
            min_visibility,
            smoothing_window,
            format,
            output,
            verbosity: _,
        } => commands::handle_assess(AssessConfig {
            input,
            config,
            preset,
            min_visibility,
            smoothing_window,
            format,
            output,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}
