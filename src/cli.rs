use crate::io::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThresholdPreset {
    /// Narrower reference ranges
    Strict,
    /// Clinical default ranges (default)
    Balanced,
    /// Wider reference ranges
    Lenient,
}

impl From<ThresholdPreset> for crate::config::ThresholdPreset {
    fn from(preset: ThresholdPreset) -> Self {
        match preset {
            ThresholdPreset::Strict => crate::config::ThresholdPreset::Strict,
            ThresholdPreset::Balanced => crate::config::ThresholdPreset::Balanced,
            ThresholdPreset::Lenient => crate::config::ThresholdPreset::Lenient,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "posturemap")]
#[command(about = "Biomechanical posture assessment from pose landmarks", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess one or more landmark snapshots
    Assess {
        /// JSON file holding a snapshot or an array of snapshots, `-` for stdin
        input: PathBuf,

        /// Configuration file (defaults to the nearest .posturemap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Population preset for the reference ranges
        #[arg(long, value_enum)]
        preset: Option<ThresholdPreset>,

        /// Landmarks below this visibility are ignored
        #[arg(long, env = "POSTUREMAP_MIN_VISIBILITY")]
        min_visibility: Option<f64>,

        /// Smooth measurements over this many frames (0 disables smoothing)
        #[arg(long)]
        smoothing_window: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Increase log verbosity
        ///
        /// -v: info, -vv: debug, -vvv: trace
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .posturemap.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Assess { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_assess() {
        let cli = Cli::try_parse_from([
            "posturemap",
            "assess",
            "frames.json",
            "--preset",
            "lenient",
            "--smoothing-window",
            "5",
            "-f",
            "json",
            "-vv",
        ])
        .unwrap();

        match cli.command {
            Commands::Assess {
                input,
                preset,
                smoothing_window,
                format,
                verbosity,
                ..
            } => {
                assert_eq!(input, PathBuf::from("frames.json"));
                assert!(matches!(preset, Some(ThresholdPreset::Lenient)));
                assert_eq!(smoothing_window, Some(5));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(verbosity, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
