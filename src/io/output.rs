use crate::core::MeasurementUnit;
use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use crate::report::AssessmentReport;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
}

pub trait OutputWriter {
    fn write_reports(&mut self, reports: &[AssessmentReport]) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
    }
}

/// Display form of a measured value, `12.3°` or `0.250`.
pub fn format_value(value: f64, unit: MeasurementUnit) -> String {
    match unit {
        MeasurementUnit::Degrees => format!("{value:.1}{}", unit.suffix()),
        MeasurementUnit::Ratio => format!("{value:.3}{}", unit.suffix()),
    }
}

pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{s:.1}"))
}
