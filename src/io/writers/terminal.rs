use crate::classification::Severity;
use crate::io::output::{format_score, format_value, OutputWriter};
use crate::report::{AssessmentReport, AssessmentStatus};
use crate::risk::RiskLevel;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_reports(&mut self, reports: &[AssessmentReport]) -> anyhow::Result<()> {
        for report in reports {
            self.write_report(report)?;
        }
        if reports.len() > 1 {
            self.write_session_summary(reports)?;
        }
        Ok(())
    }
}

fn colored_risk(level: Option<RiskLevel>) -> ColoredString {
    match level {
        Some(RiskLevel::Low) => "LOW".green().bold(),
        Some(RiskLevel::Moderate) => "MODERATE".yellow().bold(),
        Some(RiskLevel::High) => "HIGH".red().bold(),
        Some(RiskLevel::Critical) => "CRITICAL".on_red().white().bold(),
        None => "N/A".dimmed(),
    }
}

fn colored_severity(severity: Severity) -> ColoredString {
    match severity {
        Severity::Normal => severity.as_str().normal(),
        Severity::Mild => severity.as_str().yellow(),
        Severity::Moderate => severity.as_str().bright_red(),
        Severity::Severe => severity.as_str().red().bold(),
    }
}

fn score_color(score: f64) -> Color {
    if score >= 90.0 {
        Color::Green
    } else if score >= 75.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            format!(
                "═══ Frame {} @ {} ms ═══",
                report.frame_id, report.timestamp_ms
            )
            .cyan()
            .bold()
        )?;

        if report.status == AssessmentStatus::NoBodyDetected {
            writeln!(self.writer, "{}", "No body detected".yellow())?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "Overall: {}  Risk: {}{}",
            format_score(report.overall_score).bold(),
            colored_risk(report.risk_level),
            if report.severe_override {
                " (raised by severe finding)"
            } else {
                ""
            }
        )?;

        self.write_region_table(report)?;
        self.write_flags(report)?;
        self.write_patterns(report)?;
        self.write_injury_risks(report)?;

        if !report.unassessed_regions.is_empty() {
            writeln!(
                self.writer,
                "{} {}",
                "Not assessed:".dimmed(),
                report.unassessed_regions.join(", ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_region_table(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Region", "Score", "Metrics", "Flags", "Movement"]);

        for score in &report.regional_scores {
            let movement = report
                .movement_for(&score.region)
                .map_or("-", |m| m.pattern.as_str());
            table.add_row(vec![
                Cell::new(&score.region),
                Cell::new(format!("{:.1}", score.score)).fg(score_color(score.score)),
                Cell::new(score.scored_metrics),
                Cell::new(score.flags.len()),
                Cell::new(movement),
            ]);
        }

        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_flags(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        if report.flags.is_empty() {
            writeln!(self.writer, "{}", "No deviations from normal ranges".green())?;
            return Ok(());
        }

        writeln!(self.writer, "{}", "Deviations:".bold())?;
        for flag in &report.flags {
            writeln!(
                self.writer,
                "  - {} ({}): {} [{}]",
                flag.metric,
                flag.region,
                format_value(flag.value, flag.unit),
                colored_severity(flag.severity)
            )?;
        }
        Ok(())
    }

    fn write_patterns(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        if report.compensation_patterns.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "{}", "Compensation patterns:".bold())?;
        for pattern in &report.compensation_patterns {
            writeln!(
                self.writer,
                "  - {}: {}",
                pattern.kind.to_string().magenta(),
                pattern.metrics.join(", ")
            )?;
        }
        Ok(())
    }

    fn write_injury_risks(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let elevated: Vec<_> = report
            .injury_risks
            .iter()
            .filter(|risk| risk.risk_level > RiskLevel::Low)
            .collect();
        if elevated.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "{}", "Injury risk:".bold())?;
        for risk in elevated {
            writeln!(
                self.writer,
                "  - {}: {}",
                risk.body_part,
                colored_risk(Some(risk.risk_level))
            )?;
        }
        Ok(())
    }

    fn write_session_summary(&mut self, reports: &[AssessmentReport]) -> anyhow::Result<()> {
        let detected: Vec<_> = reports.iter().filter(|r| r.is_body_detected()).collect();
        let count = |level: RiskLevel| {
            detected
                .iter()
                .filter(|r| r.risk_level == Some(level))
                .count()
        };

        writeln!(self.writer, "{}", "Session summary".bold().cyan())?;
        writeln!(
            self.writer,
            "Frames: {} ({} without a body)",
            reports.len(),
            reports.len() - detected.len()
        )?;
        writeln!(
            self.writer,
            "Risk: {} low, {} moderate, {} high, {} critical",
            count(RiskLevel::Low).to_string().green(),
            count(RiskLevel::Moderate).to_string().yellow(),
            count(RiskLevel::High).to_string().red(),
            count(RiskLevel::Critical).to_string().red().bold()
        )?;
        Ok(())
    }
}
