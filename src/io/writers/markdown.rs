use crate::io::output::{format_score, format_value, OutputWriter};
use crate::report::AssessmentReport;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_reports(&mut self, reports: &[AssessmentReport]) -> anyhow::Result<()> {
        writeln!(self.writer, "# Posture Assessment Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Frames assessed: {}", reports.len())?;
        writeln!(self.writer)?;

        reports
            .iter()
            .try_for_each(|report| self.write_report(report))
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "## Frame {} ({} ms)",
            report.frame_id, report.timestamp_ms
        )?;
        writeln!(self.writer)?;

        if !report.is_body_detected() {
            writeln!(self.writer, "_No body detected._")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "| Summary | Value |")?;
        writeln!(self.writer, "|---------|-------|")?;
        writeln!(self.writer, "| Status | {} |", report.status.as_str())?;
        writeln!(
            self.writer,
            "| Overall score | {} |",
            format_score(report.overall_score)
        )?;
        writeln!(
            self.writer,
            "| Risk level | {} |",
            report
                .risk_level
                .map_or_else(|| "-".to_string(), |level| level.to_string())
        )?;
        writeln!(self.writer)?;

        self.write_scores(report)?;
        self.write_flags(report)?;
        self.write_patterns(report)?;
        self.write_injury_risks(report)?;

        if !report.unassessed_regions.is_empty() {
            writeln!(
                self.writer,
                "Not assessed: {}",
                report.unassessed_regions.join(", ")
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_scores(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        writeln!(self.writer, "### Regional Scores")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Region | Score | Flags | Movement |")?;
        writeln!(self.writer, "|--------|-------|-------|----------|")?;
        for score in &report.regional_scores {
            let movement = report
                .movement_for(&score.region)
                .map_or("-", |m| m.pattern.as_str());
            writeln!(
                self.writer,
                "| {} | {:.1} | {} | {} |",
                score.region,
                score.score,
                score.flags.len(),
                movement
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_flags(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        if report.flags.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "### Deviations")?;
        writeln!(self.writer)?;
        for flag in &report.flags {
            writeln!(
                self.writer,
                "- **{}** `{}`: {} (outside [{}, {}])",
                flag.severity,
                flag.metric,
                format_value(flag.value, flag.unit),
                flag.band.lower,
                flag.band.upper
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_patterns(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        if report.compensation_patterns.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "### Compensation Patterns")?;
        writeln!(self.writer)?;
        for pattern in &report.compensation_patterns {
            writeln!(
                self.writer,
                "- {} ({})",
                pattern.kind,
                pattern.metrics.join(", ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_injury_risks(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        if report.injury_risks.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "### Injury Risk")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Body part | Risk | Contributing metrics |")?;
        writeln!(self.writer, "|-----------|------|----------------------|")?;
        for risk in &report.injury_risks {
            let metrics = if risk.metrics.is_empty() {
                "-".to_string()
            } else {
                risk.metrics.join(", ")
            };
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                risk.body_part, risk.risk_level, metrics
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LandmarkId, Snapshot};
    use crate::extractors::test_support::upright_with;
    use crate::report::AssessmentEngine;

    #[test]
    fn test_markdown_sections() {
        let engine = AssessmentEngine::default();
        let forward_head = upright_with(&[
            (LandmarkId::LeftEar, [0.46, 0.15]),
            (LandmarkId::RightEar, [0.66, 0.15]),
        ]);
        let reports = engine.assess_batch(&[forward_head, Snapshot::empty(7, 0)]);

        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_reports(&reports)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with("# Posture Assessment Report"));
        assert!(output.contains("| cervical |"));
        assert!(output.contains("`forward_head_ratio`"));
        assert!(output.contains("| compensatory |"));
        assert!(output.contains("| neck | high |"));
        assert!(output.contains("## Frame 7 (0 ms)"));
        assert!(output.contains("_No body detected._"));
    }
}
