use crate::io::output::OutputWriter;
use crate::report::AssessmentReport;
use std::io::Write;

/// Pretty-printed JSON array of reports, one element per input snapshot.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_reports(&mut self, reports: &[AssessmentReport]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(reports)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}
