//! Console stand-ins for the LCD and the report endpoint.
use std::io::Write;

use stockbox_traits::{Ack, Display, ReportEvent, ReportSink};

use crate::error::HwError;
use crate::payload::ReportPayload;

/// Logs every screen update; remembers the last one.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    lines: (String, String),
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> (&str, &str) {
        (&self.lines.0, &self.lines.1)
    }
}

impl Display for ConsoleDisplay {
    fn show_lines(&mut self, line0: &str, line1: &str) {
        tracing::info!(target: "stockbox::display", line0, line1, "display");
        self.lines = (line0.to_string(), line1.to_string());
    }
}

/// Writes each report as one JSON line in the same shape the HTTP sink posts.
pub struct JsonLinesSink<W: Write> {
    out: W,
    zone: String,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W, zone: impl Into<String>) -> Self {
        Self {
            out,
            zone: zone.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn submit(
        &mut self,
        event: &ReportEvent,
    ) -> Result<Ack, Box<dyn std::error::Error + Send + Sync>> {
        let line = ReportPayload::new(event, &self.zone).to_json();
        writeln!(self.out, "{line}").map_err(HwError::from)?;
        self.out.flush().map_err(HwError::from)?;
        Ok(Ack { status: 0 })
    }
}
