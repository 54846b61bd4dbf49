//! Console and JSON renderings of session snapshots

use std::io::{self, Write};

use cardwatch_core::StatsSnapshot;
use cardwatch_cv::{ReportKind, Reporter};
use chrono::Local;
use serde::Serialize;

const RULE_WIDTH: usize = 60;

/// Boxed statistics table, one per snapshot
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleReporter {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, snapshot: &StatsSnapshot, kind: ReportKind) -> io::Result<()> {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let out = &mut self.out;

        if kind == ReportKind::Final {
            writeln!(out, "\n\nFinal Statistics:")?;
        }
        writeln!(out, "\n{}", heavy)?;
        writeln!(
            out,
            "Card Detection Statistics - {}",
            snapshot.taken_at.with_timezone(&Local).format("%H:%M:%S")
        )?;
        writeln!(out, "{}", heavy)?;
        writeln!(out, "Session Duration: {:.1} seconds", snapshot.elapsed_secs)?;
        writeln!(out, "Frames Processed: {}", snapshot.total_frames)?;
        writeln!(out, "Current FPS: {:.1}", snapshot.fps)?;
        writeln!(out, "Total Cards Detected: {}", snapshot.total_detections)?;
        writeln!(out, "\nCard Type Breakdown:")?;
        writeln!(out, "{}", light)?;

        let mut present: Vec<_> = snapshot.counts.present().collect();
        present.sort_by_key(|(label, _)| label.as_str());
        if present.is_empty() {
            writeln!(out, "  No cards detected yet...")?;
        }
        for (label, count) in present {
            writeln!(
                out,
                "  {:20}: {:5} ({:5.1}%)",
                label.as_str(),
                count,
                snapshot.share(label)
            )?;
        }

        writeln!(out, "{}", heavy)?;
        out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, snapshot: &StatsSnapshot, kind: ReportKind) {
        if let Err(e) = self.render(snapshot, kind) {
            tracing::warn!(error = %e, "failed to write statistics");
        }
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    kind: ReportKind,
    #[serde(flatten)]
    snapshot: &'a StatsSnapshot,
    detection_rate: f64,
}

/// One JSON object per line, per snapshot
pub struct JsonReporter<W: Write = io::Stdout> {
    out: W,
}

impl JsonReporter {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, snapshot: &StatsSnapshot, kind: ReportKind) -> anyhow::Result<()> {
        let line = JsonLine {
            kind,
            snapshot,
            detection_rate: snapshot.detection_rate(),
        };
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, snapshot: &StatsSnapshot, kind: ReportKind) {
        if let Err(e) = self.render(snapshot, kind) {
            tracing::warn!(error = %e, "failed to write statistics");
        }
    }
}
