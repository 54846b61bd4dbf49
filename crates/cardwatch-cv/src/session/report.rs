//! Snapshot sinks

use cardwatch_core::StatsSnapshot;
use serde::{Deserialize, Serialize};

/// Why a snapshot is being emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// A reporting interval elapsed while running
    Periodic,
    /// The session stopped; emitted exactly once per run
    Final,
}

/// Consumer of statistics snapshots. Rendering is entirely up to the sink.
pub trait Reporter {
    fn report(&mut self, snapshot: &StatsSnapshot, kind: ReportKind);
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, snapshot: &StatsSnapshot, kind: ReportKind) {
        (**self).report(snapshot, kind)
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, snapshot: &StatsSnapshot, kind: ReportKind) {
        (**self).report(snapshot, kind)
    }
}

/// Keeps every snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    pub reports: Vec<(ReportKind, StatsSnapshot)>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: ReportKind) -> usize {
        self.reports.iter().filter(|(k, _)| *k == kind).count()
    }

    /// The final snapshot, if the session has stopped
    pub fn final_snapshot(&self) -> Option<&StatsSnapshot> {
        self.reports
            .iter()
            .find(|(kind, _)| *kind == ReportKind::Final)
            .map(|(_, snapshot)| snapshot)
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, snapshot: &StatsSnapshot, kind: ReportKind) {
        self.reports.push((kind, snapshot.clone()));
    }
}
