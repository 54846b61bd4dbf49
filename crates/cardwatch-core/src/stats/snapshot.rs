use crate::labels::{Label, LabelCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable copy of the session totals at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Wall-clock time the session started
    pub started_at: DateTime<Utc>,
    /// Wall-clock time this snapshot describes
    pub taken_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub total_frames: u64,
    pub total_detections: u64,
    pub counts: LabelCounts,
    /// Frame-rate estimate from the most recent reporting interval
    pub fps: f64,
}

impl StatsSnapshot {
    /// Labeled detections per processed frame
    pub fn detection_rate(&self) -> f64 {
        if self.total_frames == 0 {
            0.0
        } else {
            self.total_detections as f64 / self.total_frames as f64
        }
    }

    /// Percentage of all detections that carried `label`
    pub fn share(&self, label: Label) -> f64 {
        if self.total_detections == 0 {
            0.0
        } else {
            self.counts.get(label) as f64 / self.total_detections as f64 * 100.0
        }
    }
}
