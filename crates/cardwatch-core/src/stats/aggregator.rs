//! Running totals over an unbounded stream of frame tallies

use super::snapshot::StatsSnapshot;
use crate::labels::{FrameTally, Label, LabelCounts};
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Cumulative state for one session.
///
/// Owned by whoever drives the session; there is no global instance. The
/// totals only grow: nothing here resets them for the life of the value.
#[derive(Debug, Clone)]
pub struct StatisticsAggregator {
    total_frames: u64,
    total_detections: u64,
    counts: LabelCounts,
    started: Instant,
    started_at: DateTime<Utc>,
    fps: f64,
}

impl StatisticsAggregator {
    /// Create an aggregator whose session began at `started`
    pub fn new(started: Instant) -> Self {
        Self {
            total_frames: 0,
            total_detections: 0,
            counts: LabelCounts::new(),
            started,
            started_at: Utc::now(),
            fps: 0.0,
        }
    }

    /// Create an aggregator whose session begins now
    pub fn start() -> Self {
        Self::new(Instant::now())
    }

    /// Fold one frame's tally into the totals.
    ///
    /// The frame counter advances by exactly one even when the tally is empty.
    pub fn append(&mut self, tally: &FrameTally) {
        for (label, count) in tally.present() {
            self.counts.add(label, count);
            self.total_detections += count;
        }
        self.total_frames += 1;

        debug_assert!(self.is_consistent());
    }

    /// Recompute the frame rate from frames counted over `elapsed_secs`.
    ///
    /// A non-positive (or NaN) interval leaves the previous estimate untouched.
    pub fn tick_rate(&mut self, elapsed_frames: u64, elapsed_secs: f64) {
        if elapsed_secs > 0.0 && elapsed_secs.is_finite() {
            self.fps = elapsed_frames as f64 / elapsed_secs;
        }
    }

    /// Point-in-time copy of the totals as seen at `now`
    pub fn snapshot(&self, now: Instant) -> StatsSnapshot {
        let elapsed = now.saturating_duration_since(self.started);
        let taken_at = chrono::Duration::from_std(elapsed)
            .ok()
            .and_then(|delta| self.started_at.checked_add_signed(delta))
            .unwrap_or(self.started_at);

        StatsSnapshot {
            started_at: self.started_at,
            taken_at,
            elapsed_secs: elapsed.as_secs_f64(),
            total_frames: self.total_frames,
            total_detections: self.total_detections,
            counts: self.counts,
            fps: self.fps,
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn total_detections(&self) -> u64 {
        self.total_detections
    }

    pub fn counts(&self) -> &LabelCounts {
        &self.counts
    }

    pub fn count(&self, label: Label) -> u64 {
        self.counts.get(label)
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    /// Total detections equal the sum of the per-label counts
    pub fn is_consistent(&self) -> bool {
        self.total_detections == self.counts.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tally(entries: &[(Label, u64)]) -> FrameTally {
        let mut tally = FrameTally::new();
        for &(label, count) in entries {
            tally.add(label, count);
        }
        tally
    }

    #[test]
    fn test_append_scenario() {
        let mut stats = StatisticsAggregator::start();

        stats.append(&tally(&[(Label::HeartOrDiamond, 5)]));
        assert!(stats.is_consistent());
        stats.append(&tally(&[(Label::SpadeOrClub, 3)]));
        assert!(stats.is_consistent());
        stats.append(&FrameTally::new());
        assert!(stats.is_consistent());

        assert_eq!(stats.total_frames(), 3);
        assert_eq!(stats.total_detections(), 8);
        assert_eq!(stats.count(Label::HeartOrDiamond), 5);
        assert_eq!(stats.count(Label::SpadeOrClub), 3);
        assert_eq!(stats.count(Label::UnknownCard), 0);
        assert_eq!(stats.counts().present().count(), 2);
    }

    #[test]
    fn test_empty_tallies_still_count_frames() {
        let mut stats = StatisticsAggregator::start();
        for _ in 0..17 {
            stats.append(&FrameTally::new());
        }
        assert_eq!(stats.total_frames(), 17);
        assert_eq!(stats.total_detections(), 0);
    }

    #[test]
    fn test_invariant_holds_after_every_append() {
        let mut stats = StatisticsAggregator::start();
        let mut expected_frames = 0;

        for i in 0..50u64 {
            let mut t = FrameTally::new();
            t.add(Label::ALL[(i % 3) as usize], i % 4);
            if i % 5 == 0 {
                t.add(Label::UnknownCard, 2);
            }
            stats.append(&t);
            expected_frames += 1;

            assert!(stats.is_consistent());
            assert_eq!(stats.total_frames(), expected_frames);
        }
    }

    #[test]
    fn test_tick_rate() {
        let mut stats = StatisticsAggregator::start();

        stats.tick_rate(0, 5.0);
        assert_eq!(stats.fps(), 0.0);

        stats.tick_rate(30, 2.0);
        assert_eq!(stats.fps(), 15.0);

        stats.tick_rate(50, 0.0);
        assert_eq!(stats.fps(), 15.0);

        stats.tick_rate(50, -1.0);
        stats.tick_rate(50, f64::NAN);
        assert_eq!(stats.fps(), 15.0);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let started = Instant::now();
        let mut stats = StatisticsAggregator::new(started);
        stats.append(&tally(&[(Label::UnknownCard, 2)]));
        stats.tick_rate(4, 2.0);

        let now = started + Duration::from_millis(1500);
        let first = stats.snapshot(now);
        let second = stats.snapshot(now);

        assert_eq!(first, second);
        assert_eq!(first.total_frames, 1);
        assert_eq!(first.total_detections, 2);
        assert_eq!(first.fps, 2.0);
        assert!((first.elapsed_secs - 1.5).abs() < 1e-9);
        assert_eq!(stats.total_frames(), 1);
    }

    #[test]
    fn test_snapshot_before_start_clamps_elapsed() {
        let started = Instant::now() + Duration::from_secs(5);
        let stats = StatisticsAggregator::new(started);
        let snapshot = stats.snapshot(Instant::now());
        assert_eq!(snapshot.elapsed_secs, 0.0);
    }
}
