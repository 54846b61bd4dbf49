//! Cardwatch core data structures
//!
//! Labels, per-frame tallies and the cumulative session statistics they feed.
//! Nothing in here knows about pixels.

pub mod labels;
pub mod stats;

pub use labels::{FrameTally, Label, LabelCounts};
pub use stats::{StatisticsAggregator, StatsSnapshot};
