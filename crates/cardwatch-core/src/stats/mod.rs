//! Cumulative session statistics

pub mod aggregator;
pub mod snapshot;

pub use aggregator::StatisticsAggregator;
pub use snapshot::StatsSnapshot;
