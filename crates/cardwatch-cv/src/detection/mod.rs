//! Card-region detection: geometric extraction and colour classification

pub mod classifier;
pub mod config;
pub mod extractor;
pub mod processor;

pub use classifier::{ChannelMeans, RegionClassifier};
pub use config::{DetectionConfig, EdgeParams, RegionFilter};
pub use extractor::RegionExtractor;
pub use processor::{Detection, DetectionStats, FrameDetections, FrameProcessor};
