//! Cardwatch Computer Vision Library
//!
//! Finds playing-card-shaped regions in captured frames, labels each by its
//! dominant colour and drives a session that accumulates the results.

pub mod analysis;
pub mod bbox;
pub mod detection;
pub mod error;
pub mod frame;
pub mod session;
pub mod source;
pub mod utils;

// Re-export commonly used types
pub use analysis::{Contour, ImageAnalysis, NativeAnalysis};
#[cfg(feature = "opencv")]
pub use analysis::OpenCvAnalysis;
pub use bbox::BBox;
pub use detection::{
    Detection, DetectionConfig, FrameDetections, FrameProcessor, RegionClassifier, RegionExtractor, RegionFilter,
};
pub use error::{Error, Result};
pub use frame::{CandidateRegion, Frame};
pub use session::{
    ReportKind, Reporter, SessionConfig, SessionLoop, SessionState, SessionSummary, StopReason, StopToken,
};
pub use source::{FrameSource, ImageFileSource, SourceSelector};
