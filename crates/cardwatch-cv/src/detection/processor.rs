//! Per-frame detection: extraction followed by classification

use super::classifier::RegionClassifier;
use super::config::DetectionConfig;
use super::extractor::RegionExtractor;
use crate::analysis::{ImageAnalysis, NativeAnalysis};
use crate::bbox::BBox;
use crate::frame::{CandidateRegion, Frame};
use crate::Result;
use cardwatch_core::{FrameTally, Label};
use serde::Serialize;
use std::time::Instant;

/// One candidate region and its classification outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub bbox: BBox,
    /// `None` when the classifier found no pixels to judge
    pub label: Option<Label>,
}

/// Detection statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionStats {
    pub candidates: usize,
    pub labeled: usize,
    pub processing_time_ms: u64,
}

/// Everything found in a single frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameDetections {
    pub detections: Vec<Detection>,
    pub tally: FrameTally,
    pub stats: DetectionStats,
}

/// Turns one frame into a label tally.
///
/// Holds no per-frame state: the result depends only on the frame.
#[derive(Debug, Clone, Default)]
pub struct FrameProcessor<A = NativeAnalysis> {
    extractor: RegionExtractor<A>,
    classifier: RegionClassifier,
}

impl FrameProcessor<NativeAnalysis> {
    /// Processor backed by the pure-Rust analysis backend
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(
            RegionExtractor::new(NativeAnalysis::new(config.edges), config.region_filter),
            RegionClassifier::new(),
        )
    }
}

impl<A: ImageAnalysis> FrameProcessor<A> {
    pub fn new(extractor: RegionExtractor<A>, classifier: RegionClassifier) -> Self {
        Self { extractor, classifier }
    }

    /// Count the labeled regions in `frame`; regions without a label add nothing
    pub fn process(&self, frame: &Frame) -> Result<FrameTally> {
        Ok(self.detect(frame)?.tally)
    }

    /// Full per-region breakdown of `frame`
    pub fn detect(&self, frame: &Frame) -> Result<FrameDetections> {
        let start_time = Instant::now();

        let regions = self.extractor.extract(frame)?;
        let labels = self.classify_all(&regions);

        let tally: FrameTally = labels.iter().flatten().copied().collect();
        let detections: Vec<Detection> = regions
            .iter()
            .zip(labels)
            .map(|(region, label)| Detection { bbox: region.bbox(), label })
            .collect();

        let stats = DetectionStats {
            candidates: detections.len(),
            labeled: tally.total() as usize,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };
        tracing::trace!(
            candidates = stats.candidates,
            labeled = stats.labeled,
            ms = stats.processing_time_ms,
            "frame processed"
        );

        Ok(FrameDetections { detections, tally, stats })
    }

    fn classify_all(&self, regions: &[CandidateRegion<'_>]) -> Vec<Option<Label>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            regions.par_iter().map(|region| self.classifier.classify(region)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            regions.iter().map(|region| self.classifier.classify(region)).collect()
        }
    }
}
