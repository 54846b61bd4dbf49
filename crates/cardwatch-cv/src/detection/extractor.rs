//! Candidate region extraction

use super::config::RegionFilter;
use crate::analysis::{ImageAnalysis, NativeAnalysis};
use crate::frame::{CandidateRegion, Frame};
use crate::Result;

/// Finds card-shaped regions in a frame.
///
/// Contours are admitted on enclosed area and bounding-box aspect ratio.
/// Overlapping or duplicate regions are returned as-is, in no particular order.
#[derive(Debug, Clone, Default)]
pub struct RegionExtractor<A = NativeAnalysis> {
    analysis: A,
    filter: RegionFilter,
}

impl<A: ImageAnalysis> RegionExtractor<A> {
    pub fn new(analysis: A, filter: RegionFilter) -> Self {
        Self { analysis, filter }
    }

    pub fn filter(&self) -> &RegionFilter {
        &self.filter
    }

    /// Candidate regions of `frame`; empty for a zero-area frame
    pub fn extract<'f>(&self, frame: &'f Frame) -> Result<Vec<CandidateRegion<'f>>> {
        if frame.is_empty() {
            return Ok(Vec::new());
        }

        let edges = self.analysis.edge_map(frame)?;
        let contours = self.analysis.contours(&edges)?;

        let mut regions = Vec::new();
        for contour in &contours {
            let area = self.analysis.area(contour)?;
            if !self.filter.accepts_area(area) {
                continue;
            }

            let bbox = self.analysis.bounding_rect(contour)?;
            if !self.filter.accepts_aspect(bbox.aspect_ratio()) {
                continue;
            }

            regions.push(frame.region(bbox));
        }

        tracing::trace!(contours = contours.len(), candidates = regions.len(), "extracted regions");
        Ok(regions)
    }
}
