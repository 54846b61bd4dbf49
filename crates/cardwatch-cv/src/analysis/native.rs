//! Pure-Rust analysis backend built on imageproc

use super::{polygon_area, Contour, ImageAnalysis};
use crate::bbox::BBox;
use crate::detection::config::EdgeParams;
use crate::frame::Frame;
use crate::utils::ImageUtils;
use crate::{Error, Result};
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::edges::canny;

/// imageproc blurs (sigma 1.4) before its Sobel pass, which roughly halves a
/// step edge's gradient compared with OpenCV's unblurred Sobel. Thresholds
/// are given on OpenCV's scale and multiplied by this before use.
const BLURRED_GRADIENT_SCALE: f32 = 0.5;

/// Canny edges on the luma image, outermost contours only
#[derive(Debug, Clone, Default)]
pub struct NativeAnalysis {
    params: EdgeParams,
}

impl NativeAnalysis {
    pub fn new(params: EdgeParams) -> Self {
        Self { params }
    }
}

impl ImageAnalysis for NativeAnalysis {
    fn edge_map(&self, frame: &Frame) -> Result<GrayImage> {
        if frame.is_empty() {
            return Err(Error::Analysis("cannot detect edges on an empty frame".into()));
        }
        let gray = ImageUtils::to_luma(frame.image());
        let low = self.params.low as f32 * BLURRED_GRADIENT_SCALE;
        let high = self.params.high as f32 * BLURRED_GRADIENT_SCALE;
        Ok(canny(&gray, low, high))
    }

    fn contours(&self, edges: &GrayImage) -> Result<Vec<Contour>> {
        if edges.width() == 0 || edges.height() == 0 {
            return Ok(Vec::new());
        }

        let contours = find_contours::<i32>(edges)
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| Contour::new(c.points))
            .collect();

        Ok(contours)
    }

    fn bounding_rect(&self, contour: &Contour) -> Result<BBox> {
        Ok(BBox::enclosing(contour.points.iter().map(|p| (p.x, p.y)))
            .unwrap_or_else(|| BBox::new(0, 0, 0, 0)))
    }

    fn area(&self, contour: &Contour) -> Result<f64> {
        Ok(polygon_area(&contour.points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_uniform_frame_has_no_edges() -> Result<()> {
        let analysis = NativeAnalysis::default();
        let frame = Frame::filled(64, 48, [120, 120, 120]);

        let edges = analysis.edge_map(&frame)?;
        assert_eq!(edges.dimensions(), (64, 48));
        assert!(edges.pixels().all(|p| p[0] == 0));
        assert!(analysis.contours(&edges)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_outline_yields_single_outer_contour() -> Result<()> {
        let analysis = NativeAnalysis::default();
        let mut edges = GrayImage::new(60, 60);
        for i in 10..40 {
            edges.put_pixel(i, 10, Luma([255]));
            edges.put_pixel(i, 39, Luma([255]));
            edges.put_pixel(10, i, Luma([255]));
            edges.put_pixel(39, i, Luma([255]));
        }

        let contours = analysis.contours(&edges)?;
        assert_eq!(contours.len(), 1);

        let bbox = analysis.bounding_rect(&contours[0])?;
        assert_eq!(bbox, BBox::new(10, 10, 30, 30));
        assert_eq!(analysis.area(&contours[0])?, 841.0);
        Ok(())
    }

    #[test]
    fn test_empty_contour_measures_zero() -> Result<()> {
        let analysis = NativeAnalysis::default();
        let contour = Contour::new(Vec::new());
        assert!(analysis.bounding_rect(&contour)?.is_empty());
        assert_eq!(analysis.area(&contour)?, 0.0);
        Ok(())
    }
}
