//! Image-analysis capability consumed by region extraction
//!
//! Edge detection, contour tracing and contour measurement are black-box
//! primitives behind [`ImageAnalysis`]. [`NativeAnalysis`] is the pure-Rust
//! default; [`OpenCvAnalysis`] is available with the `opencv` feature.

mod native;
#[cfg(feature = "opencv")]
mod opencv_backend;

pub use native::NativeAnalysis;
#[cfg(feature = "opencv")]
pub use opencv_backend::OpenCvAnalysis;

use crate::bbox::BBox;
use crate::frame::Frame;
use crate::Result;
use image::GrayImage;

pub type Point = imageproc::point::Point<i32>;

/// Closed boundary traced on an edge map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Contour through the four corners of a `width` x `height` rectangle
    pub fn rectangle(x: i32, y: i32, width: i32, height: i32) -> Self {
        let (x1, y1) = (x + width - 1, y + height - 1);
        Self::new(vec![
            Point::new(x, y),
            Point::new(x1, y),
            Point::new(x1, y1),
            Point::new(x, y1),
        ])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Provider of the low-level primitives region extraction is built on
pub trait ImageAnalysis {
    /// Single-channel edge map (non-zero = edge) of the same size as `frame`
    fn edge_map(&self, frame: &Frame) -> Result<GrayImage>;

    /// Outermost closed boundaries found in an edge map
    fn contours(&self, edges: &GrayImage) -> Result<Vec<Contour>>;

    /// Inclusive bounding rectangle of a contour
    fn bounding_rect(&self, contour: &Contour) -> Result<BBox>;

    /// Area enclosed by a contour, in pixels
    fn area(&self, contour: &Contour) -> Result<f64>;
}

impl<A: ImageAnalysis + ?Sized> ImageAnalysis for Box<A> {
    fn edge_map(&self, frame: &Frame) -> Result<GrayImage> {
        (**self).edge_map(frame)
    }

    fn contours(&self, edges: &GrayImage) -> Result<Vec<Contour>> {
        (**self).contours(edges)
    }

    fn bounding_rect(&self, contour: &Contour) -> Result<BBox> {
        (**self).bounding_rect(contour)
    }

    fn area(&self, contour: &Contour) -> Result<f64> {
        (**self).area(contour)
    }
}

/// Shoelace area of the polygon through `points`
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();

    twice_area.abs() as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_area_rectangle() {
        // corner-to-corner span is 9 x 19
        let contour = Contour::rectangle(5, 5, 10, 20);
        assert_eq!(polygon_area(&contour.points), 171.0);
    }

    #[test]
    fn test_polygon_area_orientation_independent() {
        let mut points = Contour::rectangle(0, 0, 11, 11).points;
        let forward = polygon_area(&points);
        points.reverse();
        assert_eq!(polygon_area(&points), forward);
        assert_eq!(forward, 100.0);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Point::new(0, 0), Point::new(5, 5)]), 0.0);
        let line = [Point::new(0, 0), Point::new(5, 0), Point::new(10, 0)];
        assert_eq!(polygon_area(&line), 0.0);
    }
}
