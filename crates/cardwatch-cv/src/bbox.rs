//! Axis-aligned bounding boxes for candidate regions

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BBox {
    /// Create a new bounding box
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest box containing every point, with inclusive extents
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut points = points.into_iter();
        let (x0, y0) = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);

        for (x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Width over height, 0 for a zero-height box
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0 {
            self.width as f64 / self.height as f64
        } else {
            0.0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with a `width` x `height` frame anchored at the origin
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x0 = self.x.clamp(0, width as i32);
        let y0 = self.y.clamp(0, height as i32);
        let x1 = (self.x + self.width).clamp(0, width as i32);
        let y1 = (self.y + self.height).clamp(0, height as i32);

        Self::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    /// Convert to an imageproc rectangle for drawing; `None` when empty
    pub fn to_rect(&self) -> Option<imageproc::rect::Rect> {
        if self.is_empty() {
            return None;
        }
        Some(imageproc::rect::Rect::at(self.x, self.y).of_size(self.width as u32, self.height as u32))
    }
}

#[cfg(feature = "opencv")]
impl From<opencv::core::Rect> for BBox {
    fn from(rect: opencv::core::Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_is_inclusive() {
        let bbox = BBox::enclosing([(10, 20), (19, 20), (19, 39), (10, 39)]).unwrap();
        assert_eq!(bbox, BBox::new(10, 20, 10, 20));
        assert_eq!(bbox.aspect_ratio(), 0.5);
        assert!(BBox::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn test_aspect_ratio_zero_height() {
        assert_eq!(BBox::new(0, 0, 10, 0).aspect_ratio(), 0.0);
        assert!(BBox::new(0, 0, 10, 0).is_empty());
    }

    #[test]
    fn test_clamp_to_frame() {
        let bbox = BBox::new(-5, 90, 20, 20).clamp_to(100, 100);
        assert_eq!(bbox, BBox::new(0, 90, 15, 10));

        let outside = BBox::new(200, 200, 10, 10).clamp_to(100, 100);
        assert!(outside.is_empty());
    }

    #[test]
    fn test_to_rect() {
        assert!(BBox::new(0, 0, 0, 5).to_rect().is_none());
        let rect = BBox::new(3, 4, 5, 6).to_rect().unwrap();
        assert_eq!((rect.left(), rect.top(), rect.width(), rect.height()), (3, 4, 5, 6));
    }
}
