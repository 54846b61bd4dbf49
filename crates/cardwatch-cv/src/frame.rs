//! Captured frames and borrowed views into them
//!
//! Pixel layout: 8 bits per channel, channel order R, G, B, row-major.
//! Sources that deliver RGBA drop the alpha channel on construction.

use crate::bbox::BBox;
use crate::utils::ImageUtils;
use image::{Rgb, RgbImage, RgbaImage};

/// One sampled raster, owned by the step that processes it
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Build from an RGBA capture, discarding alpha
    pub fn from_rgba(image: &RgbaImage) -> Self {
        Self::new(ImageUtils::rgba_to_rgb(image))
    }

    /// Uniformly coloured frame, `color` given as `[r, g, b]`
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self::new(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Zero-area frames carry no pixels to analyse
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    /// Borrow the pixels inside `bbox`, clipped to the frame
    pub fn region(&self, bbox: BBox) -> CandidateRegion<'_> {
        CandidateRegion {
            bbox: bbox.clamp_to(self.width(), self.height()),
            image: &self.image,
        }
    }
}

/// Rectangular view into a [`Frame`].
///
/// Borrows the frame, so a region can never outlive the frame it came from.
#[derive(Debug, Clone, Copy)]
pub struct CandidateRegion<'a> {
    bbox: BBox,
    image: &'a RgbImage,
}

impl<'a> CandidateRegion<'a> {
    /// Bounds in frame coordinates, already clipped to the frame
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn is_empty(&self) -> bool {
        self.bbox.is_empty()
    }

    pub fn pixel_count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.bbox.width as u64 * self.bbox.height as u64
        }
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = &'a Rgb<u8>> + 'a {
        let image = self.image;
        let (x0, y0) = (self.bbox.x.max(0) as u32, self.bbox.y.max(0) as u32);
        let (width, height) = if self.is_empty() {
            (0, 0)
        } else {
            (self.bbox.width as u32, self.bbox.height as u32)
        };

        (y0..y0 + height).flat_map(move |y| (x0..x0 + width).map(move |x| image.get_pixel(x, y)))
    }

    /// Copy the region out as a standalone image
    pub fn to_image(&self) -> RgbImage {
        if self.is_empty() {
            return RgbImage::new(0, 0);
        }
        image::imageops::crop_imm(
            self.image,
            self.bbox.x as u32,
            self.bbox.y as u32,
            self.bbox.width as u32,
            self.bbox.height as u32,
        )
        .to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_is_clipped() {
        let frame = Frame::filled(40, 30, [1, 2, 3]);
        let region = frame.region(BBox::new(30, 20, 20, 20));

        assert_eq!(region.bbox(), BBox::new(30, 20, 10, 10));
        assert_eq!(region.pixel_count(), 100);
        assert_eq!(region.pixels().count(), 100);
    }

    #[test]
    fn test_region_outside_frame_is_empty() {
        let frame = Frame::filled(10, 10, [0, 0, 0]);
        let region = frame.region(BBox::new(50, 50, 5, 5));

        assert!(region.is_empty());
        assert_eq!(region.pixels().count(), 0);
        assert_eq!(region.to_image().dimensions(), (0, 0));
    }

    #[test]
    fn test_region_reads_expected_pixels() {
        let image = RgbImage::from_fn(4, 4, |x, y| Rgb([x as u8, y as u8, 0]));
        let frame = Frame::new(image);
        let region = frame.region(BBox::new(1, 2, 2, 2));

        let coords: Vec<(u8, u8)> = region.pixels().map(|p| (p[0], p[1])).collect();
        assert_eq!(coords, vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
        assert_eq!(region.to_image().dimensions(), (2, 2));
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let rgba = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 0]));
        let frame = Frame::from_rgba(&rgba);

        assert_eq!(frame.image().get_pixel(2, 1), &Rgb([10, 20, 30]));
        assert!(!frame.is_empty());
        assert!(Frame::filled(0, 5, [0, 0, 0]).is_empty());
    }
}
