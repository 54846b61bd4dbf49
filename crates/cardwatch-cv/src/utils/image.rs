//! Image loading, conversion and annotation helpers

use crate::bbox::BBox;
use crate::Result;
use cardwatch_core::Label;
use image::{GrayImage, Luma, Rgb, RgbImage, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use std::path::Path;

/// Image utility functions shared by sources, backends and the CLI
pub struct ImageUtils;

impl ImageUtils {
    /// Load any supported image file as 8-bit RGB
    pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        Ok(image::open(path)?.to_rgb8())
    }

    /// Save an RGB image, format chosen from the extension
    pub fn save_rgb<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
        image.save(path)?;
        Ok(())
    }

    /// Convert RGBA to RGB by dropping alpha
    pub fn rgba_to_rgb(rgba_image: &RgbaImage) -> RgbImage {
        RgbImage::from_fn(rgba_image.width(), rgba_image.height(), |x, y| {
            let [r, g, b, _] = rgba_image.get_pixel(x, y).0;
            Rgb([r, g, b])
        })
    }

    /// BT.601 luma (0.299 R + 0.587 G + 0.114 B), the weighting OpenCV uses
    pub fn to_luma(rgb_image: &RgbImage) -> GrayImage {
        GrayImage::from_fn(rgb_image.width(), rgb_image.height(), |x, y| {
            let [r, g, b] = rgb_image.get_pixel(x, y).0;
            let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000;
            Luma([luma as u8])
        })
    }

    /// Outline colour for a region's classification outcome
    pub fn label_color(label: Option<Label>) -> Rgb<u8> {
        match label {
            Some(Label::HeartOrDiamond) => Rgb([230, 40, 40]),
            Some(Label::SpadeOrClub) => Rgb([40, 120, 255]),
            Some(Label::UnknownCard) => Rgb([250, 210, 0]),
            None => Rgb([128, 128, 128]),
        }
    }

    /// Copy of `image` with every box outlined (2 px) in its label colour
    pub fn annotate<'a, I>(image: &RgbImage, boxes: I) -> RgbImage
    where
        I: IntoIterator<Item = (&'a BBox, Option<Label>)>,
    {
        let mut output = image.clone();

        for (bbox, label) in boxes {
            let color = Self::label_color(label);
            if let Some(rect) = bbox.to_rect() {
                draw_hollow_rect_mut(&mut output, rect, color);
            }
            let inner = BBox::new(bbox.x + 1, bbox.y + 1, bbox.width - 2, bbox.height - 2);
            if let Some(rect) = inner.to_rect() {
                draw_hollow_rect_mut(&mut output, rect, color);
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_to_rgb_conversion() {
        let rgba_img = RgbaImage::from_pixel(50, 40, image::Rgba([1, 2, 3, 4]));
        let rgb_img = ImageUtils::rgba_to_rgb(&rgba_img);

        assert_eq!(rgba_img.dimensions(), rgb_img.dimensions());
        assert_eq!(rgb_img.get_pixel(49, 39), &Rgb([1, 2, 3]));
    }

    #[test]
    fn test_luma_weights_red_like_opencv() {
        let mut image = RgbImage::new(3, 1);
        image.put_pixel(0, 0, Rgb([220, 30, 30]));
        image.put_pixel(1, 0, Rgb([255, 255, 255]));
        image.put_pixel(2, 0, Rgb([0, 0, 255]));

        let luma = ImageUtils::to_luma(&image);
        assert_eq!(luma.get_pixel(0, 0), &Luma([87]));
        assert_eq!(luma.get_pixel(1, 0), &Luma([255]));
        assert_eq!(luma.get_pixel(2, 0), &Luma([29]));
    }

    #[test]
    fn test_annotate_draws_outline_only() {
        let image = RgbImage::new(20, 20);
        let bbox = BBox::new(2, 2, 10, 10);
        let annotated = ImageUtils::annotate(&image, [(&bbox, Some(Label::SpadeOrClub))]);

        let color = ImageUtils::label_color(Some(Label::SpadeOrClub));
        assert_eq!(annotated.get_pixel(2, 2), &color);
        assert_eq!(annotated.get_pixel(3, 3), &color);
        assert_eq!(annotated.get_pixel(7, 7), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(2, 2), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_save_and_load_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("frame.png");
        let image = RgbImage::from_pixel(8, 6, Rgb([9, 8, 7]));

        ImageUtils::save_rgb(&image, &path)?;
        let loaded = ImageUtils::load_rgb(&path)?;

        assert_eq!(loaded, image);
        Ok(())
    }
}
