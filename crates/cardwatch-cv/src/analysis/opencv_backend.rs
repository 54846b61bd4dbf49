//! OpenCV analysis backend (`opencv` feature)

use super::{Contour, ImageAnalysis, Point};
use crate::bbox::BBox;
use crate::detection::config::EdgeParams;
use crate::frame::Frame;
use crate::utils::ImageUtils;
use crate::{Error, Result};
use image::GrayImage;
use opencv::{
    core::{Mat, Point as CvPoint, Vector},
    imgproc,
    prelude::*,
};

/// `imgproc::canny` + `imgproc::find_contours(RETR_EXTERNAL)`
#[derive(Debug, Clone, Default)]
pub struct OpenCvAnalysis {
    params: EdgeParams,
}

impl OpenCvAnalysis {
    pub fn new(params: EdgeParams) -> Self {
        Self { params }
    }

    fn gray_to_mat(image: &GrayImage) -> Result<Mat> {
        let view = Mat::from_slice_rows_cols(
            image.as_raw(),
            image.height() as usize,
            image.width() as usize,
        )?;
        Ok(view.try_clone()?)
    }

    fn to_cv_points(contour: &Contour) -> Vector<CvPoint> {
        contour.points.iter().map(|p| CvPoint::new(p.x, p.y)).collect()
    }
}

impl ImageAnalysis for OpenCvAnalysis {
    fn edge_map(&self, frame: &Frame) -> Result<GrayImage> {
        if frame.is_empty() {
            return Err(Error::Analysis("cannot detect edges on an empty frame".into()));
        }
        let gray = Self::gray_to_mat(&ImageUtils::to_luma(frame.image()))?;

        let mut edges = Mat::default();
        imgproc::canny(&gray, &mut edges, self.params.low, self.params.high, 3, false)?;

        GrayImage::from_raw(frame.width(), frame.height(), edges.data_bytes()?.to_vec())
            .ok_or_else(|| Error::Analysis("edge map size does not match frame".into()))
    }

    fn contours(&self, edges: &GrayImage) -> Result<Vec<Contour>> {
        if edges.width() == 0 || edges.height() == 0 {
            return Ok(Vec::new());
        }
        let src = Self::gray_to_mat(edges)?;

        let mut found = Vector::<Vector<CvPoint>>::new();
        imgproc::find_contours(
            &src,
            &mut found,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            CvPoint::new(0, 0),
        )?;

        Ok(found
            .iter()
            .map(|c| Contour::new(c.iter().map(|p| Point::new(p.x, p.y)).collect()))
            .collect())
    }

    fn bounding_rect(&self, contour: &Contour) -> Result<BBox> {
        if contour.is_empty() {
            return Ok(BBox::new(0, 0, 0, 0));
        }
        Ok(imgproc::bounding_rect(&Self::to_cv_points(contour))?.into())
    }

    fn area(&self, contour: &Contour) -> Result<f64> {
        if contour.is_empty() {
            return Ok(0.0);
        }
        Ok(imgproc::contour_area(&Self::to_cv_points(contour), false)?)
    }
}
