//! Conversions from `OpenCV` contour and image types.
//!
//! Enabled with the `opencv` feature so contours returned by
//! `imgproc::find_contours` can be passed straight to the analyzer.

use crate::geometry::{FrameShape, Point};
use crate::{Error, Result};
use opencv::core::{Mat, Point as CvPoint, Vector};
use opencv::prelude::MatTraitConst;

impl From<CvPoint> for Point {
    fn from(p: CvPoint) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Convert one `OpenCV` contour
#[must_use]
pub fn contour_from_cv(contour: &Vector<CvPoint>) -> Vec<Point> {
    contour.iter().map(Point::from).collect()
}

/// Convert the full output of `imgproc::find_contours`
#[must_use]
pub fn contours_from_cv(contours: &Vector<Vector<CvPoint>>) -> Vec<Vec<Point>> {
    contours.iter().map(|c| contour_from_cv(&c)).collect()
}

/// Frame dimensions of an image
///
/// # Errors
///
/// Returns an error if the matrix reports negative dimensions
pub fn frame_shape_of(mat: &Mat) -> Result<FrameShape> {
    let height = u32::try_from(mat.rows())
        .map_err(|_| Error::InvalidInput(format!("Invalid image height: {}", mat.rows())))?;
    let width = u32::try_from(mat.cols())
        .map_err(|_| Error::InvalidInput(format!("Invalid image width: {}", mat.cols())))?;
    Ok(FrameShape::new(height, width))
}
