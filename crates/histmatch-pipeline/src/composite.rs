//! Side-by-side composite of the two canonical images.

use std::fmt;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::types::{Dimensions, PipelineError};

/// Direction along which two images are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    /// Second image to the right of the first. Heights must match.
    #[default]
    Horizontal,
    /// Second image below the first. Widths must match.
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// Join `a` and `b` edge to edge along `axis`.
///
/// `a` occupies the left (or top) part of the output and `b` the right
/// (or bottom) part; pixels are copied unchanged.
///
/// # Errors
///
/// Returns [`PipelineError::ShapeMismatch`] if the heights differ for
/// [`Axis::Horizontal`] or the widths differ for [`Axis::Vertical`].
pub fn concatenate(
    a: &GrayImage,
    b: &GrayImage,
    axis: Axis,
) -> Result<GrayImage, PipelineError> {
    let (aw, ah) = a.dimensions();
    let (bw, bh) = b.dimensions();

    let (width, height, offset_x, offset_y) = match axis {
        Axis::Horizontal if ah == bh => (aw + bw, ah, aw, 0),
        Axis::Vertical if aw == bw => (aw, ah + bh, 0, ah),
        _ => {
            return Err(PipelineError::ShapeMismatch {
                a: Dimensions::of(a),
                b: Dimensions::of(b),
                axis,
            });
        }
    };

    let mut out = GrayImage::new(width, height);
    image::imageops::replace(&mut out, a, 0, 0);
    image::imageops::replace(&mut out, b, i64::from(offset_x), i64::from(offset_y));
    Ok(out)
}
