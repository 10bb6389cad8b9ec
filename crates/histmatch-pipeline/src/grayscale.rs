//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the
//! decoded image, then reduces it to a single luma channel.
//!
//! Decoding honours an EXIF orientation tag, so a photo stored sideways
//! comes out upright with its displayed width and height.
//!
//! Decoded pixels are in R, G, B order (the `image` crate's convention).
//! Alpha is dropped without premultiplying. Grayscale inputs are
//! expanded to three equal channels first, which the luma weights map
//! back to the same value.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageDecoder, ImageReader, Luma};
use tracing::debug;

use crate::types::{Dimensions, PipelineError};

/// Fixed-point precision of the luma weights.
const LUMA_SHIFT: u32 = 14;

/// ITU-R BT.601 red weight, `0.299 * 2^14` rounded.
const WEIGHT_R: u32 = 4899;
/// ITU-R BT.601 green weight, `0.587 * 2^14` rounded.
const WEIGHT_G: u32 = 9617;
/// ITU-R BT.601 blue weight, `0.114 * 2^14` rounded.
const WEIGHT_B: u32 = 1868;

/// Decode raw image bytes.
///
/// The image is rotated or flipped according to its EXIF orientation,
/// if any.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
#[must_use = "returns the decoded image"]
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::from)?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    debug!(
        dimensions = %Dimensions::of(&img),
        color = ?img.color(),
        ?orientation,
        "decoded image"
    );
    Ok(img)
}

/// Luma of one R, G, B triple.
///
/// `Y = 0.299 R + 0.587 G + 0.114 B`, evaluated in 14-bit fixed point
/// with round-half-up. The weights sum to `2^14`, so the result never
/// exceeds 255 and `(v, v, v)` maps to `v`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = WEIGHT_R * r as u32 + WEIGHT_G * g as u32 + WEIGHT_B * b as u32;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Convert a decoded image to single-channel grayscale.
///
/// Uses the BT.601 weighting of [`luma`] rather than
/// [`DynamicImage::to_luma8`], whose weights are an implementation
/// detail of the `image` crate. Output dimensions equal the input's.
#[must_use]
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut gray = GrayImage::new(width, height);
    for (dst, src) in gray.pixels_mut().zip(rgb.pixels()) {
        let [r, g, b] = src.0;
        *dst = Luma([luma(r, g, b)]);
    }
    gray
}
