//! Resampling to the canonical comparison resolution.
//!
//! Every grayscale image is stretched to exactly the configured
//! [`CanonicalSize`], ignoring its aspect ratio. Comparing histograms of
//! equally sized images keeps the counts on the same scale regardless of
//! the source resolution.

use image::{GrayImage, Luma};

use crate::types::{CanonicalSize, PipelineError};

/// Resize a grayscale image to exactly `size` by bilinear interpolation.
///
/// Each output pixel blends the two nearest source pixels per axis,
/// sampled at pixel centres. The kernel does not widen when shrinking,
/// so each output pixel reads at most four source pixels.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyImage`] if `image` has zero width or
/// height.
pub fn resize(image: &GrayImage, size: CanonicalSize) -> Result<GrayImage, PipelineError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineError::EmptyImage);
    }

    Ok(bilinear(image, size.width(), size.height()))
}

/// Source taps and the weight of the second tap for one output index.
#[derive(Debug, Clone, Copy)]
struct Tap {
    lo: u32,
    hi: u32,
    frac: f64,
}

/// Map each output index on one axis to its two source taps.
///
/// The output pixel centre `d + 0.5` lands at `(d + 0.5) * src / dst`
/// in source space; subtracting `0.5` gives the continuous source
/// index. Positions outside `[0, src - 1]` clamp to the edge pixel.
fn taps(src_len: u32, dst_len: u32) -> Vec<Tap> {
    let scale = f64::from(src_len) / f64::from(dst_len);
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let pos = (f64::from(d) + 0.5).mul_add(scale, -0.5);
            if pos <= 0.0 {
                return Tap {
                    lo: 0,
                    hi: 0,
                    frac: 0.0,
                };
            }
            let floor = pos.floor();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let lo = floor as u32;
            if lo >= last {
                return Tap {
                    lo: last,
                    hi: last,
                    frac: 0.0,
                };
            }
            Tap {
                lo,
                hi: lo + 1,
                frac: pos - floor,
            }
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bilinear(image: &GrayImage, width: u32, height: u32) -> GrayImage {
    let cols = taps(image.width(), width);
    let rows = taps(image.height(), height);
    let px = |x: u32, y: u32| f64::from(image.get_pixel(x, y).0[0]);

    GrayImage::from_fn(width, height, |x, y| {
        let c = cols[x as usize];
        let r = rows[y as usize];
        let top = (px(c.hi, r.lo) - px(c.lo, r.lo)).mul_add(c.frac, px(c.lo, r.lo));
        let bottom = (px(c.hi, r.hi) - px(c.lo, r.hi)).mul_add(c.frac, px(c.lo, r.hi));
        let value = (bottom - top).mul_add(r.frac, top);
        Luma([value.round().clamp(0.0, 255.0) as u8])
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([((x * 13 + y * 7) % 256) as u8]))
    }

    #[test]
    fn output_matches_target_for_any_shape() {
        let size = CanonicalSize::default();
        for (w, h) in [(1, 1), (1, 500), (500, 1), (100, 100), (640, 480), (300, 900)] {
            let out = resize(&gradient(w, h), size).unwrap();
            assert_eq!(out.dimensions(), (256, 256), "{w}x{h}");
        }
    }

    #[test]
    fn non_square_target_is_respected() {
        let size = CanonicalSize::new(40, 10).unwrap();
        let out = resize(&gradient(13, 77), size).unwrap();
        assert_eq!(out.dimensions(), (40, 10));
    }

    #[test]
    fn single_pixel_fills_canonical_image() {
        let src = GrayImage::from_pixel(1, 1, Luma([173]));
        let out = resize(&src, CanonicalSize::default()).unwrap();
        assert!(out.pixels().all(|p| p.0[0] == 173));
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let src = GrayImage::from_pixel(100, 37, Luma([90]));
        let out = resize(&src, CanonicalSize::default()).unwrap();
        assert!(out.pixels().all(|p| p.0[0] == 90));
    }

    #[test]
    fn same_size_bilinear_is_identity() {
        let src = gradient(256, 256);
        let out = resize(&src, CanonicalSize::default()).unwrap();
        assert_eq!(out.as_raw(), src.as_raw());
    }

    #[test]
    fn upscale_interpolates_between_neighbors() {
        // 2x1 -> 4x1: centres at -0.25, 0.25, 0.75, 1.25 in source space.
        let src = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 0 } else { 200 }]));
        let size = CanonicalSize::new(4, 1).unwrap();
        let out = resize(&src, size).unwrap();
        let values: Vec<u8> = out.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0, 50, 150, 200]);
    }

    #[test]
    fn downscale_by_two_averages_pairs() {
        // 4x1 -> 2x1: centres land at 0.5 and 2.5.
        let src = GrayImage::from_fn(4, 1, |x, _| Luma([[10, 30, 100, 200][x as usize]]));
        let size = CanonicalSize::new(2, 1).unwrap();
        let out = resize(&src, size).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[0], 20);
        assert_eq!(out.get_pixel(1, 0).0[0], 150);
    }

    #[test]
    fn bilinear_is_deterministic() {
        let src = gradient(123, 45);
        let a = resize(&src, CanonicalSize::default()).unwrap();
        let b = resize(&src, CanonicalSize::default()).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn zero_area_returns_error() {
        let src = GrayImage::new(0, 10);
        let result = resize(&src, CanonicalSize::default());
        assert!(matches!(result, Err(PipelineError::EmptyImage)));
    }
}
