//! Intensity histograms of canonical grayscale images.

use image::GrayImage;

/// Number of intensity buckets, one per 8-bit level.
pub const BUCKETS: usize = 256;

/// Pixel counts per intensity level.
///
/// Index `i` holds the number of pixels with value `i`. No
/// normalization is applied, so the counts sum to the pixel count of
/// the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram([u32; BUCKETS]);

impl From<[u32; BUCKETS]> for Histogram {
    fn from(counts: [u32; BUCKETS]) -> Self {
        Self(counts)
    }
}

impl Histogram {
    /// Count every pixel of `image` into its intensity bucket.
    #[must_use]
    pub fn of(image: &GrayImage) -> Self {
        let channels = imageproc::stats::histogram(image).channels;
        Self::from(channels.first().copied().unwrap_or([0; BUCKETS]))
    }

    /// The 256 bucket counts.
    #[must_use]
    pub const fn counts(&self) -> &[u32; BUCKETS] {
        &self.0
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Squared Euclidean norm, computed exactly.
    #[must_use]
    pub fn magnitude_squared(&self) -> u64 {
        self.dot(self)
    }

    /// Exact inner product with another histogram.
    ///
    /// Cannot overflow: each product is below `2^64 / 256` for images
    /// up to `2^28` pixels, far above any canonical size.
    #[must_use]
    pub fn dot(&self, other: &Self) -> u64 {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(&a, &b)| u64::from(a) * u64::from(b))
            .sum()
    }
}

/// Compute the intensity histogram of a grayscale image.
#[must_use]
pub fn histogram(image: &GrayImage) -> Histogram {
    Histogram::of(image)
}
