//! Shared types for the histmatch pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::composite::Axis;
use crate::histogram::Histogram;

/// Re-export `GrayImage` so downstream crates can reference
/// canonical and composite rasters without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `DynamicImage`, the decoded (raw) input image.
pub use image::DynamicImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of an existing raster.
    #[must_use]
    pub fn of<I: image::GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Target resolution every input is stretched to before comparison.
///
/// Both axes are non-zero; [`CanonicalSize::new`] is the only way to
/// build one outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Dimensions", into = "Dimensions")]
pub struct CanonicalSize(Dimensions);

impl CanonicalSize {
    /// Default canonical width in pixels.
    pub const DEFAULT_WIDTH: u32 = 256;
    /// Default canonical height in pixels.
    pub const DEFAULT_HEIGHT: u32 = 256;

    /// Build a canonical size.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if either axis is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "canonical size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self(Dimensions { width, height }))
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.0.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(self) -> u32 {
        self.0.height
    }
}

impl Default for CanonicalSize {
    fn default() -> Self {
        Self(Dimensions {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        })
    }
}

impl TryFrom<Dimensions> for CanonicalSize {
    type Error = PipelineError;

    fn try_from(value: Dimensions) -> Result<Self, Self::Error> {
        Self::new(value.width, value.height)
    }
}

impl From<CanonicalSize> for Dimensions {
    fn from(value: CanonicalSize) -> Self {
        value.0
    }
}

/// Pipeline constants.
///
/// These are not user-facing: the comparison is only meaningful when
/// both images of a pair go through the same configuration, so the CLI
/// always runs with [`PipelineConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Resolution both images are resampled to.
    pub canonical_size: CanonicalSize,

    /// Direction the two canonical images are joined in the composite.
    pub composite_axis: Axis,
}

impl PipelineConfig {
    /// Check that the configuration can be run.
    ///
    /// `CanonicalSize` already rejects zero axes at construction and
    /// deserialization; this re-checks in case the value was assembled
    /// some other way.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] describing the first
    /// invalid field.
    pub fn validate(&self) -> Result<(), PipelineError> {
        CanonicalSize::new(self.canonical_size.width(), self.canonical_size.height())?;
        Ok(())
    }
}

/// The "same item" decision for a pair of images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Distance was strictly below the threshold.
    SameItem,
    /// Distance was at or above the threshold (or the threshold was NaN).
    DifferentItems,
}

impl Verdict {
    /// Map the boolean result of [`classify`](crate::similarity::classify).
    #[must_use]
    pub const fn from_match(is_same: bool) -> Self {
        if is_same {
            Self::SameItem
        } else {
            Self::DifferentItems
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameItem => f.write_str("same item"),
            Self::DifferentItems => f.write_str("different items"),
        }
    }
}

/// Cosine distance between two histograms and the resulting verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Cosine distance in `[0, 2]` (in practice `[0, 1]`, since counts
    /// are never negative).
    pub distance: f64,
    /// Decision derived from comparing `distance` to the threshold.
    pub verdict: Verdict,
}

/// Everything produced by one [`compare`](crate::compare) run.
///
/// Does not derive `PartialEq` because `GrayImage` does not implement it.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Canonical grayscale rendition of the first image.
    pub canonical_a: GrayImage,
    /// Canonical grayscale rendition of the second image.
    pub canonical_b: GrayImage,
    /// Intensity histogram of `canonical_a`.
    pub histogram_a: Histogram,
    /// Intensity histogram of `canonical_b`.
    pub histogram_b: Histogram,
    /// Distance and verdict.
    pub similarity: SimilarityResult,
    /// The two canonical images joined along the configured axis.
    pub composite: GrayImage,
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// An image with zero width or height reached a stage that needs pixels.
    #[error("image has zero area")]
    EmptyImage,

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// A histogram with no mass has no direction, so cosine distance is
    /// undefined.
    #[error("cosine distance is undefined for an all-zero histogram")]
    DegenerateHistogram,

    /// Two images cannot be joined along the requested axis.
    #[error("cannot join {a} and {b} images along the {axis} axis")]
    ShapeMismatch {
        /// Dimensions of the first image.
        a: Dimensions,
        /// Dimensions of the second image.
        b: Dimensions,
        /// Requested join axis.
        axis: Axis,
    },
}
