//! histmatch-pipeline: Pure image-similarity pipeline (sans-IO).
//!
//! Decides whether two images show the same item by comparing the
//! intensity histograms of their canonical grayscale renditions:
//! grayscale -> resize -> histogram -> cosine distance -> verdict,
//! plus a side-by-side composite of the two canonical images.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and decoded images. Reading configuration and image
//! files, and writing the composite, lives in `histmatch`.

pub mod composite;
pub mod grayscale;
pub mod histogram;
pub mod resize;
pub mod similarity;
pub mod types;

use tracing::debug;

pub use composite::{Axis, concatenate};
pub use grayscale::{decode, to_grayscale};
pub use histogram::{Histogram, histogram};
pub use resize::resize;
pub use similarity::{classify, cosine_distance, score};
pub use types::{
    CanonicalSize, Comparison, Dimensions, DynamicImage, GrayImage, PipelineConfig,
    PipelineError, SimilarityResult, Verdict,
};

/// Reduce a decoded image to its canonical grayscale form.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyImage`] if `image` has zero area.
pub fn preprocess(
    image: &DynamicImage,
    config: &PipelineConfig,
) -> Result<GrayImage, PipelineError> {
    let gray = to_grayscale(image);
    let canonical = resize(&gray, config.canonical_size)?;
    debug!(
        source = %Dimensions::of(image),
        canonical = %Dimensions::of(&canonical),
        "preprocessed image"
    );
    Ok(canonical)
}

/// Compare two decoded images.
///
/// # Pipeline steps
///
/// 1. Grayscale conversion and resize to the canonical size (each image)
/// 2. Intensity histogram (each image)
/// 3. Cosine distance between the histograms, classified against
///    `threshold`
/// 4. Composite of the two canonical images along the configured axis
///
/// The two per-image branches share nothing and always produce the same
/// result regardless of evaluation order.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if `config` fails validation.
/// Returns [`PipelineError::EmptyImage`] if either image has zero area.
/// Returns [`PipelineError::DegenerateHistogram`] if a histogram has no
/// mass, which cannot happen for a validated canonical size.
pub fn compare(
    image_a: &DynamicImage,
    image_b: &DynamicImage,
    threshold: f64,
    config: &PipelineConfig,
) -> Result<Comparison, PipelineError> {
    config.validate()?;

    // 1. Preprocess both images.
    let canonical_a = preprocess(image_a, config)?;
    let canonical_b = preprocess(image_b, config)?;

    // 2. Histograms.
    let histogram_a = histogram(&canonical_a);
    let histogram_b = histogram(&canonical_b);
    debug!(
        total_a = histogram_a.total(),
        total_b = histogram_b.total(),
        "computed histograms"
    );

    // 3. Distance and verdict.
    let similarity = score(&histogram_a, &histogram_b, threshold)?;

    // 4. Composite.
    let composite = concatenate(&canonical_a, &canonical_b, config.composite_axis)?;

    Ok(Comparison {
        canonical_a,
        canonical_b,
        histogram_a,
        histogram_b,
        similarity,
        composite,
    })
}
