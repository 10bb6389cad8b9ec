//! Cosine distance between histograms and the same-item decision.
//!
//! Dot products and squared norms are accumulated exactly in `u64`, so
//! the only rounding happens in the final division and square root.
//! As a consequence `cosine_distance(h, h)` is exactly `0.0` and the
//! distance is exactly symmetric in its arguments.

use tracing::debug;

use crate::histogram::Histogram;
use crate::types::{PipelineError, SimilarityResult, Verdict};

/// Cosine distance `1 - (a . b) / (|a| |b|)`.
///
/// Histogram counts are non-negative, so the result lies in `[0, 1]`.
///
/// # Errors
///
/// Returns [`PipelineError::DegenerateHistogram`] if either histogram is
/// all zeros, where the angle between the vectors is undefined.
#[allow(clippy::cast_precision_loss)]
pub fn cosine_distance(a: &Histogram, b: &Histogram) -> Result<f64, PipelineError> {
    let norm_a = a.magnitude_squared();
    let norm_b = b.magnitude_squared();
    if norm_a == 0 || norm_b == 0 {
        return Err(PipelineError::DegenerateHistogram);
    }

    let dot = a.dot(b) as f64;
    // sqrt(|a|^2 |b|^2) rather than |a| * |b|: for a == b this is
    // sqrt(fl(n^2)) == n, which makes the ratio exactly one.
    let similarity = dot / ((norm_a as f64) * (norm_b as f64)).sqrt();
    Ok(1.0 - similarity)
}

/// Whether `distance` counts as the same item under `threshold`.
///
/// Strictly less-than: a distance equal to the threshold is a
/// mismatch. No clamping or rounding is applied to either value, and a
/// NaN on either side compares as a mismatch.
#[must_use]
pub fn classify(distance: f64, threshold: f64) -> bool {
    distance < threshold
}

/// Score a pair of histograms against `threshold`.
///
/// # Errors
///
/// Propagates [`PipelineError::DegenerateHistogram`] from
/// [`cosine_distance`].
pub fn score(
    a: &Histogram,
    b: &Histogram,
    threshold: f64,
) -> Result<SimilarityResult, PipelineError> {
    let distance = cosine_distance(a, b)?;
    let verdict = Verdict::from_match(classify(distance, threshold));
    debug!(distance, threshold, %verdict, "scored histogram pair");
    Ok(SimilarityResult { distance, verdict })
}
