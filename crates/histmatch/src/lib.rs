//! histmatch: decide whether two product photos show the same item.
//!
//! Thin I/O layer around [`histmatch_pipeline`]: loads the YAML run
//! configuration, reads both images, runs the comparison, and writes the
//! side-by-side composite as JPEG.

pub mod config;
pub mod error;
pub mod io;

use histmatch_pipeline::{Comparison, PipelineConfig};
use tracing::info;

pub use config::InputSpec;
pub use error::{AppError, ImageLoadError};

/// Run one comparison end to end.
///
/// Both images are loaded before any processing starts, so a bad
/// second path fails without work on the first. Nothing is written
/// unless the comparison succeeds.
///
/// # Errors
///
/// Returns [`AppError::ImageDecode`] if either image cannot be loaded,
/// [`AppError::Pipeline`] if a pipeline stage fails, and
/// [`AppError::ImageWrite`] if the composite cannot be saved.
pub fn run(spec: &InputSpec, config: &PipelineConfig) -> Result<Comparison, AppError> {
    let image_a = io::load_image(&spec.image_a)?;
    let image_b = io::load_image(&spec.image_b)?;

    let comparison = histmatch_pipeline::compare(&image_a, &image_b, spec.threshold, config)?;
    info!(
        distance = comparison.similarity.distance,
        verdict = %comparison.similarity.verdict,
        "compared images"
    );

    io::save_jpeg(&comparison.composite, &spec.output_location)?;
    Ok(comparison)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use histmatch_pipeline::Verdict;
    use image::{Rgb, RgbImage};

    use super::*;

    fn write_solid(path: &Path, value: u8) {
        RgbImage::from_pixel(100, 100, Rgb([value, value, value]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn run_writes_composite_and_reports_verdict() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        write_solid(&a, 40);
        let spec = InputSpec {
            image_a: a.clone(),
            image_b: a,
            output_location: dir.path().join("out.jpg"),
            threshold: 0.1,
        };

        let result = run(&spec, &PipelineConfig::default()).unwrap();
        assert_eq!(result.similarity.verdict, Verdict::SameItem);

        let written = image::open(&spec.output_location).unwrap();
        assert_eq!((written.width(), written.height()), (512, 256));
    }

    #[test]
    fn bad_second_image_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        write_solid(&a, 40);
        let spec = InputSpec {
            image_a: a,
            image_b: dir.path().join("missing.png"),
            output_location: dir.path().join("out.jpg"),
            threshold: 0.1,
        };

        let err = run(&spec, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::ImageDecode { .. }));
        assert!(!spec.output_location.exists());
    }
}
