//! The YAML run configuration.
//!
//! Loading happens in two phases so the three failure kinds stay
//! distinct: reading the file ([`AppError::ConfigNotFound`] /
//! [`AppError::ConfigRead`]), parsing YAML into a generic value
//! ([`AppError::ConfigParse`]), then mapping that value onto
//! [`InputSpec`] and checking field values
//! ([`AppError::ConfigValidation`]).
//!
//! ```yaml
//! image_a: photos/product_1.jpg
//! image_b: photos/product_2.jpg
//! output_location: out/concatenated.jpg
//! threshold: 0.1
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;

/// Validated inputs for one comparison run.
///
/// Unknown keys in the YAML document are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    /// First image to compare.
    pub image_a: PathBuf,

    /// Second image to compare.
    pub image_b: PathBuf,

    /// Where the JPEG composite is written.
    pub output_location: PathBuf,

    /// Distances strictly below this value mean "same item".
    ///
    /// Any finite value is accepted. Cosine distances of histograms
    /// fall in `[0, 1]`, so values outside `[0, 2]` make the verdict
    /// constant and only trigger a warning.
    pub threshold: f64,
}

impl InputSpec {
    /// Range of meaningful thresholds (the cosine distance range).
    pub const MEANINGFUL_THRESHOLD: std::ops::RangeInclusive<f64> = 0.0..=2.0;

    /// Parse and validate a YAML document.
    ///
    /// `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ConfigParse`] for malformed YAML and
    /// [`AppError::ConfigValidation`] for missing, mistyped, or invalid
    /// fields.
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Self, AppError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|source| AppError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;

        let spec: Self = serde_yaml::from_value(value)
            .map_err(|e| AppError::ConfigValidation(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check field values that the type system does not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ConfigValidation`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, path) in [
            ("image_a", &self.image_a),
            ("image_b", &self.image_b),
            ("output_location", &self.output_location),
        ] {
            if path.as_os_str().is_empty() {
                return Err(AppError::ConfigValidation(format!(
                    "field `{field}` must not be empty"
                )));
            }
        }

        if !self.threshold.is_finite() {
            return Err(AppError::ConfigValidation(format!(
                "field `threshold` must be a finite number, got {}",
                self.threshold
            )));
        }

        if !Self::MEANINGFUL_THRESHOLD.contains(&self.threshold) {
            warn!(
                threshold = self.threshold,
                "threshold is outside the cosine distance range [0, 2]; the verdict will not depend on the images"
            );
        }

        Ok(())
    }
}

/// Read, parse, and validate the configuration file at `path`.
///
/// # Errors
///
/// Returns [`AppError::ConfigNotFound`] if `path` does not exist,
/// [`AppError::ConfigRead`] for other read failures, and the errors of
/// [`InputSpec::from_yaml`].
pub fn load(path: &Path) -> Result<InputSpec, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            AppError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AppError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let spec = InputSpec::from_yaml(&text, path)?;
    debug!(?spec, "loaded configuration");
    Ok(spec)
}
