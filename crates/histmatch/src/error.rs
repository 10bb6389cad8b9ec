//! Errors surfaced by the `histmatch` binary.

use std::path::PathBuf;

use histmatch_pipeline::PipelineError;

/// Every way a comparison run can fail.
///
/// All variants are fatal: the binary prints the message once and
/// exits with status 1.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The configuration file does not exist.
    #[error("configuration file {} not found", .path.display())]
    ConfigNotFound {
        /// Path given on the command line.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file {}: {source}", .path.display())]
    ConfigRead {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML.
    #[error("failed to parse configuration file {}: {source}", .path.display())]
    ConfigParse {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying YAML syntax error.
        source: serde_yaml::Error,
    },

    /// The configuration is valid YAML but a required field is missing,
    /// has the wrong type, or has an unusable value.
    #[error("invalid configuration: {0}")]
    ConfigValidation(String),

    /// An input image could not be read or decoded.
    #[error("failed to open image {}: {source}", .path.display())]
    ImageDecode {
        /// Path from the configuration.
        path: PathBuf,
        /// What went wrong.
        source: ImageLoadError,
    },

    /// The composite could not be encoded or written.
    #[error("failed to write composite image {}: {source}", .path.display())]
    ImageWrite {
        /// Destination from the configuration.
        path: PathBuf,
        /// Underlying encoder or I/O failure.
        source: image::ImageError,
    },

    /// A pipeline stage failed after both images were loaded.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Why an input image could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The bytes are not a decodable image.
    #[error(transparent)]
    Decode(#[from] PipelineError),
}
