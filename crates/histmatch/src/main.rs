//! histmatch: compare two product photos by grayscale histogram.
//!
//! Reads a YAML configuration naming two images, an output path and a
//! distance threshold; prints the cosine distance between the images'
//! intensity histograms and whether they show the same item; writes
//! both canonical images side by side as a JPEG.
//!
//! # Usage
//!
//! ```text
//! histmatch <CONFIG>
//! ```
//!
//! Exits with status 0 on success and 1 on any error, including usage
//! errors. Every error is reported as a single `error: ...` line on
//! standard output; logs go to standard error and are filtered by
//! `RUST_LOG` (default `warn`).

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use histmatch_pipeline::PipelineConfig;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

/// One-line message for any argument error other than `--help`/`--version`.
const USAGE_ERROR: &str =
    "expected exactly one argument, the configuration file path (example: histmatch config.yaml)";

/// Decide whether two product photos show the same item.
///
/// The configuration file is YAML with the fields `image_a`, `image_b`,
/// `output_location` and `threshold`.
#[derive(Parser)]
#[command(name = "histmatch", version)]
struct Cli {
    /// Path to the YAML configuration file.
    config: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            println!("error: {USAGE_ERROR}");
            return ExitCode::FAILURE;
        }
    };

    let spec = match histmatch::config::load(&cli.config) {
        Ok(spec) => spec,
        Err(e) => {
            println!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match histmatch::run(&spec, &PipelineConfig::default()) {
        Ok(comparison) => {
            println!("distance: {}", comparison.similarity.distance);
            println!("{}", comparison.similarity.verdict);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
