//! File-system boundary: reading input images and writing the composite.

use std::path::Path;

use histmatch_pipeline::{DynamicImage, GrayImage};
use image::ImageFormat;
use tracing::info;

use crate::error::{AppError, ImageLoadError};

/// Read and decode the image at `path`.
///
/// Decoded pixels are in R, G, B order; see
/// [`histmatch_pipeline::grayscale`].
///
/// # Errors
///
/// Returns [`AppError::ImageDecode`] naming `path` if the file cannot be
/// read, is empty, or is not a supported image.
pub fn load_image(path: &Path) -> Result<DynamicImage, AppError> {
    let decode_error = |source: ImageLoadError| AppError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let bytes = std::fs::read(path).map_err(|e| decode_error(e.into()))?;
    let image = histmatch_pipeline::decode(&bytes).map_err(|e| decode_error(e.into()))?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );
    Ok(image)
}

/// Encode `image` as JPEG and write it to `path`.
///
/// JPEG is used regardless of the extension of `path`.
///
/// # Errors
///
/// Returns [`AppError::ImageWrite`] if encoding or writing fails, for
/// example when the parent directory does not exist.
pub fn save_jpeg(image: &GrayImage, path: &Path) -> Result<(), AppError> {
    image
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(|source| AppError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "wrote composite"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::{Luma, Rgb, RgbImage};

    use super::*;

    #[test]
    fn load_returns_source_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.png");
        RgbImage::from_pixel(37, 19, Rgb([10, 200, 30]))
            .save(&path)
            .unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!((image.width(), image.height()), (37, 19));
    }

    #[test]
    fn load_applies_exif_orientation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sideways.jpg");
        let mut jpeg = Vec::new();
        RgbImage::from_pixel(40, 10, Rgb([90, 90, 90]))
            .write_to(&mut std::io::Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();
        // Exif APP1 with Orientation = 6 (rotate 90 degrees clockwise).
        let mut app1 = vec![0xFF, 0xE1, 0x00, 0x22];
        app1.extend_from_slice(b"Exif\0\0MM\0\x2A\0\0\0\x08\0\x01");
        app1.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        app1.extend_from_slice(&[0x00, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        jpeg.splice(2..2, app1);
        std::fs::write(&path, &jpeg).unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!((image.width(), image.height()), (10, 40));
    }

    #[test]
    fn missing_file_is_decode_error_naming_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.jpg");
        let err = load_image(&path).unwrap_err();
        assert!(matches!(
            err,
            AppError::ImageDecode {
                source: ImageLoadError::Io(_),
                ..
            }
        ));
        assert!(err.to_string().contains("nope.jpg"), "got {err}");
    }

    #[test]
    fn garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(
            err,
            AppError::ImageDecode {
                source: ImageLoadError::Decode(_),
                ..
            }
        ));
    }

    #[test]
    fn empty_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(
            load_image(&path),
            Err(AppError::ImageDecode { .. })
        ));
    }

    #[test]
    fn save_writes_jpeg_even_with_other_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("composite.png");
        let image = GrayImage::from_pixel(8, 4, Luma([128]));
        save_jpeg(&image, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let back = image::load_from_memory(&bytes).unwrap();
        assert_eq!((back.width(), back.height()), (8, 4));
    }

    #[test]
    fn save_into_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.jpg");
        let image = GrayImage::from_pixel(2, 2, Luma([0]));
        assert!(matches!(
            save_jpeg(&image, &path),
            Err(AppError::ImageWrite { .. })
        ));
    }
}
