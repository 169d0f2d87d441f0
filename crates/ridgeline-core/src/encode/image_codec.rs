//! Raster encoding with the `image` crate codecs.

use super::ExportFormat;
use crate::raster::RasterImage;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// JPEG quality used when the caller has no preference.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Errors that can occur while encoding or saving an export.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("{format:?} encoding failed: {message}")]
    EncodingFailed {
        format: ExportFormat,
        message: String,
    },

    /// Writing the encoded bytes failed
    #[error("Failed to save export: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode an RGB raster into `format`.
///
/// `quality` (1-100) only affects JPEG and is clamped into range.
pub fn encode_image(
    image: &RasterImage,
    format: ExportFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let pixels = image.pixels.as_slice();
    let color = ExtendedColorType::Rgb8;

    let result = match format {
        ExportFormat::Png => PngEncoder::new(&mut buffer).write_image(pixels, width, height, color),
        ExportFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
            .write_image(pixels, width, height, color),
        ExportFormat::Tiff => {
            TiffEncoder::new(&mut buffer).write_image(pixels, width, height, color)
        }
        ExportFormat::Bmp => BmpEncoder::new(&mut buffer).write_image(pixels, width, height, color),
    };
    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}

/// Write encoded bytes to `path`.
///
/// Failures are returned as [`EncodeError::Io`]; nothing is retried.
pub fn save_encoded(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), EncodeError> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|e| {
        log::warn!("Failed to write export to {}: {}", path.display(), e);
        EncodeError::Io(e)
    })?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
