//! Raster resampling for export and preview rendering.
//!
//! Resampling is delegated to the `image` crate. All functions return new
//! `RasterImage` instances without modifying the input.

use super::{FilterType, RasterError, RasterImage};

/// Resize a raster to exact dimensions.
///
/// # Errors
///
/// Returns `RasterError::InvalidDimensions` for a zero target dimension and
/// `RasterError::BufferMismatch` if the source buffer is inconsistent.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or(RasterError::BufferMismatch {
        expected: (image.width as usize) * (image.height as usize) * 3,
        actual: image.pixels.len(),
    })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized))
}

/// Height matching `target_width` while preserving the source aspect ratio.
///
/// Never returns zero for a non-empty source.
pub fn height_for_width(src_width: u32, src_height: u32, target_width: u32) -> u32 {
    if src_width == 0 || src_height == 0 || target_width == 0 {
        return 0;
    }
    let h = (target_width as f64 * src_height as f64 / src_width as f64).round() as u32;
    h.max(1)
}

/// Dimensions fitting within `max_edge` while preserving aspect ratio.
///
/// Sources already within the limit keep their size.
pub fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
