//! Export WASM bindings.
//!
//! # Functions
//!
//! - [`export_fragment`] - Render a working image with its minutiae at a target width
//! - [`preview_fragment`] - Same rendering, fitted into a maximum edge
//! - [`encode_export`] - Encode a rendered export as PNG/JPEG/TIFF/BMP bytes
//!
//! # Example
//!
//! ```typescript
//! const rendered = export_fragment(working, minutiae, settings, 2400, 2);
//! const bytes = encode_export(rendered, "png", 92);
//! ```

use crate::types::{filter_from_u8, JsRasterImage};
use ridgeline_core::encode::{encode_image, ExportFormat};
use ridgeline_core::export::ExportRenderer;
use ridgeline_core::geometry::Rect;
use ridgeline_core::model::{DisplaySettings, Fragment, Minutia};
use wasm_bindgen::prelude::*;

fn to_js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Wrap a working image and its minutiae into a fragment for export.
fn export_fragment_from(image: &JsRasterImage, minutiae: Vec<Minutia>) -> Result<Fragment, JsValue> {
    let working = image.to_raster()?;
    let bounds = Rect::new(0.0, 0.0, working.width as f64, working.height as f64);
    Ok(Fragment::new("export", bounds, 0.0)
        .with_working_image(working)
        .with_minutiae(minutiae))
}

fn parse_inputs(minutiae: JsValue, settings: JsValue) -> Result<(Vec<Minutia>, DisplaySettings), JsValue> {
    let minutiae: Vec<Minutia> = serde_wasm_bindgen::from_value(minutiae)
        .map_err(|e| JsValue::from_str(&format!("Invalid minutiae: {}", e)))?;
    let settings: DisplaySettings = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid display settings: {}", e)))?;
    Ok((minutiae, settings))
}

/// Render a working image with minutia markers at `target_width`.
///
/// # Arguments
///
/// * `image` - The fragment's working image
/// * `minutiae` - Array of `{ id, position: {x, y}, angle, kind }`
/// * `settings` - Display settings; missing fields take their defaults
/// * `target_width` - Output width in pixels; height follows the aspect ratio
/// * `filter` - 0 = nearest, 1 = bilinear, 2 = lanczos3
///
/// # Errors
///
/// Returns an error for a zero target width or invalid input. An empty image
/// renders to an empty result.
#[wasm_bindgen]
pub fn export_fragment(
    image: &JsRasterImage,
    minutiae: JsValue,
    settings: JsValue,
    target_width: u32,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    let (minutiae, settings) = parse_inputs(minutiae, settings)?;
    let fragment = export_fragment_from(image, minutiae)?;
    ExportRenderer::new(filter_from_u8(filter))
        .render(&fragment, &settings, target_width)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_err)
}

/// Render a preview fitted inside `max_edge` pixels.
#[wasm_bindgen]
pub fn preview_fragment(
    image: &JsRasterImage,
    minutiae: JsValue,
    settings: JsValue,
    max_edge: u32,
) -> Result<JsRasterImage, JsValue> {
    let (minutiae, settings) = parse_inputs(minutiae, settings)?;
    let fragment = export_fragment_from(image, minutiae)?;
    ExportRenderer::default()
        .render_preview(&fragment, &settings, max_edge)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_err)
}

/// Encode a rendered export.
///
/// # Arguments
///
/// * `image` - Rendered export
/// * `format` - File extension: `png`, `jpg`/`jpeg`, `tif`/`tiff` or `bmp`
/// * `quality` - JPEG quality (1-100); ignored by the other formats
#[wasm_bindgen]
pub fn encode_export(image: &JsRasterImage, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format = ExportFormat::from_extension(format)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported export format: {}", format)))?;
    encode_image(&image.to_raster()?, format, quality).map_err(to_js_err)
}

/// MIME type for an export format extension, for building a download Blob.
#[wasm_bindgen]
pub fn export_mime_type(format: &str) -> Option<String> {
    ExportFormat::from_extension(format).map(|f| f.mime_type().to_string())
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn empty_array() -> JsValue {
        js_sys::Array::new().into()
    }

    fn empty_object() -> JsValue {
        js_sys::Object::new().into()
    }

    #[wasm_bindgen_test]
    fn test_export_fragment_scales() {
        let image = JsRasterImage::new(30, 20, vec![128u8; 30 * 20 * 3]);
        let out = export_fragment(&image, empty_array(), empty_object(), 60, 1).unwrap();
        assert_eq!(out.width(), 60);
        assert_eq!(out.height(), 40);
    }

    #[wasm_bindgen_test]
    fn test_export_fragment_zero_width() {
        let image = JsRasterImage::new(30, 20, vec![128u8; 30 * 20 * 3]);
        assert!(export_fragment(&image, empty_array(), empty_object(), 0, 1).is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_empty_image_is_empty() {
        let image = JsRasterImage::new(0, 0, Vec::new());
        let out = export_fragment(&image, empty_array(), empty_object(), 60, 1).unwrap();
        assert_eq!((out.width(), out.height()), (0, 0));
    }

    #[wasm_bindgen_test]
    fn test_encode_export_png() {
        let image = JsRasterImage::new(8, 8, vec![128u8; 8 * 8 * 3]);
        let bytes = encode_export(&image, "png", 90).unwrap();
        assert_eq!(&bytes[0..4], &[0x89, b'P', b'N', b'G']);
        assert!(encode_export(&image, "gif", 90).is_err());
    }
}
