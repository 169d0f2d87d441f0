//! WASM-compatible wrapper types for raster data.

use ridgeline_core::raster::{FilterType, RasterImage};
use wasm_bindgen::prelude::*;

/// An RGB raster handed between JavaScript and the core.
///
/// Pixel data lives in WASM memory; `pixels()` copies it into a `Uint8Array`.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a raster from dimensions and RGB pixel data (3 bytes per pixel,
    /// row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_raster(image: RasterImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels,
        }
    }

    /// Validated copy as a core raster.
    pub(crate) fn to_raster(&self) -> Result<RasterImage, JsValue> {
        RasterImage::new(self.width, self.height, self.pixels.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Convert a u8 filter value to the core FilterType.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Lanczos3
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}
