//! Ridgeline WASM - WebAssembly bindings for Ridgeline
//!
//! This crate exposes the ridgeline-core overlay to a browser front end. The
//! front end owns the canvas and paints the display lists produced here.
//!
//! # Module Structure
//!
//! - `overlay` - Interactive overlay session (display lists, pointer events)
//! - `transform` - Image ↔ view coordinate mapping
//! - `export` - High-resolution fragment export and encoding
//! - `types` - WASM-compatible wrapper types for raster data
//! - `logger` - Forwards `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsOverlaySession, set_log_level } from '@ridgeline/wasm';
//!
//! await init();
//! set_log_level('debug');
//!
//! const session = new JsOverlaySession(width, height, true);
//! ```

use wasm_bindgen::prelude::*;

mod export;
mod logger;
mod overlay;
mod transform;
mod types;

pub use export::{encode_export, export_fragment, export_mime_type, preview_fragment};
pub use overlay::JsOverlaySession;
pub use transform::JsViewTransform;
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Change the console log level: off, error, warn, info, debug or trace.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logger::install(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
