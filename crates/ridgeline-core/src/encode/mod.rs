//! Encoding of exported rasters.
//!
//! This module provides:
//! - [`ExportFormat`], the output formats offered by the save dialog
//! - [`encode_image`] to turn an RGB raster into file bytes
//! - [`save_encoded`] to write those bytes, reporting failures as errors
//!
//! All codecs come from the `image` crate.

mod format;
mod image_codec;

pub use format::ExportFormat;
pub use image_codec::{encode_image, save_encoded, EncodeError, DEFAULT_JPEG_QUALITY};
