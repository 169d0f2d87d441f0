//! Raster buffers owned by fragments and produced by export.
//!
//! Decoding is handled outside this crate; callers hand over RGB pixel data
//! already in memory.

mod resize;
mod types;

pub use resize::{fit_dimensions, height_for_width, resize};
pub use types::{FilterType, RasterError, RasterImage};
