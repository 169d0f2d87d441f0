//! High-resolution export of annotated fragments.
//!
//! Export re-renders a fragment's working image together with its minutiae
//! at a requested size. It never looks at the interactive zoom or pan: all
//! marker sizes derive from the display settings times the export scale.
//! A fragment without a working image exports as an empty raster rather
//! than an error; only zero target sizes are rejected.
//!
//! # Module Structure
//!
//! - `renderer` - Single-fragment export and preview
//! - `matches` - Two fragments side by side with correspondence lines

mod matches;
mod renderer;

pub use matches::{MatchExport, MATCH_GAP};
pub use renderer::ExportRenderer;

use crate::raster::RasterError;
use thiserror::Error;

/// Errors that prevent an export from being produced.
#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    /// A target dimension of zero was requested.
    #[error("Invalid export size: {0} must be greater than zero")]
    ZeroSize(&'static str),

    /// Resampling the working image failed.
    #[error("Failed to resample working image: {0}")]
    Raster(#[from] RasterError),
}
