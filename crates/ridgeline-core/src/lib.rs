//! Ridgeline Core - Annotation overlay library
//!
//! This crate provides the geometry and rendering core for annotating
//! fingerprint fragments: mapping annotations between image and view space
//! under zoom, pan and rotation, hit-testing them for pointer interaction,
//! and rendering minutia markers both interactively and for export.
//!
//! # Module Structure
//!
//! - `transform` - Image ↔ view coordinate mapping
//! - `model` - Fragments, minutiae, display settings and view state
//! - `scene` - View-space shapes shared by rendering and hit-testing
//! - `render` - Drawing surfaces, symbols, labels and the overlay renderer
//! - `hit_test` - Fragment and minutia pointer queries
//! - `interaction` - Hover, selection and drag state producing events
//! - `export` - High-resolution rendering of annotated fragments
//! - `raster` - RGB buffers and resampling
//! - `encode` - PNG/JPEG/TIFF/BMP encoding

pub mod color;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod raster;
pub mod render;
pub mod scene;
pub mod transform;

pub use color::Color;
pub use encode::{encode_image, save_encoded, EncodeError, ExportFormat};
pub use export::{ExportError, ExportRenderer};
pub use geometry::{IntPoint, Point, Rect, Size};
pub use hit_test::{HitTester, HIT_MARGIN};
pub use interaction::{OverlayEvent, OverlayInteraction};
pub use model::{
    AnnotationModel, DisplaySettings, Fragment, LabelPosition, Minutia, MinutiaKind, ModelError,
    SymbolKind, ViewTransformState,
};
pub use raster::RasterImage;
pub use render::{DisplayList, OverlayRenderer, Surface};
pub use scene::OverlayScene;
pub use transform::{TransformError, ViewTransform};
