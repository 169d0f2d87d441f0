//! Coordinate transforms between image space and view space.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Base-image rotation is in degrees about the image center
//! - Fragment geometry is rotated by the *delta* between the current base
//!   rotation and the rotation recorded when the fragment was captured
//! - Minutia angles are counter-clockwise from +x with the screen y inverted

mod rotation;
mod view;

pub use rotation::{direction_vector, normalize_degrees, rotate_about};
pub use view::{TransformError, ViewTransform};
