//! Image space ↔ view space mapping.
//!
//! # Algorithm
//!
//! Forward (image → view):
//! 1. Translate by `-pivot`
//! 2. Rotate by the rotation delta
//! 3. Translate by `+pivot`
//! 4. Scale by `zoom`
//! 5. Translate by `+centering_offset - scroll_offset`
//!
//! The inverse runs the same steps backwards with inverted operations.

use super::rotation::rotate_about;
use crate::geometry::Point;
use thiserror::Error;

/// Errors raised when constructing a view transform.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// Zoom must be finite and strictly positive.
    #[error("Invalid zoom factor {0}: must be finite and greater than zero")]
    InvalidZoom(f64),
}

/// A validated, immutable image ↔ view mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pivot: Point,
    rotation_degrees: f64,
    zoom: f64,
    centering_offset: Point,
    scroll_offset: Point,
}

impl ViewTransform {
    /// Build a transform, rejecting non-positive or non-finite zoom.
    pub fn new(
        pivot: Point,
        rotation_degrees: f64,
        zoom: f64,
        centering_offset: Point,
        scroll_offset: Point,
    ) -> Result<Self, TransformError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(TransformError::InvalidZoom(zoom));
        }
        Ok(Self {
            pivot,
            rotation_degrees,
            zoom,
            centering_offset,
            scroll_offset,
        })
    }

    /// Zoom and pan only.
    pub fn scale_translate(
        zoom: f64,
        centering_offset: Point,
        scroll_offset: Point,
    ) -> Result<Self, TransformError> {
        Self::new(Point::ORIGIN, 0.0, zoom, centering_offset, scroll_offset)
    }

    /// The same transform with a different rotation delta.
    pub fn with_rotation(&self, rotation_degrees: f64) -> Self {
        Self {
            rotation_degrees,
            ..*self
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Map an image-space point into view space.
    pub fn image_to_view(&self, point: Point) -> Point {
        let rotated = rotate_about(point, self.pivot, self.rotation_degrees);
        Point::new(
            rotated.x * self.zoom + self.centering_offset.x - self.scroll_offset.x,
            rotated.y * self.zoom + self.centering_offset.y - self.scroll_offset.y,
        )
    }

    /// Map a view-space point back into image space.
    pub fn view_to_image(&self, point: Point) -> Point {
        let unscaled = Point::new(
            (point.x - self.centering_offset.x + self.scroll_offset.x) / self.zoom,
            (point.y - self.centering_offset.y + self.scroll_offset.y) / self.zoom,
        );
        rotate_about(unscaled, self.pivot, -self.rotation_degrees)
    }
}
