//! Live zoom, pan and base-image rotation of the interactive view.

use crate::geometry::{Point, Size};
use crate::model::Fragment;
use crate::transform::{TransformError, ViewTransform};
use serde::{Deserialize, Serialize};

/// Mutable view parameters owned by the UI thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTransformState {
    zoom: f64,
    /// View-space scroll translation.
    pub scroll_offset: Point,
    /// View-space offset that centers the image in the viewport.
    pub centering_offset: Point,
    /// Current base-image rotation in degrees.
    pub rotation: f64,
    /// Base image width in pixels; the rotation pivot is the image center.
    pub image_width: u32,
    /// Base image height in pixels.
    pub image_height: u32,
}

impl Default for ViewTransformState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            scroll_offset: Point::ORIGIN,
            centering_offset: Point::ORIGIN,
            rotation: 0.0,
            image_width: 0,
            image_height: 0,
        }
    }
}

impl ViewTransformState {
    /// Smallest zoom accepted by `set_zoom`.
    pub const MIN_ZOOM: f64 = 0.01;

    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, clamping non-positive or non-finite values.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() || zoom < Self::MIN_ZOOM {
            log::warn!("Zoom {} out of range, clamping to {}", zoom, Self::MIN_ZOOM);
            self.zoom = Self::MIN_ZOOM;
        } else {
            self.zoom = zoom;
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.set_zoom(zoom);
        self
    }

    /// Center of the base image, used as rotation pivot.
    pub fn pivot(&self) -> Point {
        Point::new(self.image_width as f64 / 2.0, self.image_height as f64 / 2.0)
    }

    /// Recompute the centering offset so the zoomed image sits in the middle
    /// of a viewport. Images larger than the viewport get a zero offset.
    pub fn center_in_viewport(&mut self, viewport: Size) {
        let w = self.image_width as f64 * self.zoom;
        let h = self.image_height as f64 * self.zoom;
        self.centering_offset = Point::new(
            ((viewport.width - w) / 2.0).max(0.0),
            ((viewport.height - h) / 2.0).max(0.0),
        );
    }

    /// Zoom and pan only; used for minutiae and for base-image pointer
    /// positions.
    pub fn scale_transform(&self) -> Result<ViewTransform, TransformError> {
        ViewTransform::scale_translate(self.zoom, self.centering_offset, self.scroll_offset)
    }

    /// Transform for a fragment's source geometry, rotated by the delta
    /// accumulated since the fragment was captured.
    pub fn fragment_transform(&self, fragment: &Fragment) -> Result<ViewTransform, TransformError> {
        ViewTransform::new(
            self.pivot(),
            fragment.rotation_delta(self.rotation),
            self.zoom,
            self.centering_offset,
            self.scroll_offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn test_set_zoom_clamps() {
        let mut v = ViewTransformState::new(100, 100);
        v.set_zoom(0.0);
        assert_eq!(v.zoom(), ViewTransformState::MIN_ZOOM);
        v.set_zoom(-3.0);
        assert_eq!(v.zoom(), ViewTransformState::MIN_ZOOM);
        v.set_zoom(f64::NAN);
        assert_eq!(v.zoom(), ViewTransformState::MIN_ZOOM);
        v.set_zoom(2.5);
        assert_eq!(v.zoom(), 2.5);
    }

    #[test]
    fn test_pivot_is_image_center() {
        assert_eq!(ViewTransformState::new(100, 50).pivot(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_center_in_viewport() {
        let mut v = ViewTransformState::new(100, 50).with_zoom(2.0);
        v.center_in_viewport(Size::new(400.0, 300.0));
        assert_eq!(v.centering_offset, Point::new(100.0, 100.0));

        v.center_in_viewport(Size::new(100.0, 50.0));
        assert_eq!(v.centering_offset, Point::ORIGIN);
    }

    #[test]
    fn test_fragment_transform_uses_delta() {
        let mut v = ViewTransformState::new(100, 50);
        v.rotation = 100.0;
        let f = Fragment::new("f", Rect::new(0.0, 0.0, 10.0, 10.0), 10.0);
        let t = v.fragment_transform(&f).unwrap();
        assert_eq!(t.rotation_degrees(), 90.0);
        assert_eq!(t.pivot(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_deserialized_invalid_zoom_is_rejected_by_transform() {
        let v = ViewTransformState {
            zoom: 0.0,
            ..ViewTransformState::default()
        };
        assert!(v.scale_transform().is_err());
    }
}
