//! WASM bindings for image ↔ view coordinate mapping.
//!
//! The front end uses these to place its own widgets (context menus, drag
//! previews) over annotations in the same coordinates the overlay uses.

use ridgeline_core::geometry::Point;
use ridgeline_core::transform::ViewTransform;
use wasm_bindgen::prelude::*;

/// A validated image ↔ view transform.
#[wasm_bindgen]
pub struct JsViewTransform {
    inner: ViewTransform,
}

#[wasm_bindgen]
impl JsViewTransform {
    /// Create a transform.
    ///
    /// # Arguments
    /// * `pivot_x`, `pivot_y` - Rotation pivot in image space (image center)
    /// * `rotation_degrees` - Rotation delta to apply
    /// * `zoom` - Scale factor, must be finite and greater than zero
    /// * `centering_x`, `centering_y` - View-space centering offset
    /// * `scroll_x`, `scroll_y` - View-space scroll offset
    ///
    /// # Errors
    /// Returns an error for an invalid zoom.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pivot_x: f64,
        pivot_y: f64,
        rotation_degrees: f64,
        zoom: f64,
        centering_x: f64,
        centering_y: f64,
        scroll_x: f64,
        scroll_y: f64,
    ) -> Result<JsViewTransform, JsValue> {
        ViewTransform::new(
            Point::new(pivot_x, pivot_y),
            rotation_degrees,
            zoom,
            Point::new(centering_x, centering_y),
            Point::new(scroll_x, scroll_y),
        )
        .map(|inner| JsViewTransform { inner })
        .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Map an image-space point to view space. Returns `[x, y]`.
    pub fn image_to_view(&self, x: f64, y: f64) -> Vec<f64> {
        let p = self.inner.image_to_view(Point::new(x, y));
        vec![p.x, p.y]
    }

    /// Map a view-space point back to image space. Returns `[x, y]`.
    pub fn view_to_image(&self, x: f64, y: f64) -> Vec<f64> {
        let p = self.inner.view_to_image(Point::new(x, y));
        vec![p.x, p.y]
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }
}
