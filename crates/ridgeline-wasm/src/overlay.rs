//! Interactive overlay session for the browser front end.
//!
//! The front end owns the canvas. It pushes fragments, settings and view
//! state into a [`JsOverlaySession`], forwards pointer events, and paints the
//! display lists returned by `render_fragments` / `render_minutiae`.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsOverlaySession(imageWidth, imageHeight, true);
//! session.set_fragments(fragments);
//! session.set_zoom(1.5);
//!
//! canvas.onpointermove = (e) => {
//!   for (const event of session.pointer_moved(e.offsetX, e.offsetY)) {
//!     dispatch(event);
//!   }
//!   paint(session.render_fragments());
//! };
//! ```

use ridgeline_core::geometry::{IntPoint, Point, Size};
use ridgeline_core::interaction::{OverlayEvent, OverlayInteraction};
use ridgeline_core::model::{
    AnnotationModel, DisplaySettings, Fragment, ModelError, ViewTransformState,
};
use ridgeline_core::render::{DisplayList, DrawCommand, OverlayPalette, OverlayRenderer};
use ridgeline_core::transform::TransformError;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

fn transform_err(e: TransformError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn model_err(e: ModelError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Annotation data the session draws and queries.
#[derive(Debug, Clone, Default)]
struct OverlayDocument {
    fragments: Vec<Fragment>,
    current: Option<Fragment>,
    settings: DisplaySettings,
    view: ViewTransformState,
}

impl OverlayDocument {
    /// Edit mode when a current fragment is set, fragment display otherwise.
    fn model(&self) -> AnnotationModel<'_> {
        match &self.current {
            Some(current) => AnnotationModel::editing(current, &self.settings, &self.view),
            None => AnnotationModel::with_fragments(&self.fragments, &self.settings, &self.view),
        }
    }

    fn render(
        &self,
        renderer: &OverlayRenderer,
        interaction: &OverlayInteraction,
    ) -> Result<Vec<DrawCommand>, TransformError> {
        let mut list = DisplayList::new();
        renderer.render(&mut list, &self.model(), &interaction.highlights())?;
        Ok(list.into_commands())
    }
}

/// Interactive overlay state held on the WASM side.
#[wasm_bindgen]
pub struct JsOverlaySession {
    document: OverlayDocument,
    interaction: OverlayInteraction,
    renderer: OverlayRenderer,
}

#[wasm_bindgen]
impl JsOverlaySession {
    /// Create a session over a base image of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(image_width: u32, image_height: u32, editing_enabled: bool) -> JsOverlaySession {
        JsOverlaySession {
            document: OverlayDocument {
                view: ViewTransformState::new(image_width, image_height),
                ..OverlayDocument::default()
            },
            interaction: OverlayInteraction::new(editing_enabled),
            renderer: OverlayRenderer::default(),
        }
    }

    /// Replace the displayed fragments.
    ///
    /// # Arguments
    /// * `fragments` - Array of `{ id, source_rect, source_rotation, minutiae }`
    ///
    /// # Errors
    /// Returns an error for malformed input or duplicate fragment or minutia
    /// ids; the previous fragments stay in place.
    pub fn set_fragments(&mut self, fragments: JsValue) -> Result<(), JsValue> {
        let fragments = from_js(fragments, "fragments")?;
        self.replace_fragments(fragments).map_err(model_err)
    }

    /// Enter edit mode on one fragment, or leave it with `null`.
    ///
    /// # Errors
    /// Returns an error for malformed input or duplicate minutia ids.
    pub fn set_current_fragment(&mut self, fragment: JsValue) -> Result<(), JsValue> {
        let current = if fragment.is_null() || fragment.is_undefined() {
            None
        } else {
            Some(from_js(fragment, "fragment")?)
        };
        self.replace_current(current).map_err(model_err)
    }

    /// Apply display settings. Missing fields take their defaults.
    pub fn set_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings: DisplaySettings = from_js(settings, "display settings")?;
        self.document.settings = settings.sanitized();
        Ok(())
    }

    pub fn settings(&self) -> Result<JsValue, JsValue> {
        to_js(&self.document.settings)
    }

    /// Apply fragment highlight colors. Missing fields take their defaults.
    pub fn set_palette(&mut self, palette: JsValue) -> Result<(), JsValue> {
        let palette: OverlayPalette = from_js(palette, "overlay palette")?;
        self.renderer = OverlayRenderer::new(palette);
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.document.view.set_zoom(zoom);
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.document.view.zoom()
    }

    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.document.view.scroll_offset = Point::new(x, y);
    }

    /// Current base-image rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.document.view.rotation = degrees;
    }

    /// Recompute the centering offset for a viewport size.
    pub fn center_in_viewport(&mut self, width: f64, height: f64) {
        self.document.view.center_in_viewport(Size::new(width, height));
    }

    pub fn set_editing_enabled(&mut self, enabled: bool) {
        self.interaction.set_editing_enabled(enabled);
    }

    /// Draw commands for the fragment quads of the current view.
    pub fn render_fragments(&self) -> Result<JsValue, JsValue> {
        if self.document.current.is_some() {
            return to_js(&Vec::<DrawCommand>::new());
        }
        let commands = self
            .document
            .render(&self.renderer, &self.interaction)
            .map_err(transform_err)?;
        to_js(&commands)
    }

    /// Draw commands for the current fragment's minutiae.
    pub fn render_minutiae(&self) -> Result<JsValue, JsValue> {
        if self.document.current.is_none() {
            return to_js(&Vec::<DrawCommand>::new());
        }
        let commands = self
            .document
            .render(&self.renderer, &self.interaction)
            .map_err(transform_err)?;
        to_js(&commands)
    }

    /// Returns an array of overlay events.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let events = self
            .interaction
            .pointer_moved(&self.document.model(), Point::new(x, y))
            .map_err(transform_err)?;
        to_js(&events)
    }

    pub fn pointer_pressed(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let events = self.press(Point::new(x, y)).map_err(transform_err)?;
        to_js(&events)
    }

    pub fn pointer_released(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.interaction.pointer_released())
    }

    pub fn pointer_double_clicked(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let events = self
            .interaction
            .pointer_double_clicked(&self.document.model(), Point::new(x, y))
            .map_err(transform_err)?;
        to_js(&events)
    }

    pub fn clear_selection(&mut self) {
        self.interaction.clear_selection();
    }

    /// Select a minutia from outside the canvas (e.g. a list view).
    pub fn select_minutia(&mut self, minutia_id: Option<String>) {
        self.interaction.select_minutia(minutia_id.as_deref());
    }

    /// Select a fragment from outside the canvas.
    pub fn select_fragment(&mut self, fragment_id: Option<String>) {
        self.interaction.select_fragment(fragment_id.as_deref());
    }

    #[wasm_bindgen(getter)]
    pub fn selected_minutia(&self) -> Option<String> {
        self.interaction.selected_minutia().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn selected_fragment(&self) -> Option<String> {
        self.interaction.selected_fragment().map(str::to_string)
    }

    /// Commit a position accepted by the document model to the session copy.
    ///
    /// Returns false when the current fragment has no such minutia.
    pub fn commit_minutia_position(&mut self, minutia_id: &str, x: i32, y: i32) -> bool {
        self.commit_position(minutia_id, IntPoint::new(x, y))
    }
}

impl JsOverlaySession {
    fn replace_fragments(&mut self, fragments: Vec<Fragment>) -> Result<(), ModelError> {
        AnnotationModel::with_fragments(&fragments, &self.document.settings, &self.document.view)
            .validate()?;
        self.document.fragments = fragments;
        Ok(())
    }

    fn replace_current(&mut self, current: Option<Fragment>) -> Result<(), ModelError> {
        if let Some(fragment) = &current {
            AnnotationModel::editing(fragment, &self.document.settings, &self.document.view)
                .validate()?;
        }
        self.document.current = current;
        self.interaction.select_minutia(None);
        Ok(())
    }

    fn commit_position(&mut self, minutia_id: &str, position: IntPoint) -> bool {
        let Some(current) = self.document.current.as_mut() else {
            return false;
        };
        match current.minutiae_mut().iter_mut().find(|m| m.id == minutia_id) {
            Some(minutia) => {
                minutia.position = position;
                true
            }
            None => false,
        }
    }

    fn press(&mut self, point: Point) -> Result<Vec<OverlayEvent>, TransformError> {
        self.interaction.pointer_pressed(&self.document.model(), point)
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_settings_round_trip_with_defaults() {
        let mut session = JsOverlaySession::new(100, 100, true);
        let partial = js_sys::JSON::parse(r#"{"marker_diameter": 20, "show_type": true}"#).unwrap();
        session.set_settings(partial).unwrap();
        let settings: DisplaySettings =
            serde_wasm_bindgen::from_value(session.settings().unwrap()).unwrap();
        assert_eq!(settings.marker_diameter, 20.0);
        assert!(settings.show_type);
        assert!(settings.show_index);
    }

    #[wasm_bindgen_test]
    fn test_render_fragments_empty_in_edit_mode() {
        let mut session = JsOverlaySession::new(100, 100, true);
        let fragment = js_sys::JSON::parse(
            r#"{"id": "f", "source_rect": {"x": 0, "y": 0, "width": 10, "height": 10}, "source_rotation": 0}"#,
        )
        .unwrap();
        session.set_current_fragment(fragment).unwrap();
        let commands: Vec<DrawCommand> =
            serde_wasm_bindgen::from_value(session.render_fragments().unwrap()).unwrap();
        assert!(commands.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_duplicate_fragments_rejected() {
        let mut session = JsOverlaySession::new(100, 100, true);
        let fragments = js_sys::JSON::parse(
            r#"[{"id": "a", "source_rect": {"x": 0, "y": 0, "width": 10, "height": 10}, "source_rotation": 0},
                {"id": "a", "source_rect": {"x": 20, "y": 0, "width": 10, "height": 10}, "source_rotation": 0}]"#,
        )
        .unwrap();
        assert!(session.set_fragments(fragments).is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_fragments_rejected() {
        let mut session = JsOverlaySession::new(100, 100, true);
        assert!(session.set_fragments(JsValue::from_str("nope")).is_err());
    }
}
