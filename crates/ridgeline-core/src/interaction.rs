//! Pointer interaction on the overlay.
//!
//! [`OverlayInteraction`] turns pointer events into [`OverlayEvent`]s. It
//! holds selection and hover by id and never mutates the annotation data:
//! drags only propose new positions, and the owner decides whether to apply
//! them.

use crate::geometry::{IntPoint, Point};
use crate::hit_test::HitTester;
use crate::model::AnnotationModel;
use crate::render::Highlights;
use crate::transform::TransformError;
use serde::{Deserialize, Serialize};

/// Notifications emitted to the owner of the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayEvent {
    /// A fragment was pressed. `image_position` is the pointer in base-image
    /// coordinates as currently displayed.
    FragmentClicked {
        fragment_id: String,
        image_position: Point,
    },
    /// The hovered fragment changed; `None` when the pointer left all fragments.
    FragmentHovered { fragment_id: Option<String> },
    /// A minutia was pressed. `position` is the pointer in working-image
    /// coordinates.
    MinutiaClicked {
        minutia_id: String,
        position: IntPoint,
    },
    MinutiaDoubleClicked { minutia_id: String },
    /// A drag proposes moving a minutia to `proposed`.
    PositionChanged {
        minutia_id: String,
        proposed: IntPoint,
    },
}

/// Selection, hover and drag state for one overlay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayInteraction {
    selected_fragment: Option<String>,
    hovered_fragment: Option<String>,
    selected_minutia: Option<String>,
    dragging_minutia: bool,
    editing_enabled: bool,
}

impl OverlayInteraction {
    pub fn new(editing_enabled: bool) -> Self {
        Self {
            editing_enabled,
            ..Self::default()
        }
    }

    pub fn editing_enabled(&self) -> bool {
        self.editing_enabled
    }

    /// Enabling or disabling editing ends any drag in progress.
    pub fn set_editing_enabled(&mut self, enabled: bool) {
        self.editing_enabled = enabled;
        if !enabled {
            self.dragging_minutia = false;
        }
    }

    pub fn selected_fragment(&self) -> Option<&str> {
        self.selected_fragment.as_deref()
    }

    pub fn hovered_fragment(&self) -> Option<&str> {
        self.hovered_fragment.as_deref()
    }

    pub fn selected_minutia(&self) -> Option<&str> {
        self.selected_minutia.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_minutia
    }

    /// Current state in the form the renderer consumes.
    pub fn highlights(&self) -> Highlights<'_> {
        Highlights {
            selected_fragment: self.selected_fragment(),
            hovered_fragment: self.hovered_fragment(),
            selected_minutia: self.selected_minutia(),
        }
    }

    /// Programmatic selection, e.g. from a list view. Emits nothing.
    ///
    /// Selecting a minutia drops the fragment selection.
    pub fn select_minutia(&mut self, minutia_id: Option<&str>) {
        self.selected_minutia = minutia_id.map(str::to_string);
        if self.selected_minutia.is_some() {
            self.selected_fragment = None;
        }
    }

    /// Selecting a fragment drops the minutia selection and ends any drag.
    pub fn select_fragment(&mut self, fragment_id: Option<&str>) {
        self.selected_fragment = fragment_id.map(str::to_string);
        if self.selected_fragment.is_some() {
            self.selected_minutia = None;
            self.dragging_minutia = false;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_fragment = None;
        self.selected_minutia = None;
        self.dragging_minutia = false;
    }

    /// Pointer moved to `point` in view space.
    ///
    /// While dragging this proposes a new position for the selected minutia;
    /// otherwise it updates the hovered fragment.
    pub fn pointer_moved(
        &mut self,
        model: &AnnotationModel<'_>,
        point: Point,
    ) -> Result<Vec<OverlayEvent>, TransformError> {
        if self.dragging_minutia {
            let Some(minutia_id) = self.selected_minutia.clone() else {
                self.dragging_minutia = false;
                return Ok(Vec::new());
            };
            let proposed = model.view().scale_transform()?.view_to_image(point).round();
            return Ok(vec![OverlayEvent::PositionChanged {
                minutia_id,
                proposed,
            }]);
        }

        let hits = HitTester::new(model)?;
        let hovered = hits.fragment_at(point).map(|f| f.id().to_string());
        if hovered == self.hovered_fragment {
            return Ok(Vec::new());
        }
        self.hovered_fragment = hovered.clone();
        Ok(vec![OverlayEvent::FragmentHovered {
            fragment_id: hovered,
        }])
    }

    /// Pointer button pressed at `point` in view space.
    ///
    /// Minutiae take priority over fragments. Pressing empty space clears the
    /// selection without emitting anything.
    pub fn pointer_pressed(
        &mut self,
        model: &AnnotationModel<'_>,
        point: Point,
    ) -> Result<Vec<OverlayEvent>, TransformError> {
        let hits = HitTester::new(model)?;
        let image_position = model.view().scale_transform()?.view_to_image(point);

        if let Some(minutia) = hits.minutia_at(point) {
            self.select_minutia(Some(&minutia.id));
            self.dragging_minutia = self.editing_enabled;
            return Ok(vec![OverlayEvent::MinutiaClicked {
                minutia_id: minutia.id.clone(),
                position: image_position.round(),
            }]);
        }

        if let Some(fragment) = hits.fragment_at(point) {
            self.select_fragment(Some(fragment.id()));
            return Ok(vec![OverlayEvent::FragmentClicked {
                fragment_id: fragment.id().to_string(),
                image_position,
            }]);
        }

        self.clear_selection();
        Ok(Vec::new())
    }

    /// Pointer button released. Always ends a drag.
    pub fn pointer_released(&mut self) -> Vec<OverlayEvent> {
        self.dragging_minutia = false;
        Vec::new()
    }

    pub fn pointer_double_clicked(
        &mut self,
        model: &AnnotationModel<'_>,
        point: Point,
    ) -> Result<Vec<OverlayEvent>, TransformError> {
        let hits = HitTester::new(model)?;
        Ok(hits
            .minutia_at(point)
            .map(|m| OverlayEvent::MinutiaDoubleClicked {
                minutia_id: m.id.clone(),
            })
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::{DisplaySettings, Fragment, Minutia, MinutiaKind, ViewTransformState};

    fn editable() -> Fragment {
        Fragment::new("frag", Rect::new(0.0, 0.0, 100.0, 100.0), 0.0).with_minutiae(vec![
            Minutia::new("m1", IntPoint::new(10, 10), 0.0, MinutiaKind::Ending),
            Minutia::new("m2", IntPoint::new(60, 60), 0.0, MinutiaKind::Bifurcation),
        ])
    }

    #[test]
    fn test_press_minutia_starts_drag_when_editing() {
        let current = editable();
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(100, 100).with_zoom(2.0);
        let model = AnnotationModel::editing(&current, &settings, &view);

        let mut interaction = OverlayInteraction::new(true);
        let events = interaction.pointer_pressed(&model, Point::new(20.0, 20.0)).unwrap();
        assert_eq!(
            events,
            vec![OverlayEvent::MinutiaClicked {
                minutia_id: "m1".to_string(),
                position: IntPoint::new(10, 10),
            }]
        );
        assert!(interaction.is_dragging());
        assert_eq!(interaction.selected_minutia(), Some("m1"));

        let events = interaction.pointer_moved(&model, Point::new(41.0, 30.0)).unwrap();
        assert_eq!(
            events,
            vec![OverlayEvent::PositionChanged {
                minutia_id: "m1".to_string(),
                proposed: IntPoint::new(21, 15),
            }]
        );

        interaction.pointer_released();
        assert!(!interaction.is_dragging());
        // Hover mode again: no fragments in edit mode, nothing changes
        assert!(interaction.pointer_moved(&model, Point::new(41.0, 30.0)).unwrap().is_empty());
    }

    #[test]
    fn test_press_without_editing_does_not_drag() {
        let current = editable();
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(100, 100);
        let model = AnnotationModel::editing(&current, &settings, &view);

        let mut interaction = OverlayInteraction::new(false);
        let events = interaction.pointer_pressed(&model, Point::new(60.0, 60.0)).unwrap();
        assert_eq!(events.len(), 1);
        assert!(!interaction.is_dragging());
        assert_eq!(interaction.selected_minutia(), Some("m2"));
    }

    #[test]
    fn test_hover_emits_only_on_change() {
        let fragments = vec![
            Fragment::new("a", Rect::new(0.0, 0.0, 50.0, 50.0), 0.0),
            Fragment::new("b", Rect::new(100.0, 0.0, 50.0, 50.0), 0.0),
        ];
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(200, 100);
        let model = AnnotationModel::with_fragments(&fragments, &settings, &view);
        let mut interaction = OverlayInteraction::default();

        let first = interaction.pointer_moved(&model, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(
            first,
            vec![OverlayEvent::FragmentHovered {
                fragment_id: Some("a".to_string())
            }]
        );
        assert!(interaction.pointer_moved(&model, Point::new(20.0, 20.0)).unwrap().is_empty());

        let left = interaction.pointer_moved(&model, Point::new(75.0, 10.0)).unwrap();
        assert_eq!(left, vec![OverlayEvent::FragmentHovered { fragment_id: None }]);
        assert_eq!(interaction.hovered_fragment(), None);
    }

    #[test]
    fn test_press_fragment_reports_image_position() {
        let fragments = vec![Fragment::new("a", Rect::new(0.0, 0.0, 50.0, 50.0), 0.0)];
        let settings = DisplaySettings::default();
        let mut view = ViewTransformState::new(100, 100).with_zoom(2.0);
        view.scroll_offset = Point::new(10.0, 0.0);
        let model = AnnotationModel::with_fragments(&fragments, &settings, &view);

        let mut interaction = OverlayInteraction::new(true);
        let events = interaction.pointer_pressed(&model, Point::new(30.0, 40.0)).unwrap();
        assert_eq!(
            events,
            vec![OverlayEvent::FragmentClicked {
                fragment_id: "a".to_string(),
                image_position: Point::new(20.0, 20.0),
            }]
        );
        assert_eq!(interaction.highlights().selected_fragment, Some("a"));
        assert!(!interaction.is_dragging());

        // Empty space clears the selection
        assert!(interaction.pointer_pressed(&model, Point::new(190.0, 190.0)).unwrap().is_empty());
        assert_eq!(interaction.selected_fragment(), None);
    }

    #[test]
    fn test_selecting_one_kind_clears_the_other() {
        let fragments = vec![Fragment::new("a", Rect::new(0.0, 0.0, 50.0, 50.0), 0.0)];
        let current = editable();
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(100, 100);
        let mut interaction = OverlayInteraction::new(true);

        interaction.select_minutia(Some("m1"));
        let overview = AnnotationModel::with_fragments(&fragments, &settings, &view);
        interaction.pointer_pressed(&overview, Point::new(25.0, 25.0)).unwrap();
        assert_eq!(interaction.selected_fragment(), Some("a"));
        assert_eq!(interaction.selected_minutia(), None);

        let editing = AnnotationModel::editing(&current, &settings, &view);
        interaction.pointer_pressed(&editing, Point::new(60.0, 60.0)).unwrap();
        assert_eq!(interaction.selected_minutia(), Some("m2"));
        assert_eq!(interaction.selected_fragment(), None);
        assert!(interaction.is_dragging());

        interaction.select_fragment(Some("a"));
        assert_eq!(interaction.selected_minutia(), None);
        assert!(!interaction.is_dragging());
    }

    #[test]
    fn test_double_click() {
        let current = editable();
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(100, 100);
        let model = AnnotationModel::editing(&current, &settings, &view);
        let mut interaction = OverlayInteraction::new(true);

        assert_eq!(
            interaction.pointer_double_clicked(&model, Point::new(61.0, 59.0)).unwrap(),
            vec![OverlayEvent::MinutiaDoubleClicked {
                minutia_id: "m2".to_string()
            }]
        );
        assert!(interaction
            .pointer_double_clicked(&model, Point::new(35.0, 35.0))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_disabling_editing_cancels_drag() {
        let current = editable();
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(100, 100);
        let model = AnnotationModel::editing(&current, &settings, &view);
        let mut interaction = OverlayInteraction::new(true);
        interaction.pointer_pressed(&model, Point::new(10.0, 10.0)).unwrap();
        assert!(interaction.is_dragging());
        interaction.set_editing_enabled(false);
        assert!(!interaction.is_dragging());
    }
}
