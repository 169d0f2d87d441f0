//! Interactive overlay painting.
//!
//! Fragments are drawn as filled quads with corner handles and a centroid
//! label. Minutiae are drawn with the configured symbol and labels. Marker
//! drawing is shared with export through [`draw_minutia_marker`], which takes
//! its sizes from [`MarkerMetrics`] so the same code works at any scale.

use super::{
    layout_labels, marker_bounds, symbol_primitives, LabelLayout, ShapeStyle, Stroke, Surface,
    TextStyle,
};
use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::model::{AnnotationModel, DisplaySettings, Minutia};
use crate::scene::{FragmentShape, OverlayScene};
use crate::transform::TransformError;
use serde::{Deserialize, Serialize};

/// Color and stroke width for one highlight state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FragmentStateStyle {
    pub color: Color,
    pub stroke_width: f64,
}

/// Fragment presentation for the three highlight states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayPalette {
    pub normal: FragmentStateStyle,
    pub hovered: FragmentStateStyle,
    pub selected: FragmentStateStyle,
    /// Alpha of the quad fill (0-255).
    pub fill_alpha: u8,
    pub handle_radius: f64,
    pub label_font_size: f64,
    pub label_text: Color,
    pub label_background: Color,
}

impl Default for OverlayPalette {
    fn default() -> Self {
        Self {
            normal: FragmentStateStyle {
                color: Color::BLUE,
                stroke_width: 1.5,
            },
            hovered: FragmentStateStyle {
                color: Color::CYAN,
                stroke_width: 2.5,
            },
            selected: FragmentStateStyle {
                color: Color::ORANGE,
                stroke_width: 3.0,
            },
            fill_alpha: 48,
            handle_radius: 4.0,
            label_font_size: 12.0,
            label_text: Color::WHITE,
            label_background: Color::rgba(0, 0, 0, 170),
        }
    }
}

impl OverlayPalette {
    /// Selected wins over hovered, hovered over normal.
    pub fn style_for(&self, selected: bool, hovered: bool) -> FragmentStateStyle {
        if selected {
            self.selected
        } else if hovered {
            self.hovered
        } else {
            self.normal
        }
    }
}

/// Current selection and hover, borrowed from the interaction state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Highlights<'a> {
    pub selected_fragment: Option<&'a str>,
    pub hovered_fragment: Option<&'a str>,
    pub selected_minutia: Option<&'a str>,
}

/// Marker sizes for one rendering scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerMetrics {
    pub diameter: f64,
    pub line_width: f64,
    pub font_size: f64,
    pub text_thickness: f64,
    pub label_layout: LabelLayout,
    pub label_fill: Color,
}

impl MarkerMetrics {
    /// Screen-space sizes for the interactive view; independent of zoom.
    pub fn interactive(settings: &DisplaySettings) -> Self {
        let settings = settings.sanitized();
        Self {
            diameter: settings.marker_diameter,
            line_width: 1.5,
            font_size: settings.font_size,
            text_thickness: 1.0,
            label_layout: LabelLayout {
                padding: 2.0,
                gap: 3.0,
            },
            label_fill: settings.label_background_fill(),
        }
    }

    /// Sizes multiplied by an export scale basis.
    ///
    /// Line and text thickness follow `max(1, radius / 8)`. Label backgrounds
    /// blend 40% fill over 60% of the existing content.
    pub fn scaled(settings: &DisplaySettings, scale: f64) -> Self {
        let settings = settings.sanitized();
        let radius = settings.marker_diameter / 2.0 * scale;
        let thickness = (radius / 8.0).max(1.0);
        Self {
            diameter: radius * 2.0,
            line_width: thickness,
            font_size: settings.font_size * scale,
            text_thickness: thickness,
            label_layout: LabelLayout {
                padding: (2.0 * scale).max(1.0),
                gap: (3.0 * scale).max(1.0),
            },
            label_fill: settings.label_background.with_alpha(102),
        }
    }
}

/// Draw one minutia marker and its labels centered at `center`.
///
/// `index` is the zero-based list position; labels show it one-based.
pub fn draw_minutia_marker(
    surface: &mut dyn Surface,
    center: Point,
    minutia: &Minutia,
    index: usize,
    settings: &DisplaySettings,
    metrics: &MarkerMetrics,
    selected: bool,
) {
    let marker_color = if selected {
        settings.selected_color
    } else {
        settings.marker_color
    };
    let line_width = if selected {
        metrics.line_width + 1.0
    } else {
        metrics.line_width
    };
    let stroke = Stroke::new(marker_color, line_width);

    for primitive in symbol_primitives(
        settings.symbol,
        center,
        metrics.diameter,
        minutia.angle,
        settings.show_angle,
    ) {
        primitive.draw(surface, &stroke);
    }

    let mut texts = Vec::with_capacity(2);
    if settings.show_index {
        texts.push((index + 1).to_string());
    }
    if settings.show_type {
        texts.push(minutia.kind.abbreviation().to_string());
    }
    if texts.is_empty() {
        return;
    }

    let text_color = if selected {
        settings.selected_color
    } else {
        settings.text_color
    };
    let text_style = TextStyle::new(text_color, metrics.font_size)
        .bold(selected)
        .with_thickness(metrics.text_thickness);

    let boxes = layout_labels(
        marker_bounds(center, metrics.diameter),
        &texts,
        settings.label_position,
        metrics.label_layout,
        |t| surface.measure_text(t, &text_style),
    );
    for label in boxes {
        surface.fill_rect(label.background, metrics.label_fill);
        surface.draw_text(label.text_origin, &label.text, &text_style);
    }
}

/// Paints fragments and minutiae for the interactive view.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    palette: OverlayPalette,
}

impl OverlayRenderer {
    pub fn new(palette: OverlayPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &OverlayPalette {
        &self.palette
    }

    /// Build the scene for `model` and paint it.
    ///
    /// An empty model draws nothing.
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        model: &AnnotationModel<'_>,
        highlights: &Highlights<'_>,
    ) -> Result<(), TransformError> {
        let scene = OverlayScene::build(model)?;
        self.paint_scene(surface, &scene, model.settings(), highlights);
        Ok(())
    }

    /// Paint an already built scene.
    pub fn paint_scene(
        &self,
        surface: &mut dyn Surface,
        scene: &OverlayScene<'_>,
        settings: &DisplaySettings,
        highlights: &Highlights<'_>,
    ) {
        for shape in &scene.fragments {
            self.draw_fragment(surface, shape, highlights);
        }

        let metrics = MarkerMetrics::interactive(settings);
        for marker in &scene.markers {
            let selected = highlights.selected_minutia == Some(marker.minutia.id.as_str());
            draw_minutia_marker(
                surface,
                marker.center,
                marker.minutia,
                marker.index,
                settings,
                &metrics,
                selected,
            );
        }
    }

    fn draw_fragment(
        &self,
        surface: &mut dyn Surface,
        shape: &FragmentShape<'_>,
        highlights: &Highlights<'_>,
    ) {
        let id = shape.fragment.id();
        let state = self.palette.style_for(
            highlights.selected_fragment == Some(id),
            highlights.hovered_fragment == Some(id),
        );
        let stroke = Stroke::new(state.color, state.stroke_width);

        surface.draw_polygon(
            &shape.quad,
            &ShapeStyle::stroked(stroke).with_fill(state.color.with_alpha(self.palette.fill_alpha)),
        );

        let handle = ShapeStyle::filled(state.color);
        for corner in &shape.quad {
            surface.draw_ellipse(
                *corner,
                self.palette.handle_radius,
                self.palette.handle_radius,
                &handle,
            );
        }

        let text = format!(
            "{} ({})",
            shape.fragment.id_prefix(),
            shape.fragment.minutiae().len()
        );
        let style = TextStyle::new(self.palette.label_text, self.palette.label_font_size);
        let size = surface.measure_text(&text, &style);
        let anchor = shape.centroid();
        let origin = Point::new(anchor.x - size.width / 2.0, anchor.y - size.height / 2.0);
        surface.fill_rect(
            Rect::new(origin.x, origin.y, size.width, size.height).inflate(3.0),
            self.palette.label_background,
        );
        surface.draw_text(origin, &text, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IntPoint;
    use crate::model::{Fragment, MinutiaKind, SymbolKind, ViewTransformState};
    use crate::render::{DisplayList, DrawCommand};

    fn fragments() -> Vec<Fragment> {
        vec![
            Fragment::new("first-fragment", Rect::new(0.0, 0.0, 50.0, 50.0), 0.0),
            Fragment::new("second", Rect::new(25.0, 25.0, 50.0, 50.0), 0.0),
        ]
    }

    fn polygon_strokes(list: &DisplayList) -> Vec<(Color, f64)> {
        list.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Polygon { style, .. } => style.stroke.map(|s| (s.color, s.width)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_state_precedence() {
        let p = OverlayPalette::default();
        assert_eq!(p.style_for(true, true), p.selected);
        assert_eq!(p.style_for(true, false), p.selected);
        assert_eq!(p.style_for(false, true), p.hovered);
        assert_eq!(p.style_for(false, false), p.normal);
    }

    #[test]
    fn test_selected_and_hovered_renders_selected() {
        let fragments = fragments();
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(100, 100);
        let model = AnnotationModel::with_fragments(&fragments, &settings, &view);
        let renderer = OverlayRenderer::default();
        let highlights = Highlights {
            selected_fragment: Some("second"),
            hovered_fragment: Some("second"),
            selected_minutia: None,
        };

        let mut list = DisplayList::new();
        renderer.render(&mut list, &model, &highlights).unwrap();

        let strokes = polygon_strokes(&list);
        assert_eq!(strokes.len(), 2);
        let palette = renderer.palette();
        assert_eq!(strokes[0], (palette.normal.color, palette.normal.stroke_width));
        assert_eq!(strokes[1], (palette.selected.color, palette.selected.stroke_width));
    }

    #[test]
    fn test_fragment_handles_and_label() {
        let fragments = fragments();
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(100, 100);
        let model = AnnotationModel::with_fragments(&fragments[..1], &settings, &view);

        let mut list = DisplayList::new();
        OverlayRenderer::default()
            .render(&mut list, &model, &Highlights::default())
            .unwrap();

        let handles = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
            .count();
        assert_eq!(handles, 4);

        let label = list.commands().iter().find_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(label.as_deref(), Some("first-fr (0)"));
    }

    #[test]
    fn test_empty_model_draws_nothing() {
        let settings = DisplaySettings::default();
        let view = ViewTransformState::new(100, 100);
        let model = AnnotationModel::with_fragments(&[], &settings, &view);
        let mut list = DisplayList::new();
        OverlayRenderer::default()
            .render(&mut list, &model, &Highlights::default())
            .unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_selected_minutia_label_is_bold_and_colored() {
        let current = Fragment::new("f", Rect::new(0.0, 0.0, 100.0, 100.0), 0.0).with_minutiae(vec![
            Minutia::new("a", IntPoint::new(10, 10), 0.0, MinutiaKind::Ending),
            Minutia::new("b", IntPoint::new(50, 50), 0.0, MinutiaKind::Bifurcation),
        ]);
        let mut settings = DisplaySettings::default();
        settings.show_type = true;
        let view = ViewTransformState::new(100, 100);
        let model = AnnotationModel::editing(&current, &settings, &view);
        let highlights = Highlights {
            selected_minutia: Some("b"),
            ..Highlights::default()
        };

        let mut list = DisplayList::new();
        OverlayRenderer::default()
            .render(&mut list, &model, &highlights)
            .unwrap();

        let texts: Vec<(String, TextStyle)> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, style, .. } => Some((text.clone(), *style)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
            vec!["1", "END", "2", "BIF"]
        );
        assert!(!texts[0].1.bold);
        assert_eq!(texts[0].1.color, settings.text_color);
        assert!(texts[2].1.bold);
        assert_eq!(texts[3].1.color, settings.selected_color);
    }

    #[test]
    fn test_show_angle_draws_extra_line() {
        let current = Fragment::new("f", Rect::new(0.0, 0.0, 100.0, 100.0), 0.0).with_minutiae(vec![
            Minutia::new("a", IntPoint::new(10, 10), 30.0, MinutiaKind::Ending),
        ]);
        let mut settings = DisplaySettings::default();
        settings.show_index = false;
        let view = ViewTransformState::new(100, 100);

        let count_lines = |settings: &DisplaySettings| {
            let model = AnnotationModel::editing(&current, settings, &view);
            let mut list = DisplayList::new();
            OverlayRenderer::default()
                .render(&mut list, &model, &Highlights::default())
                .unwrap();
            list.commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::Line { .. }))
                .count()
        };

        assert_eq!(count_lines(&settings), 0);
        settings.show_angle = true;
        assert_eq!(count_lines(&settings), 1);
        settings.symbol = SymbolKind::CircleArrow;
        // Shaft and two ticks, no extra ray
        assert_eq!(count_lines(&settings), 3);
    }

    #[test]
    fn test_scaled_metrics() {
        let mut settings = DisplaySettings::default();
        settings.marker_diameter = 20.0;
        settings.font_size = 10.0;
        let m = MarkerMetrics::scaled(&settings, 4.0);
        assert_eq!(m.diameter, 80.0);
        assert_eq!(m.font_size, 40.0);
        assert_eq!(m.line_width, 5.0);
        assert_eq!(m.label_fill.a, 102);

        let small = MarkerMetrics::scaled(&settings, 0.5);
        assert_eq!(small.line_width, 1.0);
    }
}
