//! Recording surface.
//!
//! Canvas front ends cannot be called from the core, so the interactive
//! overlay is recorded as a list of commands and replayed by the host.

use super::{ShapeStyle, Stroke, Surface, TextStyle};
use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Default horizontal advance per character, as a fraction of the font size.
pub const DEFAULT_CHAR_ADVANCE: f64 = 0.6;
/// Line height as a fraction of the font size.
const LINE_HEIGHT: f64 = 1.2;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
        style: ShapeStyle,
    },
    Polygon {
        points: Vec<Point>,
        style: ShapeStyle,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        origin: Point,
        text: String,
        style: TextStyle,
    },
}

/// A [`Surface`] that records commands instead of drawing.
///
/// Text is measured with a fixed per-character advance so label layout is
/// deterministic without access to the host's fonts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    #[serde(skip, default = "default_char_advance")]
    char_advance: f64,
}

fn default_char_advance() -> f64 {
    DEFAULT_CHAR_ADVANCE
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            char_advance: DEFAULT_CHAR_ADVANCE,
        }
    }

    /// Use a different character advance for text measurement.
    pub fn with_char_advance(mut self, char_advance: f64) -> Self {
        if char_advance.is_finite() && char_advance > 0.0 {
            self.char_advance = char_advance;
        }
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DisplayList {
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn draw_ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64, style: &ShapeStyle) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            style: *style,
        });
    }

    fn draw_polygon(&mut self, points: &[Point], style: &ShapeStyle) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, origin: Point, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_string(),
            style: *style,
        });
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        let chars = text.chars().count() as f64;
        Size::new(
            chars * style.size * self.char_advance,
            style.size * LINE_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut list = DisplayList::new();
        let stroke = Stroke::new(Color::RED, 2.0);
        list.draw_line(Point::ORIGIN, Point::new(1.0, 1.0), &stroke);
        list.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::BLACK);
        list.draw_text(Point::ORIGIN, "12", &TextStyle::new(Color::WHITE, 10.0));

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::Line { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::FillRect { .. }));
        assert!(matches!(list.commands()[2], DrawCommand::Text { .. }));

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_skips_degenerate_calls() {
        let mut list = DisplayList::new();
        list.draw_polygon(&[Point::ORIGIN], &ShapeStyle::default());
        list.draw_text(Point::ORIGIN, "", &TextStyle::new(Color::WHITE, 10.0));
        assert!(list.is_empty());
    }

    #[test]
    fn test_measure_text() {
        let list = DisplayList::new();
        let size = list.measure_text("BIF", &TextStyle::new(Color::WHITE, 10.0));
        assert!((size.width - 18.0).abs() < 1e-9);
        assert!((size.height - 12.0).abs() < 1e-9);

        let wide = DisplayList::new().with_char_advance(1.0);
        assert_eq!(wide.measure_text("ab", &TextStyle::new(Color::WHITE, 8.0)).width, 16.0);

        let ignored = DisplayList::new().with_char_advance(-1.0);
        assert!((ignored.measure_text("ab", &TextStyle::new(Color::WHITE, 10.0)).width - 12.0).abs() < 1e-9);
    }
}
