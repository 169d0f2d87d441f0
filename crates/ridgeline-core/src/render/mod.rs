//! Overlay rendering.
//!
//! Everything here draws through the [`Surface`] trait so the same code paints
//! the interactive overlay (recorded into a [`DisplayList`] for the front end)
//! and the exported raster ([`RasterSurface`]).
//!
//! Styles are plain values passed into every call; surfaces keep no pen or
//! brush state between calls.
//!
//! # Module Structure
//!
//! - `symbol` - Minutia symbol geometry, one pure function per symbol kind
//! - `label` - Label box layout around a marker
//! - `overlay` - Fragment and minutia painting for the interactive view
//! - `matches` - Correspondence lines between two fragments
//! - `display_list` - Recording surface for canvas front ends
//! - `raster` - Surface painting onto an RGB raster through tiny-skia

mod display_list;
mod label;
mod matches;
mod overlay;
mod raster;
mod symbol;

pub use display_list::{DisplayList, DrawCommand};
pub use label::{layout_labels, LabelBox, LabelLayout};
pub use matches::{draw_correspondences, MatchLayout};
pub use overlay::{
    draw_minutia_marker, FragmentStateStyle, Highlights, MarkerMetrics, OverlayPalette,
    OverlayRenderer,
};
pub use raster::RasterSurface;
pub use symbol::{marker_bounds, symbol_geometry, symbol_primitives, SymbolGeometry};

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Outline style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Outline and/or fill for closed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
}

impl ShapeStyle {
    pub fn stroked(stroke: Stroke) -> Self {
        Self {
            stroke: Some(stroke),
            fill: None,
        }
    }

    pub fn filled(fill: Color) -> Self {
        Self {
            stroke: None,
            fill: Some(fill),
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Text appearance. `size` is the cell height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
    pub bold: bool,
    /// Glyph stroke weight in pixels for raster backends.
    pub thickness: f64,
}

impl TextStyle {
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color,
            size,
            bold: false,
            thickness: 1.0,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }
}

/// Drawing capabilities the overlay needs from a rendering backend.
pub trait Surface {
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    fn draw_ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64, style: &ShapeStyle);

    /// Closed polygon through `points`.
    fn draw_polygon(&mut self, points: &[Point], style: &ShapeStyle);

    /// Fill a rectangle, blending by the color's alpha.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, style: &TextStyle);

    fn measure_text(&self, text: &str, style: &TextStyle) -> Size;
}

/// Geometry produced by symbol functions, drawn with one stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line { from: Point, to: Point },
    Circle { center: Point, radius: f64 },
    Polygon(Vec<Point>),
}

impl Primitive {
    /// Outline this primitive on `surface`.
    pub fn draw(&self, surface: &mut dyn Surface, stroke: &Stroke) {
        match self {
            Primitive::Line { from, to } => surface.draw_line(*from, *to, stroke),
            Primitive::Circle { center, radius } => {
                surface.draw_ellipse(*center, *radius, *radius, &ShapeStyle::stroked(*stroke))
            }
            Primitive::Polygon(points) => {
                surface.draw_polygon(points, &ShapeStyle::stroked(*stroke))
            }
        }
    }
}
