//! Minutia symbol geometry.
//!
//! Each [`SymbolKind`] maps to a pure function producing the primitives to
//! stroke. Adding a symbol means adding a variant and one function here.

use super::Primitive;
use crate::geometry::{Point, Rect, Size};
use crate::model::SymbolKind;
use crate::transform::direction_vector;

/// Geometry function for one symbol: `(center, diameter, angle_degrees)`.
pub type SymbolGeometry = fn(Point, f64, f64) -> Vec<Primitive>;

/// Look up the geometry function for a symbol kind.
pub fn symbol_geometry(kind: SymbolKind) -> SymbolGeometry {
    match kind {
        SymbolKind::Circle => circle,
        SymbolKind::CircleX => circle_x,
        SymbolKind::CircleArrow => circle_arrow,
        SymbolKind::CircleCross => circle_cross,
        SymbolKind::Triangle => triangle,
        SymbolKind::Square => square,
        SymbolKind::Diamond => diamond,
    }
}

/// All primitives for one marker, including the optional direction line.
///
/// The direction line is skipped for symbols that already show the angle.
pub fn symbol_primitives(
    kind: SymbolKind,
    center: Point,
    diameter: f64,
    angle_degrees: f64,
    show_angle: bool,
) -> Vec<Primitive> {
    let mut primitives = symbol_geometry(kind)(center, diameter, angle_degrees);
    if show_angle && !kind.encodes_angle() {
        primitives.push(ray(center, angle_degrees, 2.0 * diameter));
    }
    primitives
}

/// Bounding box of a marker, used to anchor labels.
pub fn marker_bounds(center: Point, diameter: f64) -> Rect {
    Rect::centered(center, Size::new(diameter, diameter))
}

fn ray(from: Point, angle_degrees: f64, length: f64) -> Primitive {
    let (dx, dy) = direction_vector(angle_degrees);
    Primitive::Line {
        from,
        to: from.offset(dx * length, dy * length),
    }
}

fn base_circle(center: Point, diameter: f64) -> Primitive {
    Primitive::Circle {
        center,
        radius: diameter / 2.0,
    }
}

fn circle(center: Point, diameter: f64, _angle: f64) -> Vec<Primitive> {
    vec![base_circle(center, diameter)]
}

fn circle_x(center: Point, diameter: f64, _angle: f64) -> Vec<Primitive> {
    let q = diameter / 4.0;
    vec![
        base_circle(center, diameter),
        Primitive::Line {
            from: center.offset(-q, -q),
            to: center.offset(q, q),
        },
        Primitive::Line {
            from: center.offset(-q, q),
            to: center.offset(q, -q),
        },
    ]
}

fn circle_arrow(center: Point, diameter: f64, angle: f64) -> Vec<Primitive> {
    let length = 0.75 * diameter;
    let tick = diameter / 5.0;
    let (dx, dy) = direction_vector(angle);
    let tip = center.offset(dx * length, dy * length);

    // Ticks leave the tip at ±135° from the shaft direction
    let tick_line = |turn_degrees: f64| {
        let (sin, cos) = turn_degrees.to_radians().sin_cos();
        let tx = dx * cos - dy * sin;
        let ty = dx * sin + dy * cos;
        Primitive::Line {
            from: tip,
            to: tip.offset(tx * tick, ty * tick),
        }
    };

    vec![
        base_circle(center, diameter),
        Primitive::Line {
            from: center,
            to: tip,
        },
        tick_line(135.0),
        tick_line(-135.0),
    ]
}

fn circle_cross(center: Point, diameter: f64, _angle: f64) -> Vec<Primitive> {
    let arm = diameter / 3.0;
    vec![
        base_circle(center, diameter),
        Primitive::Line {
            from: center.offset(-arm, 0.0),
            to: center.offset(arm, 0.0),
        },
        Primitive::Line {
            from: center.offset(0.0, -arm),
            to: center.offset(0.0, arm),
        },
    ]
}

fn triangle(center: Point, diameter: f64, _angle: f64) -> Vec<Primitive> {
    let half_height = 0.866 * diameter / 2.0;
    let half_side = diameter / 2.0;
    vec![Primitive::Polygon(vec![
        center.offset(0.0, -half_height),
        center.offset(half_side, half_height),
        center.offset(-half_side, half_height),
    ])]
}

fn square(center: Point, diameter: f64, _angle: f64) -> Vec<Primitive> {
    vec![Primitive::Polygon(
        marker_bounds(center, diameter).corners().to_vec(),
    )]
}

fn diamond(center: Point, diameter: f64, _angle: f64) -> Vec<Primitive> {
    let r = diameter / 2.0;
    vec![Primitive::Polygon(vec![
        center.offset(0.0, -r),
        center.offset(r, 0.0),
        center.offset(0.0, r),
        center.offset(-r, 0.0),
    ])]
}
