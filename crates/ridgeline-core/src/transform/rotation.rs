//! Point rotation about a pivot.
//!
//! Rotation uses the standard 2D matrix applied in the image's y-down
//! coordinate space:
//! ```text
//! x' = (x - px) * cos(θ) - (y - py) * sin(θ) + px
//! y' = (x - px) * sin(θ) + (y - py) * cos(θ) + py
//! ```
//! Because y grows downward, a positive angle turns a point clockwise as seen
//! on screen. Callers must pass rotation *deltas* (current minus capture
//! rotation) consistently in this convention.

use crate::geometry::Point;

/// Rotate `point` about `pivot` by `angle_degrees`.
///
/// Angles within 0.001° of zero (modulo 360) return the point unchanged so
/// that a zero delta is an exact no-op.
pub fn rotate_about(point: Point, pivot: Point, angle_degrees: f64) -> Point {
    if is_negligible_angle(angle_degrees) {
        return point;
    }

    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let dx = point.x - pivot.x;
    let dy = point.y - pivot.y;

    Point::new(dx * cos - dy * sin + pivot.x, dx * sin + dy * cos + pivot.y)
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle_degrees: f64) -> f64 {
    let a = angle_degrees % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Unit direction for a minutia angle.
///
/// Minutia angles are counter-clockwise from +x with the screen y axis
/// inverted, so the y component is negated.
pub fn direction_vector(angle_degrees: f64) -> (f64, f64) {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    (cos, -sin)
}

fn is_negligible_angle(angle_degrees: f64) -> bool {
    let normalized = normalize_degrees(angle_degrees);
    normalized < 0.001 || (360.0 - normalized) < 0.001
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: rotating by θ then -θ about the same pivot returns the point.
        #[test]
        fn prop_rotation_inverse(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            px in -500.0f64..500.0,
            py in -500.0f64..500.0,
            angle in -720.0f64..720.0,
        ) {
            let p = Point::new(x, y);
            let pivot = Point::new(px, py);
            let back = rotate_about(rotate_about(p, pivot, angle), pivot, -angle);
            prop_assert!((back.x - p.x).abs() < 1e-6);
            prop_assert!((back.y - p.y).abs() < 1e-6);
        }

        /// Property: rotation preserves distance to the pivot.
        #[test]
        fn prop_rotation_preserves_radius(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            angle in -360.0f64..360.0,
        ) {
            let pivot = Point::new(17.0, -9.0);
            let p = Point::new(x, y);
            let r = rotate_about(p, pivot, angle);
            prop_assert!((r.distance_to(pivot) - p.distance_to(pivot)).abs() < 1e-6);
        }
    }
}
