//! Correspondence lines between two fragments shown side by side.

use super::{Stroke, Surface};
use crate::geometry::Point;
use crate::model::Fragment;

/// Placement of two fragment images in a shared view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchLayout {
    /// View position of the left image's top-left corner.
    pub left_origin: Point,
    /// View position of the right image's top-left corner.
    pub right_origin: Point,
    /// Working-image pixels to view pixels.
    pub scale: f64,
}

impl MatchLayout {
    fn place(origin: Point, position: Point, scale: f64) -> Point {
        origin.offset(position.x * scale, position.y * scale)
    }
}

/// Draw one line per `(left_index, right_index)` pair.
///
/// Pairs that index past either minutia list are skipped. Returns the number
/// of lines drawn.
pub fn draw_correspondences(
    surface: &mut dyn Surface,
    left: &Fragment,
    right: &Fragment,
    pairs: &[(usize, usize)],
    layout: &MatchLayout,
    stroke: &Stroke,
) -> usize {
    let mut drawn = 0;
    for &(li, ri) in pairs {
        let (Some(a), Some(b)) = (left.minutiae().get(li), right.minutiae().get(ri)) else {
            log::trace!(
                "Skipping correspondence ({}, {}): {} has {} minutiae, {} has {}",
                li,
                ri,
                left.id(),
                left.minutiae().len(),
                right.id(),
                right.minutiae().len()
            );
            continue;
        };
        let from = MatchLayout::place(layout.left_origin, a.position.to_point(), layout.scale);
        let to = MatchLayout::place(layout.right_origin, b.position.to_point(), layout.scale);
        surface.draw_line(from, to, stroke);
        drawn += 1;
    }
    drawn
}
