//! Label placement around a marker.
//!
//! Labels for one marker are stacked top to bottom into a block. The block is
//! placed against the marker's bounding box on the configured side.

use crate::geometry::{Point, Rect, Size};
use crate::model::LabelPosition;

/// Spacing used when laying out a label block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    /// Padding between text and its background edge.
    pub padding: f64,
    /// Gap between the marker box and the label block, and between labels.
    pub gap: f64,
}

/// One positioned label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBox {
    pub text: String,
    /// Background rectangle including padding.
    pub background: Rect,
    /// Top-left corner of the text itself.
    pub text_origin: Point,
}

/// Place `texts` next to `marker` on the `position` side.
///
/// `measure` returns the rendered size of a text without padding.
pub fn layout_labels(
    marker: Rect,
    texts: &[String],
    position: LabelPosition,
    layout: LabelLayout,
    measure: impl Fn(&str) -> Size,
) -> Vec<LabelBox> {
    if texts.is_empty() {
        return Vec::new();
    }

    let sizes: Vec<Size> = texts
        .iter()
        .map(|t| {
            let s = measure(t);
            Size::new(s.width + 2.0 * layout.padding, s.height + 2.0 * layout.padding)
        })
        .collect();

    let block_width = sizes.iter().fold(0.0f64, |acc, s| acc.max(s.width));
    let block_height =
        sizes.iter().map(|s| s.height).sum::<f64>() + layout.gap * (sizes.len() - 1) as f64;

    let center = marker.center();
    let (block_x, block_y) = match position {
        LabelPosition::Right => (marker.right() + layout.gap, center.y - block_height / 2.0),
        LabelPosition::Left => (
            marker.left() - layout.gap - block_width,
            center.y - block_height / 2.0,
        ),
        LabelPosition::Above => (
            center.x - block_width / 2.0,
            marker.top() - layout.gap - block_height,
        ),
        LabelPosition::Below => (center.x - block_width / 2.0, marker.bottom() + layout.gap),
    };

    let mut y = block_y;
    texts
        .iter()
        .zip(sizes)
        .map(|(text, size)| {
            let x = match position {
                LabelPosition::Right => block_x,
                LabelPosition::Left => block_x + block_width - size.width,
                LabelPosition::Above | LabelPosition::Below => {
                    block_x + (block_width - size.width) / 2.0
                }
            };
            let background = Rect::new(x, y, size.width, size.height);
            y += size.height + layout.gap;
            LabelBox {
                text: text.clone(),
                background,
                text_origin: Point::new(x + layout.padding, background.y + layout.padding),
            }
        })
        .collect()
}
