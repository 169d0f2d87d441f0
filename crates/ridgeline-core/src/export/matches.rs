//! Side-by-side export of two fragments with correspondence lines.

use super::renderer::{draw_markers, working_image};
use super::{ExportError, ExportRenderer};
use crate::geometry::Point;
use crate::model::{DisplaySettings, Fragment};
use crate::raster::{resize, RasterImage};
use crate::render::{draw_correspondences, MatchLayout, RasterSurface, Stroke};
use image::{Rgb, RgbImage};

/// Horizontal gap in pixels between the two images.
pub const MATCH_GAP: u32 = 16;

/// A rendered comparison and the number of correspondence lines drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchExport {
    pub image: RasterImage,
    pub lines_drawn: usize,
}

impl ExportRenderer {
    /// Render `left` and `right` next to each other at `target_height`.
    ///
    /// Both working images share one scale, chosen so the taller one fills
    /// `target_height`; the shorter one is top-aligned on `background`.
    /// Pairs index into each fragment's minutia list; out-of-range pairs are
    /// skipped. When either fragment has no working image nothing is drawn
    /// and the result is an empty raster.
    #[allow(clippy::too_many_arguments)]
    pub fn render_matches(
        &self,
        left: &Fragment,
        right: &Fragment,
        pairs: &[(usize, usize)],
        settings: &DisplaySettings,
        line: &Stroke,
        background: [u8; 3],
        target_height: u32,
    ) -> Result<MatchExport, ExportError> {
        if target_height == 0 {
            log::warn!("Rejecting match export at zero height");
            return Err(ExportError::ZeroSize("target height"));
        }
        let (Some(left_image), Some(right_image)) = (working_image(left), working_image(right))
        else {
            return Ok(MatchExport::default());
        };

        let scale = target_height as f64 / left_image.height.max(right_image.height) as f64;
        let scaled = |image: &RasterImage| {
            let w = ((image.width as f64 * scale).round() as u32).max(1);
            let h = ((image.height as f64 * scale).round() as u32).max(1);
            resize(image, w, h, self.filter())
        };
        let left_scaled = scaled(left_image)?;
        let right_scaled = scaled(right_image)?;

        let right_x = left_scaled.width + MATCH_GAP;
        let width = right_x + right_scaled.width;
        log::debug!(
            "Exporting matches {} / {} at {}x{} (scale {:.3})",
            left.id(),
            right.id(),
            width,
            target_height,
            scale
        );

        let mut canvas = RgbImage::from_pixel(width, target_height, Rgb(background));
        for (part, x) in [(left_scaled, 0), (right_scaled, right_x)] {
            if let Some(rgb) = part.into_rgb_image() {
                image::imageops::replace(&mut canvas, &rgb, x as i64, 0);
            }
        }
        let mut output = RasterImage::from_rgb_image(canvas);

        let right_origin = Point::new(right_x as f64, 0.0);
        draw_markers(&mut output, left, settings, scale, Point::ORIGIN);
        draw_markers(&mut output, right, settings, scale, right_origin);

        let layout = MatchLayout {
            left_origin: Point::ORIGIN,
            right_origin,
            scale,
        };
        let mut lines_drawn = 0;
        RasterSurface::draw_on(&mut output, |surface| {
            lines_drawn = draw_correspondences(surface, left, right, pairs, &layout, line);
        });

        Ok(MatchExport {
            image: output,
            lines_drawn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::{IntPoint, Rect};
    use crate::model::{Minutia, MinutiaKind};

    fn fragment(id: &str, width: u32, height: u32, points: &[(i32, i32)]) -> Fragment {
        Fragment::new(id, Rect::new(0.0, 0.0, width as f64, height as f64), 0.0)
            .with_working_image(RasterImage::filled(width, height, [0, 0, 0]))
            .with_minutiae(
                points
                    .iter()
                    .enumerate()
                    .map(|(i, (x, y))| {
                        Minutia::new(format!("{i}"), IntPoint::new(*x, *y), 0.0, MinutiaKind::Ending)
                    })
                    .collect(),
            )
    }

    #[test]
    fn test_side_by_side_layout() {
        let left = fragment("l", 100, 50, &[(10, 10)]);
        let right = fragment("r", 50, 100, &[(20, 20), (30, 30)]);
        let settings = DisplaySettings {
            show_index: false,
            ..DisplaySettings::default()
        };
        let result = ExportRenderer::default()
            .render_matches(
                &left,
                &right,
                &[(0, 1), (0, 5)],
                &settings,
                &Stroke::new(Color::GREEN, 1.0),
                [255, 255, 255],
                200,
            )
            .unwrap();

        // Scale 2: left 200x100, right 100x200
        assert_eq!(result.image.width, 200 + MATCH_GAP + 100);
        assert_eq!(result.image.height, 200);
        assert_eq!(result.lines_drawn, 1);
        // Area below the shorter left image keeps the background
        assert_eq!(result.image.pixel(5, 190), Some([255, 255, 255]));
        // Gap column keeps the background
        assert_eq!(result.image.pixel(200 + MATCH_GAP / 2, 5), Some([255, 255, 255]));
    }

    #[test]
    fn test_empty_fragment_draws_nothing() {
        let left = fragment("l", 10, 10, &[]);
        let right = Fragment::new("r", Rect::new(0.0, 0.0, 10.0, 10.0), 0.0);
        let result = ExportRenderer::default().render_matches(
            &left,
            &right,
            &[],
            &DisplaySettings::default(),
            &Stroke::new(Color::GREEN, 1.0),
            [0, 0, 0],
            100,
        );
        assert_eq!(result, Ok(MatchExport::default()));
    }
}
