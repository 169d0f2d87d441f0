//! Surface that paints onto an RGB raster through tiny-skia.
//!
//! Used by export. The raster is copied into an opaque [`Pixmap`], drawn
//! with anti-aliased paths and copied back once drawing is done. Each call
//! fills or strokes a single path, so translucent colors blend once even
//! where parts of the path overlap. Everything outside the image is clipped
//! by the pixmap.

use super::{ShapeStyle, Stroke, Surface, TextStyle};
use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use crate::raster::RasterImage;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use tiny_skia::{FillRule, IntSize, Paint, Path, PathBuilder, Pixmap, Transform};

/// Draws onto a pixmap copy of a [`RasterImage`].
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Copy `image` into a pixmap, run `draw`, and copy the result back.
    ///
    /// Empty images are left untouched and `draw` is not called.
    pub fn draw_on(image: &mut RasterImage, draw: impl FnOnce(&mut RasterSurface)) {
        let Some(pixmap) = to_pixmap(image) else {
            log::trace!("Skipping drawing on empty {}x{} raster", image.width, image.height);
            return;
        };
        let mut surface = RasterSurface { pixmap };
        draw(&mut surface);

        // Alpha stays 255, so premultiplied RGB is the straight value
        for (dst, src) in image
            .pixels
            .chunks_exact_mut(3)
            .zip(surface.pixmap.data().chunks_exact(4))
        {
            dst.copy_from_slice(&src[..3]);
        }
    }

    /// Pixel size of one font bit for a text size.
    fn glyph_scale(size: f64) -> f64 {
        if size.is_finite() {
            (size / 8.0).max(1.0)
        } else {
            1.0
        }
    }

    fn fill(&mut self, path: &Path, color: Color, rule: FillRule) {
        if color.a == 0 {
            return;
        }
        self.pixmap
            .fill_path(path, &paint(color), rule, Transform::identity(), None);
    }

    fn stroke(&mut self, path: &Path, stroke: &Stroke) {
        if stroke.color.a == 0 {
            return;
        }
        let sk_stroke = tiny_skia::Stroke {
            width: stroke.width.max(1.0) as f32,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            path,
            &paint(stroke.color),
            &sk_stroke,
            Transform::identity(),
            None,
        );
    }
}

fn to_pixmap(image: &RasterImage) -> Option<Pixmap> {
    if image.is_empty() {
        return None;
    }
    let size = IntSize::from_wh(image.width, image.height)?;
    let mut data = Vec::with_capacity(image.pixels.len() / 3 * 4);
    for px in image.pixels.chunks_exact(3) {
        data.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    Pixmap::from_vec(data, size)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn sk_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

impl Surface for RasterSurface {
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            self.stroke(&path, stroke);
        }
    }

    fn draw_ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64, style: &ShapeStyle) {
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return;
        }
        let bounds = Rect::centered(center, Size::new(2.0 * radius_x, 2.0 * radius_y));
        let Some(path) = sk_rect(bounds).and_then(PathBuilder::from_oval) else {
            return;
        };
        if let Some(fill) = style.fill {
            self.fill(&path, fill, FillRule::Winding);
        }
        if let Some(stroke) = style.stroke {
            self.stroke(&path, &stroke);
        }
    }

    fn draw_polygon(&mut self, points: &[Point], style: &ShapeStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };

        if let Some(fill) = style.fill {
            self.fill(&path, fill, FillRule::EvenOdd);
        }
        if let Some(stroke) = style.stroke {
            self.stroke(&path, &stroke);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || color.a == 0 {
            return;
        }
        if let Some(rect) = sk_rect(rect) {
            self.pixmap
                .fill_rect(rect, &paint(color), Transform::identity(), None);
        }
    }

    fn draw_text(&mut self, origin: Point, text: &str, style: &TextStyle) {
        let scale = Self::glyph_scale(style.size);
        let mut weight = style.thickness.round().max(1.0);
        if style.bold {
            weight += 1.0;
        }

        // All lit glyph bits go into one path
        let mut pb = PathBuilder::new();
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
                continue;
            };
            let cell_x = origin.x + i as f64 * 8.0 * scale;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let bit = Rect::new(
                        cell_x + col as f64 * scale,
                        origin.y + row as f64 * scale,
                        scale + weight - 1.0,
                        scale,
                    );
                    if let Some(rect) = sk_rect(bit) {
                        pb.push_rect(rect);
                    }
                }
            }
        }
        if let Some(path) = pb.finish() {
            self.fill(&path, style.color, FillRule::Winding);
        }
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        let scale = Self::glyph_scale(style.size);
        let chars = text.chars().count() as f64;
        Size::new(chars * 8.0 * scale, 8.0 * scale)
    }
}
