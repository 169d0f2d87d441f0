use super::ExportError;
use crate::geometry::Point;
use crate::model::{DisplaySettings, Fragment};
use crate::raster::{fit_dimensions, height_for_width, resize, FilterType, RasterImage};
use crate::render::{draw_minutia_marker, MarkerMetrics, RasterSurface};

/// Renders fragments with their markers onto new rasters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExportRenderer {
    filter: FilterType,
}

impl ExportRenderer {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    /// Render `fragment` at `target_width`, keeping the working image's aspect
    /// ratio.
    ///
    /// Marker diameter, font size and stroke weight are the settings values
    /// multiplied by `target_width / working_width`. A fragment without a
    /// working image renders to an empty raster.
    pub fn render(
        &self,
        fragment: &Fragment,
        settings: &DisplaySettings,
        target_width: u32,
    ) -> Result<RasterImage, ExportError> {
        if target_width == 0 {
            log::warn!("Rejecting export of {} at zero width", fragment.id());
            return Err(ExportError::ZeroSize("target width"));
        }
        let Some(working) = working_image(fragment) else {
            return Ok(RasterImage::default());
        };

        let scale = target_width as f64 / working.width as f64;
        let target_height = height_for_width(working.width, working.height, target_width);
        log::debug!(
            "Exporting {} from {}x{} to {}x{} (scale {:.3})",
            fragment.id(),
            working.width,
            working.height,
            target_width,
            target_height,
            scale
        );

        let mut output = resize(working, target_width, target_height, self.filter)?;
        draw_markers(&mut output, fragment, settings, scale, Point::ORIGIN);
        Ok(output)
    }

    /// Render a preview that fits inside `max_edge` on both sides.
    ///
    /// Small working images are not enlarged.
    pub fn render_preview(
        &self,
        fragment: &Fragment,
        settings: &DisplaySettings,
        max_edge: u32,
    ) -> Result<RasterImage, ExportError> {
        if max_edge == 0 {
            log::warn!("Rejecting preview of {} with zero max edge", fragment.id());
            return Err(ExportError::ZeroSize("max edge"));
        }
        let Some(working) = working_image(fragment) else {
            return Ok(RasterImage::default());
        };
        let (width, _) = fit_dimensions(working.width, working.height, max_edge);
        self.render(fragment, settings, width)
    }
}

/// The fragment's working image, or `None` when there is nothing to draw.
pub(super) fn working_image(fragment: &Fragment) -> Option<&RasterImage> {
    let working = fragment.working_image();
    if working.is_empty() {
        log::debug!("Nothing to export for {}: empty working image", fragment.id());
        return None;
    }
    Some(working)
}

/// Draw every minutia of `fragment` onto `output`, positions scaled by
/// `scale` and shifted by `origin`.
pub(super) fn draw_markers(
    output: &mut RasterImage,
    fragment: &Fragment,
    settings: &DisplaySettings,
    scale: f64,
    origin: Point,
) {
    let settings = settings.sanitized();
    let metrics = MarkerMetrics::scaled(&settings, scale);
    RasterSurface::draw_on(output, |surface| {
        for (index, minutia) in fragment.minutiae().iter().enumerate() {
            let p = minutia.position.to_point();
            let center = origin.offset(p.x * scale, p.y * scale);
            draw_minutia_marker(surface, center, minutia, index, &settings, &metrics, false);
        }
    });
}
