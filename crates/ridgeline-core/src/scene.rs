//! View-space shapes computed from a model snapshot.
//!
//! An [`OverlayScene`] is rebuilt on every paint or pointer event. The renderer
//! paints it and the hit tester queries it, so both always agree on where
//! things are.

use crate::geometry::{polygon_centroid, Point};
use crate::model::{AnnotationModel, Fragment, Minutia};
use crate::transform::TransformError;

/// A fragment's source rectangle mapped into view space.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentShape<'a> {
    pub fragment: &'a Fragment,
    /// Corners in order: top-left, top-right, bottom-right, bottom-left of the
    /// source rectangle (rotated with the base image).
    pub quad: [Point; 4],
}

impl FragmentShape<'_> {
    /// Label anchor.
    pub fn centroid(&self) -> Point {
        // Four vertices, never empty
        polygon_centroid(&self.quad).unwrap_or(self.quad[0])
    }
}

/// A minutia's marker center in view space.
#[derive(Debug, Clone, PartialEq)]
pub struct MinutiaMarker<'a> {
    pub minutia: &'a Minutia,
    /// Position in the owning fragment's minutia list.
    pub index: usize,
    pub center: Point,
}

/// All view-space shapes for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayScene<'a> {
    /// Fragment quads in insertion order.
    pub fragments: Vec<FragmentShape<'a>>,
    /// Current fragment's markers in list order.
    pub markers: Vec<MinutiaMarker<'a>>,
}

impl<'a> OverlayScene<'a> {
    /// Transform every entity in the snapshot into view space.
    pub fn build(model: &AnnotationModel<'a>) -> Result<Self, TransformError> {
        let view = model.view();

        let fragments = model
            .fragments()
            .iter()
            .map(|fragment| {
                let transform = view.fragment_transform(fragment)?;
                let quad = fragment
                    .source_rect()
                    .corners()
                    .map(|c| transform.image_to_view(c));
                Ok(FragmentShape { fragment, quad })
            })
            .collect::<Result<Vec<_>, TransformError>>()?;

        let markers = match model.current() {
            Some(current) => {
                // Minutiae live in the working image, which only zooms and pans
                let transform = view.scale_transform()?;
                current
                    .minutiae()
                    .iter()
                    .enumerate()
                    .map(|(index, minutia)| MinutiaMarker {
                        minutia,
                        index,
                        center: transform.image_to_view(minutia.position.to_point()),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(Self { fragments, markers })
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty() && self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{IntPoint, Rect};
    use crate::model::{DisplaySettings, MinutiaKind, ViewTransformState};

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "expected {:?}, got {:?}",
            b,
            a
        );
    }

    #[test]
    fn test_zero_rotation_delta_keeps_rectangle() {
        let fragments = vec![Fragment::new("f", Rect::new(10.0, 20.0, 100.0, 50.0), 45.0)];
        let settings = DisplaySettings::default();
        let mut view = ViewTransformState::new(400, 300).with_zoom(2.0);
        view.rotation = 45.0;
        view.scroll_offset = Point::new(5.0, 5.0);

        let model = AnnotationModel::with_fragments(&fragments, &settings, &view);
        let scene = OverlayScene::build(&model).unwrap();
        let quad = scene.fragments[0].quad;

        assert_close(quad[0], Point::new(15.0, 35.0));
        assert_close(quad[1], Point::new(215.0, 35.0));
        assert_close(quad[2], Point::new(215.0, 135.0));
        assert_close(quad[3], Point::new(15.0, 135.0));
    }

    #[test]
    fn test_rotation_since_capture_moves_quad() {
        let fragments = vec![Fragment::new("f", Rect::new(0.0, 0.0, 100.0, 50.0), 0.0)];
        let settings = DisplaySettings::default();
        let mut view = ViewTransformState::new(100, 50);
        view.rotation = 90.0;

        let model = AnnotationModel::with_fragments(&fragments, &settings, &view);
        let scene = OverlayScene::build(&model).unwrap();
        let quad = scene.fragments[0].quad;
        assert_close(quad[0], Point::new(75.0, -25.0));
        assert_close(scene.fragments[0].centroid(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_markers_ignore_rotation() {
        let current = Fragment::new("f", Rect::new(0.0, 0.0, 100.0, 100.0), 0.0).with_minutiae(vec![
            Minutia::new("a", IntPoint::new(5, 5), 0.0, MinutiaKind::Ending),
            Minutia::new("b", IntPoint::new(10, 0), 0.0, MinutiaKind::Dot),
        ]);
        let settings = DisplaySettings::default();
        let mut view = ViewTransformState::new(100, 100).with_zoom(2.0);
        view.rotation = 33.0;
        view.centering_offset = Point::new(10.0, 10.0);

        let model = AnnotationModel::editing(&current, &settings, &view);
        let scene = OverlayScene::build(&model).unwrap();
        assert!(scene.fragments.is_empty());
        assert_eq!(scene.markers.len(), 2);
        assert_close(scene.markers[0].center, Point::new(20.0, 20.0));
        assert_eq!(scene.markers[1].index, 1);
    }

    #[test]
    fn test_empty_model_builds_empty_scene() {
        let settings = DisplaySettings::default();
        let view = ViewTransformState::default();
        let model = AnnotationModel::with_fragments(&[], &settings, &view);
        assert!(OverlayScene::build(&model).unwrap().is_empty());
    }
}
