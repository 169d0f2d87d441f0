//! Fragment and minutia entities.
//!
//! These are owned by the document model; the overlay only borrows them.

use crate::geometry::{IntPoint, Rect};
use crate::raster::RasterImage;
use serde::{Deserialize, Serialize};

/// Ridge-feature class of a minutia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinutiaKind {
    /// Ridge ending.
    Ending,
    /// Ridge bifurcation.
    Bifurcation,
    /// Isolated dot.
    Dot,
    /// Short ridge island.
    Island,
    /// Enclosure / lake.
    Lake,
    /// Spur (hook).
    Spur,
    /// Crossover between two ridges.
    Crossover,
    #[default]
    Unknown,
}

impl MinutiaKind {
    /// Short label drawn next to the marker.
    pub fn abbreviation(self) -> &'static str {
        match self {
            MinutiaKind::Ending => "END",
            MinutiaKind::Bifurcation => "BIF",
            MinutiaKind::Dot => "DOT",
            MinutiaKind::Island => "ISL",
            MinutiaKind::Lake => "LAK",
            MinutiaKind::Spur => "SPR",
            MinutiaKind::Crossover => "CRS",
            MinutiaKind::Unknown => "UNK",
        }
    }
}

/// A point-like ridge feature inside a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minutia {
    /// Unique within the owning fragment.
    pub id: String,
    /// Position in the fragment's working-image space.
    pub position: IntPoint,
    /// Direction in degrees; 0 = +x, counter-clockwise, screen y inverted.
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub kind: MinutiaKind,
}

impl Minutia {
    pub fn new(id: impl Into<String>, position: IntPoint, angle: f64, kind: MinutiaKind) -> Self {
        Self {
            id: id.into(),
            position,
            angle,
            kind,
        }
    }
}

/// A rectangular region cropped from the base image.
///
/// `source_rect` and `source_rotation` are captured once and are read-only
/// afterwards; only the minutia list and working image change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    id: String,
    source_rect: Rect,
    source_rotation: f64,
    #[serde(skip)]
    working_image: RasterImage,
    #[serde(default)]
    minutiae: Vec<Minutia>,
}

impl Fragment {
    /// Capture a fragment from `source_rect` of the unrotated base image while
    /// the base image was rotated by `source_rotation` degrees.
    pub fn new(id: impl Into<String>, source_rect: Rect, source_rotation: f64) -> Self {
        Self {
            id: id.into(),
            source_rect,
            source_rotation,
            working_image: RasterImage::default(),
            minutiae: Vec::new(),
        }
    }

    pub fn with_working_image(mut self, image: RasterImage) -> Self {
        self.working_image = image;
        self
    }

    pub fn with_minutiae(mut self, minutiae: Vec<Minutia>) -> Self {
        self.minutiae = minutiae;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_rect(&self) -> Rect {
        self.source_rect
    }

    pub fn source_rotation(&self) -> f64 {
        self.source_rotation
    }

    pub fn working_image(&self) -> &RasterImage {
        &self.working_image
    }

    /// Minutiae in insertion order.
    pub fn minutiae(&self) -> &[Minutia] {
        &self.minutiae
    }

    /// Mutable minutia list for the committing collaborator.
    pub fn minutiae_mut(&mut self) -> &mut Vec<Minutia> {
        &mut self.minutiae
    }

    pub fn minutia(&self, id: &str) -> Option<&Minutia> {
        self.minutiae.iter().find(|m| m.id == id)
    }

    /// Rotation accumulated since capture.
    pub fn rotation_delta(&self, current_rotation: f64) -> f64 {
        current_rotation - self.source_rotation
    }

    /// Short display form of the id used in labels.
    pub fn id_prefix(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}
