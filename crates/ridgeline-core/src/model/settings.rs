//! Display configuration for minutia markers and labels.
//!
//! Settings arrive as partial JSON from the settings store, so every field
//! carries a serde default.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Marker symbol drawn for each minutia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    #[default]
    Circle,
    CircleX,
    CircleArrow,
    CircleCross,
    Triangle,
    Square,
    Diamond,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 7] = [
        SymbolKind::Circle,
        SymbolKind::CircleX,
        SymbolKind::CircleArrow,
        SymbolKind::CircleCross,
        SymbolKind::Triangle,
        SymbolKind::Square,
        SymbolKind::Diamond,
    ];

    /// Whether the symbol itself already shows the minutia direction.
    pub fn encodes_angle(self) -> bool {
        matches!(self, SymbolKind::CircleArrow)
    }
}

/// Side of the marker where labels are anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPosition {
    Left,
    #[default]
    Right,
    Above,
    Below,
}

/// Marker and label appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub symbol: SymbolKind,
    /// Marker diameter in pixels.
    pub marker_diameter: f64,
    /// Label font size in points.
    pub font_size: f64,
    pub marker_color: Color,
    pub text_color: Color,
    /// Marker and label color for the selected minutia.
    pub selected_color: Color,
    pub label_background: Color,
    /// Label background opacity (0-255).
    pub label_background_opacity: u8,
    pub label_position: LabelPosition,
    pub show_index: bool,
    pub show_type: bool,
    pub show_angle: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            symbol: SymbolKind::Circle,
            marker_diameter: 12.0,
            font_size: 10.0,
            marker_color: Color::RED,
            text_color: Color::WHITE,
            selected_color: Color::YELLOW,
            label_background: Color::BLACK,
            label_background_opacity: 160,
            label_position: LabelPosition::Right,
            show_index: true,
            show_type: false,
            show_angle: false,
        }
    }
}

impl DisplaySettings {
    pub const MIN_MARKER_DIAMETER: f64 = 1.0;
    pub const MIN_FONT_SIZE: f64 = 1.0;

    /// Copy with sizes clamped to usable values.
    ///
    /// Non-finite sizes fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let clamp = |value: f64, min: f64, fallback: f64| {
            if value.is_finite() {
                value.max(min)
            } else {
                fallback
            }
        };
        Self {
            marker_diameter: clamp(
                self.marker_diameter,
                Self::MIN_MARKER_DIAMETER,
                defaults.marker_diameter,
            ),
            font_size: clamp(self.font_size, Self::MIN_FONT_SIZE, defaults.font_size),
            ..self.clone()
        }
    }

    /// Label background with the configured opacity applied.
    pub fn label_background_fill(&self) -> Color {
        self.label_background.with_alpha(self.label_background_opacity)
    }

    /// Whether any minutia label is shown.
    pub fn has_labels(&self) -> bool {
        self.show_index || self.show_type
    }
}
