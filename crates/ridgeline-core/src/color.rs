//! RGBA color values used by display settings and draw styles.

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color. Alpha 255 is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 200, 0);
    pub const BLUE: Color = Color::rgb(0, 120, 255);
    pub const YELLOW: Color = Color::rgb(255, 220, 0);
    pub const ORANGE: Color = Color::rgb(255, 140, 0);
    pub const CYAN: Color = Color::rgb(0, 220, 220);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` notation for canvas front ends.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_keeps_channels() {
        assert_eq!(Color::WHITE.with_alpha(102), Color::rgba(255, 255, 255, 102));
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Color::rgba(1, 2, 3, 255).to_css(), "rgba(1, 2, 3, 1.000)");
    }
}
