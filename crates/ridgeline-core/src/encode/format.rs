use serde::{Deserialize, Serialize};

/// File format for an exported fragment image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Tiff,
    Bmp,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Png,
        ExportFormat::Jpeg,
        ExportFormat::Tiff,
        ExportFormat::Bmp,
    ];

    /// Preferred file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Tiff => "tif",
            ExportFormat::Bmp => "bmp",
        }
    }

    /// Parse a file extension, case-insensitively and with or without a dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "tif" | "tiff" => Some(ExportFormat::Tiff),
            "bmp" => Some(ExportFormat::Bmp),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Tiff => "image/tiff",
            ExportFormat::Bmp => "image/bmp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_round_trip() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn test_from_extension_variants() {
        assert_eq!(ExportFormat::from_extension(".JPEG"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension("Tiff"), Some(ExportFormat::Tiff));
        assert_eq!(ExportFormat::from_extension("gif"), None);
        assert_eq!(ExportFormat::from_extension(""), None);
    }
}
