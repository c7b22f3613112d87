// ============================================================
// IMAGE ASSET
// ============================================================

use std::fmt;
use std::path::{Path, PathBuf};

/// Image formats the compression provider accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Resolve a format from a file extension, ignoring case and a leading dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
            ImageFormat::WebP => write!(f, "WebP"),
        }
    }
}

/// A local image file considered for optimization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub size: u64,
    pub format: ImageFormat,
}

impl ImageAsset {
    pub fn new(path: PathBuf, size: u64, format: ImageFormat) -> Self {
        Self { path, size, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension(".jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("webp"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_extension("gif"), None);
        assert_eq!(ImageFormat::from_extension("ini"), None);
    }

    #[test]
    fn test_file_name() {
        let asset = ImageAsset::new(
            PathBuf::from("project_tiles/bezier.png"),
            2048,
            ImageFormat::Png,
        );
        assert_eq!(asset.file_name(), "bezier.png");
        assert_eq!(asset.size_kb(), 2.0);
    }
}
