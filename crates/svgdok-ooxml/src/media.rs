//! Media asset model
//!
//! One entry per file in the package's `word/media/` directory. Identity is
//! the file name; that exact name is what relationship manifests reference.
//! The format is judged by extension only, never by inspecting contents.

use svgdok_convert::{VectorFormat, SVG_EXTENSION};

/// A media file found in the package's media directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    /// File name within the media directory (e.g. "image1.emf")
    pub name: String,
    /// File extension, empty if the name has none
    pub extension: String,
}

impl MediaAsset {
    /// Create an asset entry from a file name
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let extension = std::path::Path::new(&name)
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, extension }
    }

    /// File name without the extension
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }

    /// The legacy vector format of this asset, if its extension is one
    pub fn legacy_format(&self) -> Option<VectorFormat> {
        VectorFormat::from_extension(&self.extension)
    }

    /// The name the SVG replacement for this asset will have
    ///
    /// Same stem, `svg` extension: `image1.emf` becomes `image1.svg`.
    pub fn replacement_name(&self) -> String {
        format!("{}.{}", self.stem(), SVG_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        let asset = MediaAsset::from_name("image1.emf");
        assert_eq!(asset.name, "image1.emf");
        assert_eq!(asset.extension, "emf");
        assert_eq!(asset.stem(), "image1");
    }

    #[test]
    fn test_no_extension() {
        let asset = MediaAsset::from_name("thumbnail");
        assert_eq!(asset.extension, "");
        assert_eq!(asset.stem(), "thumbnail");
        assert!(asset.legacy_format().is_none());
    }

    #[test]
    fn test_legacy_format() {
        assert_eq!(
            MediaAsset::from_name("fig.emf").legacy_format(),
            Some(VectorFormat::Emf)
        );
        assert_eq!(
            MediaAsset::from_name("fig.WMF").legacy_format(),
            Some(VectorFormat::Wmf)
        );
        assert_eq!(MediaAsset::from_name("fig.png").legacy_format(), None);
        assert_eq!(MediaAsset::from_name("fig.svg").legacy_format(), None);
    }

    #[test]
    fn test_replacement_name() {
        assert_eq!(
            MediaAsset::from_name("image1.emf").replacement_name(),
            "image1.svg"
        );
        assert_eq!(
            MediaAsset::from_name("chart.2.wmf").replacement_name(),
            "chart.2.svg"
        );
    }
}
