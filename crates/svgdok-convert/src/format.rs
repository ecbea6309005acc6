//! Legacy vector image formats recognized for conversion
//!
//! The set of formats is fixed and keyed by file extension. No content
//! sniffing is performed: an asset named `image1.emf` is treated as EMF
//! whatever its bytes actually are.

use std::fmt;

/// A legacy vector image format embedded in Word documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorFormat {
    /// Enhanced Metafile (.emf)
    Emf,
    /// Windows Metafile (.wmf)
    Wmf,
}

impl VectorFormat {
    /// Map a file extension to a legacy format, if recognized
    ///
    /// Matching is ASCII case-insensitive, so `EMF` and `emf` are
    /// equivalent.
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("emf") {
            Some(Self::Emf)
        } else if ext.eq_ignore_ascii_case("wmf") {
            Some(Self::Wmf)
        } else {
            None
        }
    }

    /// The canonical (lowercase) extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Emf => "emf",
            Self::Wmf => "wmf",
        }
    }
}

impl fmt::Display for VectorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Extension of the modern format all legacy assets are converted to
pub const SVG_EXTENSION: &str = "svg";

/// MIME type of the modern vector format
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(VectorFormat::from_extension("emf"), Some(VectorFormat::Emf));
        assert_eq!(VectorFormat::from_extension("EMF"), Some(VectorFormat::Emf));
        assert_eq!(VectorFormat::from_extension("wmf"), Some(VectorFormat::Wmf));
        assert_eq!(VectorFormat::from_extension("Wmf"), Some(VectorFormat::Wmf));
        assert_eq!(VectorFormat::from_extension("png"), None);
        assert_eq!(VectorFormat::from_extension("svg"), None);
        assert_eq!(VectorFormat::from_extension(""), None);
    }

    #[test]
    fn test_extension_round_trip() {
        for fmt in [VectorFormat::Emf, VectorFormat::Wmf] {
            assert_eq!(VectorFormat::from_extension(fmt.extension()), Some(fmt));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(VectorFormat::Emf.to_string(), "emf");
        assert_eq!(VectorFormat::Wmf.to_string(), "wmf");
    }
}
