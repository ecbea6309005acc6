//! Error types for OOXML package operations

use thiserror::Error;

/// Errors that can occur while rewriting a package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required package part not found
    #[error("Required package part not found: {0}")]
    MissingPart(String),

    /// Invalid package structure
    #[error("Invalid package structure: {0}")]
    InvalidStructure(String),

    /// External image conversion failed
    #[error("Conversion error: {0}")]
    Convert(#[from] svgdok_convert::ConvertError),
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
