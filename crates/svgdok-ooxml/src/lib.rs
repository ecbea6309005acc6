//! # svgdok-ooxml
//!
//! OOXML package rewriting for svgdok.
//!
//! This crate provides the package-consistency side of the rewrite:
//! - Unpack a DOCX into a scoped working directory and repack it
//! - Scan and model media assets
//! - Retarget relationship manifests when media files are renamed
//! - Register content types for the converted format
//! - Orchestrate the whole pipeline
//!
//! ## Example
//!
//! ```no_run
//! use svgdok_convert::ConverterRegistry;
//! use svgdok_ooxml::replace_vector_images;
//!
//! let registry = ConverterRegistry::new();
//! let report = replace_vector_images("in.docx", "out.docx", &registry)?;
//! for r in &report.replacements {
//!     println!("{} -> {}", r.from, r.to);
//! }
//! # Ok::<(), svgdok_ooxml::OoxmlError>(())
//! ```

pub mod content_types;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod relationships;
pub mod workdir;

pub use content_types::{ContentTypes, Declaration};
pub use error::{OoxmlError, Result};
pub use media::MediaAsset;
pub use pipeline::{replace_vector_images, ReplaceReport, Replacement};
pub use relationships::{Relationships, RelationshipTarget};
pub use workdir::{Workdir, CONTENT_TYPES, DOCUMENT_RELS, MEDIA_DIR};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
