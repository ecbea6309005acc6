//! # svgdok-convert
//!
//! External converter adapters for legacy vector image formats.
//!
//! This crate knows how to turn one EMF or WMF file into one SVG file by
//! shelling out to the corresponding command-line utility (`emf2svg-conv`
//! or `wmf2svg`). The conversion algorithms themselves are opaque; this
//! crate only supervises the invocation: argument shape, timeout, exit
//! status, and presence of the output file.
//!
//! ## Example
//!
//! ```no_run
//! use svgdok_convert::{ConverterRegistry, VectorFormat};
//!
//! let registry = ConverterRegistry::new();
//! let converter = registry.for_format(VectorFormat::Emf).unwrap();
//! converter.convert("in.emf".as_ref(), "out.svg".as_ref())?;
//! # Ok::<(), svgdok_convert::ConvertError>(())
//! ```

pub mod converter;
pub mod error;
pub mod format;
pub mod registry;

pub use converter::{Emf2Svg, VectorConverter, Wmf2Svg, DEFAULT_TIMEOUT};
pub use error::{ConvertError, Result};
pub use format::{VectorFormat, SVG_CONTENT_TYPE, SVG_EXTENSION};
pub use registry::ConverterRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
