//! svgdok CLI - Command-line interface library
//!
//! Rewrites DOCX packages so embedded EMF/WMF images become SVG, keeping
//! the relationship manifest and content-type registry consistent.
//!
//! # Binary Usage
//!
//! ```bash
//! # Replace legacy vector images, writing a new package
//! svgdok report.docx --output report-svg.docx
//!
//! # Machine-readable report
//! svgdok report.docx --output report-svg.docx --format json
//! ```
//!
//! The external converters `emf2svg-conv` and `wmf2svg` must be on PATH
//! for the formats actually present in the input.

pub mod app;

// Re-export main entry point and types
pub use app::{convert_command, run_cli, OutputFormat};
