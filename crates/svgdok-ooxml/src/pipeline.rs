//! The package rewrite pipeline
//!
//! Strictly sequential, single pass, no retries:
//!
//! 1. Unpack the input archive into a scoped working directory
//! 2. Validate that the parts the rewrite touches are present
//! 3. Scan the media directory for legacy vector assets
//! 4. Convert each legacy asset to SVG via its external converter,
//!    deleting the source only after the conversion verifiably succeeded
//! 5. Retarget the relationship manifest (structural, attribute-scoped)
//! 6. Register the SVG content type (idempotent, only if anything was
//!    converted)
//! 7. Repack the full tree into the output archive
//!
//! Any error aborts the remaining stages; the working directory is
//! removed on every exit path by [`Workdir`]'s drop.

use std::fs;
use std::path::Path;

use serde::Serialize;

use svgdok_convert::{ConvertError, ConverterRegistry, VectorFormat, SVG_CONTENT_TYPE, SVG_EXTENSION};

use crate::content_types::ContentTypes;
use crate::error::Result;
use crate::relationships::Relationships;
use crate::workdir::Workdir;

/// One legacy asset replaced by an SVG
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Replacement {
    /// Original media file name (e.g. "image1.emf")
    pub from: String,
    /// Replacement file name (e.g. "image1.svg")
    pub to: String,
}

/// Summary of one pipeline invocation
#[derive(Debug, Default, Serialize)]
pub struct ReplaceReport {
    /// Every substitution performed, in media-directory order
    pub replacements: Vec<Replacement>,
}

impl ReplaceReport {
    /// Number of images replaced
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Check if no images were replaced
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

/// Rewrite a DOCX package, replacing EMF/WMF media with SVG
///
/// Reads the package at `input`, converts every legacy vector asset with
/// the converters in `registry`, updates the relationship manifest and
/// content-type registry accordingly, and writes a new package to
/// `output`. The input is never mutated. On error no guarantee is made
/// about `output` (an aborted repack may leave a partial archive the
/// caller must treat as invalid), but the working directory is always
/// cleaned up.
pub fn replace_vector_images<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    registry: &ConverterRegistry,
) -> Result<ReplaceReport> {
    let input = input.as_ref();
    let output = output.as_ref();

    let workdir = Workdir::unpack(input)?;
    workdir.validate()?;

    let assets = workdir.media_assets()?;

    // Fail fast on a missing tool before any asset is half-processed.
    let mut formats: Vec<VectorFormat> = assets.iter().filter_map(|a| a.legacy_format()).collect();
    formats.sort_by_key(|f| f.extension());
    formats.dedup();
    for format in &formats {
        let converter = registry
            .for_format(*format)
            .ok_or_else(|| ConvertError::Unavailable {
                tool: format!("{format} converter"),
            })?;
        if !converter.is_available() {
            return Err(ConvertError::Unavailable {
                tool: converter.name().to_string(),
            }
            .into());
        }
    }

    let media_dir = workdir.media_dir();
    let mut report = ReplaceReport::default();

    for asset in &assets {
        let Some(format) = asset.legacy_format() else {
            continue;
        };
        // Presence was checked above; lookup cannot fail here.
        let converter = registry
            .for_format(format)
            .ok_or_else(|| ConvertError::Unavailable {
                tool: format!("{format} converter"),
            })?;

        let source = media_dir.join(&asset.name);
        let replacement = asset.replacement_name();
        let dest = media_dir.join(&replacement);

        log::info!("Replacing {} with {}", asset.name, replacement);
        converter.convert(&source, &dest)?;

        // Remove the legacy asset only now that the SVG verifiably
        // exists, so a failed conversion cannot orphan a reference.
        fs::remove_file(&source)?;

        report.replacements.push(Replacement {
            from: asset.name.clone(),
            to: replacement,
        });
    }

    if !report.is_empty() {
        let rels_path = workdir.document_rels_path();
        let mut rels = Relationships::parse(&fs::read(&rels_path)?)?;
        for replacement in &report.replacements {
            let rewritten = rels.retarget(&replacement.from, &replacement.to);
            log::debug!(
                "Retargeted {} relationship(s): {} -> {}",
                rewritten,
                replacement.from,
                replacement.to
            );
        }
        fs::write(&rels_path, rels.to_xml())?;

        let types_path = workdir.content_types_path();
        let mut types = ContentTypes::parse(&fs::read(&types_path)?)?;
        if types.ensure_default(SVG_EXTENSION, SVG_CONTENT_TYPE) {
            log::debug!("Registered content type {SVG_CONTENT_TYPE} for .{SVG_EXTENSION}");
            fs::write(&types_path, types.to_xml())?;
        }
    }

    workdir.repack(output)?;
    log::info!(
        "Rewrote {} ({} image(s) replaced) -> {}",
        input.display(),
        report.len(),
        output.display()
    );
    Ok(report)
}
