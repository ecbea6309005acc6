//! Ephemeral working directory for one package rewrite
//!
//! A DOCX package is unpacked into a temporary directory, edited in place,
//! and repacked from the full tree. The directory is owned by exactly one
//! pipeline invocation; the backing [`tempfile::TempDir`] removes it
//! recursively when the `Workdir` is dropped, on success and on every error
//! path alike.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::read::ZipArchive;
use zip::write::ZipWriter;
use zip::CompressionMethod;

use crate::error::{OoxmlError, Result};
use crate::media::MediaAsset;

/// Relationship manifest for the main document part
pub const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";

/// Content-type registry at the package root
pub const CONTENT_TYPES: &str = "[Content_Types].xml";

/// Media directory for the main document part
pub const MEDIA_DIR: &str = "word/media";

/// An unpacked package tree, scoped to one invocation
#[derive(Debug)]
pub struct Workdir {
    root: TempDir,
}

impl Workdir {
    /// Unpack a package archive into a fresh temporary directory
    ///
    /// The full archive tree is extracted verbatim; internal directory
    /// structure encodes package semantics and is preserved as-is.
    pub fn unpack<P: AsRef<Path>>(input: P) -> Result<Self> {
        let root = TempDir::new()?;
        let file = File::open(input.as_ref())?;
        let mut archive = ZipArchive::new(file)?;
        archive.extract(root.path())?;
        log::debug!(
            "Unpacked {} entries into {}",
            archive.len(),
            root.path().display()
        );
        Ok(Self { root })
    }

    /// Root of the unpacked tree
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Check that the parts this rewrite depends on are present
    ///
    /// A package without a document relationship manifest, a content-type
    /// registry, or a media directory is rejected up front instead of
    /// failing opaquely partway through.
    pub fn validate(&self) -> Result<()> {
        for part in [DOCUMENT_RELS, CONTENT_TYPES, MEDIA_DIR] {
            if !self.path().join(part).exists() {
                return Err(OoxmlError::MissingPart(part.to_string()));
            }
        }
        Ok(())
    }

    /// Path to the document relationship manifest
    pub fn document_rels_path(&self) -> PathBuf {
        self.path().join(DOCUMENT_RELS)
    }

    /// Path to the content-type registry
    pub fn content_types_path(&self) -> PathBuf {
        self.path().join(CONTENT_TYPES)
    }

    /// Path to the media directory
    pub fn media_dir(&self) -> PathBuf {
        self.path().join(MEDIA_DIR)
    }

    /// List the media directory, one entry per regular file
    ///
    /// A single flat listing: subdirectories of the media tree are not
    /// recursed into, and file contents are never inspected.
    pub fn media_assets(&self) -> Result<Vec<MediaAsset>> {
        let mut assets = Vec::new();
        for entry in std::fs::read_dir(self.media_dir())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            assets.push(MediaAsset::from_name(name));
        }
        // Directory order is platform-dependent; sort for stable behavior.
        assets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(assets)
    }

    /// Write the whole tree into a new package archive at `output`
    ///
    /// Every file is included, touched by the pipeline or not, with its
    /// archive name computed relative to the workdir root. Entries are
    /// sorted for deterministic member order.
    pub fn repack<P: AsRef<Path>>(&self, output: P) -> Result<()> {
        let mut entries = Vec::new();
        collect_files(self.path(), self.path(), &mut entries)?;
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let file = File::create(output.as_ref())?;
        let mut zip = ZipWriter::new(file);
        let options =
            zip::write::SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, path) in &entries {
            zip.start_file(name, options)?;
            let mut src = File::open(path)?;
            io::copy(&mut src, &mut zip)?;
        }

        zip.finish()?;
        log::debug!(
            "Repacked {} entries into {}",
            entries.len(),
            output.as_ref().display()
        );
        Ok(())
    }
}

/// Recursively collect (archive name, filesystem path) pairs under `dir`
///
/// Archive names use forward slashes relative to `base`, whatever the
/// platform separator is.
fn collect_files(base: &Path, dir: &Path, out: &mut Vec<(String, PathBuf)>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(base, &path, out)?;
        } else {
            let relative = path
                .strip_prefix(base)
                .map_err(|_| OoxmlError::InvalidStructure(format!("{} escapes workdir", path.display())))?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push((name, path));
        }
    }
    Ok(())
}
