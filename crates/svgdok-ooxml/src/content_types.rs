//! Content-type registry parsing and registration
//!
//! `[Content_Types].xml` declares a MIME type for every part in the
//! package, either by extension (`<Default>`) or by part name
//! (`<Override>`). A package carrying SVG media must declare the
//! `image/svg+xml` type, so the rewrite registers a Default for `svg`
//! after converting any image.
//!
//! Registration is idempotent: an already-declared extension is left
//! alone, so reprocessing a package never produces a duplicate entry.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// OOXML namespace for content types
pub const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// One declaration in the registry, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Extension-keyed declaration (`<Default>`)
    Default {
        /// File extension without the dot
        extension: String,
        /// MIME type for all parts with that extension
        content_type: String,
    },
    /// Part-keyed declaration (`<Override>`)
    Override {
        /// Absolute part name (e.g. "/word/document.xml")
        part_name: String,
        /// MIME type for that single part
        content_type: String,
    },
}

/// Parsed content-type registry
///
/// Declarations keep their document order so re-serialization is stable.
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    entries: Vec<Declaration>,
}

impl ContentTypes {
    /// Parse a registry from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match e.local_name().as_ref() {
                        b"Default" => {
                            let mut extension = None;
                            let mut content_type = None;
                            for attr in e.attributes().filter_map(|a| a.ok()) {
                                match attr.key.as_ref() {
                                    b"Extension" => {
                                        extension =
                                            attr.unescape_value().ok().map(|s| s.to_string());
                                    }
                                    b"ContentType" => {
                                        content_type =
                                            attr.unescape_value().ok().map(|s| s.to_string());
                                    }
                                    _ => {}
                                }
                            }
                            if let (Some(extension), Some(content_type)) = (extension, content_type)
                            {
                                entries.push(Declaration::Default {
                                    extension,
                                    content_type,
                                });
                            }
                        }
                        b"Override" => {
                            let mut part_name = None;
                            let mut content_type = None;
                            for attr in e.attributes().filter_map(|a| a.ok()) {
                                match attr.key.as_ref() {
                                    b"PartName" => {
                                        part_name =
                                            attr.unescape_value().ok().map(|s| s.to_string());
                                    }
                                    b"ContentType" => {
                                        content_type =
                                            attr.unescape_value().ok().map(|s| s.to_string());
                                    }
                                    _ => {}
                                }
                            }
                            if let (Some(part_name), Some(content_type)) = (part_name, content_type)
                            {
                                entries.push(Declaration::Override {
                                    part_name,
                                    content_type,
                                });
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { entries })
    }

    /// Check whether an extension already has a Default declaration
    ///
    /// Extensions compare ASCII case-insensitively, matching how package
    /// consumers resolve them.
    pub fn has_default(&self, ext: &str) -> bool {
        self.entries.iter().any(|entry| {
            matches!(entry, Declaration::Default { extension, .. }
                if extension.eq_ignore_ascii_case(ext))
        })
    }

    /// Look up the declared MIME type for an extension
    pub fn default_for(&self, ext: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            Declaration::Default {
                extension,
                content_type,
            } if extension.eq_ignore_ascii_case(ext) => Some(content_type.as_str()),
            _ => None,
        })
    }

    /// Declare a Default for an extension if not already declared
    ///
    /// The new declaration is inserted immediately after the first
    /// existing Default (or appended if there is none). Returns true if a
    /// declaration was inserted, false if the extension was already
    /// registered.
    pub fn ensure_default(&mut self, ext: &str, content_type: &str) -> bool {
        if self.has_default(ext) {
            return false;
        }

        let declaration = Declaration::Default {
            extension: ext.to_string(),
            content_type: content_type.to_string(),
        };
        let position = self
            .entries
            .iter()
            .position(|e| matches!(e, Declaration::Default { .. }))
            .map(|idx| idx + 1)
            .unwrap_or(self.entries.len());
        self.entries.insert(position, declaration);
        true
    }

    /// Serialize the registry back to XML with stable formatting
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, CONTENT_TYPES_NS));
        xml.push('\n');

        for entry in &self.entries {
            match entry {
                Declaration::Default {
                    extension,
                    content_type,
                } => {
                    xml.push_str(&format!(
                        "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
                        escape_xml(extension),
                        escape_xml(content_type)
                    ));
                }
                Declaration::Override {
                    part_name,
                    content_type,
                } => {
                    xml.push_str(&format!(
                        "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n",
                        escape_xml(part_name),
                        escape_xml(content_type)
                    ));
                }
            }
        }

        xml.push_str("</Types>");
        xml
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry has no declarations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over declarations in document order
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }
}

/// Escape special XML characters in attribute values
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
