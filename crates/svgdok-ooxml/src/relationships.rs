//! Relationship manifest parsing and retargeting
//!
//! OOXML relationship files (_rels/*.rels) map IDs to targets; images are
//! referenced from the document body by relationship ID, and the manifest
//! holds the actual media path. Renaming a media file therefore means
//! rewriting the `Target` attribute of every relationship that points at
//! it.
//!
//! Retargeting is structure-aware: only `Target` attribute values whose
//! final path component matches the old file name exactly are rewritten.
//! A raw text substitution over the manifest would also hit IDs, type
//! URIs, or other targets that happen to contain the file name as a
//! substring.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Parsed relationships from a .rels file
///
/// Maintains insertion order for deterministic XML serialization.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Ordered list of relationship IDs (maintains insertion order)
    order: Vec<String>,
    /// Map of relationship ID to target (for fast lookups)
    map: HashMap<String, RelationshipTarget>,
}

/// A relationship target with its type and mode
#[derive(Debug, Clone)]
pub struct RelationshipTarget {
    /// The target URL or path
    pub target: String,
    /// The relationship type URI (e.g., hyperlink, image, styles)
    pub rel_type: String,
    /// Target mode: "External" for URLs, None for internal paths
    pub target_mode: Option<String>,
}

impl Relationships {
    /// Parse relationships from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut order = Vec::new();
        let mut map = HashMap::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut id = None;
                        let mut target = None;
                        let mut rel_type = None;
                        let mut target_mode = None;

                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            match attr.key.as_ref() {
                                b"Id" => {
                                    id = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"Target" => {
                                    target = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"Type" => {
                                    rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                b"TargetMode" => {
                                    target_mode = attr.unescape_value().ok().map(|s| s.to_string());
                                }
                                _ => {}
                            }
                        }

                        if let (Some(id), Some(target)) = (id, target) {
                            order.push(id.clone());
                            map.insert(
                                id,
                                RelationshipTarget {
                                    target,
                                    rel_type: rel_type.unwrap_or_default(),
                                    target_mode,
                                },
                            );
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { order, map })
    }

    /// Retarget every relationship that points at a renamed file
    ///
    /// Rewrites `Target` values whose final path component equals
    /// `old_name` exactly, replacing just that component and keeping any
    /// directory prefix (so `media/image1.emf` becomes `media/image1.svg`).
    /// External targets are never touched. Returns how many relationships
    /// were rewritten.
    pub fn retarget(&mut self, old_name: &str, new_name: &str) -> usize {
        let mut rewritten = 0;
        for rel in self.map.values_mut() {
            if rel.target_mode.as_deref() == Some("External") {
                continue;
            }
            let (prefix, file) = match rel.target.rfind('/') {
                Some(idx) => (&rel.target[..idx + 1], &rel.target[idx + 1..]),
                None => ("", rel.target.as_str()),
            };
            if file == old_name {
                rel.target = format!("{prefix}{new_name}");
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Serialize relationships to OOXML format
    ///
    /// Returns valid XML that can be written back to a .rels file.
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        // Iterate in insertion order for deterministic output
        for id in &self.order {
            if let Some(rel) = self.map.get(id) {
                xml.push_str("  <Relationship");
                xml.push_str(&format!(r#" Id="{}""#, escape_xml(id)));
                xml.push_str(&format!(r#" Type="{}""#, escape_xml(&rel.rel_type)));
                xml.push_str(&format!(r#" Target="{}""#, escape_xml(&rel.target)));
                if let Some(mode) = &rel.target_mode {
                    xml.push_str(&format!(r#" TargetMode="{}""#, escape_xml(mode)));
                }
                xml.push_str("/>\n");
            }
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Get the target for a relationship ID
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(|r| r.target.as_str())
    }

    /// Check if any relationship targets the given file name
    pub fn targets_file(&self, name: &str) -> bool {
        self.map.values().any(|rel| {
            rel.target
                .rsplit('/')
                .next()
                .is_some_and(|file| file == name)
        })
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over relationships in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationshipTarget)> {
        self.order
            .iter()
            .filter_map(|id| self.map.get(id).map(|rel| (id.as_str(), rel)))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relationships() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.emf"/>
            <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
        </Relationships>"#;

        let rels = Relationships::parse(xml).unwrap();

        assert_eq!(rels.get("rId1"), Some("media/image1.emf"));
        assert_eq!(rels.get("rId2"), Some("styles.xml"));
        assert!(rels.targets_file("image1.emf"));
        assert!(!rels.targets_file("image1.svg"));
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_empty_relationships() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
        </Relationships>"#;

        let rels = Relationships::parse(xml).unwrap();
        assert!(rels.get("rId1").is_none());
        assert!(rels.is_empty());
    }

    #[test]
    fn test_retarget_rewrites_matching_targets() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.emf"/>
            <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image2.png"/>
        </Relationships>"#;

        let mut rels = Relationships::parse(xml).unwrap();
        let count = rels.retarget("image1.emf", "image1.svg");

        assert_eq!(count, 1);
        assert_eq!(rels.get("rId1"), Some("media/image1.svg"));
        assert_eq!(rels.get("rId2"), Some("media/image2.png"));
    }

    #[test]
    fn test_retarget_is_exact_not_substring() {
        // "image1.emf" is a suffix of "oldimage1.emf"; only the exact
        // file name may be rewritten.
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.emf"/>
            <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/oldimage1.emf"/>
        </Relationships>"#;

        let mut rels = Relationships::parse(xml).unwrap();
        let count = rels.retarget("image1.emf", "image1.svg");

        assert_eq!(count, 1);
        assert_eq!(rels.get("rId1"), Some("media/image1.svg"));
        assert_eq!(rels.get("rId2"), Some("media/oldimage1.emf"));
    }

    #[test]
    fn test_retarget_skips_external_targets() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/image1.emf" TargetMode="External"/>
        </Relationships>"#;

        let mut rels = Relationships::parse(xml).unwrap();
        let count = rels.retarget("image1.emf", "image1.svg");

        assert_eq!(count, 0);
        assert_eq!(rels.get("rId1"), Some("https://example.com/image1.emf"));
    }

    #[test]
    fn test_retarget_bare_file_name() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="image1.wmf"/>
        </Relationships>"#;

        let mut rels = Relationships::parse(xml).unwrap();
        assert_eq!(rels.retarget("image1.wmf", "image1.svg"), 1);
        assert_eq!(rels.get("rId1"), Some("image1.svg"));
    }

    #[test]
    fn test_retarget_then_serialize_round_trip() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
            <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.emf"/>
        </Relationships>"#;

        let mut rels = Relationships::parse(xml).unwrap();
        rels.retarget("image1.emf", "image1.svg");

        let output = rels.to_xml();
        assert!(output.contains(r#"Target="media/image1.svg""#));
        assert!(!output.contains("image1.emf"));

        let reparsed = Relationships::parse(output.as_bytes()).unwrap();
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed.get("rId1"), Some("styles.xml"));
        assert_eq!(reparsed.get("rId2"), Some("media/image1.svg"));
    }

    #[test]
    fn test_xml_escaping_in_serialization() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="t" Target="file with &lt;special&gt; &amp; &quot;chars&quot;.xml"/>
        </Relationships>"#;

        let rels = Relationships::parse(xml).unwrap();
        let output = rels.to_xml();

        assert!(output.contains("&lt;special&gt;"));
        assert!(output.contains("&amp;"));
        assert!(output.contains("&quot;chars&quot;"));

        let reparsed = Relationships::parse(output.as_bytes()).unwrap();
        assert_eq!(
            reparsed.get("rId1"),
            Some("file with <special> & \"chars\".xml")
        );
    }

    #[test]
    fn test_iteration_order() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId3" Type="t" Target="third.xml"/>
            <Relationship Id="rId1" Type="t" Target="first.xml"/>
            <Relationship Id="rId2" Type="t" Target="second.xml"/>
        </Relationships>"#;

        let rels = Relationships::parse(xml).unwrap();
        let targets: Vec<&str> = rels.iter().map(|(_, rel)| rel.target.as_str()).collect();
        assert_eq!(targets, vec!["third.xml", "first.xml", "second.xml"]);
    }
}
