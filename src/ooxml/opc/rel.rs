use crate::common::xml::escape_xml;
/// Relationship-related objects for OPC packages.
///
/// A part's relationships name the other parts (styles, media) and the
/// external targets (hyperlinks) it references by rId.
use std::collections::HashMap;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part-relative path or external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(r_id: String, reltype: String, target_ref: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Collection of relationships from a single source part.
#[derive(Debug, Default)]
pub struct Relationships {
    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Get or add an internal relationship, returning its rId.
    ///
    /// If a relationship of the given type to the target already exists its
    /// rId is reused; otherwise a new one gets the next available rId.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        self.get_or_insert(reltype, target_ref, false)
    }

    /// Get or add an external relationship, returning its rId.
    pub fn get_or_add_ext_rel(&mut self, reltype: &str, target_ref: &str) -> String {
        self.get_or_insert(reltype, target_ref, true)
    }

    fn get_or_insert(&mut self, reltype: &str, target_ref: &str, is_external: bool) -> String {
        if let Some(rel) = self.rels.values().find(|rel| {
            rel.reltype() == reltype
                && rel.target_ref() == target_ref
                && rel.is_external() == is_external
        }) {
            return rel.r_id().to_string();
        }

        let r_id = self.next_r_id();
        self.rels.insert(
            r_id.clone(),
            Relationship::new(
                r_id.clone(),
                reltype.to_string(),
                target_ref.to_string(),
                is_external,
            ),
        );
        r_id
    }

    /// Get the next available relationship ID.
    ///
    /// Generates IDs in the format "rId1", "rId2", etc., filling in gaps
    /// if any exist.
    fn next_r_id(&self) -> String {
        let mut used_numbers: Vec<u32> = self
            .rels
            .keys()
            .filter_map(|r_id| r_id.strip_prefix("rId"))
            .filter_map(|num| atoi_simd::parse::<u32>(num.as_bytes()).ok())
            .collect();

        used_numbers.sort_unstable();

        let mut next_num = 1u32;
        for &num in &used_numbers {
            match num.cmp(&next_num) {
                std::cmp::Ordering::Equal => next_num += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }

        format!("rId{}", next_num)
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to XML format, ordered by rId number.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        xml.push('\n');

        let mut rels: Vec<&Relationship> = self.rels.values().collect();
        rels.sort_by_key(|rel| {
            rel.r_id()
                .strip_prefix("rId")
                .and_then(|num| atoi_simd::parse::<u32>(num.as_bytes()).ok())
                .unwrap_or(u32::MAX)
        });

        for rel in rels {
            let target_mode = if rel.is_external() {
                r#" TargetMode="External""#
            } else {
                ""
            };

            xml.push_str(&format!(
                r#"  <Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(rel.r_id()),
                escape_xml(rel.reltype()),
                escape_xml(rel.target_ref()),
                target_mode
            ));
            xml.push('\n');
        }

        xml.push_str("</Relationships>");

        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_r_id() {
        let mut rels = Relationships::new();
        assert_eq!(rels.next_r_id(), "rId1");

        rels.get_or_add("type1", "target1");
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_get_or_add() {
        let mut rels = Relationships::new();

        assert_eq!(rels.get_or_add("type1", "target1"), "rId1");
        // Getting the same relationship should return the same rId
        assert_eq!(rels.get_or_add("type1", "target1"), "rId1");
        // Different target should create new relationship
        assert_eq!(rels.get_or_add("type1", "target2"), "rId2");
        // Same target but external is a distinct relationship
        assert_eq!(rels.get_or_add_ext_rel("type1", "target1"), "rId3");
        assert_eq!(rels.len(), 3);
    }

    #[test]
    fn test_to_xml_orders_numerically_and_marks_external() {
        let mut rels = Relationships::new();
        for i in 0..11 {
            rels.get_or_add("t", &format!("media/image{}.png", i));
        }
        rels.get_or_add_ext_rel("link", "https://example.com/?a=1&b=2");

        let xml = rels.to_xml();
        let pos2 = xml.find(r#"Id="rId2""#).unwrap();
        let pos10 = xml.find(r#"Id="rId10""#).unwrap();
        assert!(pos2 < pos10);
        assert!(xml.contains(r#"Target="https://example.com/?a=1&amp;b=2" TargetMode="External""#));
    }
}
