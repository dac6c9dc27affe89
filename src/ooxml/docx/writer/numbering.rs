/// Numbering definitions (numbering.xml) for list paragraphs.
use crate::common::id::ListId;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

/// List types for paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListType {
    Bullet,
    Decimal,
}

impl ListType {
    /// abstractNumId of the shared definition for this list type.
    fn abstract_num_id(self) -> u32 {
        match self {
            Self::Bullet => 0,
            Self::Decimal => 1,
        }
    }
}

/// Numbering instances created while building a document.
///
/// Every instance gets its own `w:num` restarting at 1, so two ordered lists
/// never continue each other's count.
#[derive(Debug, Default)]
pub struct Numbering {
    instances: Vec<ListType>,
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new numbering instance.
    pub fn add(&mut self, list_type: ListType) -> ListId {
        self.instances.push(list_type);
        ListId::new(self.instances.len() - 1)
    }

    /// `w:numId` of an instance (numIds are 1-based).
    pub fn num_id(&self, list: ListId) -> Option<u32> {
        (list.index() < self.instances.len()).then(|| list.index() as u32 + 1)
    }

    pub fn list_type(&self, list: ListId) -> Option<ListType> {
        self.instances.get(list.index()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Generate the numbering.xml part.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        );

        for list_type in [ListType::Bullet, ListType::Decimal] {
            write!(
                xml,
                r#"<w:abstractNum w:abstractNumId="{}"><w:multiLevelType w:val="hybridMultilevel"/>"#,
                list_type.abstract_num_id()
            )
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            for level in 0..9u32 {
                let (fmt, text) = match list_type {
                    ListType::Bullet => ("bullet", "\u{2022}".to_string()),
                    ListType::Decimal => ("decimal", format!("%{}.", level + 1)),
                };
                write!(
                    xml,
                    r#"<w:lvl w:ilvl="{}"><w:start w:val="1"/><w:numFmt w:val="{}"/><w:lvlText w:val="{}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="{}" w:hanging="360"/></w:pPr></w:lvl>"#,
                    level,
                    fmt,
                    text,
                    720 * (level + 1)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }
            xml.push_str("</w:abstractNum>");
        }

        for (index, list_type) in self.instances.iter().enumerate() {
            write!(
                xml,
                r#"<w:num w:numId="{}"><w:abstractNumId w:val="{}"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>"#,
                index + 1,
                list_type.abstract_num_id()
            )
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }

        xml.push_str("</w:numbering>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_list_gets_its_own_num() {
        let mut numbering = Numbering::new();
        let first = numbering.add(ListType::Decimal);
        let second = numbering.add(ListType::Decimal);

        assert_eq!(numbering.num_id(first), Some(1));
        assert_eq!(numbering.num_id(second), Some(2));
        assert_eq!(numbering.num_id(ListId::new(5)), None);

        let xml = numbering.to_xml().unwrap();
        assert!(xml.contains(r#"<w:num w:numId="2"><w:abstractNumId w:val="1"/>"#));
        assert!(xml.contains(r#"<w:lvlText w:val="%1."/>"#));
    }
}
