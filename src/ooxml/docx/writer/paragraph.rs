/// Paragraph types and implementation for DOCX documents.
use crate::common::id::{HyperlinkId, RunId};
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

use super::MutableDocument;
use super::relmap::RelationshipMapper;
use super::table::TableBorder;

/// Elements that can appear in a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParagraphElement {
    Run(RunId),
    Hyperlink(HyperlinkId),
}

/// Numbering reference of a list paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingProperties {
    /// Numbering instance id (`w:numId`)
    pub num_id: u32,
    /// Indentation level (`w:ilvl`)
    pub ilvl: u32,
}

/// Paragraph properties.
#[derive(Debug, Default, Clone)]
pub(crate) struct ParagraphProperties {
    pub(crate) numbering: Option<NumberingProperties>,
    pub(crate) bottom_border: Option<TableBorder>,
}

impl ParagraphProperties {
    fn has_properties(&self) -> bool {
        self.numbering.is_some() || self.bottom_border.is_some()
    }
}

/// A mutable paragraph in a document.
#[derive(Debug, Default)]
pub struct MutableParagraph {
    /// Elements (runs and hyperlinks) in this paragraph
    pub(crate) elements: Vec<ParagraphElement>,
    /// Paragraph style ID
    pub(crate) style: Option<String>,
    /// Paragraph properties
    pub(crate) properties: ParagraphProperties,
}

impl MutableParagraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the paragraph style by style id (e.g. "Heading1").
    pub fn set_style(&mut self, style_id: &str) {
        self.style = Some(style_id.to_string());
    }

    /// Get the paragraph style id.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Attach the paragraph to a numbering instance.
    pub fn set_numbering(&mut self, num_id: u32, ilvl: u32) {
        self.properties.numbering = Some(NumberingProperties { num_id, ilvl });
    }

    pub fn numbering(&self) -> Option<NumberingProperties> {
        self.properties.numbering
    }

    /// Draw a border under the paragraph (a horizontal rule).
    pub fn set_bottom_border(&mut self, border: TableBorder) {
        self.properties.bottom_border = Some(border);
    }

    pub fn has_bottom_border(&self) -> bool {
        self.properties.bottom_border.is_some()
    }

    /// Run handles directly inside this paragraph, in order.
    pub fn runs(&self) -> impl Iterator<Item = RunId> + '_ {
        self.elements.iter().filter_map(|element| match element {
            ParagraphElement::Run(run) => Some(*run),
            ParagraphElement::Hyperlink(_) => None,
        })
    }

    /// Hyperlink handles inside this paragraph, in order.
    pub fn hyperlinks(&self) -> impl Iterator<Item = HyperlinkId> + '_ {
        self.elements.iter().filter_map(|element| match element {
            ParagraphElement::Hyperlink(link) => Some(*link),
            ParagraphElement::Run(_) => None,
        })
    }

    pub(crate) fn to_xml(
        &self,
        doc: &MutableDocument,
        rels: &RelationshipMapper,
        xml: &mut String,
    ) -> Result<()> {
        xml.push_str("<w:p>");

        if self.style.is_some() || self.properties.has_properties() {
            xml.push_str("<w:pPr>");

            if let Some(ref style) = self.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_xml(style))
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            // Write numbering properties for lists
            if let Some(ref numbering) = self.properties.numbering {
                xml.push_str("<w:numPr>");
                write!(xml, "<w:ilvl w:val=\"{}\"/>", numbering.ilvl)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                write!(xml, "<w:numId w:val=\"{}\"/>", numbering.num_id)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                xml.push_str("</w:numPr>");
            }

            if let Some(ref border) = self.properties.bottom_border {
                xml.push_str("<w:pBdr>");
                border.to_xml(xml, "bottom")?;
                xml.push_str("</w:pBdr>");
            }

            xml.push_str("</w:pPr>");
        }

        for element in &self.elements {
            match element {
                ParagraphElement::Run(run) => doc.run(*run)?.to_xml(doc, rels, xml)?,
                ParagraphElement::Hyperlink(link) => {
                    let hyperlink = doc.hyperlink(*link)?;
                    match rels.hyperlink(*link) {
                        Some(r_id) => hyperlink.to_xml(doc, rels, r_id, xml)?,
                        None => {
                            return Err(OoxmlError::UnknownHandle {
                                kind: "hyperlink",
                                index: link.index(),
                            });
                        },
                    }
                },
            }
        }

        xml.push_str("</w:p>");

        Ok(())
    }
}
