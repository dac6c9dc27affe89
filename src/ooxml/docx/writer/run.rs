/// Run types and implementation for DOCX documents.
use crate::common::id::ImageId;
use crate::common::xml::{escape_xml, needs_space_preserve};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

// Import shared format types
pub use super::super::format::UnderlineStyle;
use super::relmap::RelationshipMapper;
use super::MutableDocument;

/// One piece of run content, emitted in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Plain text
    Text(String),
    /// Line break
    Break,
    /// Inline picture
    Drawing(ImageId),
}

/// A mutable run.
///
/// Runs contain text and character formatting.
#[derive(Debug, Default)]
pub struct MutableRun {
    /// Run content
    pub(crate) content: Vec<RunContent>,
    /// Run properties
    pub(crate) properties: RunProperties,
}

impl MutableRun {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace the text content, keeping breaks and pictures.
    pub fn set_text(&mut self, text: &str) {
        self.content
            .retain(|item| !matches!(item, RunContent::Text(_)));
        self.content.push(RunContent::Text(text.to_string()));
    }

    /// Get the text content.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|item| match item {
                RunContent::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Make the text bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        self.properties.bold = Some(bold);
        self
    }

    /// Make the text italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        self.properties.italic = Some(italic);
        self
    }

    /// Set underline style.
    pub fn underline(&mut self, style: UnderlineStyle) -> &mut Self {
        self.properties.underline = Some(style);
        self
    }

    /// Strike the text through.
    pub fn strike(&mut self, strike: bool) -> &mut Self {
        self.properties.strike = Some(strike);
        self
    }

    /// Set font size in half-points (e.g., 24 = 12pt).
    pub fn font_size(&mut self, size: u32) -> &mut Self {
        self.properties.font_size = Some(size);
        self
    }

    /// Set text color using hex RGB (e.g., "FF0000" for red).
    pub fn color(&mut self, color: &str) -> &mut Self {
        self.properties.color = Some(color.to_string());
        self
    }

    /// Set text highlight color (a named highlight such as "yellow").
    pub fn highlight(&mut self, color: &str) -> &mut Self {
        self.properties.highlight = Some(color.to_string());
        self
    }

    /// Append a line break.
    pub fn add_break(&mut self) -> &mut Self {
        self.content.push(RunContent::Break);
        self
    }

    pub(crate) fn add_drawing(&mut self, image: ImageId) {
        self.content.push(RunContent::Drawing(image));
    }

    pub fn properties(&self) -> &RunProperties {
        &self.properties
    }

    pub(crate) fn to_xml(
        &self,
        doc: &MutableDocument,
        rels: &RelationshipMapper,
        xml: &mut String,
    ) -> Result<()> {
        xml.push_str("<w:r>");

        if self.properties.has_properties() {
            xml.push_str("<w:rPr>");

            if self.properties.bold == Some(true) {
                xml.push_str("<w:b/>");
            }

            if self.properties.italic == Some(true) {
                xml.push_str("<w:i/>");
            }

            if self.properties.strike == Some(true) {
                xml.push_str("<w:strike/>");
            }

            if let Some(ref color) = self.properties.color {
                write!(xml, "<w:color w:val=\"{}\"/>", escape_xml(color))?;
            }

            if let Some(size) = self.properties.font_size {
                write!(xml, "<w:sz w:val=\"{}\"/>", size)?;
            }

            if let Some(ref highlight) = self.properties.highlight {
                write!(xml, "<w:highlight w:val=\"{}\"/>", escape_xml(highlight))?;
            }

            if let Some(underline_style) = self.properties.underline {
                write!(xml, "<w:u w:val=\"{}\"/>", underline_style.as_str())?;
            }

            xml.push_str("</w:rPr>");
        }

        for item in &self.content {
            match item {
                RunContent::Text(text) if text.is_empty() => {},
                RunContent::Text(text) if needs_space_preserve(text) => {
                    write!(xml, "<w:t xml:space=\"preserve\">{}</w:t>", escape_xml(text))?;
                },
                RunContent::Text(text) => {
                    write!(xml, "<w:t>{}</w:t>", escape_xml(text))?;
                },
                RunContent::Break => xml.push_str("<w:br/>"),
                RunContent::Drawing(image) => {
                    let r_id = rels.image(*image).ok_or(
                        crate::ooxml::error::OoxmlError::UnknownHandle {
                            kind: "image",
                            index: image.index(),
                        },
                    )?;
                    doc.image(*image)?.to_xml(xml, r_id, image.index() + 1)?;
                },
            }
        }

        xml.push_str("</w:r>");

        Ok(())
    }
}

/// Run properties.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunProperties {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<UnderlineStyle>,
    pub strike: Option<bool>,
    pub font_size: Option<u32>,
    pub color: Option<String>,
    pub highlight: Option<String>,
}

impl RunProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.strike.is_some()
            || self.font_size.is_some()
            || self.color.is_some()
            || self.highlight.is_some()
    }
}
