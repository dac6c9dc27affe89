/// Style writer support for DOCX documents.
///
/// The converter only references a fixed set of built-in paragraph styles,
/// so the styles part is generated from [`default_styles`].
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Kind of element a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    Paragraph,
    Character,
}

impl StyleType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
        }
    }
}

/// A style definition for writing.
#[derive(Debug, Clone)]
pub struct MutableStyle {
    /// Style identifier (required, e.g., "Heading1")
    style_id: String,
    /// UI-visible name (e.g., "heading 1")
    name: String,
    style_type: StyleType,
    /// Whether this is the default style for its type
    is_default: bool,
    /// ID of the style this is based on
    based_on: Option<String>,
    /// UI priority for display ordering (lower = higher priority)
    priority: Option<i32>,
    /// Whether to show in quick style gallery
    is_quick_style: bool,
    /// Keep with the next paragraph
    keep_next: bool,
    /// Outline level for headings (0-based)
    outline_level: Option<u8>,
    /// Font size in half-points (e.g., 24 = 12pt)
    font_size: Option<u32>,
    bold: bool,
    /// Font color (RGB hex format, e.g., "FF0000" for red)
    color: Option<String>,
    /// Space before paragraph (twips)
    space_before: Option<u32>,
    /// Space after paragraph (twips)
    space_after: Option<u32>,
    /// Left indent (twips)
    indent_left: Option<u32>,
    /// Contextual spacing (suppress spacing between same-style paragraphs)
    contextual_spacing: bool,
}

impl MutableStyle {
    pub fn new(style_id: impl Into<String>, name: impl Into<String>, style_type: StyleType) -> Self {
        Self {
            style_id: style_id.into(),
            name: name.into(),
            style_type,
            is_default: false,
            based_on: None,
            priority: None,
            is_quick_style: false,
            keep_next: false,
            outline_level: None,
            font_size: None,
            bold: false,
            color: None,
            space_before: None,
            space_after: None,
            indent_left: None,
            contextual_spacing: false,
        }
    }

    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<w:style w:type="{}" w:styleId="{}""#,
            self.style_type.as_str(),
            escape_xml(&self.style_id)
        )?;
        if self.is_default {
            xml.push_str(r#" w:default="1""#);
        }
        xml.push('>');

        write!(xml, r#"<w:name w:val="{}"/>"#, escape_xml(&self.name))?;

        if let Some(ref based_on) = self.based_on {
            write!(xml, r#"<w:basedOn w:val="{}"/>"#, escape_xml(based_on))?;
        }
        if self.style_type == StyleType::Paragraph && !self.is_default {
            xml.push_str(r#"<w:next w:val="Normal"/>"#);
        }
        if let Some(priority) = self.priority {
            write!(xml, r#"<w:uiPriority w:val="{}"/>"#, priority)?;
        }
        if self.is_quick_style {
            xml.push_str("<w:qFormat/>");
        }

        let has_para_props = self.keep_next
            || self.outline_level.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.indent_left.is_some()
            || self.contextual_spacing;
        if self.style_type == StyleType::Paragraph && has_para_props {
            xml.push_str("<w:pPr>");
            if self.keep_next {
                xml.push_str("<w:keepNext/>");
            }
            if self.space_before.is_some() || self.space_after.is_some() {
                xml.push_str("<w:spacing");
                if let Some(before) = self.space_before {
                    write!(xml, r#" w:before="{}""#, before)?;
                }
                if let Some(after) = self.space_after {
                    write!(xml, r#" w:after="{}""#, after)?;
                }
                xml.push_str("/>");
            }
            if let Some(left) = self.indent_left {
                write!(xml, r#"<w:ind w:left="{}"/>"#, left)?;
            }
            if self.contextual_spacing {
                xml.push_str("<w:contextualSpacing/>");
            }
            if let Some(level) = self.outline_level {
                write!(xml, r#"<w:outlineLvl w:val="{}"/>"#, level)?;
            }
            xml.push_str("</w:pPr>");
        }

        if self.bold || self.font_size.is_some() || self.color.is_some() {
            xml.push_str("<w:rPr>");
            if self.bold {
                xml.push_str("<w:b/>");
            }
            if let Some(ref color) = self.color {
                write!(xml, r#"<w:color w:val="{}"/>"#, escape_xml(color))?;
            }
            if let Some(size) = self.font_size {
                write!(xml, r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#, size, size)?;
            }
            xml.push_str("</w:rPr>");
        }

        xml.push_str("</w:style>");
        Ok(())
    }

    /// Create a "Normal" paragraph style (base style).
    pub fn normal() -> Self {
        let mut style = Self::new("Normal", "Normal", StyleType::Paragraph);
        style.is_default = true;
        style.is_quick_style = true;
        style
    }

    /// Create a default character style.
    pub fn default_paragraph_font() -> Self {
        let mut style = Self::new(
            "DefaultParagraphFont",
            "Default Paragraph Font",
            StyleType::Character,
        );
        style.is_default = true;
        style.priority = Some(1);
        style
    }

    /// Create a "heading N" style for levels 1 through 6.
    pub fn heading(level: u8) -> Self {
        let level = level.clamp(1, 6);
        let mut style = Self::new(
            format!("Heading{}", level),
            format!("heading {}", level),
            StyleType::Paragraph,
        );
        style.based_on = Some("Normal".to_string());
        style.keep_next = true;
        style.outline_level = Some(level - 1);
        style.bold = level >= 3;
        // 16pt, 13pt, 12pt, then body size
        style.font_size = match level {
            1 => Some(32),
            2 => Some(26),
            3 => Some(24),
            _ => None,
        };
        style.color = Some(if level == 1 { "2F5496" } else { "1F3763" }.to_string());
        style.space_before = Some(if level == 1 { 240 } else { 40 });
        style.space_after = Some(0);
        style.priority = Some(9);
        style.is_quick_style = true;
        style
    }

    /// Create the "List Paragraph" style used by bullet and numbered items.
    pub fn list_paragraph() -> Self {
        let mut style = Self::new("ListParagraph", "List Paragraph", StyleType::Paragraph);
        style.based_on = Some("Normal".to_string());
        style.indent_left = Some(720);
        style.contextual_spacing = true;
        style.priority = Some(34);
        style.is_quick_style = true;
        style
    }
}

/// The styles every converted document carries.
pub fn default_styles() -> Vec<MutableStyle> {
    let mut styles = vec![MutableStyle::normal(), MutableStyle::default_paragraph_font()];
    styles.extend((1..=6).map(MutableStyle::heading));
    styles.push(MutableStyle::list_paragraph());
    styles
}

/// Generate a complete styles.xml part.
pub fn generate_styles_xml(styles: &[MutableStyle]) -> Result<String> {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    );
    xml.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );

    // Add default document defaults
    xml.push_str("<w:docDefaults>");
    xml.push_str("<w:rPrDefault><w:rPr>");
    xml.push_str(r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#);
    xml.push_str(r#"<w:sz w:val="22"/>"#);
    xml.push_str(r#"<w:szCs w:val="22"/>"#);
    xml.push_str("</w:rPr></w:rPrDefault>");
    xml.push_str("<w:pPrDefault/>");
    xml.push_str("</w:docDefaults>");

    for style in styles {
        style.to_xml(&mut xml)?;
    }

    xml.push_str("</w:styles>");

    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles() {
        let style = MutableStyle::heading(2);
        assert_eq!(style.style_id(), "Heading2");
        assert_eq!(style.name(), "heading 2");

        let mut xml = String::new();
        style.to_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"<w:outlineLvl w:val="1"/>"#));
        assert!(xml.contains(r#"<w:basedOn w:val="Normal"/>"#));

        assert_eq!(MutableStyle::heading(9).style_id(), "Heading6");
    }

    #[test]
    fn test_generate_styles_xml() {
        let xml = generate_styles_xml(&default_styles()).unwrap();
        assert!(xml.contains("<w:docDefaults>"));
        for id in ["Normal", "Heading1", "Heading6", "ListParagraph"] {
            assert!(xml.contains(&format!(r#"w:styleId="{}""#, id)), "missing {}", id);
        }
        assert!(xml.ends_with("</w:styles>"));
    }
}
