/// Page setup for the single section a converted document has.
use crate::ooxml::error::{OoxmlError, Result};
use serde::Deserialize;
use std::fmt::Write as FmtWrite;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageOrientation {
    /// Convert orientation to XML string representation.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// Section properties including page setup and margins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionProperties {
    /// Page width in twips (twentieth of a point, 1440 = 1 inch)
    pub page_width: u32,
    /// Page height in twips
    pub page_height: u32,
    /// Page orientation
    pub orientation: PageOrientation,
    /// Top margin in twips
    pub margin_top: u32,
    /// Bottom margin in twips
    pub margin_bottom: u32,
    /// Left margin in twips
    pub margin_left: u32,
    /// Right margin in twips
    pub margin_right: u32,
    /// Header distance from top in twips
    pub header_distance: u32,
    /// Footer distance from bottom in twips
    pub footer_distance: u32,
}

impl Default for SectionProperties {
    fn default() -> Self {
        // US Letter size: 8.5" x 11" = 12240 x 15840 twips
        Self {
            page_width: 12240,
            page_height: 15840,
            orientation: PageOrientation::Portrait,
            margin_top: 1440,     // 1 inch
            margin_bottom: 1440,  // 1 inch
            margin_left: 1440,    // 1 inch
            margin_right: 1440,   // 1 inch
            header_distance: 720, // 0.5 inch
            footer_distance: 720, // 0.5 inch
        }
    }
}

impl SectionProperties {
    /// Set page to landscape orientation.
    pub fn landscape(mut self) -> Self {
        self.orientation = PageOrientation::Landscape;
        // Swap width and height for landscape
        std::mem::swap(&mut self.page_width, &mut self.page_height);
        self
    }

    /// Width available to body content (page width minus side margins).
    pub fn content_width(&self) -> u32 {
        self.page_width
            .saturating_sub(self.margin_left)
            .saturating_sub(self.margin_right)
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:sectPr>");

        write!(
            xml,
            r#"<w:pgSz w:w="{}" w:h="{}" w:orient="{}"/>"#,
            self.page_width,
            self.page_height,
            self.orientation.as_str()
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        write!(
            xml,
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="0"/>"#,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
            self.header_distance,
            self.footer_distance
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        xml.push_str("</w:sectPr>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_swaps_dimensions() {
        let section = SectionProperties::default().landscape();
        assert_eq!(section.page_width, 15840);
        assert_eq!(section.page_height, 12240);
        assert_eq!(section.orientation, PageOrientation::Landscape);
    }

    #[test]
    fn test_content_width() {
        assert_eq!(SectionProperties::default().content_width(), 12240 - 2 * 1440);
    }

    #[test]
    fn test_section_xml() {
        let mut xml = String::new();
        SectionProperties::default().to_xml(&mut xml).unwrap();
        assert!(xml.starts_with(r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840" w:orient="portrait"/>"#));
        assert!(xml.ends_with("</w:sectPr>"));
    }
}
