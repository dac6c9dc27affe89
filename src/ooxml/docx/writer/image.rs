/// Image support for DOCX documents.
use crate::common::unit::EMUS_PER_INCH;
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

// Import shared format types
pub use super::super::format::ImageFormat;

/// A mutable inline image in a document.
///
/// Inline images are embedded within runs. The payload may be empty, in which
/// case Word shows its broken-picture placeholder at the declared size.
#[derive(Debug, Clone)]
pub struct MutableInlineImage {
    /// Image binary data
    pub(crate) data: Vec<u8>,
    /// Image format
    pub(crate) format: ImageFormat,
    /// Width in EMUs (English Metric Units, 1 inch = 914400 EMUs)
    pub(crate) width_emu: Option<i64>,
    /// Height in EMUs
    pub(crate) height_emu: Option<i64>,
    /// Image name, also used as alt text
    pub(crate) description: String,
}

impl MutableInlineImage {
    /// Create a new inline image from bytes of a known format.
    pub fn new(
        data: Vec<u8>,
        format: ImageFormat,
        width_emu: Option<i64>,
        height_emu: Option<i64>,
    ) -> Self {
        Self {
            data,
            format,
            width_emu,
            height_emu,
            description: String::new(),
        }
    }

    /// Set the image description/alt text.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Get a reference to the image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the image format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Serialize the inline image to XML.
    ///
    /// `doc_pr_id` must be unique among the drawings of the document.
    pub(crate) fn to_xml(&self, xml: &mut String, r_id: &str, doc_pr_id: usize) -> Result<()> {
        let width = self.width_emu.unwrap_or(EMUS_PER_INCH);
        let height = self.height_emu.unwrap_or(EMUS_PER_INCH);
        let desc = escape_xml(&self.description);

        write!(
            xml,
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{}" cy="{}"/><wp:effectExtent l="0" t="0" r="0" b="0"/><wp:docPr id="{}" name="Picture {}" descr="{}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" noChangeAspect="1"/></wp:cNvGraphicFramePr><a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:nvPicPr><pic:cNvPr id="0" name="{}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
            width, height, doc_pr_id, doc_pr_id, desc, desc, r_id, width, height
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_xml_uses_extent_and_embed() {
        let mut image = MutableInlineImage::new(Vec::new(), ImageFormat::Png, Some(100), None);
        image.set_description("logo.png");

        let mut xml = String::new();
        image.to_xml(&mut xml, "rId7", 3).unwrap();

        assert!(xml.contains(r#"<wp:extent cx="100" cy="914400"/>"#));
        assert!(xml.contains(r#"<wp:docPr id="3" name="Picture 3" descr="logo.png"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId7"/>"#));
    }
}
