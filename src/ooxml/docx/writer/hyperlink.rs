/// Hyperlink support for DOCX documents.
use crate::common::id::RunId;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

use super::MutableDocument;
use super::relmap::RelationshipMapper;

/// A mutable hyperlink in a document.
///
/// The hyperlink wraps its own runs and points at an external target through
/// a relationship of the document part.
#[derive(Debug)]
pub struct MutableHyperlink {
    /// Hyperlink URL
    pub(crate) url: String,
    /// Runs displayed as the link text
    pub(crate) runs: Vec<RunId>,
}

impl MutableHyperlink {
    /// Create a new hyperlink.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            runs: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn runs(&self) -> &[RunId] {
        &self.runs
    }

    /// Serialize the hyperlink to XML.
    pub(crate) fn to_xml(
        &self,
        doc: &MutableDocument,
        rels: &RelationshipMapper,
        r_id: &str,
        xml: &mut String,
    ) -> Result<()> {
        write!(xml, r#"<w:hyperlink r:id="{}" w:history="1">"#, r_id)
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        for run in &self.runs {
            doc.run(*run)?.to_xml(doc, rels, xml)?;
        }
        xml.push_str("</w:hyperlink>");
        Ok(())
    }
}
