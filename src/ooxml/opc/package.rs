/// In-memory OPC package assembled before it is written out.
///
/// Parts are kept in insertion order; each part carries its own
/// relationships, and the package carries the package-level ones.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use crate::ooxml::opc::rel::Relationships;

/// A single part: its name, content type, payload and outgoing relationships.
#[derive(Debug)]
pub struct Part {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl Part {
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// Package under construction.
#[derive(Debug, Default)]
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, in the order they were added
    parts: Vec<Part>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part.
    ///
    /// Fails if the partname is malformed, reserved, or already present.
    pub fn add_part(
        &mut self,
        partname: &str,
        content_type: &str,
        blob: Vec<u8>,
    ) -> Result<&mut Part> {
        let partname = PackURI::new(partname).map_err(OpcError::InvalidPartName)?;
        if partname.as_str() == CONTENT_TYPES_URI || partname.filename().ends_with(".rels") {
            return Err(OpcError::InvalidPartName(format!(
                "'{}' is reserved for package metadata",
                partname
            )));
        }
        if self.parts.iter().any(|part| part.partname == partname) {
            return Err(OpcError::DuplicatePart(partname.to_string()));
        }

        self.parts.push(Part {
            partname,
            content_type: content_type.to_string(),
            blob,
            rels: Relationships::new(),
        });
        let last = self.parts.len() - 1;
        Ok(&mut self.parts[last])
    }

    /// Package-level relationships (`/_rels/.rels`).
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Iterate over parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }
}
