//! Relationship ids handed out while the package is assembled.
//!
//! Hyperlink and image relationships are created before `document.xml` is
//! written; the element writers look their `r:id` up here by handle.
use crate::common::id::{HyperlinkId, ImageId};

/// `r:id`s of hyperlinks and images, indexed like the document arenas.
#[derive(Debug, Default)]
pub struct RelationshipMapper {
    hyperlinks: Vec<String>,
    images: Vec<String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the relationship of the next hyperlink in arena order.
    pub fn push_hyperlink(&mut self, rel_id: String) {
        self.hyperlinks.push(rel_id);
    }

    /// Record the relationship of the next image in arena order.
    pub fn push_image(&mut self, rel_id: String) {
        self.images.push(rel_id);
    }

    pub fn hyperlink(&self, link: HyperlinkId) -> Option<&str> {
        self.hyperlinks.get(link.index()).map(String::as_str)
    }

    pub fn image(&self, image: ImageId) -> Option<&str> {
        self.images.get(image.index()).map(String::as_str)
    }
}
