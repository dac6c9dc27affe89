/// Open Packaging Conventions (OPC) writing.
///
/// A DOCX file is a zip archive of parts tied together by relationships and
/// a content type map. This module assembles such a package in memory and
/// serializes it in one step.
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::{OpcPackage, Part};
pub use packuri::PackURI;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
