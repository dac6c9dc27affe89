//! Word (.docx) document writing.
//!
//! [`writer::MutableDocument`] is an arena-backed document model. Every
//! paragraph, run, table, row and cell lives in a flat arena and is addressed
//! by a typed id, so content can be appended to any open container in any
//! order and the tree is only walked once, when the package is serialized.
pub mod format;
pub mod writer;

pub use format::{ImageFormat, TableBorderStyle, UnderlineStyle};
pub use writer::MutableDocument;
