//! Common types and utilities shared across the converter.
//!
//! This module holds the pieces both the OOXML writer and the XHTML mapper
//! rely on: the unified error type, typed arena indices, unit conversion
//! and XML text helpers.

// Submodule declarations
pub mod error;
pub mod id;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use id::{
    CellId, Container, HyperlinkId, ImageId, ListId, NodeId, ParagraphId, RowId, RunHost, RunId,
    TableId,
};
