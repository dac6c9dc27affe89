//! Longan - streaming XHTML to Word (.docx) conversion
//!
//! Longan reads XHTML once, front to back, and maps every element onto
//! WordprocessingML as it goes. No tree of the input is ever built: the
//! converter keeps the frames of currently open elements plus an
//! append-only log of the output nodes it has created.
//!
//! # Features
//!
//! - **Streaming**: one forward pass over markup events
//! - **Tables**: row and column spans are reconciled into `gridSpan` and
//!   `vMerge`, and the column grid is computed when a table closes
//! - **Lists**: bullet prefixes for `ul`, Word numbering for `ol`, one
//!   fresh numbering instance per list
//! - **Images**: local files and `data:` URIs are embedded inline
//! - **Pluggable output**: conversion drives a [`DocumentBackend`] trait;
//!   [`DocxBackend`] writes a `.docx` package
//!
//! # Example - Converting a string
//!
//! ```
//! use longan::{ConversionOptions, convert_xhtml};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut docx = Vec::new();
//! convert_xhtml(
//!     "<h1>Title</h1><p>Hello <strong>World</strong></p>",
//!     &mut docx,
//!     &ConversionOptions::default(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Feeding events
//!
//! ```
//! use longan::xhtml::{ConversionOptions, Event, Resolution};
//! use longan::ooxml::docx::writer::PageOrientation;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ConversionOptions::new()
//!     .with_orientation(PageOrientation::Landscape)
//!     .with_resolution(Resolution::LogScan);
//! let events = vec![Event::start("p"), Event::text("x"), Event::end("p")];
//! let mut file = std::fs::File::create(std::env::temp_dir().join("longan-doc.docx"))?;
//! longan::convert(events, &mut file, &options)?;
//! # Ok(())
//! # }
//! ```

/// Shared error type, typed ids, units and XML text helpers
pub mod common;

/// OOXML (Office Open XML) output
///
/// The OPC packaging layer and the arena-backed WordprocessingML writer.
pub mod ooxml;

/// XHTML event mapping
///
/// Tokenizer, dispatcher and document backends.
pub mod xhtml;

pub use common::{Error, Result};
pub use xhtml::{
    ConversionOptions, DocumentBackend, DocxBackend, Event, Resolution, convert,
    convert_with_backend,
};
#[cfg(feature = "xhtml")]
pub use xhtml::{convert_reader, convert_xhtml};
