//! XHTML to WordprocessingML conversion.
//!
//! The conversion is a single forward pass over markup events:
//!
//! 1. **Tokenizer** (`reader`): quick-xml backed, turns XHTML text into
//!    [`Event`]s (feature `xhtml`)
//! 2. **Dispatcher** (`dispatcher`): maps each event onto document
//!    operations, keeping only the frames of currently open elements and an
//!    append-only log of created nodes
//! 3. **Backend** (`backend`, `docx_backend`): the document operations
//!    themselves, implemented over the arena-backed DOCX writer
//!
//! Tables are the one place where work is deferred: row spans are tracked as
//! owed continuation cells and the column grid is computed when the table
//! closes.
//!
//! # Example
//!
//! ```
//! use longan::xhtml::{ConversionOptions, convert_xhtml};
//!
//! let mut docx = Vec::new();
//! convert_xhtml("<p>Hello <b>World</b></p>", &mut docx, &ConversionOptions::default())?;
//! assert_eq!(&docx[..2], b"PK");
//! # Ok::<(), longan::Error>(())
//! ```
pub mod backend;
pub mod capability;
pub mod config;
pub mod dispatcher;
pub mod docx_backend;
pub mod entities;
pub mod event;
pub mod grid;
pub mod image;
pub mod merge;
pub mod node;
#[cfg(feature = "xhtml")]
pub mod reader;
pub mod style;
pub mod tags;

pub use backend::{DocumentBackend, Picture};
pub use config::{ConversionOptions, PageMargins, Resolution};
pub use dispatcher::Dispatcher;
pub use docx_backend::DocxBackend;
pub use event::{Attributes, Event};
#[cfg(feature = "xhtml")]
pub use reader::XhtmlReader;
pub use style::RunFormat;

use crate::common::error::Result;
use std::io::Write;

/// Convert a stream of markup events into a `.docx` package written to `sink`.
pub fn convert<I, W>(events: I, sink: W, options: &ConversionOptions) -> Result<()>
where
    I: IntoIterator<Item = Event>,
    W: Write,
{
    let mut backend = DocxBackend::new();
    convert_with_backend(events, &mut backend, sink, options)
}

/// Like [`convert`], but driving a caller supplied backend.
pub fn convert_with_backend<I, B, W>(
    events: I,
    backend: &mut B,
    mut sink: W,
    options: &ConversionOptions,
) -> Result<()>
where
    I: IntoIterator<Item = Event>,
    B: DocumentBackend,
    W: Write,
{
    run(events.into_iter().map(Ok), backend, &mut sink, options)
}

/// Tokenize an XHTML string and convert it.
#[cfg(feature = "xhtml")]
pub fn convert_xhtml<W: Write>(xhtml: &str, sink: W, options: &ConversionOptions) -> Result<()> {
    convert_reader(xhtml.as_bytes(), sink, options)
}

/// Tokenize XHTML from a buffered reader and convert it.
///
/// Markup errors abort the conversion; nothing is written to `sink` then.
#[cfg(feature = "xhtml")]
pub fn convert_reader<R, W>(source: R, mut sink: W, options: &ConversionOptions) -> Result<()>
where
    R: std::io::BufRead,
    W: Write,
{
    let mut backend = DocxBackend::new();
    run(XhtmlReader::new(source), &mut backend, &mut sink, options)
}

fn run<I, B>(events: I, backend: &mut B, sink: &mut dyn Write, options: &ConversionOptions) -> Result<()>
where
    I: Iterator<Item = Result<Event>>,
    B: DocumentBackend,
{
    let mut dispatcher = Dispatcher::new(backend, options)?;
    for event in events {
        dispatcher.dispatch(event?)?;
    }
    log::debug!(
        "dispatched markup into {} nodes",
        dispatcher.production_log().len()
    );
    dispatcher.on_document_end(sink)
}
