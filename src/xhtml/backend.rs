//! The seam between the mapper and whatever builds the output document.
use crate::common::error::Result;
use crate::common::id::{
    CellId, Container, HyperlinkId, ListId, ParagraphId, RowId, RunHost, RunId, TableId,
};
use crate::ooxml::docx::format::ImageFormat;
use crate::ooxml::docx::writer::{
    CellMargins, ListType, SectionProperties, TableBorder, TableWidth, VerticalMerge,
};
use std::io::Write;

use super::style::RunFormat;

/// A decoded picture ready to be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    /// Image payload; empty for a placeholder
    pub data: Vec<u8>,
    pub format: ImageFormat,
    /// File name, used as the drawing's description
    pub name: String,
    pub width_emu: Option<i64>,
    pub height_emu: Option<i64>,
}

impl Picture {
    /// Whether this picture stands in for an image that could not be loaded.
    pub fn is_placeholder(&self) -> bool {
        self.data.is_empty()
    }
}

/// Operations the mapper needs from a document model.
///
/// Handles returned by `create_*` stay valid for the whole conversion.
/// Nothing may be written to the sink before [`end_document`], which must
/// serialize the complete document and write it in one piece.
///
/// [`end_document`]: DocumentBackend::end_document
pub trait DocumentBackend {
    /// Start a new, empty document with the given page setup.
    fn create_document(&mut self, page: &SectionProperties) -> Result<()>;

    fn create_paragraph(&mut self, container: Container) -> Result<ParagraphId>;
    fn set_paragraph_style(&mut self, paragraph: ParagraphId, style_id: &str) -> Result<()>;
    fn set_paragraph_list(&mut self, paragraph: ParagraphId, list: ListId, level: u32) -> Result<()>;
    /// Draw a horizontal rule under the paragraph.
    fn set_paragraph_rule(&mut self, paragraph: ParagraphId) -> Result<()>;
    fn create_list(&mut self, kind: ListType) -> Result<ListId>;

    fn create_run(&mut self, host: RunHost) -> Result<RunId>;
    fn set_run_format(&mut self, run: RunId, format: &RunFormat) -> Result<()>;
    fn set_run_text(&mut self, run: RunId, text: &str) -> Result<()>;
    fn add_run_break(&mut self, run: RunId) -> Result<()>;

    /// Open a hyperlink to an external target at the end of a paragraph.
    fn create_hyperlink(&mut self, paragraph: ParagraphId, url: &str) -> Result<HyperlinkId>;

    fn create_table(&mut self, container: Container) -> Result<TableId>;
    fn set_table_borders(&mut self, table: TableId, border: TableBorder) -> Result<()>;
    fn set_table_cell_margins(&mut self, table: TableId, margins: CellMargins) -> Result<()>;
    fn set_table_width(&mut self, table: TableId, width: TableWidth) -> Result<()>;
    /// Append a row at the end of the table.
    fn insert_row(&mut self, table: TableId) -> Result<RowId>;
    fn set_row_height(&mut self, row: RowId, twips: u32) -> Result<()>;
    /// Append a cell at the end of the row.
    fn create_cell(&mut self, row: RowId) -> Result<CellId>;
    fn set_cell_width(&mut self, cell: CellId, twips: u32) -> Result<()>;
    fn set_cell_column_span(&mut self, cell: CellId, span: u32) -> Result<()>;
    fn set_cell_vertical_merge(&mut self, cell: CellId, merge: VerticalMerge) -> Result<()>;
    /// Declare the table grid, one width in twips per column.
    fn set_table_grid(&mut self, table: TableId, columns: &[u32]) -> Result<()>;

    fn insert_picture(&mut self, run: RunId, picture: Picture) -> Result<()>;

    /// Page setup of the current document.
    fn page_setup(&self) -> SectionProperties;

    /// Serialize the document and write it to `sink`.
    fn end_document(&mut self, sink: &mut dyn Write) -> Result<()>;
}
