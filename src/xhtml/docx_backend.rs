//! [`DocumentBackend`] implementation writing a `.docx` package.
use crate::common::error::Result;
use crate::common::id::{
    CellId, Container, HyperlinkId, ListId, ParagraphId, RowId, RunHost, RunId, TableId,
};
use crate::ooxml::docx::format::{TableBorderStyle, UnderlineStyle};
use crate::ooxml::docx::writer::{
    CellMargins, ListType, MutableDocument, MutableInlineImage, SectionProperties, TableBorder,
    TableWidth, VerticalMerge,
};
use std::io::Write;

use super::backend::{DocumentBackend, Picture};
use super::style::RunFormat;

/// Builds a [`MutableDocument`] and serializes it as an OOXML package.
#[derive(Debug, Default)]
pub struct DocxBackend {
    document: MutableDocument,
}

impl DocxBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document built so far.
    pub fn document(&self) -> &MutableDocument {
        &self.document
    }

    pub fn into_document(self) -> MutableDocument {
        self.document
    }
}

impl DocumentBackend for DocxBackend {
    fn create_document(&mut self, page: &SectionProperties) -> Result<()> {
        self.document = MutableDocument::with_section(page.clone());
        Ok(())
    }

    fn create_paragraph(&mut self, container: Container) -> Result<ParagraphId> {
        Ok(self.document.add_paragraph(container)?)
    }

    fn set_paragraph_style(&mut self, paragraph: ParagraphId, style_id: &str) -> Result<()> {
        self.document.paragraph_mut(paragraph)?.set_style(style_id);
        Ok(())
    }

    fn set_paragraph_list(&mut self, paragraph: ParagraphId, list: ListId, level: u32) -> Result<()> {
        Ok(self.document.set_paragraph_list(paragraph, list, level)?)
    }

    fn set_paragraph_rule(&mut self, paragraph: ParagraphId) -> Result<()> {
        self.document
            .paragraph_mut(paragraph)?
            .set_bottom_border(TableBorder {
                style: TableBorderStyle::Single,
                size: 6,
                color: "auto".to_string(),
            });
        Ok(())
    }

    fn create_list(&mut self, kind: ListType) -> Result<ListId> {
        Ok(self.document.add_list(kind))
    }

    fn create_run(&mut self, host: RunHost) -> Result<RunId> {
        Ok(self.document.add_run(host)?)
    }

    fn set_run_format(&mut self, run: RunId, format: &RunFormat) -> Result<()> {
        let run = self.document.run_mut(run)?;
        if format.bold {
            run.bold(true);
        }
        if format.italic {
            run.italic(true);
        }
        if format.underline {
            run.underline(UnderlineStyle::Single);
        }
        if format.strike {
            run.strike(true);
        }
        if let Some(ref color) = format.color {
            run.color(color);
        }
        if let Some(ref highlight) = format.highlight {
            run.highlight(highlight);
        }
        Ok(())
    }

    fn set_run_text(&mut self, run: RunId, text: &str) -> Result<()> {
        self.document.run_mut(run)?.set_text(text);
        Ok(())
    }

    fn add_run_break(&mut self, run: RunId) -> Result<()> {
        self.document.run_mut(run)?.add_break();
        Ok(())
    }

    fn create_hyperlink(&mut self, paragraph: ParagraphId, url: &str) -> Result<HyperlinkId> {
        Ok(self.document.add_hyperlink(paragraph, url)?)
    }

    fn create_table(&mut self, container: Container) -> Result<TableId> {
        Ok(self.document.add_table(container)?)
    }

    fn set_table_borders(&mut self, table: TableId, border: TableBorder) -> Result<()> {
        self.document.table_mut(table)?.set_borders(border);
        Ok(())
    }

    fn set_table_cell_margins(&mut self, table: TableId, margins: CellMargins) -> Result<()> {
        self.document.table_mut(table)?.set_cell_margins(margins);
        Ok(())
    }

    fn set_table_width(&mut self, table: TableId, width: TableWidth) -> Result<()> {
        self.document.table_mut(table)?.set_width(width);
        Ok(())
    }

    fn insert_row(&mut self, table: TableId) -> Result<RowId> {
        Ok(self.document.add_row(table)?)
    }

    fn set_row_height(&mut self, row: RowId, twips: u32) -> Result<()> {
        self.document.row_mut(row)?.set_height(twips);
        Ok(())
    }

    fn create_cell(&mut self, row: RowId) -> Result<CellId> {
        Ok(self.document.add_cell(row)?)
    }

    fn set_cell_width(&mut self, cell: CellId, twips: u32) -> Result<()> {
        self.document.cell_mut(cell)?.set_width_dxa(twips);
        Ok(())
    }

    fn set_cell_column_span(&mut self, cell: CellId, span: u32) -> Result<()> {
        self.document.cell_mut(cell)?.set_grid_span(span);
        Ok(())
    }

    fn set_cell_vertical_merge(&mut self, cell: CellId, merge: VerticalMerge) -> Result<()> {
        self.document.cell_mut(cell)?.set_vertical_merge(merge);
        Ok(())
    }

    fn set_table_grid(&mut self, table: TableId, columns: &[u32]) -> Result<()> {
        self.document.table_mut(table)?.set_grid(columns.to_vec());
        Ok(())
    }

    fn insert_picture(&mut self, run: RunId, picture: Picture) -> Result<()> {
        let mut image = MutableInlineImage::new(
            picture.data,
            picture.format,
            picture.width_emu,
            picture.height_emu,
        );
        image.set_description(picture.name);
        self.document.add_picture(run, image)?;
        Ok(())
    }

    fn page_setup(&self) -> SectionProperties {
        self.document.section().clone()
    }

    fn end_document(&mut self, sink: &mut dyn Write) -> Result<()> {
        let bytes = self.document.to_bytes()?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::format::ImageFormat;

    #[test]
    fn test_backend_builds_document() {
        let mut backend = DocxBackend::new();
        backend
            .create_document(&SectionProperties::default().landscape())
            .unwrap();
        let para = backend.create_paragraph(Container::Body).unwrap();
        let run = backend.create_run(RunHost::Paragraph(para)).unwrap();
        backend
            .set_run_format(
                run,
                &RunFormat {
                    bold: true,
                    color: Some("aabbcc".to_string()),
                    ..RunFormat::default()
                },
            )
            .unwrap();
        backend.set_run_text(run, "Hi").unwrap();
        backend
            .insert_picture(
                run,
                Picture {
                    data: Vec::new(),
                    format: ImageFormat::Png,
                    name: "x.png".to_string(),
                    width_emu: None,
                    height_emu: None,
                },
            )
            .unwrap();

        let doc = backend.document();
        let props = doc.run(run).unwrap().properties();
        assert_eq!(props.bold, Some(true));
        assert_eq!(props.color.as_deref(), Some("aabbcc"));
        assert_eq!(doc.image(crate::common::id::ImageId::new(0)).unwrap().description(), "x.png");
        assert!(backend.page_setup().page_width > backend.page_setup().page_height);

        let mut out = Vec::new();
        backend.end_document(&mut out).unwrap();
        assert_eq!(&out[..2], b"PK");
    }

    #[test]
    fn test_unknown_handles_fail() {
        let mut backend = DocxBackend::new();
        assert!(backend.create_cell(RowId::new(4)).is_err());
        assert!(backend.set_run_text(RunId::new(0), "x").is_err());
    }
}
