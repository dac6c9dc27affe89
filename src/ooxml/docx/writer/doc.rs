/// Document writer implementation for DOCX.
use crate::common::id::{
    CellId, Container, HyperlinkId, ImageId, ListId, ParagraphId, RowId, RunHost, RunId, TableId,
};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, PackageWriter, Relationships};

use super::hyperlink::MutableHyperlink;
use super::image::MutableInlineImage;
use super::numbering::{ListType, Numbering};
use super::paragraph::{MutableParagraph, ParagraphElement};
use super::relmap::RelationshipMapper;
use super::run::MutableRun;
use super::section::SectionProperties;
use super::style::{default_styles, generate_styles_xml};
use super::table::{MutableCell, MutableRow, MutableTable};

/// A block-level element of the body or of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockElement {
    Paragraph(ParagraphId),
    Table(TableId),
}

macro_rules! arena_access {
    ($get:ident, $get_mut:ident, $field:ident, $id:ty, $ty:ty, $kind:literal) => {
        pub fn $get(&self, id: $id) -> Result<&$ty> {
            self.$field
                .get(id.index())
                .ok_or(OoxmlError::UnknownHandle {
                    kind: $kind,
                    index: id.index(),
                })
        }

        pub fn $get_mut(&mut self, id: $id) -> Result<&mut $ty> {
            self.$field
                .get_mut(id.index())
                .ok_or(OoxmlError::UnknownHandle {
                    kind: $kind,
                    index: id.index(),
                })
        }
    };
}

/// A mutable Word document for writing.
///
/// Elements live in per-kind arenas; the body and every cell hold ordered
/// lists of handles into them. Nothing is serialized until
/// [`MutableDocument::to_bytes`] or [`MutableDocument::save_to`] is called.
#[derive(Debug, Default)]
pub struct MutableDocument {
    paragraphs: Vec<MutableParagraph>,
    runs: Vec<MutableRun>,
    hyperlinks: Vec<MutableHyperlink>,
    tables: Vec<MutableTable>,
    rows: Vec<MutableRow>,
    cells: Vec<MutableCell>,
    images: Vec<MutableInlineImage>,
    /// Document body content in document order
    body: Vec<BlockElement>,
    numbering: Numbering,
    /// Section properties (page setup, margins, orientation)
    section: SectionProperties,
}

impl MutableDocument {
    /// Create a new empty mutable document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given page setup.
    pub fn with_section(section: SectionProperties) -> Self {
        Self {
            section,
            ..Self::default()
        }
    }

    /// Get a reference to the section properties.
    pub fn section(&self) -> &SectionProperties {
        &self.section
    }

    /// Get a mutable reference to the section properties.
    pub fn section_mut(&mut self) -> &mut SectionProperties {
        &mut self.section
    }

    arena_access!(paragraph, paragraph_mut, paragraphs, ParagraphId, MutableParagraph, "paragraph");
    arena_access!(run, run_mut, runs, RunId, MutableRun, "run");
    arena_access!(hyperlink, hyperlink_mut, hyperlinks, HyperlinkId, MutableHyperlink, "hyperlink");
    arena_access!(table, table_mut, tables, TableId, MutableTable, "table");
    arena_access!(row, row_mut, rows, RowId, MutableRow, "row");
    arena_access!(cell, cell_mut, cells, CellId, MutableCell, "cell");
    arena_access!(image, image_mut, images, ImageId, MutableInlineImage, "image");

    fn push_block(&mut self, container: Container, block: BlockElement) -> Result<()> {
        match container {
            Container::Body => self.body.push(block),
            Container::Cell(cell) => self.cell_mut(cell)?.content.push(block),
        }
        Ok(())
    }

    /// Append a new paragraph to the body or to a cell.
    pub fn add_paragraph(&mut self, container: Container) -> Result<ParagraphId> {
        let id = ParagraphId::new(self.paragraphs.len());
        self.push_block(container, BlockElement::Paragraph(id))?;
        self.paragraphs.push(MutableParagraph::new());
        Ok(id)
    }

    /// Append a new table to the body or to a cell.
    pub fn add_table(&mut self, container: Container) -> Result<TableId> {
        let id = TableId::new(self.tables.len());
        self.push_block(container, BlockElement::Table(id))?;
        self.tables.push(MutableTable::new());
        Ok(id)
    }

    /// Append a row at the end of a table.
    pub fn add_row(&mut self, table: TableId) -> Result<RowId> {
        let id = RowId::new(self.rows.len());
        self.table_mut(table)?.rows.push(id);
        self.rows.push(MutableRow::new());
        Ok(id)
    }

    /// Append a cell at the end of a row.
    pub fn add_cell(&mut self, row: RowId) -> Result<CellId> {
        let id = CellId::new(self.cells.len());
        self.row_mut(row)?.cells.push(id);
        self.cells.push(MutableCell::new());
        Ok(id)
    }

    /// Append a run to a paragraph or to a hyperlink.
    pub fn add_run(&mut self, host: RunHost) -> Result<RunId> {
        let id = RunId::new(self.runs.len());
        match host {
            RunHost::Paragraph(para) => self.paragraph_mut(para)?.elements.push(ParagraphElement::Run(id)),
            RunHost::Hyperlink(link) => self.hyperlink_mut(link)?.runs.push(id),
        }
        self.runs.push(MutableRun::new());
        Ok(id)
    }

    /// Append a hyperlink to an external URL to a paragraph.
    pub fn add_hyperlink(&mut self, paragraph: ParagraphId, url: &str) -> Result<HyperlinkId> {
        let id = HyperlinkId::new(self.hyperlinks.len());
        self.paragraph_mut(paragraph)?
            .elements
            .push(ParagraphElement::Hyperlink(id));
        self.hyperlinks.push(MutableHyperlink::new(url));
        Ok(id)
    }

    /// Place a picture at the end of a run.
    pub fn add_picture(&mut self, run: RunId, image: MutableInlineImage) -> Result<ImageId> {
        let id = ImageId::new(self.images.len());
        self.run_mut(run)?.add_drawing(id);
        self.images.push(image);
        Ok(id)
    }

    /// Create a new numbering instance.
    pub fn add_list(&mut self, list_type: ListType) -> ListId {
        self.numbering.add(list_type)
    }

    /// Attach a paragraph to a numbering instance at the given level.
    pub fn set_paragraph_list(&mut self, paragraph: ParagraphId, list: ListId, ilvl: u32) -> Result<()> {
        let num_id = self.numbering.num_id(list).ok_or(OoxmlError::UnknownHandle {
            kind: "list",
            index: list.index(),
        })?;
        self.paragraph_mut(paragraph)?.set_numbering(num_id, ilvl);
        Ok(())
    }

    /// Block elements of the body in document order.
    pub fn body(&self) -> &[BlockElement] {
        &self.body
    }

    /// Number of paragraphs anywhere in the document.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Number of tables anywhere in the document.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Generate document.xml with relationship IDs from the mapper.
    pub(crate) fn to_xml_with_rels(&self, rel_mapper: &RelationshipMapper) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#);
        xml.push_str("<w:body>");

        write_blocks(self, rel_mapper, &self.body, &mut xml)?;

        // The sectPr must be the last element in the body
        self.section.to_xml(&mut xml)?;

        xml.push_str("</w:body>");
        xml.push_str("</w:document>");
        Ok(xml)
    }

    /// Assemble the OPC package: document, styles, numbering and media parts.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let mut doc_rels = Relationships::new();
        let mut rel_mapper = RelationshipMapper::new();

        doc_rels.get_or_add(rt::STYLES, "styles.xml");
        if !self.numbering.is_empty() {
            doc_rels.get_or_add(rt::NUMBERING, "numbering.xml");
        }
        for link in &self.hyperlinks {
            rel_mapper.push_hyperlink(doc_rels.get_or_add_ext_rel(rt::HYPERLINK, link.url()));
        }
        let media_names: Vec<String> = self
            .images
            .iter()
            .enumerate()
            .map(|(index, image)| format!("media/image{}.{}", index + 1, image.format().extension()))
            .collect();
        for target in &media_names {
            rel_mapper.push_image(doc_rels.get_or_add(rt::IMAGE, target));
        }

        let document_xml = self.to_xml_with_rels(&rel_mapper)?;

        let mut package = OpcPackage::new();
        package
            .rels_mut()
            .get_or_add(rt::OFFICE_DOCUMENT, "word/document.xml");

        let part = package.add_part(
            "/word/document.xml",
            ct::WML_DOCUMENT_MAIN,
            document_xml.into_bytes(),
        )?;
        *part.rels_mut() = doc_rels;

        package.add_part(
            "/word/styles.xml",
            ct::WML_STYLES,
            generate_styles_xml(&default_styles())?.into_bytes(),
        )?;

        if !self.numbering.is_empty() {
            package.add_part(
                "/word/numbering.xml",
                ct::WML_NUMBERING,
                self.numbering.to_xml()?.into_bytes(),
            )?;
        }

        for (image, target) in self.images.iter().zip(&media_names) {
            package.add_part(
                &format!("/word/{}", target),
                image.format().mime_type(),
                image.data().to_vec(),
            )?;
        }

        Ok(package)
    }

    /// Serialize the document to .docx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(PackageWriter::to_bytes(&self.to_package()?)?)
    }

    /// Serialize the document and write it to a stream in one piece.
    pub fn save_to<W: std::io::Write>(&self, writer: W) -> Result<()> {
        PackageWriter::write_to_stream(writer, &self.to_package()?)?;
        Ok(())
    }
}

/// Write a sequence of blocks (body or cell content).
pub(crate) fn write_blocks(
    doc: &MutableDocument,
    rel_mapper: &RelationshipMapper,
    blocks: &[BlockElement],
    xml: &mut String,
) -> Result<()> {
    for block in blocks {
        match block {
            BlockElement::Paragraph(p) => doc.paragraph(*p)?.to_xml(doc, rel_mapper, xml)?,
            BlockElement::Table(t) => doc.table(*t)?.to_xml(doc, rel_mapper, xml)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::format::ImageFormat;
    use crate::ooxml::docx::writer::table::VerticalMerge;
    use std::io::{Cursor, Read};

    fn document_xml(doc: &MutableDocument) -> String {
        let bytes = doc.to_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_create_empty_document() {
        let doc = MutableDocument::new();
        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.table_count(), 0);
        assert!(document_xml(&doc).contains("<w:body><w:sectPr>"));
    }

    #[test]
    fn test_run_formatting() {
        let mut doc = MutableDocument::new();
        let para = doc.add_paragraph(Container::Body).unwrap();
        let bold = doc.add_run(RunHost::Paragraph(para)).unwrap();
        doc.run_mut(bold).unwrap().bold(true).set_text("Bold text");
        let italic = doc.add_run(RunHost::Paragraph(para)).unwrap();
        doc.run_mut(italic).unwrap().italic(true).set_text("Italic text");

        let xml = document_xml(&doc);
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("<w:i/>"));
        assert!(xml.find("Bold text").unwrap() < xml.find("Italic text").unwrap());
    }

    #[test]
    fn test_unknown_handles_are_errors() {
        let mut doc = MutableDocument::new();
        assert!(doc.add_paragraph(Container::Cell(CellId::new(3))).is_err());
        assert!(doc.add_run(RunHost::Paragraph(ParagraphId::new(0))).is_err());
        assert!(matches!(
            doc.set_paragraph_list(ParagraphId::new(0), ListId::new(0), 0),
            Err(OoxmlError::UnknownHandle { kind: "list", .. })
        ));
    }

    #[test]
    fn test_nested_table_in_cell() {
        let mut doc = MutableDocument::new();
        let outer = doc.add_table(Container::Body).unwrap();
        let row = doc.add_row(outer).unwrap();
        let cell = doc.add_cell(row).unwrap();
        let inner = doc.add_table(Container::Cell(cell)).unwrap();
        let inner_row = doc.add_row(inner).unwrap();
        doc.add_cell(inner_row).unwrap();

        let xml = document_xml(&doc);
        assert_eq!(xml.matches("<w:tbl>").count(), 2);
        // cells must end with a paragraph
        assert!(xml.contains("</w:tbl><w:p/></w:tc>"));
    }

    #[test]
    fn test_vertical_merge_and_grid() {
        let mut doc = MutableDocument::new();
        let table = doc.add_table(Container::Body).unwrap();
        doc.table_mut(table).unwrap().set_grid(vec![4000, 5000]);
        let row = doc.add_row(table).unwrap();
        let cell = doc.add_cell(row).unwrap();
        doc.cell_mut(cell)
            .unwrap()
            .set_vertical_merge(VerticalMerge::Restart);
        let row2 = doc.add_row(table).unwrap();
        let cont = doc.add_cell(row2).unwrap();
        doc.cell_mut(cont)
            .unwrap()
            .set_vertical_merge(VerticalMerge::Continue);

        let xml = document_xml(&doc);
        assert!(xml.contains(r#"<w:tblGrid><w:gridCol w:w="4000"/><w:gridCol w:w="5000"/></w:tblGrid>"#));
        assert!(xml.contains(r#"<w:vMerge w:val="restart"/>"#));
        assert!(xml.contains("<w:tcPr><w:vMerge/></w:tcPr>"));
    }

    #[test]
    fn test_package_parts_and_relationships() {
        let mut doc = MutableDocument::new();
        let para = doc.add_paragraph(Container::Body).unwrap();
        let link = doc.add_hyperlink(para, "https://example.com").unwrap();
        let run = doc.add_run(RunHost::Hyperlink(link)).unwrap();
        doc.run_mut(run).unwrap().set_text("site");
        let pic_run = doc.add_run(RunHost::Paragraph(para)).unwrap();
        doc.add_picture(
            pic_run,
            MutableInlineImage::new(vec![1, 2, 3], ImageFormat::Gif, None, None),
        )
        .unwrap();
        let list = doc.add_list(ListType::Decimal);
        doc.set_paragraph_list(para, list, 0).unwrap();

        let package = doc.to_package().unwrap();
        let names: Vec<&str> = package
            .iter_parts()
            .map(|part| part.partname().as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "/word/document.xml",
                "/word/styles.xml",
                "/word/numbering.xml",
                "/word/media/image1.gif"
            ]
        );

        let rels = package.iter_parts().next().unwrap().rels();
        assert!(rels
            .iter()
            .any(|rel| rel.is_external() && rel.target_ref() == "https://example.com"));
        assert!(rels.iter().any(|rel| rel.target_ref() == "media/image1.gif"));

        let xml = document_xml(&doc);
        assert!(xml.contains("<w:hyperlink r:id=\"rId"));
        assert!(xml.contains("<a:blip r:embed=\"rId"));
    }
}
