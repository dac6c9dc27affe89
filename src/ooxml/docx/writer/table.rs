/// Table types and implementation for DOCX documents.
use crate::common::id::{CellId, RowId};
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

// Import shared format types
pub use super::super::format::TableBorderStyle;
use super::MutableDocument;
use super::doc::{BlockElement, write_blocks};
use super::relmap::RelationshipMapper;

/// Border definition for table, cell or paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBorder {
    /// Border style
    pub style: TableBorderStyle,
    /// Border width in eighths of a point (e.g., 8 = 1pt, 24 = 3pt)
    pub size: u32,
    /// Border color in hex RGB format (e.g., "FF0000" for red)
    pub color: String,
}

impl Default for TableBorder {
    fn default() -> Self {
        Self {
            style: TableBorderStyle::Single,
            size: 4,
            color: "000000".to_string(),
        }
    }
}

impl TableBorder {
    /// A border that draws nothing.
    pub fn none() -> Self {
        Self {
            style: TableBorderStyle::None,
            size: 0,
            color: "auto".to_string(),
        }
    }

    pub(crate) fn to_xml(&self, xml: &mut String, name: &str) -> Result<()> {
        write!(
            xml,
            "<w:{} w:val=\"{}\" w:sz=\"{}\" w:space=\"0\" w:color=\"{}\"/>",
            name,
            self.style.as_str(),
            self.size,
            escape_xml(&self.color)
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))
    }
}

/// Table borders (all sides).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBorders {
    pub top: Option<TableBorder>,
    pub left: Option<TableBorder>,
    pub bottom: Option<TableBorder>,
    pub right: Option<TableBorder>,
    pub inside_h: Option<TableBorder>,
    pub inside_v: Option<TableBorder>,
}

impl TableBorders {
    /// The same border on every edge and every inner line.
    pub fn all(border: TableBorder) -> Self {
        Self {
            top: Some(border.clone()),
            left: Some(border.clone()),
            bottom: Some(border.clone()),
            right: Some(border.clone()),
            inside_h: Some(border.clone()),
            inside_v: Some(border),
        }
    }
}

/// Preferred table width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableWidth {
    /// Let Word size the table from its grid
    #[default]
    Auto,
    /// Fiftieths of a percent of the text area (5000 = 100%)
    Pct(u32),
    /// Twips
    Dxa(u32),
}

/// Default cell margins of a table, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellMargins {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl CellMargins {
    /// The same margin on every side.
    pub fn uniform(twips: u32) -> Self {
        Self {
            top: twips,
            left: twips,
            bottom: twips,
            right: twips,
        }
    }
}

/// Vertical merge role of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMerge {
    /// First cell of a vertically merged range
    Restart,
    /// Cell covered by the range started above
    Continue,
}

/// Table properties.
#[derive(Debug, Default, Clone)]
pub(crate) struct TableProperties {
    pub(crate) borders: TableBorders,
    pub(crate) width: TableWidth,
    pub(crate) cell_margins: Option<CellMargins>,
}

/// Cell properties.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CellProperties {
    /// Cell background color in hex RGB format
    pub background_color: Option<String>,
    /// Cell width in DXA units (twentieth of a point)
    pub width_dxa: Option<u32>,
    /// Number of grid columns the cell spans
    pub grid_span: Option<u32>,
    /// Vertical merge role
    pub v_merge: Option<VerticalMerge>,
}

/// A mutable table.
#[derive(Debug, Default)]
pub struct MutableTable {
    /// Table rows
    pub(crate) rows: Vec<RowId>,
    /// Grid column widths in twips (0 = unspecified)
    pub(crate) grid: Vec<u32>,
    /// Table properties
    pub(crate) properties: TableProperties,
}

impl MutableTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the preferred table width.
    pub fn set_width(&mut self, width: TableWidth) {
        self.properties.width = width;
    }

    pub fn width(&self) -> TableWidth {
        self.properties.width
    }

    /// Set all table borders at once.
    pub fn set_borders(&mut self, border: TableBorder) {
        self.properties.borders = TableBorders::all(border);
    }

    pub fn borders(&self) -> &TableBorders {
        &self.properties.borders
    }

    /// Set the default margins of every cell.
    pub fn set_cell_margins(&mut self, margins: CellMargins) {
        self.properties.cell_margins = Some(margins);
    }

    pub fn cell_margins(&self) -> Option<CellMargins> {
        self.properties.cell_margins
    }

    /// Declare the grid column widths in twips.
    pub fn set_grid(&mut self, widths: Vec<u32>) {
        self.grid = widths;
    }

    pub fn grid(&self) -> &[u32] {
        &self.grid
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[RowId] {
        &self.rows
    }

    pub(crate) fn to_xml(
        &self,
        doc: &MutableDocument,
        rels: &RelationshipMapper,
        xml: &mut String,
    ) -> Result<()> {
        xml.push_str("<w:tbl>");

        // Write table properties
        xml.push_str("<w:tblPr>");

        match self.properties.width {
            TableWidth::Auto => xml.push_str("<w:tblW w:w=\"0\" w:type=\"auto\"/>"),
            TableWidth::Pct(width) => {
                write!(xml, "<w:tblW w:w=\"{}\" w:type=\"pct\"/>", width)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            },
            TableWidth::Dxa(width) => {
                write!(xml, "<w:tblW w:w=\"{}\" w:type=\"dxa\"/>", width)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            },
        }

        // Table borders; unset sides get a thin black line
        let default_border = TableBorder::default();
        let borders = &self.properties.borders;
        xml.push_str("<w:tblBorders>");
        for (name, border) in [
            ("top", &borders.top),
            ("left", &borders.left),
            ("bottom", &borders.bottom),
            ("right", &borders.right),
            ("insideH", &borders.inside_h),
            ("insideV", &borders.inside_v),
        ] {
            border
                .as_ref()
                .unwrap_or(&default_border)
                .to_xml(xml, name)?;
        }
        xml.push_str("</w:tblBorders>");

        if let Some(margins) = self.properties.cell_margins {
            write!(
                xml,
                "<w:tblCellMar><w:top w:w=\"{}\" w:type=\"dxa\"/><w:left w:w=\"{}\" w:type=\"dxa\"/>\
                 <w:bottom w:w=\"{}\" w:type=\"dxa\"/><w:right w:w=\"{}\" w:type=\"dxa\"/></w:tblCellMar>",
                margins.top, margins.left, margins.bottom, margins.right
            )
            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }

        xml.push_str("</w:tblPr>");

        // Write grid; fall back to the widest row when no grid was declared
        xml.push_str("<w:tblGrid>");
        if self.grid.is_empty() {
            let mut columns = 0;
            for row in &self.rows {
                columns = columns.max(doc.row(*row)?.grid_width(doc)?);
            }
            for _ in 0..columns {
                xml.push_str("<w:gridCol/>");
            }
        } else {
            for width in &self.grid {
                if *width == 0 {
                    xml.push_str("<w:gridCol/>");
                } else {
                    write!(xml, "<w:gridCol w:w=\"{}\"/>", width)
                        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                }
            }
        }
        xml.push_str("</w:tblGrid>");

        for row in &self.rows {
            doc.row(*row)?.to_xml(doc, rels, xml)?;
        }

        xml.push_str("</w:tbl>");

        Ok(())
    }
}

/// A mutable table row.
#[derive(Debug, Default)]
pub struct MutableRow {
    /// Table cells in this row
    pub(crate) cells: Vec<CellId>,
    /// Minimum row height in twips
    pub(crate) height: Option<u32>,
}

impl MutableRow {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the minimum row height in twips.
    pub fn set_height(&mut self, twips: u32) {
        self.height = Some(twips);
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Number of grid columns this row covers (sum of the cells' spans).
    pub fn grid_width(&self, doc: &MutableDocument) -> Result<usize> {
        let mut width = 0;
        for cell in &self.cells {
            width += doc.cell(*cell)?.properties.grid_span.unwrap_or(1).max(1) as usize;
        }
        Ok(width)
    }

    pub(crate) fn to_xml(
        &self,
        doc: &MutableDocument,
        rels: &RelationshipMapper,
        xml: &mut String,
    ) -> Result<()> {
        xml.push_str("<w:tr>");

        if let Some(height) = self.height {
            write!(xml, "<w:trPr><w:trHeight w:val=\"{}\"/></w:trPr>", height)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }

        for cell in &self.cells {
            doc.cell(*cell)?.to_xml(doc, rels, xml)?;
        }

        xml.push_str("</w:tr>");

        Ok(())
    }
}

/// A mutable table cell.
#[derive(Debug, Default)]
pub struct MutableCell {
    /// Paragraphs and nested tables in this cell
    pub(crate) content: Vec<BlockElement>,
    /// Cell properties
    pub(crate) properties: CellProperties,
}

impl MutableCell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set cell background color in hex RGB format (e.g., "FFFF00" for yellow).
    pub fn set_background_color(&mut self, color: &str) {
        self.properties.background_color = Some(color.to_string());
    }

    /// Set cell width in DXA units (twentieth of a point).
    pub fn set_width_dxa(&mut self, width: u32) {
        self.properties.width_dxa = Some(width);
    }

    /// Set the number of grid columns the cell spans.
    pub fn set_grid_span(&mut self, span: u32) {
        self.properties.grid_span = Some(span.max(1));
    }

    /// Set the vertical merge role of the cell.
    pub fn set_vertical_merge(&mut self, merge: VerticalMerge) {
        self.properties.v_merge = Some(merge);
    }

    pub fn properties(&self) -> &CellProperties {
        &self.properties
    }

    /// Number of paragraphs and tables directly inside the cell.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }

    pub(crate) fn to_xml(
        &self,
        doc: &MutableDocument,
        rels: &RelationshipMapper,
        xml: &mut String,
    ) -> Result<()> {
        xml.push_str("<w:tc>");

        let props = &self.properties;
        if props.width_dxa.is_some()
            || props.grid_span.is_some()
            || props.v_merge.is_some()
            || props.background_color.is_some()
        {
            xml.push_str("<w:tcPr>");

            if let Some(width) = props.width_dxa {
                write!(xml, "<w:tcW w:w=\"{}\" w:type=\"dxa\"/>", width)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            if let Some(span) = props.grid_span.filter(|span| *span > 1) {
                write!(xml, "<w:gridSpan w:val=\"{}\"/>", span)
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            match props.v_merge {
                Some(VerticalMerge::Restart) => xml.push_str("<w:vMerge w:val=\"restart\"/>"),
                Some(VerticalMerge::Continue) => xml.push_str("<w:vMerge/>"),
                None => {},
            }

            if let Some(ref bg_color) = props.background_color {
                write!(
                    xml,
                    "<w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/>",
                    escape_xml(bg_color)
                )
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            }

            xml.push_str("</w:tcPr>");
        }

        write_blocks(doc, rels, &self.content, xml)?;

        // A cell must end with a paragraph
        if !matches!(self.content.last(), Some(BlockElement::Paragraph(_))) {
            xml.push_str("<w:p/>");
        }

        xml.push_str("</w:tc>");

        Ok(())
    }
}
