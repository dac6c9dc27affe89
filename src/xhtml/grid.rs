//! Table grid reconciliation.
//!
//! Markup tables never declare their columns. Once a table is closed the
//! grid is derived from the widest row, and every cell without an explicit
//! width gets an equal share of the table width.
use crate::common::id::CellId;

/// A cell as it was laid out in its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    pub cell: CellId,
    pub column_span: u32,
    /// Explicit width in twips
    pub width: Option<u32>,
}

/// Grid columns and the widths to assign to unsized cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridPlan {
    /// One width in twips per grid column
    pub columns: Vec<u32>,
    /// Cells that had no explicit width, with their computed width
    pub cell_widths: Vec<(CellId, u32)>,
}

impl GridPlan {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Number of grid columns a row covers.
pub fn row_span_width(row: &[CellLayout]) -> usize {
    row.iter().map(|cell| cell.column_span.max(1) as usize).sum()
}

/// Compute the grid of a finished table.
///
/// The column count is the widest row's summed column spans. Columns share
/// `table_width` equally, the remainder going to the leftmost columns so
/// the widths add up exactly. The result depends only on the inputs, so
/// applying it twice leaves the table as applying it once.
pub fn finalize_grid(rows: &[Vec<CellLayout>], table_width: u32) -> GridPlan {
    let count = rows.iter().map(|row| row_span_width(row)).max().unwrap_or(0);
    if count == 0 {
        return GridPlan::default();
    }

    let base = table_width / count as u32;
    let remainder = (table_width % count as u32) as usize;
    let columns: Vec<u32> = (0..count)
        .map(|index| base + u32::from(index < remainder))
        .collect();

    let mut cell_widths = Vec::new();
    for row in rows {
        let mut position = 0;
        for cell in row {
            let span = cell.column_span.max(1) as usize;
            if cell.width.is_none() {
                let end = (position + span).min(count);
                let width = columns[position.min(count)..end].iter().sum::<u32>();
                cell_widths.push((cell.cell, width));
            }
            position += span;
        }
    }

    GridPlan {
        columns,
        cell_widths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(index: usize, span: u32, width: Option<u32>) -> CellLayout {
        CellLayout {
            cell: CellId::new(index),
            column_span: span,
            width,
        }
    }

    #[test]
    fn test_widest_row_sets_column_count() {
        let rows = vec![
            vec![cell(0, 2, None), cell(1, 1, None)],
            vec![cell(2, 1, None)],
        ];
        let plan = finalize_grid(&rows, 9000);
        assert_eq!(plan.columns, vec![3000, 3000, 3000]);
        assert_eq!(
            plan.cell_widths,
            vec![
                (CellId::new(0), 6000),
                (CellId::new(1), 3000),
                (CellId::new(2), 3000)
            ]
        );
    }

    #[test]
    fn test_explicit_widths_are_kept() {
        let rows = vec![vec![cell(0, 1, Some(1200)), cell(1, 1, None)]];
        let plan = finalize_grid(&rows, 1000);
        assert_eq!(plan.columns, vec![500, 500]);
        assert_eq!(plan.cell_widths, vec![(CellId::new(1), 500)]);
    }

    #[test]
    fn test_remainder_goes_left() {
        let rows = vec![vec![cell(0, 1, None), cell(1, 1, None), cell(2, 1, None)]];
        let plan = finalize_grid(&rows, 1000);
        assert_eq!(plan.columns, vec![334, 333, 333]);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(finalize_grid(&[], 9000), GridPlan::default());
        assert_eq!(finalize_grid(&[vec![]], 9000).column_count(), 0);
    }
}
