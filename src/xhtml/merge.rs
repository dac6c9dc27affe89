//! Deferred vertical merges of one table.
//!
//! A cell with `rowspan > 1` owes a continuation cell at its grid column in
//! each row it covers below its own. Rows arrive one at a time, so the debt
//! is recorded here and paid when the row reaches that column.
use std::collections::BTreeMap;

use crate::common::id::CellId;

/// What a continuation needs to copy from the cell that started the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanOrigin {
    pub cell: CellId,
    pub column_span: u32,
    /// Explicit width in twips, if the origin declared one
    pub width: Option<u32>,
}

/// A rowspan still owing continuations at one grid column.
#[derive(Debug, Clone, Copy)]
struct ActiveSpan {
    origin: SpanOrigin,
    /// Last row covered, inclusive
    last_row: usize,
    /// Last row that got its continuation, or the origin's own row
    paid: usize,
}

impl ActiveSpan {
    fn owes(&self, row: usize) -> bool {
        self.paid < row && row <= self.last_row
    }
}

/// Open rowspans keyed by grid column.
///
/// Each span is stored once with the range of rows it still covers, so the
/// cost of a span does not depend on its declared height.
#[derive(Debug, Default)]
pub struct MergeTracker {
    spans: BTreeMap<usize, ActiveSpan>,
}

impl MergeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `origin` at `column` covers the rows `[row, row + row_span)`.
    ///
    /// The origin's own row is already satisfied. A column that still owes
    /// rows below `row` keeps its first origin, so registering twice is
    /// harmless.
    pub fn register_span(&mut self, row: usize, column: usize, origin: SpanOrigin, row_span: u32) {
        if row_span <= 1 {
            return;
        }
        let span = ActiveSpan {
            origin,
            last_row: row.saturating_add(row_span as usize - 1),
            paid: row,
        };
        match self.spans.get(&column) {
            Some(existing) if existing.last_row > row => {},
            _ => {
                self.spans.insert(column, span);
            },
        }
    }

    /// Whether a continuation is owed at this position.
    pub fn is_owed(&self, row: usize, column: usize) -> bool {
        self.spans.get(&column).is_some_and(|span| span.owes(row))
    }

    /// Take the debt at this position, if any.
    pub fn take(&mut self, row: usize, column: usize) -> Option<SpanOrigin> {
        if !self.is_owed(row, column) {
            return None;
        }
        let span = self.spans.get_mut(&column)?;
        span.paid = row;
        let origin = span.origin;
        if row >= span.last_row {
            self.spans.remove(&column);
        }
        Some(origin)
    }

    /// Take every debt of `row` at `column` or beyond, leftmost first, and
    /// forget anything the row left behind before `column`.
    pub fn take_rest_of_row(&mut self, row: usize, column: usize) -> Vec<(usize, SpanOrigin)> {
        let owed: Vec<usize> = self
            .spans
            .iter()
            .filter(|(_, span)| span.owes(row))
            .map(|(key, _)| *key)
            .collect();
        let mut rest = Vec::new();
        for key in owed {
            if key >= column {
                if let Some(origin) = self.take(row, key) {
                    rest.push((key, origin));
                }
            } else {
                log::debug!(
                    "row {} covered column {} owed to a merged cell; dropping the continuation",
                    row,
                    key
                );
                self.take(row, key);
            }
        }
        rest
    }

    /// Number of rowspans that still owe rows.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(index: usize) -> SpanOrigin {
        SpanOrigin {
            cell: CellId::new(index),
            column_span: 1,
            width: None,
        }
    }

    #[test]
    fn test_register_covers_rows_below() {
        let mut tracker = MergeTracker::new();
        tracker.register_span(0, 1, origin(0), 3);
        assert!(!tracker.is_owed(0, 1));
        assert!(tracker.is_owed(1, 1));
        assert!(tracker.is_owed(2, 1));
        assert!(!tracker.is_owed(3, 1));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut tracker = MergeTracker::new();
        tracker.register_span(0, 0, origin(0), 2);
        tracker.register_span(0, 0, origin(5), 2);
        assert_eq!(tracker.take(1, 0), Some(origin(0)));
        assert_eq!(tracker.take(1, 0), None);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_take_rest_of_row() {
        let mut tracker = MergeTracker::new();
        tracker.register_span(0, 0, origin(0), 2);
        tracker.register_span(0, 2, origin(1), 2);
        tracker.register_span(0, 4, origin(2), 3);

        let rest = tracker.take_rest_of_row(1, 1);
        assert_eq!(rest, vec![(2, origin(1)), (4, origin(2))]);
        // column 0 was skipped by the row and is forgotten
        assert!(!tracker.is_owed(1, 0));
        assert!(tracker.is_owed(2, 4));
    }

    #[test]
    fn test_tall_span_is_stored_once() {
        let mut tracker = MergeTracker::new();
        tracker.register_span(0, 3, origin(0), u32::MAX);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.is_owed(1, 3));
        assert!(tracker.is_owed(u32::MAX as usize - 1, 3));

        assert_eq!(tracker.take(1, 3), Some(origin(0)));
        assert!(!tracker.is_owed(1, 3));
        assert_eq!(tracker.take_rest_of_row(2, 0), vec![(3, origin(0))]);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_skipped_column_owes_next_row() {
        let mut tracker = MergeTracker::new();
        tracker.register_span(0, 0, origin(0), 3);
        assert!(tracker.take_rest_of_row(1, 2).is_empty());
        assert!(!tracker.is_owed(1, 0));
        assert_eq!(tracker.take(2, 0), Some(origin(0)));
        assert!(tracker.is_empty());
    }
}
