//! Typed arena indices.
//!
//! Every element the document model hands out is addressed by a small
//! copyable index into the arena that owns it. Keeping one newtype per
//! element kind means a run handle can never be passed where a cell is
//! expected.

macro_rules! arena_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(usize);

            impl $name {
                /// Wrap a raw arena position.
                #[inline]
                pub const fn new(index: usize) -> Self {
                    Self(index)
                }

                /// Raw arena position.
                #[inline]
                pub const fn index(self) -> usize {
                    self.0
                }
            }
        )*
    };
}

arena_id! {
    /// Handle to a paragraph.
    ParagraphId,
    /// Handle to a text run.
    RunId,
    /// Handle to a hyperlink container inside a paragraph.
    HyperlinkId,
    /// Handle to a table.
    TableId,
    /// Handle to a table row.
    RowId,
    /// Handle to a table cell.
    CellId,
    /// Handle to an embedded picture.
    ImageId,
    /// Handle to a numbering instance.
    ListId,
    /// Position of a node in a conversion's production log.
    NodeId,
}

/// Where a block (paragraph or table) is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// The document body.
    Body,
    /// A table cell.
    Cell(CellId),
}

/// What a run is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunHost {
    Paragraph(ParagraphId),
    Hyperlink(HyperlinkId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_their_index() {
        assert_eq!(ParagraphId::new(7).index(), 7);
        assert!(CellId::new(1) < CellId::new(2));
    }
}
