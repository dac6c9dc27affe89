//! What inline content each kind of node may receive.
use bitflags::bitflags;

bitflags! {
    /// Capability flags of a node.
    ///
    /// Fixed when the node is created; resolution searches for the nearest
    /// node carrying the flag a piece of content needs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        const TEXT = 1 << 0;
        const BOLD = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const STRIKE = 1 << 4;
        const BULLET = 1 << 5;
        const NUMBERING = 1 << 6;
        /// May hold paragraphs (and nested tables)
        const PARAGRAPHS = 1 << 7;

        const INLINE = Self::TEXT.bits()
            | Self::BOLD.bits()
            | Self::ITALIC.bits()
            | Self::UNDERLINE.bits()
            | Self::STRIKE.bits();
    }
}

/// Node kinds the mapper creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Paragraph,
    Table,
    Row,
    Cell,
    Hyperlink,
    Image,
}

impl NodeKind {
    /// The fixed capability set of this kind.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            NodeKind::Paragraph => Capabilities::INLINE
                .union(Capabilities::BULLET)
                .union(Capabilities::NUMBERING),
            NodeKind::Hyperlink => Capabilities::INLINE,
            NodeKind::Cell => Capabilities::PARAGRAPHS,
            NodeKind::Table | NodeKind::Row | NodeKind::Image => Capabilities::empty(),
        }
    }

    /// Structural nodes stop scoped resolution from reaching further out.
    pub const fn is_barrier(self) -> bool {
        matches!(self, NodeKind::Table | NodeKind::Row | NodeKind::Cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_sets() {
        assert!(NodeKind::Paragraph.capabilities().contains(Capabilities::TEXT | Capabilities::BULLET));
        assert!(NodeKind::Hyperlink.capabilities().contains(Capabilities::BOLD));
        assert!(!NodeKind::Hyperlink.capabilities().contains(Capabilities::NUMBERING));
        assert_eq!(NodeKind::Cell.capabilities(), Capabilities::PARAGRAPHS);
        assert!(NodeKind::Image.capabilities().is_empty());
        assert!(NodeKind::Row.is_barrier());
        assert!(!NodeKind::Hyperlink.is_barrier());
    }
}
