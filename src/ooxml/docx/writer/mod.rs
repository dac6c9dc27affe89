//! Mutable document writer components for DOCX.
//!
//! This module provides the arena-backed writer API used to build Word
//! documents element by element.

pub mod doc;
pub mod hyperlink;
pub mod image;
pub mod numbering;
pub mod paragraph;
pub(crate) mod relmap;
pub mod run;
pub mod section;
pub mod style;
pub mod table;

// Re-export main document type
pub use doc::{BlockElement, MutableDocument};

// Re-export section types
pub use section::{PageOrientation, SectionProperties};

// Re-export hyperlink types
pub use hyperlink::MutableHyperlink;

// Re-export image types
pub use image::{ImageFormat, MutableInlineImage};

// Re-export paragraph types
pub use paragraph::{MutableParagraph, NumberingProperties};

// Re-export numbering types
pub use numbering::{ListType, Numbering};

// Re-export run types
pub use run::{MutableRun, RunContent, RunProperties};

// Re-export table types
pub use table::{
    CellMargins, CellProperties, MutableCell, MutableRow, MutableTable, TableBorder, TableBorders,
    TableWidth, VerticalMerge,
};

// Re-export style types
pub use style::{MutableStyle, StyleType, default_styles, generate_styles_xml};
