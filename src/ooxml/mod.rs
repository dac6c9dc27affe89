//! Office Open XML (OOXML) output.
//!
//! The converter produces WordprocessingML packages. The module is layered:
//!
//! 1. **OPC Layer** (`opc`): parts, relationships, content types, zip output
//! 2. **Error** (`error`): error type shared by the OOXML layers
//! 3. **Word** (`docx`): the mutable document model and its XML writers
pub mod docx;
pub mod error;
pub mod opc;

pub use error::{OoxmlError, Result};
pub use opc::{OpcPackage, PackURI};
