//! Unified error type for a conversion run.
//!
//! Lower layers keep their own error enums; everything that aborts a
//! conversion is funnelled into [`Error`] here.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
