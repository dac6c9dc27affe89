//! Unified error type for Longan conversions.
use thiserror::Error;

/// Main error type for conversion operations.
///
/// Only fatal conditions surface here. Unparsable attribute values and
/// missing image files are recovered where they occur and logged instead.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while writing the finished document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input uses a construct the converter refuses to map
    #[error("Unsupported construct: {0}")]
    UnsupportedConstruct(String),

    /// The document backend failed to build or serialize the output
    #[error("Backend error: {0}")]
    Backend(String),

    /// Tokenizer rejected the input markup
    #[error("Markup error: {0}")]
    Markup(String),

    /// Event stream or backend call arrived in an impossible order
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
