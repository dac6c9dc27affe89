//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;

impl From<crate::ooxml::error::OoxmlError> for Error {
    fn from(err: crate::ooxml::error::OoxmlError) -> Self {
        match err {
            crate::ooxml::error::OoxmlError::Io(e) => Error::Io(e),
            other => Error::Backend(other.to_string()),
        }
    }
}

impl From<crate::ooxml::opc::error::OpcError> for Error {
    fn from(err: crate::ooxml::opc::error::OpcError) -> Self {
        Error::from(crate::ooxml::error::OoxmlError::from(err))
    }
}

#[cfg(feature = "xhtml")]
impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Markup(err.to_string())
    }
}

#[cfg(feature = "xhtml")]
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Markup(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::error::OoxmlError;

    #[test]
    fn test_io_errors_stay_io() {
        let err = Error::from(OoxmlError::Io(std::io::Error::other("disk full")));
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_other_backend_errors_are_wrapped() {
        let err = Error::from(OoxmlError::Xml("bad".to_string()));
        assert!(matches!(err, Error::Backend(ref msg) if msg.contains("bad")));
    }
}
