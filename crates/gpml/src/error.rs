//! Error types for GPML conversions.
//!
//! This module provides the main error type [`GpmlError`] which wraps the
//! error conditions of reading, validating and writing documents.

use std::io;

use thiserror::Error;

use gpml_format::ConversionError;

/// The main error type for GPML operations.
///
/// # Diagnostic Variants
///
/// The `Conversion` variant keeps the document the error was raised on, so
/// that document errors carrying a byte span can be shown with a source
/// snippet.
#[derive(Debug, Error)]
pub enum GpmlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Conversion { err: ConversionError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GpmlError {
    /// Create a new `Conversion` error with the document it refers to.
    pub fn new_conversion_error(err: ConversionError, src: impl Into<String>) -> Self {
        Self::Conversion {
            err,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use gpml_format::ErrorCode;

    use super::*;

    #[test]
    fn test_conversion_error_displays_inner_error() {
        let err = GpmlError::new_conversion_error(
            ConversionError::document(ErrorCode::E100, "/Pathway", "missing attribute `title`"),
            "<Pathway/>",
        );
        assert_eq!(
            err.to_string(),
            "E100: missing attribute `title` at /Pathway"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: GpmlError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, GpmlError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
