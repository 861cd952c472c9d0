//! The ConversionError type returned by every reader and writer.

use std::{io, ops::Range, path::PathBuf};

use thiserror::Error;

use gpml_core::ModelError;

use crate::{error::ErrorCode, validate::ValidationError};

/// A type alias for `Result<T, ConversionError>`.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Error raised while reading, validating or writing a GPML document.
///
/// No operation retries or partially recovers; the first error ends the
/// conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("{code}: {message} at {path}")]
    Document {
        code: ErrorCode,
        path: String,
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("schema file not found: {}", .0.display())]
    SchemaNotFound(PathBuf),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("cannot reformat document: {0}")]
    Reformat(#[from] quick_xml::Error),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Validation(Box<ValidationError>),
}

impl ConversionError {
    /// Creates a document error at `path`.
    pub fn document(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Document {
            code,
            path: path.into(),
            message: message.into(),
            span: None,
        }
    }

    /// Attaches a byte range of the source document to a document error.
    ///
    /// Other variants are returned unchanged.
    pub fn with_span(self, range: Range<usize>) -> Self {
        match self {
            Self::Document {
                code,
                path,
                message,
                ..
            } => Self::Document {
                code,
                path,
                message,
                span: Some(range),
            },
            other => other,
        }
    }

    /// The error code, for document and validation errors.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Document { code, .. } => Some(*code),
            Self::Validation(err) => Some(err.code()),
            _ => None,
        }
    }

    /// Byte range of the source document the error points at, if known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::Document { span, .. } => span.clone(),
            Self::Validation(err) => err.span(),
            _ => None,
        }
    }
}

impl From<ValidationError> for ConversionError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_display() {
        let err = ConversionError::document(
            ErrorCode::E100,
            "/Pathway/DataNode[1]",
            "missing attribute `TextLabel`",
        );
        assert_eq!(
            err.to_string(),
            "E100: missing attribute `TextLabel` at /Pathway/DataNode[1]"
        );
        assert_eq!(err.code(), Some(ErrorCode::E100));
        assert_eq!(err.span(), None);
    }

    #[test]
    fn test_with_span() {
        let err = ConversionError::document(ErrorCode::E200, "/Pathway", "x").with_span(4..9);
        assert_eq!(err.span(), Some(4..9));

        let other = ConversionError::UnsupportedFormat("svg".to_string()).with_span(0..1);
        assert_eq!(other.span(), None);
        assert_eq!(other.code(), None);
    }
}
