//! Error adapter for converting GpmlError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Document and
//! validation errors that point at a byte range of the document are shown
//! with a labelled source snippet.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use gpml::{ConversionError, FormatVersion, GpmlError};

/// Adapter for a [`ConversionError`] and the document it was raised on.
pub struct ConversionAdapter<'a> {
    err: &'a ConversionError,
    src: &'a str,
}

impl<'a> ConversionAdapter<'a> {
    pub fn new(err: &'a ConversionError, src: &'a str) -> Self {
        Self { err, src }
    }

    /// The span of the error, if it lies within the source.
    fn span(&self) -> Option<Range<usize>> {
        self.err
            .span()
            .filter(|span| span.end <= self.src.len() && span.start <= span.end)
    }
}

impl fmt::Debug for ConversionAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ConversionAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The code is rendered separately by miette.
        match self.err {
            ConversionError::Document { message, path, .. } => write!(f, "{message} at {path}"),
            ConversionError::Validation(err) => write!(f, "{} at {}", err.message(), err.path()),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl std::error::Error for ConversionAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.err {
            ConversionError::Xml(err) => Some(err),
            ConversionError::Io(err) => Some(err),
            ConversionError::Reformat(err) => Some(err),
            ConversionError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl MietteDiagnostic for ConversionAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.err.code() {
            Some(code) => Some(Box::new(code)),
            None => Some(Box::new("gpml::conversion")),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.err {
            ConversionError::UnsupportedFormat(_) => {
                let namespaces: Vec<_> = FormatVersion::ALL
                    .iter()
                    .map(|version| version.namespace())
                    .collect();
                Some(Box::new(format!(
                    "the root must be a `Pathway` element in one of: {}",
                    namespaces.join(", ")
                )))
            }
            ConversionError::SchemaNotFound(_) => Some(Box::new(
                "remove `schema_dir` from the configuration to use the embedded schemas",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.span()?;
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        let message = self.err.code().map(|code| code.description().to_string());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(message, span_to_miette(span)),
        )))
    }
}

/// Adapter for [`GpmlError`] variants without a document.
pub struct ErrorAdapter<'a>(pub &'a GpmlError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            GpmlError::Io(_) => "gpml::io",
            GpmlError::Conversion { .. } => "gpml::conversion",
            GpmlError::Config(_) => "gpml::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A conversion error, with a source snippet when its span is known.
    Conversion(ConversionAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Conversion(c) => fmt::Display::fmt(c, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Conversion(c) => std::error::Error::source(c),
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Conversion(c) => c.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Conversion(c) => c.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Conversion(c) => c.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Conversion(c) => c.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`GpmlError`] into a reportable error.
pub fn to_reportable(err: &GpmlError) -> Reportable<'_> {
    match err {
        GpmlError::Conversion { err, src } => {
            Reportable::Conversion(ConversionAdapter::new(err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

fn span_to_miette(span: Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.end - span.start)
}
