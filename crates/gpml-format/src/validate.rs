//! Structural validation of GPML documents against their XML Schema.
//!
//! The schemas of all supported versions are embedded in the crate;
//! [`validate_with_schema_dir`] validates against schema files on disk
//! instead. A failed validation is always fatal and reported as a
//! [`ValidationError`] carrying the violation, the element path and a
//! pretty-printed copy of the document.

mod checker;
mod pretty;
mod schema;

use std::{fs, io, ops::Range, path::Path, sync::OnceLock};

use log::{debug, info};
use thiserror::Error;

use crate::{
    error::{ConversionError, ErrorCode, Result},
    version::FormatVersion,
};

pub use pretty::pretty_print;
pub use schema::{AttributeDecl, Schema};

/// A document that does not conform to its schema.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message} at {path}")]
pub struct ValidationError {
    code: ErrorCode,
    message: String,
    path: String,
    span: Option<Range<usize>>,
    document: String,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Slash-separated path of the offending element.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Byte range of the offending element in the validated document.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    /// The validated document, re-indented for display.
    pub fn document(&self) -> &str {
        &self.document
    }
}

/// Source text of the embedded schema for `version`.
pub fn schema_source(version: FormatVersion) -> &'static str {
    match version {
        FormatVersion::Gpml2013a => include_str!("../schemas/GPML2013a.xsd"),
        FormatVersion::Gpml2017 => include_str!("../schemas/GPML2017.xsd"),
        FormatVersion::Gpml2021 => include_str!("../schemas/GPML2021.xsd"),
    }
}

/// The embedded schema for `version`, compiled on first use.
pub fn embedded_schema(version: FormatVersion) -> Result<&'static Schema> {
    static GPML_2013A: OnceLock<std::result::Result<Schema, String>> = OnceLock::new();
    static GPML_2017: OnceLock<std::result::Result<Schema, String>> = OnceLock::new();
    static GPML_2021: OnceLock<std::result::Result<Schema, String>> = OnceLock::new();

    let cell = match version {
        FormatVersion::Gpml2013a => &GPML_2013A,
        FormatVersion::Gpml2017 => &GPML_2017,
        FormatVersion::Gpml2021 => &GPML_2021,
    };
    cell.get_or_init(|| Schema::parse(schema_source(version)).map_err(|err| err.to_string()))
        .as_ref()
        .map_err(|message| ConversionError::InvalidSchema(message.clone()))
}

/// Validates `xml` against the embedded schema for `version`.
pub fn validate_document(xml: &str, version: FormatVersion) -> Result<()> {
    validate_with_schema(xml, embedded_schema(version)?)
}

/// Validates `xml` against `schema`.
pub fn validate_with_schema(xml: &str, schema: &Schema) -> Result<()> {
    let document = roxmltree::Document::parse(xml)?;
    match checker::check_document(schema, &document) {
        Ok(()) => {
            debug!("Document is valid");
            Ok(())
        }
        Err(violation) => {
            info!(code:% = violation.code, path = violation.path.as_str(); "Document is invalid");
            Err(ValidationError {
                code: violation.code,
                message: violation.message,
                path: violation.path,
                span: violation.span,
                document: pretty_print(xml).unwrap_or_else(|_| xml.to_string()),
            }
            .into())
        }
    }
}

/// Validates `xml` against `GPML<version>.xsd` in `dir`.
///
/// A missing schema file is an error, never a skipped validation.
pub fn validate_with_schema_dir(xml: &str, version: FormatVersion, dir: &Path) -> Result<()> {
    let path = dir.join(version.schema_file_name());
    let source = fs::read_to_string(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConversionError::SchemaNotFound(path.clone()),
        _ => ConversionError::Io(err),
    })?;
    debug!(path:? = path; "Loaded schema");
    validate_with_schema(xml, &Schema::parse(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_2021: &str = r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="T">
  <Graphics boardWidth="100" boardHeight="100"/>
</Pathway>"#;

    #[test]
    fn test_embedded_schemas_compile() {
        for version in FormatVersion::ALL {
            let schema = embedded_schema(version).unwrap();
            assert_eq!(schema.target_namespace(), Some(version.namespace()));
        }
    }

    #[test]
    fn test_validate_minimal_document() {
        validate_document(MINIMAL_2021, FormatVersion::Gpml2021).unwrap();
    }

    #[test]
    fn test_validation_error_carries_context() {
        let xml = r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="T"><Graphics boardWidth="wide" boardHeight="100"/></Pathway>"#;
        let Err(ConversionError::Validation(err)) = validate_document(xml, FormatVersion::Gpml2021)
        else {
            panic!("expected a validation error");
        };
        assert_eq!(err.code(), ErrorCode::E305);
        assert_eq!(err.path(), "/Pathway/Graphics");
        assert!(err.message().contains("boardWidth"));
        assert!(err.document().contains("\n  <Graphics"));
        let span = err.span().unwrap();
        assert!(xml[span].starts_with("<Graphics"));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let err = validate_document(MINIMAL_2021, FormatVersion::Gpml2013a).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E300));
    }

    #[test]
    fn test_schema_dir() {
        let dir = tempfile::tempdir().unwrap();

        let missing = validate_with_schema_dir(MINIMAL_2021, FormatVersion::Gpml2021, dir.path());
        assert!(matches!(missing, Err(ConversionError::SchemaNotFound(_))));

        fs::write(
            dir.path().join("GPML2021.xsd"),
            schema_source(FormatVersion::Gpml2021),
        )
        .unwrap();
        validate_with_schema_dir(MINIMAL_2021, FormatVersion::Gpml2021, dir.path()).unwrap();
    }
}
