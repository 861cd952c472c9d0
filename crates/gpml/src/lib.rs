//! GPML - read, validate, convert and write pathway documents.
//!
//! GPML is the XML format of WikiPathways and PathVisio. This crate ties the
//! in-memory model of `gpml-core` to the codecs of `gpml-format` behind a
//! single [`PathwayConverter`] driven by a [`config::ConvertConfig`].
//!
//! Documents of the 2013a, 2017 and 2021 schema generations can be read; any
//! of them can be written.

pub mod config;

mod error;

pub use gpml_core::{
    ElementId, ModelError, PathwayModel, color, geometry, identifier, model, style, vocabulary,
    xref,
};
pub use gpml_format::{ConversionError, ErrorCode, FormatVersion, validate::pretty_print};

pub use error::GpmlError;

use std::{fs, path::Path};

use log::{debug, info};

use gpml_core::xref::DataSourceCatalog;
use gpml_format::{
    reader_for,
    validate::{validate_document, validate_with_schema_dir},
    writer_for,
};

use config::ConvertConfig;

/// Reads, validates, converts and writes GPML documents.
///
/// Xref data sources are resolved against a caller-supplied
/// [`DataSourceCatalog`]; tokens the catalog does not know are registered in
/// it.
///
/// # Examples
///
/// ```
/// use gpml::{FormatVersion, PathwayConverter, config::ConvertConfig, xref::DataSourceRegistry};
///
/// let legacy = r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a" Name="Title">
///   <Graphics BoardWidth="100" BoardHeight="100"/>
///   <InfoBox CenterX="0" CenterY="0"/>
/// </Pathway>"#;
///
/// let converter = PathwayConverter::new(
///     ConvertConfig::default().with_output_version(FormatVersion::Gpml2021),
/// );
/// let mut catalog = DataSourceRegistry::new();
/// let modern = converter.convert(legacy, &mut catalog).unwrap();
/// assert!(modern.contains(r#"title="Title""#));
/// ```
#[derive(Debug, Default)]
pub struct PathwayConverter {
    config: ConvertConfig,
}

impl PathwayConverter {
    /// Create a converter with the given configuration.
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Read a document of any supported version.
    ///
    /// The version is detected from the namespace of the root element. When
    /// input validation is enabled the document is checked against its
    /// schema first.
    ///
    /// # Errors
    ///
    /// Returns `GpmlError::Conversion` for malformed or invalid documents and
    /// for documents the model rejects.
    pub fn read(
        &self,
        xml: &str,
        catalog: &mut dyn DataSourceCatalog,
    ) -> Result<(FormatVersion, PathwayModel), GpmlError> {
        let version =
            FormatVersion::detect(xml).map_err(|err| GpmlError::new_conversion_error(err, xml))?;
        info!(version:% = version; "Reading pathway");

        if self.config.validate_input() {
            self.validate(xml, version)?;
        }

        let model = reader_for(version)
            .read(xml, catalog)
            .map_err(|err| GpmlError::new_conversion_error(err, xml))?;
        debug!(elements = model.len(); "Pathway read");
        Ok((version, model))
    }

    /// Write `model` as a document of `version`.
    ///
    /// When output validation is enabled the written document is checked
    /// against its schema before it is returned.
    ///
    /// # Errors
    ///
    /// Returns `GpmlError::Conversion` when the model cannot be expressed in
    /// the target version or the output is invalid.
    pub fn write(&self, model: &PathwayModel, version: FormatVersion) -> Result<String, GpmlError> {
        info!(version:% = version; "Writing pathway");
        let xml = writer_for(version)
            .write(model, self.config.indent())
            .map_err(|err| GpmlError::new_conversion_error(err, ""))?;

        if self.config.validate_output() {
            self.validate(&xml, version)?;
        }
        Ok(xml)
    }

    /// Convert a document to the configured output version.
    ///
    /// # Errors
    ///
    /// Returns `GpmlError::Config` for an invalid output version, otherwise
    /// the errors of [`read`](Self::read) and [`write`](Self::write).
    pub fn convert(
        &self,
        xml: &str,
        catalog: &mut dyn DataSourceCatalog,
    ) -> Result<String, GpmlError> {
        let target = self.config.output_version().map_err(GpmlError::Config)?;
        let (source, model) = self.read(xml, catalog)?;
        info!(from:% = source, to:% = target; "Converting pathway");
        self.write(&model, target)
    }

    /// Convert the document at `input` and store the result at `output`.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        catalog: &mut dyn DataSourceCatalog,
    ) -> Result<(), GpmlError> {
        let (input, output) = (input.as_ref(), output.as_ref());
        debug!(path:? = input; "Reading input file");
        let xml = fs::read_to_string(input)?;
        let converted = self.convert(&xml, catalog)?;
        fs::write(output, converted)?;
        info!(path:? = output; "Wrote output file");
        Ok(())
    }

    /// Check `xml` against the schema of `version`, from the configured
    /// schema directory or the embedded schemas.
    ///
    /// # Errors
    ///
    /// Returns `GpmlError::Conversion` wrapping the validation failure, or a
    /// missing schema file when a schema directory is configured.
    pub fn validate(&self, xml: &str, version: FormatVersion) -> Result<(), GpmlError> {
        let result = match self.config.schema_dir() {
            Some(dir) => validate_with_schema_dir(xml, version, dir),
            None => validate_document(xml, version),
        };
        result.map_err(|err| GpmlError::new_conversion_error(err, xml))
    }
}

#[cfg(test)]
mod tests {
    use gpml_core::xref::DataSourceRegistry;

    use super::*;

    const LEGACY: &str = r#"<Pathway xmlns="http://pathvisio.org/GPML/2013a" Name="Small">
  <Graphics BoardWidth="200" BoardHeight="100"/>
  <DataNode TextLabel="A" GraphId="a" Type="Protein">
    <Graphics CenterX="50" CenterY="50" Width="40" Height="20"/>
    <Xref Database="Uniprot-TrEMBL" ID="P04637"/>
  </DataNode>
  <InfoBox CenterX="0" CenterY="0"/>
</Pathway>"#;

    #[test]
    fn test_convert_to_configured_version() {
        let converter = PathwayConverter::default();
        let mut catalog = DataSourceRegistry::new();
        let modern = converter.convert(LEGACY, &mut catalog).unwrap();
        assert!(modern.contains("http://pathvisio.org/GPML/2021"));
        assert!(modern.contains(r#"<DataNode elementId="a" textLabel="A" type="Protein">"#));
        assert!(modern.contains(r#"identifier="P04637" dataSource="Uniprot-TrEMBL""#));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_read_reports_version() {
        let converter = PathwayConverter::default();
        let (version, model) = converter
            .read(LEGACY, &mut DataSourceRegistry::new())
            .unwrap();
        assert_eq!(version, FormatVersion::Gpml2013a);
        assert_eq!(model.pathway().title(), "Small");
    }

    #[test]
    fn test_input_validation() {
        let invalid = LEGACY.replace(r#" Name="Small""#, "");
        let mut catalog = DataSourceRegistry::new();

        let lenient = PathwayConverter::default();
        let err = lenient.read(&invalid, &mut catalog).unwrap_err();
        let GpmlError::Conversion { err, src } = err else {
            panic!("expected a conversion error");
        };
        assert_eq!(err.code(), Some(ErrorCode::E100));
        assert_eq!(src, invalid);

        let strict = PathwayConverter::new(ConvertConfig::default().with_validate_input(true));
        let err = strict.read(&invalid, &mut catalog).unwrap_err();
        let GpmlError::Conversion { err, .. } = err else {
            panic!("expected a conversion error");
        };
        assert!(matches!(err, ConversionError::Validation(_)));
        assert_eq!(err.code(), Some(ErrorCode::E304));
    }

    #[test]
    fn test_invalid_output_version() {
        let converter = PathwayConverter::new(toml_config(r#"output_version = "1999""#));
        let err = converter
            .convert(LEGACY, &mut DataSourceRegistry::new())
            .unwrap_err();
        assert!(matches!(err, GpmlError::Config(_)));
    }

    #[test]
    fn test_missing_schema_dir_is_fatal() {
        let converter = PathwayConverter::new(
            ConvertConfig::default().with_schema_dir("/nonexistent/gpml-schemas"),
        );
        let err = converter
            .convert(LEGACY, &mut DataSourceRegistry::new())
            .unwrap_err();
        let GpmlError::Conversion { err, .. } = err else {
            panic!("expected a conversion error");
        };
        assert!(matches!(err, ConversionError::SchemaNotFound(_)));
    }

    fn toml_config(source: &str) -> ConvertConfig {
        toml::from_str(source).unwrap()
    }
}
