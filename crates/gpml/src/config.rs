//! Configuration types for GPML conversions.
//!
//! [`ConvertConfig`] controls which version documents are written in, whether
//! input and output are checked against their XML Schema, and how output is
//! indented. It implements [`serde::Deserialize`] so front ends can load it
//! from a file; every field is optional.
//!
//! # Example
//!
//! ```
//! # use gpml::{FormatVersion, config::ConvertConfig};
//! let config = ConvertConfig::default();
//! assert_eq!(config.output_version(), Ok(FormatVersion::Gpml2021));
//! assert!(config.validate_output());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use gpml_format::FormatVersion;

/// Settings for reading, converting and writing documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Version written by conversions, e.g. `2021` or `GPML2013a`.
    #[serde(default = "default_output_version")]
    output_version: String,

    /// Validate documents against their schema before reading them.
    #[serde(default)]
    validate_input: bool,

    /// Validate written documents against their schema.
    #[serde(default = "default_validate_output")]
    validate_output: bool,

    /// Spaces per nesting level; `0` writes a single line.
    #[serde(default = "default_indent")]
    indent: usize,

    /// Directory of `GPML<version>.xsd` files used instead of the embedded
    /// schemas.
    #[serde(default)]
    schema_dir: Option<PathBuf>,
}

fn default_output_version() -> String {
    FormatVersion::Gpml2021.as_str().to_string()
}

fn default_validate_output() -> bool {
    true
}

fn default_indent() -> usize {
    2
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_version: default_output_version(),
            validate_input: false,
            validate_output: default_validate_output(),
            indent: default_indent(),
            schema_dir: None,
        }
    }
}

impl ConvertConfig {
    /// Sets the version conversions write.
    pub fn with_output_version(mut self, version: FormatVersion) -> Self {
        self.output_version = version.as_str().to_string();
        self
    }

    pub fn with_validate_input(mut self, validate: bool) -> Self {
        self.validate_input = validate;
        self
    }

    pub fn with_validate_output(mut self, validate: bool) -> Self {
        self.validate_output = validate;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = Some(dir.into());
        self
    }

    /// Returns the parsed output [`FormatVersion`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured version is not a supported GPML
    /// version.
    pub fn output_version(&self) -> Result<FormatVersion, String> {
        self.output_version
            .parse()
            .map_err(|err| format!("Invalid output version in config: {err}"))
    }

    pub fn validate_input(&self) -> bool {
        self.validate_input
    }

    pub fn validate_output(&self) -> bool {
        self.validate_output
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn schema_dir(&self) -> Option<&Path> {
        self.schema_dir.as_deref()
    }
}
