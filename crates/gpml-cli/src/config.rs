//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).
//!
//! Besides the [`ConvertConfig`] keys, a CLI configuration may list the data
//! sources xrefs are resolved against:
//!
//! ```toml
//! output_version = "2021"
//!
//! [[data_sources]]
//! full_name = "Entrez Gene"
//! system_code = "L"
//! prefix = "ncbigene"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use gpml::{
    GpmlError,
    config::ConvertConfig,
    xref::{DataSource, DataSourceRegistry},
};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for GpmlError {
    fn from(err: ConfigError) -> Self {
        GpmlError::Config(err.to_string())
    }
}

/// A data source entry of the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceEntry {
    full_name: String,
    #[serde(default)]
    system_code: String,
    #[serde(default)]
    prefix: String,
}

/// Settings read from a CLI configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    convert: ConvertConfig,

    #[serde(default)]
    data_sources: Vec<DataSourceEntry>,
}

impl CliConfig {
    /// Splits the configuration into converter settings and a catalog
    /// pre-populated with the configured data sources.
    pub fn into_parts(self) -> (ConvertConfig, DataSourceRegistry) {
        let mut catalog = DataSourceRegistry::new();
        for entry in self.data_sources {
            catalog.register(DataSource::new(
                entry.full_name,
                entry.system_code,
                entry.prefix,
            ));
        }
        debug!(data_sources = catalog.len(); "Data source catalog ready");
        (self.convert, catalog)
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (gpml/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<CliConfig, GpmlError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("gpml/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "gpml", "gpml") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(CliConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<CliConfig, GpmlError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: CliConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use gpml::{FormatVersion, xref::DataSourceCatalog};

    use super::*;

    #[test]
    fn test_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, GpmlError::Config(message) if message.contains("absent.toml")));
    }

    #[test]
    fn test_explicit_file_with_data_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            output_version = "2017"
            indent = 4

            [[data_sources]]
            full_name = "Entrez Gene"
            system_code = "L"
            prefix = "ncbigene"

            [[data_sources]]
            full_name = "ChEBI"
            "#,
        )
        .unwrap();

        let (convert, catalog) = load_config(Some(&path)).unwrap().into_parts();
        assert_eq!(convert.output_version(), Ok(FormatVersion::Gpml2017));
        assert_eq!(convert.indent(), 4);
        assert_eq!(catalog.len(), 2);
        let entrez = catalog.lookup("L").unwrap();
        assert_eq!(entrez.compact_prefix(), "ncbigene");
        assert!(catalog.lookup("ChEBI").is_some());
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "indent = \"wide\"").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(
            matches!(&err, GpmlError::Config(message) if message.starts_with("Failed to parse")),
            "{err}"
        );
    }
}
