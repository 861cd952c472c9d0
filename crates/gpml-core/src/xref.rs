//! Cross-references to external databases.
//!
//! An [`Xref`] pairs an identifier with a [`DataSource`]. Data sources come
//! from a catalog the caller provides through [`DataSourceCatalog`]; this
//! crate never embeds catalog contents. [`DataSourceRegistry`] is an
//! in-memory catalog that starts empty and learns every source it is asked
//! about.

use indexmap::IndexMap;
use log::debug;

use crate::error::ModelError;

/// An entry of a data-source catalog.
///
/// Any of the three names may be empty; a source with all three empty cannot
/// be written to a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DataSource {
    full_name: String,
    system_code: String,
    compact_prefix: String,
}

impl DataSource {
    pub fn new(
        full_name: impl Into<String>,
        system_code: impl Into<String>,
        compact_prefix: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            system_code: system_code.into(),
            compact_prefix: compact_prefix.into(),
        }
    }

    /// Creates a source known only by its full name.
    pub fn with_full_name(full_name: impl Into<String>) -> Self {
        Self::new(full_name, "", "")
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn system_code(&self) -> &str {
        &self.system_code
    }

    /// Prefix of the compact identifier form (`prefix:id`), e.g. `ncbigene`.
    pub fn compact_prefix(&self) -> &str {
        &self.compact_prefix
    }
}

/// Lookup and registration of data sources.
///
/// [`lookup`](DataSourceCatalog::lookup) tries the compact prefix first, then
/// the full name, then the system code.
pub trait DataSourceCatalog {
    fn find_by_prefix(&self, prefix: &str) -> Option<DataSource>;

    fn find_by_full_name(&self, full_name: &str) -> Option<DataSource>;

    fn find_by_system_code(&self, system_code: &str) -> Option<DataSource>;

    /// Registers `token` as the full name of a new data source.
    fn register_new(&mut self, token: &str) -> DataSource;

    fn lookup(&self, token: &str) -> Option<DataSource> {
        self.find_by_prefix(token)
            .or_else(|| self.find_by_full_name(token))
            .or_else(|| self.find_by_system_code(token))
    }
}

/// In-memory [`DataSourceCatalog`].
#[derive(Debug, Clone, Default)]
pub struct DataSourceRegistry {
    sources: Vec<DataSource>,
    by_prefix: IndexMap<String, usize>,
    by_full_name: IndexMap<String, usize>,
    by_system_code: IndexMap<String, usize>,
}

impl DataSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `source` to the catalog. Names already taken by an earlier source
    /// keep pointing at that source.
    pub fn register(&mut self, source: DataSource) -> DataSource {
        let index = self.sources.len();
        if !source.compact_prefix.is_empty() {
            self.by_prefix
                .entry(source.compact_prefix.clone())
                .or_insert(index);
        }
        if !source.full_name.is_empty() {
            self.by_full_name
                .entry(source.full_name.clone())
                .or_insert(index);
        }
        if !source.system_code.is_empty() {
            self.by_system_code
                .entry(source.system_code.clone())
                .or_insert(index);
        }
        self.sources.push(source.clone());
        source
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn get(&self, index: Option<&usize>) -> Option<DataSource> {
        index.and_then(|&index| self.sources.get(index)).cloned()
    }
}

impl DataSourceCatalog for DataSourceRegistry {
    fn find_by_prefix(&self, prefix: &str) -> Option<DataSource> {
        self.get(self.by_prefix.get(prefix))
    }

    fn find_by_full_name(&self, full_name: &str) -> Option<DataSource> {
        self.get(self.by_full_name.get(full_name))
    }

    fn find_by_system_code(&self, system_code: &str) -> Option<DataSource> {
        self.get(self.by_system_code.get(system_code))
    }

    fn register_new(&mut self, token: &str) -> DataSource {
        debug!(token; "Registering unknown data source");
        self.register(DataSource::with_full_name(token))
    }
}

/// A reference to an entry in an external database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Xref {
    identifier: String,
    data_source: Option<DataSource>,
}

impl Xref {
    pub fn new(identifier: impl Into<String>, data_source: DataSource) -> Self {
        Self {
            identifier: identifier.into(),
            data_source: Some(data_source),
        }
    }

    /// Creates an xref whose data source is unknown.
    ///
    /// Such an xref can be held by the model but not written out; see
    /// [`xref_data_source_str`].
    pub fn without_data_source(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            data_source: None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn data_source(&self) -> Option<&DataSource> {
        self.data_source.as_ref()
    }
}

/// Builds an xref, resolving `data_source_token` against `catalog`.
///
/// Returns `None` when the token is empty. A token the catalog does not know
/// is registered as a new data source.
///
/// # Examples
///
/// ```
/// use gpml_core::xref::{DataSource, DataSourceRegistry, create_xref};
///
/// let mut catalog = DataSourceRegistry::new();
/// catalog.register(DataSource::new("Entrez Gene", "L", "ncbigene"));
///
/// let xref = create_xref("1234", "ncbigene", &mut catalog).unwrap();
/// assert_eq!(xref.data_source().unwrap().full_name(), "Entrez Gene");
///
/// assert!(create_xref("1234", "", &mut catalog).is_none());
/// ```
pub fn create_xref<C>(identifier: &str, data_source_token: &str, catalog: &mut C) -> Option<Xref>
where
    C: DataSourceCatalog + ?Sized,
{
    let token = data_source_token.trim();
    if token.is_empty() {
        return None;
    }

    let data_source = match catalog.lookup(token) {
        Some(data_source) => data_source,
        None => catalog.register_new(token),
    };
    Some(Xref::new(identifier, data_source))
}

/// Returns the token used to write the data source of `xref`.
///
/// Prefers the compact prefix, then the full name, then the system code.
pub fn xref_data_source_str(xref: &Xref) -> Result<&str, ModelError> {
    let data_source = xref
        .data_source()
        .ok_or_else(|| ModelError::MissingDataSource(xref.identifier.clone()))?;

    [
        data_source.compact_prefix(),
        data_source.full_name(),
        data_source.system_code(),
    ]
    .into_iter()
    .find(|name| !name.is_empty())
    .ok_or_else(|| ModelError::MissingDataSource(xref.identifier.clone()))
}

/// Returns the token used for the data source of `xref` in legacy documents,
/// which name sources by their full name.
pub fn xref_legacy_data_source_str(xref: &Xref) -> Result<&str, ModelError> {
    let data_source = xref
        .data_source()
        .ok_or_else(|| ModelError::MissingDataSource(xref.identifier.clone()))?;

    [
        data_source.full_name(),
        data_source.compact_prefix(),
        data_source.system_code(),
    ]
    .into_iter()
    .find(|name| !name.is_empty())
    .ok_or_else(|| ModelError::MissingDataSource(xref.identifier.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> DataSourceRegistry {
        let mut catalog = DataSourceRegistry::new();
        catalog.register(DataSource::new("Entrez Gene", "L", "ncbigene"));
        catalog.register(DataSource::new("ChEBI", "Ce", "chebi"));
        catalog
    }

    #[test]
    fn test_lookup_order() {
        let mut catalog = catalog();
        // A source whose full name collides with another's prefix.
        catalog.register(DataSource::new("chebi", "Xx", ""));

        let source = catalog.lookup("chebi").unwrap();
        assert_eq!(source.full_name(), "ChEBI");

        let source = catalog.lookup("L").unwrap();
        assert_eq!(source.full_name(), "Entrez Gene");
    }

    #[test]
    fn test_create_xref_registers_unknown_token() {
        let mut catalog = catalog();
        let before = catalog.len();

        let xref = create_xref("X1", "My Database", &mut catalog).unwrap();
        assert_eq!(catalog.len(), before + 1);
        assert_eq!(xref.data_source().unwrap().full_name(), "My Database");

        create_xref("X2", "My Database", &mut catalog).unwrap();
        assert_eq!(catalog.len(), before + 1);
    }

    #[test]
    fn test_create_xref_empty_token() {
        let mut catalog = catalog();
        assert!(create_xref("X1", "", &mut catalog).is_none());
        assert!(create_xref("X1", "   ", &mut catalog).is_none());
    }

    #[test]
    fn test_data_source_str_preference() {
        let xref = Xref::new("1", DataSource::new("Entrez Gene", "L", "ncbigene"));
        assert_eq!(xref_data_source_str(&xref).unwrap(), "ncbigene");
        assert_eq!(xref_legacy_data_source_str(&xref).unwrap(), "Entrez Gene");

        let xref = Xref::new("1", DataSource::new("", "L", ""));
        assert_eq!(xref_data_source_str(&xref).unwrap(), "L");
    }

    #[test]
    fn test_data_source_str_missing() {
        let xref = Xref::without_data_source("1");
        assert_eq!(
            xref_data_source_str(&xref),
            Err(ModelError::MissingDataSource("1".to_string()))
        );

        let xref = Xref::new("2", DataSource::default());
        assert!(xref_data_source_str(&xref).is_err());
    }
}
