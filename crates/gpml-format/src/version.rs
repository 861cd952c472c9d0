//! Supported GPML schema versions and document version detection.

use std::{fmt, str::FromStr};

use log::debug;

use crate::error::{ConversionError, Result};

/// A GPML schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatVersion {
    Gpml2013a,
    Gpml2017,
    Gpml2021,
}

impl FormatVersion {
    pub const ALL: [FormatVersion; 3] = [Self::Gpml2013a, Self::Gpml2017, Self::Gpml2021];

    /// Namespace of the `Pathway` root element.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Gpml2013a => "http://pathvisio.org/GPML/2013a",
            Self::Gpml2017 => "http://pathvisio.org/GPML/2017",
            Self::Gpml2021 => "http://pathvisio.org/GPML/2021",
        }
    }

    /// Short version name, as used in schema file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gpml2013a => "2013a",
            Self::Gpml2017 => "2017",
            Self::Gpml2021 => "2021",
        }
    }

    /// File name of the schema for this version, e.g. `GPML2021.xsd`.
    pub fn schema_file_name(self) -> String {
        format!("GPML{}.xsd", self.as_str())
    }

    /// Whether this is one of the flat pre-2021 layouts.
    pub fn is_legacy(self) -> bool {
        !matches!(self, Self::Gpml2021)
    }

    pub fn from_namespace(namespace: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|version| version.namespace() == namespace)
    }

    /// Detects the version of a document from the namespace of its root.
    ///
    /// The root must be a `Pathway` element in one of the GPML namespaces.
    pub fn detect(xml: &str) -> Result<Self> {
        let document = roxmltree::Document::parse(xml)?;
        Self::of_root(document.root_element())
    }

    pub(crate) fn of_root(root: roxmltree::Node<'_, '_>) -> Result<Self> {
        let name = root.tag_name();
        if name.name() != "Pathway" {
            return Err(ConversionError::UnsupportedFormat(format!(
                "root element is `{}`, expected `Pathway`",
                name.name()
            )));
        }
        let namespace = name.namespace().unwrap_or_default();
        let version = Self::from_namespace(namespace).ok_or_else(|| {
            ConversionError::UnsupportedFormat(format!("unknown namespace `{namespace}`"))
        })?;
        debug!(version = version.as_str(); "Detected document version");
        Ok(version)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPML{}", self.as_str())
    }
}

impl FromStr for FormatVersion {
    type Err = String;

    /// Accepts `2013a`, `2017`, `2021`, optionally prefixed with `GPML`
    /// in any case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let short = trimmed
            .get(..4)
            .filter(|prefix| prefix.eq_ignore_ascii_case("gpml"))
            .map_or(trimmed, |_| &trimmed[4..]);
        Self::ALL
            .into_iter()
            .find(|version| version.as_str().eq_ignore_ascii_case(short))
            .ok_or_else(|| format!("unknown GPML version `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        let xml = r#"<Pathway xmlns="http://pathvisio.org/GPML/2017" Name="x"/>"#;
        assert_eq!(FormatVersion::detect(xml).unwrap(), FormatVersion::Gpml2017);

        let xml = r#"<Pathway xmlns="http://pathvisio.org/GPML/2021" title="x"/>"#;
        assert_eq!(FormatVersion::detect(xml).unwrap(), FormatVersion::Gpml2021);
    }

    #[test]
    fn test_detect_rejects_unknown_documents() {
        let wrong_root = r#"<sbgn xmlns="http://sbgn.org/libsbgn/0.2"/>"#;
        assert!(matches!(
            FormatVersion::detect(wrong_root),
            Err(ConversionError::UnsupportedFormat(_))
        ));

        let wrong_namespace = r#"<Pathway xmlns="http://genmapp.org/GPML/2010a"/>"#;
        assert!(matches!(
            FormatVersion::detect(wrong_namespace),
            Err(ConversionError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            FormatVersion::detect("<Pathway"),
            Err(ConversionError::Xml(_))
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("2013a".parse(), Ok(FormatVersion::Gpml2013a));
        assert_eq!("GPML2017".parse(), Ok(FormatVersion::Gpml2017));
        assert_eq!("gpml2021".parse(), Ok(FormatVersion::Gpml2021));
        assert!("2010".parse::<FormatVersion>().is_err());
    }

    #[test]
    fn test_schema_file_name() {
        assert_eq!(FormatVersion::Gpml2013a.schema_file_name(), "GPML2013a.xsd");
        assert_eq!(FormatVersion::Gpml2021.to_string(), "GPML2021");
    }
}
