//! Declarative attribute metadata.
//!
//! Each schema generation has an [`AttributeTable`] mapping an element key
//! and an attribute name to the attribute's XSD type, its default and
//! whether it is required. Readers fetch attribute values through the table
//! so that absent attributes resolve to their schema default; writers store
//! values through it so that defaulted values are omitted.
//!
//! Element keys are tag names. `Graphics` elements, whose attributes depend
//! on their parent, are keyed `Parent.Graphics` (e.g. `DataNode.Graphics`).
//!
//! The tables are plain data transcribed from the embedded schemas; the
//! `attribute_tables` integration test checks them against the XSD files.

mod gpml2021;
mod legacy;

use std::{fmt::Display, str::FromStr, sync::OnceLock};

use indexmap::IndexMap;
use log::trace;
use quick_xml::events::BytesStart;
use roxmltree::Node;

use gpml_core::color::Color;

use crate::{
    error::{ErrorCode, Result},
    version::FormatVersion,
    xml::{error_at, format_float},
};

/// Schema facts about one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    /// Type as written in the schema, e.g. `xsd:float` or `HexColor`.
    pub xsd_type: &'static str,
    pub default: Option<&'static str>,
    pub required: bool,
}

impl AttributeSpec {
    pub(crate) const fn required(name: &'static str, xsd_type: &'static str) -> Self {
        Self {
            name,
            xsd_type,
            default: None,
            required: true,
        }
    }

    pub(crate) const fn optional(name: &'static str, xsd_type: &'static str) -> Self {
        Self {
            name,
            xsd_type,
            default: None,
            required: false,
        }
    }

    pub(crate) const fn defaulted(
        name: &'static str,
        xsd_type: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            xsd_type,
            default: Some(default),
            required: false,
        }
    }

    /// Whether `value` equals the default, compared as the attribute's type:
    /// numerically for numbers, as parsed colors for colors.
    pub fn is_default(&self, value: &str) -> bool {
        let Some(default) = self.default else {
            return false;
        };
        match self.xsd_type {
            "xsd:float" | "xsd:double" | "RotationType" | "RelativeType" | "AnchorPositionType" => {
                match (value.trim().parse::<f64>(), default.parse::<f64>()) {
                    (Ok(value), Ok(default)) => value == default,
                    _ => value == default,
                }
            }
            "xsd:integer" | "xsd:nonNegativeInteger" => {
                match (value.trim().parse::<i64>(), default.parse::<i64>()) {
                    (Ok(value), Ok(default)) => value == default,
                    _ => value == default,
                }
            }
            "ColorType" | "HexColor" => match (Color::new(value), Color::new(default)) {
                (Ok(value), Ok(default)) => value == default,
                _ => value == default,
            },
            _ => value == default,
        }
    }
}

/// Attribute metadata of one schema generation.
#[derive(Debug, Clone)]
pub struct AttributeTable {
    elements: IndexMap<&'static str, IndexMap<&'static str, AttributeSpec>>,
}

/// Attributes of one element key, assembled from shared attribute groups.
pub(crate) type ElementAttributes = (&'static str, &'static [&'static [AttributeSpec]]);

impl AttributeTable {
    /// The table for `version`. 2013a and 2017 share one table.
    pub fn for_version(version: FormatVersion) -> &'static AttributeTable {
        static LEGACY: OnceLock<AttributeTable> = OnceLock::new();
        static GPML_2021: OnceLock<AttributeTable> = OnceLock::new();

        if version.is_legacy() {
            LEGACY.get_or_init(|| Self::from_groups(legacy::ELEMENTS))
        } else {
            GPML_2021.get_or_init(|| Self::from_groups(gpml2021::ELEMENTS))
        }
    }

    fn from_groups(elements: &[ElementAttributes]) -> Self {
        let elements = elements
            .iter()
            .map(|(key, groups)| {
                let specs = groups
                    .iter()
                    .flat_map(|group| group.iter())
                    .map(|spec| (spec.name, *spec))
                    .collect();
                (*key, specs)
            })
            .collect();
        Self { elements }
    }

    /// Element keys in table order.
    pub fn element_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.elements.keys().copied()
    }

    /// Attributes of `key` in table order.
    pub fn attributes(&self, key: &str) -> impl Iterator<Item = &AttributeSpec> {
        self.elements.get(key).into_iter().flat_map(IndexMap::values)
    }

    pub fn spec(&self, key: &str, name: &str) -> Option<&AttributeSpec> {
        self.elements.get(key)?.get(name)
    }

    /// The value of attribute `name` on `node`, or its default when absent.
    pub fn get<'a>(&self, key: &str, name: &str, node: Node<'a, '_>) -> Option<&'a str> {
        node.attribute(name)
            .or_else(|| self.spec(key, name).and_then(|spec| spec.default))
    }

    /// Like [`get`](Self::get), but a missing value is an error.
    pub fn require<'a>(&self, key: &str, name: &str, node: Node<'a, '_>) -> Result<&'a str> {
        self.get(key, name, node).ok_or_else(|| {
            error_at(
                node,
                ErrorCode::E100,
                format!("missing required attribute `{name}`"),
            )
        })
    }

    /// Parses the value (or default) of a required or defaulted attribute.
    pub fn parse<T>(&self, key: &str, name: &str, node: Node<'_, '_>) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.require(key, name, node)?;
        parse_value(node, name, value)
    }

    /// Parses the value (or default) of an optional attribute.
    pub fn parse_optional<T>(&self, key: &str, name: &str, node: Node<'_, '_>) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(key, name, node)
            .map(|value| parse_value(node, name, value))
            .transpose()
    }

    /// Adds attribute `name` to `elem` unless it is optional and `value` is
    /// its default.
    pub fn set(&self, key: &str, name: &str, elem: &mut BytesStart<'_>, value: &str) {
        let omit = self
            .spec(key, name)
            .is_some_and(|spec| !spec.required && spec.is_default(value));
        if omit {
            trace!(key, name; "Omitting defaulted attribute");
            return;
        }
        elem.push_attribute((name, value));
    }

    /// [`set`](Self::set) for a float value.
    pub fn set_float(&self, key: &str, name: &str, elem: &mut BytesStart<'_>, value: f64) {
        self.set(key, name, elem, &format_float(value));
    }

    /// [`set`](Self::set) for an optional value; `None` writes nothing.
    pub fn set_optional(&self, key: &str, name: &str, elem: &mut BytesStart<'_>, value: Option<&str>) {
        if let Some(value) = value {
            self.set(key, name, elem, value);
        }
    }
}

fn parse_value<T>(node: Node<'_, '_>, name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|err| {
        error_at(
            node,
            ErrorCode::E101,
            format!("invalid value `{value}` for attribute `{name}`: {err}"),
        )
    })
}
