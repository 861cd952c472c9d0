//! Extensible enumerated types.
//!
//! Several GPML fields (data node type, shape type, arrowhead, ...) have a
//! fixed set of well-known values but explicitly allow arbitrary extension
//! strings. Each such field is an enum with one variant per built-in value
//! plus a `Custom` variant, and a [`TypeRegistry`] maps case-insensitive names
//! to a stable variant.
//!
//! Registries live in a [`Vocabulary`] owned by each pathway model, so custom
//! values found in one document never leak into another.
//!
//! # Examples
//!
//! ```
//! use gpml_core::vocabulary::{DataNodeType, TypeRegistry};
//!
//! let mut registry = TypeRegistry::<DataNodeType>::new();
//! assert_eq!(registry.register("Rna"), DataNodeType::Rna);
//! assert_eq!(registry.register("rna"), DataNodeType::Rna);
//!
//! let custom = registry.register("Lipid");
//! assert_eq!(custom.name(), "Lipid");
//! assert_eq!(registry.register("LIPID"), custom);
//! ```

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use log::debug;

/// Name of a value that is not one of the built-ins of its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomName(Arc<str>);

impl CustomName {
    fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when both names share one allocation, i.e. they were
    /// handed out by the same registry entry.
    pub fn same_entry(&self, other: &CustomName) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Behaviour shared by all extensible enumerations.
pub trait ExtensibleType: Clone + Default + fmt::Debug {
    /// Human readable name of the type, used in log messages.
    const TYPE_NAME: &'static str;

    /// Canonical names of the built-in values.
    const BUILTIN_NAMES: &'static [&'static str];

    /// Returns the built-in value whose canonical name is exactly `name`.
    fn from_builtin(name: &str) -> Option<Self>;

    /// Wraps a custom name.
    fn custom(name: CustomName) -> Self;

    /// Canonical name of this value.
    fn name(&self) -> &str;
}

macro_rules! extensible_type {
    (
        $(#[$meta:meta])*
        $name:ident, $type_name:literal, default = $default:ident {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value registered at runtime.
            Custom(CustomName),
        }

        impl $name {
            /// Canonical name of this value.
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $token,)+
                    Self::Custom(name) => name.as_str(),
                }
            }

            pub fn is_custom(&self) -> bool {
                matches!(self, Self::Custom(_))
            }
        }

        impl ExtensibleType for $name {
            const TYPE_NAME: &'static str = $type_name;
            const BUILTIN_NAMES: &'static [&'static str] = &[$($token),+];

            fn from_builtin(name: &str) -> Option<Self> {
                match name {
                    $($token => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn custom(name: CustomName) -> Self {
                Self::Custom(name)
            }

            fn name(&self) -> &str {
                $name::name(self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

extensible_type! {
    /// Biological kind of a data node.
    DataNodeType, "data node type", default = Undefined {
        GeneProduct => "GeneProduct",
        Dna => "DNA",
        Rna => "RNA",
        Protein => "Protein",
        Complex => "Complex",
        Metabolite => "Metabolite",
        Pathway => "Pathway",
        Disease => "Disease",
        Phenotype => "Phenotype",
        Alias => "Alias",
        Event => "Event",
        CellularComponent => "CellularComponent",
        Undefined => "Undefined",
    }
}

extensible_type! {
    /// Kind of a state attached to a data node.
    StateType, "state type", default = Undefined {
        Undefined => "Undefined",
        ProteinModification => "ProteinModification",
        GeneticVariant => "GeneticVariant",
        EpigeneticModification => "EpigeneticModification",
    }
}

extensible_type! {
    /// Outline drawn for a shaped element.
    ShapeType, "shape type", default = Rectangle {
        None => "None",
        Rectangle => "Rectangle",
        RoundedRectangle => "RoundedRectangle",
        Oval => "Oval",
        Triangle => "Triangle",
        Pentagon => "Pentagon",
        Hexagon => "Hexagon",
        Octagon => "Octagon",
        Arc => "Arc",
        Brace => "Brace",
        Mitochondria => "Mitochondria",
        SarcoplasmicReticulum => "SarcoplasmicReticulum",
        EndoplasmicReticulum => "EndoplasmicReticulum",
        GolgiApparatus => "GolgiApparatus",
        ExtracellularRegion => "ExtracellularRegion",
    }
}

extensible_type! {
    /// Stroke pattern of a border or line.
    LineStyleType, "line style", default = Solid {
        Solid => "Solid",
        Dashed => "Dashed",
        Double => "Double",
    }
}

extensible_type! {
    /// Semantic kind of a group.
    GroupType, "group type", default = Group {
        Group => "Group",
        Transparent => "Transparent",
        Complex => "Complex",
        Pathway => "Pathway",
        Analog => "Analog",
        Paralog => "Paralog",
    }
}

extensible_type! {
    /// Arrowhead drawn at a line point.
    ArrowHeadType, "arrowhead", default = Undirected {
        Undirected => "Undirected",
        Directed => "Directed",
        Conversion => "Conversion",
        Inhibition => "Inhibition",
        Catalysis => "Catalysis",
        Stimulation => "Stimulation",
        Binding => "Binding",
        Translocation => "Translocation",
        TranscriptionTranslation => "TranscriptionTranslation",
        NecessaryStimulation => "NecessaryStimulation",
        Cleavage => "Cleavage",
        CovalentBond => "CovalentBond",
        BranchingLeft => "BranchingLeft",
        BranchingRight => "BranchingRight",
    }
}

extensible_type! {
    /// Glyph drawn for an anchor.
    AnchorShapeType, "anchor shape", default = Square {
        None => "None",
        Square => "Square",
        Circle => "Circle",
    }
}

extensible_type! {
    /// Kind of an annotation.
    AnnotationType, "annotation type", default = Undefined {
        Ontology => "Ontology",
        Taxonomy => "Taxonomy",
        Undefined => "Undefined",
    }
}

/// Case-insensitive registry of the values of one extensible type.
///
/// Pre-seeded with the built-ins. Registering a name that is already known
/// (in any letter case) returns the stored value; an unknown name creates
/// and memoizes a `Custom` value spelled the way it was first seen.
#[derive(Debug, Clone)]
pub struct TypeRegistry<T: ExtensibleType> {
    entries: IndexMap<String, T>,
}

impl<T: ExtensibleType> TypeRegistry<T> {
    pub fn new() -> Self {
        let entries = T::BUILTIN_NAMES
            .iter()
            .filter_map(|name| T::from_builtin(name).map(|value| (normalize(name), value)))
            .collect();
        Self { entries }
    }

    /// Resolves `name`, registering it as a custom value when unknown.
    ///
    /// A blank name resolves to the type's default value.
    pub fn register(&mut self, name: &str) -> T {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return T::default();
        }

        let key = normalize(trimmed);
        if let Some(value) = self.entries.get(&key) {
            return value.clone();
        }

        debug!(type_name = T::TYPE_NAME, name = trimmed; "Registering custom value");
        let value = T::custom(CustomName::new(trimmed));
        self.entries.insert(key, value.clone());
        value
    }

    /// Resolves `name` without registering it.
    pub fn lookup(&self, name: &str) -> Option<T> {
        self.entries.get(&normalize(name.trim())).cloned()
    }

    /// Number of distinct values, built-ins included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|value| value.name())
    }
}

impl<T: ExtensibleType> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// The registries of every extensible type, scoped to one pathway model.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub data_node_types: TypeRegistry<DataNodeType>,
    pub state_types: TypeRegistry<StateType>,
    pub shape_types: TypeRegistry<ShapeType>,
    pub line_styles: TypeRegistry<LineStyleType>,
    pub group_types: TypeRegistry<GroupType>,
    pub arrow_heads: TypeRegistry<ArrowHeadType>,
    pub anchor_shapes: TypeRegistry<AnchorShapeType>,
    pub annotation_types: TypeRegistry<AnnotationType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_case_insensitive() {
        let mut registry = TypeRegistry::<DataNodeType>::new();
        assert_eq!(registry.register("RNA"), DataNodeType::Rna);
        assert_eq!(registry.register("Rna"), DataNodeType::Rna);
        assert_eq!(registry.register("rna"), DataNodeType::Rna);
        assert_eq!(registry.register("geneproduct"), DataNodeType::GeneProduct);
    }

    #[test]
    fn test_custom_registration_is_idempotent() {
        let mut registry = TypeRegistry::<ShapeType>::new();
        let before = registry.len();

        let first = registry.register("Cloud");
        let second = registry.register("cloud");
        let third = registry.register("CLOUD");

        assert_eq!(registry.len(), before + 1);
        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(second.name(), "Cloud");
        match (&first, &third) {
            (ShapeType::Custom(a), ShapeType::Custom(b)) => assert!(a.same_entry(b)),
            _ => panic!("expected custom shape types"),
        }
    }

    #[test]
    fn test_blank_name_resolves_to_default() {
        let mut registry = TypeRegistry::<ArrowHeadType>::new();
        let before = registry.len();
        assert_eq!(registry.register("  "), ArrowHeadType::Undirected);
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_lookup_does_not_register() {
        let registry = TypeRegistry::<GroupType>::new();
        assert_eq!(registry.lookup("complex"), Some(GroupType::Complex));
        assert_eq!(registry.lookup("Cluster"), None);
    }

    #[test]
    fn test_names_and_display() {
        let registry = TypeRegistry::<LineStyleType>::new();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["Solid", "Dashed", "Double"]);
        assert_eq!(LineStyleType::Double.to_string(), "Double");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DataNodeType::default(), DataNodeType::Undefined);
        assert_eq!(AnchorShapeType::default(), AnchorShapeType::Square);
        assert_eq!(ShapeType::default(), ShapeType::Rectangle);
        assert_eq!(GroupType::default(), GroupType::Group);
    }

    #[test]
    fn test_registries_are_independent() {
        let mut first = Vocabulary::default();
        let second = Vocabulary::default();
        first.data_node_types.register("Lipid");
        assert!(first.data_node_types.lookup("lipid").is_some());
        assert!(second.data_node_types.lookup("lipid").is_none());
    }
}
