//! GPML Core Types and Model
//!
//! This crate provides the schema-independent in-memory form of a GPML
//! pathway. It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::ElementId`])
//! - **Colors**: RGBA colors parsed from hex or CSS names ([`color::Color`])
//! - **Geometry**: Coordinates, rectangles and bounds ([`geometry`] module)
//! - **Styles**: Font, shape and line style bundles ([`style`] module)
//! - **Vocabulary**: Extensible enumerated types and their registries ([`vocabulary`] module)
//! - **Xrefs**: Cross-references and the data-source catalog interface ([`xref`] module)
//! - **Model**: The pathway graph itself ([`model::PathwayModel`])
//!
//! Reading and writing documents lives in the `gpml-format` crate.

pub mod color;
pub mod error;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod style;
pub mod vocabulary;
pub mod xref;

pub use error::ModelError;
pub use identifier::ElementId;
pub use model::PathwayModel;
