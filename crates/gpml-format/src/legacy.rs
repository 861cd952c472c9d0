//! The flat GPML 2013a and 2017 layouts.
//!
//! Both versions share one attribute table and one reader/writer pair; they
//! differ only in namespace and in the group styles they accept.

mod reader;
mod tokens;
mod writer;

pub(crate) use reader::LegacyReader;
pub(crate) use writer::LegacyWriter;

const BIOPAX_NAMESPACE: &str = "http://www.biopax.org/release/biopax-level3.owl#";
const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Pathway attributes kept as properties of the pathway.
const PATHWAY_PROPERTY_ATTRIBUTES: [&str; 3] = ["Maintainer", "Email", "Last-Modified"];
