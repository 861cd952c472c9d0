//! The nested GPML 2021 layout.
//!
//! Elements live in per-kind containers (`DataNodes`, `Interactions`, ...),
//! identify themselves with `elementId` and refer to each other with
//! `elementRef`, `groupRef` and `aliasRef`. Annotations, citations and
//! evidences are first-class entities referenced from any element.

mod reader;
mod writer;

pub(crate) use reader::Gpml2021Reader;
pub(crate) use writer::Gpml2021Writer;
