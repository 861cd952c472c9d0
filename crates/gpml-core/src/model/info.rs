//! Comments, dynamic properties and reference lists shared by element kinds.

use indexmap::IndexMap;

use crate::{
    identifier::ElementId,
    model::refs::{AnnotationRef, CitationRef, EvidenceRef},
};

/// A free-text comment, optionally tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    source: Option<String>,
    text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            source: None,
            text: text.into(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        self.source = (!source.is_empty()).then_some(source);
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Information attached to pathway elements and to the pathway itself.
///
/// Comments and properties can be edited freely. The reference lists are
/// read-only here; they are maintained by [`PathwayModel`](super::PathwayModel)
/// so that every reference points at an annotation, citation or evidence
/// registered in the same model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementInfo {
    comments: Vec<Comment>,
    properties: IndexMap<String, String>,
    annotation_refs: Vec<AnnotationRef>,
    citation_refs: Vec<CitationRef>,
    evidence_refs: Vec<EvidenceRef>,
}

impl ElementInfo {
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn remove_comment(&mut self, index: usize) -> Option<Comment> {
        (index < self.comments.len()).then(|| self.comments.remove(index))
    }

    /// Dynamic properties in insertion order.
    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Sets a dynamic property. An empty value deletes the key.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.properties.shift_remove(&key);
        } else {
            self.properties.insert(key, value);
        }
    }

    pub fn annotation_refs(&self) -> &[AnnotationRef] {
        &self.annotation_refs
    }

    pub fn citation_refs(&self) -> &[CitationRef] {
        &self.citation_refs
    }

    pub fn evidence_refs(&self) -> &[EvidenceRef] {
        &self.evidence_refs
    }

    pub(crate) fn push_annotation_ref(&mut self, annotation_ref: AnnotationRef) {
        self.annotation_refs.push(annotation_ref);
    }

    pub(crate) fn push_citation_ref(&mut self, citation_ref: CitationRef) {
        self.citation_refs.push(citation_ref);
    }

    pub(crate) fn push_evidence_ref(&mut self, evidence_ref: EvidenceRef) {
        self.evidence_refs.push(evidence_ref);
    }

    /// Returns true when any reference, nested ones included, points at `target`.
    pub fn refers_to(&self, target: ElementId) -> bool {
        self.annotation_refs.iter().any(|r| r.refers_to(target))
            || self.citation_refs.iter().any(|r| r.refers_to(target))
            || self.evidence_refs.iter().any(|r| r.refers_to(target))
    }

    /// Drops every reference, nested ones included, that points at `target`.
    pub(crate) fn strip_refs_to(&mut self, target: ElementId) {
        self.annotation_refs.retain(|r| r.annotation() != target);
        self.citation_refs.retain(|r| r.citation() != target);
        self.evidence_refs.retain(|r| r.evidence() != target);
        for annotation_ref in &mut self.annotation_refs {
            annotation_ref.strip_refs_to(target);
        }
        for citation_ref in &mut self.citation_refs {
            citation_ref.strip_refs_to(target);
        }
    }

    pub(crate) fn replace_id(&mut self, old: ElementId, new: ElementId) {
        for annotation_ref in &mut self.annotation_refs {
            annotation_ref.replace_id(old, new);
        }
        for citation_ref in &mut self.citation_refs {
            citation_ref.replace_id(old, new);
        }
        for evidence_ref in &mut self.evidence_refs {
            evidence_ref.replace_id(old, new);
        }
    }
}
