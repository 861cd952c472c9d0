//! Annotations, citations and evidences, and the join records pointing at them.
//!
//! Reference entities are stored in the model arena like any other element.
//! Holders (the pathway or an element with [`ElementInfo`]) keep ordered lists
//! of join records; an annotation reference may itself carry citation and
//! evidence references, and a citation reference may carry annotation
//! references.
//!
//! Entities are deduplicated on insertion: adding content equal to an
//! existing entity returns the existing identifier. Join records are never
//! deduplicated.

use log::{debug, trace};

use crate::{
    error::ModelError,
    identifier::ElementId,
    model::{ElementKind, PathwayModel, element::Element, info::ElementInfo},
    vocabulary::AnnotationType,
    xref::Xref,
};

/// An ontology term, taxonomy entry or free annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub(crate) element_id: Option<ElementId>,
    value: String,
    annotation_type: AnnotationType,
    xref: Option<Xref>,
    url: Option<String>,
}

impl Annotation {
    pub fn new(value: impl Into<String>, annotation_type: AnnotationType) -> Self {
        Self {
            element_id: None,
            value: value.into(),
            annotation_type,
            xref: None,
            url: None,
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn annotation_type(&self) -> &AnnotationType {
        &self.annotation_type
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn same_content(&self, other: &Self) -> bool {
        self.value == other.value
            && self.annotation_type == other.annotation_type
            && self.xref == other.xref
            && self.url == other.url
    }
}

/// A literature reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    pub(crate) element_id: Option<ElementId>,
    xref: Option<Xref>,
    url: Option<String>,
}

impl Citation {
    pub fn new() -> Self {
        Self {
            element_id: None,
            xref: None,
            url: None,
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn same_content(&self, other: &Self) -> bool {
        self.xref == other.xref && self.url == other.url
    }
}

impl Default for Citation {
    fn default() -> Self {
        Self::new()
    }
}

/// Evidence supporting an element, usually an evidence-code ontology term.
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    pub(crate) element_id: Option<ElementId>,
    value: Option<String>,
    xref: Option<Xref>,
    url: Option<String>,
}

impl Evidence {
    pub fn new() -> Self {
        Self {
            element_id: None,
            value: None,
            xref: None,
            url: None,
        }
    }

    pub fn with_element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_xref(mut self, xref: Xref) -> Self {
        self.xref = Some(xref);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn xref(&self) -> Option<&Xref> {
        self.xref.as_ref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn same_content(&self, other: &Self) -> bool {
        self.value == other.value && self.xref == other.xref && self.url == other.url
    }
}

impl Default for Evidence {
    fn default() -> Self {
        Self::new()
    }
}

/// Join record pointing at an [`Annotation`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRef {
    annotation: ElementId,
    citation_refs: Vec<CitationRef>,
    evidence_refs: Vec<EvidenceRef>,
}

impl AnnotationRef {
    pub fn new(annotation: ElementId) -> Self {
        Self {
            annotation,
            citation_refs: Vec::new(),
            evidence_refs: Vec::new(),
        }
    }

    pub fn with_citation_ref(mut self, citation_ref: CitationRef) -> Self {
        self.citation_refs.push(citation_ref);
        self
    }

    pub fn with_evidence_ref(mut self, evidence_ref: EvidenceRef) -> Self {
        self.evidence_refs.push(evidence_ref);
        self
    }

    pub fn annotation(&self) -> ElementId {
        self.annotation
    }

    pub fn citation_refs(&self) -> &[CitationRef] {
        &self.citation_refs
    }

    pub fn evidence_refs(&self) -> &[EvidenceRef] {
        &self.evidence_refs
    }

    pub(crate) fn refers_to(&self, target: ElementId) -> bool {
        self.annotation == target
            || self.citation_refs.iter().any(|r| r.refers_to(target))
            || self.evidence_refs.iter().any(|r| r.refers_to(target))
    }

    pub(crate) fn strip_refs_to(&mut self, target: ElementId) {
        self.citation_refs.retain(|r| r.citation != target);
        self.evidence_refs.retain(|r| r.evidence != target);
        for citation_ref in &mut self.citation_refs {
            citation_ref.strip_refs_to(target);
        }
    }

    pub(crate) fn replace_id(&mut self, old: ElementId, new: ElementId) {
        if self.annotation == old {
            self.annotation = new;
        }
        for citation_ref in &mut self.citation_refs {
            citation_ref.replace_id(old, new);
        }
        for evidence_ref in &mut self.evidence_refs {
            evidence_ref.replace_id(old, new);
        }
    }

    fn targets(&self, out: &mut Vec<(ElementId, ElementKind)>) {
        out.push((self.annotation, ElementKind::Annotation));
        for citation_ref in &self.citation_refs {
            citation_ref.targets(out);
        }
        for evidence_ref in &self.evidence_refs {
            evidence_ref.targets(out);
        }
    }
}

/// Join record pointing at a [`Citation`].
#[derive(Debug, Clone, PartialEq)]
pub struct CitationRef {
    citation: ElementId,
    annotation_refs: Vec<AnnotationRef>,
}

impl CitationRef {
    pub fn new(citation: ElementId) -> Self {
        Self {
            citation,
            annotation_refs: Vec::new(),
        }
    }

    pub fn with_annotation_ref(mut self, annotation_ref: AnnotationRef) -> Self {
        self.annotation_refs.push(annotation_ref);
        self
    }

    pub fn citation(&self) -> ElementId {
        self.citation
    }

    pub fn annotation_refs(&self) -> &[AnnotationRef] {
        &self.annotation_refs
    }

    pub(crate) fn refers_to(&self, target: ElementId) -> bool {
        self.citation == target || self.annotation_refs.iter().any(|r| r.refers_to(target))
    }

    pub(crate) fn strip_refs_to(&mut self, target: ElementId) {
        self.annotation_refs.retain(|r| r.annotation != target);
        for annotation_ref in &mut self.annotation_refs {
            annotation_ref.strip_refs_to(target);
        }
    }

    pub(crate) fn replace_id(&mut self, old: ElementId, new: ElementId) {
        if self.citation == old {
            self.citation = new;
        }
        for annotation_ref in &mut self.annotation_refs {
            annotation_ref.replace_id(old, new);
        }
    }

    fn targets(&self, out: &mut Vec<(ElementId, ElementKind)>) {
        out.push((self.citation, ElementKind::Citation));
        for annotation_ref in &self.annotation_refs {
            annotation_ref.targets(out);
        }
    }
}

/// Join record pointing at an [`Evidence`].
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceRef {
    evidence: ElementId,
}

impl EvidenceRef {
    pub fn new(evidence: ElementId) -> Self {
        Self { evidence }
    }

    pub fn evidence(&self) -> ElementId {
        self.evidence
    }

    pub(crate) fn refers_to(&self, target: ElementId) -> bool {
        self.evidence == target
    }

    pub(crate) fn replace_id(&mut self, old: ElementId, new: ElementId) {
        if self.evidence == old {
            self.evidence = new;
        }
    }

    fn targets(&self, out: &mut Vec<(ElementId, ElementKind)>) {
        out.push((self.evidence, ElementKind::Evidence));
    }
}

/// The owner of a reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefHolder {
    Pathway,
    Element(ElementId),
}

impl From<ElementId> for RefHolder {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

impl PathwayModel {
    /// Adds an annotation, or returns the id of an existing one with the same
    /// value, type, xref and url.
    pub fn add_annotation(&mut self, mut annotation: Annotation) -> Result<ElementId, ModelError> {
        if let Some(existing) = self
            .annotations()
            .find(|existing| existing.same_content(&annotation))
            .and_then(Annotation::element_id)
        {
            trace!(id:% = existing; "Reusing existing annotation");
            return Ok(existing);
        }
        let id = self.claim_id(annotation.element_id)?;
        annotation.element_id = Some(id);
        self.insert(id, Element::Annotation(annotation));
        Ok(id)
    }

    /// Adds a citation, or returns the id of an existing one with the same
    /// xref and url.
    pub fn add_citation(&mut self, mut citation: Citation) -> Result<ElementId, ModelError> {
        if let Some(existing) = self
            .citations()
            .find(|existing| existing.same_content(&citation))
            .and_then(Citation::element_id)
        {
            trace!(id:% = existing; "Reusing existing citation");
            return Ok(existing);
        }
        let id = self.claim_id(citation.element_id)?;
        citation.element_id = Some(id);
        self.insert(id, Element::Citation(citation));
        Ok(id)
    }

    /// Adds an evidence, or returns the id of an existing one with the same
    /// value, xref and url.
    pub fn add_evidence(&mut self, mut evidence: Evidence) -> Result<ElementId, ModelError> {
        if let Some(existing) = self
            .evidences()
            .find(|existing| existing.same_content(&evidence))
            .and_then(Evidence::element_id)
        {
            trace!(id:% = existing; "Reusing existing evidence");
            return Ok(existing);
        }
        let id = self.claim_id(evidence.element_id)?;
        evidence.element_id = Some(id);
        self.insert(id, Element::Evidence(evidence));
        Ok(id)
    }

    /// Adds `annotation` (deduplicated) and a reference to it on `holder`.
    pub fn annotate(
        &mut self,
        holder: impl Into<RefHolder>,
        annotation: Annotation,
    ) -> Result<ElementId, ModelError> {
        let holder = holder.into();
        self.info_of(holder)?;
        let id = self.add_annotation(annotation)?;
        self.add_annotation_ref(holder, AnnotationRef::new(id))?;
        Ok(id)
    }

    /// Adds `citation` (deduplicated) and a reference to it on `holder`.
    pub fn cite(
        &mut self,
        holder: impl Into<RefHolder>,
        citation: Citation,
    ) -> Result<ElementId, ModelError> {
        let holder = holder.into();
        self.info_of(holder)?;
        let id = self.add_citation(citation)?;
        self.add_citation_ref(holder, CitationRef::new(id))?;
        Ok(id)
    }

    /// Adds `evidence` (deduplicated) and a reference to it on `holder`.
    pub fn attach_evidence(
        &mut self,
        holder: impl Into<RefHolder>,
        evidence: Evidence,
    ) -> Result<ElementId, ModelError> {
        let holder = holder.into();
        self.info_of(holder)?;
        let id = self.add_evidence(evidence)?;
        self.add_evidence_ref(holder, EvidenceRef::new(id))?;
        Ok(id)
    }

    /// Appends an annotation reference to `holder`. Every id in the reference
    /// tree must name an entity of the matching kind.
    pub fn add_annotation_ref(
        &mut self,
        holder: impl Into<RefHolder>,
        annotation_ref: AnnotationRef,
    ) -> Result<(), ModelError> {
        let mut targets = Vec::new();
        annotation_ref.targets(&mut targets);
        self.check_ref_targets(&targets)?;
        self.info_of_mut(holder.into())?
            .push_annotation_ref(annotation_ref);
        Ok(())
    }

    pub fn add_citation_ref(
        &mut self,
        holder: impl Into<RefHolder>,
        citation_ref: CitationRef,
    ) -> Result<(), ModelError> {
        let mut targets = Vec::new();
        citation_ref.targets(&mut targets);
        self.check_ref_targets(&targets)?;
        self.info_of_mut(holder.into())?
            .push_citation_ref(citation_ref);
        Ok(())
    }

    pub fn add_evidence_ref(
        &mut self,
        holder: impl Into<RefHolder>,
        evidence_ref: EvidenceRef,
    ) -> Result<(), ModelError> {
        self.check_ref_targets(&[(evidence_ref.evidence, ElementKind::Evidence)])?;
        self.info_of_mut(holder.into())?
            .push_evidence_ref(evidence_ref);
        Ok(())
    }

    /// Every holder with a reference (nested ones included) to `target`.
    pub fn referrers(&self, target: ElementId) -> Vec<RefHolder> {
        let mut holders = Vec::new();
        if self.pathway().info().refers_to(target) {
            holders.push(RefHolder::Pathway);
        }
        holders.extend(
            self.elements()
                .filter(|element| element.info().is_some_and(|info| info.refers_to(target)))
                .filter_map(|element| element.element_id().map(RefHolder::Element)),
        );
        holders
    }

    pub fn annotation_referrers(&self, annotation: ElementId) -> Vec<RefHolder> {
        self.referrers(annotation)
    }

    pub fn citation_referrers(&self, citation: ElementId) -> Vec<RefHolder> {
        self.referrers(citation)
    }

    pub fn evidence_referrers(&self, evidence: ElementId) -> Vec<RefHolder> {
        self.referrers(evidence)
    }

    /// Returns the info of `holder`, failing for unknown elements and for
    /// kinds that carry no info.
    pub fn info_of(&self, holder: RefHolder) -> Result<&ElementInfo, ModelError> {
        match holder {
            RefHolder::Pathway => Ok(self.pathway().info()),
            RefHolder::Element(id) => {
                let element = self.element(id)?;
                element.info().ok_or(ModelError::WrongKind {
                    id,
                    expected: "element with comments and references",
                    actual: element.kind().name(),
                })
            }
        }
    }

    pub fn info_of_mut(&mut self, holder: RefHolder) -> Result<&mut ElementInfo, ModelError> {
        match holder {
            RefHolder::Pathway => Ok(self.pathway_mut().info_mut()),
            RefHolder::Element(id) => {
                let element = self.element_mut(id)?;
                let kind = element.kind();
                element.info_mut().ok_or(ModelError::WrongKind {
                    id,
                    expected: "element with comments and references",
                    actual: kind.name(),
                })
            }
        }
    }

    /// Drops references to a removed annotation, citation or evidence.
    pub(crate) fn strip_refs_to(&mut self, target: ElementId) {
        let holders = self.referrers(target);
        debug!(id:% = target, holders = holders.len(); "Removing references");
        for holder in holders {
            if let Ok(info) = self.info_of_mut(holder) {
                info.strip_refs_to(target);
            }
        }
    }

    fn check_ref_targets(&self, targets: &[(ElementId, ElementKind)]) -> Result<(), ModelError> {
        for &(id, expected) in targets {
            self.expect_kind(id, expected)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{DataNode, element::Label},
        xref::DataSource,
    };

    fn model_with_node() -> (PathwayModel, ElementId) {
        let mut model = PathwayModel::new();
        let node = model
            .add_data_node(DataNode::new("TP53", Default::default()))
            .unwrap();
        (model, node)
    }

    #[test]
    fn test_annotation_dedup() {
        let (mut model, node) = model_with_node();
        let first = model
            .annotate(node, Annotation::new("apoptosis", AnnotationType::Ontology))
            .unwrap();
        let second = model
            .annotate(node, Annotation::new("apoptosis", AnnotationType::Ontology))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(model.annotations().count(), 1);
        let refs = model.info_of(node.into()).unwrap().annotation_refs();
        assert_eq!(refs.len(), 2);
        assert!(refs.iter().all(|r| r.annotation() == first));
    }

    #[test]
    fn test_annotation_type_distinguishes() {
        let (mut model, node) = model_with_node();
        let a = model
            .annotate(node, Annotation::new("x", AnnotationType::Ontology))
            .unwrap();
        let b = model
            .annotate(node, Annotation::new("x", AnnotationType::Taxonomy))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_citation_dedup_on_xref_and_url() {
        let mut model = PathwayModel::new();
        let xref = Xref::new("12345", DataSource::new("PubMed", "", "pubmed"));
        let a = model
            .cite(RefHolder::Pathway, Citation::new().with_xref(xref.clone()))
            .unwrap();
        let b = model
            .cite(RefHolder::Pathway, Citation::new().with_xref(xref))
            .unwrap();
        let c = model
            .cite(
                RefHolder::Pathway,
                Citation::new().with_url("https://example.org"),
            )
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(model.citations().count(), 2);
    }

    #[test]
    fn test_nested_refs_and_referrers() {
        let (mut model, node) = model_with_node();
        let annotation = model
            .add_annotation(Annotation::new("kinase", AnnotationType::Ontology))
            .unwrap();
        let citation = model
            .add_citation(Citation::new().with_url("https://example.org/paper"))
            .unwrap();
        model
            .add_annotation_ref(
                node,
                AnnotationRef::new(annotation).with_citation_ref(CitationRef::new(citation)),
            )
            .unwrap();

        assert_eq!(model.citation_referrers(citation), vec![RefHolder::Element(node)]);

        model.remove_element(citation).unwrap();
        let refs = model.info_of(node.into()).unwrap().annotation_refs();
        assert_eq!(refs.len(), 1);
        assert!(refs[0].citation_refs().is_empty());
    }

    #[test]
    fn test_removing_annotation_strips_refs() {
        let (mut model, node) = model_with_node();
        let annotation = model
            .annotate(node, Annotation::new("a", AnnotationType::Undefined))
            .unwrap();
        model.annotate(RefHolder::Pathway, Annotation::new("a", AnnotationType::Undefined))
            .unwrap();

        model.remove_element(annotation).unwrap();
        assert!(model.referrers(annotation).is_empty());
        assert!(model.pathway().info().annotation_refs().is_empty());
        assert!(!model.has_pathway_object(annotation));
    }

    #[test]
    fn test_ref_to_wrong_kind_rejected() {
        let (mut model, node) = model_with_node();
        let err = model
            .add_annotation_ref(RefHolder::Pathway, AnnotationRef::new(node))
            .unwrap_err();
        assert!(matches!(err, ModelError::WrongKind { .. }));
    }

    #[test]
    fn test_holder_without_info_rejected() {
        let mut model = PathwayModel::new();
        let label = model
            .add_label(Label::new("x"))
            .unwrap();
        let annotation = model
            .add_annotation(Annotation::new("x", AnnotationType::Undefined))
            .unwrap();
        assert!(
            model
                .add_annotation_ref(annotation, AnnotationRef::new(annotation))
                .is_err()
        );
        assert!(model.add_annotation_ref(label, AnnotationRef::new(annotation)).is_ok());
    }
}
