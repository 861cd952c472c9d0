//! The in-memory pathway graph.
//!
//! [`PathwayModel`] is an arena: it owns every element, keyed by
//! [`ElementId`], and elements refer to each other by id. All structural
//! mutations (adding, removing, grouping, linking, moving) go through the
//! model so that both sides of every relationship stay consistent:
//!
//! - a group lists an element as member exactly when the element's group ref
//!   names that group
//! - a data node lists exactly the states whose owner it is
//! - a line lists exactly the points and anchors it owns
//! - a linked line point sits where its target's geometry says it should
//!
//! The model is single-writer and not meant to be shared across threads.
//!
//! # Examples
//!
//! ```
//! use gpml_core::geometry::{Coordinate, RectProperty};
//! use gpml_core::model::{DataNode, Group, PathwayModel};
//! use gpml_core::vocabulary::{DataNodeType, GroupType};
//!
//! let mut model = PathwayModel::new();
//! let node = model
//!     .add_data_node(
//!         DataNode::new("TP53", DataNodeType::GeneProduct)
//!             .with_rect(RectProperty::new(Coordinate::new(50.0, 50.0), 80.0, 20.0).unwrap()),
//!     )
//!     .unwrap();
//! let group = model.add_group(Group::new(GroupType::Complex)).unwrap();
//! model.set_group_ref(node, group).unwrap();
//!
//! assert!(model.group(group).unwrap().has_member(node));
//! assert_eq!(model.get_pathway_element(node).unwrap().group_ref(), Some(group));
//! ```

mod bounds;
pub mod element;
mod group;
pub mod info;
mod line;
pub mod pathway;
pub mod refs;

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

pub use bounds::{COMPLEX_GROUP_MARGIN, GROUP_MARGIN, line_bounds, position_along, shape_bounds};
pub use element::{
    Anchor, DataNode, Element, ElementKind, GraphicalLine, Group, Groupable, HasElementInfo,
    Interaction, Label, LineData, LinePoint, Lined, Shape, Shaped, ShapedData, State,
};
pub use info::{Comment, ElementInfo};
pub use pathway::{Author, Pathway};
pub use refs::{
    Annotation, AnnotationRef, Citation, CitationRef, Evidence, EvidenceRef, RefHolder,
};

use crate::{
    error::ModelError,
    identifier::{ElementId, ElementIdGenerator},
    vocabulary::Vocabulary,
};

/// Root aggregate of a pathway document.
#[derive(Debug, Clone, Default)]
pub struct PathwayModel {
    pathway: Pathway,
    authors: Vec<Author>,
    elements: IndexMap<ElementId, Element>,
    id_generator: ElementIdGenerator,
    /// Ids declared by a document being read, never handed out by the generator.
    reserved_ids: HashSet<ElementId>,
    vocabulary: Vocabulary,
}

macro_rules! typed_access {
    ($($variant:ident, $ty:ty, $get:ident, $get_mut:ident, $iter:ident;)+) => {
        $(
            pub fn $get(&self, id: ElementId) -> Option<&$ty> {
                match self.elements.get(&id) {
                    Some(Element::$variant(element)) => Some(element),
                    _ => None,
                }
            }

            pub fn $get_mut(&mut self, id: ElementId) -> Option<&mut $ty> {
                match self.elements.get_mut(&id) {
                    Some(Element::$variant(element)) => Some(element),
                    _ => None,
                }
            }

            pub fn $iter(&self) -> impl Iterator<Item = &$ty> {
                self.elements.values().filter_map(|element| match element {
                    Element::$variant(element) => Some(element),
                    _ => None,
                })
            }
        )+
    };
}

impl PathwayModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pathway(pathway: Pathway) -> Self {
        Self {
            pathway,
            ..Self::default()
        }
    }

    pub fn pathway(&self) -> &Pathway {
        &self.pathway
    }

    pub fn pathway_mut(&mut self) -> &mut Pathway {
        &mut self.pathway
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn add_author(&mut self, author: Author) {
        self.authors.push(author);
    }

    pub fn remove_author(&mut self, index: usize) -> Option<Author> {
        (index < self.authors.len()).then(|| self.authors.remove(index))
    }

    /// Extensible-type registries scoped to this model.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vocabulary_mut(&mut self) -> &mut Vocabulary {
        &mut self.vocabulary
    }

    /// Returns an id not used by any element of this model and not reserved.
    pub fn generate_element_id(&mut self) -> ElementId {
        let elements = &self.elements;
        let reserved = &self.reserved_ids;
        self.id_generator
            .generate(|id| elements.contains_key(&id) || reserved.contains(&id))
    }

    /// Keeps `ids` out of id generation until [`release_reserved_ids`] is
    /// called. Elements may still be added under a reserved id explicitly.
    ///
    /// Readers reserve every id a document declares before creating any
    /// element, so that elements without an id never take one that a later
    /// element states.
    ///
    /// [`release_reserved_ids`]: Self::release_reserved_ids
    pub fn reserve_element_ids(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.reserved_ids.extend(ids);
    }

    pub fn release_reserved_ids(&mut self) {
        self.reserved_ids.clear();
    }

    /// O(1) lookup by id.
    pub fn get_pathway_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn has_pathway_object(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    typed_access! {
        DataNode, DataNode, data_node, data_node_mut, data_nodes;
        State, State, state, state_mut, states;
        Interaction, Interaction, interaction, interaction_mut, interactions;
        GraphicalLine, GraphicalLine, graphical_line, graphical_line_mut, graphical_lines;
        Label, Label, label, label_mut, labels;
        Shape, Shape, shape, shape_mut, shapes;
        Group, Group, group, group_mut, groups;
        Anchor, Anchor, anchor, anchor_mut, anchors;
        Point, LinePoint, point, point_mut, points;
        Annotation, Annotation, annotation, annotation_mut, annotations;
        Citation, Citation, citation, citation_mut, citations;
        Evidence, Evidence, evidence, evidence_mut, evidences;
    }

    pub fn add_data_node(&mut self, mut node: DataNode) -> Result<ElementId, ModelError> {
        let id = self.claim_id(node.element_id)?;
        node.element_id = Some(id);
        self.insert(id, Element::DataNode(node));
        Ok(id)
    }

    /// Adds `state` to the model, owned by `data_node`.
    pub fn add_state(&mut self, data_node: ElementId, mut state: State) -> Result<ElementId, ModelError> {
        self.expect_kind(data_node, ElementKind::DataNode)?;
        let id = self.claim_id(state.element_id)?;
        state.element_id = Some(id);
        state.set_data_node(Some(data_node));
        self.insert(id, Element::State(state));
        if let Some(node) = self.data_node_mut(data_node) {
            node.states_mut().push(id);
        }
        Ok(id)
    }

    pub fn add_label(&mut self, mut label: Label) -> Result<ElementId, ModelError> {
        let id = self.claim_id(label.element_id)?;
        label.element_id = Some(id);
        self.insert(id, Element::Label(label));
        Ok(id)
    }

    pub fn add_shape(&mut self, mut shape: Shape) -> Result<ElementId, ModelError> {
        let id = self.claim_id(shape.element_id)?;
        shape.element_id = Some(id);
        self.insert(id, Element::Shape(shape));
        Ok(id)
    }

    /// Adds an empty group. Members join through [`set_group_ref`](Self::set_group_ref).
    pub fn add_group(&mut self, mut group: Group) -> Result<ElementId, ModelError> {
        let id = self.claim_id(group.element_id)?;
        group.element_id = Some(id);
        self.insert(id, Element::Group(group));
        Ok(id)
    }

    /// Makes `data_node` an alias of `target`, or clears the alias with `None`.
    pub fn set_alias_ref(
        &mut self,
        data_node: ElementId,
        target: Option<ElementId>,
    ) -> Result<(), ModelError> {
        self.expect_kind(data_node, ElementKind::DataNode)?;
        if let Some(target) = target {
            self.element(target)?;
            if target == data_node {
                return Err(ModelError::WrongKind {
                    id: target,
                    expected: "element other than the alias itself",
                    actual: ElementKind::DataNode.name(),
                });
            }
        }
        if let Some(node) = self.data_node_mut(data_node) {
            node.set_alias_ref(target);
        }
        Ok(())
    }

    /// Data nodes that are aliases of `target`.
    pub fn aliases_of(&self, target: ElementId) -> Vec<ElementId> {
        self.data_nodes()
            .filter(|node| node.alias_ref() == Some(target))
            .filter_map(DataNode::element_id)
            .collect()
    }

    /// Removes an element and returns it detached.
    ///
    /// Removal cascades:
    /// - a data node takes its states with it
    /// - a line takes its points and anchors with it
    /// - a group ungroups its members and leaves its own parent group
    /// - an annotation, citation or evidence is dropped from every reference list
    /// - points linked to the removed element (or to a removed anchor) are
    ///   unlinked where they stand
    /// - aliases of the removed element are cleared
    ///
    /// A line point can only be removed while its line keeps two points.
    pub fn remove_element(&mut self, id: ElementId) -> Result<Element, ModelError> {
        let element = self.element(id)?;
        let kind = element.kind();

        if let Some(line) = self.point(id).and_then(LinePoint::line) {
            let count = self.line_data(line)?.points().len();
            if count <= 2 {
                return Err(ModelError::TooFewPoints {
                    line,
                    count: count.saturating_sub(1),
                });
            }
        }

        debug!(id:% = id, kind = kind.name(); "Removing element");
        match kind {
            ElementKind::DataNode => {
                let states = self
                    .data_node(id)
                    .map(|node| node.states().to_vec())
                    .unwrap_or_default();
                for state in states {
                    self.take(state);
                }
            }
            ElementKind::State => {
                let owner = self.state(id).and_then(State::data_node);
                if let Some(node) = owner.and_then(|owner| self.data_node_mut(owner)) {
                    node.states_mut().retain(|state| *state != id);
                }
            }
            ElementKind::Interaction | ElementKind::GraphicalLine => {
                let line = self.line_data(id)?.clone();
                for anchor in line.anchors() {
                    self.unlink_all_from(*anchor);
                    self.take(*anchor);
                }
                for point in line.points() {
                    self.take(*point);
                }
            }
            ElementKind::Group => {
                let members: Vec<_> = self
                    .group(id)
                    .map(|group| group.members().iter().copied().collect())
                    .unwrap_or_default();
                for member in members {
                    if let Some(element) = self.elements.get_mut(&member) {
                        element.set_group_ref(None);
                    }
                }
                if let Some(group) = self.group_mut(id) {
                    group.members_mut().clear();
                }
            }
            ElementKind::Anchor => {
                let line = self.anchor(id).and_then(Anchor::line);
                if let Some(data) = line.and_then(|line| self.line_data_mut(line)) {
                    data.anchors_mut().retain(|anchor| *anchor != id);
                }
            }
            ElementKind::Point => {
                let line = self.point(id).and_then(LinePoint::line);
                if let Some(line) = line {
                    if let Some(data) = self.line_data_mut(line) {
                        let points = data.points().iter().copied().filter(|p| *p != id).collect();
                        data.set_points(points);
                    }
                    self.refresh_dependents(line);
                }
            }
            ElementKind::Annotation | ElementKind::Citation | ElementKind::Evidence => {
                self.strip_refs_to(id);
            }
            ElementKind::Label | ElementKind::Shape => {}
        }

        if let Some(parent) = self.element(id)?.group_ref() {
            if let Some(group) = self.group_mut(parent) {
                group.members_mut().shift_remove(&id);
            }
            self.refresh_dependents(parent);
        }
        self.unlink_all_from(id);
        for alias in self.aliases_of(id) {
            if let Some(node) = self.data_node_mut(alias) {
                node.set_alias_ref(None);
            }
        }

        let mut element = self
            .elements
            .shift_remove(&id)
            .ok_or(ModelError::UnknownElement(id))?;
        element.detach();
        Ok(element)
    }

    /// Changes the id of an element, rewriting every reference to it.
    pub fn rename_element(&mut self, old: ElementId, new: ElementId) -> Result<(), ModelError> {
        self.element(old)?;
        if old == new {
            return Ok(());
        }
        if self.elements.contains_key(&new) {
            return Err(ModelError::DuplicateElementId(new));
        }

        let index = self
            .elements
            .get_index_of(&old)
            .ok_or(ModelError::UnknownElement(old))?;
        let (_, mut element) = self
            .elements
            .shift_remove_index(index)
            .ok_or(ModelError::UnknownElement(old))?;
        element.set_element_id(Some(new));
        self.elements.shift_insert(index, new, element);

        for element in self.elements.values_mut() {
            element.replace_id(old, new);
        }
        self.pathway.info_mut().replace_id(old, new);
        trace!(old:% = old, new:% = new; "Renamed element");
        Ok(())
    }

    pub fn element(&self, id: ElementId) -> Result<&Element, ModelError> {
        self.elements.get(&id).ok_or(ModelError::UnknownElement(id))
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, ModelError> {
        self.elements
            .get_mut(&id)
            .ok_or(ModelError::UnknownElement(id))
    }

    /// Fails unless `id` names an element of kind `expected`.
    pub(crate) fn expect_kind(
        &self,
        id: ElementId,
        expected: ElementKind,
    ) -> Result<&Element, ModelError> {
        let element = self.element(id)?;
        if element.kind() != expected {
            return Err(ModelError::WrongKind {
                id,
                expected: expected.name(),
                actual: element.kind().name(),
            });
        }
        Ok(element)
    }

    /// Returns the requested id after checking it is free, or a fresh id.
    pub(crate) fn claim_id(&mut self, requested: Option<ElementId>) -> Result<ElementId, ModelError> {
        match requested {
            Some(id) if self.elements.contains_key(&id) => Err(ModelError::DuplicateElementId(id)),
            Some(id) => Ok(id),
            None => Ok(self.generate_element_id()),
        }
    }

    pub(crate) fn insert(&mut self, id: ElementId, element: Element) {
        trace!(id:% = id, kind = element.kind().name(); "Adding element");
        self.elements.insert(id, element);
    }

    /// Removes an element from the arena without any cascade.
    fn take(&mut self, id: ElementId) -> Option<Element> {
        let mut element = self.elements.shift_remove(&id)?;
        element.detach();
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{Coordinate, RectProperty},
        vocabulary::{DataNodeType, GroupType, StateType},
    };

    #[test]
    fn test_add_generates_unique_ids() {
        let mut model = PathwayModel::new();
        let a = model.add_data_node(DataNode::new("A", DataNodeType::Protein)).unwrap();
        let b = model.add_data_node(DataNode::new("B", DataNodeType::Protein)).unwrap();
        assert_ne!(a, b);
        assert_eq!(model.data_node(a).unwrap().element_id(), Some(a));
    }

    #[test]
    fn test_generated_id_skips_existing() {
        let mut model = PathwayModel::new();
        let explicit = ElementId::new("id00000000");
        model
            .add_label(Label::new("x").with_element_id(explicit))
            .unwrap();
        let generated = model.add_label(Label::new("y")).unwrap();
        assert_ne!(generated, explicit);
    }

    #[test]
    fn test_generated_id_skips_reserved() {
        let mut model = PathwayModel::new();
        let reserved = ElementId::new("id00000000");
        model.reserve_element_ids([reserved]);

        let generated = model.add_label(Label::new("y")).unwrap();
        assert_eq!(generated, "id00000001");

        let claimed = model
            .add_label(Label::new("x").with_element_id(reserved))
            .unwrap();
        assert_eq!(claimed, reserved);

        model.release_reserved_ids();
        assert_eq!(model.generate_element_id(), "id00000002");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut model = PathwayModel::new();
        let id = ElementId::new("dup");
        model.add_shape(Shape::new().with_element_id(id)).unwrap();
        let err = model
            .add_data_node(DataNode::new("x", DataNodeType::Undefined).with_element_id(id))
            .unwrap_err();
        assert_eq!(err, ModelError::DuplicateElementId(id));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_remove_data_node_cascades_states() {
        let mut model = PathwayModel::new();
        let node = model.add_data_node(DataNode::new("A", DataNodeType::Protein)).unwrap();
        let s1 = model
            .add_state(node, State::new("P", StateType::ProteinModification))
            .unwrap();
        let s2 = model.add_state(node, State::new("M", StateType::Undefined)).unwrap();
        assert_eq!(model.data_node(node).unwrap().states(), &[s1, s2]);

        let removed = model.remove_element(node).unwrap();
        assert_eq!(removed.element_id(), None);
        assert!(!model.has_pathway_object(s1));
        assert!(!model.has_pathway_object(s2));
        assert!(model.is_empty());
    }

    #[test]
    fn test_remove_state_updates_owner() {
        let mut model = PathwayModel::new();
        let node = model.add_data_node(DataNode::new("A", DataNodeType::Protein)).unwrap();
        let state = model.add_state(node, State::new("P", StateType::Undefined)).unwrap();
        model.remove_element(state).unwrap();
        assert!(model.data_node(node).unwrap().states().is_empty());
    }

    #[test]
    fn test_add_state_requires_data_node() {
        let mut model = PathwayModel::new();
        let label = model.add_label(Label::new("x")).unwrap();
        let err = model
            .add_state(label, State::new("P", StateType::Undefined))
            .unwrap_err();
        assert!(matches!(err, ModelError::WrongKind { .. }));
    }

    #[test]
    fn test_alias_cleared_when_target_removed() {
        let mut model = PathwayModel::new();
        let group = model.add_group(Group::new(GroupType::Group)).unwrap();
        let alias = model.add_data_node(DataNode::new("G", DataNodeType::Alias)).unwrap();
        model.set_alias_ref(alias, Some(group)).unwrap();
        assert_eq!(model.aliases_of(group), vec![alias]);

        model.remove_element(group).unwrap();
        assert_eq!(model.data_node(alias).unwrap().alias_ref(), None);
    }

    #[test]
    fn test_rename_element_rewrites_references() {
        let mut model = PathwayModel::new();
        let node = model
            .add_data_node(
                DataNode::new("A", DataNodeType::Protein).with_rect(
                    RectProperty::new(Coordinate::new(10.0, 10.0), 10.0, 10.0).unwrap(),
                ),
            )
            .unwrap();
        let group = model.add_group(Group::new(GroupType::Group)).unwrap();
        model.set_group_ref(node, group).unwrap();

        let renamed = ElementId::new("renamed-group");
        model.rename_element(group, renamed).unwrap();
        assert!(!model.has_pathway_object(group));
        assert_eq!(model.data_node(node).unwrap().group_ref(), Some(renamed));
        assert_eq!(model.group(renamed).unwrap().element_id(), Some(renamed));

        let err = model.rename_element(renamed, node).unwrap_err();
        assert_eq!(err, ModelError::DuplicateElementId(node));
    }

    #[test]
    fn test_typed_iterators_keep_order() {
        let mut model = PathwayModel::new();
        for label in ["a", "b", "c"] {
            model.add_data_node(DataNode::new(label, DataNodeType::Metabolite)).unwrap();
        }
        model.add_label(Label::new("between")).unwrap();
        let labels: Vec<_> = model.data_nodes().map(DataNode::text_label).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(model.labels().count(), 1);
    }
}
