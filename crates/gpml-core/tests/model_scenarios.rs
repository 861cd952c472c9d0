//! Integration tests for the pathway graph model
//!
//! These tests exercise the public model API end to end: membership symmetry,
//! removal cascades and line-to-element links.

use gpml_core::{
    ElementId, ModelError, PathwayModel,
    geometry::{Coordinate, RectProperty},
    model::{
        Anchor, Annotation, DataNode, Group, Groupable, Interaction, LinePoint, Lined, State,
    },
    vocabulary::{AnnotationType, DataNodeType, GroupType, StateType},
};
use proptest::prelude::*;

fn node(model: &mut PathwayModel, label: &str, x: f64, y: f64) -> ElementId {
    model
        .add_data_node(
            DataNode::new(label, DataNodeType::GeneProduct)
                .with_rect(RectProperty::new(Coordinate::new(x, y), 40.0, 20.0).unwrap()),
        )
        .unwrap()
}

fn interaction(model: &mut PathwayModel) -> ElementId {
    model
        .add_interaction(
            Interaction::new(),
            vec![
                LinePoint::new(Coordinate::new(0.0, 100.0)),
                LinePoint::new(Coordinate::new(50.0, 100.0)),
            ],
        )
        .unwrap()
}

#[test]
fn test_line_to_group_linking() {
    let mut model = PathwayModel::new();
    let a = node(&mut model, "A", 100.0, 20.0);
    let b = node(&mut model, "B", 140.0, 20.0);
    let group = model.add_group(Group::new(GroupType::Group)).unwrap();
    model.set_group_ref(a, group).unwrap();
    model.set_group_ref(b, group).unwrap();

    let line = interaction(&mut model);
    let end = model.interaction(line).unwrap().line().end_point().unwrap();
    model.link_to(end, group, 0.0, -1.0).unwrap();
    assert_eq!(
        model.point(end).unwrap().position(),
        Coordinate::new(120.0, 2.0)
    );

    model.remove_element(group).unwrap();
    let point = model.point(end).unwrap();
    assert_eq!(point.position(), Coordinate::new(120.0, 2.0));
    assert_eq!(point.element_ref(), None);
    assert_eq!(model.data_node(a).unwrap().group_ref(), None);
    assert_eq!(model.data_node(b).unwrap().group_ref(), None);
}

#[test]
fn test_remove_data_node_with_states() {
    let mut model = PathwayModel::new();
    let a = node(&mut model, "A", 0.0, 0.0);
    let states: Vec<_> = (0..3)
        .map(|i| {
            model
                .add_state(a, State::new(format!("S{i}"), StateType::ProteinModification))
                .unwrap()
        })
        .collect();

    let line = interaction(&mut model);
    let start = model.interaction(line).unwrap().line().start_point().unwrap();
    model.link_to(start, a, 1.0, 0.0).unwrap();

    model.remove_element(a).unwrap();
    for state in states {
        assert!(!model.has_pathway_object(state));
    }
    assert_eq!(model.point(start).unwrap().element_ref(), None);
    assert_eq!(
        model.point(start).unwrap().position(),
        Coordinate::new(20.0, 0.0)
    );
}

#[test]
fn test_duplicate_annotation_dedup() {
    let mut model = PathwayModel::new();
    let a = node(&mut model, "A", 0.0, 0.0);
    let first = model
        .annotate(a, Annotation::new("cell cycle", AnnotationType::Ontology))
        .unwrap();
    let second = model
        .annotate(a, Annotation::new("cell cycle", AnnotationType::Ontology))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(model.annotations().count(), 1);
    let refs = model.data_node(a).unwrap();
    let refs = gpml_core::model::HasElementInfo::info(refs).annotation_refs();
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].annotation(), refs[1].annotation());
}

#[test]
fn test_remove_returns_detached_element() {
    let mut model = PathwayModel::new();
    let a = node(&mut model, "A", 0.0, 0.0);
    let removed = model.remove_element(a).unwrap();
    assert_eq!(removed.element_id(), None);
    assert!(model.get_pathway_element(a).is_none());
    assert_eq!(
        model.remove_element(a).unwrap_err(),
        ModelError::UnknownElement(a)
    );
}

#[test]
fn test_anchor_on_removed_line_disappears() {
    let mut model = PathwayModel::new();
    let line = interaction(&mut model);
    let anchor = model.add_anchor(line, Anchor::new(0.5).unwrap()).unwrap();
    assert_eq!(
        model.anchor_position(anchor).unwrap(),
        Coordinate::new(25.0, 100.0)
    );
    model.remove_element(line).unwrap();
    assert!(!model.has_pathway_object(anchor));
}

proptest! {
    #[test]
    fn anchor_position_domain(position in -2.0f64..3.0) {
        let result = Anchor::new(position);
        prop_assert_eq!(result.is_ok(), (0.0..=1.0).contains(&position));
    }

    #[test]
    fn generated_ids_are_unique(count in 1usize..60, explicit in 0usize..10) {
        let mut model = PathwayModel::new();
        for i in 0..explicit {
            let id = ElementId::new(&format!("id{i:08x}"));
            model.add_data_node(DataNode::new("x", DataNodeType::Undefined).with_element_id(id)).unwrap();
        }
        let mut ids = std::collections::HashSet::new();
        for _ in 0..count {
            let id = model.add_data_node(DataNode::new("y", DataNodeType::Undefined)).unwrap();
            prop_assert!(ids.insert(id));
        }
        prop_assert_eq!(model.len(), count + explicit);
    }

    #[test]
    fn group_membership_stays_symmetric(moves in prop::collection::vec((0usize..4, 0usize..3), 1..30)) {
        let mut model = PathwayModel::new();
        let members: Vec<_> = (0..4).map(|i| node(&mut model, "n", i as f64 * 50.0, 0.0)).collect();
        let groups: Vec<_> = (0..3)
            .map(|_| model.add_group(Group::new(GroupType::Group)).unwrap())
            .collect();

        for (member, group) in moves {
            // Rejections (already a member) are fine; symmetry must hold regardless.
            let _ = model.set_group_ref(members[member], groups[group]);
            for &group in &groups {
                for &member in &members {
                    let listed = model.group(group).unwrap().has_member(member);
                    let points_back = model.data_node(member).unwrap().group_ref() == Some(group);
                    prop_assert_eq!(listed, points_back);
                }
            }
        }
    }
}
