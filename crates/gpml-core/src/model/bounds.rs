//! Derived geometry: element bounds and positions along lines.
//!
//! Nothing here is cached. Group bounds in particular depend on every member
//! and are recomputed on each call.

use crate::{
    error::ModelError,
    geometry::{Bounds, Coordinate, RectProperty},
    identifier::ElementId,
    model::{
        ElementKind, PathwayModel,
        element::{Element, Shaped},
    },
    style::ConnectorType,
    vocabulary::GroupType,
};

/// Margin added around the members of a group.
pub const GROUP_MARGIN: f64 = 8.0;

/// Margin added around the members of a complex.
pub const COMPLEX_GROUP_MARGIN: f64 = 12.0;

/// Bounds of a rectangle rotated by `rotation` radians around its center.
pub fn shape_bounds(rect: &RectProperty, rotation: f64) -> Bounds {
    rect.bounds().rotated(rotation)
}

/// Bounds of a line, spanned by its first and last point only.
///
/// Intermediate points and anchors are not considered.
pub fn line_bounds(start: Coordinate, end: Coordinate) -> Bounds {
    Bounds::from_corners(start, end)
}

/// Position at fraction `t` of the path through `points`.
///
/// A straight connector runs directly from the first to the last point; any
/// other connector follows the polyline, with `t` measured by arc length.
pub fn position_along(points: &[Coordinate], connector: ConnectorType, t: f64) -> Option<Coordinate> {
    let (first, last) = (*points.first()?, *points.last()?);
    if connector == ConnectorType::Straight || points.len() == 2 {
        return Some(first.lerp(last, t));
    }

    let total: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    if total == 0.0 {
        return Some(first);
    }

    let mut remaining = t * total;
    for segment in points.windows(2) {
        let length = segment[0].distance(segment[1]);
        if remaining <= length {
            let fraction = if length == 0.0 { 0.0 } else { remaining / length };
            return Some(segment[0].lerp(segment[1], fraction));
        }
        remaining -= length;
    }
    Some(last)
}

fn group_margin(group_type: &GroupType) -> f64 {
    match group_type {
        GroupType::Complex => COMPLEX_GROUP_MARGIN,
        _ => GROUP_MARGIN,
    }
}

impl PathwayModel {
    /// Bounds of any element with a position on the board.
    ///
    /// Shapes include their rotation, groups are computed from their members
    /// and states sit relative to their data node. Anchors and points have
    /// zero-size bounds at their position.
    pub fn element_bounds(&self, id: ElementId) -> Result<Bounds, ModelError> {
        match self.element(id)? {
            Element::Group(_) => self.group_bounds(id),
            Element::Shape(shape) => Ok(shape_bounds(shape.shaped().rect(), shape.rotation())),
            Element::DataNode(node) => Ok(node.shaped().rect().bounds()),
            Element::Label(label) => Ok(label.shaped().rect().bounds()),
            Element::Interaction(_) | Element::GraphicalLine(_) => self.line_bounds(id),
            Element::State(state) => {
                let owner = state.data_node().ok_or(ModelError::UnknownElement(id))?;
                let parent = self.element_bounds(owner)?;
                let center = parent.center();
                let position = Coordinate::new(
                    center.x() + state.rel_x() * parent.width() / 2.0,
                    center.y() + state.rel_y() * parent.height() / 2.0,
                );
                Ok(Bounds::new_from_center(position, state.width(), state.height()))
            }
            Element::Anchor(_) => {
                let position = self.anchor_position(id)?;
                Ok(Bounds::from_corners(position, position))
            }
            Element::Point(point) => Ok(Bounds::from_corners(point.position(), point.position())),
            element => Err(ModelError::WrongKind {
                id,
                expected: "element with geometry",
                actual: element.kind().name(),
            }),
        }
    }

    /// Union of the member bounds, expanded by the group margin.
    ///
    /// A group without members reports its own stored rectangle.
    pub fn group_bounds(&self, group: ElementId) -> Result<Bounds, ModelError> {
        let Element::Group(data) = self.expect_kind(group, ElementKind::Group)? else {
            return Err(ModelError::UnknownElement(group));
        };

        let mut members = data.members().iter();
        let Some(first) = members.next() else {
            return Ok(data.shaped().rect().bounds());
        };
        let union = members.try_fold(self.element_bounds(*first)?, |acc, member| {
            self.element_bounds(*member).map(|bounds| acc.merge(&bounds))
        })?;
        Ok(union.expand(group_margin(data.group_type())))
    }

    /// Bounds spanned by the first and last point of a line.
    pub fn line_bounds(&self, line: ElementId) -> Result<Bounds, ModelError> {
        let data = self.line_data(line)?;
        let position = |point: Option<ElementId>| {
            point
                .and_then(|point| self.point(point))
                .map(|point| point.position())
                .ok_or(ModelError::TooFewPoints {
                    line,
                    count: data.points().len(),
                })
        };
        Ok(line_bounds(
            position(data.start_point())?,
            position(data.end_point())?,
        ))
    }

    /// Absolute position of an anchor on its line's path.
    pub fn anchor_position(&self, anchor: ElementId) -> Result<Coordinate, ModelError> {
        let Element::Anchor(data) = self.expect_kind(anchor, ElementKind::Anchor)? else {
            return Err(ModelError::UnknownElement(anchor));
        };
        let line = data.line().ok_or(ModelError::UnknownElement(anchor))?;
        let coordinates = self.line_coordinates(line)?;
        let connector = self.line_data(line)?.line_style().connector_type();
        position_along(&coordinates, connector, data.position()).ok_or(ModelError::TooFewPoints {
            line,
            count: coordinates.len(),
        })
    }

    /// Replaces the rectangle of a shaped element and moves every point
    /// that depends on it.
    pub fn set_rect(&mut self, id: ElementId, rect: RectProperty) -> Result<(), ModelError> {
        let element = self.element_mut(id)?;
        let kind = element.kind();
        let shaped = element.shaped_mut().ok_or(ModelError::WrongKind {
            id,
            expected: "shaped element",
            actual: kind.name(),
        })?;
        shaped.set_rect(rect);
        self.refresh_dependents(id);
        Ok(())
    }

    /// Moves a shaped element, keeping its size.
    pub fn set_center(&mut self, id: ElementId, center: Coordinate) -> Result<(), ModelError> {
        let element = self.element(id)?;
        let mut rect = *element
            .shaped()
            .ok_or(ModelError::WrongKind {
                id,
                expected: "shaped element",
                actual: element.kind().name(),
            })?
            .rect();
        rect.set_center(center);
        self.set_rect(id, rect)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use float_cmp::approx_eq;

    use super::*;
    use crate::{
        model::{DataNode, Group, Interaction, LinePoint, Shape, State},
        vocabulary::{DataNodeType, StateType},
    };

    fn rect(x: f64, y: f64, w: f64, h: f64) -> RectProperty {
        RectProperty::new(Coordinate::new(x, y), w, h).unwrap()
    }

    #[test]
    fn test_shape_bounds_rotation() {
        let bounds = shape_bounds(&rect(50.0, 50.0, 40.0, 20.0), FRAC_PI_2);
        assert!(approx_eq!(f64, bounds.width(), 20.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bounds.height(), 40.0, epsilon = 1e-9));
        assert_eq!(bounds.center(), Coordinate::new(50.0, 50.0));
    }

    #[test]
    fn test_line_bounds_ignore_intermediate_points() {
        let mut model = PathwayModel::new();
        let line = model
            .add_interaction(
                Interaction::new(),
                vec![
                    LinePoint::new(Coordinate::new(0.0, 0.0)),
                    LinePoint::new(Coordinate::new(500.0, 500.0)),
                    LinePoint::new(Coordinate::new(10.0, 20.0)),
                ],
            )
            .unwrap();
        assert_eq!(
            model.line_bounds(line).unwrap(),
            Bounds::new(0.0, 0.0, 10.0, 20.0)
        );
    }

    #[test]
    fn test_group_margins() {
        let mut model = PathwayModel::new();
        let a = model
            .add_data_node(DataNode::new("a", DataNodeType::Protein).with_rect(rect(100.0, 20.0, 40.0, 20.0)))
            .unwrap();
        let b = model
            .add_data_node(DataNode::new("b", DataNodeType::Protein).with_rect(rect(140.0, 20.0, 40.0, 20.0)))
            .unwrap();
        let group = model.add_group(Group::new(GroupType::Group)).unwrap();
        model.set_group_ref(a, group).unwrap();
        model.set_group_ref(b, group).unwrap();
        assert_eq!(
            model.group_bounds(group).unwrap(),
            Bounds::new(72.0, 2.0, 168.0, 38.0)
        );

        model.group_mut(group).unwrap().set_group_type(GroupType::Complex);
        assert_eq!(
            model.group_bounds(group).unwrap(),
            Bounds::new(68.0, -2.0, 172.0, 42.0)
        );
    }

    #[test]
    fn test_nested_group_bounds() {
        let mut model = PathwayModel::new();
        let node = model
            .add_data_node(DataNode::new("a", DataNodeType::Protein).with_rect(rect(0.0, 0.0, 20.0, 20.0)))
            .unwrap();
        let inner = model.add_group(Group::new(GroupType::Group)).unwrap();
        let outer = model.add_group(Group::new(GroupType::Group)).unwrap();
        model.set_group_ref(node, inner).unwrap();
        model.set_group_ref(inner, outer).unwrap();
        assert_eq!(
            model.group_bounds(outer).unwrap(),
            Bounds::new(-26.0, -26.0, 26.0, 26.0)
        );
    }

    #[test]
    fn test_empty_group_uses_stored_rect() {
        let mut model = PathwayModel::new();
        let group = model
            .add_group(Group::new(GroupType::Group).with_rect(rect(10.0, 10.0, 4.0, 4.0)))
            .unwrap();
        assert_eq!(
            model.group_bounds(group).unwrap(),
            Bounds::new(8.0, 8.0, 12.0, 12.0)
        );
    }

    #[test]
    fn test_state_bounds_relative_to_node() {
        let mut model = PathwayModel::new();
        let node = model
            .add_data_node(DataNode::new("a", DataNodeType::Protein).with_rect(rect(100.0, 100.0, 80.0, 40.0)))
            .unwrap();
        let state = model
            .add_state(
                node,
                State::new("P", StateType::ProteinModification)
                    .with_relative_position(1.0, -1.0)
                    .unwrap()
                    .with_size(10.0, 10.0)
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(
            model.element_bounds(state).unwrap(),
            Bounds::new(135.0, 75.0, 145.0, 85.0)
        );
    }

    #[test]
    fn test_position_along_polyline() {
        let points = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 0.0),
            Coordinate::new(10.0, 10.0),
        ];
        assert_eq!(
            position_along(&points, ConnectorType::Segmented, 0.75),
            Some(Coordinate::new(10.0, 5.0))
        );
        assert_eq!(
            position_along(&points, ConnectorType::Straight, 0.5),
            Some(Coordinate::new(5.0, 5.0))
        );
        assert_eq!(position_along(&[], ConnectorType::Straight, 0.5), None);
    }

    #[test]
    fn test_set_rect_requires_shaped_element() {
        let mut model = PathwayModel::new();
        let shape = model.add_shape(Shape::new()).unwrap();
        assert!(model.set_rect(shape, rect(1.0, 1.0, 1.0, 1.0)).is_ok());
        let line = model
            .add_interaction(
                Interaction::new(),
                vec![
                    LinePoint::new(Coordinate::new(0.0, 0.0)),
                    LinePoint::new(Coordinate::new(1.0, 1.0)),
                ],
            )
            .unwrap();
        assert!(matches!(
            model.set_rect(line, rect(1.0, 1.0, 1.0, 1.0)),
            Err(ModelError::WrongKind { .. })
        ));
    }
}
