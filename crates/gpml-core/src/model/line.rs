//! Line points, anchors and point-to-element links.

use std::collections::{HashSet, VecDeque};

use log::trace;

use crate::{
    error::{ModelError, check_range},
    geometry::Coordinate,
    identifier::ElementId,
    model::{
        ElementKind, PathwayModel,
        element::{Anchor, Element, GraphicalLine, Interaction, LineData, LinePoint},
    },
};

impl PathwayModel {
    /// Adds an interaction with its points (at least two).
    pub fn add_interaction(
        &mut self,
        mut interaction: Interaction,
        points: Vec<LinePoint>,
    ) -> Result<ElementId, ModelError> {
        let id = self.claim_line_id(interaction.element_id, &points)?;
        interaction.element_id = Some(id);
        self.insert(id, Element::Interaction(interaction));
        self.attach_points(id, points);
        Ok(id)
    }

    /// Adds a graphical line with its points (at least two).
    pub fn add_graphical_line(
        &mut self,
        mut line: GraphicalLine,
        points: Vec<LinePoint>,
    ) -> Result<ElementId, ModelError> {
        let id = self.claim_line_id(line.element_id, &points)?;
        line.element_id = Some(id);
        self.insert(id, Element::GraphicalLine(line));
        self.attach_points(id, points);
        Ok(id)
    }

    /// Replaces every point of `line`. The old points are removed from the
    /// model; anchors keep their proportional positions on the new path.
    pub fn set_points(&mut self, line: ElementId, points: Vec<LinePoint>) -> Result<(), ModelError> {
        let old_points = self.line_data(line)?.points().to_vec();
        if points.len() < 2 {
            return Err(ModelError::TooFewPoints {
                line,
                count: points.len(),
            });
        }
        self.check_new_ids(points.iter().map(|point| point.element_id), &old_points)?;

        for point in old_points {
            self.elements.shift_remove(&point);
        }
        self.attach_points(line, points);
        self.refresh_dependents(line);
        Ok(())
    }

    /// Moves a single point. A linked point is unlinked first, since its
    /// position would otherwise be overwritten by the next refresh.
    pub fn set_point_position(
        &mut self,
        point: ElementId,
        position: Coordinate,
    ) -> Result<(), ModelError> {
        self.expect_kind(point, ElementKind::Point)?;
        let line = self.point(point).and_then(LinePoint::line);
        if let Some(data) = self.point_mut(point) {
            data.clear_link();
            data.set_position(position);
        }
        if let Some(line) = line {
            self.refresh_dependents(line);
        }
        Ok(())
    }

    /// Adds `anchor` to `line`.
    pub fn add_anchor(&mut self, line: ElementId, mut anchor: Anchor) -> Result<ElementId, ModelError> {
        self.line_data(line)?;
        let id = self.claim_id(anchor.element_id)?;
        anchor.element_id = Some(id);
        anchor.set_line(Some(line));
        self.insert(id, Element::Anchor(anchor));
        if let Some(data) = self.line_data_mut(line) {
            data.anchors_mut().push(id);
        }
        Ok(id)
    }

    /// Moves an anchor along its line; `position` must lie in `[0, 1]`.
    pub fn set_anchor_position(&mut self, anchor: ElementId, position: f64) -> Result<(), ModelError> {
        self.expect_kind(anchor, ElementKind::Anchor)?;
        if let Some(data) = self.anchor_mut(anchor) {
            data.set_position(position)?;
        }
        self.refresh_dependents(anchor);
        Ok(())
    }

    /// Links `point` to `target` at the relative offset `(rel_x, rel_y)` and
    /// moves the point there.
    ///
    /// The offset is measured from the target's center in units of half its
    /// width and height, so `(0, -1)` is the middle of the top edge. When the
    /// target is an anchor the offset is ignored and the point sits on the
    /// anchor.
    pub fn link_to(
        &mut self,
        point: ElementId,
        target: ElementId,
        rel_x: f64,
        rel_y: f64,
    ) -> Result<(), ModelError> {
        check_range("relX", rel_x, -1.0, 1.0)?;
        check_range("relY", rel_y, -1.0, 1.0)?;
        self.link_in_place(point, target, rel_x, rel_y)?;

        if let Some(position) = self.linked_position(point) {
            trace!(point:% = point, target:% = target; "Linked point");
            if let Some(data) = self.point_mut(point) {
                data.set_position(position);
            }
        }
        if let Some(line) = self.point(point).and_then(LinePoint::line) {
            self.refresh_dependents(line);
        }
        Ok(())
    }

    /// Records a link without moving the point.
    ///
    /// Used when the stored coordinates are already authoritative, e.g. when
    /// reading a document.
    pub fn link_in_place(
        &mut self,
        point: ElementId,
        target: ElementId,
        rel_x: f64,
        rel_y: f64,
    ) -> Result<(), ModelError> {
        self.expect_kind(point, ElementKind::Point)?;
        let line = self.point(point).and_then(LinePoint::line);
        let target_element = self.element(target)?;
        if !target_element.kind().is_linkable() {
            return Err(ModelError::NotLinkable(target));
        }
        if let Element::Anchor(anchor) = target_element {
            if anchor.line().is_some() && anchor.line() == line {
                return Err(ModelError::NotLinkable(target));
            }
        }

        if let Some(data) = self.point_mut(point) {
            data.set_link(target, rel_x, rel_y);
        }
        Ok(())
    }

    /// Clears the link of `point`, leaving it where it is.
    pub fn unlink(&mut self, point: ElementId) -> Result<(), ModelError> {
        self.expect_kind(point, ElementKind::Point)?;
        if let Some(data) = self.point_mut(point) {
            data.clear_link();
        }
        Ok(())
    }

    /// Points currently linked to `target`.
    pub fn referring_linkable_froms(&self, target: ElementId) -> Vec<ElementId> {
        self.points()
            .filter(|point| point.element_ref() == Some(target))
            .filter_map(LinePoint::element_id)
            .collect()
    }

    /// Absolute positions of the points of `line`, in path order.
    pub fn line_coordinates(&self, line: ElementId) -> Result<Vec<Coordinate>, ModelError> {
        Ok(self
            .line_data(line)?
            .points()
            .iter()
            .filter_map(|point| self.point(*point))
            .map(LinePoint::position)
            .collect())
    }

    /// Points, anchors and style of a line of either kind.
    pub fn line_data(&self, line: ElementId) -> Result<&LineData, ModelError> {
        let element = self.element(line)?;
        element.line().ok_or(ModelError::WrongKind {
            id: line,
            expected: "line",
            actual: element.kind().name(),
        })
    }

    pub(crate) fn line_data_mut(&mut self, line: ElementId) -> Option<&mut LineData> {
        self.elements.get_mut(&line).and_then(Element::line_mut)
    }

    /// Unlinks, in place, every point linked to `target`.
    pub(crate) fn unlink_all_from(&mut self, target: ElementId) {
        for point in self.referring_linkable_froms(target) {
            if let Some(data) = self.point_mut(point) {
                data.clear_link();
            }
        }
    }

    /// Where a linked point should be, given its target's current geometry.
    pub(crate) fn linked_position(&self, point: ElementId) -> Option<Coordinate> {
        let point = self.point(point)?;
        let target = point.element_ref()?;
        if self.anchor(target).is_some() {
            return self.anchor_position(target).ok();
        }
        let bounds = self.element_bounds(target).ok()?;
        let center = bounds.center();
        Some(Coordinate::new(
            center.x() + point.rel_x() * bounds.width() / 2.0,
            center.y() + point.rel_y() * bounds.height() / 2.0,
        ))
    }

    /// Recomputes every linked point whose position depends on `start`.
    ///
    /// Dependencies propagate through parent groups (whose bounds follow
    /// their members), through lines (whose anchors follow their points) and
    /// through anchors (which linked points follow).
    pub(crate) fn refresh_dependents(&mut self, start: ElementId) {
        let mut queue = VecDeque::from([start]);
        let mut visited = HashSet::new();

        while let Some(target) = queue.pop_front() {
            if !visited.insert(target) {
                continue;
            }
            let Some(element) = self.elements.get(&target) else {
                continue;
            };
            if let Some(group) = element.group_ref() {
                queue.push_back(group);
            }
            if let Some(line) = element.line() {
                queue.extend(line.anchors().iter().copied());
            }

            for point in self.referring_linkable_froms(target) {
                let Some(position) = self.linked_position(point) else {
                    continue;
                };
                let line = self.point(point).and_then(LinePoint::line);
                if let Some(data) = self.point_mut(point) {
                    data.set_position(position);
                }
                if let Some(line) = line {
                    queue.push_back(line);
                }
            }
        }
    }

    fn claim_line_id(
        &mut self,
        requested: Option<ElementId>,
        points: &[LinePoint],
    ) -> Result<ElementId, ModelError> {
        let id = self.claim_id(requested)?;
        if points.len() < 2 {
            return Err(ModelError::TooFewPoints {
                line: id,
                count: points.len(),
            });
        }
        self.check_new_ids(points.iter().map(|point| point.element_id), &[])?;
        if points.iter().any(|point| point.element_id == Some(id)) {
            return Err(ModelError::DuplicateElementId(id));
        }
        Ok(id)
    }

    /// Checks that requested ids are distinct and free, ignoring ids in
    /// `replaced`, which are about to be released.
    fn check_new_ids(
        &self,
        requested: impl Iterator<Item = Option<ElementId>>,
        replaced: &[ElementId],
    ) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for id in requested.flatten() {
            let taken = self.elements.contains_key(&id) && !replaced.contains(&id);
            if taken || !seen.insert(id) {
                return Err(ModelError::DuplicateElementId(id));
            }
        }
        Ok(())
    }

    fn attach_points(&mut self, line: ElementId, points: Vec<LinePoint>) {
        let mut ids = Vec::with_capacity(points.len());
        for mut point in points {
            let id = match point.element_id {
                Some(id) => id,
                None => self.generate_element_id(),
            };
            point.element_id = Some(id);
            point.set_line(Some(line));
            point.clear_link();
            self.insert(id, Element::Point(point));
            ids.push(id);
        }
        if let Some(data) = self.line_data_mut(line) {
            data.set_points(ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::{
        geometry::RectProperty,
        model::{DataNode, Group, Label},
        vocabulary::{DataNodeType, GroupType},
    };

    fn node_at(model: &mut PathwayModel, x: f64, y: f64) -> ElementId {
        model
            .add_data_node(
                DataNode::new("node", DataNodeType::GeneProduct)
                    .with_rect(RectProperty::new(Coordinate::new(x, y), 40.0, 20.0).unwrap()),
            )
            .unwrap()
    }

    fn straight(model: &mut PathwayModel, from: (f64, f64), to: (f64, f64)) -> ElementId {
        model
            .add_interaction(
                Interaction::new(),
                vec![
                    LinePoint::new(Coordinate::new(from.0, from.1)),
                    LinePoint::new(Coordinate::new(to.0, to.1)),
                ],
            )
            .unwrap()
    }

    #[test]
    fn test_line_needs_two_points() {
        let mut model = PathwayModel::new();
        let err = model
            .add_interaction(
                Interaction::new(),
                vec![LinePoint::new(Coordinate::new(0.0, 0.0))],
            )
            .unwrap_err();
        assert!(matches!(err, ModelError::TooFewPoints { count: 1, .. }));
        assert!(model.is_empty());
    }

    #[test]
    fn test_link_to_recomputes_position() {
        let mut model = PathwayModel::new();
        let node = node_at(&mut model, 100.0, 100.0);
        let line = straight(&mut model, (0.0, 0.0), (10.0, 10.0));
        let end = model.line_data(line).unwrap().end_point().unwrap();

        model.link_to(end, node, 1.0, 0.0).unwrap();
        assert_eq!(model.point(end).unwrap().position(), Coordinate::new(120.0, 100.0));
        assert_eq!(model.referring_linkable_froms(node), vec![end]);
    }

    #[test]
    fn test_moving_target_moves_point() {
        let mut model = PathwayModel::new();
        let node = node_at(&mut model, 100.0, 100.0);
        let line = straight(&mut model, (0.0, 0.0), (10.0, 10.0));
        let end = model.line_data(line).unwrap().end_point().unwrap();
        model.link_to(end, node, 0.0, -1.0).unwrap();

        model.set_center(node, Coordinate::new(200.0, 50.0)).unwrap();
        assert_eq!(model.point(end).unwrap().position(), Coordinate::new(200.0, 40.0));
    }

    #[test]
    fn test_unlink_keeps_position() {
        let mut model = PathwayModel::new();
        let node = node_at(&mut model, 100.0, 100.0);
        let line = straight(&mut model, (0.0, 0.0), (10.0, 10.0));
        let end = model.line_data(line).unwrap().end_point().unwrap();
        model.link_to(end, node, -1.0, 0.0).unwrap();

        model.unlink(end).unwrap();
        model.set_center(node, Coordinate::new(0.0, 0.0)).unwrap();
        let point = model.point(end).unwrap();
        assert_eq!(point.element_ref(), None);
        assert_eq!(point.position(), Coordinate::new(80.0, 100.0));
    }

    #[test]
    fn test_link_rejects_out_of_range_offset() {
        let mut model = PathwayModel::new();
        let node = node_at(&mut model, 0.0, 0.0);
        let line = straight(&mut model, (0.0, 0.0), (10.0, 10.0));
        let end = model.line_data(line).unwrap().end_point().unwrap();
        assert!(model.link_to(end, node, 1.5, 0.0).is_err());
        assert_eq!(model.point(end).unwrap().element_ref(), None);
    }

    #[test]
    fn test_link_to_non_linkable_rejected() {
        let mut model = PathwayModel::new();
        let line = straight(&mut model, (0.0, 0.0), (10.0, 10.0));
        let other = straight(&mut model, (0.0, 0.0), (10.0, 10.0));
        let end = model.line_data(line).unwrap().end_point().unwrap();
        assert_eq!(
            model.link_to(end, other, 0.0, 0.0),
            Err(ModelError::NotLinkable(other))
        );
    }

    #[test]
    fn test_point_follows_anchor() {
        let mut model = PathwayModel::new();
        let main = straight(&mut model, (0.0, 0.0), (100.0, 0.0));
        let anchor = model.add_anchor(main, Anchor::new(0.5).unwrap()).unwrap();
        assert_eq!(model.anchor_position(anchor).unwrap(), Coordinate::new(50.0, 0.0));

        let branch = straight(&mut model, (50.0, 50.0), (0.0, 0.0));
        let end = model.line_data(branch).unwrap().end_point().unwrap();
        model.link_to(end, anchor, 0.0, 0.0).unwrap();
        assert_eq!(model.point(end).unwrap().position(), Coordinate::new(50.0, 0.0));

        model.set_anchor_position(anchor, 1.0).unwrap();
        assert_eq!(model.point(end).unwrap().position(), Coordinate::new(100.0, 0.0));
        assert!(model.set_anchor_position(anchor, 1.5).is_err());
    }

    #[test]
    fn test_anchor_moves_with_its_line() {
        let mut model = PathwayModel::new();
        let node = node_at(&mut model, 200.0, 0.0);
        let main = straight(&mut model, (0.0, 0.0), (100.0, 0.0));
        let main_end = model.line_data(main).unwrap().end_point().unwrap();
        let anchor = model.add_anchor(main, Anchor::new(0.5).unwrap()).unwrap();
        let branch = straight(&mut model, (50.0, 50.0), (0.0, 0.0));
        let branch_end = model.line_data(branch).unwrap().end_point().unwrap();
        model.link_to(branch_end, anchor, 0.0, 0.0).unwrap();

        // Linking the main line's end to the node moves it to (180, 0).
        model.link_to(main_end, node, -1.0, 0.0).unwrap();
        let position = model.point(branch_end).unwrap().position();
        assert!(approx_eq!(f64, position.x(), 90.0, epsilon = 1e-9));
    }

    #[test]
    fn test_removing_line_unlinks_points_on_its_anchors() {
        let mut model = PathwayModel::new();
        let main = straight(&mut model, (0.0, 0.0), (100.0, 0.0));
        let anchor = model.add_anchor(main, Anchor::new(0.25).unwrap()).unwrap();
        let branch = straight(&mut model, (0.0, 50.0), (0.0, 0.0));
        let end = model.line_data(branch).unwrap().end_point().unwrap();
        model.link_to(end, anchor, 0.0, 0.0).unwrap();

        let points = model.line_data(main).unwrap().points().to_vec();
        model.remove_element(main).unwrap();
        assert!(!model.has_pathway_object(anchor));
        assert!(points.iter().all(|point| !model.has_pathway_object(*point)));

        let point = model.point(end).unwrap();
        assert_eq!(point.element_ref(), None);
        assert_eq!(point.position(), Coordinate::new(25.0, 0.0));
    }

    #[test]
    fn test_remove_point_keeps_two() {
        let mut model = PathwayModel::new();
        let line = straight(&mut model, (0.0, 0.0), (10.0, 0.0));
        let start = model.line_data(line).unwrap().start_point().unwrap();
        assert!(matches!(
            model.remove_element(start),
            Err(ModelError::TooFewPoints { .. })
        ));

        model
            .set_points(
                line,
                vec![
                    LinePoint::new(Coordinate::new(0.0, 0.0)),
                    LinePoint::new(Coordinate::new(5.0, 5.0)),
                    LinePoint::new(Coordinate::new(10.0, 0.0)),
                ],
            )
            .unwrap();
        assert!(!model.has_pathway_object(start));
        let middle = model.line_data(line).unwrap().points()[1];
        model.remove_element(middle).unwrap();
        assert_eq!(model.line_data(line).unwrap().points().len(), 2);
    }

    #[test]
    fn test_link_to_group_follows_members() {
        let mut model = PathwayModel::new();
        let a = node_at(&mut model, 100.0, 20.0);
        let group = model.add_group(Group::new(GroupType::Group)).unwrap();
        model.set_group_ref(a, group).unwrap();
        let line = straight(&mut model, (0.0, 0.0), (10.0, 10.0));
        let end = model.line_data(line).unwrap().end_point().unwrap();
        model.link_to(end, group, 0.0, -1.0).unwrap();
        assert_eq!(model.point(end).unwrap().position(), Coordinate::new(100.0, 2.0));

        let label = model
            .add_label(Label::new("x").with_rect(
                RectProperty::new(Coordinate::new(100.0, 100.0), 10.0, 10.0).unwrap(),
            ))
            .unwrap();
        model.set_group_ref(label, group).unwrap();
        // Group now spans y 2..113, so its top edge is unchanged but the
        // center moves.
        assert_eq!(model.point(end).unwrap().position(), Coordinate::new(100.0, 2.0));
        model.set_center(label, Coordinate::new(100.0, -100.0)).unwrap();
        assert_eq!(model.point(end).unwrap().position(), Coordinate::new(100.0, -113.0));
    }
}
