//! Group membership.
//!
//! [`PathwayModel::set_group_ref`] and [`PathwayModel::unset_group_ref`] are
//! the only ways to change membership, so the member set of a group and the
//! group ref of its members always agree.

use log::trace;

use crate::{
    error::ModelError,
    identifier::ElementId,
    model::{ElementKind, PathwayModel},
};

impl PathwayModel {
    /// Moves `member` into `group`, leaving its previous group if any.
    ///
    /// Fails when either element is not in the model, when `member` cannot be
    /// grouped, when `group` is not a group, when `member` is already in
    /// `group`, or when the move would make a group contain itself.
    pub fn set_group_ref(&mut self, member: ElementId, group: ElementId) -> Result<(), ModelError> {
        let element = self.element(member)?;
        if !element.kind().is_groupable() {
            return Err(ModelError::WrongKind {
                id: member,
                expected: "groupable element",
                actual: element.kind().name(),
            });
        }
        let previous = element.group_ref();
        self.expect_kind(group, ElementKind::Group)?;

        if previous == Some(group) {
            return Err(ModelError::AlreadyInGroup { member, group });
        }
        if member == group {
            return Err(ModelError::InvalidGroupMembership {
                member,
                group,
                reason: "a group cannot contain itself",
            });
        }
        if self.group_ancestors(group).contains(&member) {
            return Err(ModelError::InvalidGroupMembership {
                member,
                group,
                reason: "the group is nested inside the member",
            });
        }

        if let Some(previous) = previous {
            self.detach_member(member, previous);
        }
        if let Some(data) = self.group_mut(group) {
            data.members_mut().insert(member);
        }
        self.element_mut(member)?.set_group_ref(Some(group));
        trace!(member:% = member, group:% = group; "Joined group");

        if let Some(previous) = previous {
            self.refresh_dependents(previous);
        }
        self.refresh_dependents(group);
        Ok(())
    }

    /// Removes `member` from its group and returns the group it left.
    pub fn unset_group_ref(&mut self, member: ElementId) -> Result<Option<ElementId>, ModelError> {
        let previous = self.element(member)?.group_ref();
        if let Some(group) = previous {
            self.detach_member(member, group);
            self.refresh_dependents(group);
        }
        Ok(previous)
    }

    /// Groups enclosing `id`, innermost first.
    pub fn group_ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut ancestors = Vec::new();
        let mut current = self.get_pathway_element(id).and_then(|e| e.group_ref());
        while let Some(group) = current {
            if ancestors.contains(&group) {
                break;
            }
            ancestors.push(group);
            current = self.get_pathway_element(group).and_then(|e| e.group_ref());
        }
        ancestors
    }

    fn detach_member(&mut self, member: ElementId, group: ElementId) {
        if let Some(data) = self.group_mut(group) {
            data.members_mut().shift_remove(&member);
        }
        if let Some(element) = self.elements.get_mut(&member) {
            element.set_group_ref(None);
        }
    }
}
