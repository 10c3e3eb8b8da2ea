//! Button groups.
//!
//! A [`ButtonGroup`] is a set of [`ButtonId`]s. It never owns buttons and
//! never dereferences them on its own; every lookup goes through the
//! [`ButtonScene`](crate::ButtonScene) that holds both, where a removed button
//! simply no longer resolves.
//!
//! # Kinds
//!
//! - [`GroupKind::Plain`]: membership only
//! - [`GroupKind::ToggleExclusive`]: at most one member is toggled on. The
//!   group registers one shared `ToggledOn` listener on every member; when it
//!   fires, every other member is switched off.
//!
//! Exclusive groups can only be created by a scene, because the shared
//! listener needs the group's id:
//!
//! ```
//! use horizon_sprite::{ButtonScene, GroupKind, SpriteButton};
//!
//! let mut scene = ButtonScene::new();
//! let a = scene.insert(SpriteButton::default().with_toggle_mode(true));
//! let group = scene.create_group(GroupKind::ToggleExclusive);
//! scene.add_to_group(group, a).unwrap();
//!
//! assert!(scene.group(group).is_some_and(|g| g.contains(a)));
//! ```

use std::collections::HashSet;

use horizon_sprite_core::{ButtonId, GroupId};

use crate::button::{EventKind, EventListener};

/// What a group does with its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupKind {
    /// Membership tracking only.
    #[default]
    Plain,
    /// Keep at most one toggled-on member.
    ToggleExclusive,
}

/// A non-owning set of buttons.
#[derive(Debug, Clone, Default)]
pub struct ButtonGroup {
    kind: GroupKind,
    members: HashSet<ButtonId>,
    /// Shared `ToggledOn` listener of an exclusive group.
    listener: Option<EventListener>,
}

impl ButtonGroup {
    /// Create an empty plain group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty exclusive group whose listener reports to `id`.
    pub(crate) fn exclusive(id: GroupId) -> Self {
        let listener = EventListener::new(EventKind::ToggledOn, move |scene, event| {
            scene.enforce_exclusive(id, event.button, event.context);
        });
        Self {
            kind: GroupKind::ToggleExclusive,
            members: HashSet::new(),
            listener: Some(listener),
        }
    }

    /// What this group does with its members.
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Check if the group keeps its members mutually exclusive.
    pub fn is_exclusive(&self) -> bool {
        self.kind == GroupKind::ToggleExclusive
    }

    /// Add a button. Returns `false` if it was already a member.
    pub fn add(&mut self, button: ButtonId) -> bool {
        self.members.insert(button)
    }

    /// Remove a button. Returns `false` if it was not a member.
    pub fn remove(&mut self, button: ButtonId) -> bool {
        self.members.remove(&button)
    }

    /// The members, in no particular order.
    pub fn buttons(&self) -> Vec<ButtonId> {
        self.members.iter().copied().collect()
    }

    /// Check if a button is a member.
    pub fn contains(&self, button: ButtonId) -> bool {
        self.members.contains(&button)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn listener(&self) -> Option<&EventListener> {
        self.listener.as_ref()
    }
}

static_assertions::assert_impl_all!(ButtonGroup: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_test_ids(count: usize) -> Vec<ButtonId> {
        let mut map: SlotMap<ButtonId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_group_creation() {
        let group = ButtonGroup::new();
        assert_eq!(group.kind(), GroupKind::Plain);
        assert!(!group.is_exclusive());
        assert!(group.is_empty());
        assert!(group.listener().is_none());
    }

    #[test]
    fn test_add_is_idempotent() {
        let ids = make_test_ids(2);
        let mut group = ButtonGroup::new();

        assert!(group.add(ids[0]));
        assert!(!group.add(ids[0]));
        assert!(group.add(ids[1]));
        assert_eq!(group.len(), 2);

        let mut members = group.buttons();
        members.sort();
        assert_eq!(members, ids);
    }

    #[test]
    fn test_add_then_remove_leaves_group_empty() {
        let ids = make_test_ids(1);
        let mut group = ButtonGroup::new();
        group.add(ids[0]);
        assert!(group.remove(ids[0]));
        assert!(group.is_empty());
        assert!(group.buttons().is_empty());
    }

    #[test]
    fn test_remove_non_member_is_noop() {
        let ids = make_test_ids(2);
        let mut group = ButtonGroup::new();
        group.add(ids[0]);

        assert!(!group.remove(ids[1]));
        assert_eq!(group.buttons(), vec![ids[0]]);
    }

    #[test]
    fn test_exclusive_group_has_toggled_on_listener() {
        let mut groups: SlotMap<GroupId, ()> = SlotMap::with_key();
        let group = ButtonGroup::exclusive(groups.insert(()));
        assert!(group.is_exclusive());
        assert_eq!(group.listener().map(EventListener::kind), Some(EventKind::ToggledOn));
    }
}
