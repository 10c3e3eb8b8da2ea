//! The scene arena that owns buttons and groups.
//!
//! [`ButtonScene`] stores every [`SpriteButton`] and [`ButtonGroup`] in a slot
//! map and hands out generational [`ButtonId`]/[`GroupId`] handles. Touch
//! batches enter through the `touches_*` methods, which run the button's state
//! machine and then call its listeners with the scene itself, so a handler may
//! freely reach back into any button or group.
//!
//! # Dispatch
//!
//! A single transition can produce several event kinds (a toggle release
//! produces `ToggledOn` then `TouchesEnded`). Each kind is dispatched from a
//! fresh snapshot of the button's listeners. If a handler removes the button
//! from the scene, the kinds still pending are dropped.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use horizon_sprite::{ButtonScene, Point, Size, SpriteButton, Touch, TouchSet};
//!
//! let mut scene = ButtonScene::new();
//! let releases = Arc::new(AtomicUsize::new(0));
//!
//! let mut button = SpriteButton::default().with_size(Size::new(40.0, 20.0));
//! let counter = releases.clone();
//! button.on_touches_ended(move |_scene, _event| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//! let id = scene.insert(button);
//!
//! let touches = TouchSet::single(Touch::new(1, Point::new(0.0, 0.0)));
//! scene.touches_began(id, &touches, None).unwrap();
//! scene.touches_ended(id, &touches, None).unwrap();
//! assert_eq!(releases.load(Ordering::SeqCst), 1);
//! ```

use slotmap::SlotMap;

use horizon_sprite_core::logging::{span_names, targets};
use horizon_sprite_core::{ButtonId, GroupId, PerfSpan, Result, SceneError};
use horizon_sprite_render::Point;

use crate::button::{ButtonEvent, ButtonStatus, EventKind, SpriteButton};
use crate::group::{ButtonGroup, GroupKind};
use crate::touch::{EventContext, TouchPhase, TouchSet};

/// Owner of buttons and groups.
#[derive(Debug, Default)]
pub struct ButtonScene {
    buttons: SlotMap<ButtonId, SpriteButton>,
    /// Insertion order, used for listing and hit-test tie breaking.
    order: Vec<ButtonId>,
    groups: SlotMap<GroupId, ButtonGroup>,
}

impl ButtonScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Buttons
    // =========================================================================

    /// Take ownership of a button and return its handle.
    pub fn insert(&mut self, mut button: SpriteButton) -> ButtonId {
        button.set_toggle_group(None);
        let id = self.buttons.insert(button);
        self.order.push(id);
        tracing::trace!(target: targets::SCENE, button = ?id, "button inserted");
        id
    }

    /// Remove a button, dropping it from every group.
    ///
    /// The handle never resolves again. Returns `None` for a stale handle.
    pub fn remove(&mut self, id: ButtonId) -> Option<SpriteButton> {
        let mut button = self.buttons.remove(id)?;
        self.order.retain(|&other| other != id);

        for group in self.groups.values_mut() {
            if group.remove(id)
                && let Some(listener) = group.listener()
            {
                button.remove_listener(listener.id());
            }
        }
        button.set_toggle_group(None);

        tracing::trace!(target: targets::SCENE, button = ?id, "button removed");
        Some(button)
    }

    /// Look up a button.
    pub fn button(&self, id: ButtonId) -> Option<&SpriteButton> {
        self.buttons.get(id)
    }

    /// Look up a button mutably.
    pub fn button_mut(&mut self, id: ButtonId) -> Option<&mut SpriteButton> {
        self.buttons.get_mut(id)
    }

    /// Check if a handle resolves.
    pub fn contains(&self, id: ButtonId) -> bool {
        self.buttons.contains_key(id)
    }

    /// Number of buttons.
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Check if the scene holds no buttons.
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Button handles in insertion order.
    pub fn button_ids(&self) -> &[ButtonId] {
        &self.order
    }

    /// The topmost interactive button containing a scene point.
    ///
    /// Highest `z_position` wins; among equals the later-inserted button wins.
    pub fn hit_test(&self, point: Point) -> Option<ButtonId> {
        let mut best: Option<(ButtonId, f32)> = None;
        for &id in &self.order {
            let Some(button) = self.buttons.get(id) else {
                continue;
            };
            if !button.is_user_interaction_enabled() || !button.contains_point(point) {
                continue;
            }
            let z = button.z_position();
            if best.is_none_or(|(_, best_z)| z >= best_z) {
                best = Some((id, z));
            }
        }
        best.map(|(id, _)| id)
    }

    // =========================================================================
    // Touch delivery
    // =========================================================================

    /// Deliver a `TouchesBegan` batch to a button.
    pub fn touches_began(
        &mut self,
        id: ButtonId,
        touches: &TouchSet,
        context: Option<&EventContext>,
    ) -> Result<()> {
        self.deliver(id, TouchPhase::Began, touches, context)
    }

    /// Deliver a `TouchesMoved` batch to a button.
    pub fn touches_moved(
        &mut self,
        id: ButtonId,
        touches: &TouchSet,
        context: Option<&EventContext>,
    ) -> Result<()> {
        self.deliver(id, TouchPhase::Moved, touches, context)
    }

    /// Deliver a `TouchesEnded` batch to a button.
    pub fn touches_ended(
        &mut self,
        id: ButtonId,
        touches: &TouchSet,
        context: Option<&EventContext>,
    ) -> Result<()> {
        self.deliver(id, TouchPhase::Ended, touches, context)
    }

    /// Deliver a `TouchesCancelled` batch to a button.
    pub fn touches_cancelled(
        &mut self,
        id: ButtonId,
        touches: &TouchSet,
        context: Option<&EventContext>,
    ) -> Result<()> {
        self.deliver(id, TouchPhase::Cancelled, touches, context)
    }

    /// Deliver a batch in any phase to a button.
    pub fn deliver(
        &mut self,
        id: ButtonId,
        phase: TouchPhase,
        touches: &TouchSet,
        context: Option<&EventContext>,
    ) -> Result<()> {
        let keep_toggled_on = self.is_locked_on(id);
        let Some(button) = self.buttons.get_mut(id) else {
            tracing::warn!(
                target: targets::SCENE,
                button = ?id,
                ?phase,
                "touches for unknown button"
            );
            return Err(SceneError::InvalidButtonId(id));
        };
        let kinds = button.handle_touches(phase, touches, keep_toggled_on);
        self.dispatch(id, &kinds, touches, context);
        Ok(())
    }

    /// Whether a release must leave the button toggled on: it belongs to a
    /// live exclusive group.
    fn is_locked_on(&self, id: ButtonId) -> bool {
        self.buttons
            .get(id)
            .and_then(SpriteButton::toggle_group)
            .and_then(|gid| self.groups.get(gid))
            .is_some_and(|group| group.contains(id))
    }

    // `instrument` only takes a literal target; keep it equal to `targets::SCENE`.
    #[tracing::instrument(
        skip_all,
        target = "horizon_sprite::scene",
        level = "trace",
        fields(button = ?id)
    )]
    fn dispatch(
        &mut self,
        id: ButtonId,
        kinds: &[EventKind],
        touches: &TouchSet,
        context: Option<&EventContext>,
    ) {
        if kinds.is_empty() {
            return;
        }
        let _perf = PerfSpan::new(span_names::DISPATCH);

        for &kind in kinds {
            let Some(button) = self.buttons.get(id) else {
                tracing::trace!(
                    target: targets::SCENE,
                    button = ?id,
                    ?kind,
                    "button removed during dispatch"
                );
                break;
            };
            let listeners = button.listener_snapshot(kind);
            let event = ButtonEvent {
                kind,
                button: id,
                touches,
                context,
            };
            for listener in &listeners {
                listener.invoke(self, &event);
            }
        }
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Create an empty group.
    pub fn create_group(&mut self, kind: GroupKind) -> GroupId {
        let id = self.groups.insert_with_key(|gid| match kind {
            GroupKind::Plain => ButtonGroup::new(),
            GroupKind::ToggleExclusive => ButtonGroup::exclusive(gid),
        });
        tracing::trace!(target: targets::GROUP, group = ?id, ?kind, "group created");
        id
    }

    /// Remove a group, detaching it from its members.
    pub fn remove_group(&mut self, id: GroupId) -> Option<ButtonGroup> {
        let group = self.groups.remove(id)?;
        if let Some(listener) = group.listener() {
            for member in group.buttons() {
                if let Some(button) = self.buttons.get_mut(member) {
                    button.remove_listener(listener.id());
                    button.set_toggle_group(None);
                }
            }
        }
        tracing::trace!(target: targets::GROUP, group = ?id, "group removed");
        Some(group)
    }

    /// Look up a group.
    pub fn group(&self, id: GroupId) -> Option<&ButtonGroup> {
        self.groups.get(id)
    }

    /// Group handles, in no particular order.
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.keys().collect()
    }

    /// Add a button to a group.
    ///
    /// Returns `Ok(false)` if it was already a member. A button can belong to
    /// any number of plain groups but to only one exclusive group.
    pub fn add_to_group(&mut self, group: GroupId, button: ButtonId) -> Result<bool> {
        let Some(entry) = self.groups.get_mut(group) else {
            tracing::warn!(target: targets::GROUP, ?group, "add to unknown group");
            return Err(SceneError::InvalidGroupId(group));
        };
        let Some(member) = self.buttons.get_mut(button) else {
            tracing::warn!(target: targets::GROUP, ?group, ?button, "add of unknown button");
            return Err(SceneError::InvalidButtonId(button));
        };
        if entry.contains(button) {
            return Ok(false);
        }

        if let Some(listener) = entry.listener() {
            if let Some(current) = member.toggle_group() {
                return Err(SceneError::AlreadyInToggleGroup {
                    button,
                    group: current,
                });
            }
            member.add_listener(listener.clone());
            member.set_toggle_group(Some(group));
        }
        entry.add(button);
        tracing::trace!(target: targets::GROUP, ?group, ?button, "button added to group");
        Ok(true)
    }

    /// Remove a button from a group.
    ///
    /// Returns `Ok(false)` if it was not a member.
    pub fn remove_from_group(&mut self, group: GroupId, button: ButtonId) -> Result<bool> {
        let Some(entry) = self.groups.get_mut(group) else {
            tracing::warn!(target: targets::GROUP, ?group, "remove from unknown group");
            return Err(SceneError::InvalidGroupId(group));
        };
        if !entry.remove(button) {
            return Ok(false);
        }
        if let (Some(listener), Some(member)) = (entry.listener(), self.buttons.get_mut(button)) {
            member.remove_listener(listener.id());
            member.set_toggle_group(None);
        }
        tracing::trace!(target: targets::GROUP, ?group, ?button, "button removed from group");
        Ok(true)
    }

    /// The toggled-on member of a group, if any.
    pub fn toggled_on_member(&self, group: GroupId) -> Option<ButtonId> {
        let group = self.groups.get(group)?;
        self.order.iter().copied().find(|&id| {
            group.contains(id)
                && self
                    .buttons
                    .get(id)
                    .is_some_and(|b| b.status() == ButtonStatus::ToggledOn)
        })
    }

    /// Switch off every member of `group` except `source`, announcing
    /// `ToggledOff` for the ones that were on.
    pub(crate) fn enforce_exclusive(
        &mut self,
        group: GroupId,
        source: ButtonId,
        context: Option<&EventContext>,
    ) {
        let Some(entry) = self.groups.get(group) else {
            return;
        };
        if !entry.contains(source) {
            return;
        }
        let peers: Vec<ButtonId> = entry
            .buttons()
            .into_iter()
            .filter(|&id| id != source)
            .collect();
        tracing::debug!(
            target: targets::GROUP,
            ?group,
            ?source,
            peers = peers.len(),
            "enforcing exclusive toggle"
        );

        let no_touches = TouchSet::new();
        for peer in peers {
            let was_on = self
                .buttons
                .get_mut(peer)
                .is_some_and(SpriteButton::switch_off);
            if was_on {
                self.dispatch(peer, &[EventKind::ToggledOff], &no_touches, context);
            }
        }
    }
}

static_assertions::assert_impl_all!(ButtonScene: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_sprite_render::Size;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::button::MovePolicy;
    use crate::touch::Touch;

    fn setup() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("horizon_sprite=trace")
            .with_test_writer()
            .try_init();
    }

    fn tap() -> TouchSet {
        TouchSet::single(Touch::new(1, Point::ZERO))
    }

    fn interactive(size: f32) -> SpriteButton {
        SpriteButton::default()
            .with_size(Size::new(size, size))
            .with_move_policy(MovePolicy::AlwaysHeld)
    }

    #[test]
    fn test_insert_remove() {
        setup();
        let mut scene = ButtonScene::new();
        let a = scene.insert(SpriteButton::default());
        let b = scene.insert(SpriteButton::default());
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.button_ids(), &[a, b]);

        assert!(scene.remove(a).is_some());
        assert!(scene.remove(a).is_none());
        assert!(!scene.contains(a));
        assert_eq!(scene.button_ids(), &[b]);
    }

    #[test]
    fn test_stale_handle_is_an_error() {
        setup();
        let mut scene = ButtonScene::new();
        let a = scene.insert(SpriteButton::default());
        scene.remove(a);
        assert_eq!(scene.touches_began(a, &tap(), None), Err(SceneError::InvalidButtonId(a)));
    }

    #[test]
    fn test_hit_test_prefers_top_then_latest() {
        setup();
        let mut scene = ButtonScene::new();
        let low = scene.insert(interactive(10.0).with_z_position(1.0));
        let high = scene.insert(interactive(10.0).with_z_position(2.0));
        let _under = scene.insert(interactive(10.0).with_z_position(0.0));
        assert_eq!(scene.hit_test(Point::ZERO), Some(high));

        scene.remove(high);
        let twin = scene.insert(interactive(10.0).with_z_position(1.0));
        assert_eq!(scene.hit_test(Point::ZERO), Some(twin));
        assert_ne!(scene.hit_test(Point::ZERO), Some(low));
        assert_eq!(scene.hit_test(Point::new(50.0, 0.0)), None);
    }

    #[test]
    fn test_hit_test_skips_non_interactive() {
        let mut scene = ButtonScene::new();
        let _plain = scene.insert(SpriteButton::default().with_size(Size::new(10.0, 10.0)));
        assert_eq!(scene.hit_test(Point::ZERO), None);

        let configured = scene.insert(interactive(10.0));
        if let Some(button) = scene.button_mut(configured) {
            button.disable();
        }
        assert_eq!(scene.hit_test(Point::ZERO), None);
    }

    #[test]
    fn test_listener_removing_button_stops_dispatch() {
        setup();
        let mut scene = ButtonScene::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let mut button = interactive(10.0).with_toggle_mode(true);
        button.on_toggled_on(|scene, event| {
            scene.remove(event.button);
        });
        let counter = calls.clone();
        button.on_touches_ended(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let id = scene.insert(button);

        scene.touches_began(id, &tap(), None).unwrap();
        scene.touches_ended(id, &tap(), None).unwrap();
        assert!(!scene.contains(id));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_group_bookkeeping() {
        setup();
        let mut scene = ButtonScene::new();
        let a = scene.insert(SpriteButton::default());
        let plain = scene.create_group(GroupKind::Plain);
        let exclusive = scene.create_group(GroupKind::ToggleExclusive);
        let other = scene.create_group(GroupKind::ToggleExclusive);

        assert_eq!(scene.add_to_group(plain, a), Ok(true));
        assert_eq!(scene.add_to_group(plain, a), Ok(false));
        assert_eq!(scene.add_to_group(exclusive, a), Ok(true));
        assert_eq!(scene.button(a).and_then(SpriteButton::toggle_group), Some(exclusive));
        assert_eq!(scene.button(a).map(|b| b.listener_count(EventKind::ToggledOn)), Some(1));
        assert_eq!(
            scene.add_to_group(other, a),
            Err(SceneError::AlreadyInToggleGroup { button: a, group: exclusive })
        );

        assert_eq!(scene.remove_from_group(exclusive, a), Ok(true));
        assert_eq!(scene.remove_from_group(exclusive, a), Ok(false));
        assert_eq!(scene.button(a).map(|b| b.listener_count(EventKind::ToggledOn)), Some(0));
        assert_eq!(scene.button(a).and_then(SpriteButton::toggle_group), None);

        scene.remove(a);
        assert!(scene.group(plain).is_some_and(ButtonGroup::is_empty));
    }

    #[test]
    fn test_unknown_group_is_an_error() {
        let mut scene = ButtonScene::new();
        let a = scene.insert(SpriteButton::default());
        let g = scene.create_group(GroupKind::Plain);
        assert!(scene.remove_group(g).is_some());
        assert_eq!(scene.add_to_group(g, a), Err(SceneError::InvalidGroupId(g)));
        assert_eq!(scene.remove_from_group(g, a), Err(SceneError::InvalidGroupId(g)));
        assert!(scene.group_ids().is_empty());
    }

    #[test]
    fn test_remove_group_unwires_members() {
        let mut scene = ButtonScene::new();
        let a = scene.insert(SpriteButton::default().with_toggle_mode(true));
        let g = scene.create_group(GroupKind::ToggleExclusive);
        scene.add_to_group(g, a).unwrap();

        scene.remove_group(g);
        let button = scene.button(a).unwrap();
        assert_eq!(button.toggle_group(), None);
        assert_eq!(button.listener_count(EventKind::ToggledOn), 0);
    }

    #[test]
    fn test_dispatch_span_uses_scene_target() {
        assert_eq!(targets::SCENE, "horizon_sprite::scene");
    }
}
