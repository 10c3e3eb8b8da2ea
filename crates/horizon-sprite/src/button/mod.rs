//! The touch-reactive sprite button.
//!
//! [`SpriteButton`] combines a [`SpriteNode`] with an interaction state
//! machine, per-status appearance overrides and an ordered listener list.
//! Buttons live in a [`ButtonScene`](crate::ButtonScene), which delivers touch
//! batches to them and runs their listeners.
//!
//! # Move policies
//!
//! A held button reacts to movement according to its [`MovePolicy`]:
//!
//! - [`MovePolicy::AlwaysHeld`]: stays pressed until the touch lifts
//! - [`MovePolicy::ReleaseOut`]: releases once every touch has left the bounds
//! - [`MovePolicy::ReleaseFast`]: releases on the first movement
//! - [`MovePolicy::Reentry`]: lets go outside and presses again inside
//!
//! # Toggle mode
//!
//! With toggle mode on, a completed press latches the button to
//! [`ButtonStatus::ToggledOn`] and the next one switches it back off.
//! Cancelling a press restores whatever toggle state preceded it.
//!
//! # Example
//!
//! ```
//! use horizon_sprite::{ButtonStatus, Color, MovePolicy, Size, SpriteButton};
//!
//! let button = SpriteButton::new(None, Color::BLUE, Size::new(80.0, 30.0))
//!     .with_move_policy(MovePolicy::ReleaseOut)
//!     .with_tapped_color(Color::RED)
//!     .with_toggle_mode(true);
//!
//! assert_eq!(button.status(), ButtonStatus::Normal);
//! assert_eq!(button.tapped_color(), Some(Color::RED));
//! assert!(button.is_user_interaction_enabled());
//! ```

mod appearance;
mod listener;
mod machine;

pub use appearance::{AppearanceSlot, ButtonVisualState};
pub use listener::{ButtonEvent, EventKind, EventListener, ListenerRegistry};
pub use machine::{ButtonStatus, MovePolicy};

use horizon_sprite_core::logging::targets;
use horizon_sprite_core::{GroupId, ListenerId};
use horizon_sprite_render::{Color, Point, Size, Texture};

use crate::node::SpriteNode;
use crate::scene::ButtonScene;
use crate::touch::{TouchPhase, TouchSet};
use machine::InteractionStateMachine;

/// A sprite that reacts to touches like a button.
#[derive(Debug, Clone)]
pub struct SpriteButton {
    node: SpriteNode,
    machine: InteractionStateMachine,
    appearance: ButtonVisualState,
    listeners: ListenerRegistry,
    /// Exclusive group this button belongs to, maintained by the scene.
    toggle_group: Option<GroupId>,
    /// Set by the first listener, override, policy or toggle-mode write.
    interaction_configured: bool,
}

impl Default for SpriteButton {
    fn default() -> Self {
        Self::new(None, Color::WHITE, Size::ZERO)
    }
}

impl SpriteButton {
    /// Create a button with a base texture, base color and size.
    pub fn new(texture: Option<Texture>, color: Color, size: Size) -> Self {
        Self {
            node: SpriteNode::new(texture, color, size),
            machine: InteractionStateMachine::default(),
            appearance: ButtonVisualState::new(),
            listeners: ListenerRegistry::new(),
            toggle_group: None,
            interaction_configured: false,
        }
    }

    /// Set the move policy using builder pattern.
    pub fn with_move_policy(mut self, policy: MovePolicy) -> Self {
        self.set_move_policy(policy);
        self
    }

    /// Enable or disable toggle mode using builder pattern.
    pub fn with_toggle_mode(mut self, enabled: bool) -> Self {
        self.set_toggle_mode(enabled);
        self
    }

    /// Set the tapped color using builder pattern.
    pub fn with_tapped_color(mut self, color: Color) -> Self {
        self.set_tapped_color(Some(color));
        self
    }

    /// Set the tapped texture using builder pattern.
    pub fn with_tapped_texture(mut self, texture: Texture) -> Self {
        self.set_tapped_texture(Some(texture));
        self
    }

    /// Set the disabled color using builder pattern.
    pub fn with_disabled_color(mut self, color: Color) -> Self {
        self.set_disabled_color(Some(color));
        self
    }

    /// Set the disabled texture using builder pattern.
    pub fn with_disabled_texture(mut self, texture: Texture) -> Self {
        self.set_disabled_texture(Some(texture));
        self
    }

    /// Set the toggled-on color using builder pattern.
    pub fn with_toggled_on_color(mut self, color: Color) -> Self {
        self.set_toggled_on_color(Some(color));
        self
    }

    /// Set the toggled-on texture using builder pattern.
    pub fn with_toggled_on_texture(mut self, texture: Texture) -> Self {
        self.set_toggled_on_texture(Some(texture));
        self
    }

    /// Set the size using builder pattern.
    pub fn with_size(mut self, size: Size) -> Self {
        self.node.set_size(size);
        self
    }

    /// Set the position using builder pattern.
    pub fn with_position(mut self, position: Point) -> Self {
        self.node.set_position(position);
        self
    }

    /// Set the stacking order using builder pattern.
    pub fn with_z_position(mut self, z: f32) -> Self {
        self.node.set_z_position(z);
        self
    }

    // =========================================================================
    // Node
    // =========================================================================

    /// The node this button draws through.
    pub fn node(&self) -> &SpriteNode {
        &self.node
    }

    /// Position of the button's center in scene space.
    pub fn position(&self) -> Point {
        self.node.position()
    }

    /// Move the button's center.
    pub fn set_position(&mut self, position: Point) {
        self.node.set_position(position);
    }

    /// Unscaled size of the button.
    pub fn size(&self) -> Size {
        self.node.size()
    }

    /// Set the unscaled size of the button.
    pub fn set_size(&mut self, size: Size) {
        self.node.set_size(size);
    }

    /// Set horizontal and vertical scale factors.
    pub fn set_scale(&mut self, x_scale: f32, y_scale: f32) {
        self.node.set_scale(x_scale, y_scale);
    }

    /// Set the rotation in radians.
    pub fn set_rotation(&mut self, radians: f32) {
        self.node.set_rotation(radians);
    }

    /// Stacking order used for hit testing.
    pub fn z_position(&self) -> f32 {
        self.node.z_position()
    }

    /// Set the stacking order.
    pub fn set_z_position(&mut self, z: f32) {
        self.node.set_z_position(z);
    }

    /// Check a scene-space point against the button's bounds.
    pub fn contains_point(&self, scene_point: Point) -> bool {
        self.node.contains_point(scene_point)
    }

    /// Whether every touch of a non-empty set lies outside the bounds.
    pub fn all_outside(&self, touches: &TouchSet) -> bool {
        !touches.is_empty() && touches.iter().all(|t| !self.contains_point(t.location))
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// The current interaction status.
    pub fn status(&self) -> ButtonStatus {
        self.machine.status()
    }

    /// Check if the button is disabled.
    pub fn is_disabled(&self) -> bool {
        self.machine.is_disabled()
    }

    /// Check if the button is toggled on, including while a press is held on
    /// a toggled-on button.
    pub fn is_toggled_on(&self) -> bool {
        self.machine.is_toggled_on()
    }

    /// The move policy.
    pub fn move_policy(&self) -> MovePolicy {
        self.machine.move_policy()
    }

    /// Change the move policy. An ongoing press is not re-evaluated.
    pub fn set_move_policy(&mut self, policy: MovePolicy) {
        self.machine.set_move_policy(policy);
        self.mark_configured();
    }

    /// Check if toggle mode is enabled.
    pub fn is_toggle_mode_enabled(&self) -> bool {
        self.machine.toggle_mode()
    }

    /// Enable or disable toggle mode.
    ///
    /// Turning toggle mode off switches a toggled-on button back to normal
    /// without notifying listeners.
    pub fn set_toggle_mode(&mut self, enabled: bool) {
        let before = self.status();
        if self.machine.set_toggle_mode(enabled) {
            self.status_changed(before, "toggle mode off");
        }
        self.mark_configured();
    }

    /// Ignore all touch input until [`enable`](Self::enable) is called.
    ///
    /// Any press in progress is dropped without notifying listeners.
    pub fn disable(&mut self) {
        let before = self.status();
        if self.machine.disable() {
            self.status_changed(before, "disable");
        }
        self.refresh_interaction();
    }

    /// Accept touch input again, returning to [`ButtonStatus::Normal`].
    pub fn enable(&mut self) {
        let before = self.status();
        if self.machine.enable() {
            self.status_changed(before, "enable");
        }
        self.refresh_interaction();
    }

    /// Call [`disable`](Self::disable) or [`enable`](Self::enable).
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            self.disable();
        } else {
            self.enable();
        }
    }

    /// Switch a toggle-mode button on or off without notifying listeners.
    ///
    /// Ignored while disabled or when toggle mode is off. During a press only
    /// the status restored by a cancellation changes.
    pub fn set_toggled_on(&mut self, on: bool) {
        let before = self.status();
        if self.machine.set_toggled_on(on) {
            self.status_changed(before, "set toggled on");
        }
    }

    /// The exclusive group this button is registered in, if any.
    pub fn toggle_group(&self) -> Option<GroupId> {
        self.toggle_group
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    /// The displayed color.
    pub fn color(&self) -> Color {
        self.node.color()
    }

    /// The displayed texture.
    pub fn texture(&self) -> Option<&Texture> {
        self.node.texture()
    }

    /// The normal color the button returns to.
    pub fn original_color(&self) -> Color {
        self.appearance.base_color().unwrap_or(self.node.color())
    }

    /// The normal texture the button returns to.
    pub fn original_texture(&self) -> Option<&Texture> {
        if self.appearance.has_base() {
            self.appearance.base_texture()
        } else {
            self.node.texture()
        }
    }

    /// Set the normal color.
    ///
    /// Shown at once when the button is normal, otherwise when it returns to
    /// normal.
    pub fn set_color(&mut self, color: Color) {
        self.appearance.set_base_color(color);
        if self.status() == ButtonStatus::Normal {
            self.node.set_color(color);
        }
    }

    /// Set the normal texture.
    pub fn set_texture(&mut self, texture: Option<Texture>) {
        self.appearance.set_base_texture(texture.clone());
        if self.status() == ButtonStatus::Normal {
            self.node.set_texture(texture);
        }
    }

    /// The color override of a slot.
    pub fn slot_color(&self, slot: AppearanceSlot) -> Option<Color> {
        self.appearance.color(slot)
    }

    /// Set or clear the color override of a non-normal slot.
    pub fn set_slot_color(&mut self, slot: AppearanceSlot, color: Option<Color>) {
        self.appearance.set_color(slot, color, &self.node);
        self.mark_configured();
        self.refresh_appearance();
    }

    /// The texture override of a slot.
    pub fn slot_texture(&self, slot: AppearanceSlot) -> Option<&Texture> {
        self.appearance.texture(slot)
    }

    /// Set or clear the texture override of a non-normal slot.
    pub fn set_slot_texture(&mut self, slot: AppearanceSlot, texture: Option<Texture>) {
        self.appearance.set_texture(slot, texture, &self.node);
        self.mark_configured();
        self.refresh_appearance();
    }

    /// Color shown while pressed.
    pub fn tapped_color(&self) -> Option<Color> {
        self.slot_color(AppearanceSlot::Tapped)
    }

    /// Set the color shown while pressed.
    pub fn set_tapped_color(&mut self, color: Option<Color>) {
        self.set_slot_color(AppearanceSlot::Tapped, color);
    }

    /// Texture shown while pressed.
    pub fn tapped_texture(&self) -> Option<&Texture> {
        self.slot_texture(AppearanceSlot::Tapped)
    }

    /// Set the texture shown while pressed.
    pub fn set_tapped_texture(&mut self, texture: Option<Texture>) {
        self.set_slot_texture(AppearanceSlot::Tapped, texture);
    }

    /// Color shown while disabled.
    pub fn disabled_color(&self) -> Option<Color> {
        self.slot_color(AppearanceSlot::Disabled)
    }

    /// Set the color shown while disabled.
    pub fn set_disabled_color(&mut self, color: Option<Color>) {
        self.set_slot_color(AppearanceSlot::Disabled, color);
    }

    /// Texture shown while disabled.
    pub fn disabled_texture(&self) -> Option<&Texture> {
        self.slot_texture(AppearanceSlot::Disabled)
    }

    /// Set the texture shown while disabled.
    pub fn set_disabled_texture(&mut self, texture: Option<Texture>) {
        self.set_slot_texture(AppearanceSlot::Disabled, texture);
    }

    /// Color shown while toggled on.
    pub fn toggled_on_color(&self) -> Option<Color> {
        self.slot_color(AppearanceSlot::ToggledOn)
    }

    /// Set the color shown while toggled on.
    pub fn set_toggled_on_color(&mut self, color: Option<Color>) {
        self.set_slot_color(AppearanceSlot::ToggledOn, color);
    }

    /// Texture shown while toggled on.
    pub fn toggled_on_texture(&self) -> Option<&Texture> {
        self.slot_texture(AppearanceSlot::ToggledOn)
    }

    /// Set the texture shown while toggled on.
    pub fn set_toggled_on_texture(&mut self, texture: Option<Texture>) {
        self.set_slot_texture(AppearanceSlot::ToggledOn, texture);
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a listener and return its id.
    ///
    /// Registering a listener whose id is already present is a no-op.
    pub fn add_listener(&mut self, listener: EventListener) -> ListenerId {
        let id = listener.id();
        self.listeners.add(listener);
        self.mark_configured();
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Check if a listener is registered.
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.count(kind)
    }

    /// Remove every listener.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Listen for presses starting.
    pub fn on_touches_began<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync + 'static,
    {
        self.add_listener(EventListener::new(EventKind::TouchesBegan, handler))
    }

    /// Listen for touch movement.
    pub fn on_touches_moved<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync + 'static,
    {
        self.add_listener(EventListener::new(EventKind::TouchesMoved, handler))
    }

    /// Listen for presses being released.
    pub fn on_touches_ended<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync + 'static,
    {
        self.add_listener(EventListener::new(EventKind::TouchesEnded, handler))
    }

    /// Alias of [`on_touches_ended`](Self::on_touches_ended).
    pub fn on_touches_up<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync + 'static,
    {
        self.on_touches_ended(handler)
    }

    /// Listen for presses cancelled by the host.
    pub fn on_touches_cancelled<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync + 'static,
    {
        self.add_listener(EventListener::new(EventKind::TouchesCancelled, handler))
    }

    /// Listen for the button latching on.
    pub fn on_toggled_on<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync + 'static,
    {
        self.add_listener(EventListener::new(EventKind::ToggledOn, handler))
    }

    /// Listen for the button switching off.
    pub fn on_toggled_off<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync + 'static,
    {
        self.add_listener(EventListener::new(EventKind::ToggledOff, handler))
    }

    // =========================================================================
    // Input gating
    // =========================================================================

    /// Whether the host should deliver touches to this button.
    ///
    /// True once the button has been configured (a listener, an appearance
    /// override, a move policy or toggle mode was set) and while it is not
    /// disabled.
    pub fn is_user_interaction_enabled(&self) -> bool {
        self.node.is_user_interaction_enabled()
    }

    fn mark_configured(&mut self) {
        self.interaction_configured = true;
        self.refresh_interaction();
    }

    fn refresh_interaction(&mut self) {
        let enabled = self.interaction_configured && !self.is_disabled();
        self.node.set_user_interaction_enabled(enabled);
    }

    // =========================================================================
    // Scene hooks
    // =========================================================================

    pub(crate) fn set_toggle_group(&mut self, group: Option<GroupId>) {
        self.toggle_group = group;
    }

    /// Run one touch batch through the state machine.
    ///
    /// `keep_toggled_on` is set when the button is the active member of an
    /// exclusive group. Returns the event kinds to dispatch, in order.
    pub(crate) fn handle_touches(
        &mut self,
        phase: TouchPhase,
        touches: &TouchSet,
        keep_toggled_on: bool,
    ) -> Vec<EventKind> {
        if self.is_disabled() {
            tracing::trace!(target: targets::BUTTON, ?phase, "input ignored while disabled");
            return Vec::new();
        }

        let before = self.status();
        let events = match phase {
            TouchPhase::Began => self.machine.touches_began(),
            TouchPhase::Moved => {
                let all_outside = self.all_outside(touches);
                self.machine.touches_moved(all_outside, keep_toggled_on)
            }
            TouchPhase::Ended => self.machine.touches_ended(keep_toggled_on),
            TouchPhase::Cancelled => self.machine.touches_cancelled(),
        };
        if self.status() != before {
            self.status_changed(before, "touch");
        }
        events
    }

    /// Switch off on behalf of an exclusive group. Returns `true` if the
    /// button was toggled on.
    pub(crate) fn switch_off(&mut self) -> bool {
        let before = self.status();
        let was_on = self.machine.switch_off();
        if self.status() != before {
            self.status_changed(before, "group switch off");
        }
        was_on
    }

    pub(crate) fn listener_snapshot(&self, kind: EventKind) -> Vec<EventListener> {
        self.listeners.snapshot(kind)
    }

    fn status_changed(&mut self, from: ButtonStatus, cause: &'static str) {
        let to = self.status();
        tracing::trace!(target: targets::BUTTON, ?from, ?to, cause, "button status changed");
        self.refresh_appearance();
    }

    fn refresh_appearance(&mut self) {
        let slot = AppearanceSlot::from(self.status());
        if slot == AppearanceSlot::Normal && !self.appearance.has_base() {
            return;
        }
        self.appearance.show(slot, &mut self.node);
    }
}

static_assertions::assert_impl_all!(SpriteButton: Send, Sync);
