//! Routing raw touch batches to the buttons they belong to.
//!
//! Hosts usually receive touches per frame without knowing which button is
//! under each finger. [`TouchRouter`] hit-tests every new touch once, binds it
//! to the button it landed on, and sends every later phase of that touch to
//! the same button, even after the touch has left its bounds. Bindings are
//! dropped when the touch ends or is cancelled.
//!
//! # Example
//!
//! ```
//! use horizon_sprite::{
//!     ButtonScene, ButtonStatus, Point, Size, SpriteButton, Touch, TouchPhase, TouchRouter,
//!     TouchSet,
//! };
//!
//! let mut scene = ButtonScene::new();
//! let mut button = SpriteButton::default().with_size(Size::new(20.0, 20.0));
//! button.on_touches_began(|_, _| {});
//! let id = scene.insert(button);
//!
//! let mut router = TouchRouter::new();
//! let down = TouchSet::single(Touch::new(1, Point::new(2.0, 2.0)));
//! assert_eq!(router.route(&mut scene, TouchPhase::Began, &down, None), vec![id]);
//! assert_eq!(scene.button(id).map(SpriteButton::status), Some(ButtonStatus::Tapped));
//! ```

use std::collections::HashMap;

use horizon_sprite_core::ButtonId;
use horizon_sprite_core::logging::{span_names, targets};

use crate::scene::ButtonScene;
use crate::touch::{EventContext, TouchId, TouchPhase, TouchSet};

/// Binds touches to buttons for the lifetime of each contact.
#[derive(Debug, Clone, Default)]
pub struct TouchRouter {
    bindings: HashMap<TouchId, ButtonId>,
}

impl TouchRouter {
    /// Create a router with no bound touches.
    pub fn new() -> Self {
        Self::default()
    }

    /// The button a touch is bound to.
    pub fn binding(&self, touch: TouchId) -> Option<ButtonId> {
        self.bindings.get(&touch).copied()
    }

    /// Number of bound touches.
    pub fn active_touches(&self) -> usize {
        self.bindings.len()
    }

    /// Forget every binding without notifying any button.
    pub fn reset(&mut self) {
        self.bindings.clear();
    }

    /// Deliver one batch.
    ///
    /// Touches are grouped per target button and each button receives one
    /// batch containing its touches. Returns the buttons that received a
    /// batch, in the order they first appear in `touches`.
    pub fn route(
        &mut self,
        scene: &mut ButtonScene,
        phase: TouchPhase,
        touches: &TouchSet,
        context: Option<&EventContext>,
    ) -> Vec<ButtonId> {
        let _span =
            tracing::trace_span!(target: targets::ROUTER, span_names::ROUTE, ?phase).entered();

        let mut batches: Vec<(ButtonId, TouchSet)> = Vec::new();
        for touch in touches {
            let target = match phase {
                TouchPhase::Began => {
                    let hit = scene.hit_test(touch.location);
                    if let Some(id) = hit {
                        self.bindings.insert(touch.id, id);
                    }
                    hit
                }
                TouchPhase::Moved => self.binding(touch.id),
                TouchPhase::Ended | TouchPhase::Cancelled => self.bindings.remove(&touch.id),
            };

            let Some(target) = target else {
                tracing::trace!(
                    target: targets::ROUTER,
                    touch = touch.id.0,
                    ?phase,
                    "touch hit no button"
                );
                continue;
            };
            match batches.iter_mut().find(|(id, _)| *id == target) {
                Some((_, batch)) => batch.insert(*touch),
                None => batches.push((target, TouchSet::single(*touch))),
            }
        }

        let mut delivered = Vec::with_capacity(batches.len());
        for (target, batch) in batches {
            if scene.deliver(target, phase, &batch, context).is_err() {
                tracing::debug!(
                    target: targets::ROUTER,
                    button = ?target,
                    "dropping bindings of removed button"
                );
                self.bindings.retain(|_, bound| *bound != target);
                continue;
            }
            delivered.push(target);
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{ButtonStatus, SpriteButton};
    use crate::touch::Touch;
    use horizon_sprite_render::{Point, Size};

    fn interactive_at(x: f32) -> SpriteButton {
        let mut button = SpriteButton::default()
            .with_size(Size::new(10.0, 10.0))
            .with_position(Point::new(x, 0.0));
        button.on_touches_began(|_, _| {});
        button
    }

    fn touch(id: u64, x: f32) -> TouchSet {
        TouchSet::single(Touch::new(id, Point::new(x, 0.0)))
    }

    #[test]
    fn test_binding_lifecycle() {
        let mut scene = ButtonScene::new();
        let a = scene.insert(interactive_at(0.0));
        let mut router = TouchRouter::new();

        assert_eq!(router.route(&mut scene, TouchPhase::Began, &touch(1, 0.0), None), vec![a]);
        assert_eq!(router.binding(TouchId(1)), Some(a));

        // Moves go to the bound button even far outside its bounds.
        assert_eq!(router.route(&mut scene, TouchPhase::Moved, &touch(1, 100.0), None), vec![a]);
        assert_eq!(router.route(&mut scene, TouchPhase::Ended, &touch(1, 100.0), None), vec![a]);
        assert_eq!(router.active_touches(), 0);
        assert_eq!(scene.button(a).map(SpriteButton::status), Some(ButtonStatus::Normal));
    }

    #[test]
    fn test_miss_is_dropped() {
        let mut scene = ButtonScene::new();
        scene.insert(interactive_at(0.0));
        let mut router = TouchRouter::new();

        assert!(router.route(&mut scene, TouchPhase::Began, &touch(1, 50.0), None).is_empty());
        assert!(router.route(&mut scene, TouchPhase::Moved, &touch(1, 0.0), None).is_empty());
        assert_eq!(router.active_touches(), 0);
    }

    #[test]
    fn test_touches_split_between_buttons() {
        let mut scene = ButtonScene::new();
        let a = scene.insert(interactive_at(0.0));
        let b = scene.insert(interactive_at(30.0));
        let mut router = TouchRouter::new();

        let touches: TouchSet = [
            Touch::new(1, Point::new(0.0, 0.0)),
            Touch::new(2, Point::new(30.0, 0.0)),
            Touch::new(3, Point::new(1.0, 1.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(router.route(&mut scene, TouchPhase::Began, &touches, None), vec![a, b]);
        assert_eq!(router.active_touches(), 3);

        router.reset();
        assert_eq!(router.active_touches(), 0);
    }

    #[test]
    fn test_removed_button_releases_bindings() {
        let mut scene = ButtonScene::new();
        let a = scene.insert(interactive_at(0.0));
        let mut router = TouchRouter::new();

        router.route(&mut scene, TouchPhase::Began, &touch(1, 0.0), None);
        scene.remove(a);
        assert!(router.route(&mut scene, TouchPhase::Moved, &touch(1, 0.0), None).is_empty());
        assert_eq!(router.binding(TouchId(1)), None);
    }
}
