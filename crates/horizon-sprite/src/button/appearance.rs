//! Per-status color and texture overrides.
//!
//! [`ButtonVisualState`] stores what a button looks like in each
//! [`AppearanceSlot`] and writes the right values to the [`SpriteNode`] when a
//! slot is shown. The normal look is the node's own color and texture, which
//! is captured as the *base* the first time anything else is about to be
//! shown, so the button can always go back to it.

use std::collections::HashMap;

use horizon_sprite_render::{Color, Texture};

use super::machine::ButtonStatus;
use crate::node::SpriteNode;

/// The appearance slots a button can show, one per [`ButtonStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppearanceSlot {
    /// The base look.
    Normal,
    /// Shown while pressed.
    Tapped,
    /// Shown while disabled.
    Disabled,
    /// Shown while toggled on.
    ToggledOn,
}

impl From<ButtonStatus> for AppearanceSlot {
    fn from(status: ButtonStatus) -> Self {
        match status {
            ButtonStatus::Normal => Self::Normal,
            ButtonStatus::Tapped => Self::Tapped,
            ButtonStatus::Disabled => Self::Disabled,
            ButtonStatus::ToggledOn => Self::ToggledOn,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SlotOverride {
    color: Option<Color>,
    texture: Option<Texture>,
}

#[derive(Debug, Clone)]
struct Base {
    color: Color,
    texture: Option<Texture>,
}

/// Slot overrides plus the captured base look.
#[derive(Debug, Clone, Default)]
pub struct ButtonVisualState {
    overrides: HashMap<AppearanceSlot, SlotOverride>,
    base: Option<Base>,
}

impl ButtonVisualState {
    /// Create an empty visual state with no base captured.
    pub fn new() -> Self {
        Self::default()
    }

    /// The color override for a slot.
    ///
    /// The normal slot never has an override; its look is the base.
    pub fn color(&self, slot: AppearanceSlot) -> Option<Color> {
        self.overrides.get(&slot).and_then(|o| o.color)
    }

    /// The texture override for a slot.
    pub fn texture(&self, slot: AppearanceSlot) -> Option<&Texture> {
        self.overrides.get(&slot).and_then(|o| o.texture.as_ref())
    }

    /// Set or clear the color override of a non-normal slot.
    ///
    /// The node's current look is captured as the base first if nothing has
    /// been captured yet. Writes to [`AppearanceSlot::Normal`] are ignored;
    /// use [`set_base_color`](Self::set_base_color) instead.
    pub fn set_color(&mut self, slot: AppearanceSlot, color: Option<Color>, node: &SpriteNode) {
        if slot == AppearanceSlot::Normal {
            return;
        }
        self.capture_base(node);
        self.overrides.entry(slot).or_default().color = color;
    }

    /// Set or clear the texture override of a non-normal slot.
    pub fn set_texture(
        &mut self,
        slot: AppearanceSlot,
        texture: Option<Texture>,
        node: &SpriteNode,
    ) {
        if slot == AppearanceSlot::Normal {
            return;
        }
        self.capture_base(node);
        self.overrides.entry(slot).or_default().texture = texture;
    }

    /// Whether the base look has been captured.
    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// The captured base color.
    pub fn base_color(&self) -> Option<Color> {
        self.base.as_ref().map(|b| b.color)
    }

    /// The captured base texture. `None` also when no base has been captured.
    pub fn base_texture(&self) -> Option<&Texture> {
        self.base.as_ref().and_then(|b| b.texture.as_ref())
    }

    /// Replace the base color, if one has been captured.
    pub fn set_base_color(&mut self, color: Color) {
        if let Some(base) = self.base.as_mut() {
            base.color = color;
        }
    }

    /// Replace the base texture, if a base has been captured.
    pub fn set_base_texture(&mut self, texture: Option<Texture>) {
        if let Some(base) = self.base.as_mut() {
            base.texture = texture;
        }
    }

    /// Record the node's current look as the base unless one exists.
    pub fn capture_base(&mut self, node: &SpriteNode) {
        if self.base.is_none() {
            self.base = Some(Base {
                color: node.color(),
                texture: node.texture().cloned(),
            });
        }
    }

    /// Write the look of `slot` to the node.
    ///
    /// Missing overrides fall back to the base. The texture is only touched
    /// when the node already displays one, so a textureless node stays
    /// textureless.
    pub fn show(&mut self, slot: AppearanceSlot, node: &mut SpriteNode) {
        if slot == AppearanceSlot::Normal {
            self.show_base(node);
            return;
        }
        self.capture_base(node);
        let Some(base) = self.base.as_ref() else {
            return;
        };
        let slot_override = self.overrides.get(&slot);

        let color = slot_override.and_then(|o| o.color).unwrap_or(base.color);
        node.set_color(color);

        if node.texture().is_some() {
            let texture = slot_override
                .and_then(|o| o.texture.clone())
                .or_else(|| base.texture.clone());
            if texture.is_some() {
                node.set_texture(texture);
            }
        }
    }

    /// Restore the captured base look. Does nothing before a capture.
    pub fn show_base(&self, node: &mut SpriteNode) {
        if let Some(base) = self.base.as_ref() {
            node.set_color(base.color);
            node.set_texture(base.texture.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_sprite_render::Size;

    fn node(texture: Option<Texture>) -> SpriteNode {
        SpriteNode::new(texture, Color::BLUE, Size::new(10.0, 10.0))
    }

    #[test]
    fn test_override_captures_base_once() {
        let mut node = node(None);
        let mut visual = ButtonVisualState::new();
        assert!(!visual.has_base());

        visual.set_color(AppearanceSlot::Tapped, Some(Color::RED), &node);
        assert_eq!(visual.base_color(), Some(Color::BLUE));

        node.set_color(Color::GREEN);
        visual.set_color(AppearanceSlot::Disabled, Some(Color::GRAY), &node);
        assert_eq!(visual.base_color(), Some(Color::BLUE));
    }

    #[test]
    fn test_show_and_show_base() {
        let mut node = node(None);
        let mut visual = ButtonVisualState::new();
        visual.set_color(AppearanceSlot::Tapped, Some(Color::RED), &node);

        for _ in 0..3 {
            visual.show(AppearanceSlot::Tapped, &mut node);
            assert_eq!(node.color(), Color::RED);
            visual.show(AppearanceSlot::Normal, &mut node);
            assert_eq!(node.color(), Color::BLUE);
        }
    }

    #[test]
    fn test_missing_override_falls_back_to_base() {
        let mut node = node(None);
        let mut visual = ButtonVisualState::new();
        visual.show(AppearanceSlot::Disabled, &mut node);
        assert!(visual.has_base());
        assert_eq!(node.color(), Color::BLUE);
    }

    #[test]
    fn test_textureless_node_never_gains_texture() {
        let mut node = node(None);
        let mut visual = ButtonVisualState::new();
        let pressed = Texture::new("pressed", Size::new(4.0, 4.0));
        visual.set_texture(AppearanceSlot::Tapped, Some(pressed), &node);

        visual.show(AppearanceSlot::Tapped, &mut node);
        assert!(node.texture().is_none());
        visual.show_base(&mut node);
        assert!(node.texture().is_none());
    }

    #[test]
    fn test_texture_override_swaps_and_restores() {
        let idle = Texture::new("idle", Size::new(4.0, 4.0));
        let pressed = Texture::new("pressed", Size::new(4.0, 4.0));
        let mut node = node(Some(idle.clone()));
        let mut visual = ButtonVisualState::new();
        visual.set_texture(AppearanceSlot::Tapped, Some(pressed.clone()), &node);

        visual.show(AppearanceSlot::Tapped, &mut node);
        assert_eq!(node.texture(), Some(&pressed));

        // No texture override for disabled: back to the base texture.
        visual.show(AppearanceSlot::Disabled, &mut node);
        assert_eq!(node.texture(), Some(&idle));

        visual.show(AppearanceSlot::Normal, &mut node);
        assert_eq!(node.texture(), Some(&idle));
    }

    #[test]
    fn test_normal_slot_has_no_override() {
        let node = node(None);
        let mut visual = ButtonVisualState::new();
        visual.set_color(AppearanceSlot::Normal, Some(Color::RED), &node);
        assert_eq!(visual.color(AppearanceSlot::Normal), None);
        assert!(!visual.has_base());
    }

    #[test]
    fn test_base_setters_require_capture() {
        let node = node(None);
        let mut visual = ButtonVisualState::new();
        visual.set_base_color(Color::RED);
        assert_eq!(visual.base_color(), None);

        visual.capture_base(&node);
        visual.set_base_color(Color::RED);
        assert_eq!(visual.base_color(), Some(Color::RED));
    }
}
