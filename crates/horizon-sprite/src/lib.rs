//! Horizon Sprite - touch-reactive sprite buttons for 2D scene graphs.
//!
//! This crate provides a button that lives on a sprite node and reacts to
//! touches, plus groups that keep toggle buttons mutually exclusive.
//!
//! # Key Types
//!
//! - [`SpriteButton`] - The button: status, appearance overrides, listeners
//! - [`ButtonScene`] - Arena owning buttons and groups, entry point for touches
//! - [`ButtonGroup`] - Plain or toggle-exclusive set of button handles
//! - [`TouchRouter`] - Hit-tests touches and keeps them bound to one button
//!
//! # Getting Started
//!
//! ```
//! use horizon_sprite::{
//!     ButtonScene, ButtonStatus, Color, GroupKind, Point, Size, SpriteButton, Touch, TouchSet,
//! };
//!
//! let mut scene = ButtonScene::new();
//! let make = |x: f32| {
//!     SpriteButton::new(None, Color::GRAY, Size::new(20.0, 20.0))
//!         .with_position(Point::new(x, 0.0))
//!         .with_toggle_mode(true)
//!         .with_toggled_on_color(Color::GREEN)
//! };
//! let left = scene.insert(make(0.0));
//! let right = scene.insert(make(40.0));
//!
//! let group = scene.create_group(GroupKind::ToggleExclusive);
//! scene.add_to_group(group, left)?;
//! scene.add_to_group(group, right)?;
//!
//! let press = |x: f32| TouchSet::single(Touch::new(1, Point::new(x, 0.0)));
//! scene.touches_began(left, &press(0.0), None)?;
//! scene.touches_ended(left, &press(0.0), None)?;
//! scene.touches_began(right, &press(40.0), None)?;
//! scene.touches_ended(right, &press(40.0), None)?;
//!
//! assert_eq!(scene.button(left).map(SpriteButton::status), Some(ButtonStatus::Normal));
//! assert_eq!(scene.button(right).map(SpriteButton::color), Some(Color::GREEN));
//! # Ok::<(), horizon_sprite::SceneError>(())
//! ```
//!
//! # Logging
//!
//! All diagnostics go through `tracing` under the `horizon_sprite` targets
//! listed in [`logging::targets`].

pub mod button;
pub mod group;
pub mod node;
pub mod router;
pub mod scene;
pub mod touch;

pub use button::{
    AppearanceSlot, ButtonEvent, ButtonStatus, ButtonVisualState, EventKind, EventListener,
    ListenerRegistry, MovePolicy, SpriteButton,
};
pub use group::{ButtonGroup, GroupKind};
pub use node::SpriteNode;
pub use router::TouchRouter;
pub use scene::ButtonScene;
pub use touch::{EventContext, Touch, TouchId, TouchPhase, TouchSet};

pub use horizon_sprite_core::{
    ButtonId, GroupId, ListenerId, PerfSpan, Result, SceneError, logging,
};
pub use horizon_sprite_render::{Color, Point, Rect, Size, Texture, Transform2D};
