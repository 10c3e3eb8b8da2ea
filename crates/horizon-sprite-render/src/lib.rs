//! Geometry and paint values for Horizon Sprite.
//!
//! This crate holds the values a sprite scene hands to its renderer: points,
//! sizes and rectangles, colors, affine transforms and texture handles. It has
//! no GPU dependency; a renderer reads these values from the nodes it draws.
//!
//! # Example
//!
//! ```
//! use horizon_sprite_render::{Color, Point, Rect, Size, Texture};
//!
//! let bounds = Rect::from_center(Point::ZERO, Size::new(40.0, 20.0));
//! assert!(bounds.contains(Point::new(10.0, 5.0)));
//!
//! let tint = Color::from_rgb(1.0, 0.5, 0.0);
//! let normal = Texture::named("play_normal");
//! assert_eq!(normal.clone(), normal);
//! # let _ = tint;
//! ```

mod texture;
mod transform;
mod types;

pub use texture::Texture;
pub use transform::Transform2D;
pub use types::{Color, Point, Rect, Size};
