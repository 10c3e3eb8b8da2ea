//! Core systems for Horizon Sprite.
//!
//! This crate provides the foundational pieces shared by the sprite widgets:
//!
//! - **Object Handles**: Generational ids for buttons, groups and listeners
//! - **Errors**: The error taxonomy for handle-addressed operations
//! - **Logging**: `tracing` targets, span names and a timing guard
//!
//! # Handle Example
//!
//! ```
//! use horizon_sprite_core::ListenerId;
//!
//! let first = ListenerId::next();
//! let second = ListenerId::next();
//! assert_ne!(first, second);
//! ```

mod error;
pub mod logging;
pub mod object;

pub use error::{Result, SceneError};
pub use logging::PerfSpan;
pub use object::{ButtonId, GroupId, ListenerId};
