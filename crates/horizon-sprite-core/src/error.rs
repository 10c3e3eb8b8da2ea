//! Error types for Horizon Sprite.
//!
//! Button and group operations themselves are total. Errors only surface at
//! the arena boundary, where a caller may hold a handle whose object has
//! already been removed.

use crate::object::{ButtonId, GroupId};

/// Errors returned by handle-addressed scene operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The button id is invalid or the button has been removed.
    #[error("Invalid or removed button id {0:?}")]
    InvalidButtonId(ButtonId),

    /// The group id is invalid or the group has been removed.
    #[error("Invalid or removed group id {0:?}")]
    InvalidGroupId(GroupId),

    /// The button already belongs to a different toggle-exclusive group.
    #[error("Button {button:?} already belongs to toggle group {group:?}")]
    AlreadyInToggleGroup {
        /// The button that was being added.
        button: ButtonId,
        /// The toggle group the button currently belongs to.
        group: GroupId,
    },
}

/// A specialized Result type for Horizon Sprite scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_error_display_names_the_handle() {
        let mut map: SlotMap<ButtonId, ()> = SlotMap::with_key();
        let id = map.insert(());
        let message = SceneError::InvalidButtonId(id).to_string();
        assert!(message.starts_with("Invalid or removed button id"));
    }
}
