//! Shared texture handles for sprite nodes.
//!
//! A [`Texture`] is a cheap, clonable reference to image data owned by the
//! renderer. Two handles are equal only when they refer to the same texture
//! object, so swapping a sprite between a normal and a pressed texture can be
//! checked by identity even when both were created from the same file.

use std::fmt;
use std::sync::Arc;

use crate::types::Size;

struct TextureData {
    name: String,
    size: Size,
}

/// A reference-counted handle to a texture.
#[derive(Clone)]
pub struct Texture {
    data: Arc<TextureData>,
}

impl Texture {
    /// Create a new texture with a debug name and pixel size.
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            data: Arc::new(TextureData {
                name: name.into(),
                size,
            }),
        }
    }

    /// Create a named texture without size information.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Size::ZERO)
    }

    /// The debug name given at creation.
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// The pixel size of the texture.
    pub fn size(&self) -> Size {
        self.data.size
    }

    /// Check whether two handles refer to the same texture object.
    #[inline]
    pub fn same_texture(&self, other: &Texture) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.same_texture(other)
    }
}

impl Eq for Texture {}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("name", &self.data.name)
            .field("size", &self.data.size)
            .finish()
    }
}
