//! Object handles for Horizon Sprite.
//!
//! Buttons and groups live in an owner-controlled arena and are referred to by
//! generational handles instead of references. A handle whose slot has been
//! freed never resolves again, so holders such as button groups cannot reach a
//! destroyed button by accident.
//!
//! # Key Types
//!
//! - [`ButtonId`] - Stable handle for a button stored in a scene
//! - [`GroupId`] - Stable handle for a button group stored in a scene
//! - [`ListenerId`] - Identity of an event listener, used for removal

use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::{Key, KeyData, new_key_type};

new_key_type! {
    /// A unique identifier for a button in a scene.
    ///
    /// `ButtonId`s remain valid until the button is removed from its scene.
    /// After removal the slot may be reused, but the generation changes, so a
    /// stale id never resolves to the new occupant.
    pub struct ButtonId;

    /// A unique identifier for a button group in a scene.
    pub struct GroupId;
}

impl ButtonId {
    /// Convert the id to a raw u64 value.
    ///
    /// This is useful for interop with external systems that need a numeric ID.
    /// The raw value can be converted back using [`ButtonId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Create a `ButtonId` from a raw u64 value.
    ///
    /// Note: This does not check whether the id exists in any scene.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(KeyData::from_ffi(raw))
    }
}

impl GroupId {
    /// Convert the id to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a registered event listener.
///
/// Listener ids are process-unique. The same listener value may be registered
/// on several buttons and keeps one id everywhere, which is what allows a
/// group to detach its shared listener from each member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a fresh listener id.
    pub fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value of this id.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }
}
