//! Touch points and event batches delivered to sprite buttons.
//!
//! The host collects the touches that changed in one input frame into a
//! [`TouchSet`] and delivers it together with an [`EventContext`]. Buttons never
//! inspect the context; it is handed to listeners untouched.

use std::time::Duration;

use horizon_sprite_render::Point;

/// Identifier of a finger or pointer for the lifetime of one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

/// The phase of a touch batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Contact started.
    Began,
    /// Contact moved.
    Moved,
    /// Contact lifted.
    Ended,
    /// The system took the contact away (e.g. an incoming call).
    Cancelled,
}

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Stable identifier of this contact.
    pub id: TouchId,
    /// Current location in scene coordinates.
    pub location: Point,
}

impl Touch {
    /// Create a touch at a scene location.
    pub fn new(id: u64, location: Point) -> Self {
        Self {
            id: TouchId(id),
            location,
        }
    }
}

/// A set of touches keyed by [`TouchId`].
///
/// Inserting a touch whose id is already present replaces the old entry.
/// Iteration follows first insertion, but callers should treat the set as
/// unordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchSet {
    touches: Vec<Touch>,
}

impl TouchSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding one touch.
    pub fn single(touch: Touch) -> Self {
        Self {
            touches: vec![touch],
        }
    }

    /// Insert or replace a touch.
    pub fn insert(&mut self, touch: Touch) {
        match self.touches.iter_mut().find(|t| t.id == touch.id) {
            Some(existing) => *existing = touch,
            None => self.touches.push(touch),
        }
    }

    /// Look up a touch by id.
    pub fn get(&self, id: TouchId) -> Option<&Touch> {
        self.touches.iter().find(|t| t.id == id)
    }

    /// Number of touches in the set.
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Iterate over the touches.
    pub fn iter(&self) -> impl Iterator<Item = &Touch> + '_ {
        self.touches.iter()
    }
}

impl FromIterator<Touch> for TouchSet {
    fn from_iter<I: IntoIterator<Item = Touch>>(iter: I) -> Self {
        let mut set = Self::new();
        for touch in iter {
            set.insert(touch);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TouchSet {
    type Item = &'a Touch;
    type IntoIter = std::slice::Iter<'a, Touch>;

    fn into_iter(self) -> Self::IntoIter {
        self.touches.iter()
    }
}

/// Opaque per-batch token forwarded to listeners unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventContext {
    /// Host timestamp of the batch.
    pub timestamp: Duration,
}

impl EventContext {
    /// Create a context token.
    pub fn new(timestamp: Duration) -> Self {
        Self { timestamp }
    }
}
