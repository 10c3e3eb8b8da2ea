//! Event listeners attached to sprite buttons.
//!
//! A button keeps an ordered list of [`EventListener`]s. Each listener is
//! tagged with the [`EventKind`] it wants and carries a stable [`ListenerId`]
//! for removal. Handlers receive the owning [`ButtonScene`] mutably, so they
//! may disable the button, toggle peers, or add and remove listeners while a
//! dispatch is running. Dispatch always iterates a snapshot taken before the
//! first handler runs.
//!
//! # Example
//!
//! ```
//! use horizon_sprite::{EventKind, EventListener, SpriteButton};
//!
//! let mut button = SpriteButton::default();
//! let listener = EventListener::new(EventKind::TouchesEnded, |_scene, event| {
//!     println!("released {:?}", event.button);
//! });
//! let id = button.add_listener(listener);
//! assert_eq!(button.listener_count(EventKind::TouchesEnded), 1);
//!
//! button.remove_listener(id);
//! assert_eq!(button.listener_count(EventKind::TouchesEnded), 0);
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_sprite_core::{ButtonId, ListenerId};

use crate::scene::ButtonScene;
use crate::touch::{EventContext, TouchSet};

/// The kinds of events a button announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A press started, or a Reentry press came back inside.
    TouchesBegan,
    /// Touches moved. Announced for every move batch while enabled.
    TouchesMoved,
    /// A press was released, or a Reentry press left the bounds.
    TouchesEnded,
    /// The host cancelled a press.
    TouchesCancelled,
    /// A toggle-mode button latched on.
    ToggledOn,
    /// A toggle-mode button switched off.
    ToggledOff,
}

/// Data handed to a listener.
#[derive(Debug, Clone, Copy)]
pub struct ButtonEvent<'a> {
    /// The kind being dispatched.
    pub kind: EventKind,
    /// The button that produced the event.
    pub button: ButtonId,
    /// The touches of the batch that caused the event. Empty for events
    /// produced outside touch delivery, such as a group switching a peer off.
    pub touches: &'a TouchSet,
    /// The host token delivered with the batch, untouched.
    pub context: Option<&'a EventContext>,
}

type Handler = dyn Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync;

/// A handler bound to one event kind.
///
/// Cloning a listener keeps its id, so the same listener can be registered on
/// several buttons and removed from each of them by that id.
#[derive(Clone)]
pub struct EventListener {
    id: ListenerId,
    kind: EventKind,
    handler: Arc<Handler>,
}

impl EventListener {
    /// Create a listener with a fresh id.
    pub fn new<F>(kind: EventKind, handler: F) -> Self
    where
        F: Fn(&mut ButtonScene, &ButtonEvent<'_>) + Send + Sync + 'static,
    {
        Self {
            id: ListenerId::next(),
            kind,
            handler: Arc::new(handler),
        }
    }

    /// The listener's identity.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The event kind this listener responds to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Call the handler.
    pub fn invoke(&self, scene: &mut ButtonScene, event: &ButtonEvent<'_>) {
        (self.handler)(scene, event);
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Ordered listeners of one button.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    listeners: Vec<EventListener>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. Returns `false` if a listener with the same id is
    /// already registered.
    pub fn add(&mut self, listener: EventListener) -> bool {
        if self.contains(listener.id) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Remove a listener by id. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Check if a listener is registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Number of listeners registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Remove every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Clone the listeners for `kind` in registration order.
    pub fn snapshot(&self, kind: EventKind) -> Vec<EventListener> {
        self.listeners
            .iter()
            .filter(|l| l.kind == kind)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn noop(kind: EventKind) -> EventListener {
        EventListener::new(kind, |_, _| {})
    }

    #[test]
    fn test_add_remove() {
        let mut registry = ListenerRegistry::new();
        let began = noop(EventKind::TouchesBegan);
        let id = began.id();

        assert!(registry.add(began.clone()));
        assert!(!registry.add(began));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_filters_and_keeps_order() {
        let mut registry = ListenerRegistry::new();
        let first = noop(EventKind::TouchesEnded);
        let other = noop(EventKind::TouchesMoved);
        let second = noop(EventKind::TouchesEnded);
        let ids = [first.id(), second.id()];

        registry.add(first);
        registry.add(other);
        registry.add(second);

        let snapshot = registry.snapshot(EventKind::TouchesEnded);
        assert_eq!(snapshot.iter().map(EventListener::id).collect::<Vec<_>>(), ids);
        assert_eq!(registry.count(EventKind::TouchesMoved), 1);
        assert_eq!(registry.count(EventKind::ToggledOn), 0);
    }

    #[test]
    fn test_snapshot_survives_mutation() {
        let mut registry = ListenerRegistry::new();
        registry.add(noop(EventKind::TouchesBegan));
        let snapshot = registry.snapshot(EventKind::TouchesBegan);
        registry.clear();
        assert_eq!(snapshot.len(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invoke_passes_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let listener = EventListener::new(EventKind::TouchesCancelled, move |_, event| {
            recorder.lock().unwrap().push((event.kind, event.touches.len()));
        });

        let mut scene = ButtonScene::new();
        let touches = TouchSet::new();
        let event = ButtonEvent {
            kind: EventKind::TouchesCancelled,
            button: ButtonId::default(),
            touches: &touches,
            context: None,
        };
        listener.invoke(&mut scene, &event);

        assert_eq!(*seen.lock().unwrap(), vec![(EventKind::TouchesCancelled, 0)]);
        assert!(format!("{listener:?}").contains("TouchesCancelled"));
    }
}
