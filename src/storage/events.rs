//! Change notifications for the article collection
//!
//! Presentation code subscribes a listener and refreshes its view when the
//! store reports a change.

use serde::Serialize;
use uuid::Uuid;

/// Something observable happened to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CollectionEvent {
    /// The ordered set changed as a whole (add, delete, reorder, load)
    CollectionChanged { len: usize },

    /// One record was edited in place
    ItemUpdated { id: Uuid, index: usize },
}

/// Receiver of collection events
pub trait CollectionListener: Send {
    fn on_event(&self, event: &CollectionEvent);
}

impl<F> CollectionListener for F
where
    F: Fn(&CollectionEvent) + Send,
{
    fn on_event(&self, event: &CollectionEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered listeners, notified in subscription order
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Box<dyn CollectionListener>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn subscribe(&mut self, listener: impl CollectionListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; `false` if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener
    pub fn emit(&self, event: CollectionEvent) {
        tracing::trace!(?event, listeners = self.listeners.len(), "Emitting collection event");
        for (_, listener) in &self.listeners {
            listener.on_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_subscribe_and_emit() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut bus = EventBus::new();
        bus.subscribe(move |e: &CollectionEvent| sink.lock().unwrap().push(*e));
        bus.emit(CollectionEvent::CollectionChanged { len: 3 });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![CollectionEvent::CollectionChanged { len: 3 }]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);

        let mut bus = EventBus::new();
        let id = bus.subscribe(move |_: &CollectionEvent| *sink.lock().unwrap() += 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert!(bus.is_empty());

        bus.emit(CollectionEvent::CollectionChanged { len: 0 });
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_ids_are_distinct() {
        let mut bus = EventBus::new();
        let a = bus.subscribe(|_: &CollectionEvent| {});
        let b = bus.subscribe(|_: &CollectionEvent| {});
        assert_ne!(a, b);
        assert_eq!(bus.len(), 2);
    }
}
