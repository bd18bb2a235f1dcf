//! # Event Channel
//!
//! A named-topic emitter with synchronous, registration-ordered delivery.
//! Listeners are plain closures; `emit` invokes every listener registered for
//! the name before returning. The same type backs both scopes: each node owns
//! a private instance, and one process-wide instance is shared by all nodes
//! (see [`crate::shared`]).

use crate::event::Event;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Boxed listener callback. Runs synchronously inside `emit`.
type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Handle identifying one registered listener.
///
/// Returned by `subscribe`/`subscribe_once` and consumed by `unsubscribe`.
/// Ids are unique per channel and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// One registered listener for a named event.
struct ListenerEntry {
    id: SubscriptionId,
    once: bool,
    callback: Listener,
}

/// Synchronous publish/subscribe channel keyed by event name.
///
/// Delivery runs on the emitting thread, in registration order. The listener
/// table lock is released before callbacks run, so listeners may freely
/// subscribe, unsubscribe, or emit on the same channel.
pub struct EventChannel {
    /// Listeners by event name, in registration order.
    listeners: RwLock<HashMap<String, Vec<ListenerEntry>>>,

    /// Source of subscription ids.
    next_id: AtomicU64,

    /// Total events emitted (including emissions with zero listeners).
    events_emitted: AtomicU64,
}

impl EventChannel {
    /// Create a new empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            events_emitted: AtomicU64::new(0),
        }
    }

    /// Register a listener for `name`.
    pub fn subscribe(
        &self,
        name: &str,
        listener: impl Fn(&Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.add_listener(name, Arc::new(listener), false)
    }

    /// Register a listener invoked at most once, then auto-removed.
    ///
    /// The entry is removed before the callback runs.
    pub fn subscribe_once(
        &self,
        name: &str,
        listener: impl Fn(&Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.add_listener(name, Arc::new(listener), true)
    }

    /// Remove the listener registered under `subscription` for `name`.
    ///
    /// Returns whether an entry was removed.
    pub fn unsubscribe(&self, name: &str, subscription: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let Some(entries) = listeners.get_mut(name) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.id != subscription);
        let removed = entries.len() < before;
        if entries.is_empty() {
            listeners.remove(name);
        }
        removed
    }

    /// Synchronously invoke every listener registered for `name`, in
    /// registration order, passing the payload through unchanged.
    ///
    /// # Returns
    ///
    /// The number of listeners invoked.
    pub fn emit(&self, name: &str, payload: Value) -> usize {
        // Snapshot under the lock, strip once-entries, then invoke unlocked
        // so listeners can re-enter the channel.
        let batch: Vec<Listener> = {
            let mut listeners = self.listeners.write();
            match listeners.get_mut(name) {
                Some(entries) => {
                    let batch = entries
                        .iter()
                        .map(|entry| Arc::clone(&entry.callback))
                        .collect();
                    entries.retain(|entry| !entry.once);
                    if entries.is_empty() {
                        listeners.remove(name);
                    }
                    batch
                }
                None => Vec::new(),
            }
        };

        self.events_emitted.fetch_add(1, Ordering::Relaxed);

        let event = Event::new(name, payload);
        for callback in &batch {
            callback(&event);
        }

        debug!(event = name, listeners = batch.len(), "event emitted");
        batch.len()
    }

    /// Number of listeners currently registered for `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.read().get(name).map_or(0, |v| v.len())
    }

    /// Total events emitted on this channel since creation.
    #[must_use]
    pub fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }

    fn add_listener(&self, name: &str, callback: Listener, once: bool) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .entry(name.to_string())
            .or_default()
            .push(ListenerEntry { id, once, callback });

        debug!(event = name, subscription = id.0, once, "listener registered");
        id
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}
