//! Publish/subscribe registry scoped to one session.
//!
//! Each [`crate::Session`] owns its registry, so subscriptions made for one
//! scene never see events from another.

use hashbrown::HashMap;
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub type EventCallback = Box<dyn FnMut(&str, &JsonValue) + Send + Sync>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

#[derive(Default)]
pub struct EventRegistry {
    next_id: u64,
    subscribers: HashMap<String, Vec<(SubscriptionId, EventCallback)>>,
    published: HashMap<String, u64>,
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .subscribers
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        f.debug_struct("EventRegistry")
            .field("subscribers", &counts)
            .field("published", &self.published)
            .finish()
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for `name`. Callbacks run in registration order.
    pub fn subscribe<F>(&mut self, name: &str, callback: F) -> SubscriptionId
    where
        F: FnMut(&str, &JsonValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers
            .entry(name.to_string())
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for subs in self.subscribers.values_mut() {
            if let Some(pos) = subs.iter().position(|(sid, _)| *sid == id) {
                subs.remove(pos);
                return true;
            }
        }
        false
    }

    /// Invoke every subscriber of `name`; returns how many ran.
    pub fn publish(&mut self, name: &str, payload: &JsonValue) -> usize {
        *self.published.entry(name.to_string()).or_insert(0) += 1;
        let Some(subs) = self.subscribers.get_mut(name) else {
            trace!("event '{name}' has no subscribers");
            return 0;
        };
        for (_, cb) in subs.iter_mut() {
            cb(name, payload);
        }
        subs.len()
    }

    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscribers.get(name).map_or(0, Vec::len)
    }

    /// How many times `name` has been published in this registry.
    pub fn publish_count(&self, name: &str) -> u64 {
        self.published.get(name).copied().unwrap_or(0)
    }

    /// Drop every subscription and publish count.
    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.published.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn unsubscribe_stops_delivery() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut reg = EventRegistry::new();
        let h = hits.clone();
        let id = reg.subscribe("sail.raised", move |_, _| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(reg.publish("sail.raised", &JsonValue::Null), 1);
        assert!(reg.unsubscribe(id));
        assert!(!reg.unsubscribe(id));
        assert_eq!(reg.publish("sail.raised", &JsonValue::Null), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(reg.publish_count("sail.raised"), 2);
    }

    #[test]
    fn clear_drops_subscribers_and_counts() {
        let mut reg = EventRegistry::new();
        reg.subscribe("tide.turned", |_, _| {});
        reg.subscribe("tide.turned", |_, _| {});
        assert_eq!(reg.publish("tide.turned", &JsonValue::Null), 2);
        reg.clear();
        assert_eq!(reg.subscriber_count("tide.turned"), 0);
        assert_eq!(reg.publish_count("tide.turned"), 0);
        assert_eq!(reg.publish("tide.turned", &JsonValue::Null), 0);
    }
}
