//! In-process stand-in for the browser's `BroadcastChannel`.
//!
//! Every [`MemoryChannel`] created from the same [`MemoryHub`] acts like one tab. A message sent
//! from an endpoint reaches the handlers registered on all *other* endpoints, never the
//! sender's own, so a notifier using it as tab channel does not hear its own broadcasts.

use super::{Channel, ChannelHandler};
use crate::payload::Payload;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Default)]
struct Endpoint {
    handlers: HashMap<String, Vec<ChannelHandler>>,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    endpoints: BTreeMap<u64, Endpoint>,
}

/// A set of connected [`MemoryChannel`] endpoints.
#[derive(Clone, Default)]
pub struct MemoryHub {
    state: Arc<Mutex<HubState>>,
}

impl MemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects a new endpoint to this hub.
    ///
    /// The endpoint stays connected until the returned channel and all its clones are dropped.
    pub fn channel(&self) -> MemoryChannel {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.endpoints.insert(id, Endpoint::default());
        MemoryChannel {
            endpoint: Arc::new(EndpointGuard {
                hub: self.clone(),
                id,
            }),
        }
    }

    pub fn endpoint_count(&self) -> usize {
        self.state.lock().endpoints.len()
    }
}

impl std::fmt::Debug for MemoryHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHub")
            .field("endpoints", &self.endpoint_count())
            .finish()
    }
}

/// Disconnects its endpoint from the hub when dropped.
#[derive(Debug)]
struct EndpointGuard {
    hub: MemoryHub,
    id: u64,
}

impl Drop for EndpointGuard {
    fn drop(&mut self) {
        // Dropping handlers may drop further channels of this hub. Release the lock first.
        let removed = self.hub.state.lock().endpoints.remove(&self.id);
        drop(removed);
    }
}

/// One endpoint of a [`MemoryHub`].
#[derive(Clone, Debug)]
pub struct MemoryChannel {
    endpoint: Arc<EndpointGuard>,
}

impl MemoryChannel {
    /// Number of handlers this endpoint registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.endpoint
            .hub
            .state
            .lock()
            .endpoints
            .get(&self.endpoint.id)
            .and_then(|endpoint| endpoint.handlers.get(event))
            .map_or(0, Vec::len)
    }
}

impl Channel for MemoryChannel {
    fn send(&self, event: &str, data: Option<&Payload>) {
        // Handlers may send again. Never call them while holding the lock.
        let receivers = {
            let state = self.endpoint.hub.state.lock();
            state
                .endpoints
                .iter()
                .filter(|(id, _)| **id != self.endpoint.id)
                .filter_map(|(_, endpoint)| endpoint.handlers.get(event))
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
        };
        tracing::trace!(
            event,
            receivers = receivers.len(),
            "Broadcasting message to other endpoints"
        );
        for handler in receivers {
            handler(data);
        }
    }

    fn on(&self, event: &str, handler: ChannelHandler) {
        if let Some(endpoint) = self
            .endpoint
            .hub
            .state
            .lock()
            .endpoints
            .get_mut(&self.endpoint.id)
        {
            endpoint
                .handlers
                .entry(event.to_owned())
                .or_default()
                .push(handler);
        }
    }
}
