use crate::payload::Payload;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Local subscriber callback.
pub type Listener = Arc<dyn Fn(Option<&Payload>) + Send + Sync>;

/// Handle returned when subscribing. Pass it to `off` to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    once: bool,
    listener: Listener,
}

/// Per-event subscriber lists, kept in registration order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: AtomicU64,
    by_event: Mutex<HashMap<String, Vec<Entry>>>,
}

impl ListenerRegistry {
    pub fn add(&self, event: &str, listener: Listener, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.by_event
            .lock()
            .entry(event.to_owned())
            .or_default()
            .push(Entry { id, once, listener });
        id
    }

    pub fn remove(&self, event: &str, id: ListenerId) -> bool {
        let mut by_event = self.by_event.lock();
        let Some(entries) = by_event.get_mut(event) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|it| it.id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            by_event.remove(event);
        }
        removed
    }

    pub fn clear(&self, event: &str) -> usize {
        self.by_event
            .lock()
            .remove(event)
            .map_or(0, |entries| entries.len())
    }

    pub fn count(&self, event: &str) -> usize {
        self.by_event.lock().get(event).map_or(0, Vec::len)
    }

    /// Copies the current listeners of `event` so they can be invoked without holding the lock.
    ///
    /// One-shot listeners are unregistered here, before they run, so a re-entrant emission
    /// cannot invoke them a second time.
    pub fn snapshot(&self, event: &str) -> Vec<Listener> {
        let mut by_event = self.by_event.lock();
        let Some(entries) = by_event.get_mut(event) else {
            return Vec::new();
        };
        let snapshot = entries
            .iter()
            .map(|it| Arc::clone(&it.listener))
            .collect::<Vec<_>>();
        entries.retain(|it| !it.once);
        if entries.is_empty() {
            by_event.remove(event);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertr::prelude::*;

    fn noop() -> Listener {
        Arc::new(|_: Option<&Payload>| {})
    }

    #[test]
    fn ids_are_unique_across_events() {
        let registry = ListenerRegistry::default();
        let a = registry.add("profile:change", noop(), false);
        let b = registry.add("fxaccounts:logout", noop(), false);
        assert_that(a).is_not_equal_to(b);
    }

    #[test]
    fn remove_only_affects_the_given_event() {
        let registry = ListenerRegistry::default();
        let id = registry.add("profile:change", noop(), false);

        assert_that(registry.remove("fxaccounts:logout", id)).is_false();
        assert_that(registry.count("profile:change")).is_equal_to(1);
        assert_that(registry.remove("profile:change", id)).is_true();
        assert_that(registry.count("profile:change")).is_equal_to(0);
        assert_that(registry.remove("profile:change", id)).is_false();
    }

    #[test]
    fn snapshot_drops_one_shot_listeners() {
        let registry = ListenerRegistry::default();
        registry.add("fxaccounts:delete", noop(), false);
        registry.add("fxaccounts:delete", noop(), true);

        assert_that(registry.snapshot("fxaccounts:delete").len()).is_equal_to(2);
        assert_that(registry.snapshot("fxaccounts:delete").len()).is_equal_to(1);
    }

    #[test]
    fn clear_reports_removed_count() {
        let registry = ListenerRegistry::default();
        registry.add("fxaccounts:delete", noop(), false);
        registry.add("fxaccounts:delete", noop(), true);

        assert_that(registry.clear("fxaccounts:delete")).is_equal_to(2);
        assert_that(registry.clear("fxaccounts:delete")).is_equal_to(0);
    }
}
