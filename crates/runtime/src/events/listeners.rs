//! Synchronous listener registry keyed by event kind.
//!
//! Listeners run on the session worker right after the command that produced
//! the event, in registration order. A panicking listener is logged and
//! skipped; the remaining listeners still run.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use game_core::{GameEvent, GameEventKind};

pub type Listener = Arc<dyn Fn(&GameEvent) + Send + Sync>;

/// Handle returned by [`ListenerRegistry::on`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default, Clone)]
pub struct ListenerRegistry {
    listeners: HashMap<GameEventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every event of `kind`.
    pub fn on<F>(&mut self, kind: GameEventKind, listener: F) -> ListenerId
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.insert(kind, Arc::new(listener))
    }

    pub(crate) fn insert(&mut self, kind: GameEventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(kind).or_default().push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        for entries in self.listeners.values_mut() {
            if let Some(position) = entries.iter().position(|(entry, _)| *entry == id) {
                entries.remove(position);
                return true;
            }
        }
        false
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every listener registered for the event's kind.
    ///
    /// Returns the number of listeners that panicked.
    pub fn dispatch(&self, event: &GameEvent) -> usize {
        let Some(entries) = self.listeners.get(&event.kind()) else {
            return 0;
        };

        let mut failures = 0;
        for (id, listener) in entries {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                failures += 1;
                tracing::error!(listener = id.0, event = event.name(), "event listener panicked");
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_dispatch_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        for label in ["first", "second"] {
            let seen = Arc::clone(&seen);
            registry.on(GameEventKind::GameRestart, move |_| {
                seen.lock().unwrap().push(label)
            });
        }

        registry.dispatch(&GameEvent::GameRestart);
        assert_eq!(*seen.lock().unwrap(), ["first", "second"]);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let seen = Arc::new(Mutex::new(0));
        let mut registry = ListenerRegistry::new();
        registry.on(GameEventKind::GameRestart, |_| panic!("listener failure"));
        let counter = Arc::clone(&seen);
        registry.on(GameEventKind::GameRestart, move |_| {
            *counter.lock().unwrap() += 1
        });

        assert_eq!(registry.dispatch(&GameEvent::GameRestart), 1);
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_off_removes_only_that_listener() {
        let mut registry = ListenerRegistry::new();
        let first = registry.on(GameEventKind::GameRestart, |_| {});
        registry.on(GameEventKind::LevelUp, |_| {});
        assert_eq!(registry.len(), 2);

        assert!(registry.off(first));
        assert!(!registry.off(first));
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.dispatch(&GameEvent::GameRestart), 0);
    }
}
