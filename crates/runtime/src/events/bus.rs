//! Topic-based event bus implementation.

use std::collections::HashMap;

use game_core::GameEvent;
use serde::Serialize;
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Battle flow: phases, statuses, damage, casts and enemy actions
    Battle,
    /// Player resources, level-ups, drops, rune offers, shop and slot edits
    Progression,
    /// Scene changes and restarts
    Session,
}

impl Topic {
    pub fn of(event: &GameEvent) -> Self {
        match event {
            GameEvent::ResourceChange { .. }
            | GameEvent::LevelUp { .. }
            | GameEvent::MaterialDrop { .. }
            | GameEvent::RuneChoice { .. }
            | GameEvent::ShopUpdate { .. }
            | GameEvent::SpellSlotUpdated { .. } => Topic::Progression,
            GameEvent::SceneChange { .. } | GameEvent::GameRestart => Topic::Session,
            _ => Topic::Battle,
        }
    }
}

/// A drained game event stamped with the battle generation it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub battle_id: u64,
    /// Milliseconds since the Unix epoch, taken from the runtime clock.
    pub timestamp: u64,
    pub payload: GameEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.payload)
    }

    pub fn name(&self) -> &'static str {
        self.payload.name()
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front for every topic and
/// never change afterwards, so publishing needs no lock.
#[derive(Clone)]
pub struct EventBus {
    battle: broadcast::Sender<Event>,
    progression: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            battle: broadcast::channel(capacity).0,
            progression: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Progression => &self.progression,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(%topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
