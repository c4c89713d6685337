//! Event fan-out for hosts.
//!
//! Every [`game_core::GameEvent`] drained from the session reaches two
//! consumers: the synchronous [`ListenerRegistry`] (UI callbacks keyed by
//! event kind) and the asynchronous topic [`EventBus`].
mod bus;
mod listeners;

pub use bus::{Event, EventBus, Topic};
pub use listeners::{Listener, ListenerId, ListenerRegistry};
