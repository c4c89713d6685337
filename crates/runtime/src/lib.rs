//! Runtime orchestration for the rune battle simulation.
//!
//! This crate wires together oracle access, save repositories, listeners and
//! the session worker into a cohesive runtime API. Consumers embed [`Runtime`]
//! to drive battles, subscribe to events, and interact with the session
//! through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus and synchronous listeners
//! - `workers` keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
//! - [`logging`] installs the tracing subscriber
pub mod api;
pub mod events;
pub mod logging;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{AtbPreview, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, ListenerId, ListenerRegistry, Topic};
pub use logging::{LoggingConfig, init as init_logging};
pub use oracle::{EnemyOracleImpl, MaterialOracleImpl, OracleManager, RuneOracleImpl};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
