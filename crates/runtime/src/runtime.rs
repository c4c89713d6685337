//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for hosts to drive battles.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use game_core::{GameEvent, GameEventKind, GameSession};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, ListenerRegistry, Topic};
use crate::oracle::OracleManager;
use crate::repository::SaveRepository;
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// When set, the worker advances the battle on its own at this period
    /// using measured elapsed time. Hosts that drive `update_battle` from a
    /// render loop leave it unset.
    pub tick_interval: Option<Duration>,
    /// Session seed for deterministic rolls; random when `None`.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_interval: None,
            seed: None,
        }
    }
}

/// Main runtime that orchestrates the game session
///
/// Runtime owns the worker task; [`RuntimeHandle`] provides a cloneable
/// façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker exits once every outstanding [`RuntimeHandle`] clone has
    /// been dropped as well.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    session: Option<GameSession>,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn SaveRepository>>,
    restore_save: bool,
    listeners: ListenerRegistry,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session: None,
            oracles: None,
            repository: None,
            restore_save: false,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Use the content bundled with `game-content`
    pub fn builtin_content(self) -> Result<Self> {
        let oracles = OracleManager::builtin().map_err(RuntimeError::Content)?;
        Ok(self.oracles(oracles))
    }

    /// Provide the initial session instead of a fresh game
    pub fn initial_session(mut self, session: GameSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the save repository used by save/load (optional)
    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Restore the session from the repository's save slot, if one exists,
    /// when the runtime is built.
    pub fn restore_from_save(mut self, restore: bool) -> Self {
        self.restore_save = restore;
        self
    }

    /// Register a listener before the worker starts
    pub fn listener<F>(mut self, kind: GameEventKind, listener: F) -> Self
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.listeners.on(kind, listener);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let mut session = match self.session {
            Some(session) => session,
            None => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                GameSession::new(seed, oracles.config())
            }
        };

        if self.restore_save {
            let repository = self
                .repository
                .as_ref()
                .ok_or(RuntimeError::NoSaveRepository)?;
            if let Some(save) = repository.load()? {
                let now = oracles.clock().now_millis();
                session.restore(save, oracles.config(), now);
            }
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = SessionWorker::new(
            session,
            oracles,
            command_rx,
            command_tx.downgrade(),
            event_bus.clone(),
            self.listeners,
        )
        .with_repository(self.repository)
        .with_tick_interval(self.config.tick_interval);

        let handle = RuntimeHandle::new(command_tx, event_bus);

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
