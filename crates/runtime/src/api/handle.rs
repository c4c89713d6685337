//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers one async method per
//! engine entry point, plus topic subscriptions for streaming events.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{GameEvent, GameEventKind, GameSession, LogEntry, SaveData, Spell};

use super::AtbPreview;
use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, ListenerId, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    // ------------------------------------------------------------------
    // Battle
    // ------------------------------------------------------------------

    /// Start a battle against `enemy_id`, or a random template when `None`.
    pub async fn start_battle(&self, enemy_id: Option<&str>) -> Result<()> {
        let enemy_id = enemy_id.map(str::to_owned);
        self.request(|reply| Command::StartBattle { enemy_id, reply })
            .await?
    }

    /// Advance the battle by `dt` seconds.
    pub async fn update_battle(&self, dt: f64) -> Result<()> {
        self.request(|reply| Command::UpdateBattle { dt, reply }).await
    }

    /// Begin channeling the spell in slot `index` during the player's action window.
    pub async fn start_cast(&self, index: usize) -> Result<Spell> {
        self.request(|reply| Command::StartCast { index, reply })
            .await?
    }

    pub async fn interrupt_cast(&self) -> Result<()> {
        self.request(|reply| Command::InterruptCast { reply }).await?
    }

    pub async fn end_battle(&self, victory: bool) -> Result<()> {
        self.request(|reply| Command::EndBattle { victory, reply })
            .await?
    }

    /// Leave the active battle immediately, without rewards.
    pub async fn retreat(&self) -> Result<()> {
        self.request(|reply| Command::Retreat { reply }).await?
    }

    pub async fn restart_game(&self) -> Result<()> {
        self.request(|reply| Command::RestartGame { reply }).await
    }

    // ------------------------------------------------------------------
    // Camp & progression
    // ------------------------------------------------------------------

    pub async fn rest(&self) -> Result<()> {
        self.request(|reply| Command::Rest { reply }).await
    }

    /// Buy materials; returns the gold paid.
    pub async fn buy_material(&self, material_id: &str, quantity: u32) -> Result<u32> {
        let material_id = material_id.to_owned();
        self.request(|reply| Command::BuyMaterial {
            material_id,
            quantity,
            reply,
        })
        .await?
    }

    /// Sell materials; returns the gold received.
    pub async fn sell_material(&self, material_id: &str, quantity: u32) -> Result<u32> {
        let material_id = material_id.to_owned();
        self.request(|reply| Command::SellMaterial {
            material_id,
            quantity,
            reply,
        })
        .await?
    }

    pub async fn choose_rune(&self, rune_id: &str) -> Result<()> {
        let rune_id = rune_id.to_owned();
        self.request(|reply| Command::ChooseRune { rune_id, reply })
            .await?
    }

    pub async fn update_spell_slot(&self, slot: usize, runes: Vec<String>) -> Result<()> {
        self.request(|reply| Command::UpdateSpellSlot { slot, runes, reply })
            .await?
    }

    pub async fn add_rune_to_slot(&self, slot: usize, rune_id: &str) -> Result<()> {
        let rune_id = rune_id.to_owned();
        self.request(|reply| Command::AddRuneToSlot {
            slot,
            rune_id,
            reply,
        })
        .await?
    }

    /// Remove the rune at `index` from `slot`; returns the removed rune id.
    pub async fn remove_rune_from_slot(&self, slot: usize, index: usize) -> Result<String> {
        self.request(|reply| Command::RemoveRuneFromSlot { slot, index, reply })
            .await?
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub async fn calculate_spell(&self, chain: Vec<String>) -> Result<Spell> {
        self.request(|reply| Command::CalculateSpell { chain, reply })
            .await
    }

    /// Whether the enemy's likely next action would break a cast of slot
    /// `index`. Does not commit the enemy's choice.
    pub async fn will_cast_be_interrupted(&self, index: usize) -> Result<bool> {
        self.request(|reply| Command::WillCastBeInterrupted { index, reply })
            .await
    }

    /// Forecast both ATB gauges `time` seconds ahead.
    pub async fn predict_atb(&self, time: f64) -> Result<AtbPreview> {
        self.request(|reply| Command::PredictAtb { time, reply })
            .await
    }

    pub async fn atb_progress_percentage(&self, progress: f64) -> Result<f64> {
        self.request(|reply| Command::AtbProgressPercentage { progress, reply })
            .await
    }

    pub async fn cast_progress_percentage(&self) -> Result<f64> {
        self.request(|reply| Command::CastProgressPercentage { reply })
            .await
    }

    pub async fn battle_log(&self) -> Result<Vec<LogEntry>> {
        self.request(|reply| Command::BattleLog { reply }).await
    }

    /// Query a snapshot of the current session (read-only)
    pub async fn query_session(&self) -> Result<GameSession> {
        self.request(|reply| Command::QuerySession { reply }).await
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the current session to the save slot and return the snapshot.
    pub async fn save(&self) -> Result<SaveData> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Restore the session from the save slot. Returns `false` if the slot is empty.
    pub async fn load(&self) -> Result<bool> {
        self.request(|reply| Command::Load { reply }).await?
    }

    pub async fn delete_save(&self) -> Result<()> {
        self.request(|reply| Command::DeleteSave { reply }).await?
    }

    pub async fn has_save(&self) -> Result<bool> {
        self.request(|reply| Command::HasSave { reply }).await?
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a synchronous listener for one event kind.
    ///
    /// Listeners run on the session worker, so they must not block or call
    /// back into this handle.
    pub async fn add_listener<F>(&self, kind: GameEventKind, listener: F) -> Result<ListenerId>
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        let listener = Arc::new(listener);
        self.request(|reply| Command::AddListener {
            kind,
            listener,
            reply,
        })
        .await
    }

    pub async fn remove_listener(&self, id: ListenerId) -> Result<bool> {
        self.request(|reply| Command::RemoveListener { id, reply })
            .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - phases, statuses, damage, casts and enemy actions
    /// - `Topic::Progression` - resources, level-ups, drops, rune offers, shop and slots
    /// - `Topic::Session` - scene changes and restarts
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut session_rx = handle.subscribe(Topic::Session);
    /// while let Ok(event) = session_rx.recv().await {
    ///     // Handle scene changes
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
