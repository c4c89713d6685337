//! Session worker that owns the authoritative [`GameSession`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies them through
//! [`GameEngine`], then fans the drained events out to listeners and the
//! event bus before replying.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use game_core::{
    GameEngine, GameEvent, GameEventKind, GameSession, LogEntry, SaveData, Spell,
};

use crate::api::{AtbPreview, Result, RuntimeError};
use crate::events::{Event, EventBus, Listener, ListenerId, ListenerRegistry};
use crate::oracle::OracleManager;
use crate::repository::SaveRepository;

/// Commands that can be sent to the session worker
pub(crate) enum Command {
    StartBattle {
        enemy_id: Option<String>,
        reply: oneshot::Sender<Result<()>>,
    },
    UpdateBattle {
        dt: f64,
        reply: oneshot::Sender<()>,
    },
    StartCast {
        index: usize,
        reply: oneshot::Sender<Result<Spell>>,
    },
    InterruptCast {
        reply: oneshot::Sender<Result<()>>,
    },
    EndBattle {
        victory: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    Retreat {
        reply: oneshot::Sender<Result<()>>,
    },
    /// Scheduled by the worker itself after a `BattleEnd`.
    ReturnToCamp {
        battle_id: u64,
    },
    RestartGame {
        reply: oneshot::Sender<()>,
    },

    Rest {
        reply: oneshot::Sender<()>,
    },
    BuyMaterial {
        material_id: String,
        quantity: u32,
        reply: oneshot::Sender<Result<u32>>,
    },
    SellMaterial {
        material_id: String,
        quantity: u32,
        reply: oneshot::Sender<Result<u32>>,
    },
    ChooseRune {
        rune_id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    UpdateSpellSlot {
        slot: usize,
        runes: Vec<String>,
        reply: oneshot::Sender<Result<()>>,
    },
    AddRuneToSlot {
        slot: usize,
        rune_id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    RemoveRuneFromSlot {
        slot: usize,
        index: usize,
        reply: oneshot::Sender<Result<String>>,
    },

    CalculateSpell {
        chain: Vec<String>,
        reply: oneshot::Sender<Spell>,
    },
    WillCastBeInterrupted {
        index: usize,
        reply: oneshot::Sender<bool>,
    },
    PredictAtb {
        time: f64,
        reply: oneshot::Sender<AtbPreview>,
    },
    AtbProgressPercentage {
        progress: f64,
        reply: oneshot::Sender<f64>,
    },
    CastProgressPercentage {
        reply: oneshot::Sender<f64>,
    },
    BattleLog {
        reply: oneshot::Sender<Vec<LogEntry>>,
    },
    QuerySession {
        reply: oneshot::Sender<GameSession>,
    },

    Save {
        reply: oneshot::Sender<Result<SaveData>>,
    },
    Load {
        reply: oneshot::Sender<Result<bool>>,
    },
    DeleteSave {
        reply: oneshot::Sender<Result<()>>,
    },
    HasSave {
        reply: oneshot::Sender<Result<bool>>,
    },

    AddListener {
        kind: GameEventKind,
        listener: Listener,
        reply: oneshot::Sender<ListenerId>,
    },
    RemoveListener {
        id: ListenerId,
        reply: oneshot::Sender<bool>,
    },
}

fn send_reply<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
    if reply.send(value).is_err() {
        debug!(command, "reply channel closed (caller dropped)");
    }
}

/// Background task that processes session commands.
pub(crate) struct SessionWorker {
    session: GameSession,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    /// Weak so that pending camp returns do not keep the worker alive.
    command_tx: mpsc::WeakSender<Command>,
    event_bus: EventBus,
    listeners: ListenerRegistry,
    repository: Option<Arc<dyn SaveRepository>>,
    tick_interval: Option<Duration>,
}

impl SessionWorker {
    pub(crate) fn new(
        session: GameSession,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::WeakSender<Command>,
        event_bus: EventBus,
        listeners: ListenerRegistry,
    ) -> Self {
        info!(
            level = session.player.level,
            scene = %session.scene,
            listeners = listeners.len(),
            "session worker initialized"
        );

        Self {
            session,
            oracles,
            command_rx,
            command_tx,
            event_bus,
            listeners,
            repository: None,
            tick_interval: None,
        }
    }

    pub(crate) fn with_repository(mut self, repository: Option<Arc<dyn SaveRepository>>) -> Self {
        self.repository = repository;
        self
    }

    pub(crate) fn with_tick_interval(mut self, tick_interval: Option<Duration>) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Main worker loop. Exits once every handle has been dropped.
    pub(crate) async fn run(mut self) {
        // Anything queued before the worker started (e.g. a restored save).
        self.flush_events();

        let mut ticker = self.tick_interval.map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                now = next_tick(&mut ticker) => {
                    let dt = now.duration_since(last_tick).as_secs_f64();
                    last_tick = now;
                    self.auto_tick(dt);
                }
            }
        }

        debug!("session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartBattle { enemy_id, reply } => {
                let result = self
                    .engine()
                    .start_battle(enemy_id.as_deref())
                    .map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "StartBattle");
            }
            Command::UpdateBattle { dt, reply } => {
                self.engine().update_battle(dt);
                self.flush_events();
                send_reply(reply, (), "UpdateBattle");
            }
            Command::StartCast { index, reply } => {
                let result = self.engine().start_cast(index).map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "StartCast");
            }
            Command::InterruptCast { reply } => {
                let result = self.engine().interrupt_cast().map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "InterruptCast");
            }
            Command::EndBattle { victory, reply } => {
                let result = self.engine().end_battle(victory).map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "EndBattle");
            }
            Command::Retreat { reply } => {
                let result = self.engine().retreat().map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "Retreat");
            }
            Command::ReturnToCamp { battle_id } => {
                if self.engine().return_to_camp(battle_id) {
                    debug!(battle_id, "returned to camp");
                }
                self.flush_events();
            }
            Command::RestartGame { reply } => {
                self.engine().restart_game();
                self.flush_events();
                send_reply(reply, (), "RestartGame");
            }

            Command::Rest { reply } => {
                self.engine().rest();
                self.flush_events();
                send_reply(reply, (), "Rest");
            }
            Command::BuyMaterial {
                material_id,
                quantity,
                reply,
            } => {
                let result = self
                    .engine()
                    .buy_material(&material_id, quantity)
                    .map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "BuyMaterial");
            }
            Command::SellMaterial {
                material_id,
                quantity,
                reply,
            } => {
                let result = self
                    .engine()
                    .sell_material(&material_id, quantity)
                    .map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "SellMaterial");
            }
            Command::ChooseRune { rune_id, reply } => {
                let result = self.engine().choose_rune(&rune_id).map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "ChooseRune");
            }
            Command::UpdateSpellSlot { slot, runes, reply } => {
                let result = self
                    .engine()
                    .update_spell_slot(slot, runes)
                    .map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "UpdateSpellSlot");
            }
            Command::AddRuneToSlot {
                slot,
                rune_id,
                reply,
            } => {
                let result = self
                    .engine()
                    .add_rune_to_slot(slot, &rune_id)
                    .map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "AddRuneToSlot");
            }
            Command::RemoveRuneFromSlot { slot, index, reply } => {
                let result = self
                    .engine()
                    .remove_rune_from_slot(slot, index)
                    .map_err(RuntimeError::from);
                self.flush_events();
                send_reply(reply, result, "RemoveRuneFromSlot");
            }

            Command::CalculateSpell { chain, reply } => {
                let spell = self.engine().calculate_spell(chain.as_slice());
                send_reply(reply, spell, "CalculateSpell");
            }
            Command::WillCastBeInterrupted { index, reply } => {
                let interrupted = self.engine().peek_cast_interrupt(index);
                send_reply(reply, interrupted, "WillCastBeInterrupted");
            }
            Command::PredictAtb { time, reply } => {
                let engine = self.engine();
                let preview = AtbPreview {
                    player: engine.predict_player_atb(time),
                    enemy: engine.predict_enemy_atb(time),
                };
                send_reply(reply, preview, "PredictAtb");
            }
            Command::AtbProgressPercentage { progress, reply } => {
                let percentage = self.engine().atb_progress_percentage(progress);
                send_reply(reply, percentage, "AtbProgressPercentage");
            }
            Command::CastProgressPercentage { reply } => {
                let percentage = self.engine().cast_progress_percentage();
                send_reply(reply, percentage, "CastProgressPercentage");
            }
            Command::BattleLog { reply } => {
                send_reply(reply, self.session.battle_log(), "BattleLog");
            }
            Command::QuerySession { reply } => {
                send_reply(reply, self.session.clone(), "QuerySession");
            }

            Command::Save { reply } => {
                let result = self.save();
                send_reply(reply, result, "Save");
            }
            Command::Load { reply } => {
                let result = self.load();
                self.flush_events();
                send_reply(reply, result, "Load");
            }
            Command::DeleteSave { reply } => {
                let result = self
                    .repository()
                    .and_then(|repository| repository.delete().map_err(RuntimeError::from));
                send_reply(reply, result, "DeleteSave");
            }
            Command::HasSave { reply } => {
                let result = self.repository().map(|repository| repository.exists());
                send_reply(reply, result, "HasSave");
            }

            Command::AddListener {
                kind,
                listener,
                reply,
            } => {
                let id = self.listeners.insert(kind, listener);
                send_reply(reply, id, "AddListener");
            }
            Command::RemoveListener { id, reply } => {
                send_reply(reply, self.listeners.off(id), "RemoveListener");
            }
        }
    }

    fn engine(&mut self) -> GameEngine<'_> {
        GameEngine::new(&mut self.session, self.oracles.as_game_env())
    }

    fn auto_tick(&mut self, dt: f64) {
        if !self.session.battle.active {
            return;
        }
        self.engine().update_battle(dt);
        self.flush_events();
    }

    /// Drains the session's event queue into listeners and the bus.
    fn flush_events(&mut self) {
        let events = self.session.drain_events();
        if events.is_empty() {
            return;
        }

        let battle_id = self.session.battle_id();
        let timestamp = self.oracles.clock().now_millis();
        for payload in events {
            if let GameEvent::BattleEnd { battle_id, .. } = payload {
                self.schedule_camp_return(battle_id);
            }
            self.listeners.dispatch(&payload);
            self.event_bus.publish(Event {
                battle_id,
                timestamp,
                payload,
            });
        }
    }

    /// Sends `ReturnToCamp` back to this worker after the configured delay.
    fn schedule_camp_return(&self, battle_id: u64) {
        let delay = Duration::from_millis(self.oracles.config().camp_return_delay_ms);
        let command_tx = self.command_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(command_tx) = command_tx.upgrade() else {
                debug!(battle_id, "runtime stopped before camp return");
                return;
            };
            if command_tx
                .send(Command::ReturnToCamp { battle_id })
                .await
                .is_err()
            {
                debug!(battle_id, "session worker gone before camp return");
            }
        });
    }

    fn repository(&self) -> Result<&Arc<dyn SaveRepository>> {
        self.repository.as_ref().ok_or(RuntimeError::NoSaveRepository)
    }

    fn save(&self) -> Result<SaveData> {
        let repository = self.repository()?;
        let timestamp = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        let save = self.session.to_save_data(timestamp);

        if let Err(err) = repository.save(&save) {
            error!(error = %err, "failed to write save");
            return Err(err.into());
        }
        info!(
            scene = %save.last_scene,
            level = save.player.level,
            mid_battle = save.is_mid_battle(),
            "game saved"
        );
        Ok(save)
    }

    fn load(&mut self) -> Result<bool> {
        let loaded = match self.repository()?.load() {
            Ok(loaded) => loaded,
            Err(err) => {
                error!(error = %err, "failed to read save");
                return Err(err.into());
            }
        };
        let Some(save) = loaded else {
            warn!("load requested but no save exists");
            return Ok(false);
        };

        let now = self.oracles.clock().now_millis();
        self.session.restore(save, self.oracles.config(), now);
        Ok(true)
    }
}

async fn next_tick(ticker: &mut Option<Interval>) -> Instant {
    match ticker {
        Some(interval) => interval.tick().await,
        None => std::future::pending().await,
    }
}
