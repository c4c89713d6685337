//! The explicit session context every rule operates on.

use crate::ai::AiSystem;
use crate::atb::CastTimer;
use crate::config::GameConfig;
use crate::env::compute_seed;
use crate::event::GameEvent;

use super::{ActorStatus, BattleLog, BattleState, Enemy, LogEntry, LogKind, Player, SaveData};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Scene {
    #[default]
    Camp,
    Battle,
}

/// Roll site tags mixed into every random seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    EnemyPick = 1,
    SkillDraw = 2,
    Drop = 3,
    RuneShuffle = 4,
}

/// Owns all mutable game state: player, current battle, AI memory and the
/// outbound event queue.
///
/// Rules never hold state of their own; [`crate::GameEngine`] borrows the
/// session mutably for the duration of one call.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    /// Live enemy instance, cloned from a template. `None` outside battle.
    pub enemy: Option<Enemy>,
    pub battle: BattleState,
    pub scene: Scene,
    pub log: BattleLog,
    pub ai: AiSystem,
    pub cast_timer: CastTimer,
    /// Rune ids offered by the most recent level-up, awaiting a choice.
    pub pending_rune_choices: Vec<String>,

    seed: u64,
    roll_nonce: u64,
    /// Incremented on every battle start, retreat and restore.
    battle_id: u64,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        Self {
            player: Player::starting(),
            enemy: None,
            battle: BattleState::new(config.battle_focus_value),
            scene: Scene::Camp,
            log: BattleLog::new(config.log_capacity),
            ai: AiSystem::new(),
            cast_timer: CastTimer::new(),
            pending_rune_choices: Vec::new(),
            seed,
            roll_nonce: 0,
            battle_id: 0,
            events: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn roll_nonce(&self) -> u64 {
        self.roll_nonce
    }

    pub fn battle_id(&self) -> u64 {
        self.battle_id
    }

    pub(crate) fn next_battle_id(&mut self) -> u64 {
        self.battle_id += 1;
        self.battle_id
    }

    /// Seed for the next random draw. Each call advances the roll nonce.
    pub fn next_roll_seed(&mut self, context: RollContext) -> u64 {
        let seed = compute_seed(self.seed, self.roll_nonce, context as u32);
        self.roll_nonce += 1;
        seed
    }

    /// Seed the next [`Self::next_roll_seed`] call will return, without advancing.
    pub fn peek_roll_seed(&self, context: RollContext) -> u64 {
        compute_seed(self.seed, self.roll_nonce, context as u32)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain, in emission order.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn push_log(&mut self, kind: LogKind, message: impl Into<String>, timestamp: u64) {
        self.log.push(kind, message, timestamp);
    }

    pub fn battle_log(&self) -> Vec<LogEntry> {
        self.log.to_vec()
    }

    pub fn in_battle(&self) -> bool {
        self.battle.active && self.enemy.is_some()
    }

    /// Snapshot for persistence. Enemy and battle are included only while the
    /// battle scene holds an enemy.
    pub fn to_save_data(&self, timestamp: u64) -> SaveData {
        let mid_battle = self.scene == Scene::Battle && self.enemy.is_some();
        SaveData {
            player: self.player.clone(),
            last_scene: self.scene,
            timestamp,
            enemy: mid_battle.then(|| self.enemy.clone()).flatten(),
            battle: mid_battle.then(|| self.battle.clone()),
        }
    }

    /// Replaces the session contents with a snapshot.
    ///
    /// An active battle is resumed: AI memory is re-created for the enemy and a
    /// channeling player's cast timer is re-armed at `now_ms` from the saved
    /// progress. Anything else restores into camp.
    pub fn restore(&mut self, save: SaveData, config: &GameConfig, now_ms: u64) {
        self.player = save.player;
        self.pending_rune_choices.clear();
        self.ai = AiSystem::new();
        self.cast_timer.reset();
        self.battle_id += 1;

        match (save.last_scene, save.enemy, save.battle) {
            (Scene::Battle, Some(enemy), Some(mut battle)) if battle.active => {
                self.ai.initialize(&enemy);
                if battle.player_status == ActorStatus::Channeling {
                    if let Some(current) = &battle.current_spell {
                        self.cast_timer.resume(
                            current.index,
                            current.spell.time,
                            battle.cast_progress,
                            now_ms,
                        );
                    } else {
                        // nothing to resume, so the gauge has to fill again
                        tracing::warn!("channeling save without a spell, resetting to preparing");
                        battle.player_status = ActorStatus::Preparing;
                        battle.cast_progress = 0.0;
                    }
                }
                self.enemy = Some(enemy);
                self.battle = battle;
                self.scene = Scene::Battle;
            }
            _ => {
                self.enemy = None;
                self.battle = BattleState::new(config.battle_focus_value);
                self.scene = Scene::Camp;
            }
        }

        tracing::info!(scene = %self.scene, level = self.player.level, "session restored");
        self.emit(GameEvent::SceneChange { scene: self.scene });
    }
}
