//! Deterministic battle rules for the rune-crafting ATB game.
//!
//! `game-core` defines the canonical rules (spell composition, ATB pacing,
//! enemy skill selection, the battle phase machine and progression) and
//! exposes them through [`engine::GameEngine`]. All mutation of a
//! [`GameSession`] flows through the engine; supporting crates depend on the
//! types re-exported here.
//!
//! The crate performs no I/O. Static data (runes, enemies, materials), time and
//! randomness are reached through the oracle traits in [`env`], and every
//! observable change is queued as a [`GameEvent`] for the host to drain.
pub mod ai;
pub mod atb;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod progression;
pub mod spell;
pub mod state;

pub use ai::{AiSystem, EnemyAiState};
pub use atb::{AtbTracker, CastTimer};
pub use config::GameConfig;
pub use engine::{BattleError, CastError, GameEngine, ProgressionError, ShopError, SlotError};
pub use env::{
    ClockOracle, EnemyOracle, GameEnv, ManualClock, Material, MaterialOracle, PcgRng, RngOracle,
    Rune, RuneKind, RuneOracle, RuneTier, SystemClock, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{GameEvent, GameEventKind, Trade};
pub use progression::experience_to_next_level;
pub use spell::{Spell, calculate_spell};
pub use state::{
    Actor, ActorStatus, AiStrategy, BattleLog, BattlePhase, BattleState, CurrentSpell, Enemy,
    EnemySkill, GameSession, LogEntry, LogKind, Player, Reward, RollContext, SaveData, Scene,
    SkillConditions, StrategyKind,
};
