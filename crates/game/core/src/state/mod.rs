//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the player, the live
//! enemy, the battle in progress and the persisted snapshot. Runtime layers
//! clone or query this state but mutate it exclusively through the engine.
mod battle;
mod enemy;
mod log;
mod player;
mod save;
mod session;

pub use battle::{Actor, ActorStatus, BattlePhase, BattleState, CurrentSpell};
pub use enemy::{AiStrategy, Enemy, EnemySkill, Reward, SkillConditions, StrategyKind};
pub use log::{BattleLog, LogEntry, LogKind};
pub use player::Player;
pub use save::SaveData;
pub use session::{GameSession, RollContext, Scene};
