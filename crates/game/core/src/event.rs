//! Typed domain events queued by the engine.
//!
//! Events are informational: the core never reads them back, and dropping
//! them does not change simulation results. Hosts drain them from
//! [`crate::GameSession::drain_events`] after each call.

use crate::spell::Spell;
use crate::state::{Actor, ActorStatus, BattlePhase, Scene};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Trade {
    Buy,
    Sell,
}

#[derive(Clone, Debug, PartialEq, strum::EnumDiscriminants, strum::IntoStaticStr)]
#[strum_discriminants(name(GameEventKind), derive(Hash, strum::Display, strum::EnumIter))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    BattleStart {
        battle_id: u64,
        enemy_id: String,
        enemy_name: String,
    },
    BattleEnd {
        battle_id: u64,
        victory: bool,
    },
    SceneChange {
        scene: Scene,
    },
    PhaseChange {
        old: Option<BattlePhase>,
        new: BattlePhase,
    },
    ActorChange {
        actor: Actor,
    },
    PlayerStatusChange {
        old: ActorStatus,
        new: ActorStatus,
    },
    EnemyStatusChange {
        old: ActorStatus,
        new: ActorStatus,
        enemy_name: String,
    },
    /// `hp` is the value after the hit.
    PlayerDamage {
        damage: u32,
        hp: u32,
    },
    EnemyDamage {
        damage: u32,
        hp: u32,
    },
    PlayerHeal {
        heal: u32,
        hp: u32,
    },
    /// An enemy hit landed. `skill_id` is `None` for a completed channel.
    EnemyAttack {
        damage: u32,
        skill_id: Option<String>,
    },
    /// The enemy began channeling a skill.
    EnemyAttackStart {
        skill_id: String,
        skill_name: String,
        channel_time: f64,
    },
    SpellCast {
        index: usize,
        spell: Spell,
    },
    SpellComplete {
        spell: Spell,
    },
    SpellInterrupt {
        spell: Option<Spell>,
    },
    ResourceChange {
        gold: u32,
        experience: u32,
        level: u32,
    },
    LevelUp {
        old_level: u32,
        new_level: u32,
        hp_increase: u32,
        mp_increase: u32,
        speed_increase: u32,
    },
    MaterialDrop {
        material_id: String,
        quantity: u32,
    },
    RuneChoice {
        choices: Vec<String>,
    },
    /// `gold` is the amount paid or received.
    ShopUpdate {
        trade: Trade,
        material_id: String,
        quantity: u32,
        gold: u32,
    },
    SpellSlotUpdated {
        slot: usize,
        runes: Vec<String>,
    },
    GameRestart,
}

impl GameEvent {
    pub fn kind(&self) -> GameEventKind {
        self.into()
    }

    /// Variant name, e.g. `"BattleStart"`.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let event = GameEvent::PhaseChange {
            old: None,
            new: BattlePhase::Preparation,
        };
        assert_eq!(event.kind(), GameEventKind::PhaseChange);
        assert_eq!(event.name(), "PhaseChange");
        assert_eq!(GameEvent::GameRestart.kind(), GameEventKind::GameRestart);
    }
}
