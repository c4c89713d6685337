//! Per-battle state: phase, actors, ATB gauges and the spell in flight.

use crate::spell::Spell;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    /// Both gauges fill; a channeling player's cast timer runs.
    #[default]
    Preparation,
    /// One actor is designated to act.
    Action,
    /// Completed casts are applied.
    Resolution,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Actor {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActorStatus {
    #[default]
    Preparing,
    Channeling,
    Stunned,
}

/// The spell the player is channeling, with the slot it came from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentSpell {
    pub index: usize,
    pub spell: Spell,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub active: bool,
    pub phase: BattlePhase,
    /// Set only while `phase` is [`BattlePhase::Action`].
    pub current_actor: Option<Actor>,
    pub player_atb: f64,
    pub enemy_atb: f64,
    pub player_status: ActorStatus,
    pub enemy_status: ActorStatus,
    /// Player cast progress in `[0, 1]`.
    pub cast_progress: f64,
    pub current_spell: Option<CurrentSpell>,
    /// Remaining stun seconds.
    pub stun_timer: f64,
    /// Incoming damage at or above this value interrupts a channeling player.
    pub focus_value: u32,
}

impl BattleState {
    /// Inactive battle with every field at its initial value.
    pub fn new(focus_value: u32) -> Self {
        Self {
            active: false,
            phase: BattlePhase::Preparation,
            current_actor: None,
            player_atb: 0.0,
            enemy_atb: 0.0,
            player_status: ActorStatus::Preparing,
            enemy_status: ActorStatus::Preparing,
            cast_progress: 0.0,
            current_spell: None,
            stun_timer: 0.0,
            focus_value,
        }
    }

    /// Resets every field to its initial value. `active` is cleared too.
    pub fn reset(&mut self, focus_value: u32) {
        *self = Self::new(focus_value);
    }

    /// Cast time in seconds of the spell in flight, or 0.
    pub fn current_spell_time(&self) -> f64 {
        self.current_spell
            .as_ref()
            .map_or(0.0, |current| current.spell.time)
    }

    /// Slot index of the spell in flight.
    pub fn current_spell_index(&self) -> Option<usize> {
        self.current_spell.as_ref().map(|current| current.index)
    }

    pub(crate) fn clear_cast(&mut self) {
        self.cast_progress = 0.0;
        self.current_spell = None;
    }
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new(crate::config::GameConfig::DEFAULT_BATTLE_FOCUS_VALUE)
    }
}
