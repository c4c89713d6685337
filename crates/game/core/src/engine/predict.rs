//! Read-only previews for presentation.

use super::GameEngine;
use crate::spell::calculate_spell;
use crate::state::{ActorStatus, EnemySkill, RollContext};

impl GameEngine<'_> {
    /// Whether casting slot `index` now would likely be interrupted.
    ///
    /// True when the enemy's gauge fills before the cast would finish and the
    /// skill it then picks hits at or above the focus value. The skill is
    /// drawn through the committing selector, so cooldowns are armed and the
    /// roll sequence advances as if the enemy had acted. See
    /// [`Self::peek_cast_interrupt`] for a pure variant.
    pub fn will_cast_be_interrupted(&mut self, index: usize) -> bool {
        if !self.enemy_ready_during_cast(index) {
            return false;
        }
        match self.predict_enemy_action() {
            Some(skill) => skill.damage >= self.session.battle.focus_value,
            None => false,
        }
    }

    /// Same as [`Self::will_cast_be_interrupted`] without touching AI memory
    /// or the roll sequence.
    pub fn peek_cast_interrupt(&self, index: usize) -> bool {
        if !self.enemy_ready_during_cast(index) {
            return false;
        }
        self.peek_enemy_action()
            .is_some_and(|skill| skill.damage >= self.session.battle.focus_value)
    }

    /// Whether the enemy's gauge fills before a cast of slot `index` completes.
    fn enemy_ready_during_cast(&self, index: usize) -> bool {
        let Some(enemy) = self.session.enemy.as_ref() else {
            return false;
        };
        if self.session.battle.enemy_status == ActorStatus::Channeling {
            return false;
        }
        let Some(chain) = self.session.player.spells.get(index) else {
            return false;
        };
        if chain.is_empty() {
            return false;
        }
        let spell = calculate_spell(chain, self.env.runes());
        let time_to_ready = self
            .atb()
            .time_to_ready(self.session.battle.enemy_atb, enemy.speed);
        time_to_ready <= spell.time
    }

    /// Draws and commits the enemy's next skill, as the battle would.
    pub fn predict_enemy_action(&mut self) -> Option<EnemySkill> {
        let seed = self.session.next_roll_seed(RollContext::SkillDraw);
        let roll = self.env.rng().roll_unit(seed);
        let enemy = self.session.enemy.as_ref()?;
        Some(self.session.ai.predict_enemy_action(enemy, roll))
    }

    /// The skill the enemy would pick on its next turn, given no other roll
    /// happens first. Commits nothing.
    pub fn peek_enemy_action(&self) -> Option<EnemySkill> {
        let enemy = self.session.enemy.as_ref()?;
        let seed = self.session.peek_roll_seed(RollContext::SkillDraw);
        let roll = self.env.rng().roll_unit(seed);
        Some(self.session.ai.peek_skill(enemy, roll))
    }

    /// Enemy gauge after `time` more seconds. Falls back to the stored value
    /// without an enemy.
    pub fn predict_enemy_atb(&self, time: f64) -> f64 {
        let current = self.session.battle.enemy_atb;
        match self.session.enemy.as_ref() {
            Some(enemy) => self.atb().predict(current, enemy.speed, time),
            None => current,
        }
    }

    pub fn predict_player_atb(&self, time: f64) -> f64 {
        self.atb().predict(
            self.session.battle.player_atb,
            self.session.player.speed,
            time,
        )
    }

    pub fn atb_progress_percentage(&self, progress: f64) -> f64 {
        self.atb().percentage(progress)
    }

    pub fn cast_progress_percentage(&self) -> f64 {
        self.session.cast_timer.percentage()
    }
}
