//! Per-phase tick handlers and action resolution.

use super::GameEngine;
use crate::event::GameEvent;
use crate::state::{Actor, ActorStatus, BattlePhase, LogKind, RollContext};

impl GameEngine<'_> {
    /// Fills both gauges, runs the player's cast timer and hands the turn to
    /// whichever side is ready first. The player wins ties, and a ready side
    /// takes its turn even on the tick a cast completes.
    pub(super) fn update_preparation(&mut self, dt: f64) {
        let Some(enemy_speed) = self.session.enemy.as_ref().map(|enemy| enemy.speed) else {
            return;
        };
        let atb = self.atb();
        let player_speed = self.session.player.speed;

        match self.session.battle.player_status {
            ActorStatus::Preparing | ActorStatus::Stunned => {
                let battle = &mut self.session.battle;
                battle.player_atb = atb.update(player_speed, dt, battle.player_atb);
            }
            ActorStatus::Channeling => {
                let now = self.env.now_millis();
                self.session.battle.player_atb = 0.0;
                self.session.cast_timer.update(now);
                self.session.battle.cast_progress = self.session.cast_timer.progress();
                if self.session.cast_timer.is_complete() {
                    self.set_phase(BattlePhase::Resolution);
                }
            }
        }

        let battle = &mut self.session.battle;
        match battle.enemy_status {
            ActorStatus::Preparing => {
                battle.enemy_atb = atb.update(enemy_speed, dt, battle.enemy_atb);
            }
            ActorStatus::Channeling => battle.enemy_atb = 0.0,
            ActorStatus::Stunned => {}
        }

        // Readiness overrides a pending resolution, so a full enemy gauge
        // acts before the player's completed cast lands.
        let player_ready = atb.is_ready(battle.player_atb)
            && matches!(
                battle.player_status,
                ActorStatus::Preparing | ActorStatus::Stunned
            );
        let enemy_ready =
            atb.is_ready(battle.enemy_atb) && battle.enemy_status == ActorStatus::Preparing;

        let actor = if player_ready {
            Actor::Player
        } else if enemy_ready {
            Actor::Enemy
        } else {
            return;
        };
        self.set_phase(BattlePhase::Action);
        self.session.battle.current_actor = Some(actor);
        self.session.emit(GameEvent::ActorChange { actor });
    }

    /// The player's action window stays open until `start_cast`; the enemy
    /// acts immediately.
    pub(super) fn update_action(&mut self) {
        if self.session.battle.current_actor == Some(Actor::Enemy) {
            self.enemy_action();
        }
    }

    pub(super) fn update_resolution(&mut self) {
        if self.session.battle.player_status == ActorStatus::Channeling {
            self.finish_cast();
            if !self.session.battle.active {
                return;
            }
        }

        if self.session.battle.enemy_status == ActorStatus::Channeling {
            self.finish_enemy_cast();
            if !self.session.battle.active {
                return;
            }
        }

        self.session.battle.current_actor = None;
        self.set_phase(BattlePhase::Preparation);
    }

    fn finish_cast(&mut self) {
        let Some(current) = self.session.battle.current_spell.clone() else {
            self.session.cast_timer.reset();
            self.set_player_status(ActorStatus::Preparing);
            return;
        };
        let spell = current.spell;

        if spell.damage > 0 {
            let Some(enemy) = self.session.enemy.as_mut() else {
                return;
            };
            let remaining = enemy.take_damage(spell.damage);
            let hp = enemy.hp;
            tracing::debug!(spell = %spell.name, damage = spell.damage, remaining, "spell hit");
            self.log(
                LogKind::Player,
                format!("{} deals {} damage!", spell.name, spell.damage),
            );
            self.session.emit(GameEvent::EnemyDamage {
                damage: spell.damage,
                hp,
            });
            if remaining <= 0 {
                self.finish_battle(true);
                return;
            }
        } else if spell.heal > 0 {
            self.session.player.heal(spell.heal);
            let hp = self.session.player.hp;
            self.log(
                LogKind::Player,
                format!("{} restores {} HP!", spell.name, spell.heal),
            );
            self.session.emit(GameEvent::PlayerHeal {
                heal: spell.heal,
                hp,
            });
        }

        self.session.battle.player_atb = 0.0;
        self.session.battle.clear_cast();
        self.session.cast_timer.reset();
        self.session.emit(GameEvent::SpellComplete { spell });
        self.set_player_status(ActorStatus::Preparing);
    }

    /// Runs the enemy's turn: either begins channeling or lands an instant hit.
    pub(super) fn enemy_action(&mut self) {
        let seed = self.session.next_roll_seed(RollContext::SkillDraw);
        let roll = self.env.rng().roll_unit(seed);
        let Some(enemy) = self.session.enemy.as_ref() else {
            return;
        };
        let skill = self.session.ai.select_skill(enemy, roll);
        let enemy_name = enemy.name.clone();
        tracing::debug!(enemy = %enemy.id, skill = %skill.id, "enemy action");

        if skill.is_channeled() {
            self.session.battle.enemy_atb = 0.0;
            self.log(
                LogKind::Enemy,
                format!("{enemy_name} begins channeling {}...", skill.name),
            );
            self.session.emit(GameEvent::EnemyAttackStart {
                skill_id: skill.id.clone(),
                skill_name: skill.name.clone(),
                channel_time: skill.channel_time,
            });
            self.set_enemy_status(ActorStatus::Channeling);
        } else {
            let damage = skill.damage;
            let remaining = self.session.player.take_damage(damage);
            let hp = self.session.player.hp;
            self.log(
                LogKind::Enemy,
                format!("{enemy_name} uses {} for {damage} damage!", skill.name),
            );
            self.session.emit(GameEvent::EnemyAttack {
                damage,
                skill_id: Some(skill.id),
            });
            self.session.emit(GameEvent::PlayerDamage { damage, hp });

            if self.session.battle.player_status == ActorStatus::Channeling
                && damage >= self.session.battle.focus_value
            {
                tracing::debug!(damage, focus = self.session.battle.focus_value, "cast interrupted");
                // channeling was just checked, so this cannot be rejected
                let _ = self.interrupt_cast();
            }

            if remaining <= 0 {
                self.finish_battle(false);
                return;
            }

            self.session.battle.enemy_atb = 0.0;
            self.set_enemy_status(ActorStatus::Preparing);
        }

        self.session.battle.current_actor = None;
        self.set_phase(BattlePhase::Preparation);
    }

    /// Lands a completed enemy channel. Damage is the enemy's flat damage
    /// scaled by the configured channel multiplier, whatever skill was chosen.
    fn finish_enemy_cast(&mut self) {
        let Some(enemy) = self.session.enemy.as_ref() else {
            return;
        };
        let enemy_name = enemy.name.clone();
        let damage =
            (f64::from(enemy.damage) * self.config().channel_damage_multiplier).round() as u32;

        let remaining = self.session.player.take_damage(damage);
        let hp = self.session.player.hp;
        self.log(
            LogKind::Enemy,
            format!("{enemy_name}'s channeled skill deals {damage} damage!"),
        );
        self.session.emit(GameEvent::EnemyAttack {
            damage,
            skill_id: None,
        });
        self.session.emit(GameEvent::PlayerDamage { damage, hp });

        if remaining <= 0 {
            self.finish_battle(false);
            return;
        }

        self.session.battle.enemy_atb = 0.0;
        self.set_enemy_status(ActorStatus::Preparing);
    }
}
