//! Battle state machine and the entry points hosts call into.
//!
//! The [`GameEngine`] borrows a [`GameSession`] mutably together with a
//! [`GameEnv`] and applies one operation at a time. Every observable change is
//! queued on the session as a [`GameEvent`]; rejected operations return an
//! error and leave the session untouched.

mod cast;
mod errors;
mod phases;
mod predict;

pub use errors::{BattleError, CastError, ProgressionError, ShopError, SlotError};

use crate::atb::AtbTracker;
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::spell::{Spell, calculate_spell};
use crate::state::{
    ActorStatus, BattlePhase, BattleState, GameSession, LogEntry, LogKind, Player, RollContext,
    Scene,
};

/// Drives a [`GameSession`] through battles, progression and camp actions.
pub struct GameEngine<'a> {
    pub(crate) session: &'a mut GameSession,
    pub(crate) env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(session: &'a mut GameSession, env: GameEnv<'a>) -> Self {
        Self { session, env }
    }

    pub fn session(&self) -> &GameSession {
        self.session
    }

    pub(crate) fn config(&self) -> &'a GameConfig {
        self.env.config()
    }

    pub(crate) fn atb(&self) -> AtbTracker {
        AtbTracker::from_config(self.config())
    }

    pub(crate) fn log(&mut self, kind: LogKind, message: impl Into<String>) {
        let now = self.env.now_millis();
        self.session.push_log(kind, message, now);
    }

    pub(crate) fn set_phase(&mut self, new: BattlePhase) {
        let old = self.session.battle.phase;
        self.session.battle.phase = new;
        tracing::debug!(%old, %new, "phase change");
        self.session.emit(GameEvent::PhaseChange {
            old: Some(old),
            new,
        });
    }

    pub(crate) fn set_player_status(&mut self, new: ActorStatus) {
        let old = self.session.battle.player_status;
        self.session.battle.player_status = new;
        self.session.emit(GameEvent::PlayerStatusChange { old, new });
    }

    pub(crate) fn set_enemy_status(&mut self, new: ActorStatus) {
        let old = self.session.battle.enemy_status;
        self.session.battle.enemy_status = new;
        let enemy_name = self
            .session
            .enemy
            .as_ref()
            .map(|enemy| enemy.name.clone())
            .unwrap_or_default();
        self.session.emit(GameEvent::EnemyStatusChange {
            old,
            new,
            enemy_name,
        });
    }

    /// Stats of `chain` under the current rune catalog.
    pub fn calculate_spell<S: AsRef<str>>(&self, chain: &[S]) -> Spell {
        calculate_spell(chain, self.env.runes())
    }

    /// Up to the configured number of most recent log entries, oldest first.
    pub fn battle_log(&self) -> Vec<LogEntry> {
        self.session.battle_log()
    }

    /// Starts a battle against `enemy_id`, or a uniformly drawn template.
    ///
    /// The template is cloned so battle damage never reaches the catalog.
    /// Starting while another battle is active replaces it.
    pub fn start_battle(&mut self, enemy_id: Option<&str>) -> Result<(), BattleError> {
        let enemies = self.env.enemies();
        let template = match enemy_id {
            Some(id) => enemies
                .template(id)
                .ok_or_else(|| BattleError::UnknownEnemy(id.to_string()))?,
            None => {
                let ids = enemies.enemy_ids();
                if ids.is_empty() {
                    return Err(BattleError::NoEnemyTemplates);
                }
                let seed = self.session.next_roll_seed(RollContext::EnemyPick);
                let pick = self.env.rng().index(seed, ids.len());
                enemies
                    .template(ids[pick])
                    .ok_or(BattleError::NoEnemyTemplates)?
            }
        };
        let enemy = template.clone();

        let battle_id = self.session.next_battle_id();
        if let Some(previous) = self.session.enemy.take() {
            self.session.ai.reset(&previous.id);
        }
        self.session.scene = Scene::Battle;
        self.session.battle.reset(self.config().battle_focus_value);
        self.session.battle.active = true;
        self.session.cast_timer.reset();
        self.session.log.clear();
        self.session.ai.initialize(&enemy);

        tracing::info!(
            battle_id,
            enemy = %enemy.id,
            hp = enemy.hp,
            damage = enemy.damage,
            speed = enemy.speed,
            "battle started"
        );
        self.log(
            LogKind::System,
            format!("Battle start! Encountered {} {}", enemy.name, enemy.icon),
        );

        self.session.emit(GameEvent::BattleStart {
            battle_id,
            enemy_id: enemy.id.clone(),
            enemy_name: enemy.name.clone(),
        });
        self.session.enemy = Some(enemy);
        self.session.emit(GameEvent::SceneChange {
            scene: Scene::Battle,
        });
        self.session.emit(GameEvent::PhaseChange {
            old: None,
            new: BattlePhase::Preparation,
        });
        Ok(())
    }

    /// Advances the battle by `dt` seconds. No-op without an active battle.
    pub fn update_battle(&mut self, dt: f64) {
        if !self.session.in_battle() {
            return;
        }

        self.session.ai.update(dt);

        let battle = &mut self.session.battle;
        if battle.stun_timer > 0.0 {
            battle.stun_timer -= dt;
            if battle.stun_timer <= 0.0 {
                battle.stun_timer = 0.0;
                if battle.player_status == ActorStatus::Stunned {
                    self.set_player_status(ActorStatus::Preparing);
                }
            }
        }

        match self.session.battle.phase {
            BattlePhase::Preparation => self.update_preparation(dt),
            BattlePhase::Action => self.update_action(),
            BattlePhase::Resolution => self.update_resolution(),
        }
    }

    /// Ends the active battle, crediting rewards on victory.
    pub fn end_battle(&mut self, victory: bool) -> Result<(), BattleError> {
        if !self.session.battle.active {
            return Err(BattleError::NotActive);
        }
        self.finish_battle(victory);
        Ok(())
    }

    pub(crate) fn finish_battle(&mut self, victory: bool) {
        self.session.battle.active = false;
        let battle_id = self.session.battle_id();
        let enemy_name = self
            .session
            .enemy
            .as_ref()
            .map(|enemy| enemy.name.clone())
            .unwrap_or_default();

        if victory {
            self.grant_rewards();
            let leveled_up = self.check_level_up();
            tracing::debug!(leveled_up, "level check after victory");
            self.log(LogKind::System, format!("Victory! Defeated {enemy_name}"));
        } else {
            self.log(LogKind::System, format!("Defeat! Fell to {enemy_name}"));
        }

        let player = &self.session.player;
        tracing::info!(
            battle_id,
            victory,
            gold = player.gold,
            experience = player.experience,
            level = player.level,
            "battle ended"
        );
        let resources = GameEvent::ResourceChange {
            gold: player.gold,
            experience: player.experience,
            level: player.level,
        };
        self.session
            .emit(GameEvent::BattleEnd { battle_id, victory });
        self.session.emit(resources);
    }

    fn grant_rewards(&mut self) {
        let Some(enemy) = self.session.enemy.as_ref() else {
            return;
        };
        let reward = enemy.reward;
        let drops: Vec<(String, f64)> = enemy
            .drops
            .iter()
            .map(|(id, chance)| (id.clone(), *chance))
            .collect();

        let player = &mut self.session.player;
        player.gold = player.gold.saturating_add(reward.gold);
        player.experience = player.experience.saturating_add(reward.experience);
        self.log(LogKind::System, format!("Gained {} gold!", reward.gold));
        self.log(
            LogKind::System,
            format!("Gained {} experience!", reward.experience),
        );

        for (material_id, chance) in drops {
            let Some(material) = self.env.materials().material(&material_id) else {
                tracing::warn!(material = %material_id, "drop table references unknown material");
                continue;
            };
            let seed = self.session.next_roll_seed(RollContext::Drop);
            if self.env.rng().roll_unit(seed) >= chance {
                continue;
            }
            let count = self.session.player.add_material(&material_id, 1);
            tracing::debug!(material = %material_id, count, "material dropped");
            self.log(
                LogKind::System,
                format!("Obtained {} {}!", material.icon, material.name),
            );
            self.session.emit(GameEvent::MaterialDrop {
                material_id,
                quantity: 1,
            });
        }
    }

    /// Leaves the battle scene after a finished battle.
    ///
    /// `battle_id` is the id carried by the `BattleEnd` event; the call is
    /// ignored (returns `false`) if another battle started since, or if the
    /// battle is still active.
    pub fn return_to_camp(&mut self, battle_id: u64) -> bool {
        if battle_id != self.session.battle_id() || self.session.battle.active {
            tracing::debug!(battle_id, current = self.session.battle_id(), "stale camp return ignored");
            return false;
        }
        if self.session.scene == Scene::Camp && self.session.enemy.is_none() {
            return false;
        }
        self.leave_battle();
        true
    }

    /// Abandons the active battle without rewards or penalties.
    pub fn retreat(&mut self) -> Result<(), BattleError> {
        if !self.session.battle.active {
            return Err(BattleError::NotActive);
        }
        tracing::info!(battle_id = self.session.battle_id(), "retreat");
        self.session
            .battle
            .reset(self.config().retreat_focus_value);
        self.session.cast_timer.reset();
        self.log(LogKind::System, "Retreated to camp.");
        self.leave_battle();
        Ok(())
    }

    fn leave_battle(&mut self) {
        if let Some(enemy) = self.session.enemy.take() {
            self.session.ai.reset(&enemy.id);
        }
        self.session.battle.active = false;
        self.session.scene = Scene::Camp;
        self.session
            .emit(GameEvent::SceneChange { scene: Scene::Camp });
    }

    /// Resets player, battle and scene to a new game. The log is kept.
    pub fn restart_game(&mut self) {
        let config = self.config();
        self.session.player = Player::starting();
        self.session.enemy = None;
        self.session.battle = BattleState::new(config.battle_focus_value);
        self.session.scene = Scene::Camp;
        self.session.ai.reset_all();
        self.session.cast_timer.reset();
        self.session.pending_rune_choices.clear();
        self.session.next_battle_id();
        tracing::info!("game restarted");
        self.log(LogKind::System, "Game restarted!");
        self.session.emit(GameEvent::GameRestart);
    }
}
