use super::{CastError, GameEngine};
use crate::event::GameEvent;
use crate::spell::{Spell, calculate_spell};
use crate::state::{Actor, ActorStatus, BattlePhase, CurrentSpell, LogKind};

impl GameEngine<'_> {
    /// Begins channeling the spell in slot `index`.
    ///
    /// Only valid during the player's action window. Mp is paid up front and
    /// the action window closes immediately; the cast completes once the
    /// wall-clock cast timer runs out.
    pub fn start_cast(&mut self, index: usize) -> Result<Spell, CastError> {
        let battle = &self.session.battle;
        if !battle.active {
            return Err(CastError::BattleInactive);
        }
        if battle.phase != BattlePhase::Action || battle.current_actor != Some(Actor::Player) {
            return Err(CastError::NotPlayerTurn);
        }

        let slots = &self.session.player.spells;
        let Some(chain) = slots.get(index) else {
            tracing::warn!(index, slots = slots.len(), "cast from missing spell slot");
            return Err(CastError::SlotOutOfRange {
                index,
                len: slots.len(),
            });
        };
        if chain.is_empty() {
            return Err(CastError::EmptySlot(index));
        }

        let spell = calculate_spell(chain, self.env.runes());
        let mp = self.session.player.mp;
        if mp < spell.cost {
            tracing::debug!(mp, cost = spell.cost, "insufficient mp");
            self.log(LogKind::System, "Not enough MP!");
            return Err(CastError::InsufficientMp {
                cost: spell.cost,
                mp,
            });
        }

        self.session.player.mp = mp - spell.cost;
        let now = self.env.now_millis();
        self.session.cast_timer.start(index, spell.time, now);
        let battle = &mut self.session.battle;
        battle.player_atb = 0.0;
        battle.cast_progress = self.session.cast_timer.progress();
        battle.current_spell = Some(CurrentSpell {
            index,
            spell: spell.clone(),
        });

        tracing::debug!(index, spell = %spell.name, cost = spell.cost, time = spell.time, "cast started");
        self.log(
            LogKind::Player,
            format!("Begins channeling {}...", spell.name),
        );
        self.session.emit(GameEvent::SpellCast {
            index,
            spell: spell.clone(),
        });
        self.set_player_status(ActorStatus::Channeling);

        self.session.battle.current_actor = None;
        self.set_phase(BattlePhase::Preparation);
        Ok(spell)
    }

    /// Cancels the player's cast and stuns them. The mp already paid is lost.
    pub fn interrupt_cast(&mut self) -> Result<(), CastError> {
        if self.session.battle.player_status != ActorStatus::Channeling {
            return Err(CastError::NotChanneling);
        }

        let spell = self
            .session
            .battle
            .current_spell
            .take()
            .map(|current| current.spell);
        self.log(LogKind::Enemy, "Spell interrupted!");
        self.session.emit(GameEvent::SpellInterrupt { spell });

        let stun = self.config().stun_duration;
        let battle = &mut self.session.battle;
        battle.stun_timer = stun;
        battle.clear_cast();
        self.session.cast_timer.reset();
        self.set_player_status(ActorStatus::Stunned);
        Ok(())
    }
}
