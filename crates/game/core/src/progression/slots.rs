//! Spell slot editing.

use crate::engine::{GameEngine, SlotError};
use crate::event::GameEvent;

impl GameEngine<'_> {
    /// Replaces the whole rune chain of `slot`.
    pub fn update_spell_slot(&mut self, slot: usize, runes: Vec<String>) -> Result<(), SlotError> {
        let chain = self.slot_mut(slot)?;
        *chain = runes;
        self.emit_slot(slot);
        Ok(())
    }

    /// Appends `rune_id` to the end of `slot`.
    pub fn add_rune_to_slot(&mut self, slot: usize, rune_id: &str) -> Result<(), SlotError> {
        self.slot_mut(slot)?.push(rune_id.to_string());
        self.emit_slot(slot);
        Ok(())
    }

    /// Removes the rune at `index` from `slot` and returns its id.
    pub fn remove_rune_from_slot(&mut self, slot: usize, index: usize) -> Result<String, SlotError> {
        let chain = self.slot_mut(slot)?;
        if index >= chain.len() {
            let len = chain.len();
            tracing::warn!(slot, index, len, "rune index out of range");
            return Err(SlotError::RuneOutOfRange { slot, index, len });
        }
        let removed = chain.remove(index);
        self.emit_slot(slot);
        Ok(removed)
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut Vec<String>, SlotError> {
        let len = self.session.player.spells.len();
        match self.session.player.spells.get_mut(slot) {
            Some(chain) => Ok(chain),
            None => {
                tracing::warn!(slot, len, "spell slot out of range");
                Err(SlotError::SlotOutOfRange { index: slot, len })
            }
        }
    }

    fn emit_slot(&mut self, slot: usize) {
        let runes = self.session.player.spells[slot].clone();
        tracing::debug!(slot, ?runes, "spell slot updated");
        self.session.emit(GameEvent::SpellSlotUpdated { slot, runes });
    }
}
