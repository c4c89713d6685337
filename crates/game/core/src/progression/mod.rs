//! Leveling, rune unlocks, the camp shop and spell slot editing.

mod economy;
mod slots;

pub use economy::{buy_price, sell_price};

use crate::engine::{GameEngine, ProgressionError};
use crate::event::GameEvent;
use crate::state::{LogKind, RollContext};

/// Experience needed to advance from `level`: `floor(100 * level^1.2)`.
pub fn experience_to_next_level(level: u32) -> u32 {
    (100.0 * f64::from(level).powf(1.2)).floor() as u32
}

impl GameEngine<'_> {
    /// Applies at most one level-up.
    ///
    /// Surplus experience carries over but never triggers a second level in
    /// the same call. Returns whether a level was gained.
    pub fn check_level_up(&mut self) -> bool {
        let config = self.config();
        let player = &mut self.session.player;
        let needed = experience_to_next_level(player.level);
        if player.experience < needed {
            tracing::debug!(level = player.level, experience = player.experience, needed, "no level up");
            return false;
        }

        let old_level = player.level;
        player.level += 1;
        player.experience -= needed;
        player.max_hp += config.level_up_hp;
        player.max_mp += config.level_up_mp;
        player.speed += config.level_up_speed;
        player.restore_full();
        let new_level = player.level;

        let new_slot = config.spell_slot_interval > 0 && new_level % config.spell_slot_interval == 0;
        if new_slot {
            self.session.player.spells.push(Vec::new());
            self.log(LogKind::System, "A new spell slot has been unlocked!");
        }

        tracing::info!(old_level, new_level, new_slot, "level up");
        self.log(
            LogKind::System,
            format!("Level up! You are now level {new_level}!"),
        );
        self.session.emit(GameEvent::LevelUp {
            old_level,
            new_level,
            hp_increase: config.level_up_hp,
            mp_increase: config.level_up_mp,
            speed_increase: config.level_up_speed,
        });

        self.offer_rune_choice();
        true
    }

    /// Offers a shuffled selection of not-yet-unlocked runes from every tier
    /// the player's level has reached. The choices are also kept on the
    /// session until one is taken.
    pub fn offer_rune_choice(&mut self) -> Vec<String> {
        let level = self.session.player.level;
        let mut pool: Vec<String> = self
            .env
            .runes()
            .unlock_pool(level)
            .into_iter()
            .filter(|rune| !self.session.player.has_unlocked(&rune.id))
            .map(|rune| rune.id.clone())
            .collect();

        if pool.is_empty() {
            tracing::debug!(level, "no runes left to offer");
            self.session.pending_rune_choices.clear();
            self.log(LogKind::System, "All available runes are already unlocked!");
            return Vec::new();
        }

        for i in (1..pool.len()).rev() {
            let seed = self.session.next_roll_seed(RollContext::RuneShuffle);
            let j = self.env.rng().index(seed, i + 1);
            pool.swap(i, j);
        }
        pool.truncate(self.config().rune_choice_count);

        self.log(LogKind::System, "Choose a new rune:");
        for (n, rune_id) in pool.iter().enumerate() {
            let name = self
                .env
                .runes()
                .rune(rune_id)
                .map_or(rune_id.as_str(), |rune| rune.name.as_str());
            self.log(LogKind::System, format!("{}. {name}", n + 1));
        }

        tracing::debug!(?pool, "rune choices offered");
        self.session.pending_rune_choices = pool.clone();
        self.session.emit(GameEvent::RuneChoice {
            choices: pool.clone(),
        });
        pool
    }

    /// Unlocks `rune_id`. Fails without side effects if it is already unlocked
    /// or not in the catalog.
    pub fn choose_rune(&mut self, rune_id: &str) -> Result<(), ProgressionError> {
        if self.session.player.has_unlocked(rune_id) {
            return Err(ProgressionError::AlreadyUnlocked(rune_id.to_string()));
        }
        let Some(rune) = self.env.runes().rune(rune_id) else {
            return Err(ProgressionError::UnknownRune(rune_id.to_string()));
        };

        self.session
            .player
            .unlocked_runes
            .insert(rune_id.to_string());
        self.session.pending_rune_choices.clear();
        tracing::info!(rune = rune_id, "rune unlocked");
        self.log(
            LogKind::System,
            format!("Unlocked new rune: {}!", rune.name),
        );
        Ok(())
    }
}
