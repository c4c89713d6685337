use std::collections::{BTreeMap, BTreeSet};

/// The player character. Persists across battles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub speed: u32,
    /// Spell slots; each slot is an ordered rune chain.
    pub spells: Vec<Vec<String>>,
    pub gold: u32,
    pub experience: u32,
    pub level: u32,
    /// Material id to count. Entries that reach zero are removed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub materials: BTreeMap<String, u32>,
    pub unlocked_runes: BTreeSet<String>,
}

impl Player {
    /// The character a new game starts with.
    pub fn starting() -> Self {
        let slot = |ids: &[&str]| ids.iter().map(|id| (*id).to_string()).collect::<Vec<_>>();
        Self {
            hp: 100,
            max_hp: 100,
            mp: 50,
            max_mp: 50,
            speed: 12,
            spells: vec![slot(&["firebolt"]), slot(&["amp", "firebolt"]), slot(&["heal"])],
            gold: 0,
            experience: 0,
            level: 1,
            materials: BTreeMap::new(),
            unlocked_runes: ["firebolt", "heal", "amp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Subtracts `amount` from hp and returns the unclamped result.
    ///
    /// The stored hp never goes below zero; the returned value may, and is what
    /// the defeat check inspects.
    pub fn take_damage(&mut self, amount: u32) -> i64 {
        let raw = i64::from(self.hp) - i64::from(amount);
        self.hp = raw.max(0) as u32;
        raw
    }

    /// Restores up to `amount` hp, capped at `max_hp`. Returns the hp actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }

    pub fn has_unlocked(&self, rune_id: &str) -> bool {
        self.unlocked_runes.contains(rune_id)
    }

    pub fn material_count(&self, material_id: &str) -> u32 {
        self.materials.get(material_id).copied().unwrap_or(0)
    }

    pub fn add_material(&mut self, material_id: &str, quantity: u32) -> u32 {
        let count = self.materials.entry(material_id.to_string()).or_insert(0);
        *count = count.saturating_add(quantity);
        *count
    }

    /// Removes `quantity` units, deleting the entry once it is empty.
    /// Returns `false` without touching the map if the player holds fewer.
    pub fn remove_material(&mut self, material_id: &str, quantity: u32) -> bool {
        let held = self.material_count(material_id);
        if held < quantity {
            return false;
        }
        if held == quantity {
            self.materials.remove(material_id);
        } else {
            self.materials.insert(material_id.to_string(), held - quantity);
        }
        true
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::starting()
    }
}
