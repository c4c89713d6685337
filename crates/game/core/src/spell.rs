//! Spell composition from rune chains.
//!
//! A chain is read left to right. Modifier runes queue up until the next core
//! rune, which consumes every queued modifier in order and contributes its
//! cost, time, damage and healing to the totals. Modifiers that precede no
//! core rune are dropped.

use crate::env::{Rune, RuneOracle};

/// Aggregate stats of a rune chain. Derived on demand, never stored in catalogs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub name: String,
    pub cost: u32,
    /// Cast time in seconds; left unrounded.
    pub time: f64,
    pub damage: u32,
    pub heal: u32,
}

impl Spell {
    pub const INVALID_NAME: &'static str = "无效法术";

    /// Placeholder returned for chains that contain no usable core rune.
    pub fn invalid() -> Self {
        Self {
            name: Self::INVALID_NAME.to_string(),
            cost: 0,
            time: 0.0,
            damage: 0,
            heal: 0,
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.name == Self::INVALID_NAME
            && self.cost == 0
            && self.time == 0.0
            && self.damage == 0
            && self.heal == 0
    }
}

/// Character stripped once from each rune name when building the spell name.
const NAME_SUFFIX: char = '术';

#[derive(Default)]
struct Totals {
    cost: f64,
    time: f64,
    damage: f64,
    heal: f64,
}

impl Totals {
    fn add_core(&mut self, core: &Rune, modifiers: &[&Rune]) {
        let mut damage = f64::from(core.base_damage);
        let mut heal = f64::from(core.base_heal);
        let mut cost = f64::from(core.cost);
        let mut time = core.time;
        let mut count = 1u32;

        for modifier in modifiers {
            if let Some(mult) = modifier.damage_mult {
                damage *= mult;
            }
            if let Some(mult) = modifier.cost_mult {
                cost *= mult;
            }
            if let Some(mult) = modifier.time_mult {
                time *= mult;
            }
            if let Some(add) = modifier.time_add {
                time += add;
            }
            if let Some(repeat) = modifier.count.filter(|repeat| *repeat > 0) {
                count = repeat;
            }
        }

        let count = f64::from(count);
        self.cost += cost * count;
        self.time += time * count;
        if damage > 0.0 {
            self.damage += damage * count;
        }
        // Heal multipliers are not defined; heal scales by count only.
        if heal > 0.0 {
            heal *= count;
            self.heal += heal;
        }
    }
}

/// Computes the spell described by `chain`.
///
/// Unknown rune ids contribute no stats but still appear in the name under
/// their raw id. Empty chains and chains without a known core rune yield
/// [`Spell::invalid`].
pub fn calculate_spell<S: AsRef<str>>(chain: &[S], runes: &dyn RuneOracle) -> Spell {
    let mut totals = Totals::default();
    let mut pending: Vec<&Rune> = Vec::new();
    let mut cores = 0usize;

    for id in chain {
        let Some(rune) = runes.rune(id.as_ref()) else {
            continue;
        };
        if rune.is_core() {
            totals.add_core(rune, &pending);
            pending.clear();
            cores += 1;
        } else {
            pending.push(rune);
        }
    }

    if cores == 0 {
        return Spell::invalid();
    }

    let name: String = chain
        .iter()
        .map(|id| {
            let id = id.as_ref();
            let name = runes.rune(id).map_or(id, |rune| rune.name.as_str());
            name.replacen(NAME_SUFFIX, "", 1)
        })
        .collect();

    let spell = Spell {
        name: if name.is_empty() {
            Spell::INVALID_NAME.to_string()
        } else {
            name
        },
        cost: totals.cost.round() as u32,
        time: totals.time,
        damage: totals.damage.round() as u32,
        heal: totals.heal.round() as u32,
    };
    tracing::debug!(
        name = %spell.name,
        cost = spell.cost,
        time = spell.time,
        damage = spell.damage,
        heal = spell.heal,
        "spell calculated"
    );
    spell
}
