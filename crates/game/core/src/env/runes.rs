//! Rune definitions and the oracle that serves them.

use std::collections::BTreeMap;

/// Rune category.
///
/// A `Core` rune produces damage or healing; a `Mod` rune alters the next
/// `Core` rune in the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum RuneKind {
    Core,
    Mod,
}

/// Unlock tier used when offering rune choices after a level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RuneTier {
    Basic,
    Intermediate,
    Advanced,
}

impl RuneTier {
    /// Minimum player level at which runes of this tier can be offered.
    pub const fn unlock_level(self) -> u32 {
        match self {
            Self::Basic => 1,
            Self::Intermediate => 5,
            Self::Advanced => 10,
        }
    }
}

/// Immutable rune template.
///
/// Core runes use the `base_*`, `cost` and `time` fields; modifier runes use
/// the optional multiplier fields. Unused fields stay at their zero/`None`
/// defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rune {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: String,
    pub kind: RuneKind,
    /// `None` for starter runes that are never part of a level-up offer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: Option<RuneTier>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub base_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_heal: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    /// Cast time in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time: f64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_mult: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost_mult: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_mult: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_add: Option<f64>,
    /// Repeat count override. When several are pending, the last one wins.
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: Option<u32>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Rune {
    /// Creates a core rune with the given base values.
    pub fn core(
        id: impl Into<String>,
        name: impl Into<String>,
        base_damage: u32,
        base_heal: u32,
        cost: u32,
        time: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            kind: RuneKind::Core,
            tier: None,
            base_damage,
            base_heal,
            cost,
            time,
            damage_mult: None,
            cost_mult: None,
            time_mult: None,
            time_add: None,
            count: None,
            description: String::new(),
        }
    }

    /// Creates a modifier rune with no effect; chain the `with_*` builders.
    pub fn modifier(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: RuneKind::Mod,
            ..Self::core(id, name, 0, 0, 0, 0.0)
        }
    }

    #[must_use]
    pub fn with_tier(mut self, tier: RuneTier) -> Self {
        self.tier = Some(tier);
        self
    }

    #[must_use]
    pub fn with_damage_mult(mut self, mult: f64) -> Self {
        self.damage_mult = Some(mult);
        self
    }

    #[must_use]
    pub fn with_cost_mult(mut self, mult: f64) -> Self {
        self.cost_mult = Some(mult);
        self
    }

    #[must_use]
    pub fn with_time_mult(mut self, mult: f64) -> Self {
        self.time_mult = Some(mult);
        self
    }

    #[must_use]
    pub fn with_time_add(mut self, seconds: f64) -> Self {
        self.time_add = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn is_core(&self) -> bool {
        self.kind == RuneKind::Core
    }
}

/// Read-only access to rune templates.
pub trait RuneOracle: Send + Sync {
    /// Looks up a rune by id.
    fn rune(&self, id: &str) -> Option<&Rune>;

    /// Returns every rune in catalog order.
    fn runes(&self) -> Vec<&Rune>;

    /// Runes that may be offered to a player of `level`, ordered by tier and
    /// then catalog order. Starter runes (no tier) are never included.
    fn unlock_pool(&self, level: u32) -> Vec<&Rune> {
        let mut pool: Vec<&Rune> = self
            .runes()
            .into_iter()
            .filter(|rune| rune.tier.is_some_and(|tier| tier.unlock_level() <= level))
            .collect();
        pool.sort_by_key(|rune| rune.tier);
        pool
    }
}

impl RuneOracle for BTreeMap<String, Rune> {
    fn rune(&self, id: &str) -> Option<&Rune> {
        self.get(id)
    }

    fn runes(&self) -> Vec<&Rune> {
        self.values().collect()
    }
}
