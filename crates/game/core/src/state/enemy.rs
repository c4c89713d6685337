//! Enemy templates and their skill descriptors.

use std::collections::BTreeMap;

/// Gold and experience credited on victory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub gold: u32,
    pub experience: u32,
}

/// Eligibility conditions for an enemy skill.
///
/// HP bounds are fractions of max hp (`0.5` is half health). A bound of
/// `None` or `0.0` imposes no constraint, as does a cooldown of `None` or `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillConditions {
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_hp_percent: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_hp_percent: Option<f64>,
    /// Seconds before the skill may be selected again.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySkill {
    pub id: String,
    pub name: String,
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    /// Seconds of channeling; zero means the skill lands immediately.
    #[cfg_attr(feature = "serde", serde(default))]
    pub channel_time: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub probability: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: SkillConditions,
}

impl EnemySkill {
    pub const BASIC_ATTACK_ID: &'static str = "basic_attack";
    pub const BASIC_ATTACK_NAME: &'static str = "普通攻击";
    /// Damage used for the basic attack when the enemy's own damage is zero.
    pub const FALLBACK_DAMAGE: u32 = 10;

    pub fn new(id: impl Into<String>, name: impl Into<String>, damage: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            damage,
            cost: 0,
            channel_time: 0.0,
            probability: None,
            conditions: SkillConditions::default(),
        }
    }

    /// Synthesized instant attack used when an enemy has no eligible skill.
    pub fn basic_attack(enemy: &Enemy) -> Self {
        let damage = if enemy.damage == 0 {
            Self::FALLBACK_DAMAGE
        } else {
            enemy.damage
        };
        Self {
            probability: Some(1.0),
            ..Self::new(Self::BASIC_ATTACK_ID, Self::BASIC_ATTACK_NAME, damage)
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_channel_time(mut self, seconds: f64) -> Self {
        self.channel_time = seconds;
        self
    }

    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    #[must_use]
    pub fn with_hp_band(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.conditions.min_hp_percent = min;
        self.conditions.max_hp_percent = max;
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, seconds: f64) -> Self {
        self.conditions.cooldown = Some(seconds);
        self
    }

    pub fn is_channeled(&self) -> bool {
        self.channel_time > 0.0
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StrategyKind {
    Conservative,
    Aggressive,
    #[default]
    Balanced,
}

/// Strategy descriptor: a type tag plus per-skill weight overrides.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiStrategy {
    pub kind: StrategyKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_weights: BTreeMap<String, f64>,
}

impl AiStrategy {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            skill_weights: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_weight(mut self, skill_id: impl Into<String>, weight: f64) -> Self {
        self.skill_weights.insert(skill_id.into(), weight);
        self
    }
}

/// An enemy template, and the live instance cloned from it at battle start.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: String,
    pub hp: u32,
    pub max_hp: u32,
    /// Flat attack damage.
    pub damage: u32,
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: Reward,
    /// Material id to drop probability in `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub drops: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Option<Vec<EnemySkill>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai_strategy: Option<AiStrategy>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp: Option<u32>,
}

impl Enemy {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        hp: u32,
        damage: u32,
        speed: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            hp,
            max_hp: hp,
            damage,
            speed,
            reward: Reward::default(),
            drops: BTreeMap::new(),
            skills: None,
            ai_strategy: None,
            mp: None,
        }
    }

    #[must_use]
    pub fn with_reward(mut self, gold: u32, experience: u32) -> Self {
        self.reward = Reward { gold, experience };
        self
    }

    #[must_use]
    pub fn with_drop(mut self, material_id: impl Into<String>, chance: f64) -> Self {
        self.drops.insert(material_id.into(), chance);
        self
    }

    #[must_use]
    pub fn with_skills(mut self, skills: Vec<EnemySkill>) -> Self {
        self.skills = Some(skills);
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: AiStrategy) -> Self {
        self.ai_strategy = Some(strategy);
        self
    }

    #[must_use]
    pub fn with_mp(mut self, mp: u32) -> Self {
        self.mp = Some(mp);
        self
    }

    /// See [`super::Player::take_damage`].
    pub fn take_damage(&mut self, amount: u32) -> i64 {
        let raw = i64::from(self.hp) - i64::from(amount);
        self.hp = raw.max(0) as u32;
        raw
    }

    /// Current hp as a fraction of max hp.
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    pub fn has_skills(&self) -> bool {
        self.skills.as_ref().is_some_and(|skills| !skills.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_attack_uses_flat_damage() {
        let wolf = Enemy::new("wolf", "野狼", 60, 8, 15);
        let skill = EnemySkill::basic_attack(&wolf);
        assert_eq!(skill.id, EnemySkill::BASIC_ATTACK_ID);
        assert_eq!(skill.damage, 8);
        assert_eq!(skill.cost, 0);
        assert!(!skill.is_channeled());
    }

    #[test]
    fn test_basic_attack_falls_back_when_damage_is_zero() {
        let dummy = Enemy::new("dummy", "Dummy", 10, 0, 10);
        assert_eq!(EnemySkill::basic_attack(&dummy).damage, EnemySkill::FALLBACK_DAMAGE);
    }

    #[test]
    fn test_hp_ratio() {
        let mut ogre = Enemy::new("ogre", "食人魔", 120, 15, 8);
        ogre.take_damage(60);
        assert!((ogre.hp_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
