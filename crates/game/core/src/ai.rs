//! Enemy skill selection.
//!
//! Each enemy instance gets its own cooldown table, last-used skill and
//! strategy. Selection filters the skill list by mp, cooldown and hp band,
//! then performs a weighted draw driven by a caller-supplied roll in `[0, 1)`.

use std::collections::BTreeMap;

use crate::state::{AiStrategy, Enemy, EnemySkill};

/// Used when neither the strategy nor the skill provides a usable weight.
pub const DEFAULT_SKILL_WEIGHT: f64 = 0.5;

const UNKNOWN_ENEMY_ID: &str = "unknown";

/// AI memory for one enemy instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyAiState {
    /// Skill id to remaining cooldown seconds.
    pub cooldowns: BTreeMap<String, f64>,
    pub last_used: Option<String>,
    pub strategy: AiStrategy,
}

impl EnemyAiState {
    pub fn new(strategy: AiStrategy) -> Self {
        Self {
            cooldowns: BTreeMap::new(),
            last_used: None,
            strategy,
        }
    }

    fn for_enemy(enemy: &Enemy) -> Self {
        Self::new(enemy.ai_strategy.clone().unwrap_or_default())
    }

    pub fn cooldown(&self, skill_id: &str) -> f64 {
        self.cooldowns.get(skill_id).copied().unwrap_or(0.0)
    }
}

/// Per-enemy AI state keyed by enemy id.
#[derive(Clone, Debug, Default)]
pub struct AiSystem {
    states: BTreeMap<String, EnemyAiState>,
}

impl AiSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any previous memory for `enemy` and starts fresh with its strategy.
    pub fn initialize(&mut self, enemy: &Enemy) {
        self.states
            .insert(Self::key(enemy).to_string(), EnemyAiState::for_enemy(enemy));
    }

    pub fn state(&self, enemy_id: &str) -> Option<&EnemyAiState> {
        self.states.get(enemy_id)
    }

    /// Picks the skill `enemy` uses next and commits the choice.
    ///
    /// Enemies without skills, or with no eligible skill, use the synthesized
    /// basic attack. A committed skill with a cooldown has it armed and is
    /// recorded as last used.
    pub fn select_skill(&mut self, enemy: &Enemy, roll: f64) -> EnemySkill {
        if !enemy.has_skills() {
            return EnemySkill::basic_attack(enemy);
        }

        let state = self
            .states
            .entry(Self::key(enemy).to_string())
            .or_insert_with(|| EnemyAiState::for_enemy(enemy));

        let Some(skill) = choose(enemy, state, roll).cloned() else {
            tracing::debug!(enemy = %enemy.id, "no eligible skill, using basic attack");
            return EnemySkill::basic_attack(enemy);
        };

        if let Some(cooldown) = skill.conditions.cooldown.filter(|cd| *cd > 0.0) {
            state.cooldowns.insert(skill.id.clone(), cooldown);
        }
        state.last_used = Some(skill.id.clone());
        tracing::debug!(enemy = %enemy.id, skill = %skill.id, "skill selected");
        skill
    }

    /// Preview of the enemy's next action.
    ///
    /// This commits exactly like [`Self::select_skill`]: cooldowns are armed
    /// and last-used is recorded. Use [`Self::peek_skill`] for a side-effect
    /// free preview.
    pub fn predict_enemy_action(&mut self, enemy: &Enemy, roll: f64) -> EnemySkill {
        self.select_skill(enemy, roll)
    }

    /// The skill [`Self::select_skill`] would return for `roll`, without
    /// touching any state.
    pub fn peek_skill(&self, enemy: &Enemy, roll: f64) -> EnemySkill {
        if !enemy.has_skills() {
            return EnemySkill::basic_attack(enemy);
        }
        let fresh;
        let state = match self.states.get(Self::key(enemy)) {
            Some(state) => state,
            None => {
                fresh = EnemyAiState::for_enemy(enemy);
                &fresh
            }
        };
        choose(enemy, state, roll)
            .cloned()
            .unwrap_or_else(|| EnemySkill::basic_attack(enemy))
    }

    /// Skills currently eligible for `enemy`, in declaration order.
    pub fn eligible_skills<'e>(&self, enemy: &'e Enemy) -> Vec<&'e EnemySkill> {
        let empty = EnemyAiState::default();
        let state = self.states.get(Self::key(enemy)).unwrap_or(&empty);
        eligible(enemy, state)
    }

    /// Counts every tracked cooldown down by `dt`, flooring at zero.
    pub fn update(&mut self, dt: f64) {
        for state in self.states.values_mut() {
            for remaining in state.cooldowns.values_mut() {
                *remaining = (*remaining - dt).max(0.0);
            }
        }
    }

    pub fn reset(&mut self, enemy_id: &str) {
        self.states.remove(enemy_id);
    }

    pub fn reset_all(&mut self) {
        self.states.clear();
    }

    fn key(enemy: &Enemy) -> &str {
        if enemy.id.is_empty() {
            UNKNOWN_ENEMY_ID
        } else {
            &enemy.id
        }
    }
}

/// Zero and NaN count as "unset" at every level of the weight fallback.
fn usable(weight: Option<f64>) -> Option<f64> {
    weight.filter(|w| *w != 0.0 && !w.is_nan())
}

fn weight_of(skill: &EnemySkill, strategy: &AiStrategy) -> f64 {
    usable(strategy.skill_weights.get(&skill.id).copied())
        .or_else(|| usable(skill.probability))
        .unwrap_or(DEFAULT_SKILL_WEIGHT)
}

fn eligible<'e>(enemy: &'e Enemy, state: &EnemyAiState) -> Vec<&'e EnemySkill> {
    let Some(skills) = enemy.skills.as_deref() else {
        return Vec::new();
    };
    let mp = enemy.mp.unwrap_or(0);
    let ratio = enemy.hp_ratio();

    skills
        .iter()
        .filter(|skill| skill.cost == 0 || mp >= skill.cost)
        .filter(|skill| state.cooldown(&skill.id) <= 0.0)
        .filter(|skill| {
            let conditions = &skill.conditions;
            let above_min = usable(conditions.min_hp_percent).is_none_or(|min| ratio >= min);
            let below_max = usable(conditions.max_hp_percent).is_none_or(|max| ratio <= max);
            above_min && below_max
        })
        .collect()
}

fn choose<'e>(enemy: &'e Enemy, state: &EnemyAiState, roll: f64) -> Option<&'e EnemySkill> {
    let candidates = eligible(enemy, state);
    let first = *candidates.first()?;

    let total: f64 = candidates
        .iter()
        .map(|skill| weight_of(skill, &state.strategy))
        .sum();
    let mut remaining = roll.clamp(0.0, 1.0) * total;

    for &skill in &candidates {
        remaining -= weight_of(skill, &state.strategy);
        if remaining <= 0.0 {
            return Some(skill);
        }
    }
    Some(first)
}
