#![allow(dead_code)]

use std::collections::BTreeMap;

use game_core::{
    Enemy, EnemySkill, GameConfig, GameEngine, GameEnv, GameSession, ManualClock, Material,
    PcgRng, Rune, RuneTier,
};

pub const START_MS: u64 = 1_700_000_000_000;

/// In-memory catalogs, a seeded RNG and a clock that only moves on demand.
pub struct Fixture {
    pub runes: BTreeMap<String, Rune>,
    pub enemies: BTreeMap<String, Enemy>,
    pub materials: BTreeMap<String, Material>,
    pub config: GameConfig,
    pub rng: PcgRng,
    pub clock: ManualClock,
}

impl Fixture {
    pub fn new() -> Self {
        let runes = [
            Rune::core("firebolt", "火球术", 25, 0, 10, 1.5),
            Rune::core("heal", "治疗术", 0, 30, 15, 2.0),
            Rune::modifier("amp", "增幅")
                .with_damage_mult(1.5)
                .with_cost_mult(1.3)
                .with_time_add(0.5),
            Rune::core("iceShard", "冰锥术", 20, 0, 12, 1.2).with_tier(RuneTier::Basic),
            Rune::modifier("quick", "迅捷")
                .with_damage_mult(0.8)
                .with_cost_mult(0.8)
                .with_time_mult(0.6)
                .with_tier(RuneTier::Basic),
            Rune::modifier("double", "双重")
                .with_count(2)
                .with_cost_mult(1.8)
                .with_time_mult(1.6)
                .with_tier(RuneTier::Basic),
            Rune::modifier("power", "强力")
                .with_damage_mult(1.3)
                .with_tier(RuneTier::Intermediate),
            Rune::modifier("haste", "急速")
                .with_time_mult(0.8)
                .with_tier(RuneTier::Intermediate),
            Rune::core("regen", "再生术", 0, 20, 8, 1.0).with_tier(RuneTier::Intermediate),
            Rune::modifier("mastery", "精通")
                .with_damage_mult(1.5)
                .with_cost_mult(0.9)
                .with_tier(RuneTier::Advanced),
            Rune::core("arcane", "奥术", 40, 0, 20, 2.0).with_tier(RuneTier::Advanced),
            Rune::core("lifeSteal", "吸血术", 15, 10, 15, 1.5).with_tier(RuneTier::Advanced),
            Rune::core("meteor", "陨石术", 70, 0, 10, 1.0),
        ]
        .into_iter()
        .map(|rune| (rune.id.clone(), rune))
        .collect();

        let enemies = [
            Enemy::new("wolf", "野狼", 60, 8, 15)
                .with_reward(12, 20)
                .with_drop("wolfPelt", 1.0),
            Enemy::new("goblin", "哥布林", 40, 6, 20).with_reward(8, 15),
            Enemy::new("brute", "蛮兵", 300, 30, 10).with_reward(20, 30),
            Enemy::new("shaman", "萨满", 200, 10, 60)
                .with_skills(vec![
                    EnemySkill::new("bolt", "雷击", 99).with_channel_time(1.0),
                ]),
        ]
        .into_iter()
        .map(|enemy| (enemy.id.clone(), enemy))
        .collect();

        let materials = [
            Material::new("wolfPelt", "狼皮", 5),
            Material::new("goblinEar", "哥布林耳朵", 3),
        ]
        .into_iter()
        .map(|material| (material.id.clone(), material))
        .collect();

        Self {
            runes,
            enemies,
            materials,
            config: GameConfig::default(),
            rng: PcgRng,
            clock: ManualClock::new(START_MS),
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::with_all(
            &self.runes,
            &self.enemies,
            &self.materials,
            &self.config,
            &self.rng,
            &self.clock,
        )
    }

    pub fn session(&self) -> GameSession {
        GameSession::new(42, &self.config)
    }

    pub fn engine<'a>(&'a self, session: &'a mut GameSession) -> GameEngine<'a> {
        GameEngine::new(session, self.env())
    }
}

/// Ticks in `dt` steps until `done` holds, panicking after `max_ticks`.
pub fn tick_until(
    engine: &mut GameEngine<'_>,
    dt: f64,
    max_ticks: usize,
    mut done: impl FnMut(&GameSession) -> bool,
) {
    for _ in 0..max_ticks {
        if done(engine.session()) {
            return;
        }
        engine.update_battle(dt);
    }
    assert!(done(engine.session()), "condition not reached after {max_ticks} ticks");
}
