//! Traits describing read-only game data and host services.
//!
//! Oracles expose rune definitions, enemy templates, material definitions,
//! deterministic randomness and wall-clock time. The [`GameEnv`] aggregate
//! bundles them so the engine can access everything it needs without hard
//! coupling to concrete implementations.
mod clock;
mod enemies;
mod materials;
mod rng;
mod runes;

pub use clock::{ClockOracle, ManualClock, SystemClock};
pub use enemies::EnemyOracle;
pub use materials::{Material, MaterialOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use runes::{Rune, RuneKind, RuneOracle, RuneTier};

use crate::config::GameConfig;

/// Aggregates read-only oracles required by the engine.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    runes: &'a dyn RuneOracle,
    enemies: &'a dyn EnemyOracle,
    materials: &'a dyn MaterialOracle,
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
    clock: &'a dyn ClockOracle,
}

impl<'a> GameEnv<'a> {
    pub fn with_all(
        runes: &'a dyn RuneOracle,
        enemies: &'a dyn EnemyOracle,
        materials: &'a dyn MaterialOracle,
        config: &'a GameConfig,
        rng: &'a dyn RngOracle,
        clock: &'a dyn ClockOracle,
    ) -> Self {
        Self {
            runes,
            enemies,
            materials,
            config,
            rng,
            clock,
        }
    }

    pub fn runes(&self) -> &'a dyn RuneOracle {
        self.runes
    }

    pub fn enemies(&self) -> &'a dyn EnemyOracle {
        self.enemies
    }

    pub fn materials(&self) -> &'a dyn MaterialOracle {
        self.materials
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn clock(&self) -> &'a dyn ClockOracle {
        self.clock
    }

    /// Current wall-clock time in milliseconds, as reported by the clock oracle.
    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }
}
