//! Runtime wrappers around static game content oracles.
//!
//! These implementations expose `game-core` oracle traits and bundle them into
//! an [`OracleManager`] so the runtime can build [`GameEnv`] views on demand.
//! The data is immutable at runtime; dynamic state lives in the session worker
//! and in repositories.
mod enemies;
mod materials;
mod runes;

use std::sync::Arc;

use game_content::{ContentFactory, GameContent};
use game_core::{ClockOracle, GameConfig, GameEnv, PcgRng, SystemClock};

pub use enemies::EnemyOracleImpl;
pub use materials::MaterialOracleImpl;
pub use runes::RuneOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) runes: Arc<RuneOracleImpl>,
    pub(crate) enemies: Arc<EnemyOracleImpl>,
    pub(crate) materials: Arc<MaterialOracleImpl>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) clock: Arc<dyn ClockOracle>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Creates a new oracle manager backed by the system clock
    pub fn new(
        runes: Arc<RuneOracleImpl>,
        enemies: Arc<EnemyOracleImpl>,
        materials: Arc<MaterialOracleImpl>,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            runes,
            enemies,
            materials,
            config,
            clock: Arc::new(SystemClock::new()),
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Builds every oracle from loaded content.
    pub fn from_content(content: GameContent) -> Self {
        Self::new(
            Arc::new(RuneOracleImpl::new(content.runes)),
            Arc::new(EnemyOracleImpl::new(content.enemies)),
            Arc::new(MaterialOracleImpl::new(content.materials)),
            Arc::new(content.config),
        )
    }

    /// Oracles over the content bundled with `game-content`.
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(Self::from_content(ContentFactory::builtin()?))
    }

    /// Replaces the clock, e.g. with a [`game_core::ManualClock`] in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn ClockOracle>) -> Self {
        self.clock = clock;
        self
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_all(
            self.runes.as_ref(),
            self.enemies.as_ref(),
            self.materials.as_ref(),
            self.config.as_ref(),
            &self.rng,
            self.clock.as_ref(),
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn ClockOracle {
        self.clock.as_ref()
    }

    pub fn runes(&self) -> &RuneOracleImpl {
        &self.runes
    }

    pub fn enemies(&self) -> &EnemyOracleImpl {
        &self.enemies
    }

    pub fn materials(&self) -> &MaterialOracleImpl {
        &self.materials
    }
}
