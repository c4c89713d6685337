//! Data-driven content definitions and loaders.
//!
//! This crate houses the static game content and loaders for its RON/TOML data files:
//! - Rune catalog (data-driven via RON)
//! - Enemy templates with skills, strategies and drop tables (data-driven via RON)
//! - Material catalog used by drops and the camp shop (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in game state.
//! The bundled files under `data/` are compiled in and exposed through
//! [`ContentFactory::builtin`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, GameContent, LoadResult, MaterialLoader,
    RuneLoader,
};
