//! Content loaders for reading game data from files.
//!
//! Each loader parses one file format into `game-core` types. Loaders accept
//! either a path or an in-memory string so the bundled data can share the same
//! parsing code.

pub mod config;
pub mod enemies;
pub mod factory;
pub mod materials;
pub mod runes;

pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::{ContentFactory, GameContent};
pub use materials::MaterialLoader;
pub use runes::RuneLoader;

use std::collections::HashSet;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Rejects catalogs that define the same id twice.
pub(crate) fn ensure_unique_ids<'a>(
    kind: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        anyhow::ensure!(!id.is_empty(), "{kind} with an empty id");
        anyhow::ensure!(seen.insert(id), "duplicate {kind} id '{id}'");
    }
    Ok(())
}
