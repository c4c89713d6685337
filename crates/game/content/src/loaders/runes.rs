//! Rune catalog loader.

use std::path::Path;

use game_core::{Rune, RuneKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Rune catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuneCatalog {
    pub runes: Vec<Rune>,
}

/// Loader for the rune catalog from RON files.
pub struct RuneLoader;

impl RuneLoader {
    /// Load the rune catalog from a RON file, in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<Rune>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a rune catalog from a RON string.
    pub fn parse(content: &str) -> LoadResult<Vec<Rune>> {
        let catalog: RuneCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rune catalog RON: {}", e))?;

        ensure_unique_ids("rune", catalog.runes.iter().map(|rune| rune.id.as_str()))?;
        for rune in &catalog.runes {
            match rune.kind {
                RuneKind::Core => anyhow::ensure!(
                    rune.time >= 0.0,
                    "core rune '{}' has a negative cast time",
                    rune.id
                ),
                RuneKind::Mod => anyhow::ensure!(
                    rune.base_damage == 0 && rune.base_heal == 0,
                    "modifier rune '{}' must not carry base damage or healing",
                    rune.id
                ),
            }
        }

        tracing::debug!(count = catalog.runes.len(), "rune catalog parsed");
        Ok(catalog.runes)
    }
}
