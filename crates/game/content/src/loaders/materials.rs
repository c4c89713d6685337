//! Material catalog loader.

use std::path::Path;

use game_core::Material;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Material catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
}

/// Loader for the material catalog from RON files.
pub struct MaterialLoader;

impl MaterialLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Material>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Material>> {
        let catalog: MaterialCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse material catalog RON: {}", e))?;
        ensure_unique_ids(
            "material",
            catalog.materials.iter().map(|material| material.id.as_str()),
        )?;
        Ok(catalog.materials)
    }
}
