//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use game_core::{Enemy, GameConfig, Material, Rune};

use crate::loaders::{ConfigLoader, EnemyLoader, LoadResult, MaterialLoader, RuneLoader};

const BUILTIN_CONFIG: &str = include_str!("../../data/config.toml");
const BUILTIN_RUNES: &str = include_str!("../../data/runes.ron");
const BUILTIN_ENEMIES: &str = include_str!("../../data/enemies.ron");
const BUILTIN_MATERIALS: &str = include_str!("../../data/materials.ron");

/// Every catalog plus the config, validated against each other.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    pub runes: Vec<Rune>,
    pub enemies: Vec<Enemy>,
    pub materials: Vec<Material>,
}

impl GameContent {
    /// Checks references between catalogs: drop tables must name known
    /// materials and at least one enemy must exist.
    pub fn validate(&self) -> LoadResult<()> {
        anyhow::ensure!(!self.enemies.is_empty(), "content defines no enemies");
        for enemy in &self.enemies {
            for material_id in enemy.drops.keys() {
                anyhow::ensure!(
                    self.materials.iter().any(|material| &material.id == material_id),
                    "enemy '{}' drops unknown material '{}'",
                    enemy.id,
                    material_id
                );
            }
        }
        Ok(())
    }

    pub fn rune(&self, id: &str) -> Option<&Rune> {
        self.runes.iter().find(|rune| rune.id == id)
    }

    pub fn enemy(&self, id: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── runes.ron
/// ├── enemies.ron
/// └── materials.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Content compiled into the crate from its `data/` directory.
    pub fn builtin() -> LoadResult<GameContent> {
        let content = GameContent {
            config: ConfigLoader::parse(BUILTIN_CONFIG)?,
            runes: RuneLoader::parse(BUILTIN_RUNES)?,
            enemies: EnemyLoader::parse(BUILTIN_ENEMIES)?,
            materials: MaterialLoader::parse(BUILTIN_MATERIALS)?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Loads and validates every file under `data_dir`.
    pub fn load_dir(data_dir: impl Into<PathBuf>) -> LoadResult<GameContent> {
        Self::new(data_dir).load_all()
    }

    pub fn load_all(&self) -> LoadResult<GameContent> {
        let content = GameContent {
            config: self.load_config()?,
            runes: self.load_runes()?,
            enemies: self.load_enemies()?,
            materials: self.load_materials()?,
        };
        content.validate()?;
        tracing::info!(
            dir = %self.data_dir.display(),
            runes = content.runes.len(),
            enemies = content.enemies.len(),
            materials = content.materials.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the rune catalog from `runes.ron`.
    pub fn load_runes(&self) -> LoadResult<Vec<Rune>> {
        RuneLoader::load(&self.data_dir.join("runes.ron"))
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<Enemy>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load the material catalog from `materials.ron`.
    pub fn load_materials(&self) -> LoadResult<Vec<Material>> {
        MaterialLoader::load(&self.data_dir.join("materials.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn test_dangling_drop_is_rejected() {
        let mut content = ContentFactory::builtin().unwrap();
        content.materials.retain(|material| material.id != "wolfPelt");
        let err = content.validate().unwrap_err();
        assert!(err.to_string().contains("wolfPelt"));
    }
}
