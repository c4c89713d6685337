//! Enemy template loader.

use std::path::Path;

use game_core::Enemy;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<Enemy>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates from a RON file, in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<Enemy>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse enemy templates from a RON string.
    ///
    /// Templates must start at full health and drop chances must lie in `[0, 1]`.
    pub fn parse(content: &str) -> LoadResult<Vec<Enemy>> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        ensure_unique_ids("enemy", catalog.enemies.iter().map(|enemy| enemy.id.as_str()))?;
        for enemy in &catalog.enemies {
            anyhow::ensure!(
                enemy.max_hp > 0 && enemy.hp == enemy.max_hp,
                "enemy '{}' must start at full, non-zero health",
                enemy.id
            );
            for (material, chance) in &enemy.drops {
                anyhow::ensure!(
                    (0.0..=1.0).contains(chance),
                    "enemy '{}' drops '{}' with chance {} outside [0, 1]",
                    enemy.id,
                    material,
                    chance
                );
            }
            if let Some(skills) = &enemy.skills {
                ensure_unique_ids("skill", skills.iter().map(|skill| skill.id.as_str()))?;
            }
        }

        Ok(catalog.enemies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_optional_sections_omitted() {
        let enemies = EnemyLoader::parse(
            r#"(enemies: [(id: "slime", name: "史莱姆", hp: 10, max_hp: 10, damage: 2, speed: 5)])"#,
        )
        .unwrap();
        let slime = &enemies[0];
        assert_eq!(slime.reward.gold, 0);
        assert!(slime.drops.is_empty());
        assert!(!slime.has_skills());
        assert_eq!(slime.mp, None);
    }

    #[test]
    fn test_rejects_wounded_template() {
        let err = EnemyLoader::parse(
            r#"(enemies: [(id: "slime", name: "s", hp: 5, max_hp: 10, damage: 2, speed: 5)])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("full"));
    }

    #[test]
    fn test_rejects_bad_drop_chance() {
        assert!(
            EnemyLoader::parse(
                r#"(enemies: [(id: "s", name: "s", hp: 1, max_hp: 1, damage: 1, speed: 1, drops: {"x": 1.5})])"#,
            )
            .is_err()
        );
    }
}
