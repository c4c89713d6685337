//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields missing from the file keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e))
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(config.atb_max > 0.0, "atb_max must be positive");
        anyhow::ensure!(config.atb_base_rate >= 0.0, "atb_base_rate must not be negative");
        anyhow::ensure!(config.stun_duration >= 0.0, "stun_duration must not be negative");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("stun_duration = 2.5\nshop_buy_percent = 200\n").unwrap();
        assert_eq!(config.stun_duration, 2.5);
        assert_eq!(config.shop_buy_percent, 200);
        assert_eq!(config.battle_focus_value, GameConfig::DEFAULT_BATTLE_FOCUS_VALUE);
        assert_eq!(config.log_capacity, GameConfig::DEFAULT_LOG_CAPACITY);
    }

    #[test]
    fn test_rejects_zero_gauge() {
        assert!(ConfigLoader::parse("atb_max = 0.0").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
