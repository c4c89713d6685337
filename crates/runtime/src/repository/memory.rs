//! In-memory SaveRepository implementation for tests and local runs.

use std::sync::RwLock;

use game_core::SaveData;

use super::{RepositoryError, Result, SaveRepository};

#[derive(Default)]
pub struct InMemorySaveRepository {
    slot: RwLock<Option<SaveData>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a snapshot already in the slot.
    pub fn with_save(save: SaveData) -> Self {
        Self {
            slot: RwLock::new(Some(save)),
        }
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, save: &SaveData) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(save.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveData>> {
        let slot = self
            .slot
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn exists(&self) -> bool {
        self.slot
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn delete(&self) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Player, Scene};

    fn camp_save(timestamp: u64) -> SaveData {
        SaveData {
            player: Player::starting(),
            last_scene: Scene::Camp,
            timestamp,
            enemy: None,
            battle: None,
        }
    }

    #[test]
    fn test_slot_is_overwritten() {
        let repo = InMemorySaveRepository::new();
        assert!(!repo.exists());
        assert_eq!(repo.load().unwrap(), None);

        repo.save(&camp_save(1)).unwrap();
        repo.save(&camp_save(2)).unwrap();
        assert_eq!(repo.load().unwrap().map(|save| save.timestamp), Some(2));

        repo.delete().unwrap();
        assert!(!repo.exists());
        repo.delete().unwrap();
    }
}
