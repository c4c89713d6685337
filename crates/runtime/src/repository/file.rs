//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use game_core::SaveData;

use super::{RepositoryError, Result, SaveRepository};

const SAVE_FILE: &str = "save.json";
const APP_NAME: &str = "rune-atb";

/// Stores the save slot as pretty-printed JSON in `<dir>/save.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous save intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a repository rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Platform data directory (e.g. `~/.local/share/rune-atb`), falling
    /// back to `./save_data` when no home directory is available.
    pub fn default_location() -> Result<Self> {
        let dir = ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.data_dir().join("saves"))
            .unwrap_or_else(|| PathBuf::from("./save_data"));
        Self::new(dir)
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(SAVE_FILE)
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, save: &SaveData) -> Result<()> {
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(save)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(path = %path.display(), scene = %save.last_scene, "save written");
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveData>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let save: SaveData = serde_json::from_slice(&bytes)?;

        tracing::debug!(path = %path.display(), timestamp = save.timestamp, "save loaded");
        Ok(Some(save))
    }

    fn exists(&self) -> bool {
        self.path().exists()
    }

    fn delete(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!(path = %path.display(), "save deleted");
        }
        Ok(())
    }
}
