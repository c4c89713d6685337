use game_core::SaveData;

use super::Result;

/// Storage for the single save slot.
///
/// Implementations must be safe to share between the session worker and
/// callers holding an `Arc`.
pub trait SaveRepository: Send + Sync {
    /// Overwrites the slot with `save`.
    fn save(&self, save: &SaveData) -> Result<()>;

    /// Returns the stored snapshot, or `None` if the slot is empty.
    fn load(&self) -> Result<Option<SaveData>>;

    fn exists(&self) -> bool;

    /// Clears the slot. Deleting an empty slot is not an error.
    fn delete(&self) -> Result<()>;
}
