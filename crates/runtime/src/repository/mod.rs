//! Repository layer for dynamic runtime data
//!
//! Repositories persist what CHANGES during play: the single save slot
//! holding a [`game_core::SaveData`] snapshot.
//!
//! Static game content (runes, enemies, materials) is handled by Oracles, not Repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
