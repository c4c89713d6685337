use super::{BattleState, Enemy, Player, Scene};

/// Persisted snapshot handed to the storage collaborator.
///
/// `enemy` and `battle` are present only when the save was taken mid-battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveData {
    pub player: Player,
    pub last_scene: Scene,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub enemy: Option<Enemy>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub battle: Option<BattleState>,
}

impl SaveData {
    pub fn is_mid_battle(&self) -> bool {
        self.enemy.is_some() && self.battle.is_some()
    }
}
