//! Rejection reasons for engine operations.
//!
//! A rejected operation never mutates the session.

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("no battle is active")]
    NotActive,

    #[error("enemy catalog is empty")]
    NoEnemyTemplates,

    #[error("unknown enemy template '{0}'")]
    UnknownEnemy(String),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotActive => ErrorSeverity::Recoverable,
            Self::UnknownEnemy(_) => ErrorSeverity::Validation,
            Self::NoEnemyTemplates => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotActive => "BATTLE_NOT_ACTIVE",
            Self::NoEnemyTemplates => "BATTLE_NO_ENEMY_TEMPLATES",
            Self::UnknownEnemy(_) => "BATTLE_UNKNOWN_ENEMY",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastError {
    #[error("no battle is active")]
    BattleInactive,

    #[error("not the player's action window")]
    NotPlayerTurn,

    #[error("spell slot {index} out of range ({len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("spell slot {0} is empty")]
    EmptySlot(usize),

    #[error("not enough mp: need {cost}, have {mp}")]
    InsufficientMp { cost: u32, mp: u32 },

    #[error("player is not channeling")]
    NotChanneling,
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::BattleInactive | Self::NotPlayerTurn | Self::NotChanneling => {
                ErrorSeverity::Recoverable
            }
            Self::InsufficientMp { .. } => ErrorSeverity::Recoverable,
            Self::SlotOutOfRange { .. } | Self::EmptySlot(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleInactive => "CAST_BATTLE_INACTIVE",
            Self::NotPlayerTurn => "CAST_NOT_PLAYER_TURN",
            Self::SlotOutOfRange { .. } => "CAST_SLOT_OUT_OF_RANGE",
            Self::EmptySlot(_) => "CAST_EMPTY_SLOT",
            Self::InsufficientMp { .. } => "CAST_INSUFFICIENT_MP",
            Self::NotChanneling => "CAST_NOT_CHANNELING",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionError {
    #[error("rune '{0}' is already unlocked")]
    AlreadyUnlocked(String),

    #[error("unknown rune '{0}'")]
    UnknownRune(String),
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyUnlocked(_) => "PROGRESSION_ALREADY_UNLOCKED",
            Self::UnknownRune(_) => "PROGRESSION_UNKNOWN_RUNE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShopError {
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("not enough gold: need {cost}, have {gold}")]
    InsufficientGold { cost: u32, gold: u32 },

    #[error("not enough '{material_id}': want {wanted}, have {held}")]
    InsufficientMaterials {
        material_id: String,
        wanted: u32,
        held: u32,
    },
}

impl GameError for ShopError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownMaterial(_) => ErrorSeverity::Validation,
            Self::InsufficientGold { .. } | Self::InsufficientMaterials { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMaterial(_) => "SHOP_UNKNOWN_MATERIAL",
            Self::InsufficientGold { .. } => "SHOP_INSUFFICIENT_GOLD",
            Self::InsufficientMaterials { .. } => "SHOP_INSUFFICIENT_MATERIALS",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotError {
    #[error("spell slot {index} out of range ({len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("rune index {index} out of range in slot {slot} ({len} runes)")]
    RuneOutOfRange { slot: usize, index: usize, len: usize },
}

impl GameError for SlotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SlotOutOfRange { .. } => "SLOT_OUT_OF_RANGE",
            Self::RuneOutOfRange { .. } => "SLOT_RUNE_OUT_OF_RANGE",
        }
    }
}
