//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, content loading and
//! the engine's rejection enums so clients can bubble them up with `?`.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{
    BattleError, CastError, ErrorSeverity, GameError, ProgressionError, ShopError, SlotError,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("no save repository configured")]
    NoSaveRepository,

    #[error("failed to load game content")]
    Content(#[source] anyhow::Error),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error(transparent)]
    Slot(#[from] SlotError),
}

impl RuntimeError {
    /// The engine rejection behind this error, if any.
    pub fn game_error(&self) -> Option<&dyn GameError> {
        let err: &dyn GameError = match self {
            Self::Battle(err) => err,
            Self::Cast(err) => err,
            Self::Progression(err) => err,
            Self::Shop(err) => err,
            Self::Slot(err) => err,
            _ => return None,
        };
        Some(err)
    }

    /// Rejections keep their engine severity; runtime plumbing failures are internal.
    pub fn severity(&self) -> ErrorSeverity {
        match self.game_error() {
            Some(err) => err.severity(),
            None => match self {
                Self::MissingOracles | Self::NoSaveRepository => ErrorSeverity::Validation,
                _ => ErrorSeverity::Internal,
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::MissingOracles => "RUNTIME_MISSING_ORACLES",
            Self::NoSaveRepository => "RUNTIME_NO_SAVE_REPOSITORY",
            Self::Content(_) => "RUNTIME_CONTENT",
            Self::Battle(err) => err.error_code(),
            Self::Cast(err) => err.error_code(),
            Self::Progression(err) => err.error_code(),
            Self::Shop(err) => err.error_code(),
            Self::Slot(err) => err.error_code(),
        }
    }
}
