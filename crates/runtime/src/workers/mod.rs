//! Worker tasks that back the runtime orchestration.
//!
//! The session worker is the single writer of [`game_core::GameSession`];
//! every other component talks to it through its command mailbox.

mod session;

pub(crate) use session::{Command, SessionWorker};
