//! Public API surface exposed to runtime consumers.
//!
//! Re-exports the error type and the cloneable [`RuntimeHandle`] façade so
//! hosts never touch the worker mailbox directly.
mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;

/// ATB gauge forecast for both actors after `time` more seconds.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AtbPreview {
    pub player: f64,
    pub enemy: f64,
}
