//! Engine error type.

use thiserror::Error;

/// Errors surfaced by a duel engine backend.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The processing step returned a status code outside the known set.
    #[error("engine returned unexpected status {0}")]
    UnexpectedStatus(i32),

    /// The script provider had no script under this name.
    #[error("script not found: {0}")]
    ScriptNotFound(String),

    /// The card reader had no data for this passcode.
    #[error("card {0} not found")]
    CardNotFound(u32),

    /// The backend failed in a backend-specific way (FFI fault, panic
    /// in a callback, engine-internal error).
    #[error("engine backend error: {0}")]
    Backend(String),
}
