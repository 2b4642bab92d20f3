//! Error types for the session layer.

use duelforge_engine::EngineError;
use duelforge_protocol::ProtocolError;

/// Errors that can occur while setting up or driving a duel session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// [`start`](crate::DuelSession::start) was called twice.
    #[error("duel already started")]
    AlreadyStarted,

    /// A setup operation (deck loading, script loading) was attempted
    /// after the duel started.
    #[error("duel already started; setup is no longer possible")]
    SetupAfterStart,

    /// The operation needs a started duel.
    #[error("duel not started")]
    NotStarted,

    /// A response was sent while the engine was not blocked on one.
    #[error("engine is not awaiting a response")]
    NotAwaitingResponse,

    /// The duel has ended or the session was destroyed.
    #[error("session closed")]
    Closed,

    /// The engine backend failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine produced a buffer the protocol layer rejects.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
