//! The duel engine trait.
//!
//! The rest of the workspace never talks to a concrete engine directly.
//! Everything goes through [`DuelEngine`], which models the narrow
//! surface a card-scripting engine exposes: seed it with cards, start
//! it, step it, feed it responses, and read its event buffer. A real
//! backend wraps the engine's FFI; tests drive the session layer with a
//! scripted fake.

use duelforge_protocol::FieldSnapshot;

use crate::error::EngineError;
use crate::types::{LocationQueryRequest, NewCardRequest, QueryRequest};

/// What the engine wants next after a processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// The duel is over; no further steps will produce events.
    Ended,
    /// The engine is blocked on a player response.
    WaitingForResponse,
    /// More events are pending; step again.
    Continue,
}

impl ProcessStatus {
    /// Maps the engine's raw status code.
    pub fn from_raw(raw: i32) -> Result<Self, EngineError> {
        match raw {
            0 => Ok(Self::Ended),
            1 => Ok(Self::WaitingForResponse),
            2 => Ok(Self::Continue),
            other => Err(EngineError::UnexpectedStatus(other)),
        }
    }
}

/// A duel engine backend.
///
/// Methods take `&mut self`: a duel is a single-threaded state machine,
/// and the session layer guarantees exclusive access. `Send + 'static`
/// lets the session move the engine onto a blocking worker thread.
pub trait DuelEngine: Send + 'static {
    /// Loads a card script into the duel.
    fn load_script(&mut self, name: &str, content: &[u8]) -> Result<(), EngineError>;

    /// Adds a card to the duel. Only valid before [`start`](Self::start).
    fn new_card(&mut self, card: NewCardRequest) -> Result<(), EngineError>;

    /// Begins the duel. Called exactly once.
    fn start(&mut self) -> Result<(), EngineError>;

    /// Runs the duel forward until it ends, blocks, or yields.
    fn process(&mut self) -> Result<ProcessStatus, EngineError>;

    /// Drains the pending event buffer (length-prefixed frames,
    /// possibly empty).
    fn take_messages(&mut self) -> Result<Vec<u8>, EngineError>;

    /// Answers the prompt the engine is blocked on.
    fn set_response(&mut self, response: &[u8]) -> Result<(), EngineError>;

    /// Queries one card; returns the raw query record buffer.
    fn query(&mut self, request: QueryRequest) -> Result<Vec<u8>, EngineError>;

    /// Queries every card in a location; returns the raw per-slot
    /// buffer.
    fn query_location(&mut self, request: LocationQueryRequest)
        -> Result<Vec<u8>, EngineError>;

    /// Takes a structured snapshot of the whole board.
    fn query_field(&mut self) -> Result<FieldSnapshot, EngineError>;

    /// Tears the duel down, releasing backend resources.
    fn destroy(self);
}
