//! Duel lifecycle management for Duelforge.
//!
//! This crate turns a blocking duel engine into an async event stream:
//!
//! 1. **Setup** — load scripts and decks before the duel starts
//!    ([`DuelSession::setup_deck`])
//! 2. **Driving** — step the engine on a worker thread and publish its
//!    decoded events ([`DuelSession::start`])
//! 3. **Prompts** — surface player decision points as a
//!    `WaitingResponse` sentinel and relay the answer back
//!    ([`DuelSession::send_response`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Consumers (above)  ← read Messages, answer prompts with Responses
//!     ↕
//! Session Layer (this crate)  ← owns the duel lifecycle and threading
//!     ↕
//! Engine Layer (below)  ← the DuelEngine trait over raw byte buffers
//! ```

mod error;
mod session;

pub use error::SessionError;
pub use session::{DuelSession, SessionConfig, SessionState, DEFAULT_CHANNEL_SIZE};
