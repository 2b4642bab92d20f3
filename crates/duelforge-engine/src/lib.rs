//! Duel engine abstraction for Duelforge.
//!
//! This crate defines the seam between the async session layer and a
//! concrete card-scripting engine:
//!
//! - **The trait** ([`DuelEngine`], [`ProcessStatus`]) — the narrow
//!   surface every backend implements.
//! - **Options** ([`DuelOptions`], [`TeamConfig`], [`NewCardRequest`],
//!   query requests) — how duels are created and inspected.
//! - **Callbacks** ([`CardReader`], [`ScriptProvider`], [`CardCache`])
//!   — how a backend resolves card data and scripts on demand.
//! - **Errors** ([`EngineError`]) — what a backend can report.
//!
//! No FFI lives here. A backend crate wraps the real engine library and
//! implements [`DuelEngine`]; the session layer and tests only ever see
//! the trait.

mod engine;
mod error;
mod reader;
mod types;

pub use engine::{DuelEngine, ProcessStatus};
pub use error::EngineError;
pub use reader::{CardCache, CardReader, EngineCallbacks, ScriptProvider};
pub use types::{
    DuelOptions, LocationQueryRequest, NewCardRequest, QueryRequest, TeamConfig,
};
