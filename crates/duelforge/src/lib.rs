//! # Duelforge
//!
//! Async Rust wrapper around a scriptable card-duel simulation engine.
//!
//! Duelforge does not implement card-game rules. It wraps an external
//! engine behind the [`DuelEngine`](duelforge_engine::DuelEngine)
//! trait and handles everything around it: decoding the engine's
//! binary event frames into typed [`Message`](duelforge_protocol::Message)s,
//! encoding player [`Response`](duelforge_protocol::Response)s back,
//! and driving the duel lifecycle on a worker thread with an async
//! event stream on top.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use duelforge::prelude::*;
//!
//! # async fn run(engine: impl DuelEngine) -> Result<(), Box<dyn std::error::Error>> {
//! duelforge::init_tracing();
//!
//! let mut session = DuelSession::new(engine, SessionConfig::default());
//! session.setup_deck(0, &[12345678], &[], true)?;
//! session.setup_deck(1, &[12345678], &[], true)?;
//!
//! let mut events = session.start()?;
//! while let Some(message) = events.recv().await {
//!     match message {
//!         Message::WaitingResponse {} => {
//!             session.send_response(&Response::SelectYesNo { yes: true }).await?;
//!         }
//!         other => println!("{other:?}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use tracing_subscriber::EnvFilter;

mod cards;
mod scripts;

pub use cards::StaticCardReader;
pub use scripts::DirectoryScriptProvider;

// The layer crates stay importable as a whole for anything the
// prelude leaves out.
pub use duelforge_engine as engine;
pub use duelforge_protocol as protocol;
pub use duelforge_session as session;

/// The common surface: everything a typical embedder touches.
pub mod prelude {
    pub use duelforge_engine::{
        CardReader, DuelEngine, DuelOptions, EngineCallbacks, NewCardRequest,
        ProcessStatus, ScriptProvider, TeamConfig,
    };
    pub use duelforge_protocol::{DuelMode, Message, Response};
    pub use duelforge_session::{DuelSession, SessionConfig, SessionError, SessionState};

    pub use crate::{DirectoryScriptProvider, StaticCardReader};
}

/// Installs a global `tracing` subscriber filtered by `RUST_LOG`
/// (defaulting to `info`). Calling it more than once is harmless; the
/// first subscriber wins.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
