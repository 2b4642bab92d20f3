//! The duel session: an async front for a blocking duel engine.
//!
//! A card-scripting engine is a single-threaded state machine. It runs
//! until it either finishes the duel or blocks waiting for a player
//! decision. The session wraps that machine so async code can use it:
//!
//! - The engine runs on a blocking worker thread (`spawn_blocking`).
//! - Decoded events flow OUT over a bounded `mpsc` channel.
//! - Player responses flow IN over a second channel and unblock the
//!   engine.
//!
//! Consumers never see the engine directly. They read [`Message`]s from
//! the receiver, and when a [`Message::WaitingResponse`] sentinel
//! arrives they answer with [`DuelSession::send_response`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use duelforge_engine::{DuelEngine, EngineError, NewCardRequest, ProcessStatus};
use duelforge_protocol::{
    decode_message, split_frames, FieldSnapshot, Message, Response, WireLocation,
    WirePosition,
};
use rand::seq::SliceRandom;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::error::SessionError;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Default capacity for the outbound event channel.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Configuration for duel session behavior.
///
/// `#[derive(Clone)]` is needed because parts of the config are
/// captured by the driver task when the session starts.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Capacity of the event channel handed out by
    /// [`DuelSession::start`]. The driver blocks once this many events
    /// are unread, so a slow consumer applies backpressure to the
    /// engine instead of growing an unbounded queue.
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The current state of a duel session.
///
/// This is a state machine with four states:
///
/// ```text
///   Created ──(start)──→ Running ──(prompt)──→ WaitingForResponse
///                           │  ↑                      │
///                           │  └───(send_response)────┘
///                           └──(duel over / destroy)──→ Ended
/// ```
///
/// - **Created**: decks and scripts can still be loaded.
/// - **Running**: the driver is stepping the engine and publishing
///   events.
/// - **WaitingForResponse**: the engine is blocked on a player
///   decision; [`DuelSession::send_response`] is the only way forward.
/// - **Ended**: the duel finished or the session was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The duel has not started yet; setup calls are allowed.
    Created,
    /// The driver is stepping the engine.
    Running,
    /// The engine is blocked on a player response.
    WaitingForResponse,
    /// The duel is over or the session was destroyed.
    Ended,
}

// ---------------------------------------------------------------------------
// DuelSession
// ---------------------------------------------------------------------------

/// An async handle to one running duel.
///
/// ## Why `Arc<Mutex<Option<E>>>`?
///
/// The engine is shared between this handle (for setup and queries)
/// and the driver thread (for stepping). `Arc` shares ownership,
/// `Mutex` serializes access, and the inner `Option` lets
/// [`destroy`](Self::destroy) take the engine out by value so its
/// teardown can consume it.
pub struct DuelSession<E: DuelEngine> {
    engine: Arc<Mutex<Option<E>>>,
    awaiting: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
    response_tx: Option<mpsc::Sender<Vec<u8>>>,
    started: bool,
    config: SessionConfig,
}

impl<E: DuelEngine> DuelSession<E> {
    /// Wraps an engine in a session. The duel does not run until
    /// [`start`](Self::start).
    pub fn new(engine: E, config: SessionConfig) -> Self {
        Self {
            engine: Arc::new(Mutex::new(Some(engine))),
            awaiting: Arc::new(AtomicBool::new(false)),
            closed: Arc::new(AtomicBool::new(false)),
            response_tx: None,
            started: false,
            config,
        }
    }

    /// Loads a card script into the engine. Only valid before
    /// [`start`](Self::start).
    pub fn load_script(&mut self, name: &str, content: &[u8]) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::SetupAfterStart);
        }
        with_engine(&self.engine, |engine| engine.load_script(name, content))
    }

    /// Loads one player's decks into the engine.
    ///
    /// Cards are added face-down in defense, main deck first, then the
    /// extra deck. With `shuffle` the main deck order is randomized
    /// before loading; the extra deck is never shuffled.
    pub fn setup_deck(
        &mut self,
        player: u8,
        main_deck: &[u32],
        extra_deck: &[u32],
        shuffle: bool,
    ) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::SetupAfterStart);
        }
        let mut main: Vec<u32> = main_deck.to_vec();
        if shuffle {
            main.shuffle(&mut rand::rng());
        }
        with_engine(&self.engine, |engine| {
            for code in main.iter().copied() {
                engine.new_card(deck_card(player, code, WireLocation::DECK))?;
            }
            for code in extra_deck.iter().copied() {
                engine.new_card(deck_card(player, code, WireLocation::EXTRA))?;
            }
            Ok(())
        })
    }

    /// Starts the duel and returns the event stream.
    ///
    /// The engine moves onto a blocking worker thread; every decoded
    /// event it produces arrives on the returned receiver, in engine
    /// order. When the engine blocks on a player decision the stream
    /// carries a [`Message::WaitingResponse`] sentinel and the session
    /// enters [`SessionState::WaitingForResponse`]. The channel closes
    /// when the duel ends.
    pub fn start(&mut self) -> Result<mpsc::Receiver<Message>, SessionError> {
        if self.started {
            return Err(SessionError::AlreadyStarted);
        }
        self.started = true;

        let (event_tx, event_rx) = mpsc::channel(self.config.channel_capacity);
        // Capacity 1: the engine only ever waits on one prompt at a time.
        let (response_tx, response_rx) = mpsc::channel(1);
        self.response_tx = Some(response_tx);

        let engine = Arc::clone(&self.engine);
        let awaiting = Arc::clone(&self.awaiting);
        let closed = Arc::clone(&self.closed);
        tokio::task::spawn_blocking(move || {
            run_duel(engine, awaiting, closed, event_tx, response_rx);
        });

        Ok(event_rx)
    }

    /// Answers the prompt the engine is currently blocked on.
    ///
    /// Fails with [`SessionError::NotAwaitingResponse`] unless a
    /// [`Message::WaitingResponse`] sentinel has arrived and not yet
    /// been answered.
    pub async fn send_response(&self, response: &Response) -> Result<(), SessionError> {
        let Some(tx) = self.response_tx.as_ref() else {
            return Err(SessionError::NotStarted);
        };
        if self.closed.load(Ordering::SeqCst) {
            return Err(SessionError::Closed);
        }
        if !self.awaiting.load(Ordering::SeqCst) {
            return Err(SessionError::NotAwaitingResponse);
        }
        tx.send(response.encode())
            .await
            .map_err(|_| SessionError::Closed)
    }

    /// Takes a structured snapshot of the whole board.
    ///
    /// Safe to call while the duel is running; the engine lock
    /// serializes this against the driver.
    pub fn query_field(&self) -> Result<FieldSnapshot, SessionError> {
        with_engine(&self.engine, |engine| engine.query_field())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        if !self.started {
            SessionState::Created
        } else if self.closed.load(Ordering::SeqCst) {
            SessionState::Ended
        } else if self.awaiting.load(Ordering::SeqCst) {
            SessionState::WaitingForResponse
        } else {
            SessionState::Running
        }
    }

    /// Tears the duel down.
    ///
    /// Closes the response channel (unblocking the driver if it is
    /// waiting on a prompt), then destroys the engine on a worker
    /// thread. Dropping the session WITHOUT calling this leaks the
    /// backend's duel handle until the process exits.
    pub async fn destroy(mut self) -> Result<(), SessionError> {
        self.response_tx = None;
        self.closed.store(true, Ordering::SeqCst);

        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || {
            let Ok(mut guard) = engine.lock() else {
                return;
            };
            if let Some(engine) = guard.take() {
                engine.destroy();
            }
        })
        .await
        .map_err(|_| SessionError::Closed)
    }
}

/// Builds the standard deck-loading request: the card goes to the
/// given player's pile, face-down in defense, and the engine picks the
/// in-pile sequence itself.
fn deck_card(player: u8, code: u32, location: WireLocation) -> NewCardRequest {
    NewCardRequest {
        team: player,
        duelist: 0,
        code,
        controller: player,
        location,
        sequence: 0,
        position: WirePosition::FACE_DOWN_DEFENSE,
    }
}

/// Runs `f` against the live engine, mapping "engine gone" (destroyed
/// or poisoned lock) to [`SessionError::Closed`].
fn with_engine<E: DuelEngine, T>(
    engine: &Mutex<Option<E>>,
    f: impl FnOnce(&mut E) -> Result<T, EngineError>,
) -> Result<T, SessionError> {
    let mut guard = engine.lock().map_err(|_| SessionError::Closed)?;
    let engine = guard.as_mut().ok_or(SessionError::Closed)?;
    f(engine).map_err(SessionError::from)
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Entry point for the blocking driver thread.
fn run_duel<E: DuelEngine>(
    engine: Arc<Mutex<Option<E>>>,
    awaiting: Arc<AtomicBool>,
    closed: Arc<AtomicBool>,
    events: mpsc::Sender<Message>,
    mut responses: mpsc::Receiver<Vec<u8>>,
) {
    match drive(&engine, &awaiting, &events, &mut responses) {
        // Closed means the session was destroyed mid-duel; that is a
        // normal exit, not a failure.
        Ok(()) | Err(SessionError::Closed) => {}
        Err(err) => error!(error = %err, "duel driver stopped"),
    }
    awaiting.store(false, Ordering::SeqCst);
    closed.store(true, Ordering::SeqCst);
    // `events` drops here, closing the stream for the consumer.
}

/// The duel loop: step the engine, publish its events, relay prompts.
fn drive<E: DuelEngine>(
    engine: &Mutex<Option<E>>,
    awaiting: &AtomicBool,
    events: &mpsc::Sender<Message>,
    responses: &mut mpsc::Receiver<Vec<u8>>,
) -> Result<(), SessionError> {
    // Events queued during setup surface before the first step.
    if !flush_events(engine, events)? {
        return Ok(());
    }
    with_engine(engine, |e| e.start())?;

    loop {
        let status = with_engine(engine, |e| e.process())?;
        if !flush_events(engine, events)? {
            return Ok(());
        }
        match status {
            ProcessStatus::Ended => return Ok(()),
            ProcessStatus::Continue => {}
            ProcessStatus::WaitingForResponse => {
                // Flip the flag before the sentinel goes out, so a
                // consumer that reacts to it never races the store.
                awaiting.store(true, Ordering::SeqCst);
                // The sentinel tells the consumer every event for this
                // prompt has been delivered and an answer is expected.
                if events.blocking_send(Message::WaitingResponse {}).is_err() {
                    return Ok(());
                }
                let Some(bytes) = responses.blocking_recv() else {
                    // Response channel closed: the session was dropped
                    // or destroyed while we waited.
                    return Ok(());
                };
                awaiting.store(false, Ordering::SeqCst);
                with_engine(engine, |e| e.set_response(&bytes))?;
            }
        }
    }
}

/// Drains the engine's event buffer into the channel. Returns `false`
/// when the consumer has dropped the receiver.
fn flush_events<E: DuelEngine>(
    engine: &Mutex<Option<E>>,
    events: &mpsc::Sender<Message>,
) -> Result<bool, SessionError> {
    let buffer = with_engine(engine, |e| e.take_messages())?;
    for frame in split_frames(&buffer)? {
        match decode_message(&frame) {
            Ok(Some(message)) => {
                if events.blocking_send(message).is_err() {
                    return Ok(false);
                }
            }
            Ok(None) => {
                debug!(
                    kind = frame.first().copied().unwrap_or_default(),
                    "skipping unrecognized engine event"
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(true)
}
