//! End-to-end tests for the duel session.
//!
//! These drive a `DuelSession` against a scripted fake engine: each
//! "step" is a list of event frames plus the status the engine reports
//! after producing them. No real card engine is involved.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use duelforge_engine::{
    DuelEngine, EngineError, LocationQueryRequest, NewCardRequest, ProcessStatus,
    QueryRequest,
};
use duelforge_protocol::{FieldSnapshot, Message, Response, WireLocation, WirePosition};
use duelforge_session::{DuelSession, SessionConfig, SessionError, SessionState};

// ---------------------------------------------------------------------------
// Scripted engine
// ---------------------------------------------------------------------------

type Step = (Vec<Vec<u8>>, ProcessStatus);

/// Shared probes for asserting on what the session did to the engine.
#[derive(Clone, Default)]
struct Probes {
    responses: Arc<Mutex<Vec<Vec<u8>>>>,
    new_cards: Arc<Mutex<Vec<NewCardRequest>>>,
    destroyed: Arc<AtomicBool>,
}

struct ScriptedEngine {
    steps: VecDeque<Step>,
    pending: Vec<u8>,
    step_delay: Option<Duration>,
    probes: Probes,
}

impl ScriptedEngine {
    fn new(steps: Vec<Step>) -> (Self, Probes) {
        let probes = Probes::default();
        let engine = Self {
            steps: steps.into(),
            pending: Vec::new(),
            step_delay: None,
            probes: probes.clone(),
        };
        (engine, probes)
    }
}

impl DuelEngine for ScriptedEngine {
    fn load_script(&mut self, _name: &str, _content: &[u8]) -> Result<(), EngineError> {
        Ok(())
    }

    fn new_card(&mut self, card: NewCardRequest) -> Result<(), EngineError> {
        self.probes.new_cards.lock().unwrap().push(card);
        Ok(())
    }

    fn start(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn process(&mut self) -> Result<ProcessStatus, EngineError> {
        if let Some(delay) = self.step_delay.take() {
            std::thread::sleep(delay);
        }
        let Some((frames, status)) = self.steps.pop_front() else {
            return Ok(ProcessStatus::Ended);
        };
        for body in frames {
            self.pending.extend_from_slice(&(body.len() as u32).to_le_bytes());
            self.pending.extend_from_slice(&body);
        }
        Ok(status)
    }

    fn take_messages(&mut self) -> Result<Vec<u8>, EngineError> {
        Ok(std::mem::take(&mut self.pending))
    }

    fn set_response(&mut self, response: &[u8]) -> Result<(), EngineError> {
        self.probes.responses.lock().unwrap().push(response.to_vec());
        Ok(())
    }

    fn query(&mut self, _request: QueryRequest) -> Result<Vec<u8>, EngineError> {
        Err(EngineError::Backend("not scripted".into()))
    }

    fn query_location(
        &mut self,
        _request: LocationQueryRequest,
    ) -> Result<Vec<u8>, EngineError> {
        Err(EngineError::Backend("not scripted".into()))
    }

    fn query_field(&mut self) -> Result<FieldSnapshot, EngineError> {
        Err(EngineError::Backend("not scripted".into()))
    }

    fn destroy(self) {
        self.probes.destroyed.store(true, Ordering::SeqCst);
    }
}

// Event frame bodies, in the engine's wire layout.

fn new_turn(player: u8) -> Vec<u8> {
    vec![40, player]
}

fn lp_update(player: u8, lp: u32) -> Vec<u8> {
    let mut body = vec![94, player];
    body.extend_from_slice(&lp.to_le_bytes());
    body
}

fn win(player: u8, reason: u8) -> Vec<u8> {
    vec![5, player, reason]
}

/// Polls until the session reports the wanted state.
async fn wait_for_state<E: DuelEngine>(session: &DuelSession<E>, state: SessionState) {
    for _ in 0..200 {
        if session.state() == state {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("session never reached {state:?}, stuck at {:?}", session.state());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn streams_events_and_relays_the_answer() {
    let (engine, probes) = ScriptedEngine::new(vec![
        (
            vec![new_turn(0), lp_update(1, 7000)],
            ProcessStatus::WaitingForResponse,
        ),
        (vec![win(0, 1)], ProcessStatus::Ended),
    ]);
    let mut session = DuelSession::new(engine, SessionConfig::default());
    let mut events = session.start().unwrap();

    assert_eq!(events.recv().await, Some(Message::NewTurn { player: 0 }));
    assert_eq!(
        events.recv().await,
        Some(Message::LpUpdate { player: 1, lp: 7000 })
    );
    assert_eq!(events.recv().await, Some(Message::WaitingResponse {}));
    assert_eq!(session.state(), SessionState::WaitingForResponse);

    session
        .send_response(&Response::SelectYesNo { yes: true })
        .await
        .unwrap();

    assert_eq!(events.recv().await, Some(Message::Win { player: 0, reason: 1 }));
    assert_eq!(events.recv().await, None);
    assert_eq!(session.state(), SessionState::Ended);

    // The yes/no answer reaches the engine as a little-endian i32 1.
    assert_eq!(*probes.responses.lock().unwrap(), vec![vec![1, 0, 0, 0]]);
}

#[tokio::test]
async fn response_before_any_prompt_is_rejected() {
    let (mut engine, _) = ScriptedEngine::new(vec![(
        vec![],
        ProcessStatus::WaitingForResponse,
    )]);
    // Hold the driver inside its first step so the prompt cannot have
    // fired yet when we answer early.
    engine.step_delay = Some(Duration::from_millis(500));

    let mut session = DuelSession::new(engine, SessionConfig::default());
    let _events = session.start().unwrap();

    let err = session
        .send_response(&Response::SelectYesNo { yes: false })
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NotAwaitingResponse));
}

#[tokio::test]
async fn response_without_start_is_rejected() {
    let (engine, _) = ScriptedEngine::new(vec![]);
    let session = DuelSession::new(engine, SessionConfig::default());
    let err = session
        .send_response(&Response::SelectOption { option: 0 })
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NotStarted));
}

#[tokio::test]
async fn response_after_the_duel_ends_is_rejected() {
    let (engine, _) = ScriptedEngine::new(vec![(vec![win(1, 0)], ProcessStatus::Ended)]);
    let mut session = DuelSession::new(engine, SessionConfig::default());
    let mut events = session.start().unwrap();

    while events.recv().await.is_some() {}
    let err = session
        .send_response(&Response::SelectChain { chain: -1 })
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Closed));
}

#[tokio::test]
async fn setup_is_rejected_after_start() {
    let (engine, _) = ScriptedEngine::new(vec![]);
    let mut session = DuelSession::new(engine, SessionConfig::default());
    let _events = session.start().unwrap();

    let err = session.setup_deck(0, &[123], &[], false).unwrap_err();
    assert!(matches!(err, SessionError::SetupAfterStart));
    let err = session.load_script("c123.lua", b"-- script").unwrap_err();
    assert!(matches!(err, SessionError::SetupAfterStart));
}

#[tokio::test]
async fn start_is_rejected_twice() {
    let (engine, _) = ScriptedEngine::new(vec![]);
    let mut session = DuelSession::new(engine, SessionConfig::default());
    let _events = session.start().unwrap();
    assert!(matches!(session.start(), Err(SessionError::AlreadyStarted)));
}

#[tokio::test]
async fn deck_setup_loads_cards_in_order() {
    let (engine, probes) = ScriptedEngine::new(vec![]);
    let mut session = DuelSession::new(engine, SessionConfig::default());
    session.setup_deck(1, &[11, 22, 33], &[44], false).unwrap();

    let cards = probes.new_cards.lock().unwrap();
    assert_eq!(cards.len(), 4);
    let codes: Vec<u32> = cards.iter().map(|c| c.code).collect();
    assert_eq!(codes, vec![11, 22, 33, 44]);
    for card in cards.iter() {
        assert_eq!(card.team, 1);
        assert_eq!(card.controller, 1);
        assert_eq!(card.duelist, 0);
        assert_eq!(card.position, WirePosition::FACE_DOWN_DEFENSE);
    }
    assert!(cards[..3].iter().all(|c| c.location == WireLocation::DECK));
    assert_eq!(cards[3].location, WireLocation::EXTRA);
}

#[tokio::test]
async fn shuffling_keeps_the_same_cards() {
    let (engine, probes) = ScriptedEngine::new(vec![]);
    let mut session = DuelSession::new(engine, SessionConfig::default());
    let main: Vec<u32> = (1..=40).collect();
    session.setup_deck(0, &main, &[100], true).unwrap();

    let cards = probes.new_cards.lock().unwrap();
    let mut loaded: Vec<u32> = cards[..40].iter().map(|c| c.code).collect();
    loaded.sort_unstable();
    assert_eq!(loaded, main);
    // The extra deck is never shuffled and always loads last.
    assert_eq!(cards[40].code, 100);
    assert_eq!(cards[40].location, WireLocation::EXTRA);
}

#[tokio::test]
async fn unrecognized_events_are_skipped() {
    let (engine, _) = ScriptedEngine::new(vec![(
        vec![vec![201], new_turn(3)],
        ProcessStatus::Ended,
    )]);
    let mut session = DuelSession::new(engine, SessionConfig::default());
    let mut events = session.start().unwrap();

    assert_eq!(events.recv().await, Some(Message::NewTurn { player: 3 }));
    assert_eq!(events.recv().await, None);
}

#[tokio::test]
async fn destroy_tears_down_the_engine() {
    let (engine, probes) = ScriptedEngine::new(vec![(
        vec![],
        ProcessStatus::WaitingForResponse,
    )]);
    let mut session = DuelSession::new(engine, SessionConfig::default());
    let mut events = session.start().unwrap();

    assert_eq!(events.recv().await, Some(Message::WaitingResponse {}));
    session.destroy().await.unwrap();

    assert!(probes.destroyed.load(Ordering::SeqCst));
    assert_eq!(events.recv().await, None);
}

#[tokio::test]
async fn dropping_the_stream_keeps_the_engine_alive() {
    let steps: Vec<Step> = (0..10)
        .map(|i| (vec![new_turn(i)], ProcessStatus::Continue))
        .collect();
    let (engine, probes) = ScriptedEngine::new(steps);
    let config = SessionConfig { channel_capacity: 1 };
    let mut session = DuelSession::new(engine, config);

    let events = session.start().unwrap();
    drop(events);

    // The driver stops once its next send fails, but the engine stays
    // available for an explicit teardown.
    wait_for_state(&session, SessionState::Ended).await;
    assert!(!probes.destroyed.load(Ordering::SeqCst));

    session.destroy().await.unwrap();
    assert!(probes.destroyed.load(Ordering::SeqCst));
}
