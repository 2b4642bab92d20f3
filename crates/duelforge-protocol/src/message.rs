//! Engine event decoding.
//!
//! After each processing step the engine hands back one buffer holding
//! zero or more length-prefixed event frames. [`split_frames`] separates
//! them and [`decode_message`] turns a single frame into a [`Message`].
//! Each frame opens with a one-byte kind tag followed by a kind-specific
//! little-endian layout.
//!
//! The decoder is deliberately forgiving about kinds it has never heard
//! of (they are skipped, the stream carries on) and strict about frames
//! that lie about their own length.

use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::enums::{DetailedPhase, Location, Phase, Position};
use crate::error::ProtocolError;
use crate::place::{decode_place_flag, Place};
use crate::wire::{AttributeFlags, RaceFlags, WireLocation, WirePhase, WirePosition};

// ---------------------------------------------------------------------------
// Shared card records
// ---------------------------------------------------------------------------

/// The standard on-the-wire card coordinate: controller, location,
/// sequence, position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlacement {
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
    pub position: Position,
}

/// An activatable effect offered by a command prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub code: u32,
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
    pub description: u64,
    pub client_mode: u8,
}

/// A monster able to attack during the battle command prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackInfo {
    pub code: u32,
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
    pub direct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    pub code: u32,
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCardInfo {
    pub code: u32,
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
    pub position: Position,
}

/// A card carrying a counter or sum value in a selection prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterCardInfo {
    pub code: u32,
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
    pub count: u32,
}

/// A chainable card offered by the chain prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardChainInfo {
    pub code: u32,
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
    pub position: Position,
    pub description: u64,
    pub client_mode: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TributeCardInfo {
    pub code: u32,
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
    #[serde(rename = "release")]
    pub release_param: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCardInfo {
    pub code: u32,
    pub position: Position,
}

// ---------------------------------------------------------------------------
// Kind tags
// ---------------------------------------------------------------------------

mod tag {
    pub const RETRY: u8 = 1;
    pub const HINT: u8 = 2;
    pub const WAITING: u8 = 3;
    pub const START: u8 = 4;
    pub const WIN: u8 = 5;
    pub const UPDATE_DATA: u8 = 6;
    pub const UPDATE_CARD: u8 = 7;
    pub const REQUEST_DECK: u8 = 8;
    pub const SELECT_BATTLECMD: u8 = 10;
    pub const SELECT_IDLECMD: u8 = 11;
    pub const SELECT_EFFECTYN: u8 = 12;
    pub const SELECT_YESNO: u8 = 13;
    pub const SELECT_OPTION: u8 = 14;
    pub const SELECT_CARD: u8 = 15;
    pub const SELECT_CHAIN: u8 = 16;
    pub const SELECT_PLACE: u8 = 18;
    pub const SELECT_POSITION: u8 = 19;
    pub const SELECT_TRIBUTE: u8 = 20;
    pub const SORT_CHAIN: u8 = 21;
    pub const SELECT_COUNTER: u8 = 22;
    pub const SELECT_SUM: u8 = 23;
    pub const SELECT_DISFIELD: u8 = 24;
    pub const SORT_CARD: u8 = 25;
    pub const SELECT_UNSELECT_CARD: u8 = 26;
    pub const CONFIRM_DECKTOP: u8 = 30;
    pub const CONFIRM_CARDS: u8 = 31;
    pub const SHUFFLE_DECK: u8 = 32;
    pub const SHUFFLE_HAND: u8 = 33;
    pub const REFRESH_DECK: u8 = 34;
    pub const SWAP_GRAVE_DECK: u8 = 35;
    pub const SHUFFLE_SET_CARD: u8 = 36;
    pub const REVERSE_DECK: u8 = 37;
    pub const DECK_TOP: u8 = 38;
    pub const SHUFFLE_EXTRA: u8 = 39;
    pub const NEW_TURN: u8 = 40;
    pub const NEW_PHASE: u8 = 41;
    pub const CONFIRM_EXTRATOP: u8 = 42;
    pub const MOVE: u8 = 50;
    pub const POS_CHANGE: u8 = 53;
    pub const SET: u8 = 54;
    pub const SWAP: u8 = 55;
    pub const FIELD_DISABLED: u8 = 56;
    pub const SUMMONING: u8 = 60;
    pub const SUMMONED: u8 = 61;
    pub const SPSUMMONING: u8 = 62;
    pub const SPSUMMONED: u8 = 63;
    pub const FLIPSUMMONING: u8 = 64;
    pub const FLIPSUMMONED: u8 = 65;
    pub const CHAINING: u8 = 70;
    pub const CHAINED: u8 = 71;
    pub const CHAIN_SOLVING: u8 = 72;
    pub const CHAIN_SOLVED: u8 = 73;
    pub const CHAIN_END: u8 = 74;
    pub const CHAIN_NEGATED: u8 = 75;
    pub const CHAIN_DISABLED: u8 = 76;
    pub const CARD_SELECTED: u8 = 80;
    pub const RANDOM_SELECTED: u8 = 81;
    pub const BECOME_TARGET: u8 = 83;
    pub const DRAW: u8 = 90;
    pub const DAMAGE: u8 = 91;
    pub const RECOVER: u8 = 92;
    pub const EQUIP: u8 = 93;
    pub const LPUPDATE: u8 = 94;
    pub const UNEQUIP: u8 = 95;
    pub const CARD_TARGET: u8 = 96;
    pub const CANCEL_TARGET: u8 = 97;
    pub const PAY_LPCOST: u8 = 100;
    pub const ADD_COUNTER: u8 = 101;
    pub const REMOVE_COUNTER: u8 = 102;
    pub const ATTACK: u8 = 110;
    pub const BATTLE: u8 = 111;
    pub const ATTACK_DISABLED: u8 = 112;
    pub const DAMAGE_STEP_START: u8 = 113;
    pub const DAMAGE_STEP_END: u8 = 114;
    pub const MISSED_EFFECT: u8 = 120;
    pub const BE_CHAIN_TARGET: u8 = 121;
    pub const CREATE_RELATION: u8 = 122;
    pub const RELEASE_RELATION: u8 = 123;
    pub const TOSS_COIN: u8 = 130;
    pub const TOSS_DICE: u8 = 131;
    pub const ROCK_PAPER_SCISSORS: u8 = 132;
    pub const HAND_RES: u8 = 133;
    pub const ANNOUNCE_RACE: u8 = 140;
    pub const ANNOUNCE_ATTRIB: u8 = 141;
    pub const ANNOUNCE_CARD: u8 = 142;
    pub const ANNOUNCE_NUMBER: u8 = 143;
    pub const CARD_HINT: u8 = 160;
    pub const TAG_SWAP: u8 = 161;
    pub const RELOAD_FIELD: u8 = 162;
    pub const AI_NAME: u8 = 163;
    pub const SHOW_HINT: u8 = 164;
    pub const PLAYER_HINT: u8 = 165;
    pub const MATCH_KILL: u8 = 170;
    pub const CUSTOM_MSG: u8 = 180;
    pub const REMOVE_CARDS: u8 = 190;
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// One duel event.
///
/// Serializes as a JSON object tagged with `message_type`, matching the
/// names consumers key their handlers on (`"draw"`, `"new_phase"`,
/// `"select_idlecmd"`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum Message {
    /// The engine rejected the last response; the prompt is re-issued.
    Retry {},
    Hint {
        hint: u8,
        player: u8,
        #[serde(rename = "desc")]
        description: u64,
    },
    Waiting {},
    Start {},
    Win {
        player: u8,
        reason: u8,
    },
    UpdateData {},
    UpdateCard {},
    RequestDeck {},
    /// Battle phase command prompt: chainable effects, attackers, and
    /// the available phase transitions.
    #[serde(rename = "select_battlecmd")]
    SelectBattleCmd {
        player: u8,
        chains: Vec<ChainInfo>,
        attacks: Vec<AttackInfo>,
        to_m2: bool,
        to_ep: bool,
    },
    /// Main phase command prompt.
    #[serde(rename = "select_idlecmd")]
    SelectIdleCmd {
        player: u8,
        summons: Vec<CardInfo>,
        sp_summons: Vec<CardInfo>,
        pos_changes: Vec<CardInfo>,
        monster_sets: Vec<CardInfo>,
        spell_sets: Vec<CardInfo>,
        activate: Vec<ChainInfo>,
        to_bp: bool,
        to_ep: bool,
        shuffle: bool,
    },
    #[serde(rename = "select_effectyn")]
    SelectEffectYn {
        player: u8,
        code: u32,
        controller: u8,
        location: Location,
        sequence: u32,
        position: Position,
        description: u64,
    },
    #[serde(rename = "select_yesno")]
    SelectYesNo {
        player: u8,
        description: u64,
    },
    SelectOption {
        player: u8,
        options: Vec<u64>,
    },
    SelectCard {
        player: u8,
        cancellable: bool,
        min: u32,
        max: u32,
        cards: Vec<FieldCardInfo>,
    },
    SelectChain {
        player: u8,
        spe_count: u8,
        forced: bool,
        hint_timing_player: u32,
        hint_timing_other: u32,
        chains: Vec<CardChainInfo>,
    },
    /// Zone selection prompt. The raw availability flag is decoded into
    /// the list of selectable places.
    SelectPlace {
        player: u8,
        count: u8,
        places: Vec<Place>,
    },
    SelectPosition {
        player: u8,
        code: u32,
        positions: Vec<Position>,
    },
    SelectTribute {
        player: u8,
        cancellable: bool,
        min: u32,
        max: u32,
        cards: Vec<TributeCardInfo>,
    },
    SortChain {
        player: u8,
        cards: Vec<CardInfo>,
    },
    SelectCounter {
        player: u8,
        counter_type: u16,
        count: u16,
        cards: Vec<CounterCardInfo>,
    },
    SelectSum {
        player: u8,
        has_max: bool,
        acc: u32,
        min: u32,
        max: u32,
        must_selects: Vec<CounterCardInfo>,
        selects: Vec<CounterCardInfo>,
    },
    SelectDisfield {
        player: u8,
        count: u8,
        places: Vec<Place>,
    },
    SortCard {
        player: u8,
        cards: Vec<CardInfo>,
    },
    SelectUnselectCard {
        player: u8,
        finishable: bool,
        cancellable: bool,
        min: u32,
        max: u32,
        selects: Vec<FieldCardInfo>,
        unselects: Vec<FieldCardInfo>,
    },
    #[serde(rename = "confirm_decktop")]
    ConfirmDeckTop {
        player: u8,
        cards: Vec<CardInfo>,
    },
    ConfirmCards {
        player: u8,
        cards: Vec<CardInfo>,
    },
    ShuffleDeck {
        player: u8,
    },
    ShuffleHand {
        player: u8,
        codes: Vec<u32>,
    },
    RefreshDeck {
        player: u8,
    },
    SwapGraveDeck {
        player: u8,
    },
    ShuffleSetCard {
        location: Location,
        cards: Vec<CardPlacement>,
    },
    ReverseDeck {},
    DeckTop {
        player: u8,
        sequence: u32,
        code: u32,
        position: Position,
    },
    ShuffleExtra {
        player: u8,
        codes: Vec<u32>,
    },
    NewTurn {
        player: u8,
    },
    NewPhase {
        phase: Phase,
        detailed_phase: DetailedPhase,
    },
    #[serde(rename = "confirm_extratop")]
    ConfirmExtraTop {
        player: u8,
        cards: Vec<CardInfo>,
    },
    Move {
        code: u32,
        from: CardPlacement,
        to: CardPlacement,
        reason: u32,
    },
    PosChange {
        code: u32,
        controller: u8,
        location: Location,
        sequence: u8,
        previous: Position,
        current: Position,
    },
    Set {
        code: u32,
        card: CardPlacement,
    },
    Swap {
        first_code: u32,
        first: CardPlacement,
        second_code: u32,
        second: CardPlacement,
    },
    FieldDisabled {
        flag: u32,
    },
    Summoning {
        code: u32,
        card: CardPlacement,
    },
    Summoned {},
    #[serde(rename = "spsummoning")]
    SpSummoning {
        code: u32,
        card: CardPlacement,
    },
    #[serde(rename = "spsummoned")]
    SpSummoned {},
    #[serde(rename = "flipsummoning")]
    FlipSummoning {
        code: u32,
        card: CardPlacement,
    },
    #[serde(rename = "flipsummoned")]
    FlipSummoned {},
    Chaining {
        code: u32,
        card: CardPlacement,
        triggering_controller: u8,
        triggering_location: Location,
        triggering_sequence: u32,
        description: u64,
        count: u32,
    },
    Chained {
        count: u8,
    },
    ChainSolving {
        count: u8,
    },
    ChainSolved {
        count: u8,
    },
    ChainEnd {},
    ChainNegated {
        count: u8,
    },
    ChainDisabled {
        count: u8,
    },
    CardSelected {
        cards: Vec<CardPlacement>,
    },
    RandomSelected {
        player: u8,
        cards: Vec<CardPlacement>,
    },
    BecomeTarget {
        cards: Vec<CardPlacement>,
    },
    Draw {
        player: u8,
        cards: Vec<DrawnCardInfo>,
    },
    Damage {
        player: u8,
        amount: u32,
    },
    Recover {
        player: u8,
        amount: u32,
    },
    Equip {
        card: CardPlacement,
        target: CardPlacement,
    },
    #[serde(rename = "lpupdate")]
    LpUpdate {
        player: u8,
        lp: u32,
    },
    Unequip {
        card: CardPlacement,
    },
    CardTarget {
        card: CardPlacement,
        target: CardPlacement,
    },
    CancelTarget {
        card: CardPlacement,
        target: CardPlacement,
    },
    #[serde(rename = "pay_lpcost")]
    PayLpCost {
        player: u8,
        cost: u32,
    },
    AddCounter {
        counter_type: u16,
        controller: u8,
        location: Location,
        sequence: u8,
        count: u16,
    },
    RemoveCounter {
        counter_type: u16,
        controller: u8,
        location: Location,
        sequence: u8,
        count: u16,
    },
    Attack {
        attacker: CardPlacement,
        target: CardPlacement,
    },
    Battle {
        attacker: CardPlacement,
        attacker_attack: u32,
        attacker_defense: u32,
        attacker_destroyed: bool,
        target: CardPlacement,
        target_attack: u32,
        target_defense: u32,
        target_destroyed: bool,
    },
    AttackDisabled {},
    DamageStepStart {},
    DamageStepEnd {},
    MissedEffect {
        card: CardPlacement,
        code: u32,
    },
    BeChainTarget {},
    CreateRelation {},
    ReleaseRelation {},
    TossCoin {
        player: u8,
        results: Vec<u8>,
    },
    TossDice {
        player: u8,
        results: Vec<u8>,
    },
    RockPaperScissors {
        player: u8,
    },
    HandRes {
        result: u8,
    },
    AnnounceRace {
        player: u8,
        count: u8,
        races: Vec<crate::enums::CardMonsterType>,
    },
    #[serde(rename = "announce_attrib")]
    AnnounceAttribute {
        player: u8,
        count: u8,
        attributes: Vec<crate::enums::CardMonsterAttribute>,
    },
    AnnounceCard {
        player: u8,
        options: Vec<u64>,
    },
    AnnounceNumber {
        player: u8,
        options: Vec<u64>,
    },
    CardHint {
        card: CardPlacement,
        hint: u8,
        value: u64,
    },
    #[serde(rename = "ai_name")]
    AiName {
        name: String,
    },
    ShowHint {
        hint: String,
    },
    PlayerHint {
        player: u8,
        hint: u8,
        value: u64,
    },
    MatchKill {
        code: u32,
    },
    RemoveCards {
        cards: Vec<CardPlacement>,
    },
    /// Synthesized by the session layer when the engine blocks on a
    /// player response. Never decoded from an engine frame.
    WaitingResponse {},
}

// ---------------------------------------------------------------------------
// Frame splitting
// ---------------------------------------------------------------------------

/// Splits a processing-step buffer into its event frames.
///
/// Layout: `{u32 length, length bytes}` repeated until the buffer is
/// exhausted. A frame running past the end of the buffer is an error.
pub fn split_frames(buf: &[u8]) -> Result<Vec<Vec<u8>>, ProtocolError> {
    let mut cursor = Cursor::new(buf);
    let mut frames = Vec::new();
    while !cursor.is_empty() {
        if cursor.remaining() < 4 {
            return Err(ProtocolError::Truncated("frame length"));
        }
        let length = cursor.read_u32() as usize;
        match cursor.read_bytes(length) {
            Some(frame) => frames.push(frame.to_vec()),
            None => return Err(ProtocolError::Truncated("frame body")),
        }
    }
    Ok(frames)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn location_from_raw(raw: u8) -> Location {
    Location::from_wire(WireLocation(raw as u32))
}

fn position_from_raw(raw: u32) -> Position {
    Position::from_wire(WirePosition(raw))
}

fn read_card_placement(c: &mut Cursor<'_>) -> CardPlacement {
    CardPlacement {
        controller: c.read_u8(),
        location: location_from_raw(c.read_u8()),
        sequence: c.read_u32(),
        position: position_from_raw(c.read_u32()),
    }
}

fn read_card_info(c: &mut Cursor<'_>) -> CardInfo {
    CardInfo {
        code: c.read_u32(),
        controller: c.read_u8(),
        location: location_from_raw(c.read_u8()),
        sequence: c.read_u32(),
    }
}

fn read_chain_info(c: &mut Cursor<'_>) -> ChainInfo {
    ChainInfo {
        code: c.read_u32(),
        controller: c.read_u8(),
        location: location_from_raw(c.read_u8()),
        sequence: c.read_u32(),
        description: c.read_u64(),
        client_mode: c.read_u8(),
    }
}

fn read_attack_info(c: &mut Cursor<'_>) -> AttackInfo {
    AttackInfo {
        code: c.read_u32(),
        controller: c.read_u8(),
        location: location_from_raw(c.read_u8()),
        sequence: c.read_u32(),
        direct: c.read_u8() != 0,
    }
}

fn read_field_card_info(c: &mut Cursor<'_>) -> FieldCardInfo {
    let code = c.read_u32();
    let placement = read_card_placement(c);
    FieldCardInfo {
        code,
        controller: placement.controller,
        location: placement.location,
        sequence: placement.sequence,
        position: placement.position,
    }
}

fn read_card_infos(c: &mut Cursor<'_>) -> Vec<CardInfo> {
    let count = c.read_u32() as usize;
    (0..count).map(|_| read_card_info(c)).collect()
}

fn read_card_placements(c: &mut Cursor<'_>) -> Vec<CardPlacement> {
    let count = c.read_u32() as usize;
    (0..count).map(|_| read_card_placement(c)).collect()
}

/// Decodes one event frame.
///
/// Returns `Ok(None)` for kinds this layer has never heard of (the
/// caller should skip them) and an error for kinds whose layout is
/// known to be unsupported.
pub fn decode_message(frame: &[u8]) -> Result<Option<Message>, ProtocolError> {
    let mut c = Cursor::new(frame);
    if c.is_empty() {
        return Err(ProtocolError::Truncated("message kind tag"));
    }
    let kind = c.read_u8();
    let c = &mut c;

    let message = match kind {
        tag::RETRY => Message::Retry {},
        tag::HINT => Message::Hint {
            hint: c.read_u8(),
            player: c.read_u8(),
            description: c.read_u64(),
        },
        tag::WAITING => Message::Waiting {},
        tag::START => Message::Start {},
        tag::WIN => Message::Win { player: c.read_u8(), reason: c.read_u8() },
        tag::UPDATE_DATA => Message::UpdateData {},
        tag::UPDATE_CARD => Message::UpdateCard {},
        tag::REQUEST_DECK => Message::RequestDeck {},
        tag::SELECT_BATTLECMD => {
            let player = c.read_u8();
            let chain_count = c.read_u32() as usize;
            let chains = (0..chain_count).map(|_| read_chain_info(c)).collect();
            let attack_count = c.read_u32() as usize;
            let attacks = (0..attack_count).map(|_| read_attack_info(c)).collect();
            Message::SelectBattleCmd {
                player,
                chains,
                attacks,
                to_m2: c.read_u8() != 0,
                to_ep: c.read_u8() != 0,
            }
        }
        tag::SELECT_IDLECMD => {
            let player = c.read_u8();
            let summons = read_card_infos(c);
            let sp_summons = read_card_infos(c);
            let pos_changes = read_card_infos(c);
            let monster_sets = read_card_infos(c);
            let spell_sets = read_card_infos(c);
            let activate_count = c.read_u32() as usize;
            let activate = (0..activate_count).map(|_| read_chain_info(c)).collect();
            Message::SelectIdleCmd {
                player,
                summons,
                sp_summons,
                pos_changes,
                monster_sets,
                spell_sets,
                activate,
                to_bp: c.read_u8() != 0,
                to_ep: c.read_u8() != 0,
                shuffle: c.read_u8() != 0,
            }
        }
        tag::SELECT_EFFECTYN => {
            let player = c.read_u8();
            let code = c.read_u32();
            let placement = read_card_placement(c);
            Message::SelectEffectYn {
                player,
                code,
                controller: placement.controller,
                location: placement.location,
                sequence: placement.sequence,
                position: placement.position,
                description: c.read_u64(),
            }
        }
        tag::SELECT_YESNO => Message::SelectYesNo {
            player: c.read_u8(),
            description: c.read_u64(),
        },
        tag::SELECT_OPTION => {
            let player = c.read_u8();
            let count = c.read_u8() as usize;
            let options = (0..count).map(|_| c.read_u64()).collect();
            Message::SelectOption { player, options }
        }
        tag::SELECT_CARD => {
            let player = c.read_u8();
            let cancellable = c.read_u8() != 0;
            let min = c.read_u32();
            let max = c.read_u32();
            let count = c.read_u32() as usize;
            let cards = (0..count).map(|_| read_field_card_info(c)).collect();
            Message::SelectCard { player, cancellable, min, max, cards }
        }
        tag::SELECT_CHAIN => {
            let player = c.read_u8();
            let spe_count = c.read_u8();
            let forced = c.read_u8() != 0;
            let hint_timing_player = c.read_u32();
            let hint_timing_other = c.read_u32();
            let count = c.read_u32() as usize;
            let chains = (0..count)
                .map(|_| {
                    let code = c.read_u32();
                    let placement = read_card_placement(c);
                    CardChainInfo {
                        code,
                        controller: placement.controller,
                        location: placement.location,
                        sequence: placement.sequence,
                        position: placement.position,
                        description: c.read_u64(),
                        client_mode: c.read_u8(),
                    }
                })
                .collect();
            Message::SelectChain {
                player,
                spe_count,
                forced,
                hint_timing_player,
                hint_timing_other,
                chains,
            }
        }
        tag::SELECT_PLACE => {
            let player = c.read_u8();
            let count = c.read_u8();
            let places = decode_place_flag(c.read_u32());
            Message::SelectPlace { player, count, places }
        }
        tag::SELECT_POSITION => {
            let player = c.read_u8();
            let code = c.read_u32();
            let positions = Position::set_from_wire(WirePosition(c.read_u8() as u32));
            Message::SelectPosition { player, code, positions }
        }
        tag::SELECT_TRIBUTE => {
            let player = c.read_u8();
            let cancellable = c.read_u8() != 0;
            let min = c.read_u32();
            let max = c.read_u32();
            let count = c.read_u32() as usize;
            let cards = (0..count)
                .map(|_| TributeCardInfo {
                    code: c.read_u32(),
                    controller: c.read_u8(),
                    location: location_from_raw(c.read_u8()),
                    sequence: c.read_u32(),
                    release_param: c.read_u8(),
                })
                .collect();
            Message::SelectTribute { player, cancellable, min, max, cards }
        }
        tag::SORT_CHAIN => Message::SortChain {
            player: c.read_u8(),
            cards: read_card_infos(c),
        },
        tag::SELECT_COUNTER => {
            let player = c.read_u8();
            let counter_type = c.read_u16();
            let count = c.read_u16();
            let card_count = c.read_u32() as usize;
            let cards = (0..card_count)
                .map(|_| CounterCardInfo {
                    code: c.read_u32(),
                    controller: c.read_u8(),
                    location: location_from_raw(c.read_u8()),
                    sequence: c.read_u8() as u32,
                    count: c.read_u16() as u32,
                })
                .collect();
            Message::SelectCounter { player, counter_type, count, cards }
        }
        tag::SELECT_SUM => {
            let player = c.read_u8();
            let has_max = c.read_u8() != 0;
            let acc = c.read_u32();
            let min = c.read_u32();
            let max = c.read_u32();
            let read_sum_cards = |c: &mut Cursor<'_>| -> Vec<CounterCardInfo> {
                let count = c.read_u32() as usize;
                (0..count)
                    .map(|_| CounterCardInfo {
                        code: c.read_u32(),
                        controller: c.read_u8(),
                        location: location_from_raw(c.read_u8()),
                        sequence: c.read_u32(),
                        count: c.read_u32(),
                    })
                    .collect()
            };
            let must_selects = read_sum_cards(c);
            let selects = read_sum_cards(c);
            Message::SelectSum { player, has_max, acc, min, max, must_selects, selects }
        }
        tag::SELECT_DISFIELD => {
            let player = c.read_u8();
            let count = c.read_u8();
            let places = decode_place_flag(c.read_u32());
            Message::SelectDisfield { player, count, places }
        }
        tag::SORT_CARD => Message::SortCard {
            player: c.read_u8(),
            cards: read_card_infos(c),
        },
        tag::SELECT_UNSELECT_CARD => {
            let player = c.read_u8();
            let finishable = c.read_u8() != 0;
            let cancellable = c.read_u8() != 0;
            let min = c.read_u32();
            let max = c.read_u32();
            let select_count = c.read_u32() as usize;
            let selects = (0..select_count).map(|_| read_field_card_info(c)).collect();
            let unselect_count = c.read_u32() as usize;
            let unselects = (0..unselect_count).map(|_| read_field_card_info(c)).collect();
            Message::SelectUnselectCard {
                player,
                finishable,
                cancellable,
                min,
                max,
                selects,
                unselects,
            }
        }
        tag::CONFIRM_DECKTOP => Message::ConfirmDeckTop {
            player: c.read_u8(),
            cards: read_card_infos(c),
        },
        tag::CONFIRM_CARDS => Message::ConfirmCards {
            player: c.read_u8(),
            cards: read_card_infos(c),
        },
        tag::SHUFFLE_DECK => Message::ShuffleDeck { player: c.read_u8() },
        tag::SHUFFLE_HAND => {
            let player = c.read_u8();
            let count = c.read_u32() as usize;
            let codes = (0..count).map(|_| c.read_u32()).collect();
            Message::ShuffleHand { player, codes }
        }
        tag::REFRESH_DECK => Message::RefreshDeck { player: c.read_u8() },
        tag::SWAP_GRAVE_DECK => Message::SwapGraveDeck { player: c.read_u8() },
        tag::SHUFFLE_SET_CARD => {
            let location = location_from_raw(c.read_u8());
            let count = c.read_u8() as usize;
            let cards = (0..count).map(|_| read_card_placement(c)).collect();
            Message::ShuffleSetCard { location, cards }
        }
        tag::REVERSE_DECK => Message::ReverseDeck {},
        tag::DECK_TOP => Message::DeckTop {
            player: c.read_u8(),
            sequence: c.read_u32(),
            code: c.read_u32(),
            position: position_from_raw(c.read_u32()),
        },
        tag::SHUFFLE_EXTRA => {
            let player = c.read_u8();
            let count = c.read_u32() as usize;
            let codes = (0..count).map(|_| c.read_u32()).collect();
            Message::ShuffleExtra { player, codes }
        }
        tag::NEW_TURN => Message::NewTurn { player: c.read_u8() },
        tag::NEW_PHASE => {
            let phase = WirePhase(c.read_u16());
            Message::NewPhase {
                phase: Phase::from_wire(phase),
                detailed_phase: DetailedPhase::from_wire(phase),
            }
        }
        tag::CONFIRM_EXTRATOP => Message::ConfirmExtraTop {
            player: c.read_u8(),
            cards: read_card_infos(c),
        },
        tag::MOVE => Message::Move {
            code: c.read_u32(),
            from: read_card_placement(c),
            to: read_card_placement(c),
            reason: c.read_u32(),
        },
        tag::POS_CHANGE => Message::PosChange {
            code: c.read_u32(),
            controller: c.read_u8(),
            location: location_from_raw(c.read_u8()),
            sequence: c.read_u8(),
            previous: position_from_raw(c.read_u8() as u32),
            current: position_from_raw(c.read_u8() as u32),
        },
        tag::SET => Message::Set {
            code: c.read_u32(),
            card: read_card_placement(c),
        },
        tag::SWAP => Message::Swap {
            first_code: c.read_u32(),
            first: read_card_placement(c),
            second_code: c.read_u32(),
            second: read_card_placement(c),
        },
        tag::FIELD_DISABLED => Message::FieldDisabled { flag: c.read_u32() },
        tag::SUMMONING => Message::Summoning {
            code: c.read_u32(),
            card: read_card_placement(c),
        },
        tag::SUMMONED => Message::Summoned {},
        tag::SPSUMMONING => Message::SpSummoning {
            code: c.read_u32(),
            card: read_card_placement(c),
        },
        tag::SPSUMMONED => Message::SpSummoned {},
        tag::FLIPSUMMONING => Message::FlipSummoning {
            code: c.read_u32(),
            card: read_card_placement(c),
        },
        tag::FLIPSUMMONED => Message::FlipSummoned {},
        tag::CHAINING => Message::Chaining {
            code: c.read_u32(),
            card: read_card_placement(c),
            triggering_controller: c.read_u8(),
            triggering_location: location_from_raw(c.read_u8()),
            triggering_sequence: c.read_u32(),
            description: c.read_u64(),
            count: c.read_u32(),
        },
        tag::CHAINED => Message::Chained { count: c.read_u8() },
        tag::CHAIN_SOLVING => Message::ChainSolving { count: c.read_u8() },
        tag::CHAIN_SOLVED => Message::ChainSolved { count: c.read_u8() },
        tag::CHAIN_END => Message::ChainEnd {},
        tag::CHAIN_NEGATED => Message::ChainNegated { count: c.read_u8() },
        tag::CHAIN_DISABLED => Message::ChainDisabled { count: c.read_u8() },
        tag::CARD_SELECTED => Message::CardSelected { cards: read_card_placements(c) },
        tag::RANDOM_SELECTED => Message::RandomSelected {
            player: c.read_u8(),
            cards: read_card_placements(c),
        },
        tag::BECOME_TARGET => Message::BecomeTarget { cards: read_card_placements(c) },
        tag::DRAW => {
            let player = c.read_u8();
            let count = c.read_u32() as usize;
            let cards = (0..count)
                .map(|_| DrawnCardInfo {
                    code: c.read_u32(),
                    position: position_from_raw(c.read_u32()),
                })
                .collect();
            Message::Draw { player, cards }
        }
        tag::DAMAGE => Message::Damage { player: c.read_u8(), amount: c.read_u32() },
        tag::RECOVER => Message::Recover { player: c.read_u8(), amount: c.read_u32() },
        tag::EQUIP => Message::Equip {
            card: read_card_placement(c),
            target: read_card_placement(c),
        },
        tag::LPUPDATE => Message::LpUpdate { player: c.read_u8(), lp: c.read_u32() },
        tag::UNEQUIP => Message::Unequip { card: read_card_placement(c) },
        tag::CARD_TARGET => Message::CardTarget {
            card: read_card_placement(c),
            target: read_card_placement(c),
        },
        tag::CANCEL_TARGET => Message::CancelTarget {
            card: read_card_placement(c),
            target: read_card_placement(c),
        },
        tag::PAY_LPCOST => Message::PayLpCost { player: c.read_u8(), cost: c.read_u32() },
        tag::ADD_COUNTER => Message::AddCounter {
            counter_type: c.read_u16(),
            controller: c.read_u8(),
            location: location_from_raw(c.read_u8()),
            sequence: c.read_u8(),
            count: c.read_u16(),
        },
        tag::REMOVE_COUNTER => Message::RemoveCounter {
            counter_type: c.read_u16(),
            controller: c.read_u8(),
            location: location_from_raw(c.read_u8()),
            sequence: c.read_u8(),
            count: c.read_u16(),
        },
        tag::ATTACK => Message::Attack {
            attacker: read_card_placement(c),
            target: read_card_placement(c),
        },
        tag::BATTLE => {
            let attacker = read_card_placement(c);
            let attacker_attack = c.read_u32();
            let attacker_defense = c.read_u32();
            let attacker_destroyed = c.read_u8() != 0;
            let target = read_card_placement(c);
            let target_attack = c.read_u32();
            let target_defense = c.read_u32();
            let target_destroyed = c.read_u8() != 0;
            Message::Battle {
                attacker,
                attacker_attack,
                attacker_defense,
                attacker_destroyed,
                target,
                target_attack,
                target_defense,
                target_destroyed,
            }
        }
        tag::ATTACK_DISABLED => Message::AttackDisabled {},
        tag::DAMAGE_STEP_START => Message::DamageStepStart {},
        tag::DAMAGE_STEP_END => Message::DamageStepEnd {},
        tag::MISSED_EFFECT => Message::MissedEffect {
            card: read_card_placement(c),
            code: c.read_u32(),
        },
        tag::BE_CHAIN_TARGET => Message::BeChainTarget {},
        tag::CREATE_RELATION => Message::CreateRelation {},
        tag::RELEASE_RELATION => Message::ReleaseRelation {},
        tag::TOSS_COIN => {
            let player = c.read_u8();
            let count = c.read_u8() as usize;
            let results = (0..count).map(|_| c.read_u8()).collect();
            Message::TossCoin { player, results }
        }
        tag::TOSS_DICE => {
            let player = c.read_u8();
            let count = c.read_u8() as usize;
            let results = (0..count).map(|_| c.read_u8()).collect();
            Message::TossDice { player, results }
        }
        tag::ROCK_PAPER_SCISSORS => Message::RockPaperScissors { player: c.read_u8() },
        tag::HAND_RES => Message::HandRes { result: c.read_u8() },
        tag::ANNOUNCE_RACE => {
            let player = c.read_u8();
            let count = c.read_u8();
            let mask = c.read_u64();
            let races =
                crate::enums::CardMonsterType::list_from_flags(RaceFlags(mask as u32));
            Message::AnnounceRace { player, count, races }
        }
        tag::ANNOUNCE_ATTRIB => {
            let player = c.read_u8();
            let count = c.read_u8();
            let mask = c.read_u32();
            let attributes =
                crate::enums::CardMonsterAttribute::list_from_flags(AttributeFlags(mask));
            Message::AnnounceAttribute { player, count, attributes }
        }
        tag::ANNOUNCE_CARD => {
            let player = c.read_u8();
            let count = c.read_u8() as usize;
            let options = (0..count).map(|_| c.read_u64()).collect();
            Message::AnnounceCard { player, options }
        }
        tag::ANNOUNCE_NUMBER => {
            let player = c.read_u8();
            let count = c.read_u8() as usize;
            let options = (0..count).map(|_| c.read_u64()).collect();
            Message::AnnounceNumber { player, options }
        }
        tag::CARD_HINT => Message::CardHint {
            card: read_card_placement(c),
            hint: c.read_u8(),
            value: c.read_u64(),
        },
        tag::AI_NAME => {
            let len = c.read_u16() as usize;
            let name = match c.read_bytes(len) {
                Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                None => return Err(ProtocolError::Truncated("ai name")),
            };
            Message::AiName { name }
        }
        tag::SHOW_HINT => {
            let len = c.read_u16() as usize;
            let hint = match c.read_bytes(len) {
                Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                None => return Err(ProtocolError::Truncated("hint text")),
            };
            Message::ShowHint { hint }
        }
        tag::PLAYER_HINT => Message::PlayerHint {
            player: c.read_u8(),
            hint: c.read_u8(),
            value: c.read_u64(),
        },
        tag::MATCH_KILL => Message::MatchKill { code: c.read_u32() },
        tag::REMOVE_CARDS => Message::RemoveCards { cards: read_card_placements(c) },
        tag::TAG_SWAP | tag::RELOAD_FIELD | tag::CUSTOM_MSG => {
            return Err(ProtocolError::UnsupportedMessage(kind));
        }
        _ => return Ok(None),
    };
    Ok(Some(message))
}
