//! Player response encoding.
//!
//! Responses travel the other way: a structured answer to the last
//! prompt, flattened into the little-endian layout the engine reads
//! back. Each [`Response`] variant pairs with the prompt message of the
//! same name.

use serde::{Deserialize, Serialize};

use crate::cursor::ByteWriter;
use crate::enums::{Location, Position};
use crate::place::Place;
use crate::wire::WireLocation;

/// An action picked from the battle command prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleAction {
    Chain,
    Attack,
    ToM2,
    ToEp,
}

impl BattleAction {
    fn to_wire(self) -> u32 {
        match self {
            Self::Chain => 0,
            Self::Attack => 1,
            Self::ToM2 => 2,
            Self::ToEp => 3,
        }
    }
}

/// An action picked from the main phase command prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleAction {
    Summon,
    SpSummon,
    PosChange,
    MonsterSet,
    SpellSet,
    Activate,
    ToBp,
    ToEp,
    Shuffle,
}

impl IdleAction {
    fn to_wire(self) -> u32 {
        match self {
            Self::Summon => 0,
            Self::SpSummon => 1,
            Self::PosChange => 2,
            Self::MonsterSet => 3,
            Self::SpellSet => 4,
            Self::Activate => 5,
            Self::ToBp => 6,
            Self::ToEp => 7,
            Self::Shuffle => 8,
        }
    }
}

/// A player's answer to a prompt.
///
/// Serializes as a JSON object tagged with `response_type`, mirroring
/// the `message_type` tag on the prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response_type", rename_all = "snake_case")]
pub enum Response {
    #[serde(rename = "select_battlecmd")]
    SelectBattleCmd { action: BattleAction, index: u32 },
    #[serde(rename = "select_idlecmd")]
    SelectIdleCmd { action: IdleAction, index: u32 },
    #[serde(rename = "select_effectyn")]
    SelectEffectYn { yes: bool },
    #[serde(rename = "select_yesno")]
    SelectYesNo { yes: bool },
    SelectOption { option: u32 },
    /// Pick cards by index into the prompt's card list, or cancel.
    SelectCard { cancel: bool, select: Vec<u8> },
    /// Index of the chain link to activate, `-1` to decline.
    SelectChain { chain: i32 },
    SelectPlace { places: Vec<Place> },
    SelectPosition { position: Position },
    SelectUnselectCard { cancel: bool, selection: u32 },
}

impl Response {
    /// Encodes this response into the byte layout the engine expects.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        match self {
            Self::SelectBattleCmd { action, index } => {
                w.write_u32((action.to_wire() & 0xff) | ((index & 0xff) << 16));
            }
            Self::SelectIdleCmd { action, index } => {
                w.write_u32((action.to_wire() & 0xff) | ((index & 0xff) << 16));
            }
            Self::SelectEffectYn { yes } | Self::SelectYesNo { yes } => {
                w.write_i32(if *yes { 1 } else { 0 });
            }
            Self::SelectOption { option } => {
                w.write_i32(*option as i32);
            }
            Self::SelectCard { cancel, select } => {
                if *cancel {
                    w.write_i32(-1);
                } else {
                    // Selection list style 2: count then one index byte
                    // per pick.
                    w.write_i32(2);
                    w.write_i32(select.len() as i32);
                    for index in select {
                        w.write_i8(*index as i8);
                    }
                }
            }
            Self::SelectChain { chain } => {
                w.write_i32(*chain);
            }
            Self::SelectPlace { places } => {
                for place in places {
                    let mut location = place.location.to_wire();
                    let mut sequence = place.sequence as u8;
                    // Pendulum zones are addressed as spell zone slots 6
                    // and 7 on the way back in.
                    if location == WireLocation::PENDULUM_ZONE {
                        location = WireLocation::SPELL_ZONE;
                        sequence -= 6;
                    }
                    w.write_u8(place.player);
                    w.write_u8(location.raw() as u8);
                    w.write_u8(sequence);
                }
            }
            Self::SelectPosition { position } => {
                w.write_i32(position.to_wire().raw() as i32);
            }
            Self::SelectUnselectCard { cancel, selection } => {
                if *cancel {
                    w.write_i32(-1);
                } else {
                    w.write_i32(1);
                    w.write_i32(*selection as i32);
                }
            }
        }
        w.into_bytes()
    }
}
