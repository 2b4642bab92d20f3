//! Wire protocol for Duelforge.
//!
//! This crate defines the "language" spoken across the engine boundary:
//!
//! - **Flags and enums** ([`WireLocation`], [`Location`], [`Phase`],
//!   etc.) — the engine's packed bit words and their dense public
//!   counterparts.
//! - **Events** ([`Message`], [`decode_message`], [`split_frames`]) —
//!   the engine's event frames, decoded into typed messages.
//! - **Responses** ([`Response`]) — player answers, encoded back into
//!   the engine's layouts.
//! - **Queries** ([`parse_query`], [`FieldSnapshot`], etc.) — card and
//!   board state readback.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages are
//!   converted to/from bytes for consumers.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between the engine (raw byte buffers) and
//! the session (duel lifecycle). It doesn't know about decks, turns, or
//! scripts — it only knows how to read and write the engine's formats.
//!
//! ```text
//! Engine (bytes) → Protocol (Message/Response) → Session (duel flow)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod card;
mod codec;
mod convert;
mod cursor;
mod enums;
mod error;
mod message;
mod place;
mod query;
mod response;
mod wire;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

// `pub use` makes items from submodules available at the crate root.
// Users can write `use duelforge_protocol::Message` instead of
// `use duelforge_protocol::message::Message`. This is a cleaner public API.

pub use card::RawCardData;
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use cursor::{ByteWriter, Cursor};
pub use enums::{
    BattlePosition, CardLinkMarker, CardMonsterAbility, CardMonsterAttribute,
    CardMonsterFrame, CardMonsterType, CardSpellType, CardTrapType, CardType,
    DetailedPhase, FacePosition, FieldPlace, Location, Phase, Position,
};
pub use error::ProtocolError;
pub use message::{
    decode_message, split_frames, AttackInfo, CardChainInfo, CardInfo, CardPlacement,
    ChainInfo, CounterCardInfo, DrawnCardInfo, FieldCardInfo, Message, TributeCardInfo,
};
pub use place::{decode_place_flag, Place};
pub use query::{
    parse_query, parse_query_field, parse_query_location, FieldChainLink, FieldPlayer,
    FieldSlot, FieldSnapshot, QueryResult,
};
pub use response::{BattleAction, IdleAction, Response};
pub use wire::{
    AttributeFlags, DuelMode, LinkMarkerFlags, QueryField, RaceFlags, TypeFlags,
    WireLocation, WirePhase, WirePosition,
};
