//! Query buffer parsing.
//!
//! Card queries come back as a sequence of length-prefixed records, one
//! per requested flag: `{u16 length, u32 flag id, length-4 payload}`.
//! The payload layout depends on the flag, so the parser keeps payloads
//! as raw bytes and lets callers interpret the flags they asked for.
//! The field-wide snapshot query has its own fixed layout and gets a
//! structured result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::enums::Location;
use crate::error::ProtocolError;
use crate::wire::{DuelMode, QueryField, WireLocation};

/// One parsed card query: requested flag to raw payload bytes.
pub type QueryResult = HashMap<QueryField, Vec<u8>>;

/// Parses a single-card query buffer.
pub fn parse_query(buf: &[u8]) -> Result<QueryResult, ProtocolError> {
    let mut cursor = Cursor::new(buf);
    let mut result = QueryResult::new();
    read_query_records(&mut cursor, &mut result)?;
    Ok(result)
}

/// Parses a whole-location query buffer into per-slot results.
///
/// The buffer opens with a `u32` slot count. Each slot is a run of
/// query records terminated by a zero-length record or the end marker;
/// a slot with no records at all is an empty zone and yields `None`.
pub fn parse_query_location(buf: &[u8]) -> Result<Vec<Option<QueryResult>>, ProtocolError> {
    let mut cursor = Cursor::new(buf);
    let count = cursor.read_u32() as usize;
    let mut slots = Vec::with_capacity(count);
    for _ in 0..count {
        let mut result = QueryResult::new();
        read_query_records(&mut cursor, &mut result)?;
        slots.push(if result.is_empty() { None } else { Some(result) });
    }
    Ok(slots)
}

fn read_query_records(
    cursor: &mut Cursor<'_>,
    result: &mut QueryResult,
) -> Result<(), ProtocolError> {
    loop {
        if cursor.is_empty() {
            return Ok(());
        }
        if cursor.remaining() < 2 {
            return Err(ProtocolError::Truncated("query record length"));
        }
        let length = cursor.read_u16() as usize;
        if length == 0 {
            return Ok(());
        }
        if length < 4 {
            return Err(ProtocolError::Malformed(format!(
                "query record length {length} shorter than its flag id"
            )));
        }
        if cursor.remaining() < length {
            return Err(ProtocolError::Truncated("query record payload"));
        }
        let flag = QueryField(cursor.read_u32());
        let payload = match cursor.read_bytes(length - 4) {
            Some(bytes) => bytes.to_vec(),
            None => return Err(ProtocolError::Truncated("query record payload")),
        };
        if flag == QueryField::END {
            return Ok(());
        }
        result.insert(flag, payload);
    }
}

// ---------------------------------------------------------------------------
// Field snapshot
// ---------------------------------------------------------------------------

/// A card occupying a monster or spell zone in a field snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSlot {
    pub position: i8,
    /// Overlay material count for xyz monsters, zero otherwise.
    pub materials: i32,
}

/// One player's half of a field snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPlayer {
    pub lp: i32,
    pub monsters: [Option<FieldSlot>; 7],
    pub spells: [Option<FieldSlot>; 8],
    pub main_count: u32,
    pub hand_count: u32,
    pub grave_count: u32,
    pub banish_count: u32,
    pub extra_count: u32,
    pub extra_pendulum_count: u32,
}

/// A pending chain link in a field snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChainLink {
    pub code: i32,
    pub controller: u8,
    pub location: Location,
    pub sequence: u32,
    pub position: u32,
    pub triggering_controller: u8,
    pub triggering_location: Location,
    pub triggering_sequence: u32,
    pub description: u64,
}

/// The result of a whole-field query: both players' boards plus the
/// current chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub mode: DuelMode,
    pub players: [FieldPlayer; 2],
    pub chain: Vec<FieldChainLink>,
}

/// Parses a whole-field query buffer.
pub fn parse_query_field(buf: &[u8]) -> Result<FieldSnapshot, ProtocolError> {
    let mut cursor = Cursor::new(buf);
    let mode = DuelMode(cursor.read_i32() as u32);

    let mut players = Vec::with_capacity(2);
    for _ in 0..2 {
        let lp = cursor.read_i32();
        let mut monsters = [None; 7];
        for slot in &mut monsters {
            *slot = read_field_slot(&mut cursor)?;
        }
        let mut spells = [None; 8];
        for slot in &mut spells {
            *slot = read_field_slot(&mut cursor)?;
        }
        players.push(FieldPlayer {
            lp,
            monsters,
            spells,
            main_count: cursor.read_u32(),
            hand_count: cursor.read_u32(),
            grave_count: cursor.read_u32(),
            banish_count: cursor.read_u32(),
            extra_count: cursor.read_u32(),
            extra_pendulum_count: cursor.read_u32(),
        });
    }
    let players: [FieldPlayer; 2] = match players.try_into() {
        Ok(p) => p,
        Err(_) => return Err(ProtocolError::Truncated("field snapshot players")),
    };

    let chain_count = cursor.read_i32();
    let mut chain = Vec::new();
    for _ in 0..chain_count {
        chain.push(FieldChainLink {
            code: cursor.read_i32(),
            controller: cursor.read_u8(),
            location: Location::from_wire(WireLocation(cursor.read_u8() as u32)),
            sequence: cursor.read_u32(),
            position: cursor.read_u32(),
            triggering_controller: cursor.read_u8(),
            triggering_location: Location::from_wire(WireLocation(cursor.read_u8() as u32)),
            triggering_sequence: cursor.read_u32(),
            description: cursor.read_u64(),
        });
    }

    Ok(FieldSnapshot { mode, players, chain })
}

fn read_field_slot(cursor: &mut Cursor<'_>) -> Result<Option<FieldSlot>, ProtocolError> {
    if cursor.is_empty() {
        return Err(ProtocolError::Truncated("field snapshot slot"));
    }
    if cursor.read_u8() == 0 {
        return Ok(None);
    }
    Ok(Some(FieldSlot {
        position: cursor.read_i8(),
        materials: cursor.read_i32(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ByteWriter;

    fn record(w: &mut ByteWriter, flag: QueryField, payload: &[u8]) {
        w.write_u16((payload.len() + 4) as u16);
        w.write_u32(flag.0);
        w.write_bytes(payload);
    }

    #[test]
    fn single_card_query() {
        let mut w = ByteWriter::new();
        record(&mut w, QueryField::CODE, &1234u32.to_le_bytes());
        record(&mut w, QueryField::ATTACK, &2500i32.to_le_bytes());
        let buf = w.into_bytes();

        let result = parse_query(&buf).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[&QueryField::CODE], 1234u32.to_le_bytes().to_vec());
    }

    #[test]
    fn end_marker_stops_a_slot() {
        let mut w = ByteWriter::new();
        record(&mut w, QueryField::CODE, &1u32.to_le_bytes());
        record(&mut w, QueryField::END, &[]);
        // Bytes after the end marker belong to nobody in a single-card
        // query and are left unread.
        w.write_bytes(&[0xaa, 0xbb]);
        let buf = w.into_bytes();

        let result = parse_query(&buf).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.contains_key(&QueryField::CODE));
    }

    #[test]
    fn location_query_collapses_empty_slots() {
        let mut w = ByteWriter::new();
        w.write_u32(3);
        // Slot 0: one record, then zero-length terminator.
        record(&mut w, QueryField::CODE, &7u32.to_le_bytes());
        w.write_u16(0);
        // Slot 1: immediately terminated, an empty zone.
        w.write_u16(0);
        // Slot 2: record run ends with the buffer.
        record(&mut w, QueryField::LEVEL, &4u32.to_le_bytes());
        let buf = w.into_bytes();

        let slots = parse_query_location(&buf).unwrap();
        assert_eq!(slots.len(), 3);
        assert!(slots[0].is_some());
        assert!(slots[1].is_none());
        assert_eq!(slots[2].as_ref().map(|r| r.len()), Some(1));
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut w = ByteWriter::new();
        w.write_u16(10); // claims 10 bytes, delivers 4
        w.write_u32(QueryField::CODE.0);
        let buf = w.into_bytes();
        assert!(matches!(parse_query(&buf), Err(ProtocolError::Truncated(_))));

        // A record too short to even hold its flag id.
        let mut w = ByteWriter::new();
        w.write_u16(2);
        w.write_u16(0);
        let buf = w.into_bytes();
        assert!(matches!(parse_query(&buf), Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn field_snapshot_parses() {
        let mut w = ByteWriter::new();
        w.write_i32(0); // duel mode
        for player in 0..2u8 {
            w.write_i32(8000 - i32::from(player) * 1000);
            for seq in 0..7u8 {
                if player == 0 && seq == 2 {
                    w.write_u8(1);
                    w.write_i8(1); // face-up attack
                    w.write_i32(3); // overlay materials
                } else {
                    w.write_u8(0);
                }
            }
            for _ in 0..8u8 {
                w.write_u8(0);
            }
            w.write_u32(30); // main
            w.write_u32(5); // hand
            w.write_u32(2); // grave
            w.write_u32(0); // banished
            w.write_u32(15); // extra
            w.write_u32(1); // face-up pendulums in extra
        }
        w.write_i32(1);
        w.write_i32(5555);
        w.write_u8(0);
        w.write_u8(0x08); // spell zone
        w.write_u32(1);
        w.write_u32(5);
        w.write_u8(1);
        w.write_u8(0x02); // hand
        w.write_u32(0);
        w.write_u64(42);
        let buf = w.into_bytes();

        let snapshot = parse_query_field(&buf).unwrap();
        assert_eq!(snapshot.players[0].lp, 8000);
        assert_eq!(snapshot.players[1].lp, 7000);
        assert_eq!(
            snapshot.players[0].monsters[2],
            Some(FieldSlot { position: 1, materials: 3 })
        );
        assert!(snapshot.players[0].monsters[3].is_none());
        assert_eq!(snapshot.players[0].extra_count, 15);
        assert_eq!(snapshot.chain.len(), 1);
        assert_eq!(snapshot.chain[0].code, 5555);
        assert_eq!(snapshot.chain[0].location, Location::SpellZone);
        assert_eq!(snapshot.chain[0].triggering_location, Location::Hand);
        assert_eq!(snapshot.chain[0].description, 42);
    }
}
