//! Tests for the JSON shape of the message and response streams.

#![cfg(feature = "json")]

use duelforge_protocol::{
    BattleAction, Codec, JsonCodec, Location, Message, Phase, Position, Response,
};
use serde_json::{json, Value};

#[test]
fn messages_carry_their_type_tag() {
    let codec = JsonCodec;

    let bytes = codec
        .encode(&Message::LpUpdate { player: 1, lp: 6500 })
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({"message_type": "lpupdate", "player": 1, "lp": 6500}));

    let bytes = codec.encode(&Message::WaitingResponse {}).unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({"message_type": "waiting_response"}));
}

#[test]
fn hint_uses_the_short_desc_key() {
    let bytes = JsonCodec
        .encode(&Message::Hint { hint: 3, player: 0, description: 221 })
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        value,
        json!({"message_type": "hint", "hint": 3, "player": 0, "desc": 221})
    );
}

#[test]
fn phases_use_wire_abbreviations() {
    let bytes = JsonCodec
        .encode(&Message::NewPhase {
            phase: Phase::Main1,
            detailed_phase: duelforge_protocol::DetailedPhase::Main1,
        })
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["phase"], "m1");
    assert_eq!(value["detailed_phase"], "main1");
}

#[test]
fn responses_round_trip() {
    let codec = JsonCodec;
    for response in [
        Response::SelectBattleCmd { action: BattleAction::Attack, index: 2 },
        Response::SelectCard { cancel: false, select: vec![0, 1] },
        Response::SelectPlace {
            places: vec![duelforge_protocol::Place::new(0, Location::SpellZone, 4)],
        },
        Response::SelectPosition { position: Position::FaceUpAttack },
    ] {
        let bytes = codec.encode(&response).unwrap();
        let back: Response = codec.decode(&bytes).unwrap();
        assert_eq!(back, response);
    }
}

#[test]
fn response_tags_match_prompt_names() {
    let bytes = JsonCodec
        .encode(&Response::SelectIdleCmd {
            action: duelforge_protocol::IdleAction::SpSummon,
            index: 0,
        })
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["response_type"], "select_idlecmd");
    assert_eq!(value["action"], "sp_summon");

    let back: Response = JsonCodec
        .decode(br#"{"response_type":"select_effectyn","yes":false}"#)
        .unwrap();
    assert_eq!(back, Response::SelectEffectYn { yes: false });
}
