//! Integration tests decoding synthesized engine buffers end to end.

use duelforge_protocol::{
    decode_message, split_frames, ByteWriter, Location, Message, Place, Position,
    ProtocolError, Response,
};

/// Writes the standard card coordinate block.
fn write_placement(w: &mut ByteWriter, controller: u8, location: u8, sequence: u32, position: u32) {
    w.write_u8(controller);
    w.write_u8(location);
    w.write_u32(sequence);
    w.write_u32(position);
}

#[test]
fn decodes_a_draw_event() {
    let mut w = ByteWriter::new();
    w.write_u8(90); // draw
    w.write_u8(0);
    w.write_u32(2);
    w.write_u32(34541863); // first drawn card
    w.write_u32(0x2); // face-down attack
    w.write_u32(44256816);
    w.write_u32(0x1);
    let msg = decode_message(&w.into_bytes()).unwrap().unwrap();

    let Message::Draw { player, cards } = msg else {
        panic!("expected a draw event");
    };
    assert_eq!(player, 0);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].code, 34541863);
    assert_eq!(cards[0].position, Position::FaceDownAttack);
    assert_eq!(cards[1].position, Position::FaceUpAttack);
}

#[test]
fn decodes_an_idle_command_prompt() {
    let mut w = ByteWriter::new();
    w.write_u8(11); // select_idlecmd
    w.write_u8(1);
    // One summonable monster in the hand.
    w.write_u32(1);
    w.write_u32(12345678);
    w.write_u8(1);
    w.write_u8(0x02); // hand
    w.write_u32(3);
    // No special summons, position changes, or sets.
    w.write_u32(0);
    w.write_u32(0);
    w.write_u32(0);
    w.write_u32(0);
    // One activatable effect in the grave.
    w.write_u32(1);
    w.write_u32(87654321);
    w.write_u8(1);
    w.write_u8(0x10); // grave
    w.write_u32(0);
    w.write_u64(550);
    w.write_u8(2);
    w.write_u8(1); // to_bp
    w.write_u8(1); // to_ep
    w.write_u8(0); // shuffle
    let msg = decode_message(&w.into_bytes()).unwrap().unwrap();

    let Message::SelectIdleCmd { player, summons, activate, to_bp, to_ep, shuffle, .. } = msg
    else {
        panic!("expected an idle command prompt");
    };
    assert_eq!(player, 1);
    assert_eq!(summons.len(), 1);
    assert_eq!(summons[0].code, 12345678);
    assert_eq!(summons[0].location, Location::Hand);
    assert_eq!(summons[0].sequence, 3);
    assert_eq!(activate.len(), 1);
    assert_eq!(activate[0].location, Location::Grave);
    assert_eq!(activate[0].description, 550);
    assert_eq!(activate[0].client_mode, 2);
    assert!(to_bp);
    assert!(to_ep);
    assert!(!shuffle);
}

#[test]
fn decodes_a_place_prompt_into_zones() {
    let mut w = ByteWriter::new();
    w.write_u8(18); // select_place
    w.write_u8(0);
    w.write_u8(1);
    // Everything blocked except player 0's monster zones 1 and 3.
    w.write_u32(!(1u32 << 1 | 1u32 << 3));
    let msg = decode_message(&w.into_bytes()).unwrap().unwrap();

    let Message::SelectPlace { places, count, .. } = msg else {
        panic!("expected a place prompt");
    };
    assert_eq!(count, 1);
    assert_eq!(
        places,
        vec![
            Place::new(0, Location::MonsterZone, 1),
            Place::new(0, Location::MonsterZone, 3),
        ]
    );
}

#[test]
fn decodes_a_battle_result() {
    let mut w = ByteWriter::new();
    w.write_u8(111); // battle
    write_placement(&mut w, 0, 0x04, 2, 0x1);
    w.write_u32(2500);
    w.write_u32(2100);
    w.write_u8(0);
    write_placement(&mut w, 1, 0x04, 0, 0x4);
    w.write_u32(1800);
    w.write_u32(1200);
    w.write_u8(1);
    let msg = decode_message(&w.into_bytes()).unwrap().unwrap();

    let Message::Battle { attacker, attacker_destroyed, target, target_destroyed, .. } = msg
    else {
        panic!("expected a battle event");
    };
    assert_eq!(attacker.location, Location::MonsterZone);
    assert_eq!(attacker.position, Position::FaceUpAttack);
    assert!(!attacker_destroyed);
    assert_eq!(target.position, Position::FaceUpDefense);
    assert!(target_destroyed);
}

#[test]
fn unselect_prompt_keeps_both_lists_separate() {
    let mut w = ByteWriter::new();
    w.write_u8(26); // select_unselect_card
    w.write_u8(0);
    w.write_u8(1); // finishable
    w.write_u8(0); // cancellable
    w.write_u32(1);
    w.write_u32(1);
    w.write_u32(1); // one selectable card
    w.write_u32(111);
    write_placement(&mut w, 0, 0x02, 0, 0);
    w.write_u32(2); // two already-selected cards
    w.write_u32(222);
    write_placement(&mut w, 0, 0x02, 1, 0);
    w.write_u32(333);
    write_placement(&mut w, 0, 0x02, 2, 0);
    let msg = decode_message(&w.into_bytes()).unwrap().unwrap();

    let Message::SelectUnselectCard { selects, unselects, .. } = msg else {
        panic!("expected an unselect prompt");
    };
    assert_eq!(selects.len(), 1);
    assert_eq!(selects[0].code, 111);
    assert_eq!(unselects.len(), 2);
    assert_eq!(unselects[1].code, 333);
}

#[test]
fn frame_stream_with_unknown_kinds() {
    let mut w = ByteWriter::new();
    w.write_u32(2);
    w.write_u8(40); // new_turn
    w.write_u8(0);
    w.write_u32(1);
    w.write_u8(240); // not a known kind
    w.write_u32(1);
    w.write_u8(74); // chain_end
    let buf = w.into_bytes();

    let frames = split_frames(&buf).unwrap();
    assert_eq!(frames.len(), 3);

    let decoded: Vec<Option<Message>> = frames
        .iter()
        .map(|frame| decode_message(frame).unwrap())
        .collect();
    assert_eq!(decoded[0], Some(Message::NewTurn { player: 0 }));
    assert_eq!(decoded[1], None);
    assert_eq!(decoded[2], Some(Message::ChainEnd {}));
}

#[test]
fn unsupported_kinds_surface_as_errors() {
    let err = decode_message(&[161]).unwrap_err();
    assert!(matches!(err, ProtocolError::UnsupportedMessage(161)));
    assert_eq!(err.to_string(), "message kind 161 has no supported layout");
}

#[test]
fn response_answers_a_prompt() {
    // Prompt offers two positions; the answer picks face-down defense.
    let mut w = ByteWriter::new();
    w.write_u8(19); // select_position
    w.write_u8(0);
    w.write_u32(999);
    w.write_u8(0x9); // FUA | FDD
    let msg = decode_message(&w.into_bytes()).unwrap().unwrap();

    let Message::SelectPosition { positions, .. } = msg else {
        panic!("expected a position prompt");
    };
    assert_eq!(positions, vec![Position::FaceUpAttack, Position::FaceDownDefense]);

    let answer = Response::SelectPosition { position: positions[1] };
    assert_eq!(answer.encode(), 8i32.to_le_bytes().to_vec());
}
