//! Board places and place-selection flag decoding.

use serde::{Deserialize, Serialize};

use crate::enums::{FieldPlace, Location};

/// A single zone on the board, addressed by owner, location, and
/// sequence within that location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    pub player: u8,
    pub location: Location,
    pub sequence: u32,
}

impl Place {
    pub fn new(player: u8, location: Location, sequence: u32) -> Self {
        Self { player, location, sequence }
    }

    pub fn field_place(self) -> Option<FieldPlace> {
        HALF_BITS
            .iter()
            .find(|(_, place)| {
                place.location() == self.location && place.sequence() == self.sequence
            })
            .map(|(_, place)| *place)
    }
}

/// One player's half of the place flag. Bit 7 is reserved; bits beyond
/// the pendulum zones are ignored.
const HALF_BITS: [(u32, FieldPlace); 15] = [
    (1 << 0, FieldPlace::Monster1),
    (1 << 1, FieldPlace::Monster2),
    (1 << 2, FieldPlace::Monster3),
    (1 << 3, FieldPlace::Monster4),
    (1 << 4, FieldPlace::Monster5),
    (1 << 5, FieldPlace::MonsterExtra1),
    (1 << 6, FieldPlace::MonsterExtra2),
    (1 << 8, FieldPlace::Spell0),
    (1 << 9, FieldPlace::Spell1),
    (1 << 10, FieldPlace::Spell2),
    (1 << 11, FieldPlace::Spell3),
    (1 << 12, FieldPlace::Spell4),
    (1 << 13, FieldPlace::SpellField),
    (1 << 14, FieldPlace::SpellPendulum1),
    (1 << 15, FieldPlace::SpellPendulum2),
];

/// Decodes the 32-bit flag carried by place-selection prompts into the
/// zones the player may pick.
///
/// The low half of the word describes player 0, the high half player 1,
/// and within each half a *cleared* bit marks an available zone.
pub fn decode_place_flag(flag: u32) -> Vec<Place> {
    let mut places = Vec::new();
    for (player, half) in [(0u8, flag & 0xffff), (1u8, flag >> 16)] {
        for (bit, field_place) in HALF_BITS {
            if half & bit == 0 {
                places.push(Place::new(
                    player,
                    field_place.location(),
                    field_place.sequence(),
                ));
            }
        }
    }
    places
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zones_available_when_flag_clear() {
        let places = decode_place_flag(0);
        assert_eq!(places.len(), 30);
        // Player 0's slots come first, in board order.
        assert_eq!(places[0], Place::new(0, Location::MonsterZone, 0));
        assert_eq!(places[5], Place::new(0, Location::MonsterZone, 5));
        assert_eq!(places[7], Place::new(0, Location::SpellZone, 0));
        assert_eq!(places[12], Place::new(0, Location::FieldZone, 0));
        assert_eq!(places[13], Place::new(0, Location::PendulumZone, 6));
        assert_eq!(places[14], Place::new(0, Location::PendulumZone, 7));
        assert_eq!(places[15], Place::new(1, Location::MonsterZone, 0));
    }

    #[test]
    fn set_bits_remove_zones() {
        // Everything blocked except player 0's third monster zone.
        let flag = !(1u32 << 2);
        let places = decode_place_flag(flag);
        assert_eq!(places, vec![Place::new(0, Location::MonsterZone, 2)]);
    }

    #[test]
    fn reserved_bit_is_ignored() {
        // Bit 7 of each half maps to no zone.
        let open = decode_place_flag(0).len();
        let with_reserved = decode_place_flag((1 << 7) | (1 << 23)).len();
        assert_eq!(open, with_reserved);
    }

    #[test]
    fn high_half_is_player_one() {
        let flag = !(1u32 << (16 + 13)); // only player 1's field zone open
        let places = decode_place_flag(flag);
        assert_eq!(places, vec![Place::new(1, Location::FieldZone, 0)]);
    }

    #[test]
    fn place_maps_back_to_field_place() {
        let place = Place::new(0, Location::PendulumZone, 6);
        assert_eq!(place.field_place(), Some(FieldPlace::SpellPendulum1));
        let nowhere = Place::new(0, Location::Grave, 0);
        assert_eq!(nowhere.field_place(), None);
    }
}
