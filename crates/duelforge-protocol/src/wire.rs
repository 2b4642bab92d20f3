//! Engine-side flag sets.
//!
//! The duel engine speaks in packed bit flags: a card's location is a
//! ten-bit mask, a battle position is four bits plus alias masks, a
//! query request is a 25-bit field selector. These newtypes keep those
//! raw integers from leaking into the public message types — everything
//! that crosses to the consumer goes through the dense enums in
//! [`crate::enums`] via the conversions in [`crate::convert`].
//!
//! Associated constants stand in for a bitflags-style API; the flag
//! vocabulary is fixed by the engine ABI and never grows at runtime.

use serde::{Deserialize, Serialize};

macro_rules! flag_ops {
    ($name:ident, $repr:ty) => {
        impl $name {
            /// Raw wire value.
            pub const fn raw(self) -> $repr {
                self.0
            }

            /// True if any bit of `mask` is set in `self`.
            pub const fn contains(self, mask: Self) -> bool {
                self.0 & mask.0 != 0
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// A card location as the engine encodes it: one bit per zone kind.
///
/// A single card normally carries exactly one bit, but cards in the
/// pendulum zones report the spell-zone bit *and* the pendulum-zone bit
/// at once (and field-zone cards similarly), which is why the
/// conversion to [`crate::Location`] checks the overlay bits first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WireLocation(pub u32);

impl WireLocation {
    pub const DECK: Self = Self(0x001);
    pub const HAND: Self = Self(0x002);
    pub const MONSTER_ZONE: Self = Self(0x004);
    pub const SPELL_ZONE: Self = Self(0x008);
    pub const GRAVE: Self = Self(0x010);
    pub const REMOVED: Self = Self(0x020);
    pub const EXTRA: Self = Self(0x040);
    pub const OVERLAY: Self = Self(0x080);
    pub const FIELD_ZONE: Self = Self(0x100);
    pub const PENDULUM_ZONE: Self = Self(0x200);

    /// Monster + spell zones.
    pub const ON_FIELD: Self = Self(0x00c);
    pub const ALL: Self = Self(0x3ff);
}

flag_ops!(WireLocation, u32);

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// A battle position as the engine encodes it.
///
/// Four single-bit positions; the alias masks (`FACE_UP`, `ATTACK`, …)
/// cover two bits each and are only ever used for matching, never as a
/// position value in their own right.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WirePosition(pub u32);

impl WirePosition {
    pub const FACE_UP_ATTACK: Self = Self(0x1);
    pub const FACE_DOWN_ATTACK: Self = Self(0x2);
    pub const FACE_UP_DEFENSE: Self = Self(0x4);
    pub const FACE_DOWN_DEFENSE: Self = Self(0x8);

    pub const FACE_UP: Self = Self(0x5);
    pub const FACE_DOWN: Self = Self(0xa);
    pub const ATTACK: Self = Self(0x3);
    pub const DEFENSE: Self = Self(0xc);
}

flag_ops!(WirePosition, u32);

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// A duel phase as the engine encodes it: one-hot over ten phases,
/// with the battle phase split into five sub-phases.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WirePhase(pub u16);

impl WirePhase {
    pub const DRAW: Self = Self(0x001);
    pub const STANDBY: Self = Self(0x002);
    pub const MAIN1: Self = Self(0x004);
    pub const BATTLE_START: Self = Self(0x008);
    pub const BATTLE_STEP: Self = Self(0x010);
    pub const DAMAGE: Self = Self(0x020);
    pub const DAMAGE_CALCULATION: Self = Self(0x040);
    pub const BATTLE: Self = Self(0x080);
    pub const MAIN2: Self = Self(0x100);
    pub const END: Self = Self(0x200);
}

flag_ops!(WirePhase, u16);

// ---------------------------------------------------------------------------
// Card data words
// ---------------------------------------------------------------------------

/// The packed card-type word from the card database. A monster card
/// sets `MONSTER` plus a frame bit, ability bits, and modifier bits all
/// in the same word; [`crate::card`] decomposes it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TypeFlags(pub u32);

impl TypeFlags {
    pub const MONSTER: Self = Self(0x1);
    pub const SPELL: Self = Self(0x2);
    pub const TRAP: Self = Self(0x4);
    pub const NORMAL: Self = Self(0x10);
    pub const EFFECT: Self = Self(0x20);
    pub const FUSION: Self = Self(0x40);
    pub const RITUAL: Self = Self(0x80);
    pub const TRAP_MONSTER: Self = Self(0x100);
    pub const SPIRIT: Self = Self(0x200);
    pub const UNION: Self = Self(0x400);
    pub const GEMINI: Self = Self(0x800);
    pub const TUNER: Self = Self(0x1000);
    pub const SYNCHRO: Self = Self(0x2000);
    pub const TOKEN: Self = Self(0x4000);
    pub const QUICK_PLAY: Self = Self(0x10000);
    pub const CONTINUOUS: Self = Self(0x20000);
    pub const EQUIP: Self = Self(0x40000);
    pub const FIELD: Self = Self(0x80000);
    pub const COUNTER: Self = Self(0x100000);
    pub const FLIP: Self = Self(0x200000);
    pub const TOON: Self = Self(0x400000);
    pub const XYZ: Self = Self(0x800000);
    pub const PENDULUM: Self = Self(0x1000000);
    pub const SP_SUMMON: Self = Self(0x2000000);
    pub const LINK: Self = Self(0x4000000);
}

flag_ops!(TypeFlags, u32);

/// Monster attribute bits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AttributeFlags(pub u32);

impl AttributeFlags {
    pub const EARTH: Self = Self(0x01);
    pub const WATER: Self = Self(0x02);
    pub const FIRE: Self = Self(0x04);
    pub const WIND: Self = Self(0x08);
    pub const LIGHT: Self = Self(0x10);
    pub const DARK: Self = Self(0x20);
    pub const DIVINE: Self = Self(0x40);
}

flag_ops!(AttributeFlags, u32);

/// Monster type ("race") bits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RaceFlags(pub u32);

impl RaceFlags {
    pub const WARRIOR: Self = Self(0x1);
    pub const SPELLCASTER: Self = Self(0x2);
    pub const FAIRY: Self = Self(0x4);
    pub const FIEND: Self = Self(0x8);
    pub const ZOMBIE: Self = Self(0x10);
    pub const MACHINE: Self = Self(0x20);
    pub const AQUA: Self = Self(0x40);
    pub const PYRO: Self = Self(0x80);
    pub const ROCK: Self = Self(0x100);
    pub const WINGED_BEAST: Self = Self(0x200);
    pub const PLANT: Self = Self(0x400);
    pub const INSECT: Self = Self(0x800);
    pub const THUNDER: Self = Self(0x1000);
    pub const DRAGON: Self = Self(0x2000);
    pub const BEAST: Self = Self(0x4000);
    pub const BEAST_WARRIOR: Self = Self(0x8000);
    pub const DINOSAUR: Self = Self(0x10000);
    pub const FISH: Self = Self(0x20000);
    pub const SEA_SERPENT: Self = Self(0x40000);
    pub const REPTILE: Self = Self(0x80000);
    pub const PSYCHIC: Self = Self(0x100000);
    pub const DIVINE: Self = Self(0x200000);
    pub const CREATOR_GOD: Self = Self(0x400000);
    pub const WYRM: Self = Self(0x800000);
    pub const CYBERSE: Self = Self(0x1000000);
}

flag_ops!(RaceFlags, u32);

/// Link arrow bits. Bit 4 sits in the middle of the 3x3 grid and is
/// never set on a real card.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LinkMarkerFlags(pub u32);

impl LinkMarkerFlags {
    pub const BOTTOM_LEFT: Self = Self(0x001);
    pub const BOTTOM: Self = Self(0x002);
    pub const BOTTOM_RIGHT: Self = Self(0x004);
    pub const LEFT: Self = Self(0x008);
    pub const UNUSED: Self = Self(0x010);
    pub const RIGHT: Self = Self(0x020);
    pub const TOP_LEFT: Self = Self(0x040);
    pub const TOP: Self = Self(0x080);
    pub const TOP_RIGHT: Self = Self(0x100);
}

flag_ops!(LinkMarkerFlags, u32);

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// A card-query field selector. Requests OR several fields together;
/// responses tag each record with the single field it carries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct QueryField(pub u32);

impl QueryField {
    pub const CODE: Self = Self(1 << 0);
    pub const POSITION: Self = Self(1 << 1);
    pub const ALIAS: Self = Self(1 << 2);
    pub const TYPE: Self = Self(1 << 3);
    pub const LEVEL: Self = Self(1 << 4);
    pub const RANK: Self = Self(1 << 5);
    pub const ATTRIBUTE: Self = Self(1 << 6);
    pub const RACE: Self = Self(1 << 7);
    pub const ATTACK: Self = Self(1 << 8);
    pub const DEFENSE: Self = Self(1 << 9);
    pub const BASE_ATTACK: Self = Self(1 << 10);
    pub const BASE_DEFENSE: Self = Self(1 << 11);
    pub const REASON: Self = Self(1 << 12);
    pub const REASON_CARD: Self = Self(1 << 13);
    pub const EQUIP_CARD: Self = Self(1 << 14);
    pub const TARGET_CARD: Self = Self(1 << 15);
    pub const OVERLAY_CARD: Self = Self(1 << 16);
    pub const COUNTERS: Self = Self(1 << 17);
    pub const OWNER: Self = Self(1 << 18);
    pub const STATUS: Self = Self(1 << 19);
    pub const IS_PUBLIC: Self = Self(1 << 20);
    pub const LEFT_SCALE: Self = Self(1 << 21);
    pub const RIGHT_SCALE: Self = Self(1 << 22);
    pub const LINK: Self = Self(1 << 23);
    pub const IS_HIDDEN: Self = Self(1 << 24);
    pub const COVER: Self = Self(1 << 25);

    /// Terminator field-id in per-slot query buffers.
    pub const END: Self = Self(0x8000_0000);
}

flag_ops!(QueryField, u32);

// ---------------------------------------------------------------------------
// Duel modes
// ---------------------------------------------------------------------------

/// Rule flags passed when creating a duel. The presets compose the
/// individual bits into the historical master-rule revisions.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DuelMode(pub u32);

impl DuelMode {
    pub const TEST_MODE: Self = Self(0x01);
    pub const ATTACK_FIRST_TURN: Self = Self(0x02);
    pub const USE_TRAPS_IN_NEW_CHAIN: Self = Self(0x04);
    pub const SIX_STEP_BATTLE_STEP: Self = Self(0x08);
    pub const PSEUDO_SHUFFLE: Self = Self(0x10);
    pub const TRIGGER_WHEN_PRIVATE_KNOWLEDGE: Self = Self(0x20);
    pub const SIMPLE_AI: Self = Self(0x40);
    pub const RELAY: Self = Self(0x80);
    pub const OBSOLETE_IGNITION: Self = Self(0x100);
    pub const FIRST_TURN_DRAW: Self = Self(0x200);
    pub const ONE_FACEUP_FIELD: Self = Self(0x400);
    pub const PENDULUM_ZONE: Self = Self(0x800);
    pub const SEPARATE_PENDULUM_ZONE: Self = Self(0x1000);
    pub const EXTRA_MONSTER_ZONE: Self = Self(0x2000);
    pub const FSX_MMZONE: Self = Self(0x4000);
    pub const TRAP_MONSTERS_NOT_USE_ZONE: Self = Self(0x8000);
    pub const RETURN_TO_EXTRA_DECK_TRIGGERS: Self = Self(0x10000);
    pub const TRIGGER_ONLY_IN_LOCATION: Self = Self(0x20000);
    pub const SPSUMMON_ONCE_OLD_NEGATE: Self = Self(0x40000);
    pub const CANNOT_SUMMON_OATH_OLD: Self = Self(0x80000);
    pub const NO_STANDBY_PHASE: Self = Self(0x100000);
    pub const NO_MAIN_PHASE_2: Self = Self(0x200000);
    pub const THREE_COLUMNS_FIELD: Self = Self(0x400000);
    pub const DRAW_UNTIL_5: Self = Self(0x800000);
    pub const NO_HAND_LIMIT: Self = Self(0x1000000);
    pub const UNLIMITED_SUMMONS: Self = Self(0x2000000);
    pub const INVERTED_QUICK_PRIORITY: Self = Self(0x4000000);
    pub const EQUIP_NOT_SENT_IF_MISSING_TARGET: Self = Self(0x8000000);
    pub const ZERO_ATK_DESTROYED: Self = Self(0x10000000);
    pub const STORE_ATTACK_REPLAYS: Self = Self(0x20000000);
    pub const SINGLE_CHAIN_IN_DAMAGE_SUB_STEP: Self = Self(0x40000000);
    pub const REPOS_AFTER_CONTROL_SWITCH: Self = Self(0x80000000);

    pub const SPEED: Self = Self(
        Self::THREE_COLUMNS_FIELD.0
            | Self::NO_MAIN_PHASE_2.0
            | Self::TRIGGER_ONLY_IN_LOCATION.0,
    );
    pub const RUSH: Self = Self(
        Self::THREE_COLUMNS_FIELD.0
            | Self::NO_MAIN_PHASE_2.0
            | Self::NO_STANDBY_PHASE.0
            | Self::FIRST_TURN_DRAW.0
            | Self::INVERTED_QUICK_PRIORITY.0
            | Self::DRAW_UNTIL_5.0
            | Self::NO_HAND_LIMIT.0
            | Self::UNLIMITED_SUMMONS.0
            | Self::TRIGGER_ONLY_IN_LOCATION.0,
    );
    pub const MR1: Self = Self(
        Self::OBSOLETE_IGNITION.0
            | Self::FIRST_TURN_DRAW.0
            | Self::ONE_FACEUP_FIELD.0
            | Self::SPSUMMON_ONCE_OLD_NEGATE.0
            | Self::RETURN_TO_EXTRA_DECK_TRIGGERS.0
            | Self::CANNOT_SUMMON_OATH_OLD.0,
    );
    pub const GOAT: Self = Self(
        Self::MR1.0
            | Self::USE_TRAPS_IN_NEW_CHAIN.0
            | Self::SIX_STEP_BATTLE_STEP.0
            | Self::TRIGGER_WHEN_PRIVATE_KNOWLEDGE.0
            | Self::EQUIP_NOT_SENT_IF_MISSING_TARGET.0
            | Self::ZERO_ATK_DESTROYED.0
            | Self::STORE_ATTACK_REPLAYS.0
            | Self::SINGLE_CHAIN_IN_DAMAGE_SUB_STEP.0
            | Self::REPOS_AFTER_CONTROL_SWITCH.0,
    );
    pub const MR2: Self = Self(
        Self::FIRST_TURN_DRAW.0
            | Self::ONE_FACEUP_FIELD.0
            | Self::SPSUMMON_ONCE_OLD_NEGATE.0
            | Self::RETURN_TO_EXTRA_DECK_TRIGGERS.0
            | Self::CANNOT_SUMMON_OATH_OLD.0,
    );
    pub const MR3: Self = Self(
        Self::PENDULUM_ZONE.0
            | Self::SEPARATE_PENDULUM_ZONE.0
            | Self::SPSUMMON_ONCE_OLD_NEGATE.0
            | Self::RETURN_TO_EXTRA_DECK_TRIGGERS.0
            | Self::CANNOT_SUMMON_OATH_OLD.0,
    );
    pub const MR4: Self = Self(
        Self::PENDULUM_ZONE.0
            | Self::EXTRA_MONSTER_ZONE.0
            | Self::SPSUMMON_ONCE_OLD_NEGATE.0
            | Self::RETURN_TO_EXTRA_DECK_TRIGGERS.0
            | Self::CANNOT_SUMMON_OATH_OLD.0,
    );
    pub const MR5: Self = Self(
        Self::PENDULUM_ZONE.0
            | Self::EXTRA_MONSTER_ZONE.0
            | Self::FSX_MMZONE.0
            | Self::TRAP_MONSTERS_NOT_USE_ZONE.0
            | Self::TRIGGER_ONLY_IN_LOCATION.0,
    );
}

flag_ops!(DuelMode, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_masks_match_single_bits() {
        assert!(WirePosition::FACE_UP.contains(WirePosition::FACE_UP_ATTACK));
        assert!(WirePosition::FACE_UP.contains(WirePosition::FACE_UP_DEFENSE));
        assert!(!WirePosition::FACE_UP.contains(WirePosition::FACE_DOWN_ATTACK));
        assert!(WirePosition::DEFENSE.contains(WirePosition::FACE_DOWN_DEFENSE));
    }

    #[test]
    fn mode_presets_compose() {
        assert!(DuelMode::MR5.contains(DuelMode::EXTRA_MONSTER_ZONE));
        assert!(DuelMode::MR5.contains(DuelMode::PENDULUM_ZONE));
        assert!(!DuelMode::MR1.contains(DuelMode::PENDULUM_ZONE));
        assert!(DuelMode::GOAT.contains(DuelMode::OBSOLETE_IGNITION));

        let custom = DuelMode::MR5 | DuelMode::TEST_MODE;
        assert!(custom.contains(DuelMode::TEST_MODE));
        assert!(custom.contains(DuelMode::FSX_MMZONE));
    }

    #[test]
    fn on_field_covers_both_zones() {
        assert!(WireLocation::ON_FIELD.contains(WireLocation::MONSTER_ZONE));
        assert!(WireLocation::ON_FIELD.contains(WireLocation::SPELL_ZONE));
        assert!(!WireLocation::ON_FIELD.contains(WireLocation::DECK));
    }
}
