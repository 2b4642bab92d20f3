//! Conversions between the engine's flag sets and the public enums.
//!
//! Every conversion here is total: unknown wire values map to the
//! `Unknown` sentinel, and `Unknown` maps back to wire zero. Nothing in
//! this module can panic on engine input.

use crate::enums::{DetailedPhase, Location, Phase, Position};
use crate::wire::{WireLocation, WirePhase, WirePosition};

impl Location {
    /// Decodes a wire location mask.
    ///
    /// The pendulum-zone and field-zone bits are checked before the
    /// exact match: a card in a pendulum zone reports the spell-zone
    /// bit *and* the pendulum-zone bit, and the overlay bit wins.
    pub fn from_wire(wire: WireLocation) -> Self {
        if wire.contains(WireLocation::PENDULUM_ZONE) {
            return Self::PendulumZone;
        }
        if wire.contains(WireLocation::FIELD_ZONE) {
            return Self::FieldZone;
        }
        match wire {
            WireLocation::DECK => Self::Deck,
            WireLocation::HAND => Self::Hand,
            WireLocation::GRAVE => Self::Grave,
            WireLocation::REMOVED => Self::Banished,
            WireLocation::EXTRA => Self::ExtraDeck,
            WireLocation::OVERLAY => Self::Overlay,
            WireLocation::MONSTER_ZONE => Self::MonsterZone,
            WireLocation::SPELL_ZONE => Self::SpellZone,
            _ => Self::Unknown,
        }
    }

    pub fn to_wire(self) -> WireLocation {
        match self {
            Self::Deck => WireLocation::DECK,
            Self::Hand => WireLocation::HAND,
            Self::Grave => WireLocation::GRAVE,
            Self::Banished => WireLocation::REMOVED,
            Self::ExtraDeck => WireLocation::EXTRA,
            Self::Overlay => WireLocation::OVERLAY,
            Self::MonsterZone => WireLocation::MONSTER_ZONE,
            Self::SpellZone => WireLocation::SPELL_ZONE,
            Self::FieldZone => WireLocation::FIELD_ZONE,
            Self::PendulumZone => WireLocation::PENDULUM_ZONE,
            Self::Unknown => WireLocation(0),
        }
    }
}

impl Position {
    pub fn from_wire(wire: WirePosition) -> Self {
        match wire {
            WirePosition::FACE_UP_ATTACK => Self::FaceUpAttack,
            WirePosition::FACE_DOWN_ATTACK => Self::FaceDownAttack,
            WirePosition::FACE_UP_DEFENSE => Self::FaceUpDefense,
            WirePosition::FACE_DOWN_DEFENSE => Self::FaceDownDefense,
            _ => Self::Unknown,
        }
    }

    pub fn to_wire(self) -> WirePosition {
        match self {
            Self::FaceUpAttack => WirePosition::FACE_UP_ATTACK,
            Self::FaceDownAttack => WirePosition::FACE_DOWN_ATTACK,
            Self::FaceUpDefense => WirePosition::FACE_UP_DEFENSE,
            Self::FaceDownDefense => WirePosition::FACE_DOWN_DEFENSE,
            Self::Unknown => WirePosition(0),
        }
    }

    /// Expands a multi-bit position mask (as sent by position-selection
    /// prompts) into the individual allowed positions.
    pub fn set_from_wire(wire: WirePosition) -> Vec<Self> {
        let mut positions = Vec::new();
        if wire.contains(WirePosition::FACE_UP_ATTACK) {
            positions.push(Self::FaceUpAttack);
        }
        if wire.contains(WirePosition::FACE_DOWN_ATTACK) {
            positions.push(Self::FaceDownAttack);
        }
        if wire.contains(WirePosition::FACE_UP_DEFENSE) {
            positions.push(Self::FaceUpDefense);
        }
        if wire.contains(WirePosition::FACE_DOWN_DEFENSE) {
            positions.push(Self::FaceDownDefense);
        }
        positions
    }
}

impl Phase {
    /// Decodes a one-hot phase word. The five battle sub-phases all
    /// collapse into the coarse battle phase.
    pub fn from_wire(wire: WirePhase) -> Self {
        match wire {
            WirePhase::DRAW => Self::Draw,
            WirePhase::STANDBY => Self::Standby,
            WirePhase::MAIN1 => Self::Main1,
            WirePhase::BATTLE_START
            | WirePhase::BATTLE_STEP
            | WirePhase::DAMAGE
            | WirePhase::DAMAGE_CALCULATION
            | WirePhase::BATTLE => Self::Battle,
            WirePhase::MAIN2 => Self::Main2,
            WirePhase::END => Self::End,
            _ => Self::Unknown,
        }
    }
}

impl DetailedPhase {
    pub fn from_wire(wire: WirePhase) -> Self {
        match wire {
            WirePhase::DRAW => Self::Draw,
            WirePhase::STANDBY => Self::Standby,
            WirePhase::MAIN1 => Self::Main1,
            WirePhase::BATTLE_START => Self::BattleStart,
            WirePhase::BATTLE_STEP => Self::BattleStep,
            WirePhase::DAMAGE => Self::Damage,
            WirePhase::DAMAGE_CALCULATION => Self::DamageCalculation,
            WirePhase::BATTLE => Self::Battle,
            WirePhase::MAIN2 => Self::Main2,
            WirePhase::END => Self::End,
            _ => Self::Unknown,
        }
    }
}
