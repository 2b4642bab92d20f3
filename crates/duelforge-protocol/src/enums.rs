//! Public enumerations.
//!
//! These are the dense, JSON-friendly views of the engine's bit flags:
//! one variant per meaning, `snake_case` on the wire, with an `Unknown`
//! sentinel where the engine can hand us a value the conversion tables
//! don't cover. Consumers of the message stream only ever see these
//! types; the raw flags stay inside the protocol layer.

use serde::{Deserialize, Serialize};

/// Where a card is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Unknown,
    Deck,
    Hand,
    Grave,
    Banished,
    ExtraDeck,
    Overlay,
    MonsterZone,
    SpellZone,
    FieldZone,
    PendulumZone,
}

impl Location {
    pub fn on_field(self) -> bool {
        matches!(
            self,
            Self::MonsterZone | Self::SpellZone | Self::FieldZone | Self::PendulumZone
        )
    }

    /// True for the two extra monster zones shared between players.
    pub fn is_extra_monster_zone(self, sequence: u32) -> bool {
        self == Self::MonsterZone && (sequence == 5 || sequence == 6)
    }
}

/// A card's full battle position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Unknown,
    FaceUpAttack,
    FaceDownAttack,
    FaceUpDefense,
    FaceDownDefense,
}

impl Position {
    /// Attack/defense projection.
    pub fn battle(self) -> BattlePosition {
        match self {
            Self::FaceUpAttack | Self::FaceDownAttack => BattlePosition::Attack,
            Self::FaceUpDefense | Self::FaceDownDefense => BattlePosition::Defense,
            Self::Unknown => BattlePosition::Unknown,
        }
    }

    /// Face-up/face-down projection.
    pub fn face(self) -> FacePosition {
        match self {
            Self::FaceUpAttack | Self::FaceUpDefense => FacePosition::Up,
            Self::FaceDownAttack | Self::FaceDownDefense => FacePosition::Down,
            Self::Unknown => FacePosition::Unknown,
        }
    }

    pub fn is_face_up(self) -> bool {
        self.face() == FacePosition::Up
    }

    pub fn is_face_down(self) -> bool {
        self.face() == FacePosition::Down
    }

    pub fn is_attack(self) -> bool {
        self.battle() == BattlePosition::Attack
    }

    pub fn is_defense(self) -> bool {
        self.battle() == BattlePosition::Defense
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BattlePosition {
    Unknown,
    Attack,
    Defense,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FacePosition {
    Unknown,
    Up,
    Down,
}

/// The coarse six-phase view of a turn. The engine's five battle
/// sub-phases all collapse into `Battle` here; use [`DetailedPhase`]
/// when the sub-phase matters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Unknown,
    #[serde(rename = "dp")]
    Draw,
    #[serde(rename = "sp")]
    Standby,
    #[serde(rename = "m1")]
    Main1,
    #[serde(rename = "bp")]
    Battle,
    #[serde(rename = "m2")]
    Main2,
    #[serde(rename = "ep")]
    End,
}

/// The full ten-phase view of a turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DetailedPhase {
    Unknown,
    Draw,
    Standby,
    Main1,
    BattleStart,
    BattleStep,
    Damage,
    DamageCalculation,
    Battle,
    Main2,
    End,
}

// ---------------------------------------------------------------------------
// Card classification
// ---------------------------------------------------------------------------

/// A card's primary kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Monster,
    Spell,
    Trap,
    Token,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardSpellType {
    Normal,
    QuickPlay,
    Continuous,
    Equip,
    Field,
    Ritual,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardTrapType {
    Normal,
    Counter,
    Continuous,
}

/// A monster card's frame (summoning mechanic / card colour).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardMonsterFrame {
    Normal,
    Effect,
    Fusion,
    Ritual,
    Synchro,
    Xyz,
    Link,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardMonsterAbility {
    None,
    Toon,
    Spirit,
    Union,
    Gemini,
    Flip,
}

/// A monster card's type line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardMonsterType {
    Warrior,
    Spellcaster,
    Fairy,
    Fiend,
    Zombie,
    Machine,
    Aqua,
    Pyro,
    Rock,
    WingedBeast,
    Plant,
    Insect,
    Thunder,
    Dragon,
    Beast,
    BeastWarrior,
    Dinosaur,
    Fish,
    SeaSerpent,
    Reptile,
    Psychic,
    Divine,
    CreatorGod,
    Wyrm,
    Cyberse,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardMonsterAttribute {
    Earth,
    Water,
    Fire,
    Wind,
    Light,
    Dark,
    Divine,
}

/// Link arrows, compass order clockwise from top-left.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardLinkMarker {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

// ---------------------------------------------------------------------------
// Board layout
// ---------------------------------------------------------------------------

/// The canonical 15-slot per-player board layout: five main monster
/// zones, the two shared extra monster zones, five spell zones, the
/// field zone, and the two pendulum zones. Place-flag decoding emits
/// places in this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldPlace {
    Monster1,
    Monster2,
    Monster3,
    Monster4,
    Monster5,
    MonsterExtra1,
    MonsterExtra2,
    Spell0,
    Spell1,
    Spell2,
    Spell3,
    Spell4,
    SpellField,
    SpellPendulum1,
    SpellPendulum2,
}

impl FieldPlace {
    /// The location half of this slot.
    pub fn location(self) -> Location {
        match self {
            Self::Monster1
            | Self::Monster2
            | Self::Monster3
            | Self::Monster4
            | Self::Monster5
            | Self::MonsterExtra1
            | Self::MonsterExtra2 => Location::MonsterZone,
            Self::Spell0 | Self::Spell1 | Self::Spell2 | Self::Spell3 | Self::Spell4 => {
                Location::SpellZone
            }
            Self::SpellField => Location::FieldZone,
            Self::SpellPendulum1 | Self::SpellPendulum2 => Location::PendulumZone,
        }
    }

    /// The zone sequence within the location. Pendulum zones carry the
    /// public sequences 6 and 7.
    pub fn sequence(self) -> u32 {
        match self {
            Self::Monster1 | Self::Spell0 | Self::SpellField => 0,
            Self::Monster2 | Self::Spell1 => 1,
            Self::Monster3 | Self::Spell2 => 2,
            Self::Monster4 | Self::Spell3 => 3,
            Self::Monster5 | Self::Spell4 => 4,
            Self::MonsterExtra1 => 5,
            Self::MonsterExtra2 | Self::SpellPendulum1 => 6,
            Self::SpellPendulum2 => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_projections() {
        assert_eq!(Position::FaceDownDefense.battle(), BattlePosition::Defense);
        assert_eq!(Position::FaceDownDefense.face(), FacePosition::Down);
        assert!(Position::FaceUpAttack.is_face_up());
        assert!(Position::FaceUpAttack.is_attack());
        assert_eq!(Position::Unknown.battle(), BattlePosition::Unknown);
    }

    #[test]
    fn extra_monster_zone_sequences() {
        assert!(Location::MonsterZone.is_extra_monster_zone(5));
        assert!(Location::MonsterZone.is_extra_monster_zone(6));
        assert!(!Location::MonsterZone.is_extra_monster_zone(4));
        assert!(!Location::SpellZone.is_extra_monster_zone(5));
    }

    #[test]
    fn phase_wire_names() {
        let json = serde_json::to_string(&Phase::Main1).unwrap();
        assert_eq!(json, "\"m1\"");
        let json = serde_json::to_string(&Phase::Battle).unwrap();
        assert_eq!(json, "\"bp\"");
        let back: Phase = serde_json::from_str("\"ep\"").unwrap();
        assert_eq!(back, Phase::End);
    }

    #[test]
    fn field_place_coordinates() {
        assert_eq!(FieldPlace::MonsterExtra1.location(), Location::MonsterZone);
        assert_eq!(FieldPlace::MonsterExtra1.sequence(), 5);
        assert_eq!(FieldPlace::SpellPendulum1.location(), Location::PendulumZone);
        assert_eq!(FieldPlace::SpellPendulum1.sequence(), 6);
        assert_eq!(FieldPlace::SpellField.location(), Location::FieldZone);
    }
}
