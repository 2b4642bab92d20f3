//! Card data and decomposition of the packed type word.
//!
//! The card database stores a card's whole classification in a single
//! 32-bit word: primary kind, monster frame, abilities, and modifiers
//! all share it. [`RawCardData`] is the record the engine's card-reader
//! callback must fill; the functions here break the packed words apart
//! into the public enums.

use serde::{Deserialize, Serialize};

use crate::enums::{
    CardLinkMarker, CardMonsterAbility, CardMonsterAttribute, CardMonsterFrame,
    CardMonsterType, CardSpellType, CardTrapType, CardType,
};
use crate::wire::{AttributeFlags, LinkMarkerFlags, RaceFlags, TypeFlags};

/// Raw card data as the engine's card reader supplies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCardData {
    pub code: u32,
    pub alias: u32,
    pub set_codes: Vec<u16>,
    pub card_type: TypeFlags,
    pub level: u32,
    pub attribute: AttributeFlags,
    pub race: RaceFlags,
    pub attack: i32,
    pub defense: i32,
    pub left_scale: u32,
    pub right_scale: u32,
    pub link_marker: LinkMarkerFlags,
}

impl RawCardData {
    pub fn primary_type(&self) -> Option<CardType> {
        CardType::from_flags(self.card_type)
    }
}

impl CardType {
    /// The card's primary kind. Tokens carry the monster bit too, so
    /// the token bit is checked first.
    pub fn from_flags(flags: TypeFlags) -> Option<Self> {
        if flags.contains(TypeFlags::TOKEN) {
            Some(Self::Token)
        } else if flags.contains(TypeFlags::MONSTER) {
            Some(Self::Monster)
        } else if flags.contains(TypeFlags::SPELL) {
            Some(Self::Spell)
        } else if flags.contains(TypeFlags::TRAP) {
            Some(Self::Trap)
        } else {
            None
        }
    }
}

impl CardMonsterFrame {
    pub fn from_flags(flags: TypeFlags) -> Self {
        if flags.contains(TypeFlags::LINK) {
            Self::Link
        } else if flags.contains(TypeFlags::XYZ) {
            Self::Xyz
        } else if flags.contains(TypeFlags::SYNCHRO) {
            Self::Synchro
        } else if flags.contains(TypeFlags::RITUAL) {
            Self::Ritual
        } else if flags.contains(TypeFlags::FUSION) {
            Self::Fusion
        } else if flags.contains(TypeFlags::EFFECT) {
            Self::Effect
        } else {
            Self::Normal
        }
    }
}

impl CardMonsterAbility {
    pub fn from_flags(flags: TypeFlags) -> Self {
        if flags.contains(TypeFlags::TOON) {
            Self::Toon
        } else if flags.contains(TypeFlags::SPIRIT) {
            Self::Spirit
        } else if flags.contains(TypeFlags::UNION) {
            Self::Union
        } else if flags.contains(TypeFlags::GEMINI) {
            Self::Gemini
        } else if flags.contains(TypeFlags::FLIP) {
            Self::Flip
        } else {
            Self::None
        }
    }
}

impl CardSpellType {
    pub fn from_flags(flags: TypeFlags) -> Self {
        if flags.contains(TypeFlags::QUICK_PLAY) {
            Self::QuickPlay
        } else if flags.contains(TypeFlags::CONTINUOUS) {
            Self::Continuous
        } else if flags.contains(TypeFlags::EQUIP) {
            Self::Equip
        } else if flags.contains(TypeFlags::FIELD) {
            Self::Field
        } else if flags.contains(TypeFlags::RITUAL) {
            Self::Ritual
        } else {
            Self::Normal
        }
    }
}

impl CardTrapType {
    pub fn from_flags(flags: TypeFlags) -> Self {
        if flags.contains(TypeFlags::COUNTER) {
            Self::Counter
        } else if flags.contains(TypeFlags::CONTINUOUS) {
            Self::Continuous
        } else {
            Self::Normal
        }
    }
}

impl TypeFlags {
    pub fn is_tuner(self) -> bool {
        self.contains(Self::TUNER)
    }

    pub fn is_pendulum(self) -> bool {
        self.contains(Self::PENDULUM)
    }
}

// ---------------------------------------------------------------------------
// Mask-to-list decoders
// ---------------------------------------------------------------------------

impl CardMonsterAttribute {
    /// Expands an attribute mask into the attributes it names, in
    /// declaration order.
    pub fn list_from_flags(flags: AttributeFlags) -> Vec<Self> {
        const TABLE: [(AttributeFlags, CardMonsterAttribute); 7] = [
            (AttributeFlags::EARTH, CardMonsterAttribute::Earth),
            (AttributeFlags::WATER, CardMonsterAttribute::Water),
            (AttributeFlags::FIRE, CardMonsterAttribute::Fire),
            (AttributeFlags::WIND, CardMonsterAttribute::Wind),
            (AttributeFlags::LIGHT, CardMonsterAttribute::Light),
            (AttributeFlags::DARK, CardMonsterAttribute::Dark),
            (AttributeFlags::DIVINE, CardMonsterAttribute::Divine),
        ];
        TABLE
            .iter()
            .filter(|(bit, _)| flags.contains(*bit))
            .map(|(_, attr)| *attr)
            .collect()
    }
}

impl CardMonsterType {
    pub fn list_from_flags(flags: RaceFlags) -> Vec<Self> {
        const TABLE: [(RaceFlags, CardMonsterType); 25] = [
            (RaceFlags::WARRIOR, CardMonsterType::Warrior),
            (RaceFlags::SPELLCASTER, CardMonsterType::Spellcaster),
            (RaceFlags::FAIRY, CardMonsterType::Fairy),
            (RaceFlags::FIEND, CardMonsterType::Fiend),
            (RaceFlags::ZOMBIE, CardMonsterType::Zombie),
            (RaceFlags::MACHINE, CardMonsterType::Machine),
            (RaceFlags::AQUA, CardMonsterType::Aqua),
            (RaceFlags::PYRO, CardMonsterType::Pyro),
            (RaceFlags::ROCK, CardMonsterType::Rock),
            (RaceFlags::WINGED_BEAST, CardMonsterType::WingedBeast),
            (RaceFlags::PLANT, CardMonsterType::Plant),
            (RaceFlags::INSECT, CardMonsterType::Insect),
            (RaceFlags::THUNDER, CardMonsterType::Thunder),
            (RaceFlags::DRAGON, CardMonsterType::Dragon),
            (RaceFlags::BEAST, CardMonsterType::Beast),
            (RaceFlags::BEAST_WARRIOR, CardMonsterType::BeastWarrior),
            (RaceFlags::DINOSAUR, CardMonsterType::Dinosaur),
            (RaceFlags::FISH, CardMonsterType::Fish),
            (RaceFlags::SEA_SERPENT, CardMonsterType::SeaSerpent),
            (RaceFlags::REPTILE, CardMonsterType::Reptile),
            (RaceFlags::PSYCHIC, CardMonsterType::Psychic),
            (RaceFlags::DIVINE, CardMonsterType::Divine),
            (RaceFlags::CREATOR_GOD, CardMonsterType::CreatorGod),
            (RaceFlags::WYRM, CardMonsterType::Wyrm),
            (RaceFlags::CYBERSE, CardMonsterType::Cyberse),
        ];
        TABLE
            .iter()
            .filter(|(bit, _)| flags.contains(*bit))
            .map(|(_, race)| *race)
            .collect()
    }
}

impl CardLinkMarker {
    /// Expands a link-arrow mask, compass order clockwise from
    /// top-left. The wire bit order differs from the public order.
    pub fn list_from_flags(flags: LinkMarkerFlags) -> Vec<Self> {
        const TABLE: [(LinkMarkerFlags, CardLinkMarker); 8] = [
            (LinkMarkerFlags::TOP_LEFT, CardLinkMarker::TopLeft),
            (LinkMarkerFlags::TOP, CardLinkMarker::Top),
            (LinkMarkerFlags::TOP_RIGHT, CardLinkMarker::TopRight),
            (LinkMarkerFlags::RIGHT, CardLinkMarker::Right),
            (LinkMarkerFlags::BOTTOM_RIGHT, CardLinkMarker::BottomRight),
            (LinkMarkerFlags::BOTTOM, CardLinkMarker::Bottom),
            (LinkMarkerFlags::BOTTOM_LEFT, CardLinkMarker::BottomLeft),
            (LinkMarkerFlags::LEFT, CardLinkMarker::Left),
        ];
        TABLE
            .iter()
            .filter(|(bit, _)| flags.contains(*bit))
            .map(|(_, marker)| *marker)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_beats_monster() {
        let flags = TypeFlags::MONSTER | TypeFlags::TOKEN;
        assert_eq!(CardType::from_flags(flags), Some(CardType::Token));
        assert_eq!(CardType::from_flags(TypeFlags::MONSTER), Some(CardType::Monster));
        assert_eq!(CardType::from_flags(TypeFlags(0)), None);
    }

    #[test]
    fn frame_precedence() {
        // A link monster also carries the effect bit; link wins.
        let flags = TypeFlags::MONSTER | TypeFlags::EFFECT | TypeFlags::LINK;
        assert_eq!(CardMonsterFrame::from_flags(flags), CardMonsterFrame::Link);

        let flags = TypeFlags::MONSTER | TypeFlags::EFFECT | TypeFlags::XYZ;
        assert_eq!(CardMonsterFrame::from_flags(flags), CardMonsterFrame::Xyz);

        let flags = TypeFlags::MONSTER | TypeFlags::NORMAL;
        assert_eq!(CardMonsterFrame::from_flags(flags), CardMonsterFrame::Normal);
    }

    #[test]
    fn spell_and_trap_subtypes() {
        let flags = TypeFlags::SPELL | TypeFlags::QUICK_PLAY;
        assert_eq!(CardSpellType::from_flags(flags), CardSpellType::QuickPlay);
        assert_eq!(CardSpellType::from_flags(TypeFlags::SPELL), CardSpellType::Normal);

        let flags = TypeFlags::TRAP | TypeFlags::COUNTER;
        assert_eq!(CardTrapType::from_flags(flags), CardTrapType::Counter);
        // The continuous bit is shared between spells and traps.
        let flags = TypeFlags::TRAP | TypeFlags::CONTINUOUS;
        assert_eq!(CardTrapType::from_flags(flags), CardTrapType::Continuous);
    }

    #[test]
    fn modifier_bits() {
        let flags = TypeFlags::MONSTER | TypeFlags::SYNCHRO | TypeFlags::TUNER;
        assert!(flags.is_tuner());
        assert!(!flags.is_pendulum());
        assert_eq!(CardMonsterAbility::from_flags(flags), CardMonsterAbility::None);

        let flags = TypeFlags::MONSTER | TypeFlags::EFFECT | TypeFlags::FLIP;
        assert_eq!(CardMonsterAbility::from_flags(flags), CardMonsterAbility::Flip);
    }

    #[test]
    fn link_markers_decode_in_compass_order() {
        let flags =
            LinkMarkerFlags::BOTTOM_LEFT | LinkMarkerFlags::TOP | LinkMarkerFlags::RIGHT;
        assert_eq!(
            CardLinkMarker::list_from_flags(flags),
            vec![CardLinkMarker::Top, CardLinkMarker::Right, CardLinkMarker::BottomLeft]
        );
        assert!(CardLinkMarker::list_from_flags(LinkMarkerFlags(0)).is_empty());
    }

    #[test]
    fn attribute_and_race_lists() {
        let attrs = AttributeFlags::LIGHT | AttributeFlags::DARK;
        assert_eq!(
            CardMonsterAttribute::list_from_flags(attrs),
            vec![CardMonsterAttribute::Light, CardMonsterAttribute::Dark]
        );

        let races = RaceFlags::DRAGON | RaceFlags::CYBERSE;
        assert_eq!(
            CardMonsterType::list_from_flags(races),
            vec![CardMonsterType::Dragon, CardMonsterType::Cyberse]
        );
    }
}
