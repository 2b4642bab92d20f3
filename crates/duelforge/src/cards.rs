//! In-memory card table.

use std::collections::HashMap;

use duelforge_engine::{CardReader, EngineError};
use duelforge_protocol::RawCardData;

/// A fixed card table backing the engine's card lookups.
///
/// Useful for tests and for embedders that load card data themselves
/// (from a database, a bundled file, ...) and just need something to
/// hand to the engine. Production setups typically keep the real
/// loader outside and fill one of these at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCardReader {
    cards: HashMap<u32, RawCardData>,
}

impl StaticCardReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a card, keyed by its passcode. Replaces any previous entry
    /// with the same code.
    pub fn insert(&mut self, card: RawCardData) {
        self.cards.insert(card.code, card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl FromIterator<RawCardData> for StaticCardReader {
    fn from_iter<I: IntoIterator<Item = RawCardData>>(iter: I) -> Self {
        let mut reader = Self::new();
        for card in iter {
            reader.insert(card);
        }
        reader
    }
}

impl CardReader for StaticCardReader {
    fn read_card(&self, code: u32) -> Result<RawCardData, EngineError> {
        self.cards
            .get(&code)
            .cloned()
            .ok_or(EngineError::CardNotFound(code))
    }
}
