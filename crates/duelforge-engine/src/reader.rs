//! Card and script callbacks.
//!
//! A duel engine resolves card data and Lua scripts lazily, through
//! callbacks it fires mid-processing. Backends hold an
//! [`EngineCallbacks`] bundle and service those callbacks from it. The
//! [`CardCache`] sits between the backend and the [`CardReader`] so a
//! card queried a thousand times in one duel hits the reader once.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use duelforge_protocol::RawCardData;
use tracing::trace;

use crate::error::EngineError;

/// Resolves a passcode to card data.
pub trait CardReader: Send + Sync + 'static {
    fn read_card(&self, code: u32) -> Result<RawCardData, EngineError>;
}

/// Resolves a script name (e.g. `c12345678.lua`) to its contents.
pub trait ScriptProvider: Send + Sync + 'static {
    fn read_script(&self, name: &str) -> Result<Vec<u8>, EngineError>;
}

/// The callback bundle a backend needs to service engine requests.
#[derive(Clone)]
pub struct EngineCallbacks {
    pub cards: Arc<dyn CardReader>,
    pub scripts: Arc<dyn ScriptProvider>,
}

impl EngineCallbacks {
    pub fn new(cards: Arc<dyn CardReader>, scripts: Arc<dyn ScriptProvider>) -> Self {
        Self { cards, scripts }
    }
}

/// Per-duel cache of resolved card data.
///
/// Besides caching, this owns the set-code buffers handed to the
/// engine: each cached card's set-code list gets a zero terminator
/// appended, since the engine reads the array as a null-terminated
/// sequence.
#[derive(Default)]
pub struct CardCache {
    cards: HashMap<u32, RawCardData>,
}

impl CardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &mut self,
        code: u32,
        reader: &dyn CardReader,
    ) -> Result<&RawCardData, EngineError> {
        match self.cards.entry(code) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                trace!(code, "loading card data");
                let mut card = reader.read_card(code)?;
                card.set_codes.push(0);
                Ok(entry.insert(card))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingReader {
        reads: AtomicUsize,
    }

    impl CardReader for CountingReader {
        fn read_card(&self, code: u32) -> Result<RawCardData, EngineError> {
            if code == 0 {
                return Err(EngineError::CardNotFound(code));
            }
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(RawCardData {
                code,
                set_codes: vec![0x1234],
                ..RawCardData::default()
            })
        }
    }

    #[test]
    fn cache_hits_reader_once_per_code() {
        let reader = CountingReader { reads: AtomicUsize::new(0) };
        let mut cache = CardCache::new();

        let card = cache.get_or_load(55, &reader).unwrap();
        assert_eq!(card.code, 55);
        // The terminator is appended on first load.
        assert_eq!(card.set_codes, vec![0x1234, 0]);

        cache.get_or_load(55, &reader).unwrap();
        cache.get_or_load(55, &reader).unwrap();
        assert_eq!(reader.reads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn reader_errors_pass_through() {
        let reader = CountingReader { reads: AtomicUsize::new(0) };
        let mut cache = CardCache::new();
        assert!(matches!(
            cache.get_or_load(0, &reader),
            Err(EngineError::CardNotFound(0))
        ));
        assert!(cache.is_empty());
    }
}
