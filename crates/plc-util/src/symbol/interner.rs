//! String interner implementation using DashMap for concurrent access.
//!
//! A single process only ever compiles one source file, so concurrency here
//! buys nothing operationally — but the corpus's interner is DashMap-backed
//! and there is no reason to regress to a bare `RefCell<HashMap>` just
//! because this crate's workload happens to be single-threaded.

use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::LazyLock;

use super::{InternerStats, Symbol};

pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Thread-safe string table.
///
/// Interned strings are leaked to obtain `'static` references. Safe because
/// the table lives for the whole process and strings are never removed.
pub struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

const RESERVED_SYMBOLS_END: u32 = 64;

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    fn initialize_known_symbols(&self) {
        for (index, text) in super::KEYWORDS.iter().enumerate() {
            let hash = Self::hash_str(text);
            self.map.insert(hash, (*text, index as u32));
        }
    }

    fn hash_str(s: &str) -> u64 {
        let mut hasher = ahash::AHasher::default();
        s.hash(&mut hasher);
        hasher.finish()
    }

    pub fn intern(&self, text: &str) -> Symbol {
        let hash = Self::hash_str(text);
        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == text {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Symbol { index: entry.1 };
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if entry.get().0 == text {
                    Symbol { index: entry.get().1 }
                } else {
                    self.intern_colliding(text, hash)
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
                let index = self.next_index.fetch_add(1, Ordering::Relaxed);
                entry.insert((leaked, index));
                Symbol { index }
            }
        }
    }

    /// Two different strings hashed to the same bucket. Probe forward with
    /// a golden-ratio step until an empty slot or the same string turns up.
    fn intern_colliding(&self, text: &str, original_hash: u64) -> Symbol {
        const MAX_PROBES: u64 = 32;
        const PROBE_STEP: u64 = 0x9e3779b97f4a7c15;

        let mut probe_hash = original_hash;
        for _ in 0..MAX_PROBES {
            probe_hash = probe_hash.wrapping_add(PROBE_STEP);
            match self.map.entry(probe_hash) {
                dashmap::mapref::entry::Entry::Occupied(entry) => {
                    if entry.get().0 == text {
                        return Symbol { index: entry.get().1 };
                    }
                }
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
                    let index = self.next_index.fetch_add(1, Ordering::Relaxed);
                    entry.insert((leaked, index));
                    return Symbol { index };
                }
            }
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.map.insert(probe_hash, (leaked, index));
        Symbol { index }
    }

    pub fn resolve(&self, symbol: Symbol) -> &'static str {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.index)
            .map(|entry| entry.value().0)
            .unwrap_or("<unknown>")
    }

    pub fn stats(&self) -> InternerStats {
        InternerStats::new(
            self.map.len(),
            self.map.capacity(),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_text_twice_is_a_hit() {
        let table = StringTable::new();
        let a = table.intern("FOO");
        let b = table.intern("FOO");
        assert_eq!(a, b);
    }

    #[test]
    fn known_symbols_resolve_to_their_own_text() {
        let table = StringTable::new();
        table.initialize_known_symbols();
        let program_symbol = Symbol {
            index: super::super::KEYWORDS
                .iter()
                .position(|k| *k == "PROGRAM")
                .unwrap() as u32,
        };
        assert_eq!(table.resolve(program_symbol), "PROGRAM");
    }
}
