//! The global string table backing [`Symbol`](super::Symbol).
//!
//! Lock-free concurrent interning via `DashMap`, keyed by string hash so the
//! common case (string already interned) never compares byte-for-byte against
//! more than a handful of candidates.

use dashmap::DashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use super::Symbol;

pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.init_reserved();
    table
});

const RESERVED_SYMBOLS_END: u32 = 32;

pub struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(64),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
        }
    }

    fn init_reserved(&self) {
        for (idx, text) in super::RESERVED.iter().enumerate() {
            let idx = idx as u32;
            debug_assert!(idx < RESERVED_SYMBOLS_END);
            let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
            self.map.insert(Self::hash_of(text), (leaked, idx));
        }
    }

    pub fn intern(&self, s: &str) -> Symbol {
        let hash = Self::hash_of(s);

        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == s {
                return Symbol { index: entry.value().1 };
            }
        }

        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if entry.get().0 == s {
                    Symbol { index: entry.get().1 }
                } else {
                    self.insert_with_probing(s, hash)
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
                let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                entry.insert((leaked, idx));
                Symbol { index: idx }
            }
        }
    }

    /// Linear probing with a golden-ratio stride to resolve hash collisions
    /// between two genuinely different strings.
    fn insert_with_probing(&self, s: &str, original_hash: u64) -> Symbol {
        const PROBE_STRIDE: u64 = 0x9e3779b97f4a7c15;
        let mut probe = original_hash;
        loop {
            probe = probe.wrapping_add(PROBE_STRIDE);
            match self.map.entry(probe) {
                dashmap::mapref::entry::Entry::Occupied(entry) => {
                    if entry.get().0 == s {
                        return Symbol { index: entry.get().1 };
                    }
                }
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
                    let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                    entry.insert((leaked, idx));
                    return Symbol { index: idx };
                }
            }
        }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.index)
            .map(|entry| entry.value().0)
    }

    fn hash_of(s: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_same_string_hits_cache() {
        assert_eq!(STRING_TABLE.intern("xyz"), STRING_TABLE.intern("xyz"));
    }

    #[test]
    fn get_resolves_interned_string() {
        let sym = STRING_TABLE.intern("resolve_me");
        assert_eq!(STRING_TABLE.get(sym), Some("resolve_me"));
    }

    #[test]
    fn reserved_words_preinterned_with_stable_index() {
        let sym = STRING_TABLE.intern("seconds");
        assert_eq!(STRING_TABLE.get(sym), Some("seconds"));
    }

    #[test]
    fn unicode_strings_round_trip() {
        for s in ["héllo", "日本語", "🦀"] {
            let sym = STRING_TABLE.intern(s);
            assert_eq!(STRING_TABLE.get(sym), Some(s));
        }
    }
}
