//! String interning for identifier and keyword handling.
//!
//! [`Symbol`] is a compact handle to an interned string: O(1) comparison,
//! one allocation per unique string for the life of the process. The filter
//! language's reserved words are pre-interned so they get stable, predictable
//! indices and the lexer can recognize them by comparing `Symbol`s rather than
//! strings.

mod interner;

pub use interner::StringTable;

use std::fmt;

/// A handle to an interned string. Cheap to copy, compare, and hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    index: u32,
}

impl Symbol {
    /// Interns `s`, returning the handle for it (existing or freshly allocated).
    pub fn intern(s: &str) -> Symbol {
        interner::STRING_TABLE.intern(s)
    }

    /// Resolves this symbol back to its string. Always succeeds for any
    /// symbol obtained from `intern`, since entries are never removed.
    pub fn as_str(&self) -> &'static str {
        interner::STRING_TABLE
            .get(*self)
            .expect("symbol was not produced by Symbol::intern")
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! reserved_symbols {
    ($($index:expr => $const_name:ident = $text:literal),* $(,)?) => {
        $(
            pub const $const_name: Symbol = Symbol { index: $index };
        )*

        pub(crate) const RESERVED: &[&str] = &[$($text),*];
    };
}

reserved_symbols! {
    0  => KW_TRUE = "true",
    1  => KW_FALSE = "false",
    2  => KW_NULL = "null",
    3  => KW_IN = "in",
    4  => KW_CONTAINS = "contains",
    5  => KW_LIKE = "like",
    6  => KW_MATCHES = "matches",
    7  => KW_RLIKE = "rlike",
    8  => KW_REGEX = "regex",
    9  => KW_SECONDS = "seconds",
    10 => KW_MINUTES = "minutes",
    11 => KW_HOURS = "hours",
    12 => KW_DAYS = "days",
    13 => KW_WEEKS = "weeks",
    14 => KW_YEARS = "years",
    15 => KW_INT = "int",
    16 => KW_STRING = "string",
    17 => KW_FLOAT = "float",
}
