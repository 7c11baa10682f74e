//! Loader for the Unicode confusable-character equivalence table consumed
//! by the `ccnorm`/`norm` demo registrations.
//!
//! Format: one `actual_codepoint:canonical_codepoint` pair per line, both
//! decimal. Blank and malformed lines are skipped rather than rejected —
//! the table is best-effort auxiliary data, not part of the grammar.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct ConfusableTable {
    map: HashMap<char, char>,
}

impl ConfusableTable {
    pub fn empty() -> Self {
        ConfusableTable { map: HashMap::new() }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    fn parse(content: &str) -> Self {
        let mut map = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((actual, canonical)) = line.split_once(':') else { continue };
            let (Ok(actual), Ok(canonical)) = (actual.trim().parse::<u32>(), canonical.trim().parse::<u32>()) else {
                continue;
            };
            let (Some(actual), Some(canonical)) = (char::from_u32(actual), char::from_u32(canonical)) else {
                continue;
            };
            map.insert(actual, canonical);
        }
        ConfusableTable { map }
    }

    /// Replaces every confusable codepoint in `input` with its canonical
    /// form; codepoints absent from the table pass through unchanged.
    pub fn normalize(&self, input: &str) -> String {
        input.chars().map(|c| self.map.get(&c).copied().unwrap_or(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_lines() {
        let table = ConfusableTable::parse("1072:97\n1077:101\n");
        assert_eq!(table.normalize("\u{0430}\u{0435}"), "ae");
    }

    #[test]
    fn skips_blank_and_malformed_lines() {
        let table = ConfusableTable::parse("\n1072:97\nnot-a-line\n99\n1077:101\n");
        assert_eq!(table.normalize("\u{0430}\u{0435}"), "ae");
    }

    #[test]
    fn unmapped_codepoints_pass_through() {
        let table = ConfusableTable::parse("1072:97\n");
        assert_eq!(table.normalize("hello"), "hello");
    }

    #[test]
    fn empty_table_is_identity() {
        let table = ConfusableTable::empty();
        assert_eq!(table.normalize("hello"), "hello");
    }
}
