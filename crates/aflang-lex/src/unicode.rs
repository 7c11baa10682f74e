//! Character classification helpers.
//!
//! Identifiers in this grammar are deliberately ASCII-only
//! (`[A-Za-z_][A-Za-z0-9_]*`); string *contents* are full Unicode, handled by
//! `char`/`str` directly rather than through this module.

pub fn is_ascii_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_ascii_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn is_digit_in_base(c: char, base: u32) -> bool {
    match base {
        2 => matches!(c, '0' | '1'),
        8 => matches!(c, '0'..='7'),
        10 => c.is_ascii_digit(),
        16 => c.is_ascii_hexdigit(),
        _ => false,
    }
}

fn hex_digit_to_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'a'..='f' => Some(c as u32 - 'a' as u32 + 10),
        'A'..='F' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Parses an exact-length hex string (as used by `\xHH`, `\uHHHH`, `\UHHHHHHHH`)
/// into a codepoint. Returns `None` on a non-hex digit or an invalid scalar value.
pub fn parse_hex_codepoint(hex: &str) -> Option<u32> {
    let mut value = 0u32;
    for c in hex.chars() {
        value = value.checked_mul(16)?;
        value = value.checked_add(hex_digit_to_value(c)?)?;
    }
    char::from_u32(value)?;
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_start_ascii_only() {
        assert!(is_ascii_ident_start('a'));
        assert!(is_ascii_ident_start('_'));
        assert!(!is_ascii_ident_start('1'));
        assert!(!is_ascii_ident_start('é'));
    }

    #[test]
    fn digit_in_base_respects_base() {
        assert!(is_digit_in_base('7', 8));
        assert!(!is_digit_in_base('8', 8));
        assert!(is_digit_in_base('f', 16));
        assert!(!is_digit_in_base('2', 2));
    }

    #[test]
    fn parse_hex_codepoint_rejects_surrogate() {
        assert_eq!(parse_hex_codepoint("41"), Some(0x41));
        assert_eq!(parse_hex_codepoint("D800"), None);
        assert_eq!(parse_hex_codepoint("110000"), None);
    }
}
