//! String literal lexing.
//!
//! Both `"` and `'` delimit strings (there is no separate character-literal
//! type); whichever quote opens a literal must close it. An unknown escape
//! sequence is not an error: the backslash is dropped and the escaped
//! character is pushed literally.

use crate::token::Token;
use crate::unicode::parse_hex_codepoint;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a string literal opened by `quote` (already current but not yet
    /// consumed).
    pub fn lex_string(&mut self, quote: char) -> Result<Token, crate::LexError> {
        self.cursor.advance();

        let mut content = String::new();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.report("unterminated string literal"));
            }

            let c = self.cursor.current_char();

            if c == quote {
                self.cursor.advance();
                break;
            }

            if c == '\n' {
                return Err(self.report("unterminated string literal"));
            }

            if c == '\\' {
                self.cursor.advance();
                self.parse_escape(&mut content)?;
            } else {
                content.push(c);
                self.cursor.advance();
            }
        }

        Ok(Token::Str(content))
    }

    /// Parses one escape sequence (the backslash has already been consumed)
    /// and appends its expansion to `out`.
    fn parse_escape(&mut self, out: &mut String) -> Result<(), crate::LexError> {
        if self.cursor.is_at_end() {
            return Err(self.report("unterminated escape sequence"));
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'x' => {
                let hex = self.take_hex_digits(2);
                match parse_hex_codepoint(&hex).and_then(char::from_u32) {
                    Some(ch) if hex.len() == 2 => out.push(ch),
                    _ => return Err(self.report("invalid hex escape sequence")),
                }
            }
            'u' => {
                let hex = self.take_hex_digits(4);
                match parse_hex_codepoint(&hex).and_then(char::from_u32) {
                    Some(ch) if hex.len() == 4 => out.push(ch),
                    _ => return Err(self.report("invalid unicode escape sequence")),
                }
            }
            'U' => {
                let hex = self.take_hex_digits(8);
                match parse_hex_codepoint(&hex).and_then(char::from_u32) {
                    Some(ch) if hex.len() == 8 => out.push(ch),
                    _ => return Err(self.report("invalid unicode escape sequence")),
                }
            }
            '0'..='7' => {
                let mut value = c as u32 - '0' as u32;
                for _ in 0..2 {
                    let d = self.cursor.current_char();
                    if ('0'..='7').contains(&d) {
                        value = value * 8 + (d as u32 - '0' as u32);
                        self.cursor.advance();
                    } else {
                        break;
                    }
                }
                out.push(char::from_u32(value.min(255)).unwrap_or('\0'));
            }
            other => out.push(other),
        }

        Ok(())
    }

    fn take_hex_digits(&mut self, max: usize) -> String {
        let mut hex = String::new();
        for _ in 0..max {
            let h = self.cursor.current_char();
            if h.is_ascii_hexdigit() {
                hex.push(h);
                self.cursor.advance();
            } else {
                break;
            }
        }
        hex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_str(source: &str) -> Token {
        let mut lexer = Lexer::new(source);
        lexer.lex_string(source.chars().next().unwrap()).unwrap()
    }

    #[test]
    fn simple_string() {
        assert_eq!(lex_str("\"hello\""), Token::Str("hello".to_string()));
    }

    #[test]
    fn single_quote_strings_work_too() {
        assert_eq!(lex_str("'hello'"), Token::Str("hello".to_string()));
    }

    #[test]
    fn standard_escapes() {
        assert_eq!(lex_str("\"a\\nb\""), Token::Str("a\nb".to_string()));
        assert_eq!(lex_str("\"a\\tb\""), Token::Str("a\tb".to_string()));
    }

    #[test]
    fn hex_and_unicode_escapes() {
        assert_eq!(lex_str("\"\\x41\""), Token::Str("A".to_string()));
        assert_eq!(lex_str("\"\\u0041\""), Token::Str("A".to_string()));
        assert_eq!(lex_str("\"\\U00000041\""), Token::Str("A".to_string()));
    }

    #[test]
    fn unknown_escape_keeps_literal_char() {
        assert_eq!(lex_str("\"\\q\""), Token::Str("q".to_string()));
    }

    #[test]
    fn unterminated_string_is_error() {
        let mut lexer = Lexer::new("\"abc");
        assert!(lexer.lex_string('"').is_err());
    }
}
