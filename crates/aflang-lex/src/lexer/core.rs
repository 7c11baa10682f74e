//! The main `Lexer` struct and its character dispatch table.

use aflang_util::Span;

use crate::error::LexError;
use crate::token::{Punct, Token, TokenWithSpan};
use crate::unicode::is_ascii_ident_start;
use crate::Cursor;

/// Produces a stream of [`TokenWithSpan`] from filter-expression source text.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    fn span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    fn error(&self, message: impl Into<String>) -> LexError {
        LexError::new(message, self.span())
    }

    /// Returns the next token, or a `LexError` at the first unrecognized
    /// position. Returns `Token::End` exactly once, at end of input, and
    /// never advances past it.
    pub fn next_token(&mut self) -> Result<TokenWithSpan, LexError> {
        self.skip_whitespace_and_comments()?;

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        let token = if self.cursor.is_at_end() {
            Token::End
        } else {
            match self.cursor.current_char() {
                '(' => {
                    self.cursor.advance();
                    Token::Punct(Punct::LParen)
                }
                ')' => {
                    self.cursor.advance();
                    Token::Punct(Punct::RParen)
                }
                ',' => {
                    self.cursor.advance();
                    Token::Punct(Punct::Comma)
                }
                '?' => {
                    self.cursor.advance();
                    Token::Punct(Punct::Question)
                }
                ':' => {
                    self.cursor.advance();
                    Token::Punct(Punct::Colon)
                }
                '"' => self.lex_string('"')?,
                '\'' => self.lex_string('\'')?,
                '!' => self.lex_bang(),
                '*' => self.lex_star(),
                '/' => self.lex_slash(),
                '+' => self.lex_plus(),
                '-' => self.lex_minus(),
                '%' => self.lex_percent(),
                '&' => self.lex_amp(),
                '|' => self.lex_pipe(),
                '^' => self.lex_caret(),
                '<' => self.lex_lt(),
                '>' => self.lex_gt(),
                '=' => self.lex_eq(),
                c if c.is_ascii_digit() => self.lex_number()?,
                '.' if self.cursor.peek_char(1).is_ascii_digit() => self.lex_number()?,
                c if is_ascii_ident_start(c) => self.lex_identifier(),
                c => {
                    let err = self.error(format!("unexpected character '{}'", c));
                    self.cursor.advance();
                    return Err(err);
                }
            }
        };

        Ok(TokenWithSpan {
            token,
            span: self.span(),
        })
    }

    pub(crate) fn report(&self, message: impl Into<String>) -> LexError {
        self.error(message)
    }
}

/// Lexes every token in `source`, stopping (and returning the error) at the
/// first `LexError`. The returned vector always ends with `Token::End` on
/// success.
pub fn tokenize(source: &str) -> Result<Vec<TokenWithSpan>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token()?;
        let is_end = tok.token == Token::End;
        tokens.push(tok);
        if is_end {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{NumberLit, Op};

    #[test]
    fn empty_source_yields_end() {
        let toks = tokenize("").unwrap();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].token, Token::End);
    }

    #[test]
    fn skips_whitespace_between_tokens() {
        let toks = tokenize("  1   +   2  ").unwrap();
        assert_eq!(
            toks.iter().map(|t| t.token.clone()).collect::<Vec<_>>(),
            vec![
                Token::Number(NumberLit::Int(1)),
                Token::Op(Op::Plus),
                Token::Number(NumberLit::Int(2)),
                Token::End,
            ]
        );
    }

    #[test]
    fn unexpected_character_is_lex_error() {
        assert!(tokenize("1 @ 2").is_err());
    }

    #[test]
    fn punct_tokens() {
        let toks = tokenize("(,?:)").unwrap();
        let kinds: Vec<_> = toks.into_iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Punct(Punct::LParen),
                Token::Punct(Punct::Comma),
                Token::Punct(Punct::Question),
                Token::Punct(Punct::Colon),
                Token::Punct(Punct::RParen),
                Token::End,
            ]
        );
    }
}
