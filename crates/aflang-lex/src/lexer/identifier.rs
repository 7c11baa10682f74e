//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, Keyword, Token};
use crate::unicode::is_ascii_ident_continue;
use crate::Lexer;
use aflang_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes an identifier, then checks it against the reserved-word table.
    /// Entry requires the current character to already be a valid identifier
    /// start (the dispatcher checks this).
    pub fn lex_identifier(&mut self) -> Token {
        while is_ascii_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        match keyword_from_ident(text) {
            Some(kw) => Token::Keyword(kw),
            None => Token::Ident(Symbol::intern(text)),
        }
    }
}
