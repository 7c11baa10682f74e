//! Whitespace and comment skipping. Block comments only (`/* ... */`); there
//! is no line-comment syntax. Block comments do not nest: the first `*/`
//! closes the comment regardless of any `/*` seen since the opener.

use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> Result<(), crate::LexError> {
        loop {
            if self.cursor.is_at_end() {
                return Ok(());
            }

            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_char(1) == '*' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    self.skip_block_comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), crate::LexError> {
        loop {
            if self.cursor.is_at_end() {
                return Err(self.report("unterminated block comment"));
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return Ok(());
            }
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::Token;
    use crate::Lexer;

    #[test]
    fn skips_leading_whitespace() {
        let mut lexer = Lexer::new("   hello");
        let tok = lexer.next_token().unwrap();
        assert!(matches!(tok.token, Token::Ident(_)));
    }

    #[test]
    fn skips_block_comment() {
        let mut lexer = Lexer::new("/* comment */hello");
        let tok = lexer.next_token().unwrap();
        assert!(matches!(tok.token, Token::Ident(_)));
    }

    #[test]
    fn first_close_wins_no_nesting() {
        let mut lexer = Lexer::new("/* outer /* inner */ trailing */hello");
        let first = lexer.next_token().unwrap();
        // the comment closes at the first `*/`, leaving "trailing */hello" to
        // be lexed as ordinary tokens, not as a continuation of the comment
        assert!(matches!(first.token, Token::Ident(_)));
    }

    #[test]
    fn unterminated_block_comment_is_error() {
        let mut lexer = Lexer::new("/* never closed");
        assert!(lexer.next_token().is_err());
    }
}
