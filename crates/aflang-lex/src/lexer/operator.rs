//! Operator lexing. Every entry point here is infallible: whatever prefix
//! character dispatched into these methods always yields some valid `Op`.

use crate::token::{Op, Token};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `!==`, `!=`, `!`
    pub fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            if self.cursor.match_char('=') {
                return Token::Op(Op::NotEqEq);
            }
            return Token::Op(Op::NotEq);
        }
        Token::Op(Op::Bang)
    }

    /// `**`, `*`
    pub fn lex_star(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('*') {
            return Token::Op(Op::StarStar);
        }
        Token::Op(Op::Star)
    }

    /// `/=`, `/` (block comments never reach here; the dispatcher skips them
    /// before trying to lex an operator).
    pub fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            return Token::Op(Op::SlashEq);
        }
        Token::Op(Op::Slash)
    }

    pub fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        Token::Op(Op::Plus)
    }

    pub fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        Token::Op(Op::Minus)
    }

    pub fn lex_percent(&mut self) -> Token {
        self.cursor.advance();
        Token::Op(Op::Percent)
    }

    pub fn lex_amp(&mut self) -> Token {
        self.cursor.advance();
        Token::Op(Op::Amp)
    }

    pub fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        Token::Op(Op::Pipe)
    }

    pub fn lex_caret(&mut self) -> Token {
        self.cursor.advance();
        Token::Op(Op::Caret)
    }

    /// `<=`, `<`
    pub fn lex_lt(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            return Token::Op(Op::LtEq);
        }
        Token::Op(Op::Lt)
    }

    /// `>=`, `>`
    pub fn lex_gt(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            return Token::Op(Op::GtEq);
        }
        Token::Op(Op::Gt)
    }

    /// `===`, `==`, `=`
    pub fn lex_eq(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            if self.cursor.match_char('=') {
                return Token::Op(Op::EqEqEq);
            }
            return Token::Op(Op::EqEq);
        }
        Token::Op(Op::Eq)
    }
}
