//! Tokenizer for filter-expression source text: turns a source string into a
//! stream of [`TokenWithSpan`] values, or a [`LexError`] at the first
//! unrecognized input.

pub mod cursor;
pub mod error;
mod lexer;
pub mod token;
pub mod unicode;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::{tokenize, Lexer};
pub use token::{Keyword, NumberLit, Op, Punct, Token, TokenWithSpan};
