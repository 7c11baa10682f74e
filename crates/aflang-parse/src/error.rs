use aflang_util::Span;
use thiserror::Error;

/// A syntax error: an unexpected or missing token, an unbalanced
/// parenthesis, or trailing input after an otherwise-complete expression.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Either stage that can fail when parsing straight from source text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] aflang_lex::LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
