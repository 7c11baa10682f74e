use aflang_util::Span;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} at {span}")]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}
