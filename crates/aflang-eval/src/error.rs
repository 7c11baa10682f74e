//! Evaluator error types.
//!
//! `EvalError` is the umbrella thrown from [`crate::Evaluator::evaluate`]; it
//! absorbs the earlier pipeline stages via `#[from]` so callers only ever
//! need to match on one error type.

use aflang_util::Span;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticOp {
    Div,
    Mod,
}

impl std::fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticOp::Div => write!(f, "division"),
            ArithmeticOp::Mod => write!(f, "modulo"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] aflang_lex::LexError),

    #[error(transparent)]
    Parse(#[from] aflang_parse::ParseError),

    #[error("integer {op} by zero")]
    Arithmetic { op: ArithmeticOp },

    #[error("invalid regular expression: {message}")]
    Regex { message: String },

    #[error("error in function '{name}': {description}")]
    Function { name: String, description: String },

    #[error("evaluation exceeded its resource budget at {span}")]
    ResourceExhausted { span: Span },
}

impl From<aflang_parse::Error> for EvalError {
    fn from(e: aflang_parse::Error) -> Self {
        match e {
            aflang_parse::Error::Lex(e) => EvalError::Lex(e),
            aflang_parse::Error::Parse(e) => EvalError::Parse(e),
        }
    }
}
