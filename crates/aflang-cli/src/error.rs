//! CLI-local error types.
//!
//! Kept separate from [`aflang_eval::EvalError`]: these cover framing,
//! configuration, and I/O concerns around the evaluator, not evaluation
//! itself. `main` binds everything into `anyhow::Error` at the top level;
//! nothing below it does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("malformed request: {0}")]
    Framing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
