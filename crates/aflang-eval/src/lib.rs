//! Tree-walking evaluator for the filter expression language: owns the
//! runtime [`Value`] model, the variable/function [`Environment`], and the
//! [`Evaluator`] that ties parsing, caching, and short-circuit evaluation
//! together.
//!
//! Library crates in this workspace never install a `tracing` subscriber
//! themselves; that is the CLI's job. They only emit events.

mod env;
mod error;
mod evaluator;
mod glob;
mod value;

pub use env::{Environment, NativeFn};
pub use error::{ArithmeticOp, EvalError};
pub use evaluator::{Budget, Evaluator};
pub use glob::glob_match;
pub use value::{Tag, Value};
