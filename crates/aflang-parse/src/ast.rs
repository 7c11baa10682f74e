//! AST node definitions for filter expressions.
//!
//! A parsed expression is a tree of [`Expr`] nodes rooted at whatever
//! [`parse`](crate::parse) returns; nodes own their children outright (no
//! sharing, no cycles), so the tree drops recursively with its root.

use aflang_lex::NumberLit;
use aflang_util::{Span, Symbol};

/// A literal value as written in source, before it becomes a runtime `Value`.
/// Kept here rather than depending on `aflang-eval::Value` so the parser has
/// no upward dependency on the evaluator.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<NumberLit> for Literal {
    fn from(n: NumberLit) -> Self {
        match n {
            NumberLit::Int(i) => Literal::Int(i),
            NumberLit::Float(f) => Literal::Float(f),
        }
    }
}

/// Unary prefix operators (grammar level 11).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Plus,
    Neg,
}

/// Binary infix operators (grammar levels 3 through 8).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    // level 3: logical (not bitwise)
    And,
    Or,
    Xor,
    // level 4: equality
    Eq,
    NotEq,
    EqEqEq,
    NotEqEq,
    // level 5: relational
    Lt,
    LtEq,
    Gt,
    GtEq,
    // level 6
    Add,
    Sub,
    // level 7
    Mul,
    Div,
    Mod,
    // level 8
    Pow,
}

/// The keyword infix operators (grammar level 9): `in contains like matches
/// rlike regex`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeywordOp {
    In,
    Contains,
    Like,
    Matches,
    Rlike,
    Regex,
}

/// Postfix time-unit keywords (grammar level 10), each a multiplier on the
/// operand expressed in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Years,
}

impl TimeUnit {
    /// Seconds-per-unit multiplier. Years are a fixed 365-day year.
    pub fn seconds_factor(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
            TimeUnit::Weeks => 604_800,
            TimeUnit::Years => 31_536_000,
        }
    }
}

/// One AST node kind. See the module docs for ownership.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Literal(Literal),
    Variable(Symbol),
    Call(Symbol, Vec<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
    Keyword(KeywordOp, Box<Expr>, Box<Expr>),
    TimeUnit(TimeUnit, Box<Expr>),
}

/// An AST node paired with the span of source text it was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub node: Node,
    pub span: Span,
}

impl Expr {
    pub fn new(node: Node, span: Span) -> Self {
        Self { node, span }
    }
}
