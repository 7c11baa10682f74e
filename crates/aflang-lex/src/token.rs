//! Token kinds produced by the [`Lexer`](crate::Lexer).

use aflang_util::{Span, Symbol};

/// A single character of fixed punctuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Punct {
    LParen,
    RParen,
    Comma,
    Question,
    Colon,
}

/// Operator lexemes, longest-match. `Eq`/`SlashEq` are the single `=`/`/=`
/// value-equality spellings the grammar carries alongside `==`/`!=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Bang,
    Star,
    StarStar,
    Slash,
    Plus,
    Minus,
    Percent,
    Amp,
    Pipe,
    Caret,
    Lt,
    LtEq,
    Gt,
    GtEq,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    Eq,
    SlashEq,
}

impl Op {
    pub fn lexeme(self) -> &'static str {
        match self {
            Op::Bang => "!",
            Op::Star => "*",
            Op::StarStar => "**",
            Op::Slash => "/",
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Percent => "%",
            Op::Amp => "&",
            Op::Pipe => "|",
            Op::Caret => "^",
            Op::Lt => "<",
            Op::LtEq => "<=",
            Op::Gt => ">",
            Op::GtEq => ">=",
            Op::EqEq => "==",
            Op::NotEq => "!=",
            Op::EqEqEq => "===",
            Op::NotEqEq => "!==",
            Op::Eq => "=",
            Op::SlashEq => "/=",
        }
    }
}

/// Reserved words, recognized by the identifier lexer before falling back to
/// a plain `Ident`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    True,
    False,
    Null,
    In,
    Contains,
    Like,
    Matches,
    Rlike,
    Regex,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Years,
    Int,
    StringCast,
    Float,
}

/// Looks up `text` in the reserved-word table, returning the matching
/// keyword if any.
pub fn keyword_from_ident(text: &str) -> Option<Keyword> {
    Some(match text {
        "true" => Keyword::True,
        "false" => Keyword::False,
        "null" => Keyword::Null,
        "in" => Keyword::In,
        "contains" => Keyword::Contains,
        "like" => Keyword::Like,
        "matches" => Keyword::Matches,
        "rlike" => Keyword::Rlike,
        "regex" => Keyword::Regex,
        "seconds" => Keyword::Seconds,
        "minutes" => Keyword::Minutes,
        "hours" => Keyword::Hours,
        "days" => Keyword::Days,
        "weeks" => Keyword::Weeks,
        "years" => Keyword::Years,
        "int" => Keyword::Int,
        "string" => Keyword::StringCast,
        "float" => Keyword::Float,
        _ => return None,
    })
}

/// A lexed numeric literal, already converted to its runtime representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberLit {
    Int(i64),
    Float(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(NumberLit),
    Str(String),
    Ident(Symbol),
    Keyword(Keyword),
    Op(Op),
    Punct(Punct),
    End,
}

/// A token paired with the span of source it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenWithSpan {
    pub token: Token,
    pub span: Span,
}
