//! The dynamically typed runtime value: `String`, `Integer`, or `Float`.
//!
//! Every operator lives here as a method on `Value`, matching on the tag
//! pair rather than going through a visitor — the variant set is small and
//! closed, so a `match` reads better than double dispatch.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ArithmeticOp, EvalError};

/// A filter-language runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
}

/// The three type tags, for `===`/`!==` (which compare tags, not values).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    String,
    Integer,
    Float,
}

/// A value coerced to one of the two numeric kinds, used to implement the
/// "if either operand is Float, the result is Float" promotion rule.
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::String(_) => Tag::String,
            Value::Integer(_) => Tag::Integer,
            Value::Float(_) => Tag::Float,
        }
    }

    pub fn bool(b: bool) -> Value {
        Value::Integer(if b { 1 } else { 0 })
    }

    /// Builds a `Value` from a bare source lexeme: integer parse, then float
    /// parse, then fall back to a string. (Distinct from the lexer's own
    /// numeric-literal recognition — this is for host-supplied raw text,
    /// e.g. a framing-protocol variable value.)
    pub fn from_lexeme(text: &str) -> Value {
        if let Ok(i) = text.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = text.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
        Value::String(text.to_string())
    }

    pub fn to_bool(&self) -> bool {
        self.to_int() != 0
    }

    pub fn to_int(&self) -> i64 {
        match self {
            Value::Integer(i) => *i,
            Value::Float(f) => *f as i64,
            Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        }
    }

    pub fn to_float(&self) -> f64 {
        match self {
            Value::Integer(i) => *i as f64,
            Value::Float(f) => *f,
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        }
    }

    fn numeric(&self) -> Numeric {
        match self {
            Value::Integer(i) => Numeric::Int(*i),
            Value::Float(f) => Numeric::Float(*f),
            Value::String(s) => {
                let t = s.trim();
                if let Ok(i) = t.parse::<i64>() {
                    Numeric::Int(i)
                } else if let Ok(f) = t.parse::<f64>() {
                    Numeric::Float(f)
                } else {
                    Numeric::Int(0)
                }
            }
        }
    }

    // --- Arithmetic -----------------------------------------------------

    /// `+`: string concatenation if either tag is `String`, otherwise
    /// numeric addition. This is the one type-poisoning arithmetic rule.
    pub fn add(&self, other: &Value) -> Result<Value, EvalError> {
        if matches!(self, Value::String(_)) || matches!(other, Value::String(_)) {
            return Ok(Value::String(format!("{}{}", self.to_string(), other.to_string())));
        }
        Ok(numeric_op(self, other, |a, b| a.checked_add(b), |a, b| a + b))
    }

    pub fn sub(&self, other: &Value) -> Result<Value, EvalError> {
        Ok(numeric_op(self, other, |a, b| a.checked_sub(b), |a, b| a - b))
    }

    pub fn mul(&self, other: &Value) -> Result<Value, EvalError> {
        Ok(numeric_op(self, other, |a, b| a.checked_mul(b), |a, b| a * b))
    }

    /// Integer `/` truncates toward zero, like C++'s `std::divides<int>`;
    /// it only falls back to `Float` on the `i64::MIN / -1` overflow case.
    pub fn div(&self, other: &Value) -> Result<Value, EvalError> {
        match (self.numeric(), other.numeric()) {
            (Numeric::Int(a), Numeric::Int(b)) => {
                if b == 0 {
                    Err(EvalError::Arithmetic { op: ArithmeticOp::Div })
                } else {
                    match a.checked_div(b) {
                        Some(q) => Ok(Value::Integer(q)),
                        None => Ok(Value::Float(a as f64 / b as f64)),
                    }
                }
            }
            (a, b) => Ok(Value::Float(numeric_f64(a) / numeric_f64(b))),
        }
    }

    pub fn rem(&self, other: &Value) -> Result<Value, EvalError> {
        match (self.numeric(), other.numeric()) {
            (Numeric::Int(a), Numeric::Int(b)) => {
                if b == 0 {
                    Err(EvalError::Arithmetic { op: ArithmeticOp::Mod })
                } else {
                    Ok(Value::Integer(a.wrapping_rem(b)))
                }
            }
            (a, b) => Ok(Value::Float(numeric_f64(a) % numeric_f64(b))),
        }
    }

    /// `**` is always computed and returned as `Float`.
    pub fn pow(&self, other: &Value) -> Result<Value, EvalError> {
        Ok(Value::Float(self.to_float().powf(other.to_float())))
    }

    /// Unary `+`: coerces to a numeric `Value`, preserving Integer vs Float.
    pub fn to_numeric(&self) -> Value {
        match self.numeric() {
            Numeric::Int(i) => Value::Integer(i),
            Numeric::Float(f) => Value::Float(f),
        }
    }

    pub fn neg(&self) -> Value {
        match self.numeric() {
            Numeric::Int(i) => Value::Integer(-i),
            Numeric::Float(f) => Value::Float(-f),
        }
    }

    // --- Comparison -------------------------------------------------------

    /// `==` (type-blind): lexicographic if both are `String`, else numeric.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            _ => self.to_float() == other.to_float(),
        }
    }

    /// `===` (type-sensitive): false across differing tags, else `==`.
    pub fn strict_eq(&self, other: &Value) -> bool {
        self.tag() == other.tag() && self.loose_eq(other)
    }

    /// `<`/`<=`/`>`/`>=` always compare in float space.
    pub fn partial_cmp_numeric(&self, other: &Value) -> Ordering {
        self.to_float().partial_cmp(&other.to_float()).unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}

/// Shortest round-trip decimal for a float, without a trailing `.0` when the
/// value is an integer (matches how filter authors expect numbers to print).
fn format_float(f: f64) -> String {
    if f.is_infinite() {
        return if f > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if f.is_nan() {
        return "nan".to_string();
    }
    let s = format!("{}", f);
    s
}

fn numeric_f64(n: Numeric) -> f64 {
    match n {
        Numeric::Int(i) => i as f64,
        Numeric::Float(f) => f,
    }
}

/// Shared promotion logic for `+ - *`: try the checked integer op first (when
/// both operands are integral); fall back to `f64` on overflow or when either
/// operand is already a `Float`.
fn numeric_op(
    a: &Value,
    b: &Value,
    int_op: impl Fn(i64, i64) -> Option<i64>,
    float_op: impl Fn(f64, f64) -> f64,
) -> Value {
    match (a.numeric(), b.numeric()) {
        (Numeric::Int(x), Numeric::Int(y)) => match int_op(x, y) {
            Some(v) => Value::Integer(v),
            None => Value::Float(float_op(x as f64, y as f64)),
        },
        (x, y) => Value::Float(float_op(numeric_f64(x), numeric_f64(y))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_int_on_non_numeric_string_is_zero() {
        assert_eq!(Value::String("abc".into()).to_int(), 0);
    }

    #[test]
    fn to_float_on_non_numeric_string_is_zero() {
        assert_eq!(Value::String("abc".into()).to_float(), 0.0);
    }

    #[test]
    fn string_round_trip_is_idempotent() {
        let v = Value::Integer(42);
        assert_eq!(Value::from_lexeme(&v.to_string()).to_string(), v.to_string());
    }

    #[test]
    fn plus_with_a_string_operand_concatenates() {
        let v = Value::String("a".into()).add(&Value::Integer(1)).unwrap();
        assert_eq!(v.to_string(), "a1");
    }

    #[test]
    fn plus_with_two_numeric_strings_is_numeric_concat_not_add() {
        // tag-based, not content-based: "5" + "3" concatenates to "53".
        let v = Value::String("5".into()).add(&Value::String("3".into())).unwrap();
        assert_eq!(v.to_string(), "53");
    }

    #[test]
    fn minus_coerces_numeric_strings() {
        let v = Value::String("5".into()).sub(&Value::Integer(3)).unwrap();
        assert!(matches!(v, Value::Integer(2)));
    }

    #[test]
    fn integer_division_truncates_toward_zero() {
        let v = Value::Integer(7).div(&Value::Integer(2)).unwrap();
        assert!(matches!(v, Value::Integer(3)));
    }

    #[test]
    fn integer_division_overflow_falls_back_to_float() {
        let v = Value::Integer(i64::MIN).div(&Value::Integer(-1)).unwrap();
        assert!(matches!(v, Value::Float(_)));
    }

    #[test]
    fn integer_division_by_zero_is_error() {
        assert!(Value::Integer(1).div(&Value::Integer(0)).is_err());
        assert!(Value::Integer(1).rem(&Value::Integer(0)).is_err());
    }

    #[test]
    fn float_division_by_zero_yields_infinity() {
        let v = Value::Float(1.0).div(&Value::Integer(0)).unwrap();
        assert!(matches!(v, Value::Float(f) if f.is_infinite()));
    }

    #[test]
    fn float_mod_by_zero_yields_nan() {
        let v = Value::Float(1.0).rem(&Value::Integer(0)).unwrap();
        assert!(matches!(v, Value::Float(f) if f.is_nan()));
    }

    #[test]
    fn pow_is_always_float() {
        let v = Value::Integer(2).pow(&Value::Integer(10)).unwrap();
        assert!(matches!(v, Value::Float(f) if (f - 1024.0).abs() < 1e-9));
    }

    #[test]
    fn strict_eq_fails_across_tags_even_if_numerically_equal() {
        assert!(!Value::String("1".into()).strict_eq(&Value::Integer(1)));
        assert!(Value::Integer(1).strict_eq(&Value::Integer(1)));
    }

    #[test]
    fn loose_eq_coerces_across_tags() {
        assert!(Value::String("1".into()).loose_eq(&Value::Integer(1)));
    }

    #[test]
    fn integer_overflow_promotes_to_float() {
        let v = Value::Integer(i64::MAX).add(&Value::Integer(1)).unwrap();
        assert!(matches!(v, Value::Float(_)));
    }

    #[test]
    fn relational_always_compares_numerically() {
        use std::cmp::Ordering;
        assert_eq!(
            Value::String("2".into()).partial_cmp_numeric(&Value::String("10".into())),
            Ordering::Less
        );
    }
}
