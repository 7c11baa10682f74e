//! Demo builtin registrations exercising the function-registration API.
//!
//! The real filter-function library (`ccnorm`, `rmdoubles`, `specialratio`,
//! etc.) is out of scope for this workspace; these two are minimal stand-ins
//! registered by the CLI purely to show the registration API working
//! end-to-end, not a public surface any crate here commits to.

use std::sync::Arc;

use aflang_eval::{EvalError, Evaluator, Value};

use crate::confusables::ConfusableTable;

pub fn register(evaluator: &mut Evaluator, table: ConfusableTable) {
    evaluator.add_function("specialratio", specialratio);

    let table = Arc::new(table);
    evaluator.add_function("ccnorm", move |args: &[Value]| ccnorm(&table, args));
    let table_for_norm = Arc::clone(&table);
    evaluator.add_function("norm", move |args: &[Value]| ccnorm(&table_for_norm, args));
}

fn specialratio(args: &[Value]) -> Result<Value, EvalError> {
    let s = args.first().map(Value::to_string).unwrap_or_default();
    let total = s.chars().count();
    if total == 0 {
        return Ok(Value::Float(0.0));
    }
    let non_alnum = s.chars().filter(|c| !c.is_alphanumeric()).count();
    Ok(Value::Float(non_alnum as f64 / total as f64))
}

fn ccnorm(table: &ConfusableTable, args: &[Value]) -> Result<Value, EvalError> {
    let s = args.first().map(Value::to_string).unwrap_or_default();
    Ok(Value::String(table.normalize(&s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialratio_counts_non_alphanumeric_characters() {
        let v = specialratio(&[Value::String("a!b@c#".into())]).unwrap();
        assert!((v.to_float() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn specialratio_on_empty_string_is_zero() {
        let v = specialratio(&[Value::String(String::new())]).unwrap();
        assert_eq!(v.to_float(), 0.0);
    }

    #[test]
    fn ccnorm_applies_the_confusable_table() {
        let mut ev = Evaluator::new();
        register(&mut ev, ConfusableTable::empty());
        assert_eq!(ev.evaluate("ccnorm('hello')").unwrap().to_string(), "hello");
    }

    #[test]
    fn ccnorm_is_idempotent() {
        let mut ev = Evaluator::new();
        register(&mut ev, ConfusableTable::empty());
        let once = ev.evaluate("ccnorm('hello')").unwrap().to_string();
        ev.add_variable("x", Value::String(once.clone()));
        let twice = ev.evaluate("ccnorm(x)").unwrap().to_string();
        assert_eq!(once, twice);
    }
}
