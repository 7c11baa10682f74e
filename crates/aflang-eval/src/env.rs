//! Variable and function bindings visible to an evaluation.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::EvalError;
use crate::value::Value;

/// A host-supplied function: receives already-evaluated arguments and
/// returns a `Value` or an `EvalError`. Argument count is not checked by the
/// environment; functions are responsible for validating their own arity.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// Bindings available during evaluation: host-provided variables and
/// functions, plus the handful the language itself pre-registers
/// (`true`, `false`, `int`, `string`, `float`).
#[derive(Clone)]
pub struct Environment {
    variables: FxHashMap<String, Value>,
    functions: FxHashMap<String, NativeFn>,
}

impl Default for Environment {
    fn default() -> Self {
        let mut env = Environment { variables: FxHashMap::default(), functions: FxHashMap::default() };
        env.register_builtins();
        env
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    fn register_builtins(&mut self) {
        self.variables.insert("true".to_string(), Value::Integer(1));
        self.variables.insert("false".to_string(), Value::Integer(0));

        self.functions.insert(
            "int".to_string(),
            Arc::new(|args: &[Value]| Ok(Value::Integer(args.first().map(Value::to_int).unwrap_or(0)))),
        );
        self.functions.insert(
            "float".to_string(),
            Arc::new(|args: &[Value]| Ok(Value::Float(args.first().map(Value::to_float).unwrap_or(0.0)))),
        );
        self.functions.insert(
            "string".to_string(),
            Arc::new(|args: &[Value]| Ok(Value::String(args.first().map(Value::to_string).unwrap_or_default()))),
        );
    }

    /// Binds `name` to `value`, overwriting any previous binding (including
    /// pre-registered ones — a host may redefine `true` if it wants to).
    pub fn add_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Registers a function under `name`, overwriting any previous
    /// registration (including a pre-registered cast builtin).
    pub fn add_function<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(f));
    }

    /// Removes every host-added variable, re-registering the builtins.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
        self.variables.insert("true".to_string(), Value::Integer(1));
        self.variables.insert("false".to_string(), Value::Integer(0));
    }

    /// Removes every host-added function, re-registering the cast builtins.
    pub fn clear_functions(&mut self) {
        self.functions.clear();
        self.register_builtins_functions_only();
    }

    fn register_builtins_functions_only(&mut self) {
        let placeholder_vars = std::mem::take(&mut self.variables);
        self.register_builtins();
        self.variables = placeholder_vars;
    }

    /// Per §4.4/§9: an unresolved variable degrades gracefully to the empty
    /// string rather than erroring.
    pub fn get_var(&self, name: &str) -> Value {
        self.variables.get(name).cloned().unwrap_or_else(|| Value::String(String::new()))
    }

    pub fn get_func(&self, name: &str) -> Option<NativeFn> {
        self.functions.get(name).cloned()
    }

    pub fn has_func(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}
