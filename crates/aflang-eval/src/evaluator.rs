//! The tree-walking evaluator.

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::time::Instant;

use aflang_parse::{BinOp, Expr, KeywordOp, Literal, Node, TimeUnit, UnaryOp};
use aflang_util::Span;
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::env::Environment;
use crate::error::EvalError;
use crate::glob::glob_match;
use crate::value::Value;

/// Size cap of the parse cache; confirmed against the historical reference
/// implementation, not configurable.
const PARSE_CACHE_CAP: usize = 100;

/// An opt-in resource budget, checked at every AST node visit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Budget {
    pub max_steps: Option<u64>,
    pub max_millis: Option<u64>,
}

/// Per-call state threaded through a single `evaluate` invocation: step
/// counter and start time for budget enforcement. Recreated fresh per call,
/// never shared across evaluations.
struct RunState {
    steps: Cell<u64>,
    start: Instant,
}

/// Walks an AST producing a [`Value`], consulting an [`Environment`] for
/// variables and functions.
///
/// Not `Sync`-safe for concurrent evaluation: the parse cache and regex
/// cache are mutated in `&self` methods via `RefCell`. Share an
/// `Environment` across evaluators instead if concurrency is needed.
pub struct Evaluator {
    env: Environment,
    parse_cache: RefCell<FxHashMap<String, Arc<Expr>>>,
    regex_cache: RefCell<FxHashMap<String, Arc<Regex>>>,
    budget: Option<Budget>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator {
            env: Environment::new(),
            parse_cache: RefCell::new(FxHashMap::default()),
            regex_cache: RefCell::new(FxHashMap::default()),
            budget: None,
        }
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opts into a resource budget enforced at every AST node visit.
    /// Pass `None` for either field to leave that dimension unbounded.
    pub fn with_budget(mut self, max_steps: Option<u64>, max_millis: Option<u64>) -> Self {
        self.budget = Some(Budget { max_steps, max_millis });
        self
    }

    pub fn add_variable(&mut self, name: impl Into<String>, value: Value) {
        self.env.add_variable(name, value);
    }

    pub fn add_function<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.env.add_function(name, f);
    }

    pub fn clear(&mut self) {
        self.env.clear_variables();
        self.env.clear_functions();
    }

    pub fn clear_variables(&mut self) {
        self.env.clear_variables();
    }

    pub fn clear_functions(&mut self) {
        self.env.clear_functions();
    }

    /// Parses (or retrieves from cache) and evaluates `source`, returning
    /// the raw result `Value`.
    pub fn evaluate(&self, source: &str) -> Result<Value, EvalError> {
        let expr = self.get_or_parse(source)?;
        let run = RunState { steps: Cell::new(0), start: Instant::now() };
        self.eval_node(&expr, false, &run)
    }

    /// Convenience wrapper coercing the result to the filter-mode boolean.
    pub fn evaluate_as_bool(&self, source: &str) -> Result<bool, EvalError> {
        Ok(self.evaluate(source)?.to_bool())
    }

    fn get_or_parse(&self, source: &str) -> Result<Arc<Expr>, EvalError> {
        if let Some(cached) = self.parse_cache.borrow().get(source) {
            trace!(len = source.len(), "parse cache hit");
            return Ok(Arc::clone(cached));
        }
        debug!(len = source.len(), "parse cache miss");
        let expr = Arc::new(aflang_parse::parse(source)?);
        let mut cache = self.parse_cache.borrow_mut();
        if cache.len() >= PARSE_CACHE_CAP {
            debug!(cap = PARSE_CACHE_CAP, "parse cache overflow, clearing");
            cache.clear();
        }
        cache.insert(source.to_string(), Arc::clone(&expr));
        Ok(expr)
    }

    fn check_budget(&self, span: Span, run: &RunState) -> Result<(), EvalError> {
        let Some(budget) = self.budget else { return Ok(()) };
        let steps = run.steps.get() + 1;
        run.steps.set(steps);
        if let Some(max) = budget.max_steps {
            if steps > max {
                return Err(EvalError::ResourceExhausted { span });
            }
        }
        if let Some(max_millis) = budget.max_millis {
            if run.start.elapsed().as_millis() > max_millis as u128 {
                return Err(EvalError::ResourceExhausted { span });
            }
        }
        Ok(())
    }

    /// The sentinel value returned for a node visited in short-circuit
    /// "skip" mode: no function is invoked, no arithmetic is performed.
    fn skip_sentinel() -> Value {
        Value::Integer(0)
    }

    fn eval_node(&self, expr: &Expr, skip: bool, run: &RunState) -> Result<Value, EvalError> {
        self.check_budget(expr.span, run)?;

        match &expr.node {
            Node::Literal(lit) => Ok(literal_to_value(lit)),

            Node::Variable(sym) => Ok(self.env.get_var(sym.as_str())),

            Node::Call(sym, args) => {
                if skip {
                    trace!(name = sym.as_str(), "skipping call in dead branch");
                    for a in args {
                        self.eval_node(a, true, run)?;
                    }
                    return Ok(Self::skip_sentinel());
                }
                let mut values = Vec::with_capacity(args.len());
                for a in args {
                    values.push(self.eval_node(a, false, run)?);
                }
                match self.env.get_func(sym.as_str()) {
                    Some(f) => (*f)(&values),
                    None => {
                        debug!(name = sym.as_str(), "unregistered function, degrading to empty string");
                        Ok(Value::String(String::new()))
                    }
                }
            }

            Node::Unary(op, inner) => {
                let v = self.eval_node(inner, skip, run)?;
                Ok(match op {
                    UnaryOp::Not => Value::bool(!v.to_bool()),
                    UnaryOp::Plus => v.to_numeric(),
                    UnaryOp::Neg => v.neg(),
                })
            }

            Node::Binary(op, l, r) => self.eval_binary(*op, l, r, skip, run),

            Node::Ternary(cond, then_b, else_b) => {
                let cond_v = self.eval_node(cond, skip, run)?;
                if skip {
                    self.eval_node(then_b, true, run)?;
                    self.eval_node(else_b, true, run)?;
                    return Ok(Self::skip_sentinel());
                }
                if cond_v.to_bool() {
                    self.eval_node(else_b, true, run)?;
                    self.eval_node(then_b, false, run)
                } else {
                    self.eval_node(then_b, true, run)?;
                    self.eval_node(else_b, false, run)
                }
            }

            Node::Keyword(op, l, r) => self.eval_keyword(*op, l, r, skip, run),

            Node::TimeUnit(unit, inner) => {
                let v = self.eval_node(inner, skip, run)?;
                if skip {
                    return Ok(Self::skip_sentinel());
                }
                Ok(Value::Integer(v.to_int().saturating_mul(unit_factor(*unit))))
            }
        }
    }

    fn eval_binary(
        &self,
        op: BinOp,
        l: &Expr,
        r: &Expr,
        skip: bool,
        run: &RunState,
    ) -> Result<Value, EvalError> {
        match op {
            BinOp::And => {
                let lv = self.eval_node(l, skip, run)?;
                if skip || !lv.to_bool() {
                    self.eval_node(r, true, run)?;
                    return Ok(if skip { Self::skip_sentinel() } else { Value::bool(false) });
                }
                let rv = self.eval_node(r, false, run)?;
                Ok(Value::bool(rv.to_bool()))
            }
            BinOp::Or => {
                let lv = self.eval_node(l, skip, run)?;
                if skip {
                    self.eval_node(r, true, run)?;
                    return Ok(Self::skip_sentinel());
                }
                if lv.to_bool() {
                    self.eval_node(r, true, run)?;
                    return Ok(Value::bool(true));
                }
                let rv = self.eval_node(r, false, run)?;
                Ok(Value::bool(rv.to_bool()))
            }
            BinOp::Xor => {
                let lv = self.eval_node(l, skip, run)?;
                let rv = self.eval_node(r, skip, run)?;
                if skip {
                    return Ok(Self::skip_sentinel());
                }
                Ok(Value::bool(lv.to_bool() != rv.to_bool()))
            }
            BinOp::Eq => self.eval_compare(l, r, skip, run, |a, b| a.loose_eq(b)),
            BinOp::NotEq => self.eval_compare(l, r, skip, run, |a, b| !a.loose_eq(b)),
            BinOp::EqEqEq => self.eval_compare(l, r, skip, run, |a, b| a.strict_eq(b)),
            BinOp::NotEqEq => self.eval_compare(l, r, skip, run, |a, b| !a.strict_eq(b)),
            BinOp::Lt => self.eval_compare(l, r, skip, run, |a, b| {
                a.partial_cmp_numeric(b) == std::cmp::Ordering::Less
            }),
            BinOp::LtEq => self.eval_compare(l, r, skip, run, |a, b| {
                a.partial_cmp_numeric(b) != std::cmp::Ordering::Greater
            }),
            BinOp::Gt => self.eval_compare(l, r, skip, run, |a, b| {
                a.partial_cmp_numeric(b) == std::cmp::Ordering::Greater
            }),
            BinOp::GtEq => self.eval_compare(l, r, skip, run, |a, b| {
                a.partial_cmp_numeric(b) != std::cmp::Ordering::Less
            }),
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => {
                if skip {
                    self.eval_node(l, true, run)?;
                    self.eval_node(r, true, run)?;
                    return Ok(Self::skip_sentinel());
                }
                let lv = self.eval_node(l, false, run)?;
                let rv = self.eval_node(r, false, run)?;
                match op {
                    BinOp::Add => lv.add(&rv),
                    BinOp::Sub => lv.sub(&rv),
                    BinOp::Mul => lv.mul(&rv),
                    BinOp::Div => lv.div(&rv),
                    BinOp::Mod => lv.rem(&rv),
                    BinOp::Pow => lv.pow(&rv),
                    _ => unreachable!(),
                }
            }
        }
    }

    fn eval_compare(
        &self,
        l: &Expr,
        r: &Expr,
        skip: bool,
        run: &RunState,
        f: impl Fn(&Value, &Value) -> bool,
    ) -> Result<Value, EvalError> {
        let lv = self.eval_node(l, skip, run)?;
        let rv = self.eval_node(r, skip, run)?;
        if skip {
            return Ok(Self::skip_sentinel());
        }
        Ok(Value::bool(f(&lv, &rv)))
    }

    fn eval_keyword(
        &self,
        op: KeywordOp,
        l: &Expr,
        r: &Expr,
        skip: bool,
        run: &RunState,
    ) -> Result<Value, EvalError> {
        match op {
            KeywordOp::In | KeywordOp::Contains => {
                let lv = self.eval_node(l, skip, run)?;
                let rv = self.eval_node(r, skip, run)?;
                if skip {
                    return Ok(Self::skip_sentinel());
                }
                let (needle, haystack) = match op {
                    KeywordOp::In => (lv.to_string(), rv.to_string()),
                    KeywordOp::Contains => (rv.to_string(), lv.to_string()),
                    _ => unreachable!(),
                };
                Ok(Value::bool(haystack.contains(&needle)))
            }
            KeywordOp::Like | KeywordOp::Matches => {
                let lv = self.eval_node(l, skip, run)?;
                let rv = self.eval_node(r, skip, run)?;
                if skip {
                    return Ok(Self::skip_sentinel());
                }
                Ok(Value::bool(glob_match(&rv.to_string(), &lv.to_string())))
            }
            KeywordOp::Rlike | KeywordOp::Regex => {
                if skip {
                    self.eval_node(l, true, run)?;
                    self.eval_node(r, true, run)?;
                    return Ok(Self::skip_sentinel());
                }
                let lv = self.eval_node(l, false, run)?;
                let rv = self.eval_node(r, false, run)?;
                let pattern = rv.to_string();
                let re = self.get_or_compile_regex(&pattern)?;
                Ok(Value::bool(re.is_match(&lv.to_string())))
            }
        }
    }

    fn get_or_compile_regex(&self, pattern: &str) -> Result<Arc<Regex>, EvalError> {
        if let Some(re) = self.regex_cache.borrow().get(pattern) {
            return Ok(Arc::clone(re));
        }
        debug!(pattern, "compiling regex");
        let anchored = format!("^(?:{})$", pattern);
        let re = Regex::new(&anchored).map_err(|e| EvalError::Regex { message: e.to_string() })?;
        let re = Arc::new(re);
        self.regex_cache.borrow_mut().insert(pattern.to_string(), Arc::clone(&re));
        Ok(re)
    }
}

fn literal_to_value(lit: &Literal) -> Value {
    match lit {
        Literal::Int(i) => Value::Integer(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::Str(s) => Value::String(s.clone()),
    }
}

fn unit_factor(unit: TimeUnit) -> i64 {
    unit.seconds_factor()
}
