//! Closed registry of functions callable from expressions
//!
//! Only names registered here can appear in a call; anything else is rejected
//! by the parser.

use crate::error::{CalcError, CalcResult};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Trait for functions that can be called from expressions
pub trait MathFunction: Send + Sync {
    /// Call the function with already evaluated arguments
    fn call(&self, args: &[f64]) -> CalcResult<f64>;

    /// Number of arguments the function takes
    fn arity(&self) -> usize;

    /// Get a description of this function
    fn description(&self) -> &'static str;
}

/// Single-argument function backed by a plain `fn`
struct Unary {
    f: fn(f64) -> f64,
    description: &'static str,
}

impl MathFunction for Unary {
    fn call(&self, args: &[f64]) -> CalcResult<f64> {
        match args {
            [x] => Ok((self.f)(*x)),
            _ => Err(CalcError::domain(format!("expected 1 argument, got {}", args.len()))),
        }
    }

    fn arity(&self) -> usize {
        1
    }

    fn description(&self) -> &'static str {
        self.description
    }
}

struct Pow;

impl MathFunction for Pow {
    fn call(&self, args: &[f64]) -> CalcResult<f64> {
        match args {
            [base, exponent] => Ok(base.powf(*exponent)),
            _ => Err(CalcError::domain(format!("pow expects 2 arguments, got {}", args.len()))),
        }
    }

    fn arity(&self) -> usize {
        2
    }

    fn description(&self) -> &'static str {
        "Raises the first argument to the power of the second"
    }
}

/// Rounds half-way cases towards positive infinity (`round(-2.5) = -2`)
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

fn sec(x: f64) -> f64 {
    1.0 / x.cos()
}

/// Registry for expression functions
#[derive(Default)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, Box<dyn MathFunction>>,
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry").field("functions", &self.names()).finish()
    }
}

static BUILTINS: LazyLock<FunctionRegistry> = LazyLock::new(FunctionRegistry::with_builtins);

impl FunctionRegistry {
    /// Create a new empty function registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry holding the built-in whitelist
    pub fn builtin() -> &'static FunctionRegistry {
        &BUILTINS
    }

    /// Create a function registry with the built-in whitelist
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let unary: [(&'static str, fn(f64) -> f64, &'static str); 14] = [
            ("sin", f64::sin, "Sine of an angle in radians"),
            ("cos", f64::cos, "Cosine of an angle in radians"),
            ("tan", f64::tan, "Tangent of an angle in radians"),
            ("sec", sec, "Secant of an angle in radians"),
            ("asin", f64::asin, "Inverse sine, in radians"),
            ("acos", f64::acos, "Inverse cosine, in radians"),
            ("atan", f64::atan, "Inverse tangent, in radians"),
            ("exp", f64::exp, "Euler's number raised to the argument"),
            ("abs", f64::abs, "Absolute value"),
            ("log", f64::ln, "Natural logarithm"),
            ("sqrt", f64::sqrt, "Square root"),
            ("floor", f64::floor, "Largest integer not above the argument"),
            ("ceil", f64::ceil, "Smallest integer not below the argument"),
            ("round", round_half_up, "Nearest integer, halves rounded up"),
        ];
        for (name, f, description) in unary {
            registry.register(name, Box::new(Unary { f, description }));
        }
        registry.register("pow", Box::new(Pow));
        registry
    }

    /// Register a new function
    pub fn register(&mut self, name: &'static str, function: Box<dyn MathFunction>) {
        self.functions.insert(name, function);
    }

    pub fn get(&self, name: &str) -> Option<&dyn MathFunction> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn call(&self, name: &str, args: &[f64]) -> CalcResult<f64> {
        self.get(name)
            .ok_or_else(|| CalcError::parse(name, format!("unknown function '{name}'")))?
            .call(args)
    }
}
