//! Expression parsing for user-supplied formulas
//!
//! Free text such as `2x^2 + sin(x)` is compiled into a `ParsedFunction`:
//! - lowercased, tokenized, letter runs split into known names
//! - implicit multiplication made explicit (`2x`, `x(x+1)`, `(a)(b)`)
//! - parsed with a Pratt parser into an `Expr` tree
//! - calls resolved only against the closed `FunctionRegistry`
//!
//! Nothing outside the registry can be reached from an expression.

pub mod ast;
pub mod evaluator;
pub mod functions;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use functions::{FunctionRegistry, MathFunction};

use crate::error::{CalcError, CalcResult};
use tracing::debug;

/// A compiled expression over an ordered list of variables
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFunction {
    source: String,
    ast: Expr,
    variables: Vec<String>,
}

impl ParsedFunction {
    /// Evaluate with `args[i]` bound to the i-th variable; evaluation failures yield `NaN`
    pub fn call(&self, args: &[f64]) -> f64 {
        self.try_call(args).unwrap_or(f64::NAN)
    }

    pub fn try_call(&self, args: &[f64]) -> CalcResult<f64> {
        evaluator::evaluate(&self.ast, &self.variables, args, FunctionRegistry::builtin())
    }

    /// Evaluate a single-variable function
    pub fn at(&self, x: f64) -> f64 {
        self.call(&[x])
    }

    pub fn ast(&self) -> &Expr {
        &self.ast
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Parse `expression` into a callable over `variables`
///
/// The result is smoke-tested once with every variable set to 1. A non-finite
/// value there is accepted (`1/(x-1)`), an evaluation error is not.
pub fn parse(expression: &str, variables: &[&str]) -> CalcResult<ParsedFunction> {
    let result = compile(expression, variables);
    if let Err(CalcError::Parse { message, .. }) = &result {
        debug!(expression = %expression, reason = %message, "rejected expression");
    }
    result
}

/// Parse a single-variable function of `x`
pub fn parse_x(expression: &str) -> CalcResult<ParsedFunction> {
    parse(expression, &["x"])
}

fn compile(expression: &str, variables: &[&str]) -> CalcResult<ParsedFunction> {
    let source = expression.trim().to_lowercase();
    let variables: Vec<String> = variables.iter().map(|v| v.to_lowercase()).collect();

    if let Some(bad) = variables.iter().find(|v| v.is_empty() || !v.chars().all(|c| c.is_ascii_lowercase())) {
        return Err(CalcError::parse(expression, format!("invalid variable name '{bad}'")));
    }

    let registry = FunctionRegistry::builtin();
    let tokens = lexer::Lexer::new(&source, &variables, registry).tokenize()?;
    let ast = parser::parse_tokens(&tokens, &source, registry)?;

    let function = ParsedFunction { source, ast, variables };
    let probe = vec![1.0; function.variables.len()];
    function
        .try_call(&probe)
        .map_err(|e| CalcError::parse(expression, format!("smoke test failed: {e}")))?;

    Ok(function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_and_evaluates_common_notation() {
        let f = parse_x("2x^2 + 3x - 5").unwrap();
        assert_eq!(f.at(2.0), 9.0);

        let f = parse_x("xsin(x)").unwrap();
        assert_relative_eq!(f.at(1.0), 1.0_f64.sin());

        let f = parse_x("ln(e^x)").unwrap();
        assert_relative_eq!(f.at(3.0), 3.0, epsilon = 1e-12);

        let f = parse_x("2pi").unwrap();
        assert_relative_eq!(f.at(0.0), std::f64::consts::TAU);
    }

    #[test]
    fn is_case_insensitive() {
        let f = parse_x("SIN(X) + 1").unwrap();
        assert_relative_eq!(f.at(0.0), 1.0);
    }

    #[test]
    fn multiple_variables_bind_in_order() {
        let f = parse("x + 2y", &["x", "y"]).unwrap();
        assert_eq!(f.call(&[1.0, 3.0]), 7.0);
        assert_eq!(f.variables(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn singular_smoke_test_is_accepted() {
        let f = parse_x("1/(x-1)").unwrap();
        assert!(f.at(1.0).is_infinite());
        assert_eq!(f.at(2.0), 1.0);
    }

    #[test]
    fn rejects_disallowed_input() {
        for bad in ["invalidfunc(x)", "alert(1)", "x; x", "x = 2", "`x`", "x[0]", ""] {
            let err = parse_x(bad).unwrap_err();
            assert_eq!(err.category(), "parse", "{bad}");
            assert_eq!(err.to_string(), "Invalid function.");
        }
    }

    #[test]
    fn deeply_nested_input_is_rejected() {
        let deep = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = parse_x(&deep).unwrap_err();
        assert_eq!(err.to_string(), "Invalid function.");

        let shallow = format!("{}x{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse_x(&shallow).unwrap().at(0.5), 0.5);
    }

    #[test]
    fn parsed_function_is_reusable() {
        let f = parse_x("x^3").unwrap();
        let first: Vec<f64> = (0..5).map(|i| f.at(i as f64)).collect();
        let second: Vec<f64> = (0..5).map(|i| f.at(i as f64)).collect();
        assert_eq!(first, second);
    }
}
