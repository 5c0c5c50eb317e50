//! Symbolic differentiation over the expression AST
//!
//! Structural rules (sum, constant multiple, product, quotient, power,
//! exponential, chain) are applied recursively. Every rule that fires is
//! recorded as a step. Inputs outside the supported rule set (`abs`, `floor`,
//! variable exponents over a variable base, ...) yield `None` and the caller
//! differentiates numerically instead.

mod simplify;

pub use simplify::simplify;

use crate::expr::{self, BinaryOp, Expr, ParsedFunction, UnaryOp};
use std::f64::consts::E;
use tracing::debug;

/// Closed-form first derivative with the trail of rules applied
#[derive(Debug, Clone)]
pub struct SymbolicDerivative {
    /// Rendered derivative, parseable by `expr::parse`
    pub derivative: String,
    /// Rule trail, outermost rule last
    pub steps: Vec<String>,
    /// The derivative compiled for evaluation
    pub function: ParsedFunction,
}

/// Differentiate `expression` with respect to `x`
pub fn differentiate(expression: &str) -> Option<SymbolicDerivative> {
    differentiate_wrt(expression, "x")
}

pub fn differentiate_wrt(expression: &str, var: &str) -> Option<SymbolicDerivative> {
    let parsed = expr::parse(expression, &[var]).ok()?;
    let mut differentiator = Differentiator { var, steps: Vec::new() };

    let Some(derivative) = differentiator.derive(parsed.ast(), true) else {
        debug!(expression = %expression, "no symbolic rule applies, falling back to numeric");
        return None;
    };

    let derivative = simplify(derivative).to_string();
    let function = expr::parse(&derivative, &[var]).ok()?;
    Some(SymbolicDerivative { derivative, steps: differentiator.steps, function })
}

/// Derivative tree of `expr` with respect to `var`, without the step trail
pub fn derivative_expr(expr: &Expr, var: &str) -> Option<Expr> {
    Differentiator { var, steps: Vec::new() }.derive(expr, false).map(simplify)
}

struct Differentiator<'a> {
    var: &'a str,
    steps: Vec<String>,
}

impl<'a> Differentiator<'a> {
    fn is_constant(&self, e: &Expr) -> bool {
        !e.contains_var(self.var)
    }

    fn record(&mut self, e: &Expr, d: &Expr, rule: &str) {
        self.steps.push(format!(
            "d/d{} [{}] = {}   [{}]",
            self.var,
            e,
            simplify(d.clone()),
            rule
        ));
    }

    /// `term` marks additive terms; leaf rules are only logged for those
    fn derive(&mut self, e: &Expr, term: bool) -> Option<Expr> {
        if self.is_constant(e) {
            let d = Expr::num(0.0);
            if term {
                self.record(e, &d, "Constant Rule");
            }
            return Some(d);
        }

        let (d, rule) = match e {
            Expr::Number(_) => return Some(Expr::num(0.0)),
            Expr::Variable(_) => {
                let d = Expr::num(1.0);
                if term {
                    self.record(e, &d, "Power Rule");
                }
                return Some(d);
            }

            Expr::Unary { op: UnaryOp::Neg, operand } => {
                (Expr::neg(self.derive(operand, false)?), "Constant Multiple Rule")
            }

            Expr::Binary { op: BinaryOp::Add, left, right } => {
                (Expr::add(self.derive(left, true)?, self.derive(right, true)?), "Sum Rule")
            }
            Expr::Binary { op: BinaryOp::Sub, left, right } => {
                (Expr::sub(self.derive(left, true)?, self.derive(right, true)?), "Difference Rule")
            }

            Expr::Binary { op: BinaryOp::Mul, left, right } => self.product(left, right)?,
            Expr::Binary { op: BinaryOp::Div, left, right } => self.quotient(left, right)?,
            Expr::Binary { op: BinaryOp::Pow, left, right } => self.power(left, right)?,

            Expr::Call { name, args } => match args.as_slice() {
                [base, exponent] if name == "pow" => self.power(base, exponent)?,
                [u] => self.call(name, u)?,
                _ => return None,
            },
        };

        self.record(e, &d, rule);
        Some(d)
    }

    fn product(&mut self, u: &Expr, v: &Expr) -> Option<(Expr, &'static str)> {
        if self.is_constant(u) {
            return Some((Expr::mul(u.clone(), self.derive(v, false)?), "Constant Multiple Rule"));
        }
        if self.is_constant(v) {
            return Some((Expr::mul(v.clone(), self.derive(u, false)?), "Constant Multiple Rule"));
        }
        let du = self.derive(u, false)?;
        let dv = self.derive(v, false)?;
        Some((
            Expr::add(Expr::mul(du, v.clone()), Expr::mul(u.clone(), dv)),
            "Product Rule",
        ))
    }

    fn quotient(&mut self, u: &Expr, v: &Expr) -> Option<(Expr, &'static str)> {
        if self.is_constant(v) {
            return Some((Expr::div(self.derive(u, false)?, v.clone()), "Constant Multiple Rule"));
        }
        let du = self.derive(u, false)?;
        let dv = self.derive(v, false)?;
        Some((
            Expr::div(
                Expr::sub(Expr::mul(du, v.clone()), Expr::mul(u.clone(), dv)),
                Expr::pow(v.clone(), Expr::num(2.0)),
            ),
            "Quotient Rule",
        ))
    }

    fn power(&mut self, base: &Expr, exponent: &Expr) -> Option<(Expr, &'static str)> {
        match (self.is_constant(base), self.is_constant(exponent)) {
            // n * u^(n-1) * u'
            (false, true) => {
                let du = self.derive(base, false)?;
                let reduced = Expr::sub(exponent.clone(), Expr::num(1.0));
                let d = Expr::mul(
                    Expr::mul(exponent.clone(), Expr::pow(base.clone(), reduced)),
                    du,
                );
                Some((d, self.chain_label(base, "Power Rule")))
            }
            // e^u * u'  or  a^u * ln(a) * u'
            (true, false) => {
                let du = self.derive(exponent, false)?;
                let power = Expr::pow(base.clone(), exponent.clone());
                let d = if base.as_number() == Some(E) {
                    Expr::mul(power, du)
                } else {
                    Expr::mul(Expr::mul(power, Expr::call("log", base.clone())), du)
                };
                Some((d, self.chain_label(exponent, "Exponential Rule")))
            }
            _ => None,
        }
    }

    fn call(&mut self, name: &str, u: &Expr) -> Option<(Expr, &'static str)> {
        let du = self.derive(u, false)?;
        let one = || Expr::num(1.0);
        let two = || Expr::num(2.0);

        let (outer, base_rule) = match name {
            "sin" => (Expr::call("cos", u.clone()), "Trigonometric Rule"),
            "cos" => (Expr::neg(Expr::call("sin", u.clone())), "Trigonometric Rule"),
            "tan" => (Expr::pow(Expr::call("sec", u.clone()), two()), "Trigonometric Rule"),
            "sec" => (
                Expr::mul(Expr::call("sec", u.clone()), Expr::call("tan", u.clone())),
                "Trigonometric Rule",
            ),
            "asin" => (
                Expr::div(one(), Expr::call("sqrt", Expr::sub(one(), Expr::pow(u.clone(), two())))),
                "Inverse Trigonometric Rule",
            ),
            "acos" => (
                Expr::neg(Expr::div(
                    one(),
                    Expr::call("sqrt", Expr::sub(one(), Expr::pow(u.clone(), two()))),
                )),
                "Inverse Trigonometric Rule",
            ),
            "atan" => (
                Expr::div(one(), Expr::add(one(), Expr::pow(u.clone(), two()))),
                "Inverse Trigonometric Rule",
            ),
            "exp" => (Expr::call("exp", u.clone()), "Exponential Rule"),
            "log" => (Expr::div(one(), u.clone()), "Logarithm Rule"),
            "sqrt" => (Expr::div(one(), Expr::mul(two(), Expr::call("sqrt", u.clone()))), "Root Rule"),
            _ => return None,
        };

        Some((Expr::mul(outer, du), self.chain_label(u, base_rule)))
    }

    fn chain_label(&self, inner: &Expr, rule: &'static str) -> &'static str {
        if matches!(inner, Expr::Variable(v) if v == self.var) {
            return rule;
        }
        match rule {
            "Power Rule" => "Power Rule + Chain Rule",
            "Exponential Rule" => "Exponential Rule + Chain Rule",
            "Trigonometric Rule" => "Trigonometric Rule + Chain Rule",
            "Inverse Trigonometric Rule" => "Inverse Trigonometric Rule + Chain Rule",
            "Logarithm Rule" => "Logarithm Rule + Chain Rule",
            "Root Rule" => "Root Rule + Chain Rule",
            _ => "Chain Rule",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn d(expression: &str) -> String {
        differentiate(expression).map(|r| r.derivative).unwrap_or_default()
    }

    #[test]
    fn power_rule() {
        assert_eq!(d("x^2"), "2 * x");
        assert_eq!(d("3x^2"), "6 * x");
        assert_eq!(d("x"), "1");
        assert_eq!(d("5"), "0");
        assert_eq!(d("2x + 3"), "2");
    }

    #[test]
    fn trig_exp_and_log() {
        assert_eq!(d("sin(x)"), "cos(x)");
        assert_eq!(d("cos(x)"), "-sin(x)");
        assert_eq!(d("tan(x)"), "sec(x)^2");
        assert_eq!(d("e^x"), "e^x");
        assert_eq!(d("ln(x)"), "1 / x");
    }

    #[test]
    fn product_rule_handles_three_factors() {
        assert_eq!(d("xsin(x)"), "sin(x) + x * cos(x)");
        let result = differentiate("x * x * x").unwrap();
        assert_abs_diff_eq!(result.function.at(2.0), 12.0, epsilon = 1e-12);
        assert!(result.steps.iter().any(|s| s.ends_with("[Product Rule]")));
    }

    #[test]
    fn chain_rule_on_composites() {
        let result = differentiate("sin(x^2)").unwrap();
        assert_eq!(result.derivative, "cos(x^2) * 2 * x");
        assert!(result.steps.iter().any(|s| s.contains("Chain Rule")));
    }

    #[test]
    fn quotient_rule_value() {
        let result = differentiate("x / (x + 1)").unwrap();
        // 1 / (x + 1)^2
        assert_abs_diff_eq!(result.function.at(1.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn constant_base_exponential() {
        let result = differentiate("2^x").unwrap();
        assert_abs_diff_eq!(result.function.at(1.0), 2.0 * 2.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn unsupported_nodes_fall_back() {
        assert!(differentiate("abs(x)").is_none());
        assert!(differentiate("x^x").is_none());
        assert!(differentiate("floor(x) + x").is_none());
        assert!(differentiate("invalid(x)").is_none());
    }

    #[test]
    fn steps_name_the_rules() {
        let result = differentiate("x^2").unwrap();
        assert_eq!(result.steps, vec!["d/dx [x^2] = 2 * x   [Power Rule]".to_string()]);
    }
}
