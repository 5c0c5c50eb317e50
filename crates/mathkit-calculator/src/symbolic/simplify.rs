//! Light algebraic clean-up of derivative trees
//!
//! Folds `0`/`1` identities and numeric sub-expressions so that rule output like
//! `2 * x^1 * 1` reads `2 * x`. It is not a normal form.

use crate::expr::evaluator::apply_binary;
use crate::expr::{BinaryOp, Expr, UnaryOp};
use std::f64::consts::{E, PI};

pub fn simplify(expr: Expr) -> Expr {
    match expr {
        Expr::Number(_) | Expr::Variable(_) => expr,
        Expr::Unary { op: UnaryOp::Neg, operand } => negate(simplify(*operand)),
        Expr::Binary { op, left, right } => simplify_binary(op, simplify(*left), simplify(*right)),
        Expr::Call { name, args } => Expr::Call { name, args: args.into_iter().map(simplify).collect() },
    }
}

/// Numbers that render by name are kept symbolic
fn foldable(n: f64) -> bool {
    n != PI && n != E
}

fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Number(n) => Expr::Number(-n),
        Expr::Unary { op: UnaryOp::Neg, operand } => *operand,
        Expr::Binary { op: BinaryOp::Mul, left, right } if left.as_number().is_some_and(foldable) => {
            let n = left.as_number().unwrap_or(1.0);
            simplify_binary(BinaryOp::Mul, Expr::Number(-n), *right)
        }
        other => Expr::neg(other),
    }
}

fn simplify_binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
        let folded = apply_binary(op, a, b);
        if foldable(a) && foldable(b) && folded.is_finite() {
            return Expr::Number(folded);
        }
    }

    match op {
        BinaryOp::Add => simplify_add(left, right),
        BinaryOp::Sub => simplify_sub(left, right),
        BinaryOp::Mul => simplify_mul(left, right),
        BinaryOp::Div => simplify_div(left, right),
        BinaryOp::Pow => simplify_pow(left, right),
    }
}

fn simplify_add(left: Expr, right: Expr) -> Expr {
    if left.as_number() == Some(0.0) {
        return right;
    }
    match right {
        Expr::Number(n) if n == 0.0 => left,
        Expr::Number(n) if n < 0.0 => Expr::sub(left, Expr::Number(-n)),
        Expr::Unary { op: UnaryOp::Neg, operand } => Expr::sub(left, *operand),
        Expr::Binary { op: BinaryOp::Mul, left: ref coeff, right: ref rest }
            if coeff.as_number().is_some_and(|c| c < 0.0) =>
        {
            let c = coeff.as_number().unwrap_or(0.0);
            Expr::sub(left, simplify_mul(Expr::Number(-c), (**rest).clone()))
        }
        right => Expr::add(left, right),
    }
}

fn simplify_sub(left: Expr, right: Expr) -> Expr {
    if right.as_number() == Some(0.0) {
        return left;
    }
    if left.as_number() == Some(0.0) {
        return negate(right);
    }
    match right {
        Expr::Unary { op: UnaryOp::Neg, operand } => Expr::add(left, *operand),
        Expr::Number(n) if n < 0.0 => Expr::add(left, Expr::Number(-n)),
        right => Expr::sub(left, right),
    }
}

fn simplify_mul(left: Expr, right: Expr) -> Expr {
    match (left.as_number(), right.as_number()) {
        (Some(a), _) | (_, Some(a)) if a == 0.0 => return Expr::Number(0.0),
        (Some(a), _) if a == 1.0 => return right,
        (_, Some(b)) if b == 1.0 => return left,
        (Some(a), _) if a == -1.0 => return negate(right),
        (_, Some(b)) if b == -1.0 => return negate(left),
        // coefficient first
        (None, Some(_)) => return simplify_mul(right, left),
        _ => {}
    }

    // c1 * (c2 * u) -> (c1 * c2) * u
    if let (Some(a), Expr::Binary { op: BinaryOp::Mul, left: inner, right: rest }) = (left.as_number(), &right) {
        if let Some(b) = inner.as_number() {
            if foldable(a) && foldable(b) {
                return simplify_mul(Expr::Number(a * b), (**rest).clone());
            }
        }
    }

    // (-u) * v -> -(u * v)
    if let Expr::Unary { op: UnaryOp::Neg, operand } = left {
        return negate(simplify_mul(*operand, right));
    }

    Expr::mul(left, right)
}

fn simplify_div(left: Expr, right: Expr) -> Expr {
    if left.as_number() == Some(0.0) && right.as_number() != Some(0.0) {
        return Expr::Number(0.0);
    }
    if right.as_number() == Some(1.0) {
        return left;
    }
    Expr::div(left, right)
}

fn simplify_pow(base: Expr, exponent: Expr) -> Expr {
    match exponent.as_number() {
        Some(n) if n == 0.0 => Expr::Number(1.0),
        Some(n) if n == 1.0 => base,
        _ => Expr::pow(base, exponent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn folds_identities() {
        let e = Expr::mul(Expr::mul(Expr::num(2.0), Expr::pow(x(), Expr::num(1.0))), Expr::num(1.0));
        assert_eq!(simplify(e).to_string(), "2 * x");

        let e = Expr::add(Expr::num(0.0), Expr::mul(x(), Expr::num(0.0)));
        assert_eq!(simplify(e), Expr::num(0.0));
    }

    #[test]
    fn collects_numeric_coefficients() {
        let e = Expr::mul(Expr::num(3.0), Expr::mul(Expr::num(2.0), x()));
        assert_eq!(simplify(e).to_string(), "6 * x");

        let e = Expr::mul(x(), Expr::num(4.0));
        assert_eq!(simplify(e).to_string(), "4 * x");
    }

    #[test]
    fn signs_are_tidied() {
        let e = Expr::add(x(), Expr::mul(Expr::num(-2.0), x()));
        assert_eq!(simplify(e).to_string(), "x - 2 * x");

        let e = Expr::neg(Expr::mul(Expr::num(2.0), x()));
        assert_eq!(simplify(e).to_string(), "-2 * x");

        let e = Expr::sub(x(), Expr::neg(Expr::num(3.0)));
        assert_eq!(simplify(e).to_string(), "x + 3");
    }

    #[test]
    fn named_constants_are_not_folded() {
        let e = Expr::mul(Expr::num(2.0), Expr::num(PI));
        assert_eq!(simplify(e).to_string(), "2 * pi");
    }
}
