//! Abstract syntax tree for parsed expressions

use crate::format;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::{E, PI};
use std::fmt;

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Numeric literal; `pi` and `e` are stored as their values
    Number(f64),
    /// Declared variable
    Variable(String),
    /// Unary operation
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Binary operation
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    /// Call of a whitelisted function
    Call { name: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    /// Parser binding power
    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 10,
            BinaryOp::Mul | BinaryOp::Div => 20,
            BinaryOp::Pow => 30,
        }
    }

    pub(crate) fn is_right_associative(self) -> bool {
        self == BinaryOp::Pow
    }
}

/// Binding power of unary minus: tighter than `*`, looser than `^`
pub(crate) const UNARY_PRECEDENCE: u8 = 25;
const ATOM_PRECEDENCE: u8 = 40;

impl Expr {
    pub fn num(value: f64) -> Self {
        Expr::Number(value)
    }

    pub fn var(name: &str) -> Self {
        Expr::Variable(name.to_string())
    }

    pub fn neg(operand: Expr) -> Self {
        Expr::Unary { op: UnaryOp::Neg, operand: Box::new(operand) }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Div, left, right)
    }

    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::binary(BinaryOp::Pow, base, exponent)
    }

    pub fn call(name: &str, arg: Expr) -> Self {
        Expr::Call { name: name.to_string(), args: vec![arg] }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Height of the tree; a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            match node {
                Expr::Number(_) | Expr::Variable(_) => {}
                Expr::Unary { operand, .. } => pending.push((operand, depth + 1)),
                Expr::Binary { left, right, .. } => {
                    pending.push((left, depth + 1));
                    pending.push((right, depth + 1));
                }
                Expr::Call { args, .. } => pending.extend(args.iter().map(|a| (a, depth + 1))),
            }
        }
        deepest
    }

    /// True when `name` occurs anywhere in the tree
    pub fn contains_var(&self, name: &str) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Variable(v) => v == name,
            Expr::Unary { operand, .. } => operand.contains_var(name),
            Expr::Binary { left, right, .. } => left.contains_var(name) || right.contains_var(name),
            Expr::Call { args, .. } => args.iter().any(|a| a.contains_var(name)),
        }
    }

    /// Variables referenced in the expression, sorted
    pub fn variables(&self) -> Vec<String> {
        let mut found = BTreeSet::new();
        self.collect_variables(&mut found);
        found.into_iter().collect()
    }

    fn collect_variables(&self, found: &mut BTreeSet<String>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(v) => {
                found.insert(v.clone());
            }
            Expr::Unary { operand, .. } => operand.collect_variables(found),
            Expr::Binary { left, right, .. } => {
                left.collect_variables(found);
                right.collect_variables(found);
            }
            Expr::Call { args, .. } => args.iter().for_each(|a| a.collect_variables(found)),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Number(n) if *n < 0.0 => UNARY_PRECEDENCE,
            Expr::Number(_) | Expr::Variable(_) | Expr::Call { .. } => ATOM_PRECEDENCE,
            Expr::Unary { .. } => UNARY_PRECEDENCE,
            Expr::Binary { op, .. } => op.precedence(),
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) if *n == PI => write!(f, "pi"),
            Expr::Number(n) if *n == E => write!(f, "e"),
            Expr::Number(n) => write!(f, "{}", format::number(*n)),
            Expr::Variable(v) => write!(f, "{v}"),
            Expr::Unary { operand, .. } => {
                write!(f, "-")?;
                operand.fmt_child(f, UNARY_PRECEDENCE)
            }
            Expr::Binary { op: BinaryOp::Pow, left, right } => {
                left.fmt_child(f, BinaryOp::Pow.precedence() + 1)?;
                write!(f, "^")?;
                right.fmt_child(f, BinaryOp::Pow.precedence())
            }
            Expr::Binary { op, left, right } => {
                let prec = op.precedence();
                left.fmt_child(f, prec)?;
                write!(f, " {} ", op.symbol())?;
                let right_min = match op {
                    BinaryOp::Sub | BinaryOp::Div => prec + 1,
                    _ => prec,
                };
                right.fmt_child(f, right_min)
            }
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_minimal_parentheses() {
        let e = Expr::mul(Expr::num(2.0), Expr::add(Expr::var("x"), Expr::num(1.0)));
        assert_eq!(e.to_string(), "2 * (x + 1)");

        let e = Expr::sub(Expr::var("a"), Expr::sub(Expr::var("b"), Expr::var("c")));
        assert_eq!(e.to_string(), "a - (b - c)");

        let e = Expr::pow(Expr::pow(Expr::var("x"), Expr::num(2.0)), Expr::num(3.0));
        assert_eq!(e.to_string(), "(x^2)^3");

        let e = Expr::neg(Expr::pow(Expr::var("x"), Expr::num(2.0)));
        assert_eq!(e.to_string(), "-x^2");

        let e = Expr::pow(Expr::num(-2.0), Expr::var("x"));
        assert_eq!(e.to_string(), "(-2)^x");
    }

    #[test]
    fn constants_render_by_name() {
        let e = Expr::pow(Expr::num(E), Expr::mul(Expr::num(PI), Expr::var("x")));
        assert_eq!(e.to_string(), "e^(pi * x)");
    }

    #[test]
    fn variables_are_collected_once() {
        let e = Expr::add(
            Expr::call("sin", Expr::var("x")),
            Expr::mul(Expr::var("x"), Expr::var("t")),
        );
        assert_eq!(e.variables(), vec!["t".to_string(), "x".to_string()]);
        assert!(e.contains_var("t"));
        assert!(!e.contains_var("y"));
    }
}
