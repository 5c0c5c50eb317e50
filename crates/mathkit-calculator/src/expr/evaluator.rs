//! Tree-walking evaluator for parsed expressions

use crate::error::{CalcError, CalcResult};
use crate::expr::ast::{BinaryOp, Expr, UnaryOp};
use crate::expr::functions::FunctionRegistry;

/// Evaluate `expr` with `args[i]` bound to `variables[i]`
///
/// Arithmetic follows IEEE semantics: `1/0` is `inf`, `sqrt(-1)` is `NaN`.
pub fn evaluate(
    expr: &Expr,
    variables: &[String],
    args: &[f64],
    functions: &FunctionRegistry,
) -> CalcResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),

        Expr::Variable(name) => variables
            .iter()
            .position(|v| v == name)
            .and_then(|i| args.get(i).copied())
            .ok_or_else(|| CalcError::domain(format!("Variable '{name}' has no value"))),

        Expr::Unary { op: UnaryOp::Neg, operand } => {
            Ok(-evaluate(operand, variables, args, functions)?)
        }

        Expr::Binary { op, left, right } => {
            let l = evaluate(left, variables, args, functions)?;
            let r = evaluate(right, variables, args, functions)?;
            Ok(apply_binary(*op, l, r))
        }

        Expr::Call { name, args: call_args } => {
            let values = call_args
                .iter()
                .map(|a| evaluate(a, variables, args, functions))
                .collect::<CalcResult<Vec<_>>>()?;
            functions.call(name, &values)
        }
    }
}

pub(crate) fn apply_binary(op: BinaryOp, l: f64, r: f64) -> f64 {
    match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
        BinaryOp::Pow => l.powf(r),
    }
}
