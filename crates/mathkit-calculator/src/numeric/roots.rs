//! Closed-form roots of linear and quadratic polynomials

use crate::error::{CalcError, CalcResult};
use num_complex::Complex64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    TwoReal(f64, f64),
    OneReal(f64),
    Complex(Complex64, Complex64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub discriminant: f64,
    pub roots: QuadraticRoots,
    /// Vertex `(-b/2a, f(-b/2a))`
    pub vertex: (f64, f64),
}

/// Roots of `ax² + bx + c = 0`
pub fn quadratic(a: f64, b: f64, c: f64) -> CalcResult<Quadratic> {
    if a == 0.0 {
        return Err(CalcError::domain("a cannot be 0 for a quadratic equation."));
    }

    let discriminant = b * b - 4.0 * a * c;
    let roots = if discriminant > 0.0 {
        let root = discriminant.sqrt();
        QuadraticRoots::TwoReal((-b + root) / (2.0 * a), (-b - root) / (2.0 * a))
    } else if discriminant == 0.0 {
        QuadraticRoots::OneReal(-b / (2.0 * a))
    } else {
        let re = -b / (2.0 * a);
        let im = (-discriminant).sqrt() / (2.0 * a).abs();
        QuadraticRoots::Complex(Complex64::new(re, im), Complex64::new(re, -im))
    };

    let vx = -b / (2.0 * a);
    Ok(Quadratic { discriminant, roots, vertex: (vx, a * vx * vx + b * vx + c) })
}

/// Root of `ax + b = 0`
pub fn linear(a: f64, b: f64) -> CalcResult<f64> {
    if a == 0.0 {
        return Err(CalcError::domain("a cannot be 0"));
    }
    Ok(-b / a)
}
