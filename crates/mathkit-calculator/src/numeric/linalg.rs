//! Small dense linear-algebra kernels (2×2 matrices, 3-vectors)

use crate::error::{CalcError, CalcResult};
use num_complex::Complex64;

/// Row-major 2×2 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2(pub [[f64; 2]; 2]);

impl Matrix2 {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Matrix2([[a, b], [c, d]])
    }

    pub fn determinant(&self) -> f64 {
        let [[a, b], [c, d]] = self.0;
        a * d - b * c
    }

    pub fn trace(&self) -> f64 {
        self.0[0][0] + self.0[1][1]
    }

    pub fn multiply(&self, other: &Matrix2) -> Matrix2 {
        let mut out = [[0.0; 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.0[i][0] * other.0[0][j] + self.0[i][1] * other.0[1][j];
            }
        }
        Matrix2(out)
    }

    /// Roots of `λ² - tr(A)λ + det(A) = 0`
    pub fn eigenvalues(&self) -> Eigenvalues {
        let trace = self.trace();
        let det = self.determinant();
        let discriminant = trace * trace - 4.0 * det;

        if discriminant > 0.0 {
            let root = discriminant.sqrt();
            Eigenvalues::RealDistinct((trace + root) / 2.0, (trace - root) / 2.0)
        } else if discriminant == 0.0 {
            Eigenvalues::Repeated(trace / 2.0)
        } else {
            let pair = Complex64::new(trace / 2.0, (-discriminant).sqrt() / 2.0);
            Eigenvalues::ComplexPair(pair, pair.conj())
        }
    }
}

/// Eigenvalues of a 2×2 matrix, classified by the discriminant sign
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eigenvalues {
    RealDistinct(f64, f64),
    Repeated(f64),
    ComplexPair(Complex64, Complex64),
}

impl Eigenvalues {
    pub fn discriminant_sign(&self) -> i8 {
        match self {
            Eigenvalues::RealDistinct(..) => 1,
            Eigenvalues::Repeated(_) => 0,
            Eigenvalues::ComplexPair(..) => -1,
        }
    }
}

pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Solution of `a1·x + b1·y = c1`, `a2·x + b2·y = c2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cramer {
    pub x: f64,
    pub y: f64,
    pub determinant: f64,
}

/// Cramer's rule; an exactly zero determinant has no unique solution
pub fn solve_2x2(a1: f64, b1: f64, c1: f64, a2: f64, b2: f64, c2: f64) -> CalcResult<Cramer> {
    let determinant = a1 * b2 - a2 * b1;
    if determinant == 0.0 {
        return Err(CalcError::domain(
            "Determinant is zero. No unique solution (parallel or identical lines).",
        ));
    }
    Ok(Cramer {
        x: (c1 * b2 - c2 * b1) / determinant,
        y: (a1 * c2 - a2 * c1) / determinant,
        determinant,
    })
}
