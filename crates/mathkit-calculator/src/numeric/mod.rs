//! Numerical core: finite differences, quadrature, limits, ODEs, linear
//! algebra, Fourier analysis and polynomial roots.
//!
//! Every routine runs a fixed, bounded amount of work.

pub mod differentiation;
pub mod fourier;
pub mod integration;
pub mod limits;
pub mod linalg;
pub mod ode;
pub mod roots;

pub use differentiation::{DiffMethod, DiffOrder};

/// Sample `f` on `[start, end]` in increments of `step`, end inclusive
///
/// Points are computed as `start + i * step` so rounding does not accumulate.
pub fn sample<F: Fn(f64) -> f64>(f: F, start: f64, end: f64, step: f64) -> Vec<(f64, f64)> {
    if step <= 0.0 || step.is_nan() || !start.is_finite() || !end.is_finite() || end < start {
        return Vec::new();
    }
    let count = ((end - start) / step + 1e-9).floor() as usize + 1;
    (0..count)
        .map(|i| {
            let x = start + i as f64 * step;
            (x, f(x))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_includes_both_ends() {
        let points = sample(|x| x * 2.0, 0.0, 1.0, 0.1);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], (0.0, 0.0));
        assert!((points[10].0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_ranges_are_empty() {
        assert!(sample(|x| x, 1.0, 0.0, 0.1).is_empty());
        assert!(sample(|x| x, 0.0, 1.0, 0.0).is_empty());
    }
}
