//! Definite integration

use crate::constants::TRAPEZOID_INTERVALS;
use crate::error::{CalcError, CalcResult};

/// Result of a composite trapezoid integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trapezoid {
    pub value: f64,
    pub intervals: usize,
    pub width: f64,
}

/// Composite trapezoidal rule over `[a, b]` with a fixed 1000 sub-intervals
///
/// `a < b` is required; reversed limits are rejected rather than swapped.
pub fn trapezoid<F: Fn(f64) -> f64>(f: F, a: f64, b: f64) -> CalcResult<Trapezoid> {
    if a >= b {
        return Err(CalcError::range(
            "Lower limit must be less than upper limit for this implementation.",
        ));
    }

    let n = TRAPEZOID_INTERVALS;
    let h = (b - a) / n as f64;
    let interior: f64 = (1..n).map(|i| f(a + i as f64 * h)).sum();
    let value = (0.5 * (f(a) + f(b)) + interior) * h;

    Ok(Trapezoid { value, intervals: n, width: h })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn integrates_square_on_unit_interval() {
        let result = trapezoid(|x| x * x, 0.0, 1.0).unwrap();
        assert_abs_diff_eq!(result.value, 1.0 / 3.0, epsilon = 1e-3);
        assert_eq!(result.intervals, 1000);
        assert_abs_diff_eq!(result.width, 0.001);
    }

    #[test]
    fn integrates_sine_over_half_period() {
        let result = trapezoid(f64::sin, 0.0, std::f64::consts::PI).unwrap();
        assert_abs_diff_eq!(result.value, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn rejects_reversed_or_empty_interval() {
        assert!(trapezoid(|x| x, 1.0, 0.0).is_err());
        let err = trapezoid(|x| x, 2.0, 2.0).unwrap_err();
        assert_eq!(err.category(), "range");
    }
}
