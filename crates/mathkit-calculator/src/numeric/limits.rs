//! Two-sided limit probing

use crate::constants::{LIMIT_DIVERGENCE_THRESHOLD, LIMIT_PROBE_STEP};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitEstimate {
    /// Both sides agree; the value is their average
    Converges { left: f64, right: f64, value: f64 },
    /// The sides differ by more than the threshold or are not finite
    Diverges { left: f64, right: f64 },
}

/// Probe `f` at `a - h` and `a + h` with `h = 1e-5`
pub fn probe<F: Fn(f64) -> f64>(f: F, a: f64) -> LimitEstimate {
    let left = f(a - LIMIT_PROBE_STEP);
    let right = f(a + LIMIT_PROBE_STEP);

    if !left.is_finite() || !right.is_finite() || (left - right).abs() > LIMIT_DIVERGENCE_THRESHOLD {
        LimitEstimate::Diverges { left, right }
    } else {
        LimitEstimate::Converges { left, right, value: (left + right) / 2.0 }
    }
}
