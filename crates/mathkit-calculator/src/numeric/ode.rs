//! Explicit Euler integration of `y' = f(x, y)`

use crate::constants::{EULER_STEP, EULER_STEPS, EULER_TRACED_STEPS};

/// One traced Euler step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerStep {
    pub x: f64,
    pub y: f64,
    pub slope: f64,
    pub next_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EulerSolution {
    /// Every visited `(x, y)`, starting with the initial condition
    pub points: Vec<(f64, f64)>,
    /// The first steps, for the step log
    pub trace: Vec<EulerStep>,
    pub step: f64,
}

impl EulerSolution {
    pub fn last(&self) -> (f64, f64) {
        self.points.last().copied().unwrap_or((f64::NAN, f64::NAN))
    }
}

/// Fixed 20 steps of size 0.1 from `(x0, y0)`, tracing the first five
pub fn euler<F: Fn(f64, f64) -> f64>(f: F, x0: f64, y0: f64) -> EulerSolution {
    let h = EULER_STEP;
    let mut points = Vec::with_capacity(EULER_STEPS + 1);
    let mut trace = Vec::with_capacity(EULER_TRACED_STEPS);
    let (mut x, mut y) = (x0, y0);
    points.push((x, y));

    for i in 0..EULER_STEPS {
        let slope = f(x, y);
        let next_y = y + h * slope;
        if i < EULER_TRACED_STEPS {
            trace.push(EulerStep { x, y, slope, next_y });
        }
        y = next_y;
        x += h;
        points.push((x, y));
    }

    EulerSolution { points, trace, step: h }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_slope_is_exact() {
        let solution = euler(|_, _| 2.0, 0.0, 1.0);
        let (x, y) = solution.last();
        assert_abs_diff_eq!(x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 5.0, epsilon = 1e-12);
        assert_eq!(solution.points.len(), 21);
        assert_eq!(solution.trace.len(), 5);
    }

    #[test]
    fn exponential_growth_matches_closed_form() {
        // y' = y, y(0) = 1 -> y_n = 1.1^n
        let solution = euler(|_, y| y, 0.0, 1.0);
        assert_abs_diff_eq!(solution.last().1, 1.1_f64.powi(20), epsilon = 1e-9);
        let first = solution.trace[0];
        assert_eq!((first.x, first.y, first.slope), (0.0, 1.0, 1.0));
        assert_abs_diff_eq!(first.next_y, 1.1);
    }
}
