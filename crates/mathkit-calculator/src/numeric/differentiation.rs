//! Finite-difference differentiation

use crate::constants::VERTICAL_TANGENT_EPSILON;
use crate::error::{CalcError, CalcResult};
use std::fmt;
use std::str::FromStr;

/// Finite-difference stencil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffMethod {
    Forward,
    Backward,
    #[default]
    Central,
    FivePoint,
}

impl FromStr for DiffMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "forward" => Ok(DiffMethod::Forward),
            "backward" => Ok(DiffMethod::Backward),
            "central" => Ok(DiffMethod::Central),
            "fivepoint" => Ok(DiffMethod::FivePoint),
            other => Err(CalcError::invalid("method", format!("unknown difference method '{other}'"))),
        }
    }
}

impl fmt::Display for DiffMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiffMethod::Forward => "Forward",
            DiffMethod::Backward => "Backward",
            DiffMethod::Central => "Central",
            DiffMethod::FivePoint => "Fivepoint",
        };
        write!(f, "{name}")
    }
}

/// Derivative order supported by the stencils
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOrder {
    First,
    Second,
}

impl TryFrom<i64> for DiffOrder {
    type Error = CalcError;

    fn try_from(order: i64) -> Result<Self, Self::Error> {
        match order {
            1 => Ok(DiffOrder::First),
            2 => Ok(DiffOrder::Second),
            _ => Err(CalcError::range("Only first and second order derivatives are supported.")),
        }
    }
}

fn check_step(h: f64) -> CalcResult<()> {
    if h > 0.0 && h.is_finite() {
        Ok(())
    } else {
        Err(CalcError::domain("Step size h must be positive."))
    }
}

/// Approximate the derivative of `f` at `x`
///
/// Second order uses the three-point stencil, or the five-point one when
/// `method` is `FivePoint`.
pub fn derivative<F>(f: F, x: f64, h: f64, order: DiffOrder, method: DiffMethod) -> CalcResult<f64>
where
    F: Fn(f64) -> f64,
{
    check_step(h)?;
    Ok(stencil(&f, x, h, order, method))
}

fn stencil<F: Fn(f64) -> f64>(f: &F, x: f64, h: f64, order: DiffOrder, method: DiffMethod) -> f64 {
    match (order, method) {
        (DiffOrder::First, DiffMethod::Forward) => (f(x + h) - f(x)) / h,
        (DiffOrder::First, DiffMethod::Backward) => (f(x) - f(x - h)) / h,
        (DiffOrder::First, DiffMethod::Central) => (f(x + h) - f(x - h)) / (2.0 * h),
        (DiffOrder::First, DiffMethod::FivePoint) => {
            (-f(x + 2.0 * h) + 8.0 * f(x + h) - 8.0 * f(x - h) + f(x - 2.0 * h)) / (12.0 * h)
        }
        (DiffOrder::Second, DiffMethod::FivePoint) => {
            (-f(x + 2.0 * h) + 16.0 * f(x + h) - 30.0 * f(x) + 16.0 * f(x - h) - f(x - 2.0 * h))
                / (12.0 * h * h)
        }
        (DiffOrder::Second, _) => (f(x + h) - 2.0 * f(x) + f(x - h)) / (h * h),
    }
}

/// dy/dx of a parametric curve at parameter `t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricDerivative {
    pub dx_dt: f64,
    pub dy_dt: f64,
    pub value: f64,
}

/// Differentiate the curve `(x(t), y(t))` at `t`
///
/// Returns a domain error when `|dx/dt|` is below `1e-10`.
pub fn parametric<X, Y>(
    x: X,
    y: Y,
    t: f64,
    h: f64,
    order: DiffOrder,
    method: DiffMethod,
) -> CalcResult<ParametricDerivative>
where
    X: Fn(f64) -> f64,
    Y: Fn(f64) -> f64,
{
    check_step(h)?;
    let dx = |s: f64| stencil(&x, s, h, DiffOrder::First, method);
    let dy = |s: f64| stencil(&y, s, h, DiffOrder::First, method);

    let dx_dt = dx(t);
    let dy_dt = dy(t);
    if dx_dt.abs() < VERTICAL_TANGENT_EPSILON || !dx_dt.is_finite() {
        return Err(CalcError::domain(
            "Vertical tangent detected (dx/dt ≈ 0). Derivative undefined.",
        ));
    }

    let value = match order {
        DiffOrder::First => dy_dt / dx_dt,
        DiffOrder::Second => {
            let slope = |s: f64| {
                let dxs = dx(s);
                if dxs.abs() > VERTICAL_TANGENT_EPSILON { dy(s) / dxs } else { 0.0 }
            };
            stencil(&slope, t, h, DiffOrder::First, method) / dx_dt
        }
    };

    Ok(ParametricDerivative { dx_dt, dy_dt, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(x: f64) -> f64 {
        x * x
    }

    #[test]
    fn central_difference_of_square() {
        let d = derivative(square, 2.0, 1e-4, DiffOrder::First, DiffMethod::Central).unwrap();
        assert_abs_diff_eq!(d, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn all_first_order_methods_converge() {
        for method in [DiffMethod::Forward, DiffMethod::Backward, DiffMethod::Central, DiffMethod::FivePoint] {
            let d = derivative(f64::sin, 1.0, 1e-4, DiffOrder::First, method).unwrap();
            assert_abs_diff_eq!(d, 1.0_f64.cos(), epsilon = 1e-3);
        }
    }

    #[test]
    fn second_order_stencils() {
        let cube = |x: f64| x * x * x;
        let three = derivative(cube, 2.0, 1e-3, DiffOrder::Second, DiffMethod::Central).unwrap();
        let five = derivative(cube, 2.0, 1e-2, DiffOrder::Second, DiffMethod::FivePoint).unwrap();
        assert_abs_diff_eq!(three, 12.0, epsilon = 1e-3);
        assert_abs_diff_eq!(five, 12.0, epsilon = 1e-6);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        assert!(derivative(square, 1.0, 0.0, DiffOrder::First, DiffMethod::Central).is_err());
        assert!(derivative(square, 1.0, -1e-3, DiffOrder::First, DiffMethod::Central).is_err());
    }

    #[test]
    fn parametric_circle_slope() {
        // x = cos t, y = sin t; dy/dx = -cot t
        let t = std::f64::consts::FRAC_PI_4;
        let d = parametric(f64::cos, f64::sin, t, 1e-4, DiffOrder::First, DiffMethod::Central).unwrap();
        assert_abs_diff_eq!(d.value, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn parametric_second_order() {
        // x = t, y = t^2: d2y/dx2 = 2
        let d = parametric(|t| t, |t| t * t, 1.0, 1e-3, DiffOrder::Second, DiffMethod::Central).unwrap();
        assert_abs_diff_eq!(d.value, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn vertical_tangent_is_reported() {
        let err = parametric(|_| 3.0, |t| t, 0.0, 1e-4, DiffOrder::First, DiffMethod::Central).unwrap_err();
        assert!(err.to_string().contains("Vertical tangent"));
    }

    #[test]
    fn method_names_parse() {
        assert_eq!("fivepoint".parse::<DiffMethod>().unwrap(), DiffMethod::FivePoint);
        assert_eq!("Five-Point".parse::<DiffMethod>().unwrap(), DiffMethod::FivePoint);
        assert!("simpson".parse::<DiffMethod>().is_err());
        assert!(DiffOrder::try_from(3).is_err());
    }
}
