//! Physical constants and fixed numerical parameters of the engine.

/// Gravitational constant (m^3 kg^-1 s^-2)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Standard gravity (m/s^2)
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Coulomb's constant (N m^2 C^-2)
pub const COULOMB_CONSTANT: f64 = 8.9875517923e9;

/// Deepest expression nesting the parser accepts
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Most tokens accepted in a single expression
pub const MAX_EXPRESSION_TOKENS: usize = 4096;

/// Sub-intervals of the composite trapezoidal rule
pub const TRAPEZOID_INTERVALS: usize = 1000;

/// Offset used to probe a limit from both sides
pub const LIMIT_PROBE_STEP: f64 = 1e-5;

/// Absolute gap between the one-sided values above which a limit diverges
pub const LIMIT_DIVERGENCE_THRESHOLD: f64 = 0.1;

/// Euler method step size
pub const EULER_STEP: f64 = 0.1;

/// Number of Euler steps taken
pub const EULER_STEPS: usize = 20;

/// Number of Euler steps echoed to the step log
pub const EULER_TRACED_STEPS: usize = 5;

/// Default finite-difference step
pub const DEFAULT_DIFF_STEP: f64 = 1e-4;

/// |dx/dt| below this is treated as a vertical tangent
pub const VERTICAL_TANGENT_EPSILON: f64 = 1e-10;

/// Largest n whose factorial fits in an f64
pub const MAX_FACTORIAL: u64 = 170;

/// Largest number of trials the binomial calculator accepts
pub const MAX_BINOMIAL_TRIALS: f64 = 1e6;

/// Bars drawn on each side of `k` in a binomial chart
pub const BINOMIAL_CHART_HALF_WIDTH: u64 = 50;

/// Intervals the normal PDF is sampled at across μ ± 4σ
pub const NORMAL_CURVE_INTERVALS: f64 = 100.0;
