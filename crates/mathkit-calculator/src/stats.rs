//! Statistics and distribution library
//!
//! Descriptive statistics, exact combinatorics, the binomial pmf, the normal
//! distribution via the Abramowitz–Stegun error function, and ordinary least
//! squares regression.

use crate::constants::MAX_FACTORIAL;
use crate::error::{CalcError, CalcResult};
use std::f64::consts::{PI, SQRT_2};

const EMPTY_DATASET: &str = "Please provide a list of numbers.";

/// Parse a comma, whitespace or newline separated list, skipping tokens that are not numbers
pub fn parse_number_list(text: &str) -> CalcResult<Vec<f64>> {
    let values: Vec<f64> = text
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter_map(|token| token.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return Err(CalcError::domain(EMPTY_DATASET));
    }
    Ok(values)
}

/// Parse one `x,y` pair per line; malformed lines are skipped
pub fn parse_points(text: &str) -> Vec<(f64, f64)> {
    text.lines()
        .filter_map(|line| {
            let mut numbers = line
                .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(|t| t.parse::<f64>().ok().filter(|v| v.is_finite()));
            match (numbers.next(), numbers.next()) {
                (Some(Some(x)), Some(Some(y))) => Some((x, y)),
                _ => None,
            }
        })
        .collect()
}

/// Summary statistics of a dataset; variance is the population variance
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptive {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub mode_frequency: usize,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub sorted: Vec<f64>,
}

impl Descriptive {
    pub fn from_data(data: &[f64]) -> CalcResult<Self> {
        if data.is_empty() {
            return Err(CalcError::domain(EMPTY_DATASET));
        }

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let n = count as f64;
        let sum: f64 = sorted.iter().sum();
        let mean = sum / n;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };
        let (mode, mode_frequency) = mode_of_sorted(&sorted);
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = sorted[0];
        let max = sorted[count - 1];

        Ok(Self {
            count,
            sum,
            mean,
            median,
            mode,
            mode_frequency,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
            range: max - min,
            sorted,
        })
    }
}

/// First value, in ascending order, that reaches the highest frequency
fn mode_of_sorted(sorted: &[f64]) -> (f64, usize) {
    let mut best = (sorted[0], 0);
    let mut i = 0;
    while i < sorted.len() {
        let run = sorted[i..].iter().take_while(|v| **v == sorted[i]).count();
        if run > best.1 {
            best = (sorted[i], run);
        }
        i += run;
    }
    best
}

/// `n!` as a float; `n` above 170 overflows `f64`
pub fn factorial(n: u64) -> CalcResult<f64> {
    if n > MAX_FACTORIAL {
        return Err(CalcError::range(format!("n! is only available for n ≤ {MAX_FACTORIAL}.")));
    }
    Ok((2..=n).fold(1.0, |acc, i| acc * i as f64))
}

/// `ln(n!)`: summed exactly up to 170, Stirling's series beyond
pub fn ln_factorial(n: u64) -> f64 {
    if n <= MAX_FACTORIAL {
        return (2..=n).map(|i| (i as f64).ln()).sum();
    }
    let n = n as f64;
    n * n.ln() - n + 0.5 * (2.0 * PI * n).ln() + 1.0 / (12.0 * n) - 1.0 / (360.0 * n.powi(3))
        + 1.0 / (1260.0 * n.powi(5))
}

/// `ln C(n, k)`; `-inf` when `k > n`
pub fn ln_combinations(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}

/// `C(n, k)`, exact while it fits in `u128`; may be `inf` for very large `n`
pub fn combinations(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);

    let exact = (1..=k).try_fold(1u128, |acc, i| {
        acc.checked_mul(u128::from(n - k + i)).map(|v| v / u128::from(i))
    });
    match exact {
        Some(value) => value as f64,
        None => ln_combinations(n, k).exp(),
    }
}

/// `P(X = k)` for `X ~ Binomial(n, p)`, evaluated in log space
pub fn binomial_pmf(n: u64, k: u64, p: f64) -> CalcResult<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(CalcError::domain("Error: Probability p must be between 0 and 1."));
    }
    if k > n {
        return Err(CalcError::domain("Error: k cannot be greater than n."));
    }
    if p == 0.0 {
        return Ok(if k == 0 { 1.0 } else { 0.0 });
    }
    if p == 1.0 {
        return Ok(if k == n { 1.0 } else { 0.0 });
    }
    let ln_pmf = ln_combinations(n, k) + k as f64 * p.ln() + (n - k) as f64 * (-p).ln_1p();
    Ok(ln_pmf.exp())
}

/// Error function, Abramowitz & Stegun 7.1.26 (|error| < 1.5e-7)
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

fn check_std_dev(std_dev: f64) -> CalcResult<()> {
    if std_dev > 0.0 {
        Ok(())
    } else {
        Err(CalcError::domain("Error: Standard Deviation must be a positive number."))
    }
}

/// `P(X < x)` for `X ~ N(mean, std_dev²)`
pub fn normal_cdf(x: f64, mean: f64, std_dev: f64) -> CalcResult<f64> {
    check_std_dev(std_dev)?;
    Ok(0.5 * (1.0 + erf((x - mean) / (std_dev * SQRT_2))))
}

/// Density of `N(mean, std_dev²)` at `x`
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> CalcResult<f64> {
    check_std_dev(std_dev)?;
    let z = (x - mean) / std_dev;
    Ok((-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt()))
}

/// The five running sums least squares is computed from
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sums {
    pub x: f64,
    pub y: f64,
    pub xy: f64,
    pub xx: f64,
    pub yy: f64,
}

/// Ordinary least squares fit `y = slope·x + intercept`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    pub n: usize,
    pub sums: Sums,
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation; `None` when all `y` values are equal
    pub r: Option<f64>,
}

impl LinearRegression {
    pub fn fit(points: &[(f64, f64)]) -> CalcResult<Self> {
        if points.len() < 2 {
            return Err(CalcError::domain("Error: At least two data points (x,y) are required."));
        }

        let sums = points.iter().fold(Sums::default(), |s, &(x, y)| Sums {
            x: s.x + x,
            y: s.y + y,
            xy: s.xy + x * y,
            xx: s.xx + x * x,
            yy: s.yy + y * y,
        });

        let n = points.len() as f64;
        let sxx = n * sums.xx - sums.x * sums.x;
        let syy = n * sums.yy - sums.y * sums.y;
        let sxy = n * sums.xy - sums.x * sums.y;
        if sxx == 0.0 {
            return Err(CalcError::domain(
                "Error: All x values are identical; the regression line is undefined.",
            ));
        }

        let slope = sxy / sxx;
        let intercept = (sums.y - slope * sums.x) / n;
        let r = if syy > 0.0 { Some(sxy / (sxx * syy).sqrt()) } else { None };

        Ok(Self { n: points.len(), sums, slope, intercept, r })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}
