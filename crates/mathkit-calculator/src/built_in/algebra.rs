//! Algebra calculators: quadratic, linear, polynomial, 2×2 systems and
//! complex arithmetic.

use crate::error::{CalcError, CalcResult};
use crate::format::{fixed, number};
use crate::inputs::CalculatorInputs;
use crate::numeric::roots::QuadraticRoots;
use crate::numeric::{self, linalg, roots};
use crate::plugin::{CalculatorPlugin, FieldSpec};
use mathkit_types::{CalculationResult, Dataset, PlotSpec, PlotType};
use num_complex::Complex64;

/// Text, steps and plot for `ax² + bx + c = 0`
fn quadratic_result(a: f64, b: f64, c: f64) -> CalcResult<CalculationResult> {
    let q = roots::quadratic(a, b, c)?;
    let d = q.discriminant;
    let (a_text, b_text, c_text, d_text) = (number(a), number(b), number(c), number(d));

    let mut steps = vec![
        "**1. Identify coefficients:**".to_string(),
        format!("   a = {a_text}, b = {b_text}, c = {c_text}"),
        "**2. Apply Quadratic Formula:**".to_string(),
        "   x = [-b ± √(b² - 4ac)] / 2a".to_string(),
        "   Discriminant (Δ) = b² - 4ac".to_string(),
        format!("   Δ = ({b_text})² - 4({a_text})({c_text})"),
        format!("   Δ = {} - {}", number(b * b), number(4.0 * a * c)),
        format!("   Δ = {d_text}"),
    ];

    let mut root_points = Vec::new();
    let summary = match q.roots {
        QuadraticRoots::TwoReal(r1, r2) => {
            root_points.extend([(r1, 0.0), (r2, 0.0)]);
            steps.push("**3. Calculate Roots:**".to_string());
            steps.push(format!("   x₁ = (-({b_text}) + √{d_text}) / 2({a_text}) = {}", fixed(r1, 4)));
            steps.push(format!("   x₂ = (-({b_text}) - √{d_text}) / 2({a_text}) = {}", fixed(r2, 4)));
            format!("Two real roots: x₁ = {}, x₂ = {}", fixed(r1, 4), fixed(r2, 4))
        }
        QuadraticRoots::OneReal(r) => {
            root_points.push((r, 0.0));
            steps.push("**3. Calculate Root:**".to_string());
            steps.push(format!("   x = -({b_text}) / 2({a_text})"));
            steps.push(format!("   x = {}", fixed(r, 4)));
            format!("One real root: x = {}", fixed(r, 4))
        }
        QuadraticRoots::Complex(z, _) => {
            let (re, im) = (fixed(z.re, 4), fixed(z.im.abs(), 4));
            steps.push("**3. Calculate Complex Roots:**".to_string());
            steps.push(format!("   x = [-({b_text}) ± i√{}] / 2({a_text})", number(-d)));
            steps.push(format!("   x = {re} ± {im}i"));
            format!("Complex roots: {re} ± {im}i")
        }
    };

    let vx = q.vertex.0;
    let span = (vx.abs() * 2.0).max(10.0);
    let curve = numeric::sample(|x| a * x * x + b * x + c, vx - span, vx + span, span / 25.0);
    let plot = PlotSpec::new(PlotType::Line)
        .dataset(
            Dataset::new("y = ax² + bx + c")
                .points(curve)
                .style("borderColor", "rgb(129, 140, 248)")
                .style("pointRadius", 0),
        )
        .dataset(
            Dataset::new("Roots")
                .points(root_points)
                .kind(PlotType::Scatter)
                .style("backgroundColor", "red")
                .style("pointRadius", 5)
                .style("showLine", false),
        );

    Ok(CalculationResult::text(format!("Discriminant Δ = {d_text}\n{summary}"))
        .with_steps(steps)
        .with_plot(plot))
}

#[derive(Debug, Default)]
pub struct QuadraticCalculator;

const ABC_FIELDS: &[FieldSpec] = &[FieldSpec::number("a"), FieldSpec::number("b"), FieldSpec::number("c")];

impl CalculatorPlugin for QuadraticCalculator {
    fn name(&self) -> &str {
        "quadratic"
    }

    fn title(&self) -> &str {
        "Quadratic Equation Solver"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        ABC_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        quadratic_result(inputs.get_float("a")?, inputs.get_float("b")?, inputs.get_float("c")?)
    }
}

/// Solves `ax + b = c`
#[derive(Debug, Default)]
pub struct LinearEquationCalculator;

impl CalculatorPlugin for LinearEquationCalculator {
    fn name(&self) -> &str {
        "linear_equation"
    }

    fn title(&self) -> &str {
        "Linear Equation Solver"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        ABC_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let a = inputs.get_float("a")?;
        let b = inputs.get_float("b")?;
        let c = inputs.get_float("c")?;
        let x = roots::linear(a, b - c)?;

        let (a_text, b_text, c_text) = (number(a), number(b), number(c));
        let rhs = number(c - b);
        let steps = vec![
            "**1. Identify constants:**".to_string(),
            format!("   a = {a_text}, b = {b_text}, c = {c_text}"),
            "**2. Rearrange Equation:**".to_string(),
            format!("   {a_text}x + {b_text} = {c_text}"),
            format!("   {a_text}x = {c_text} - {b_text} = {rhs}"),
            "**3. Solve for x:**".to_string(),
            format!("   x = {rhs} / {a_text}"),
            format!("   x = {}", fixed(x, 4)),
        ];

        Ok(CalculationResult::text(format!(
            "{a_text}x + {b_text} = {c_text}\nSolution: x = {}",
            fixed(x, 4)
        ))
        .with_steps(steps))
    }
}

/// Roots of a polynomial given by its coefficients, highest degree first
///
/// Degrees 1 and 2 are solved in closed form.
#[derive(Debug, Default)]
pub struct PolynomialRootsCalculator;

const POLYNOMIAL_FIELDS: &[FieldSpec] = &[FieldSpec::text("coeffsStr")];

impl CalculatorPlugin for PolynomialRootsCalculator {
    fn name(&self) -> &str {
        "polynomial_roots"
    }

    fn title(&self) -> &str {
        "Polynomial Root Finder"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        POLYNOMIAL_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let coefficients = inputs.get_number_list("coeffsStr")?;
        let leading = coefficients.iter().position(|c| *c != 0.0).unwrap_or(coefficients.len());

        match &coefficients[leading..] {
            [a, b, c] => quadratic_result(*a, *b, *c),
            [a, b] => {
                let x = roots::linear(*a, *b)?;
                let steps = vec![
                    "**1. Identify coefficients:**".to_string(),
                    format!("   a = {}, b = {}", number(*a), number(*b)),
                    "**2. Solve ax + b = 0:**".to_string(),
                    format!("   x = -({}) / {}", number(*b), number(*a)),
                    "**3. Result:**".to_string(),
                    format!("   x = {}", fixed(x, 4)),
                ];
                Ok(CalculationResult::text(format!("Linear polynomial root: x = {}", fixed(x, 4)))
                    .with_steps(steps))
            }
            [] | [_] => Err(CalcError::domain("Error: A non-constant polynomial is required.")),
            _ => Err(CalcError::unsupported(
                "Root finding for polynomials of degree 3 or higher is not supported yet.",
            )),
        }
    }
}

/// Two lines `a·x + b·y = c` through the plot window around `x0`
fn line_points(a: f64, b: f64, c: f64, x0: f64, y0: f64) -> Vec<(f64, f64)> {
    if b == 0.0 {
        let x = c / a;
        vec![(x, y0 - 5.0), (x, y0 + 5.0)]
    } else {
        [x0 - 5.0, x0 + 5.0].into_iter().map(|x| (x, (c - a * x) / b)).collect()
    }
}

/// 2×2 linear system by Cramer's rule
#[derive(Debug, Default)]
pub struct LinearSystemCalculator;

const SYSTEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("a1"),
    FieldSpec::number("b1"),
    FieldSpec::number("c1"),
    FieldSpec::number("a2"),
    FieldSpec::number("b2"),
    FieldSpec::number("c2"),
];

impl CalculatorPlugin for LinearSystemCalculator {
    fn name(&self) -> &str {
        "linear_system"
    }

    fn title(&self) -> &str {
        "System of Equations"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        SYSTEM_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let [a1, b1, c1, a2, b2, c2] = [
            inputs.get_float("a1")?,
            inputs.get_float("b1")?,
            inputs.get_float("c1")?,
            inputs.get_float("a2")?,
            inputs.get_float("b2")?,
            inputs.get_float("c2")?,
        ];
        let solution = linalg::solve_2x2(a1, b1, c1, a2, b2, c2)?;
        let (x, y, det) = (solution.x, solution.y, number(solution.determinant));
        let n = number;

        let steps = vec![
            "**1. Identify coefficients:**".to_string(),
            format!("   Eq 1: {}x + {}y = {}", n(a1), n(b1), n(c1)),
            format!("   Eq 2: {}x + {}y = {}", n(a2), n(b2), n(c2)),
            "**2. Calculate Determinant (D):**".to_string(),
            format!("   D = ({})({}) - ({})({}) = {det}", n(a1), n(b2), n(a2), n(b1)),
            "**3. Cramer's Rule / Substitution:**".to_string(),
            format!("   x = (c1*b2 - c2*b1) / D = ({}*{} - {}*{}) / {det}", n(c1), n(b2), n(c2), n(b1)),
            format!("   x = {}", fixed(x, 4)),
            format!("   y = (a1*c2 - a2*c1) / D = ({}*{} - {}*{}) / {det}", n(a1), n(c2), n(a2), n(c1)),
            format!("   y = {}", fixed(y, 4)),
        ];

        let plot = PlotSpec::new(PlotType::Line)
            .dataset(Dataset::new("Eq 1").points(line_points(a1, b1, c1, x, y)).style("borderColor", "blue"))
            .dataset(Dataset::new("Eq 2").points(line_points(a2, b2, c2, x, y)).style("borderColor", "green"))
            .dataset(
                Dataset::new("Solution")
                    .points([(x, y)])
                    .kind(PlotType::Scatter)
                    .style("backgroundColor", "red")
                    .style("pointRadius", 6),
            );

        Ok(CalculationResult::text(format!("x = {}\ny = {}", fixed(x, 4), fixed(y, 4)))
            .with_steps(steps)
            .with_plot(plot))
    }
}

fn complex_text(z: Complex64, decimals: usize) -> String {
    if z.im < 0.0 {
        format!("{} - {}i", fixed(z.re, decimals), fixed(-z.im, decimals))
    } else {
        format!("{} + {}i", fixed(z.re, decimals), fixed(z.im, decimals))
    }
}

/// Addition, subtraction, multiplication and division of two complex numbers
#[derive(Debug, Default)]
pub struct ComplexNumbersCalculator;

const COMPLEX_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("c1_real"),
    FieldSpec::number("c1_imag"),
    FieldSpec::number("c2_real"),
    FieldSpec::number("c2_imag"),
    FieldSpec::text("operation"),
];

impl CalculatorPlugin for ComplexNumbersCalculator {
    fn name(&self) -> &str {
        "complex_numbers"
    }

    fn title(&self) -> &str {
        "Complex Number Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        COMPLEX_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let z1 = Complex64::new(inputs.get_float("c1_real")?, inputs.get_float("c1_imag")?);
        let z2 = Complex64::new(inputs.get_float("c2_real")?, inputs.get_float("c2_imag")?);
        let op = inputs.get_string("operation")?;
        let (r1, i1, r2, i2) = (number(z1.re), number(z1.im), number(z2.re), number(z2.im));

        let mut steps = vec![
            "**1. Identify complex numbers:**".to_string(),
            format!("   z1 = {r1} + {i1}i"),
            format!("   z2 = {r2} + {i2}i"),
        ];

        let result = match op.as_str() {
            "+" => {
                steps.push("**2. Addition:**".to_string());
                steps.push("   (a+c) + (b+d)i".to_string());
                steps.push(format!("   ({r1}+{r2}) + ({i1}+{i2})i"));
                z1 + z2
            }
            "-" => {
                steps.push("**2. Subtraction:**".to_string());
                steps.push("   (a-c) + (b-d)i".to_string());
                steps.push(format!("   ({r1}-{r2}) + ({i1}-{i2})i"));
                z1 - z2
            }
            "*" => {
                steps.push("**2. Multiplication:**".to_string());
                steps.push("   (ac - bd) + (ad + bc)i".to_string());
                steps.push(format!("   ({r1}*{r2} - {i1}*{i2}) + ({r1}*{i2} + {r2}*{i1})i"));
                z1 * z2
            }
            "/" => {
                let denominator = z2.norm_sqr();
                if denominator == 0.0 {
                    return Err(CalcError::domain("Error: Division by zero"));
                }
                steps.push("**2. Division (Multiply by Conjugate):**".to_string());
                steps.push(format!("   Numerator = ({r1}+{i1}i)({r2}-{i2}i)"));
                steps.push(format!("   Denominator = {r2}² + {i2}² = {}", number(denominator)));
                steps.push(format!("   Real = ({r1}*{r2} + {i1}*{i2}) / {}", number(denominator)));
                steps.push(format!("   Imag = ({i1}*{r2} - {r1}*{i2}) / {}", number(denominator)));
                z1 / z2
            }
            _ => return Err(CalcError::unsupported("Invalid operation.")),
        };

        let rendered = complex_text(result, 4);
        steps.push("**3. Result:**".to_string());
        steps.push(format!("   {rendered}"));

        Ok(CalculationResult::text(format!("({r1} + {i1}i) {op} ({r2} + {i2}i)\n= {rendered}"))
            .with_steps(steps))
    }
}
