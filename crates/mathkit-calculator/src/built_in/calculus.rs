//! Calculus calculators: derivatives, integrals, limits, Euler's method and
//! Laplace transforms.

use crate::error::{CalcError, CalcResult};
use crate::expr::{self, evaluator, BinaryOp, Expr, FunctionRegistry, ParsedFunction, UnaryOp};
use crate::format::{fixed, number};
use crate::inputs::CalculatorInputs;
use crate::numeric::differentiation::{self, DiffMethod, DiffOrder};
use crate::numeric::limits::{self, LimitEstimate};
use crate::numeric::{self, integration, ode};
use crate::plugin::{CalculatorPlugin, FieldRange, FieldSpec};
use crate::stats;
use crate::symbolic;
use mathkit_types::{CalculationResult, Dataset, PlotSpec, PlotType};
use tracing::debug;

const PLOT_HALF_WIDTH: f64 = 5.0;
const PLOT_STEP: f64 = 0.1;

/// Numeric (and, for first-order explicit functions, symbolic) derivatives
#[derive(Debug, Default)]
pub struct DerivativeCalculator;

const DERIVATIVE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("inputType").optional(),
    FieldSpec::number("point"),
    FieldSpec::number("h").optional(),
    FieldSpec::number("order").optional().range(FieldRange::Closed { min: 1.0, max: 2.0 }),
    FieldSpec::text("method").optional(),
];

struct Evaluation {
    label: &'static str,
    value: f64,
    formula: Vec<String>,
    datasets: Vec<Dataset>,
    marker: (f64, f64),
}

impl DerivativeCalculator {
    fn explicit(
        inputs: &CalculatorInputs,
        point: f64,
        h: f64,
        order: DiffOrder,
        method: DiffMethod,
    ) -> CalcResult<Evaluation> {
        let source = inputs.get_string("func")?;
        let f = expr::parse_x(&source)?;
        let label = match order {
            DiffOrder::First => "f'(x)",
            DiffOrder::Second => "f''(x)",
        };

        let numeric_at = |x: f64| differentiation::derivative(|v| f.at(v), x, h, order, method);
        let mut value = numeric_at(point)?;
        let mut formula = vec![format!("Using {method} Difference method")];
        let mut derivative_curve: Box<dyn Fn(f64) -> f64 + '_> =
            Box::new(move |x| numeric_at(x).unwrap_or(f64::NAN));

        if order == DiffOrder::First {
            if let Some(symbolic) = symbolic::differentiate(&source) {
                let exact = symbolic.function.at(point);
                if exact.is_finite() {
                    value = exact;
                    formula = vec![
                        "**Symbolic Differentiation:**".to_string(),
                        format!("f'(x) = {}", symbolic.derivative),
                    ];
                    formula.extend(symbolic.steps);
                    formula.push("**Substitution:**".to_string());
                    formula.push(format!("Evaluate at x = {}:", number(point)));
                    formula.push(format!("f'({}) = {}", number(point), fixed(value, 6)));
                    let derived = symbolic.function;
                    derivative_curve = Box::new(move |x| derived.at(x));
                } else {
                    debug!(expression = %source, point, "symbolic derivative not finite, keeping numeric value");
                }
            }
        }

        let (start, end) = (point - PLOT_HALF_WIDTH, point + PLOT_HALF_WIDTH);
        let datasets = vec![
            Dataset::new("f(x)")
                .points(numeric::sample(|x| f.at(x), start, end, PLOT_STEP))
                .style("borderColor", "rgba(129, 140, 248, 0.5)")
                .style("borderWidth", 2)
                .style("pointRadius", 0),
            Dataset::new(label)
                .points(numeric::sample(derivative_curve, start, end, PLOT_STEP))
                .style("borderColor", "rgb(52, 211, 153)")
                .style("borderWidth", 2)
                .style("pointRadius", 0),
        ];

        Ok(Evaluation { label, value, formula, datasets, marker: (point, value) })
    }

    fn parametric(
        inputs: &CalculatorInputs,
        t: f64,
        h: f64,
        order: DiffOrder,
        method: DiffMethod,
    ) -> CalcResult<Evaluation> {
        let parse_t = |field: &str| -> CalcResult<ParsedFunction> {
            let source = inputs.get_string(field)?;
            expr::parse(&source, &["t"]).map_err(|_| CalcError::domain("Invalid parametric functions."))
        };
        let x = parse_t("funcX")?;
        let y = parse_t("funcY")?;

        let d = differentiation::parametric(|s| x.at(s), |s| y.at(s), t, h, order, method)?;
        let (label, formula) = match order {
            DiffOrder::First => (
                "dy/dx",
                vec![
                    format!("dx/dt ≈ {}", fixed(d.dx_dt, 4)),
                    format!("dy/dt ≈ {}", fixed(d.dy_dt, 4)),
                    "dy/dx = (dy/dt) / (dx/dt)".to_string(),
                ],
            ),
            DiffOrder::Second => (
                "d²y/dx²",
                vec![
                    "First calculate dy/dx as a function of t".to_string(),
                    "Then d²y/dx² = [d/dt (dy/dx)] / (dx/dt)".to_string(),
                ],
            ),
        };

        let curve = numeric::sample(|s| s, t - PLOT_HALF_WIDTH, t + PLOT_HALF_WIDTH, PLOT_STEP)
            .into_iter()
            .map(|(s, _)| (x.at(s), y.at(s)));
        let datasets = vec![Dataset::new("Parametric Curve (x(t), y(t))")
            .points(curve)
            .style("borderColor", "rgba(129, 140, 248, 0.5)")
            .style("borderWidth", 2)
            .style("pointRadius", 0)];

        Ok(Evaluation { label, value: d.value, formula, datasets, marker: (x.at(t), y.at(t)) })
    }
}

impl CalculatorPlugin for DerivativeCalculator {
    fn name(&self) -> &str {
        "derivative"
    }

    fn title(&self) -> &str {
        "Derivative Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        DERIVATIVE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let is_parametric = inputs.get_string_or("inputType", "explicit") == "parametric";
        let point = inputs.get_float("point")?;
        let h = inputs.get_float_or("h", crate::constants::DEFAULT_DIFF_STEP)?;
        let order = if inputs.has("order") {
            DiffOrder::try_from(inputs.get_integer("order")?)?
        } else {
            DiffOrder::First
        };
        let method: DiffMethod = inputs.get_string_or("method", "central").parse()?;

        let eval = if is_parametric {
            Self::parametric(inputs, point, h, order, method)?
        } else {
            Self::explicit(inputs, point, h, order, method)?
        };

        let point_text = number(point);
        let value_text = fixed(eval.value, 6);
        let mut steps = vec![
            "**1. Configuration:**".to_string(),
            format!("   Type: {}", if is_parametric { "Parametric" } else { "Explicit" }),
            format!("   Point: {point_text}"),
            format!("   Method: {method}"),
            "**2. Calculation:**".to_string(),
        ];
        steps.extend(eval.formula);
        steps.push("**3. Result:**".to_string());
        steps.push(format!("   {} ≈ {value_text}", eval.label));

        let mut plot = PlotSpec::new(PlotType::Line).title(if is_parametric {
            "Parametric Curve".to_string()
        } else {
            format!("Function and {}", eval.label)
        });
        for dataset in eval.datasets {
            plot = plot.dataset(dataset);
        }
        plot = plot.dataset(
            Dataset::new(format!("Point (t={point_text})"))
                .points([eval.marker])
                .kind(PlotType::Scatter)
                .style("backgroundColor", "red")
                .style("pointRadius", 5),
        );

        let text = format!(
            "{} Derivative at {} = {point_text}:\n{} ≈ {value_text}",
            if order == DiffOrder::First { "First" } else { "Second" },
            if is_parametric { "t" } else { "x" },
            eval.label,
        );
        Ok(CalculationResult::text(text).with_steps(steps).with_plot(plot))
    }
}

/// Definite integral by the composite trapezoid rule
#[derive(Debug, Default)]
pub struct IntegralCalculator;

const INTEGRAL_FIELDS: &[FieldSpec] =
    &[FieldSpec::text("func"), FieldSpec::number("lower"), FieldSpec::number("upper")];

impl CalculatorPlugin for IntegralCalculator {
    fn name(&self) -> &str {
        "integral"
    }

    fn title(&self) -> &str {
        "Integral Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        INTEGRAL_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let source = inputs.get_string("func")?;
        let f = expr::parse_x(&source)?;
        let a = inputs.get_float("lower")?;
        let b = inputs.get_float("upper")?;

        let area = integration::trapezoid(|x| f.at(x), a, b)?;
        let (a_text, b_text, value) = (number(a), number(b), fixed(area.value, 6));

        let steps = vec![
            "**1. Identify variables:**".to_string(),
            format!("   Function f(x) = {source}"),
            format!("   Lower limit a = {a_text}"),
            format!("   Upper limit b = {b_text}"),
            "**2. Apply Numerical Method (Trapezoidal Rule):**".to_string(),
            "   Area ≈ (h/2) * [f(a) + 2f(a+h) + ... + f(b)]".to_string(),
            format!("   Using n={} segments, h={}", area.intervals, number(area.width)),
            "**3. Result:**".to_string(),
            format!("   Area ≈ sum(trapezoids) = {value}"),
        ];

        let plot = PlotSpec::new(PlotType::Line).dataset(
            Dataset::new("f(x)")
                .points(numeric::sample(|x| f.at(x), a, b, (b - a) / 100.0))
                .style("fill", true)
                .style("backgroundColor", "rgba(129, 140, 248, 0.2)")
                .style("borderColor", "rgb(129, 140, 248)"),
        );

        Ok(CalculationResult::text(format!("Integral from {a_text} to {b_text} ≈ {value}"))
            .with_steps(steps)
            .with_plot(plot))
    }
}

/// Side values may be infinite or undefined; they are shown as words
fn approach(value: f64, decimals: usize) -> String {
    match value {
        v if v.is_nan() => "undefined".to_string(),
        v if v == f64::INFINITY => "∞".to_string(),
        v if v == f64::NEG_INFINITY => "-∞".to_string(),
        v => fixed(v, decimals),
    }
}

/// Two-sided limit estimate
#[derive(Debug, Default)]
pub struct LimitCalculator;

const LIMIT_FIELDS: &[FieldSpec] = &[FieldSpec::text("func"), FieldSpec::number("point")];

impl CalculatorPlugin for LimitCalculator {
    fn name(&self) -> &str {
        "limit"
    }

    fn title(&self) -> &str {
        "Limit Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        LIMIT_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let source = inputs.get_string("func")?;
        let f = expr::parse_x(&source)?;
        let a = inputs.get_float("point")?;
        let a_text = number(a);
        let h = number(crate::constants::LIMIT_PROBE_STEP);

        let estimate = limits::probe(|x| f.at(x), a);
        let (left, right) = match estimate {
            LimitEstimate::Converges { left, right, .. } | LimitEstimate::Diverges { left, right } => {
                (left, right)
            }
        };

        let mut steps = vec![
            "**1. Identify variables:**".to_string(),
            format!("   Function f(x) = {source}"),
            format!("   Target point a = {a_text}"),
            format!("**2. Evaluate approaches to x = {a_text}:**"),
            format!("   Left Limit (x = {a_text} - {h}): {}", approach(left, 6)),
            format!("   Right Limit (x = {a_text} + {h}): {}", approach(right, 6)),
        ];

        let text = match estimate {
            LimitEstimate::Diverges { left, right } => {
                steps.push("**3. Conclusion:**".to_string());
                steps.push("   Left and Right limits differ significantly.".to_string());
                format!(
                    "Limit appears to diverge or does not exist.\nLeft approach: {}\nRight approach: {}",
                    approach(left, 4),
                    approach(right, 4)
                )
            }
            LimitEstimate::Converges { value, .. } => {
                steps.push("**3. Result:**".to_string());
                steps.push(format!("   Limits converge to ≈ {}", fixed(value, 6)));
                format!("Limit ≈ {}", fixed(value, 7))
            }
        };

        Ok(CalculationResult::text(text).with_steps(steps))
    }
}

/// `y' = f(x, y)` by Euler's method
#[derive(Debug, Default)]
pub struct OdeEulerCalculator;

const ODE_FIELDS: &[FieldSpec] =
    &[FieldSpec::text("func"), FieldSpec::number("x0").optional(), FieldSpec::number("y0").optional()];

impl CalculatorPlugin for OdeEulerCalculator {
    fn name(&self) -> &str {
        "ode_euler"
    }

    fn title(&self) -> &str {
        "Differential Equation Solver"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        ODE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let source = inputs.get_string("func")?;
        let f = expr::parse(&source, &["x", "y"]).map_err(|_| {
            CalcError::domain("Error parsing ODE function. Ensure you use 'x' and 'y' variables.")
        })?;
        let x0 = inputs.get_float_or("x0", 0.0)?;
        let y0 = inputs.get_float_or("y0", 0.0)?;

        let solution = ode::euler(|x, y| f.call(&[x, y]), x0, y0);
        let (x_end, y_end) = solution.last();
        if !y_end.is_finite() {
            return Err(CalcError::domain("Error executing ODE function. Please check your syntax."));
        }

        let h = number(solution.step);
        let mut steps = vec![
            "**1. Identify variables:**".to_string(),
            format!("   ODE: y' = {source}"),
            format!("   Initial Condition: y({}) = {}", number(x0), number(y0)),
            "**2. Apply Numerical Method (Euler's Method):**".to_string(),
            format!("   Step size h = {h}"),
            "   Formula: y_next = y_curr + h * f(x, y)".to_string(),
            format!("**3. First {} Steps:**", solution.trace.len()),
        ];
        steps.extend(solution.trace.iter().map(|s| {
            format!(
                "   x={}, y={}, slope={} → new y = {} + {h}*{} = {}",
                fixed(s.x, 1),
                fixed(s.y, 2),
                fixed(s.slope, 2),
                fixed(s.y, 2),
                fixed(s.slope, 2),
                fixed(s.next_y, 2)
            )
        }));
        steps.push("   ...".to_string());
        steps.push(format!("   Final y({}) ≈ {}", fixed(x_end, 2), fixed(y_end, 4)));

        let plot = PlotSpec::new(PlotType::Line).dataset(
            Dataset::new("y(x)")
                .points(solution.points.iter().copied())
                .style("borderColor", "rgb(52, 211, 153)"),
        );

        Ok(CalculationResult::text(format!(
            "Numerical Solution (Euler Method)\ny({}) ≈ {}",
            fixed(x_end, 2),
            fixed(y_end, 4)
        ))
        .with_steps(steps)
        .with_plot(plot))
    }
}

/// A recognized row of the transform table
struct TableEntry {
    transform: String,
    rule: String,
}

fn constant_value(e: &Expr) -> Option<f64> {
    if e.contains_var("t") {
        return None;
    }
    evaluator::evaluate(e, &[], &[], FunctionRegistry::builtin()).ok().filter(|v| v.is_finite())
}

/// `a` when `e` is `a·t`
fn coefficient_of_t(e: &Expr) -> Option<f64> {
    match e {
        Expr::Variable(v) if v == "t" => Some(1.0),
        Expr::Unary { op: UnaryOp::Neg, operand } => coefficient_of_t(operand).map(|a| -a),
        Expr::Binary { op: BinaryOp::Mul, left, right } => match (left.as_ref(), right.as_ref()) {
            (Expr::Variable(v), c) | (c, Expr::Variable(v)) if v == "t" => constant_value(c),
            _ => None,
        },
        _ => None,
    }
}

fn shifted(a: f64) -> String {
    if a < 0.0 { format!("s + {}", number(-a)) } else { format!("s - {}", number(a)) }
}

fn lookup(e: &Expr) -> Option<TableEntry> {
    if let Some(c) = constant_value(e) {
        let c = number(c);
        return Some(TableEntry { transform: format!("{c}/s"), rule: format!("L{{c}} = c/s with c={c}") });
    }

    match e {
        Expr::Variable(v) if v == "t" => {
            Some(TableEntry { transform: "1/s^2".to_string(), rule: "L{t} = 1/s^2".to_string() })
        }
        Expr::Binary { op: BinaryOp::Pow, left, right } if matches!(left.as_ref(), Expr::Variable(v) if v == "t") => {
            let n = constant_value(right).filter(|n| *n >= 0.0 && n.fract() == 0.0)?;
            let numerator = stats::factorial(n as u64).ok()?;
            Some(TableEntry {
                transform: format!("{} / s^{}", number(numerator), number(n + 1.0)),
                rule: format!("L{{t^n}} = n! / s^(n+1) with n={}", number(n)),
            })
        }
        Expr::Binary { op: BinaryOp::Pow, left, right } if left.as_number() == Some(std::f64::consts::E) => {
            exponential(coefficient_of_t(right)?)
        }
        Expr::Call { name, args } if args.len() == 1 => {
            let a = coefficient_of_t(&args[0])?;
            let a_text = number(a);
            let a_squared = number(a * a);
            match name.as_str() {
                "exp" => exponential(a),
                "sin" => Some(TableEntry {
                    transform: format!("{a_text} / (s^2 + {a_squared})"),
                    rule: format!("L{{sin(at)}} = a/(s^2+a^2) with a={a_text}"),
                }),
                "cos" => Some(TableEntry {
                    transform: format!("s / (s^2 + {a_squared})"),
                    rule: format!("L{{cos(at)}} = s/(s^2+a^2) with a={a_text}"),
                }),
                _ => None,
            }
        }
        Expr::Binary { op: BinaryOp::Mul, left, right } => {
            let (c, inner) = match (constant_value(left), constant_value(right)) {
                (Some(c), None) => (c, right.as_ref()),
                (None, Some(c)) => (c, left.as_ref()),
                _ => return None,
            };
            let entry = lookup(inner)?;
            Some(TableEntry {
                transform: format!("{} * ({})", number(c), entry.transform),
                rule: format!("{}; L{{c·f(t)}} = c·F(s) with c={}", entry.rule, number(c)),
            })
        }
        _ => None,
    }
}

fn exponential(a: f64) -> Option<TableEntry> {
    let a_text = number(a);
    Some(TableEntry {
        transform: format!("1 / ({})", shifted(a)),
        rule: format!("L{{e^(at)}} = 1/(s-a) with a={a_text}"),
    })
}

/// Laplace transform by table lookup
#[derive(Debug, Default)]
pub struct LaplaceCalculator;

const LAPLACE_FIELDS: &[FieldSpec] = &[FieldSpec::text("func")];

impl CalculatorPlugin for LaplaceCalculator {
    fn name(&self) -> &str {
        "laplace"
    }

    fn title(&self) -> &str {
        "Laplace Transform Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        LAPLACE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let source = inputs.get_string("func")?;
        let f = expr::parse(&source, &["t"])?;

        let entry = lookup(f.ast()).ok_or_else(|| {
            CalcError::unsupported(
                "Symbolic Laplace Transform requires a more advanced CAS engine. \
                 Supported patterns: c, t^n, exp(at), sin(at), cos(at).",
            )
        })?;

        let steps = vec![
            "**1. Identify function:**".to_string(),
            format!("   f(t) = {source}"),
            "**2. Apply Transform Table:**".to_string(),
            "   L{f(t)} = F(s)".to_string(),
            format!("   {}", entry.rule),
            "**3. Result:**".to_string(),
            format!("   F(s) = {}", entry.transform),
        ];

        Ok(CalculationResult::text(format!("L{{{source}}} = {}", entry.transform)).with_steps(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathkit_types::{FieldMap, FieldValue};

    fn run<P: CalculatorPlugin>(plugin: P, pairs: &[(&str, FieldValue)]) -> CalcResult<CalculationResult> {
        let map: FieldMap = pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        plugin.calculate(&CalculatorInputs::new(&map))
    }

    #[test]
    fn symbolic_first_derivative() {
        let r = run(DerivativeCalculator, &[("func", "x^2".into()), ("point", 3.into())]).unwrap();
        assert_eq!(r.text, "First Derivative at x = 3:\nf'(x) ≈ 6.000000");
        let steps = r.steps.unwrap();
        assert!(steps.contains(&"f'(x) = 2 * x".to_string()));
        assert!(steps.contains(&"f'(3) = 6.000000".to_string()));

        let plot = r.plot_data.unwrap();
        assert_eq!(plot.title.as_deref(), Some("Function and f'(x)"));
        assert_eq!(plot.datasets.len(), 3);
        assert_eq!(plot.datasets[0].data.len(), 101);
    }

    #[test]
    fn numeric_fallback_names_the_method() {
        let r = run(
            DerivativeCalculator,
            &[("func", "abs(x)".into()), ("point", 2.into()), ("method", "fivepoint".into())],
        )
        .unwrap();
        assert!(r.text.ends_with("f'(x) ≈ 1.000000"));
        assert!(r.steps.unwrap().contains(&"Using Fivepoint Difference method".to_string()));
    }

    #[test]
    fn second_derivative() {
        let r = run(
            DerivativeCalculator,
            &[("func", "x^3".into()), ("point", 1.into()), ("order", 2.into()), ("h", 0.001.into())],
        )
        .unwrap();
        assert!(r.text.starts_with("Second Derivative at x = 1:\nf''(x) ≈ 6.0000"));
    }

    #[test]
    fn parametric_slope_and_vertical_tangent() {
        let r = run(
            DerivativeCalculator,
            &[
                ("inputType", "parametric".into()),
                ("funcX", "t".into()),
                ("funcY", "t^2".into()),
                ("point", 1.into()),
            ],
        )
        .unwrap();
        assert!(r.text.ends_with("dy/dx ≈ 2.000000"));

        let err = run(
            DerivativeCalculator,
            &[
                ("inputType", "parametric".into()),
                ("funcX", "3".into()),
                ("funcY", "t".into()),
                ("point", 0.into()),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Vertical tangent detected"));
    }

    #[test]
    fn invalid_function_text() {
        let err = run(DerivativeCalculator, &[("func", "invalidfunc(x)".into()), ("point", 1.into())])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid function.");
    }

    #[test]
    fn integral_of_square() {
        let r = run(IntegralCalculator, &[("func", "x^2".into()), ("lower", 0.into()), ("upper", 3.into())])
            .unwrap();
        assert!(r.text.starts_with("Integral from 0 to 3 ≈ 9.0000"));
        assert_eq!(r.plot_data.unwrap().datasets[0].data.len(), 101);
    }

    #[test]
    fn integral_requires_ordered_limits() {
        let err = run(IntegralCalculator, &[("func", "x".into()), ("lower", 2.into()), ("upper", 1.into())])
            .unwrap_err();
        assert!(err.to_string().starts_with("Lower limit must be less than upper limit"));
    }

    #[test]
    fn removable_singularity_converges() {
        let r = run(LimitCalculator, &[("func", "sin(x)/x".into()), ("point", 0.into())]).unwrap();
        assert_eq!(r.text, "Limit ≈ 1.0000000");
    }

    #[test]
    fn pole_diverges_without_leaking_nan() {
        let r = run(LimitCalculator, &[("func", "1/x".into()), ("point", 0.into())]).unwrap();
        assert!(r.text.starts_with("Limit appears to diverge"));
        assert!(!r.text.contains("NaN"));
    }

    #[test]
    fn euler_growth() {
        let r = run(OdeEulerCalculator, &[("func", "y".into()), ("y0", 1.into())]).unwrap();
        // (1.1)^20
        assert_eq!(r.text, "Numerical Solution (Euler Method)\ny(2.00) ≈ 6.7275");
        let steps = r.steps.unwrap();
        assert!(steps.contains(&"   x=0.0, y=1.00, slope=1.00 → new y = 1.00 + 0.1*1.00 = 1.10".to_string()));
    }

    #[test]
    fn ode_parse_error_mentions_variables() {
        let err = run(OdeEulerCalculator, &[("func", "z + 1".into())]).unwrap_err();
        assert!(err.to_string().contains("'x' and 'y'"));
    }

    #[test]
    fn laplace_table() {
        let cases = [
            ("1", "L{1} = 1/s"),
            ("t", "L{t} = 1/s^2"),
            ("t^3", "L{t^3} = 6 / s^4"),
            ("exp(2t)", "L{exp(2t)} = 1 / (s - 2)"),
            ("exp(-3*t)", "L{exp(-3*t)} = 1 / (s + 3)"),
            ("sin(2t)", "L{sin(2t)} = 2 / (s^2 + 4)"),
            ("cos(3t)", "L{cos(3t)} = s / (s^2 + 9)"),
            ("5", "L{5} = 5/s"),
        ];
        for (input, expected) in cases {
            let r = run(LaplaceCalculator, &[("func", input.into())]).unwrap();
            assert_eq!(r.text, expected, "{input}");
        }
    }

    #[test]
    fn laplace_unknown_pattern() {
        let err = run(LaplaceCalculator, &[("func", "tan(t)".into())]).unwrap_err();
        assert_eq!(err.category(), "unsupported");
    }
}
