//! Descriptive statistics, distributions and least-squares regression.

use crate::constants::{BINOMIAL_CHART_HALF_WIDTH, MAX_BINOMIAL_TRIALS, NORMAL_CURVE_INTERVALS};
use crate::error::CalcResult;
use crate::format::{exponential, fixed, number};
use crate::inputs::CalculatorInputs;
use crate::numeric;
use crate::plugin::{CalculatorPlugin, FieldRange, FieldSpec};
use crate::stats::{self, Descriptive, LinearRegression};
use mathkit_types::{CalculationResult, Dataset, PlotSpec, PlotType};
use serde_json::json;
use std::f64::consts::LN_10;

#[derive(Debug, Default)]
pub struct StatisticsCalculator;

const STATISTICS_FIELDS: &[FieldSpec] = &[FieldSpec::text("dataStr")];

impl CalculatorPlugin for StatisticsCalculator {
    fn name(&self) -> &str {
        "statistics"
    }

    fn title(&self) -> &str {
        "Statistics Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        STATISTICS_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let data = inputs.get_number_list("dataStr")?;
        let d = Descriptive::from_data(&data)?;

        let text = format!(
            "Mean (Average): {}\nMedian (Middle Value): {}\nMode (Most Frequent): {}\nRange: {}\nStandard Deviation (Population): {}\nVariance: {}",
            fixed(d.mean, 4),
            fixed(d.median, 4),
            number(d.mode),
            number(d.range),
            fixed(d.std_dev, 4),
            fixed(d.variance, 4)
        );

        let steps = vec![
            format!("**1. Sort the data (n={}):**", d.count),
            format!("   [{}]", d.sorted.iter().map(|v| number(*v)).collect::<Vec<_>>().join(", ")),
            "**2. Central tendency:**".to_string(),
            format!("   Mean = Σx / n = {} / {} = {}", number(d.sum), d.count, fixed(d.mean, 4)),
            format!("   Median = {}", fixed(d.median, 4)),
            format!("   Mode = {} (appears {} times)", number(d.mode), d.mode_frequency),
            "**3. Spread:**".to_string(),
            format!("   Range = {} - {} = {}", number(d.max), number(d.min), number(d.range)),
            format!("   Variance = Σ(x - μ)² / n = {}", fixed(d.variance, 4)),
            format!("   σ = √Variance = {}", fixed(d.std_dev, 4)),
        ];

        let plot = PlotSpec::new(PlotType::Bar).labels((1..=d.count).map(|i| i.to_string())).dataset(
            Dataset::new("Data Points")
                .values(d.sorted.iter().copied())
                .style("backgroundColor", "rgba(52, 211, 153, 0.6)"),
        );

        Ok(CalculationResult::text(text).with_steps(steps).with_plot(plot))
    }
}

/// `P(X = k)` for a binomial random variable
#[derive(Debug, Default)]
pub struct BinomialCalculator;

const BINOMIAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("n").range(FieldRange::Closed { min: 0.0, max: MAX_BINOMIAL_TRIALS }),
    FieldSpec::number("p"),
    FieldSpec::number("k").range(FieldRange::NonNegative),
];

impl CalculatorPlugin for BinomialCalculator {
    fn name(&self) -> &str {
        "binomial"
    }

    fn title(&self) -> &str {
        "Binomial Distribution"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        BINOMIAL_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let n = inputs.get_integer("n")? as u64;
        let k = inputs.get_integer("k")? as u64;
        let p = inputs.get_float("p")?;
        let probability = stats::binomial_pmf(n, k, p)?;
        let (pn, pk, pp) = (n.to_string(), k.to_string(), number(p));

        let steps = vec![
            "**1. Identify parameters:**".to_string(),
            format!("   n = {pn}, p = {pp}, k = {pk}"),
            "**2. Apply Formula:**".to_string(),
            "   P(X=k) = C(n, k) × p^k × (1-p)^(n-k)".to_string(),
            "**3. Substitution:**".to_string(),
            format!("   C({pn}, {pk}) = {}", combinations_text(n, k)),
            format!("   {pp}^{pk} = {}", fixed(p.powf(k as f64), 6)),
            format!("   (1-{pp})^({pn}-{pk}) = {}", fixed((1.0 - p).powf((n - k) as f64), 6)),
            "**4. Result:**".to_string(),
            format!("   {}", fixed(probability, 6)),
        ];

        let first = k.saturating_sub(BINOMIAL_CHART_HALF_WIDTH);
        let last = n.min(k + BINOMIAL_CHART_HALF_WIDTH);
        let bars = (first..=last)
            .map(|i| stats::binomial_pmf(n, i, p))
            .collect::<CalcResult<Vec<_>>>()?;
        let colors: Vec<&str> = (first..=last)
            .map(|i| if i == k { "rgb(244, 63, 94)" } else { "rgba(129, 140, 248, 0.5)" })
            .collect();

        let plot = PlotSpec::new(PlotType::Bar)
            .labels((first..=last).map(|i| i.to_string()))
            .dataset(Dataset::new("Probability").values(bars).style("backgroundColor", colors));

        Ok(CalculationResult::text(format!("P(X={pk}) = {}", fixed(probability, 6)))
            .with_steps(steps)
            .with_plot(plot))
    }
}

/// `C(n, k)` in full while it is exact, in scientific notation beyond
fn combinations_text(n: u64, k: u64) -> String {
    let c = stats::combinations(n, k);
    if c < 1e15 {
        number(c)
    } else if c.is_finite() {
        exponential(c, 4)
    } else {
        let log10 = stats::ln_combinations(n, k) / LN_10;
        format!("{}e+{}", fixed(10f64.powf(log10.fract()), 4), log10.trunc())
    }
}

/// Which tail (or interval) of the normal distribution is requested
#[derive(Debug, Clone, Copy, PartialEq)]
enum NormalQuery {
    LessThan(f64),
    GreaterThan(f64),
    Between(f64, f64),
}

impl NormalQuery {
    fn from_inputs(inputs: &CalculatorInputs) -> CalcResult<Self> {
        let x1 = inputs.get_float("x1")?;
        Ok(match inputs.get_string_or("probType", "between").as_str() {
            "lessThan" => NormalQuery::LessThan(x1),
            "greaterThan" => NormalQuery::GreaterThan(x1),
            _ => NormalQuery::Between(x1, inputs.get_float("x2")?),
        })
    }
}

#[derive(Debug, Default)]
pub struct NormalDistributionCalculator;

const NORMAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("mean"),
    FieldSpec::number("stdDev"),
    FieldSpec::text("probType").optional(),
    FieldSpec::number("x1"),
    FieldSpec::number("x2").optional(),
];

impl CalculatorPlugin for NormalDistributionCalculator {
    fn name(&self) -> &str {
        "normal_distribution"
    }

    fn title(&self) -> &str {
        "Normal Distribution"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        NORMAL_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let mean = inputs.get_float("mean")?;
        let sd = inputs.get_float("stdDev")?;
        let query = NormalQuery::from_inputs(inputs)?;
        let cdf = |x: f64| stats::normal_cdf(x, mean, sd);

        let (probability, text, description) = match query {
            NormalQuery::LessThan(x) => {
                let p = cdf(x)?;
                (p, format!("P(X < {}) = {}", number(x), fixed(p, 6)), format!("Using CDF for x={}", number(x)))
            }
            NormalQuery::GreaterThan(x) => {
                let p = 1.0 - cdf(x)?;
                (p, format!("P(X > {}) = {}", number(x), fixed(p, 6)), format!("1 - CDF({})", number(x)))
            }
            NormalQuery::Between(x1, x2) => {
                let p = cdf(x2)? - cdf(x1)?;
                (
                    p,
                    format!("P({} < X < {}) = {}", number(x1), number(x2), fixed(p, 6)),
                    format!("CDF({}) - CDF({})", number(x2), number(x1)),
                )
            }
        };

        let steps = vec![
            "**1. Identify parameters:**".to_string(),
            format!("   Mean (μ) = {}", number(mean)),
            format!("   Std Dev (σ) = {}", number(sd)),
            format!("**2. Calculation ({description}):**"),
            "   Z-score calc implicitly handled via Error Function (erf).".to_string(),
            "**3. Result:**".to_string(),
            format!("   Probability = {}", fixed(probability, 6)),
        ];

        let spread = 4.0 * sd;
        let curve = numeric::sample(
            |x| stats::normal_pdf(x, mean, sd).unwrap_or(f64::NAN),
            mean - spread,
            mean + spread,
            2.0 * spread / NORMAL_CURVE_INTERVALS,
        );
        let plot = PlotSpec::new(PlotType::Line).dataset(
            Dataset::new("PDF")
                .points(curve)
                .style("borderColor", "rgb(129, 140, 248)")
                .style("fill", true)
                .style("backgroundColor", "rgba(129, 140, 248, 0.1)"),
        );

        Ok(CalculationResult::text(text).with_steps(steps).with_plot(plot))
    }
}

#[derive(Debug, Default)]
pub struct LinearRegressionCalculator;

const REGRESSION_FIELDS: &[FieldSpec] = &[FieldSpec::text("dataStr")];

impl CalculatorPlugin for LinearRegressionCalculator {
    fn name(&self) -> &str {
        "linear_regression"
    }

    fn title(&self) -> &str {
        "Linear Regression"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        REGRESSION_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let points = stats::parse_points(&inputs.get_string("dataStr")?);
        let fit = LinearRegression::fit(&points)?;
        let s = fit.sums;
        let (m, b) = (fixed(fit.slope, 4), fixed(fit.intercept, 4));
        let r = fit.r.map_or_else(|| "undefined".to_string(), |r| fixed(r, 4));
        let n = fit.n;

        let steps = vec![
            format!("**1. Identify Data & Summations (n={n}):**"),
            format!("   Σx={}, Σy={}", number(s.x), number(s.y)),
            format!("   Σxy={}, Σx²={}", number(s.xy), number(s.xx)),
            "**2. Calculate Slope (m):**".to_string(),
            "   m = (nΣxy - ΣxΣy) / (nΣx² - (Σx)²)".to_string(),
            format!(
                "   m = ({n}*{} - {}*{}) / ({n}*{} - {}^2)",
                number(s.xy),
                number(s.x),
                number(s.y),
                number(s.xx),
                number(s.x)
            ),
            format!("   m = {m}"),
            "**3. Calculate Intercept (b):**".to_string(),
            "   b = (Σy - mΣx) / n".to_string(),
            format!("   b = ({} - {m}*{}) / {n}", number(s.y), number(s.x)),
            format!("   b = {b}"),
        ];

        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
        let plot = PlotSpec::new(PlotType::Scatter)
            .dataset(Dataset::new("Data Points").points(points.iter().copied()).style("backgroundColor", "white"))
            .dataset(
                Dataset::new("Best Fit Line")
                    .points([(lo, fit.predict(lo)), (hi, fit.predict(hi))])
                    .kind(PlotType::Line)
                    .style("borderColor", "rgb(244, 63, 94)")
                    .style("borderDash", json!([5, 5])),
            );

        Ok(CalculationResult::text(format!("Equation: y = {m}x + {b}\nCorrelation Coefficient (R): {r}"))
            .with_steps(steps)
            .with_plot(plot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use mathkit_types::{DataPoint, FieldMap, FieldValue};

    fn run<P: CalculatorPlugin>(plugin: P, pairs: &[(&str, FieldValue)]) -> CalcResult<CalculationResult> {
        let map: FieldMap = pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        plugin.calculate(&CalculatorInputs::new(&map))
    }

    #[test]
    fn summary_of_reference_dataset() {
        let r = run(StatisticsCalculator, &[("dataStr", "1, 2, 3, 4, 5, 5".into())]).unwrap();
        assert_eq!(
            r.text,
            "Mean (Average): 3.3333\nMedian (Middle Value): 3.5000\nMode (Most Frequent): 5\nRange: 4\nStandard Deviation (Population): 1.4907\nVariance: 2.2222"
        );
        assert_eq!(r.plot_data.unwrap().datasets[0].data.len(), 6);
    }

    #[test]
    fn empty_data_asks_for_numbers() {
        let err = run(StatisticsCalculator, &[("dataStr", "a, b".into())]).unwrap_err();
        assert_eq!(err.to_string(), "Please provide a list of numbers.");
    }

    #[test]
    fn binomial_probability() {
        let r = run(BinomialCalculator, &[("n", 10.into()), ("p", 0.5.into()), ("k", 5.into())]).unwrap();
        assert_eq!(r.text, "P(X=5) = 0.246094");
        let plot = r.plot_data.unwrap();
        assert_eq!(plot.labels.unwrap().len(), 11);
    }

    #[test]
    fn binomial_with_many_trials() {
        let r = run(BinomialCalculator, &[("n", 1100.into()), ("p", 0.5.into()), ("k", 550.into())]).unwrap();
        assert_eq!(r.text, "P(X=550) = 0.024052");
        let steps = r.steps.unwrap();
        assert!(steps.iter().any(|s| s.contains("C(1100, 550) = 3.2669e+329")), "{steps:?}");
        assert!(steps.iter().all(|s| !s.contains("inf") && !s.contains("NaN")), "{steps:?}");
        assert_eq!(r.plot_data.unwrap().labels.unwrap().len(), 101);
    }

    #[test]
    fn binomial_trials_are_capped() {
        let fields: FieldMap = [("n", FieldValue::from(2e7)), ("p", 0.5.into()), ("k", 1e7.into())]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let text = crate::solve("binomial", &fields).text;
        assert!(text.starts_with("Error: Invalid value for 'n'"), "{text}");
    }

    #[test]
    fn combinations_render_at_every_magnitude() {
        assert_eq!(combinations_text(10, 5), "252");
        assert_eq!(combinations_text(100, 50), "1.0089e+29");
        assert_eq!(combinations_text(2000, 1000), "2.0482e+600");
    }

    #[test]
    fn binomial_rejects_bad_probability() {
        let err = run(BinomialCalculator, &[("n", 10.into()), ("p", 1.5.into()), ("k", 5.into())]).unwrap_err();
        assert_eq!(err.to_string(), "Error: Probability p must be between 0 and 1.");
    }

    #[test]
    fn normal_tails_and_interval() {
        let base = [("mean", FieldValue::from(0)), ("stdDev", FieldValue::from(1))];

        let mut less = base.to_vec();
        less.extend([("probType", "lessThan".into()), ("x1", 0.into())]);
        assert_eq!(run(NormalDistributionCalculator, &less).unwrap().text, "P(X < 0) = 0.500000");

        let mut between = base.to_vec();
        between.extend([("probType", "between".into()), ("x1", (-1).into()), ("x2", 1.into())]);
        let text = run(NormalDistributionCalculator, &between).unwrap().text;
        assert!(text.starts_with("P(-1 < X < 1) = 0.6826"), "{text}");
    }

    #[test]
    fn normal_rejects_non_positive_std_dev() {
        let err = run(
            NormalDistributionCalculator,
            &[("mean", 0.into()), ("stdDev", 0.into()), ("probType", "lessThan".into()), ("x1", 1.into())],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Error: Standard Deviation must be a positive number.");
    }

    #[test]
    fn normal_curve_spans_four_sigma() {
        let r = run(
            NormalDistributionCalculator,
            &[("mean", 10.into()), ("stdDev", 2.into()), ("probType", "greaterThan".into()), ("x1", 10.into())],
        )
        .unwrap();
        let data = &r.plot_data.unwrap().datasets[0].data;
        assert_eq!(data.len(), 101);
        match data[0] {
            DataPoint::Point { x, .. } => assert_abs_diff_eq!(x, 2.0),
            DataPoint::Value(_) => panic!("expected x/y points"),
        }
    }

    #[test]
    fn regression_through_points() {
        let r = run(LinearRegressionCalculator, &[("dataStr", "1,2\n2,4\n3,6".into())]).unwrap();
        assert_eq!(r.text, "Equation: y = 2.0000x + 0.0000\nCorrelation Coefficient (R): 1.0000");
    }

    #[test]
    fn regression_needs_two_points() {
        let err = run(LinearRegressionCalculator, &[("dataStr", "1,2".into())]).unwrap_err();
        assert_eq!(err.to_string(), "Error: At least two data points (x,y) are required.");
    }
}
