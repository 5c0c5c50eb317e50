use approx::assert_abs_diff_eq;
use mathkit_calculator::built_in::algebra::{LinearSystemCalculator, QuadraticCalculator};
use mathkit_calculator::built_in::basic::ArithmeticCalculator;
use mathkit_calculator::built_in::calculus::{DerivativeCalculator, IntegralCalculator};
use mathkit_calculator::built_in::statistics::{NormalDistributionCalculator, StatisticsCalculator};
use mathkit_calculator::plugin::CalculatorPlugin;
use mathkit_calculator::{CalcResult, CalculatorInputs, FieldMap, FieldValue};

fn calculate_with<C: CalculatorPlugin>(calculator: C, inputs: &[(&str, FieldValue)]) -> CalcResult<String> {
    let fields: FieldMap = inputs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    calculator.calculate(&CalculatorInputs::new(&fields)).map(|r| r.text)
}

/// Parse the first number that follows `marker` in `text`
fn number_after(text: &str, marker: &str) -> f64 {
    let start = text.find(marker).unwrap() + marker.len();
    text[start..]
        .trim_start()
        .split(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .next()
        .unwrap()
        .parse()
        .unwrap()
}

#[test]
fn arithmetic_calculator_works() {
    let text = calculate_with(
        ArithmeticCalculator,
        &[("num1", 2.5.into()), ("num2", 4.into()), ("operation", "+".into())],
    )
    .unwrap();
    assert_eq!(text, "2.5 + 4 = 6.5");
}

#[test]
fn arithmetic_division_by_zero_is_an_error() {
    let err = calculate_with(
        ArithmeticCalculator,
        &[("num1", 1.into()), ("num2", 0.into()), ("operation", "/".into())],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Error: Division by zero is not allowed.");
}

#[test]
fn quadratic_roots_satisfy_the_equation() {
    let (a, b, c) = (2.0, -7.0, 3.0);
    let text = calculate_with(QuadraticCalculator, &[("a", a.into()), ("b", b.into()), ("c", c.into())]).unwrap();
    for marker in ["x₁ =", "x₂ ="] {
        let r = number_after(&text, marker);
        assert_abs_diff_eq!(a * r * r + b * r + c, 0.0, epsilon = 1e-3);
    }
}

#[test]
fn quadratic_branches_follow_the_discriminant() {
    let repeated = calculate_with(QuadraticCalculator, &[("a", 1.into()), ("b", 2.into()), ("c", 1.into())]).unwrap();
    assert!(repeated.contains("One real root: x = -1.0000"), "{repeated}");

    let complex = calculate_with(QuadraticCalculator, &[("a", 1.into()), ("b", 2.into()), ("c", 5.into())]).unwrap();
    assert!(complex.contains("Complex roots"), "{complex}");
    assert!(complex.contains("-1.0000 ± 2.0000i"), "{complex}");
}

#[test]
fn central_difference_of_square() {
    let text = calculate_with(
        DerivativeCalculator,
        &[("func", "x^2".into()), ("point", 2.into()), ("method", "central".into())],
    )
    .unwrap();
    assert_abs_diff_eq!(number_after(&text, "≈"), 4.0, epsilon = 1e-4);
}

#[test]
fn trapezoid_integral_of_square() {
    let text = calculate_with(
        IntegralCalculator,
        &[("func", "x^2".into()), ("lower", 0.into()), ("upper", 1.into())],
    )
    .unwrap();
    assert_abs_diff_eq!(number_after(&text, "≈"), 1.0 / 3.0, epsilon = 1e-3);
}

#[test]
fn statistics_of_reference_dataset() {
    let text = calculate_with(StatisticsCalculator, &[("dataStr", "1,2,3,4,5,5".into())]).unwrap();
    assert_abs_diff_eq!(number_after(&text, "Mean (Average):"), 3.3333, epsilon = 1e-4);
    assert_abs_diff_eq!(number_after(&text, "Median (Middle Value):"), 3.5, epsilon = 1e-4);
    assert_abs_diff_eq!(number_after(&text, "Mode (Most Frequent):"), 5.0);
    assert_abs_diff_eq!(number_after(&text, "Standard Deviation (Population):"), 1.4907, epsilon = 1e-4);
}

#[test]
fn statistics_single_value_has_zero_range() {
    let text = calculate_with(StatisticsCalculator, &[("dataStr", "42".into())]).unwrap();
    assert!(text.contains("Range: 0"), "{text}");
}

#[test]
fn linear_system_by_cramer() {
    let text = calculate_with(
        LinearSystemCalculator,
        &[
            ("a1", 2.into()),
            ("b1", 3.into()),
            ("c1", 6.into()),
            ("a2", 4.into()),
            ("b2", 1.into()),
            ("c2", 25.into()),
        ],
    )
    .unwrap();
    assert_eq!(text, "x = 6.9000\ny = -2.6000");
}

#[test]
fn parallel_lines_have_no_unique_solution() {
    let err = calculate_with(
        LinearSystemCalculator,
        &[
            ("a1", 2.into()),
            ("b1", 3.into()),
            ("c1", 6.into()),
            ("a2", 4.into()),
            ("b2", 6.into()),
            ("c2", 10.into()),
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("No unique solution"));
}

#[test]
fn normal_distribution_rejects_bad_std_dev() {
    for sd in [0.0, -1.0] {
        let err = calculate_with(
            NormalDistributionCalculator,
            &[("mean", 0.into()), ("stdDev", sd.into()), ("probType", "lessThan".into()), ("x1", 1.into())],
        )
        .unwrap_err();
        assert_eq!(err.category(), "domain");
    }
}
