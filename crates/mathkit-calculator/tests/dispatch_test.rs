use mathkit_calculator::calculator::{NOT_IMPLEMENTED, UNDEFINED_RESULT};
use mathkit_calculator::{Calculator, FieldMap, FieldValue, solve};

fn fields(pairs: &[(&str, FieldValue)]) -> FieldMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn unknown_identifiers_are_not_implemented() {
    let result = solve("Warp Drive Calculator", &FieldMap::new());
    assert_eq!(result.text, NOT_IMPLEMENTED);
    assert!(result.steps.is_none());
    assert!(result.plot_data.is_none());
}

#[test]
fn titles_and_names_resolve_to_the_same_calculator() {
    let input = fields(&[("num1", 6.into()), ("num2", 7.into()), ("operation", "*".into())]);
    let by_name = solve("arithmetic", &input);
    let by_title = solve("Arithmetic Calculator", &input);
    assert_eq!(by_name, by_title);
    assert_eq!(by_name.text, "6 × 7 = 42");
}

#[test]
fn missing_fields_are_reported_before_solving() {
    let result = solve("quadratic", &fields(&[("a", 1.into()), ("b", 2.into())]));
    assert_eq!(result.text, "Error: Please provide a value for 'c'.");
}

#[test]
fn non_numeric_fields_are_reported() {
    let result = solve("quadratic", &fields(&[("a", "one".into()), ("b", 2.into()), ("c", 1.into())]));
    assert!(result.text.starts_with("Error: Invalid value for 'a'"), "{}", result.text);
}

#[test]
fn numeric_text_is_accepted() {
    let result = solve(
        "percentage",
        &fields(&[("part", FieldValue::from("25")), ("total", FieldValue::from(" 200 "))]),
    );
    assert_eq!(result.text, "25 is 12.50% of 200.");
}

#[test]
fn parse_errors_become_result_text() {
    let result = solve("integral", &fields(&[("func", "invalidfunc(x)".into()), ("lower", 0.into()), ("upper", 1.into())]));
    assert_eq!(result.text, "Invalid function.");
}

#[test]
fn non_finite_values_never_reach_the_text() {
    let result = solve(
        "integral",
        &fields(&[("func", "1/x".into()), ("lower", 0.into()), ("upper", 1.into())]),
    );
    assert!(!result.text.contains("NaN"));
    assert!(!result.text.contains("inf"), "{}", result.text);

    let result = solve("arithmetic", &fields(&[("num1", 1e308.into()), ("num2", 1e308.into()), ("operation", "*".into())]));
    assert_eq!(result.text, UNDEFINED_RESULT);
}

#[test]
fn unsupported_features_explain_themselves() {
    let result = solve("polynomial_roots", &fields(&[("coeffsStr", "1, 0, 0, -1".into())]));
    assert!(!result.text.is_empty());
    assert!(result.plot_data.is_none());

    let result = solve("Trigonometric Equation Solver", &fields(&[("equation", "sin(x) = 0.5".into())]));
    assert!(!result.text.is_empty());
}

#[test]
fn every_registered_calculator_answers_with_text() {
    let calculator = Calculator::new();
    let list = calculator.list();
    assert!(list.len() >= 60, "only {} calculators registered", list.len());

    for (name, _) in list {
        let result = calculator.solve(name, &FieldMap::new());
        assert!(!result.text.trim().is_empty(), "{name} returned empty text");
    }
}

#[test]
fn list_is_sorted_by_name() {
    let calculator = Calculator::default();
    let names: Vec<&str> = calculator.list().into_iter().map(|(name, _)| name).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn results_serialize_with_front_end_keys() {
    let result = solve("fourier", &fields(&[("signalStr", "1, 0, -1, 0".into())]));
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("text").is_some());
    assert!(json.get("steps").is_some());
    assert_eq!(json["plotData"]["type"], "bar");
}

#[test]
fn deeply_nested_formulas_are_rejected_without_crashing() {
    for depth in [1_000, 20_000] {
        let func = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        let result = solve("integral", &fields(&[("func", func.into()), ("lower", 0.into()), ("upper", 1.into())]));
        assert_eq!(result.text, "Invalid function.");
    }

    let func = format!("{}x{}", "(".repeat(200), ")".repeat(200));
    let result = solve("integral", &fields(&[("func", func.into()), ("lower", 0.into()), ("upper", 1.into())]));
    assert!(result.text.starts_with("Integral from 0 to 1"), "{}", result.text);
}

#[test]
fn binomial_answers_for_large_trial_counts() {
    let result = solve("binomial", &fields(&[("n", 1100.into()), ("k", 550.into()), ("p", 0.5.into())]));
    assert_eq!(result.text, "P(X=550) = 0.024052");
    assert!(result.steps.is_some());
}
