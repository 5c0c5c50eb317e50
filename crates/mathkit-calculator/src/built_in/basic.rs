//! Basic math calculators: arithmetic, percentages and unit conversion.

use crate::error::{CalcError, CalcResult};
use crate::format::{exponential, fixed, number};
use crate::inputs::CalculatorInputs;
use crate::plugin::{CalculatorPlugin, FieldSpec};
use mathkit_types::{CalculationResult, Dataset, PlotSpec, PlotType};
use serde_json::json;

/// `a op b` for the four basic operations
#[derive(Debug, Default)]
pub struct ArithmeticCalculator;

const ARITHMETIC_FIELDS: &[FieldSpec] =
    &[FieldSpec::number("num1"), FieldSpec::number("num2"), FieldSpec::text("operation")];

impl CalculatorPlugin for ArithmeticCalculator {
    fn name(&self) -> &str {
        "arithmetic"
    }

    fn title(&self) -> &str {
        "Arithmetic Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        ARITHMETIC_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let a = inputs.get_float("num1")?;
        let b = inputs.get_float("num2")?;
        let operation = inputs.get_string("operation")?;

        let (result, symbol) = match operation.as_str() {
            "+" => (a + b, "+"),
            "-" => (a - b, "-"),
            "*" | "×" => (a * b, "×"),
            "/" | "÷" => {
                if b == 0.0 {
                    return Err(CalcError::domain("Error: Division by zero is not allowed."));
                }
                (a / b, "÷")
            }
            _ => return Err(CalcError::unsupported("Invalid operation.")),
        };

        let (a_text, b_text, result_text) = (number(a), number(b), number(result));
        let steps = vec![
            "**1. Identify variables:**".to_string(),
            format!("   a = {a_text}"),
            format!("   b = {b_text}"),
            "**2. Apply formula:**".to_string(),
            format!("   Result = a {symbol} b"),
            format!("   Result = {a_text} {symbol} {b_text}"),
            "**3. Result:**".to_string(),
            format!("   {result_text}"),
        ];

        let plot = PlotSpec::new(PlotType::Bar).labels(["Number 1", "Number 2", "Result"]).dataset(
            Dataset::new("Values").values([a, b, result]).style(
                "backgroundColor",
                json!(["rgba(129, 140, 248, 0.5)", "rgba(52, 211, 153, 0.5)", "rgba(244, 63, 94, 0.5)"]),
            ),
        );

        Ok(CalculationResult::text(format!("{a_text} {symbol} {b_text} = {result_text}"))
            .with_steps(steps)
            .with_plot(plot))
    }
}

/// What percentage `part` is of `total`
#[derive(Debug, Default)]
pub struct PercentageCalculator;

const PERCENTAGE_FIELDS: &[FieldSpec] = &[FieldSpec::number("part"), FieldSpec::number("total")];

impl CalculatorPlugin for PercentageCalculator {
    fn name(&self) -> &str {
        "percentage"
    }

    fn title(&self) -> &str {
        "Percentage Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        PERCENTAGE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let part = inputs.get_float("part")?;
        let total = inputs.get_float("total")?;
        if total == 0.0 {
            return Err(CalcError::domain("Error: Total value cannot be zero."));
        }

        let ratio = part / total;
        let percentage = ratio * 100.0;
        let pct = fixed(percentage, 2);
        let (part_text, total_text) = (number(part), number(total));

        let steps = vec![
            "**1. Identify variables:**".to_string(),
            format!("   Part = {part_text}"),
            format!("   Total = {total_text}"),
            "**2. Apply formula:**".to_string(),
            "   Percentage = (Part / Total) × 100".to_string(),
            format!("   Percentage = ({part_text} / {total_text}) × 100"),
            format!("   Percentage = {} × 100", number(ratio)),
            "**3. Result:**".to_string(),
            format!("   {pct}%"),
        ];

        let plot = PlotSpec::new(PlotType::Doughnut)
            .labels([format!("Part ({pct}%)"), format!("Remainder ({}%)", fixed(100.0 - percentage, 2))])
            .dataset(
                Dataset::new("Percentage Breakdown")
                    .values([percentage, 100.0 - percentage])
                    .style("backgroundColor", json!(["rgb(129, 140, 248)", "rgba(255, 255, 255, 0.1)"]))
                    .style("borderColor", json!(["rgb(129, 140, 248)", "rgba(255, 255, 255, 0.2)"]))
                    .style("borderWidth", json!(1)),
            )
            .title("Percentage Breakdown");

        Ok(CalculationResult::text(format!("{part_text} is {pct}% of {total_text}."))
            .with_steps(steps)
            .with_plot(plot))
    }
}

// Factors to the category's base unit (m, kg, L, B); order is the listing order.
const LENGTH_UNITS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("km", 1000.0),
    ("cm", 0.01),
    ("mm", 0.001),
    ("mi", 1609.344),
    ("yd", 0.9144),
    ("ft", 0.3048),
    ("in", 0.0254),
];
const MASS_UNITS: &[(&str, f64)] =
    &[("kg", 1.0), ("g", 0.001), ("mg", 0.000001), ("t", 1000.0), ("lb", 0.45359237), ("oz", 0.02834952)];
const VOLUME_UNITS: &[(&str, f64)] = &[
    ("L", 1.0),
    ("mL", 0.001),
    ("m3", 1000.0),
    ("gal", 3.78541),
    ("qt", 0.946353),
    ("pt", 0.473176),
    ("cup", 0.24),
    ("floz", 0.0295735),
];
const DATA_UNITS: &[(&str, f64)] = &[
    ("b", 0.125),
    ("B", 1.0),
    ("KB", 1024.0),
    ("MB", 1048576.0),
    ("GB", 1073741824.0),
    ("TB", 1099511627776.0),
    ("PB", 1125899906842624.0),
];

const INVALID_UNITS: &str = "Please provide a valid value and units.";

fn factor(units: &[(&str, f64)], unit: &str) -> CalcResult<f64> {
    units
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, f)| *f)
        .ok_or_else(|| CalcError::domain(INVALID_UNITS))
}

fn to_kelvin(value: f64, unit: &str) -> CalcResult<f64> {
    match unit {
        "C" => Ok(value + 273.15),
        "F" => Ok((value - 32.0) * 5.0 / 9.0 + 273.15),
        "K" => Ok(value),
        _ => Err(CalcError::domain(INVALID_UNITS)),
    }
}

fn from_kelvin(kelvin: f64, unit: &str) -> CalcResult<f64> {
    match unit {
        "C" => Ok(kelvin - 273.15),
        "F" => Ok((kelvin - 273.15) * 9.0 / 5.0 + 32.0),
        "K" => Ok(kelvin),
        _ => Err(CalcError::domain(INVALID_UNITS)),
    }
}

/// Length, mass, temperature, volume and data-size conversion
#[derive(Debug, Default)]
pub struct UnitConverterCalculator;

const UNIT_FIELDS: &[FieldSpec] = &[FieldSpec::text("conversionType"), FieldSpec::number("value")];

impl CalculatorPlugin for UnitConverterCalculator {
    fn name(&self) -> &str {
        "unit_converter"
    }

    fn title(&self) -> &str {
        "Unit Converter"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        UNIT_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let kind = inputs.get_string("conversionType")?;
        let value = inputs.get_float("value")?;

        let (from_field, to_field, units) = match kind.as_str() {
            "length" => ("lengthFrom", "lengthTo", Some(LENGTH_UNITS)),
            "mass" => ("massFrom", "massTo", Some(MASS_UNITS)),
            "temperature" => ("tempFrom", "tempTo", None),
            "volume" => ("volumeFrom", "volumeTo", Some(VOLUME_UNITS)),
            "data" => ("dataFrom", "dataTo", Some(DATA_UNITS)),
            other => return Err(CalcError::unsupported(format!("Unknown conversion type '{other}'."))),
        };
        let from = inputs.get_string(from_field).map_err(|_| CalcError::domain(INVALID_UNITS))?;
        let to = inputs.get_string(to_field).map_err(|_| CalcError::domain(INVALID_UNITS))?;

        let value_text = number(value);
        let mut steps = vec![
            "**1. Identify variables:**".to_string(),
            format!("   Value = {value_text} {from}"),
            format!("   Target Unit = {to}"),
        ];
        let mut equivalents = Vec::new();

        let result = match units {
            None => {
                let kelvin = to_kelvin(value, &from)?;
                let result = from_kelvin(kelvin, &to)?;

                steps.push("**2. Convert to Base (Kelvin):**".to_string());
                steps.push(match from.as_str() {
                    "K" => format!("   Already in Kelvin: {value_text} K"),
                    "C" => format!("   K = {value_text} + 273.15 = {} K", fixed(kelvin, 4)),
                    _ => format!("   K = ({value_text} - 32) × 5/9 + 273.15 = {} K", fixed(kelvin, 4)),
                });
                steps.push(format!("**3. Convert to Target ({to}):**"));
                steps.push(format!("   Result = {} {to}", fixed(result, 4)));

                let celsius = kelvin - 273.15;
                equivalents.push(format!("{} C", fixed(celsius, 2)));
                equivalents.push(format!("{} F", fixed(celsius * 9.0 / 5.0 + 32.0, 2)));
                equivalents.push(format!("{} K", fixed(kelvin, 2)));
                result
            }
            Some(units) => {
                let from_factor = factor(units, &from)?;
                let to_factor = factor(units, &to)?;
                let base = value * from_factor;
                let result = base / to_factor;

                steps.push("**2. Convert to Base Unit:**".to_string());
                steps.push("   Base Value = Value × UnitFactor".to_string());
                steps.push(format!(
                    "   Base Value = {value_text} × {} = {} (Base)",
                    number(from_factor),
                    exponential(base, 4)
                ));
                steps.push("**3. Convert to Target Unit:**".to_string());
                steps.push("   Result = Base Value / TargetFactor".to_string());
                steps.push(format!("   Result = {} / {}", exponential(base, 4), number(to_factor)));
                steps.push(format!("   Result = {} {to}", fixed(result, 6)));

                for (unit, f) in units {
                    let v = base / f;
                    let shown = if !(0.001..=10000.0).contains(&v) { exponential(v, 4) } else { fixed(v, 4) };
                    equivalents.push(format!("{shown} {unit}"));
                }
                result
            }
        };

        let summary = format!("{value_text} {from} = {} {to}", fixed(result, 4));
        steps.push("**4. Result:**".to_string());
        steps.push(format!("   {summary}"));

        let text = format!("{summary}\n\nEquivalent Values:\n{}", equivalents.join("\n"));
        Ok(CalculationResult::text(text).with_steps(steps))
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
    fn arithmetic_uses_display_symbols() {
        let r = run(
            ArithmeticCalculator,
            &[("num1", 6.into()), ("num2", 3.into()), ("operation", "/".into())],
        )
        .unwrap();
        assert_eq!(r.text, "6 ÷ 3 = 2");
        assert_eq!(r.plot_data.unwrap().datasets[0].data.len(), 3);
    }

    #[test]
    fn arithmetic_rejects_division_by_zero() {
        let err = run(
            ArithmeticCalculator,
            &[("num1", 1.into()), ("num2", 0.into()), ("operation", "/".into())],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Error: Division by zero is not allowed.");
    }

    #[test]
    fn percentage_of_total() {
        let r = run(PercentageCalculator, &[("part", 25.into()), ("total", 200.into())]).unwrap();
        assert_eq!(r.text, "25 is 12.50% of 200.");
    }

    #[test]
    fn converts_length_and_lists_equivalents() {
        let r = run(
            UnitConverterCalculator,
            &[
                ("conversionType", "length".into()),
                ("value", 1.into()),
                ("lengthFrom", "km".into()),
                ("lengthTo", "m".into()),
            ],
        )
        .unwrap();
        assert!(r.text.starts_with("1 km = 1000.0000 m"));
        assert!(r.text.contains("1.0000e+5 cm"));
        assert!(r.text.contains("0.6214 mi"));
    }

    #[test]
    fn converts_temperature_through_kelvin() {
        let r = run(
            UnitConverterCalculator,
            &[
                ("conversionType", "temperature".into()),
                ("value", 100.into()),
                ("tempFrom", "C".into()),
                ("tempTo", "F".into()),
            ],
        )
        .unwrap();
        assert!(r.text.starts_with("100 C = 212.0000 F"));
        assert!(r.text.contains("373.15 K"));
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = run(
            UnitConverterCalculator,
            &[
                ("conversionType", "mass".into()),
                ("value", 1.into()),
                ("massFrom", "stone".into()),
                ("massTo", "kg".into()),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("valid value and units"));
    }
}
