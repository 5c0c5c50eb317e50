//! Geometry and trigonometry calculators.

use crate::error::{CalcError, CalcResult};
use crate::format::{fixed, number};
use crate::inputs::CalculatorInputs;
use crate::plugin::{CalculatorPlugin, FieldRange, FieldSpec};
use mathkit_types::CalculationResult;
use std::f64::consts::PI;

/// Area and (where defined) perimeter of a shape, with the worked steps
struct Measured {
    details: String,
    variables: Vec<String>,
    formulas: Vec<String>,
    area: f64,
    perimeter: Option<f64>,
}

fn positive(inputs: &CalculatorInputs, field: &str) -> CalcResult<f64> {
    let value = inputs.get_float(field)?;
    if value <= 0.0 {
        return Err(CalcError::invalid(field, "must be a positive number"));
    }
    Ok(value)
}

fn measure(shape: &str, inputs: &CalculatorInputs) -> CalcResult<Measured> {
    let measured = match shape {
        "square" => {
            let s = positive(inputs, "side")?;
            let (area, perimeter) = (s * s, 4.0 * s);
            let st = number(s);
            Measured {
                details: format!("Side = {st}"),
                variables: vec![format!("   Side (s) = {st}")],
                formulas: vec![
                    "   Area (A) = s²".to_string(),
                    format!("   A = {st}² = {}", fixed(area, 4)),
                    "   Perimeter (P) = 4s".to_string(),
                    format!("   P = 4 × {st} = {}", fixed(perimeter, 4)),
                ],
                area,
                perimeter: Some(perimeter),
            }
        }
        "rectangle" => {
            let (l, w) = (positive(inputs, "length")?, positive(inputs, "width")?);
            let (area, perimeter) = (l * w, 2.0 * (l + w));
            let (lt, wt) = (number(l), number(w));
            Measured {
                details: format!("Length = {lt}, Width = {wt}"),
                variables: vec![format!("   Length (l) = {lt}"), format!("   Width (w) = {wt}")],
                formulas: vec![
                    "   Area (A) = l × w".to_string(),
                    format!("   A = {lt} × {wt} = {}", fixed(area, 4)),
                    "   Perimeter (P) = 2(l + w)".to_string(),
                    format!("   P = 2({lt} + {wt}) = {}", fixed(perimeter, 4)),
                ],
                area,
                perimeter: Some(perimeter),
            }
        }
        "circle" => {
            let r = positive(inputs, "radius")?;
            let (area, circumference) = (PI * r * r, 2.0 * PI * r);
            let rt = number(r);
            Measured {
                details: format!("Radius = {rt}"),
                variables: vec![format!("   Radius (r) = {rt}")],
                formulas: vec![
                    "   Area (A) = πr²".to_string(),
                    format!("   A = π × {rt}² ≈ {}", fixed(area, 4)),
                    "   Circumference (C) = 2πr".to_string(),
                    format!("   C = 2π × {rt} ≈ {}", fixed(circumference, 4)),
                ],
                area,
                perimeter: Some(circumference),
            }
        }
        "triangle" if inputs.get_string_or("triangleMethod", "sides") == "baseHeight" => {
            let (b, h) = (positive(inputs, "base")?, positive(inputs, "height")?);
            let area = 0.5 * b * h;
            let (bt, ht) = (number(b), number(h));
            Measured {
                details: format!("Base = {bt}, Height = {ht}"),
                variables: vec![format!("   Base (b) = {bt}"), format!("   Height (h) = {ht}")],
                formulas: vec![
                    "   Area (A) = ½ × b × h".to_string(),
                    format!("   A = 0.5 × {bt} × {ht} = {}", fixed(area, 4)),
                ],
                area,
                perimeter: None,
            }
        }
        "triangle" => {
            let (a, b, c) = (positive(inputs, "s1")?, positive(inputs, "s2")?, positive(inputs, "s3")?);
            let s = (a + b + c) / 2.0;
            if s <= a || s <= b || s <= c {
                return Err(CalcError::domain(
                    "Invalid triangle sides. Sum of any two sides must be greater than the third.",
                ));
            }
            let area = (s * (s - a) * (s - b) * (s - c)).sqrt();
            let perimeter = a + b + c;
            let (at, bt, ct) = (number(a), number(b), number(c));
            Measured {
                details: format!("Sides: {at}, {bt}, {ct}"),
                variables: vec![
                    format!("   Side a = {at}"),
                    format!("   Side b = {bt}"),
                    format!("   Side c = {ct}"),
                ],
                formulas: vec![
                    "   Semi-perimeter (s) = (a+b+c)/2".to_string(),
                    format!("   s = ({at}+{bt}+{ct})/2 = {}", number(s)),
                    "   Area (A) = √[s(s-a)(s-b)(s-c)]".to_string(),
                    format!(
                        "   A = √[{}({})({})({})] = {}",
                        number(s),
                        number(s - a),
                        number(s - b),
                        number(s - c),
                        fixed(area, 4)
                    ),
                    "   Perimeter (P) = a + b + c".to_string(),
                    format!("   P = {at} + {bt} + {ct} = {}", number(perimeter)),
                ],
                area,
                perimeter: Some(perimeter),
            }
        }
        "trapezoid" => {
            let (a, b, h) = (positive(inputs, "pa")?, positive(inputs, "pb")?, positive(inputs, "height")?);
            let area = 0.5 * (a + b) * h;
            let (at, bt, ht) = (number(a), number(b), number(h));
            Measured {
                details: format!("Sides: {at}, {bt}, Height: {ht}"),
                variables: vec![
                    format!("   Parallel Side a = {at}"),
                    format!("   Parallel Side b = {bt}"),
                    format!("   Height (h) = {ht}"),
                ],
                formulas: vec![
                    "   Area (A) = ½(a + b)h".to_string(),
                    format!("   A = 0.5 × ({at} + {bt}) × {ht}"),
                    format!("   A = {}", fixed(area, 4)),
                ],
                area,
                perimeter: None,
            }
        }
        "parallelogram" => {
            let (b, h) = (positive(inputs, "base")?, positive(inputs, "height")?);
            let area = b * h;
            let (bt, ht) = (number(b), number(h));
            Measured {
                details: format!("Base: {bt}, Height: {ht}"),
                variables: vec![format!("   Base (b) = {bt}"), format!("   Height (h) = {ht}")],
                formulas: vec!["   Area (A) = b × h".to_string(), format!("   A = {bt} × {ht} = {}", fixed(area, 4))],
                area,
                perimeter: None,
            }
        }
        _ => return Err(CalcError::unsupported("Shape not supported.")),
    };
    Ok(measured)
}

fn area_result(shape: &str, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
    let m = measure(shape, inputs)?;

    let mut text = format!("Shape: {shape}\n\n{}\nArea = {}", m.details, fixed(m.area, 4));
    if let Some(perimeter) = m.perimeter {
        let name = if shape == "circle" { "Circumference" } else { "Perimeter" };
        text.push_str(&format!("\n{name} = {}", fixed(perimeter, 4)));
    }

    let mut title = shape.to_string();
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    let mut steps = vec!["**1. Identify variables:**".to_string(), format!("   Shape: {title}")];
    steps.extend(m.variables);
    steps.push(if m.perimeter.is_some() { "**2. Apply formulas:**" } else { "**2. Apply formula:**" }.to_string());
    steps.extend(m.formulas);
    steps.push("**3. Result:**".to_string());
    steps.push(format!("   Area = {}", fixed(m.area, 4)));
    if let Some(perimeter) = m.perimeter {
        steps.push(format!("   Perimeter = {}", fixed(perimeter, 4)));
    }

    Ok(CalculationResult::text(text).with_steps(steps))
}

/// Area and perimeter of common plane shapes
#[derive(Debug, Default)]
pub struct AreaPerimeterCalculator;

const SHAPE_FIELDS: &[FieldSpec] = &[FieldSpec::text("shape")];

impl CalculatorPlugin for AreaPerimeterCalculator {
    fn name(&self) -> &str {
        "area_perimeter"
    }

    fn title(&self) -> &str {
        "Area & Perimeter"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        SHAPE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let shape = inputs.get_string("shape")?.to_lowercase();
        area_result(&shape, inputs)
    }
}

#[derive(Debug, Default)]
pub struct CircleCalculator;

const CIRCLE_FIELDS: &[FieldSpec] = &[FieldSpec::number("radius").range(FieldRange::Positive)];

impl CalculatorPlugin for CircleCalculator {
    fn name(&self) -> &str {
        "circle"
    }

    fn title(&self) -> &str {
        "Circle Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        CIRCLE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        area_result("circle", inputs)
    }
}

/// Interior angles from three sides by the law of cosines
#[derive(Debug, Default)]
pub struct TriangleSolverCalculator;

const TRIANGLE_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("s1").range(FieldRange::Positive),
    FieldSpec::number("s2").range(FieldRange::Positive),
    FieldSpec::number("s3").range(FieldRange::Positive),
];

impl CalculatorPlugin for TriangleSolverCalculator {
    fn name(&self) -> &str {
        "triangle_solver"
    }

    fn title(&self) -> &str {
        "Triangle Solver"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        TRIANGLE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let (a, b, c) = (inputs.get_float("s1")?, inputs.get_float("s2")?, inputs.get_float("s3")?);
        if a + b <= c || a + c <= b || b + c <= a {
            return Err(CalcError::domain(
                "Invalid triangle. Sum of two sides must be greater than the third.",
            ));
        }

        let angle_a = ((b * b + c * c - a * a) / (2.0 * b * c)).acos().to_degrees();
        let angle_b = ((a * a + c * c - b * b) / (2.0 * a * c)).acos().to_degrees();
        let angle_c = 180.0 - angle_a - angle_b;
        let (at, bt, ct) = (number(a), number(b), number(c));

        let steps = vec![
            "**1. Identify sides:**".to_string(),
            format!("   a={at}, b={bt}, c={ct}"),
            "**2. Law of Cosines for Angle A:**".to_string(),
            "   cos A = (b² + c² - a²) / 2bc".to_string(),
            format!("   cos A = ({bt}² + {ct}² - {at}²) / 2({bt})({ct})"),
            format!("   A = arccos(...) = {}°", fixed(angle_a, 2)),
            "**3. Law of Cosines for Angle B:**".to_string(),
            "   cos B = (a² + c² - b²) / 2ac".to_string(),
            format!("   B = {}°", fixed(angle_b, 2)),
            "**4. Sum of Angles:**".to_string(),
            format!("   C = 180° - A - B = {}°", fixed(angle_c, 2)),
        ];

        Ok(CalculationResult::text(format!(
            "Angle A (opposite side a): {}°\nAngle B (opposite side b): {}°\nAngle C (opposite side c): {}°",
            fixed(angle_a, 2),
            fixed(angle_b, 2),
            fixed(angle_c, 2)
        ))
        .with_steps(steps))
    }
}

/// Euclidean distance between two points in the plane
#[derive(Debug, Default)]
pub struct DistanceCalculator;

const DISTANCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("x1"),
    FieldSpec::number("y1"),
    FieldSpec::number("x2"),
    FieldSpec::number("y2"),
];

impl CalculatorPlugin for DistanceCalculator {
    fn name(&self) -> &str {
        "distance"
    }

    fn title(&self) -> &str {
        "Distance Formula"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        DISTANCE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let [x1, y1, x2, y2] = [
            inputs.get_float("x1")?,
            inputs.get_float("y1")?,
            inputs.get_float("x2")?,
            inputs.get_float("y2")?,
        ];
        let (dx2, dy2) = ((x2 - x1).powi(2), (y2 - y1).powi(2));
        let distance = (dx2 + dy2).sqrt();
        let a = format!("({}, {})", number(x1), number(y1));
        let b = format!("({}, {})", number(x2), number(y2));

        let steps = vec![
            "**1. Identify coordinates:**".to_string(),
            format!("   Point A: {a}"),
            format!("   Point B: {b}"),
            "**2. Apply Distance Formula:**".to_string(),
            "   d = √((x2-x1)² + (y2-y1)²)".to_string(),
            format!(
                "   d = √(( {}-{} )² + ( {}-{} )²)",
                number(x2),
                number(x1),
                number(y2),
                number(y1)
            ),
            format!("   d = √({} + {})", number(dx2), number(dy2)),
            "**3. Result:**".to_string(),
            format!("   d = √{}", number(dx2 + dy2)),
            format!("   d = {}", fixed(distance, 4)),
        ];

        Ok(CalculationResult::text(format!(
            "Point A: {a}\nPoint B: {b}\nDistance = {}",
            fixed(distance, 4)
        ))
        .with_steps(steps))
    }
}

/// sin, cos and tan of an angle in degrees or radians
#[derive(Debug, Default)]
pub struct TrigBasicsCalculator;

const TRIG_FIELDS: &[FieldSpec] = &[FieldSpec::number("angle"), FieldSpec::text("unit").optional()];

impl CalculatorPlugin for TrigBasicsCalculator {
    fn name(&self) -> &str {
        "trig_basics"
    }

    fn title(&self) -> &str {
        "Trigonometry Calculator (sin, cos, tan)"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        TRIG_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let angle = inputs.get_float("angle")?;
        let unit = inputs.get_string_or("unit", "deg");
        let rad = match unit.as_str() {
            "deg" => angle.to_radians(),
            "rad" => angle,
            other => return Err(CalcError::invalid("unit", format!("expected 'deg' or 'rad', got '{other}'"))),
        };
        let (sin, cos, tan) = (rad.sin(), rad.cos(), rad.tan());
        let angle_text = number(angle);
        let r = fixed(rad, 4);

        let mut steps = vec!["**1. Identify angle:**".to_string(), format!("   {angle_text} {unit}")];
        if unit == "deg" {
            steps.push(format!("   Converted to radians: {r} rad"));
        }
        steps.extend([
            "**2. Calculate Trig Functions:**".to_string(),
            "   sin(θ), cos(θ), tan(θ)".to_string(),
            format!("   sin({r}) = {}", fixed(sin, 4)),
            format!("   cos({r}) = {}", fixed(cos, 4)),
            format!("   tan({r}) = {}", fixed(tan, 4)),
        ]);

        Ok(CalculationResult::text(format!(
            "Angle: {angle_text} {unit}\n\nsin = {}\ncos = {}\ntan = {}",
            fixed(sin, 6),
            fixed(cos, 6),
            fixed(tan, 6)
        ))
        .with_steps(steps))
    }
}

/// Placeholder for symbolic trigonometric equations
#[derive(Debug, Default)]
pub struct TrigEquationCalculator;

impl CalculatorPlugin for TrigEquationCalculator {
    fn name(&self) -> &str {
        "trig_equation"
    }

    fn title(&self) -> &str {
        "Trigonometric Equation Solver"
    }

    fn calculate(&self, _inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        Err(CalcError::unsupported(
            "Symbolic trigonometric equation solving is not supported in this version. \
             Please check back for updates using a CAS engine.",
        ))
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
    fn rectangle_area_and_perimeter() {
        let r = run(
            AreaPerimeterCalculator,
            &[("shape", "rectangle".into()), ("length", 3.into()), ("width", 4.into())],
        )
        .unwrap();
        assert_eq!(r.text, "Shape: rectangle\n\nLength = 3, Width = 4\nArea = 12.0000\nPerimeter = 14.0000");
        assert!(r.steps.unwrap().contains(&"   Shape: Rectangle".to_string()));
    }

    #[test]
    fn heron_formula_for_three_four_five() {
        let r = run(
            AreaPerimeterCalculator,
            &[("shape", "triangle".into()), ("s1", 3.into()), ("s2", 4.into()), ("s3", 5.into())],
        )
        .unwrap();
        assert!(r.text.contains("Area = 6.0000"));
        assert!(r.text.contains("Perimeter = 12.0000"));
    }

    #[test]
    fn degenerate_triangle_is_rejected() {
        let err = run(
            AreaPerimeterCalculator,
            &[("shape", "triangle".into()), ("s1", 1.into()), ("s2", 2.into()), ("s3", 3.into())],
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Invalid triangle sides"));
    }

    #[test]
    fn triangle_by_base_and_height_has_no_perimeter() {
        let r = run(
            AreaPerimeterCalculator,
            &[
                ("shape", "triangle".into()),
                ("triangleMethod", "baseHeight".into()),
                ("base", 6.into()),
                ("height", 2.into()),
            ],
        )
        .unwrap();
        assert!(r.text.ends_with("Area = 6.0000"));
    }

    #[test]
    fn circle_reports_circumference() {
        let r = run(CircleCalculator, &[("radius", 1.into())]).unwrap();
        assert!(r.text.contains("Area = 3.1416"));
        assert!(r.text.contains("Circumference = 6.2832"));
    }

    #[test]
    fn unknown_shape() {
        let err = run(AreaPerimeterCalculator, &[("shape", "hexagon".into())]).unwrap_err();
        assert_eq!(err.to_string(), "Shape not supported.");
    }

    #[test]
    fn right_triangle_angles() {
        let r = run(TriangleSolverCalculator, &[("s1", 3.into()), ("s2", 4.into()), ("s3", 5.into())]).unwrap();
        assert!(r.text.ends_with("Angle C (opposite side c): 90.00°"));
    }

    #[test]
    fn distance_three_four_five() {
        let r = run(
            DistanceCalculator,
            &[("x1", 0.into()), ("y1", 0.into()), ("x2", 3.into()), ("y2", 4.into())],
        )
        .unwrap();
        assert_eq!(r.text, "Point A: (0, 0)\nPoint B: (3, 4)\nDistance = 5.0000");
    }

    #[test]
    fn trig_in_degrees() {
        let r = run(TrigBasicsCalculator, &[("angle", 30.into()), ("unit", "deg".into())]).unwrap();
        assert!(r.text.contains("sin = 0.500000"));
        assert!(r.text.contains("cos = 0.866025"));
    }

    #[test]
    fn trig_equations_are_unsupported() {
        let err = run(TrigEquationCalculator, &[]).unwrap_err();
        assert_eq!(err.category(), "unsupported");
    }
}
