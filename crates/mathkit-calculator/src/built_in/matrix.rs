//! Matrix and vector calculators, plus the discrete Fourier transform.

use crate::error::CalcResult;
use crate::format::{fixed, number};
use crate::inputs::CalculatorInputs;
use crate::numeric::fourier;
use crate::numeric::linalg::{self, Eigenvalues, Matrix2};
use crate::plugin::{CalculatorPlugin, FieldSpec};
use mathkit_types::{CalculationResult, Dataset, PlotSpec, PlotType};

/// Reads `{prefix}00`, `{prefix}01`, `{prefix}10`, `{prefix}11`
fn read_matrix(inputs: &CalculatorInputs, prefix: &str) -> CalcResult<Matrix2> {
    let cell = |i: usize, j: usize| inputs.get_float(&format!("{prefix}{i}{j}"));
    Ok(Matrix2::new(cell(0, 0)?, cell(0, 1)?, cell(1, 0)?, cell(1, 1)?))
}

fn render(m: &Matrix2) -> String {
    let [[a, b], [c, d]] = m.0;
    format!("[[{}, {}], [{}, {}]]", number(a), number(b), number(c), number(d))
}

#[derive(Debug, Default)]
pub struct MatrixMultiplyCalculator;

const MULTIPLY_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("m1_00"),
    FieldSpec::number("m1_01"),
    FieldSpec::number("m1_10"),
    FieldSpec::number("m1_11"),
    FieldSpec::number("m2_00"),
    FieldSpec::number("m2_01"),
    FieldSpec::number("m2_10"),
    FieldSpec::number("m2_11"),
];

impl CalculatorPlugin for MatrixMultiplyCalculator {
    fn name(&self) -> &str {
        "matrix_multiply"
    }

    fn title(&self) -> &str {
        "Matrix Multiplication"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        MULTIPLY_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let a = read_matrix(inputs, "m1_")?;
        let b = read_matrix(inputs, "m2_")?;
        let c = a.multiply(&b);
        let n = number;

        let mut steps = vec![
            "**1. Identify Matrices A & B:**".to_string(),
            format!("   A = {}", render(&a)),
            format!("   B = {}", render(&b)),
            "**2. Apply Formula:**".to_string(),
            "   C_ij = Row_i(A) • Col_j(B)".to_string(),
            "**3. Compute Dot Products:**".to_string(),
        ];
        for i in 0..2 {
            for j in 0..2 {
                steps.push(format!(
                    "   Row {} • Col {}: ({})({}) + ({})({}) = {}",
                    i + 1,
                    j + 1,
                    n(a.0[i][0]),
                    n(b.0[0][j]),
                    n(a.0[i][1]),
                    n(b.0[1][j]),
                    n(c.0[i][j])
                ));
            }
        }
        steps.push("**4. Result:**".to_string());
        steps.push(format!("   {}", render(&c)));

        let [[c11, c12], [c21, c22]] = c.0;
        Ok(CalculationResult::text(format!(
            "Result Matrix:\n[ {}, {} ]\n[ {}, {} ]",
            n(c11),
            n(c12),
            n(c21),
            n(c22)
        ))
        .with_steps(steps))
    }
}

const SINGLE_MATRIX_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("m_00"),
    FieldSpec::number("m_01"),
    FieldSpec::number("m_10"),
    FieldSpec::number("m_11"),
];

#[derive(Debug, Default)]
pub struct MatrixDeterminantCalculator;

impl CalculatorPlugin for MatrixDeterminantCalculator {
    fn name(&self) -> &str {
        "matrix_determinant"
    }

    fn title(&self) -> &str {
        "Matrix Determinant"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        SINGLE_MATRIX_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let m = read_matrix(inputs, "m_")?;
        let [[a, b], [c, d]] = m.0;
        let det = number(m.determinant());

        let steps = vec![
            "**1. Identify Matrix:**".to_string(),
            format!("   {}", render(&m)),
            "**2. Apply Formula:**".to_string(),
            "   det = ad - bc".to_string(),
            format!("   det = ({})({}) - ({})({})", number(a), number(d), number(b), number(c)),
            format!("   det = {} - {}", number(a * d), number(b * c)),
            "**3. Result:**".to_string(),
            format!("   det = {det}"),
        ];

        Ok(CalculationResult::text(format!("Determinant = {det}")).with_steps(steps))
    }
}

/// Eigenvalues of a 2×2 matrix from its characteristic polynomial
#[derive(Debug, Default)]
pub struct EigenvaluesCalculator;

impl CalculatorPlugin for EigenvaluesCalculator {
    fn name(&self) -> &str {
        "eigenvalues"
    }

    fn title(&self) -> &str {
        "Eigenvalue/Eigenvector"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        SINGLE_MATRIX_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let m = read_matrix(inputs, "m_")?;
        let [[a, _], [_, d]] = m.0;
        let (trace, det) = (m.trace(), m.determinant());
        let delta = trace * trace - 4.0 * det;
        let (tr, dt) = (number(trace), number(det));

        let mut steps = vec![
            "**1. Identify Matrix parameters:**".to_string(),
            format!("   Matrix = {}", render(&m)),
            format!("   Trace (tr) = a + d = {} + {} = {tr}", number(a), number(d)),
            format!("   Determinant (det) = ad - bc = {dt}"),
            "**2. Characteristic Equation:**".to_string(),
            "   det(A - λI) = 0".to_string(),
            "   λ² - tr(A)λ + det(A) = 0".to_string(),
            format!("   λ² - {tr}λ + {dt} = 0"),
        ];

        let text = match m.eigenvalues() {
            Eigenvalues::RealDistinct(l1, l2) => real_eigenvalues(&mut steps, (l1, l2), &tr, &dt, delta),
            Eigenvalues::Repeated(l) => real_eigenvalues(&mut steps, (l, l), &tr, &dt, delta),
            Eigenvalues::ComplexPair(z, _) => {
                let (re, im) = (fixed(z.re, 4), fixed(z.im.abs(), 4));
                steps.extend([
                    "**3. Solve Quadratic:**".to_string(),
                    format!("   Discriminant is negative ({}), so roots are complex.", number(delta)),
                    format!("   Real part = {tr}/2 = {re}"),
                    format!("   Imaginary part = √{}/2 = {im}", number(-delta)),
                ]);
                format!("Complex Eigenvalues:\n{re} ± {im}i")
            }
        };

        Ok(CalculationResult::text(text).with_steps(steps))
    }
}

fn real_eigenvalues(steps: &mut Vec<String>, (l1, l2): (f64, f64), tr: &str, dt: &str, delta: f64) -> String {
    let (l1, l2) = (fixed(l1, 4), fixed(l2, 4));
    steps.extend([
        "**3. Solve Quadratic:**".to_string(),
        format!("   λ = [{tr} ± √({tr}² - 4(1)({dt}))] / 2"),
        format!("   λ = [{tr} ± √{}] / 2", number(delta)),
        "**4. Results:**".to_string(),
        format!("   λ₁ = {l1}"),
        format!("   λ₂ = {l2}"),
    ]);
    format!("Eigenvalues:\nλ₁ = {l1}\nλ₂ = {l2}")
}

#[derive(Debug, Default)]
pub struct VectorCrossCalculator;

const CROSS_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("v1x"),
    FieldSpec::number("v1y"),
    FieldSpec::number("v1z"),
    FieldSpec::number("v2x"),
    FieldSpec::number("v2y"),
    FieldSpec::number("v2z"),
];

fn render_vector(v: [f64; 3]) -> String {
    format!("[{}, {}, {}]", number(v[0]), number(v[1]), number(v[2]))
}

impl CalculatorPlugin for VectorCrossCalculator {
    fn name(&self) -> &str {
        "vector_cross"
    }

    fn title(&self) -> &str {
        "Vector Cross Product"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        CROSS_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let read = |prefix: &str| -> CalcResult<[f64; 3]> {
            Ok([
                inputs.get_float(&format!("{prefix}x"))?,
                inputs.get_float(&format!("{prefix}y"))?,
                inputs.get_float(&format!("{prefix}z"))?,
            ])
        };
        let a = read("v1")?;
        let b = read("v2")?;
        let c = linalg::cross(a, b);
        let n = number;
        let (a, b) = (a.map(n), b.map(n));
        let product = render_vector(c);

        let steps = vec![
            "**1. Identify Vectors:**".to_string(),
            format!("   A = [{}, {}, {}]", a[0], a[1], a[2]),
            format!("   B = [{}, {}, {}]", b[0], b[1], b[2]),
            "**2. Apply Formulas:**".to_string(),
            "   cx = ay*bz - az*by".to_string(),
            "   cy = az*bx - ax*bz".to_string(),
            "   cz = ax*by - ay*bx".to_string(),
            "**3. Substitute and Solve:**".to_string(),
            format!("   cx = {}*{} - {}*{} = {}", a[1], b[2], a[2], b[1], n(c[0])),
            format!("   cy = {}*{} - {}*{} = {}", a[2], b[0], a[0], b[2], n(c[1])),
            format!("   cz = {}*{} - {}*{} = {}", a[0], b[1], a[1], b[0], n(c[2])),
            "**4. Result:**".to_string(),
            format!("   {product}"),
        ];

        Ok(CalculationResult::text(format!("Cross Product = {product}")).with_steps(steps))
    }
}

/// Magnitude spectrum of a real signal
#[derive(Debug, Default)]
pub struct FourierCalculator;

const FOURIER_FIELDS: &[FieldSpec] = &[FieldSpec::text("signalStr")];

impl CalculatorPlugin for FourierCalculator {
    fn name(&self) -> &str {
        "fourier"
    }

    fn title(&self) -> &str {
        "Fourier Transform Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        FOURIER_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let signal = inputs.get_number_list("signalStr")?;
        let spectrum = fourier::magnitudes(&signal);
        let n = signal.len();
        let rendered = spectrum.iter().map(|m| fixed(*m, 2)).collect::<Vec<_>>().join(", ");

        let steps = vec![
            format!("**1. Identify input signal (N={n}):**"),
            format!("   x[n] = [{}]", signal.iter().map(|v| number(*v)).collect::<Vec<_>>().join(", ")),
            "**2. Discrete Fourier Transform (DFT):**".to_string(),
            "   X[k] = Σ x[n] * e^(-i*2π*k*n/N)".to_string(),
            "**3. Compute Magnitudes |X[k]|:**".to_string(),
            format!("   Iterated over k=0 to {}", n - 1),
            "**4. Resulting spectrum:**".to_string(),
            format!("   [{rendered}]"),
        ];

        let plot = PlotSpec::new(PlotType::Bar)
            .labels((0..n).map(|k| k.to_string()))
            .dataset(Dataset::new("Magnitude").values(spectrum).style("backgroundColor", "purple"));

        Ok(CalculationResult::text(format!("DFT Magnitudes: {rendered}"))
            .with_steps(steps)
            .with_plot(plot))
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

    fn matrix(prefix: &str, values: [i32; 4]) -> Vec<(String, FieldValue)> {
        ["00", "01", "10", "11"]
            .iter()
            .zip(values)
            .map(|(cell, v)| (format!("{prefix}{cell}"), FieldValue::from(v)))
            .collect()
    }

    fn run_owned<P: CalculatorPlugin>(plugin: P, pairs: Vec<(String, FieldValue)>) -> CalculationResult {
        let map: FieldMap = pairs.into_iter().collect();
        plugin.calculate(&CalculatorInputs::new(&map)).unwrap()
    }

    #[test]
    fn multiplies_two_by_two() {
        let mut fields = matrix("m1_", [1, 2, 3, 4]);
        fields.extend(matrix("m2_", [5, 6, 7, 8]));
        let r = run_owned(MatrixMultiplyCalculator, fields);
        assert_eq!(r.text, "Result Matrix:\n[ 19, 22 ]\n[ 43, 50 ]");
    }

    #[test]
    fn determinant() {
        let r = run_owned(MatrixDeterminantCalculator, matrix("m_", [3, 8, 4, 6]));
        assert_eq!(r.text, "Determinant = -14");
    }

    #[test]
    fn real_and_complex_eigenvalues() {
        let r = run_owned(EigenvaluesCalculator, matrix("m_", [2, 0, 0, 3]));
        assert_eq!(r.text, "Eigenvalues:\nλ₁ = 3.0000\nλ₂ = 2.0000");

        let r = run_owned(EigenvaluesCalculator, matrix("m_", [0, -1, 1, 0]));
        assert_eq!(r.text, "Complex Eigenvalues:\n0.0000 ± 1.0000i");
    }

    #[test]
    fn cross_product_of_unit_vectors() {
        let r = run(
            VectorCrossCalculator,
            &[
                ("v1x", 1.into()),
                ("v1y", 0.into()),
                ("v1z", 0.into()),
                ("v2x", 0.into()),
                ("v2y", 1.into()),
                ("v2z", 0.into()),
            ],
        )
        .unwrap();
        assert_eq!(r.text, "Cross Product = [0, 0, 1]");
    }

    #[test]
    fn fourier_of_constant_signal() {
        let r = run(FourierCalculator, &[("signalStr", "1, 1, 1, 1".into())]).unwrap();
        assert_eq!(r.text, "DFT Magnitudes: 4.00, 0.00, 0.00, 0.00");
        let plot = r.plot_data.unwrap();
        assert_eq!(plot.labels.unwrap(), vec!["0", "1", "2", "3"]);
    }
}
