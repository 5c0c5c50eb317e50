//! Interest and loan calculators.

use crate::error::CalcResult;
use crate::format::fixed;
use crate::inputs::CalculatorInputs;
use crate::plugin::{CalculatorPlugin, FieldRange, FieldSpec};
use mathkit_types::{CalculationResult, Dataset, PlotSpec, PlotType};

fn dollars(value: f64) -> String {
    format!("${}", fixed(value, 2))
}

/// Fixed-rate amortized loan
#[derive(Debug, Clone, Copy, PartialEq)]
struct Loan {
    principal: f64,
    monthly_rate: f64,
    months: f64,
    monthly: f64,
}

impl Loan {
    /// `M = P·i(1+i)^n / ((1+i)^n - 1)`; a zero rate spreads the principal evenly
    fn amortize(principal: f64, annual_rate_percent: f64, years: f64) -> Self {
        let monthly_rate = annual_rate_percent / 100.0 / 12.0;
        let months = years * 12.0;
        let monthly = if monthly_rate == 0.0 {
            principal / months
        } else {
            let growth = (1.0 + monthly_rate).powf(months);
            principal * monthly_rate * growth / (growth - 1.0)
        };
        Self { principal, monthly_rate, months, monthly }
    }

    fn total(&self) -> f64 {
        self.monthly * self.months
    }

    fn interest(&self) -> f64 {
        self.total() - self.principal
    }
}

#[derive(Debug, Default)]
pub struct SimpleInterestCalculator;

const SIMPLE_INTEREST_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("principal"),
    FieldSpec::number("rate"),
    FieldSpec::number("time").range(FieldRange::NonNegative),
];

impl CalculatorPlugin for SimpleInterestCalculator {
    fn name(&self) -> &str {
        "simple_interest"
    }

    fn title(&self) -> &str {
        "Simple Interest Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        SIMPLE_INTEREST_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let p = inputs.get_float("principal")?;
        let r = inputs.get_float("rate")?;
        let t = inputs.get_float("time")?;
        let interest = p * r * t / 100.0;
        let amount = p + interest;

        let plot = PlotSpec::new(PlotType::Bar).labels(["Principal", "Interest", "Total"]).dataset(
            Dataset::new("Amount ($)")
                .values([p, interest, amount])
                .style("backgroundColor", vec!["#60a5fa", "#34d399", "#f472b6"]),
        );

        Ok(CalculationResult::text(format!(
            "Simple Interest (SI) = (P × R × T) / 100 = {}\nTotal Amount (A) = P + SI = {}",
            dollars(interest),
            dollars(amount)
        ))
        .with_plot(plot))
    }
}

#[derive(Debug, Default)]
pub struct MortgageCalculator;

const MORTGAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("principal"),
    FieldSpec::number("rate").range(FieldRange::NonNegative),
    FieldSpec::number("years").range(FieldRange::Positive),
];

impl CalculatorPlugin for MortgageCalculator {
    fn name(&self) -> &str {
        "mortgage"
    }

    fn title(&self) -> &str {
        "Mortgage Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        MORTGAGE_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let loan = Loan::amortize(
            inputs.get_float("principal")?,
            inputs.get_float("rate")?,
            inputs.get_float("years")?,
        );

        if loan.monthly_rate == 0.0 {
            return Ok(CalculationResult::text(format!("Monthly Payment: {}", dollars(loan.monthly))));
        }

        let steps = vec![
            "**1. Convert to monthly terms:**".to_string(),
            format!("   i = {} (monthly rate)", fixed(loan.monthly_rate, 6)),
            format!("   n = {} payments", loan.months),
            "**2. Apply Formula:**".to_string(),
            "   M = P [ i(1 + i)^n ] / [ (1 + i)^n - 1 ]".to_string(),
            format!("   M = {}", dollars(loan.monthly)),
            "**3. Totals:**".to_string(),
            format!("   Total paid = M × n = {}", dollars(loan.total())),
            format!("   Interest = Total paid - P = {}", dollars(loan.interest())),
        ];

        let plot = PlotSpec::new(PlotType::Doughnut).labels(["Principal", "Interest"]).dataset(
            Dataset::new("Cost Breakdown")
                .values([loan.principal, loan.interest()])
                .style("backgroundColor", vec!["#818cf8", "#f43f5e"]),
        );

        Ok(CalculationResult::text(format!(
            "Monthly Payment: {}\nTotal Interest Paid: {}\nTotal Cost: {}",
            dollars(loan.monthly),
            dollars(loan.interest()),
            dollars(loan.total())
        ))
        .with_steps(steps)
        .with_plot(plot))
    }
}

/// Side-by-side monthly payment and interest of two loans
#[derive(Debug, Default)]
pub struct LoanComparisonCalculator;

const LOAN_COMPARISON_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("principalA"),
    FieldSpec::number("rateA").range(FieldRange::NonNegative),
    FieldSpec::number("yearsA").range(FieldRange::Positive),
    FieldSpec::number("principalB"),
    FieldSpec::number("rateB").range(FieldRange::NonNegative),
    FieldSpec::number("yearsB").range(FieldRange::Positive),
];

impl CalculatorPlugin for LoanComparisonCalculator {
    fn name(&self) -> &str {
        "loan_comparison"
    }

    fn title(&self) -> &str {
        "Loan Comparison Calculator"
    }

    fn required_fields(&self) -> &[FieldSpec] {
        LOAN_COMPARISON_FIELDS
    }

    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
        let read = |suffix: &str| -> CalcResult<Loan> {
            Ok(Loan::amortize(
                inputs.get_float(&format!("principal{suffix}"))?,
                inputs.get_float(&format!("rate{suffix}"))?,
                inputs.get_float(&format!("years{suffix}"))?,
            ))
        };
        let a = read("A")?;
        let b = read("B")?;

        let plot = PlotSpec::new(PlotType::Bar)
            .labels(["Monthly Payment", "Total Interest"])
            .dataset(Dataset::new("Loan A").values([a.monthly, a.interest()]).style("backgroundColor", "#60a5fa"))
            .dataset(Dataset::new("Loan B").values([b.monthly, b.interest()]).style("backgroundColor", "#f472b6"));

        Ok(CalculationResult::text(format!(
            "Loan A:\n  Monthly: {}\n  Total Interest: {}\n\nLoan B:\n  Monthly: {}\n  Total Interest: {}",
            dollars(a.monthly),
            dollars(a.interest()),
            dollars(b.monthly),
            dollars(b.interest())
        ))
        .with_plot(plot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mathkit_types::{FieldMap, FieldValue};

    fn run<P: CalculatorPlugin>(plugin: P, pairs: &[(&str, FieldValue)]) -> CalcResult<CalculationResult> {
        let map: FieldMap = pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        plugin.calculate(&CalculatorInputs::new(&map))
    }

    #[test]
    fn simple_interest() {
        let r = run(
            SimpleInterestCalculator,
            &[("principal", 1000.into()), ("rate", 5.into()), ("time", 2.into())],
        )
        .unwrap();
        assert_eq!(r.text, "Simple Interest (SI) = (P × R × T) / 100 = $100.00\nTotal Amount (A) = P + SI = $1100.00");
    }

    #[test]
    fn amortized_payment() {
        let loan = Loan::amortize(200_000.0, 6.0, 30.0);
        assert_relative_eq!(loan.monthly, 1199.10, epsilon = 0.01);
        assert_relative_eq!(loan.total(), loan.monthly * 360.0);
    }

    #[test]
    fn mortgage_text() {
        let r = run(
            MortgageCalculator,
            &[("principal", 200_000.into()), ("rate", 6.into()), ("years", 30.into())],
        )
        .unwrap();
        assert!(r.text.starts_with("Monthly Payment: $1199.10\n"), "{}", r.text);
        assert!(r.plot_data.is_some());
    }

    #[test]
    fn zero_rate_mortgage_splits_principal() {
        let r = run(
            MortgageCalculator,
            &[("principal", 12_000.into()), ("rate", 0.into()), ("years", 1.into())],
        )
        .unwrap();
        assert_eq!(r.text, "Monthly Payment: $1000.00");
    }

    #[test]
    fn compares_two_loans() {
        let r = run(
            LoanComparisonCalculator,
            &[
                ("principalA", 12_000.into()),
                ("rateA", 0.into()),
                ("yearsA", 1.into()),
                ("principalB", 200_000.into()),
                ("rateB", 6.into()),
                ("yearsB", 30.into()),
            ],
        )
        .unwrap();
        assert!(r.text.starts_with("Loan A:\n  Monthly: $1000.00\n  Total Interest: $0.00\n\nLoan B:\n  Monthly: $1199.10"));
        assert_eq!(r.plot_data.unwrap().datasets.len(), 2);
    }
}
