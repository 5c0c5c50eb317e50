use crate::built_in::{
    algebra::{
        ComplexNumbersCalculator, LinearEquationCalculator, LinearSystemCalculator, PolynomialRootsCalculator,
        QuadraticCalculator,
    },
    basic::{ArithmeticCalculator, PercentageCalculator, UnitConverterCalculator},
    calculus::{DerivativeCalculator, IntegralCalculator, LaplaceCalculator, LimitCalculator, OdeEulerCalculator},
    finance::{LoanComparisonCalculator, MortgageCalculator, SimpleInterestCalculator},
    geometry::{
        AreaPerimeterCalculator, CircleCalculator, DistanceCalculator, TriangleSolverCalculator,
        TrigBasicsCalculator, TrigEquationCalculator,
    },
    matrix::{
        EigenvaluesCalculator, FourierCalculator, MatrixDeterminantCalculator, MatrixMultiplyCalculator,
        VectorCrossCalculator,
    },
    physics::{FORMULAS, KinematicsCalculator, OhmsLawCalculator, ProjectileMotionCalculator},
    statistics::{
        BinomialCalculator, LinearRegressionCalculator, NormalDistributionCalculator, StatisticsCalculator,
    },
};
use crate::error::{CalcError, CalcResult};
use crate::inputs::CalculatorInputs;
use crate::plugin::CalculatorPlugin;
use crate::plugin_manager::PluginManager;
use mathkit_types::{CalculationResult, FieldMap};
use tracing::{debug, instrument, warn};

/// Text returned for identifiers with no registered calculator
pub const NOT_IMPLEMENTED: &str = "Calculator logic not yet implemented.";

/// Text substituted when a solver produced a non-finite number
pub const UNDEFINED_RESULT: &str = "Error: The result is undefined for these inputs.";

/// The dispatch table: calculator identifier to solver
pub struct Calculator {
    plugin_manager: PluginManager,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        let mut plugin_manager = PluginManager::new();

        plugin_manager.register(Box::new(ArithmeticCalculator));
        plugin_manager.register(Box::new(PercentageCalculator));
        plugin_manager.register(Box::new(UnitConverterCalculator));

        plugin_manager.register(Box::new(QuadraticCalculator));
        plugin_manager.register(Box::new(LinearEquationCalculator));
        plugin_manager.register(Box::new(PolynomialRootsCalculator));
        plugin_manager.register(Box::new(LinearSystemCalculator));
        plugin_manager.register(Box::new(ComplexNumbersCalculator));

        plugin_manager.register(Box::new(DerivativeCalculator));
        plugin_manager.register(Box::new(IntegralCalculator));
        plugin_manager.register(Box::new(LimitCalculator));
        plugin_manager.register(Box::new(OdeEulerCalculator));
        plugin_manager.register(Box::new(LaplaceCalculator));

        plugin_manager.register(Box::new(AreaPerimeterCalculator));
        plugin_manager.register(Box::new(CircleCalculator));
        plugin_manager.register(Box::new(TriangleSolverCalculator));
        plugin_manager.register(Box::new(DistanceCalculator));
        plugin_manager.register(Box::new(TrigBasicsCalculator));
        plugin_manager.register(Box::new(TrigEquationCalculator));

        plugin_manager.register(Box::new(MatrixMultiplyCalculator));
        plugin_manager.register(Box::new(MatrixDeterminantCalculator));
        plugin_manager.register(Box::new(EigenvaluesCalculator));
        plugin_manager.register(Box::new(VectorCrossCalculator));
        plugin_manager.register(Box::new(FourierCalculator));

        plugin_manager.register(Box::new(StatisticsCalculator));
        plugin_manager.register(Box::new(BinomialCalculator));
        plugin_manager.register(Box::new(NormalDistributionCalculator));
        plugin_manager.register(Box::new(LinearRegressionCalculator));

        plugin_manager.register(Box::new(SimpleInterestCalculator));
        plugin_manager.register(Box::new(MortgageCalculator));
        plugin_manager.register(Box::new(LoanComparisonCalculator));

        plugin_manager.register(Box::new(ProjectileMotionCalculator));
        plugin_manager.register(Box::new(OhmsLawCalculator));
        plugin_manager.register(Box::new(KinematicsCalculator));
        for formula in FORMULAS {
            plugin_manager.register(Box::new(*formula));
        }

        Self { plugin_manager }
    }

    /// Run the calculator registered under `calculator_id` (name or display title)
    ///
    /// Never fails: errors are rendered into the result text.
    #[instrument(skip(self, fields))]
    pub fn solve(&self, calculator_id: &str, fields: &FieldMap) -> CalculationResult {
        let Some(plugin) = self.plugin_manager.get(calculator_id) else {
            warn!(calculator_id, "no calculator registered");
            return CalculationResult::text(NOT_IMPLEMENTED);
        };

        match run(plugin, fields) {
            Ok(result) if result.text.trim().is_empty() => {
                warn!(calculator = plugin.name(), "calculator returned an empty result");
                CalculationResult::text(UNDEFINED_RESULT)
            }
            Ok(result) if mentions_non_finite(&result.text) => {
                warn!(calculator = plugin.name(), text = %result.text, "non-finite value in result text");
                CalculationResult::text(UNDEFINED_RESULT)
            }
            Ok(mut result) => {
                if result.steps.iter().flatten().any(|step| mentions_non_finite(step)) {
                    warn!(calculator = plugin.name(), "non-finite value in steps, dropping them");
                    result.steps = None;
                }
                result
            }
            Err(error) => {
                debug!(calculator = plugin.name(), category = error.category(), %error, "calculation failed");
                error.into()
            }
        }
    }

    /// `(name, title)` of every registered calculator, sorted by name
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.plugin_manager.list()
    }

    pub fn plugin(&self, calculator_id: &str) -> Option<&dyn CalculatorPlugin> {
        self.plugin_manager.get(calculator_id)
    }
}

fn run(plugin: &dyn CalculatorPlugin, fields: &FieldMap) -> CalcResult<CalculationResult> {
    for spec in plugin.required_fields() {
        spec.validate(fields)?;
    }
    plugin.calculate(&CalculatorInputs::new(fields))
}

/// True when `text` carries a rendered `NaN` or infinity as a standalone token
fn mentions_non_finite(text: &str) -> bool {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '.'))
        .map(|token| token.trim_matches('.'))
        .any(|token| matches!(token, "NaN" | "inf" | "Infinity"))
}

impl From<CalcError> for CalculationResult {
    fn from(error: CalcError) -> Self {
        CalculationResult::text(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_rendered_non_finite_values() {
        assert!(mentions_non_finite("x = NaN"));
        assert!(mentions_non_finite("Result: inf"));
        assert!(mentions_non_finite("Result: -inf m/s"));
        assert!(!mentions_non_finite("Insufficient information"));
        assert!(!mentions_non_finite("Limit = ∞"));
        assert!(!mentions_non_finite("y = 2.0000x + 1.5000"));
    }

    struct Overflowing;

    impl CalculatorPlugin for Overflowing {
        fn name(&self) -> &str {
            "overflowing"
        }

        fn title(&self) -> &str {
            "Overflowing Calculator"
        }

        fn calculate(&self, _inputs: &CalculatorInputs) -> CalcResult<CalculationResult> {
            Ok(CalculationResult::text("P = 0.5")
                .with_steps(vec!["**1. Terms:**".to_string(), format!("   C = {}", f64::INFINITY)]))
        }
    }

    #[test]
    fn steps_with_non_finite_values_are_dropped() {
        let mut plugin_manager = PluginManager::new();
        plugin_manager.register(Box::new(Overflowing));
        let calculator = Calculator { plugin_manager };

        let result = calculator.solve("overflowing", &FieldMap::new());
        assert_eq!(result.text, "P = 0.5");
        assert!(result.steps.is_none());
    }

    #[test]
    fn every_calculator_is_reachable_by_title() {
        let calculator = Calculator::new();
        for (name, title) in calculator.list() {
            assert_eq!(calculator.plugin(title).map(|p| p.name()), Some(name), "{title}");
        }
    }
}
