//! The calculation engine behind the mathkit education calculators.
//!
//! A front end sends a calculator identifier and a map of raw form fields;
//! the engine answers with a [`CalculationResult`]: human-readable text,
//! optional worked steps and an optional chart description.
//!
//! The crate is layered bottom-up:
//! - [`expr`]: sanitizing parser and evaluator for user-typed formulas
//! - [`symbolic`]: rule-based symbolic differentiation with a step trail
//! - [`numeric`]: finite differences, quadrature, limits, ODEs, linear algebra, DFT
//! - [`stats`]: descriptive statistics, distributions, regression
//! - [`built_in`]: one plugin per calculator
//! - [`Calculator`]: the dispatch table that validates inputs and renders errors
//!
//! ```
//! use mathkit_calculator::solve;
//! use mathkit_types::{FieldMap, FieldValue};
//!
//! let fields: FieldMap = [("a", 1), ("b", -3), ("c", 2)]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), FieldValue::from(v)))
//!     .collect();
//! let result = solve("quadratic", &fields);
//! assert!(result.text.contains("Two real roots"));
//! ```

pub mod built_in;
pub mod calculator;
pub mod constants;
pub mod error;
pub mod expr;
pub mod format;
pub mod inputs;
pub mod numeric;
pub mod plugin;
pub mod plugin_manager;
pub mod stats;
pub mod symbolic;

use std::sync::LazyLock;

pub use calculator::Calculator;
pub use error::{CalcError, CalcResult};
pub use inputs::CalculatorInputs;
pub use mathkit_types::{CalculationResult, DataPoint, Dataset, FieldMap, FieldValue, PlotSpec, PlotType};
pub use plugin::{CalculatorPlugin, FieldRange, FieldSpec, FieldType};

static DEFAULT_CALCULATOR: LazyLock<Calculator> = LazyLock::new(Calculator::new);

/// Solve with the default registry of built-in calculators
pub fn solve(calculator_id: &str, fields: &FieldMap) -> CalculationResult {
    DEFAULT_CALCULATOR.solve(calculator_id, fields)
}
