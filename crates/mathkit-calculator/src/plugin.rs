use crate::error::{CalcError, CalcResult};
use crate::inputs::CalculatorInputs;
use mathkit_types::{CalculationResult, FieldMap};

/// A trait for calculator plugins.
///
/// Plugins are stateless; the registry validates every `required_fields`
/// entry before `calculate` runs.
pub trait CalculatorPlugin: Send + Sync {
    /// Stable snake_case identifier.
    fn name(&self) -> &str;

    /// Display name shown by front ends; also accepted as an identifier.
    fn title(&self) -> &str;

    /// Fields checked by the registry before dispatch.
    fn required_fields(&self) -> &[FieldSpec] {
        &[]
    }

    /// Performs the calculation.
    fn calculate(&self, inputs: &CalculatorInputs) -> CalcResult<CalculationResult>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    Text,
}

/// Numeric range enforced at the registry boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRange {
    Positive,
    NonNegative,
    Closed { min: f64, max: f64 },
}

impl FieldRange {
    fn check(&self, value: f64) -> Result<(), String> {
        match *self {
            FieldRange::Positive if value <= 0.0 => Err("must be a positive number".to_string()),
            FieldRange::NonNegative if value < 0.0 => Err("cannot be negative".to_string()),
            FieldRange::Closed { min, max } if !(min..=max).contains(&value) => {
                Err(format!("must be between {min} and {max}"))
            }
            _ => Ok(()),
        }
    }
}

/// Declared input of a calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub range: Option<FieldRange>,
}

impl FieldSpec {
    pub const fn number(name: &'static str) -> Self {
        Self { name, field_type: FieldType::Number, required: true, range: None }
    }

    pub const fn text(name: &'static str) -> Self {
        Self { name, field_type: FieldType::Text, required: true, range: None }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn range(mut self, range: FieldRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Checks presence, numeric parseability and range of this field.
    pub fn validate(&self, fields: &FieldMap) -> CalcResult<()> {
        let value = match fields.get(self.name).filter(|v| !v.is_blank()) {
            Some(value) => value,
            None if self.required => return Err(CalcError::missing(self.name)),
            None => return Ok(()),
        };

        if self.field_type == FieldType::Text {
            return Ok(());
        }

        let number = value
            .as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| CalcError::invalid(self.name, format!("expected a number, got '{value}'")))?;

        match self.range {
            Some(range) => range.check(number).map_err(|reason| CalcError::invalid(self.name, reason)),
            None => Ok(()),
        }
    }
}
