//! Typed access to a calculator's field map.

use crate::error::{CalcError, CalcResult};
use crate::stats;
use mathkit_types::{FieldMap, FieldValue};

/// Type-safe wrapper for calculator inputs
///
/// Blank values (`Null`, empty strings) are treated as absent everywhere.
#[derive(Debug, Clone, Copy)]
pub struct CalculatorInputs<'a> {
    fields: &'a FieldMap,
}

impl<'a> CalculatorInputs<'a> {
    pub fn new(fields: &'a FieldMap) -> Self {
        Self { fields }
    }

    fn raw(&self, field: &str) -> Option<&'a FieldValue> {
        self.fields.get(field).filter(|v| !v.is_blank())
    }

    /// True when the field carries a non-blank value
    pub fn has(&self, field: &str) -> bool {
        self.raw(field).is_some()
    }

    pub fn get_float(&self, field: &str) -> CalcResult<f64> {
        self.get_optional_float(field)?.ok_or_else(|| CalcError::missing(field))
    }

    pub fn get_optional_float(&self, field: &str) -> CalcResult<Option<f64>> {
        match self.raw(field) {
            None => Ok(None),
            Some(value) => match value.as_f64() {
                Some(f) if f.is_finite() => Ok(Some(f)),
                _ => Err(CalcError::invalid(field, format!("expected a number, got '{value}'"))),
            },
        }
    }

    pub fn get_float_or(&self, field: &str, default: f64) -> CalcResult<f64> {
        Ok(self.get_optional_float(field)?.unwrap_or(default))
    }

    /// Whole-number field; fractional values are rejected
    pub fn get_integer(&self, field: &str) -> CalcResult<i64> {
        let value = self.get_float(field)?;
        if value.fract() != 0.0 {
            return Err(CalcError::invalid(field, format!("expected a whole number, got {value}")));
        }
        Ok(value as i64)
    }

    /// Numeric field scaled by its `<field>_unit` multiplier (default 1)
    pub fn get_unit_float(&self, field: &str) -> CalcResult<f64> {
        let value = self.get_float(field)?;
        Ok(value * self.unit_multiplier(field)?)
    }

    pub fn get_optional_unit_float(&self, field: &str) -> CalcResult<Option<f64>> {
        match self.get_optional_float(field)? {
            Some(value) => Ok(Some(value * self.unit_multiplier(field)?)),
            None => Ok(None),
        }
    }

    fn unit_multiplier(&self, field: &str) -> CalcResult<f64> {
        self.get_float_or(&format!("{field}_unit"), 1.0)
    }

    pub fn get_string(&self, field: &str) -> CalcResult<String> {
        self.raw(field)
            .and_then(FieldValue::as_text)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| CalcError::missing(field))
    }

    pub fn get_string_or(&self, field: &str, default: &str) -> String {
        self.get_string(field).unwrap_or_else(|_| default.to_string())
    }

    /// Comma/whitespace separated list of numbers
    pub fn get_number_list(&self, field: &str) -> CalcResult<Vec<f64>> {
        let text = self.raw(field).and_then(FieldValue::as_text).unwrap_or_default();
        stats::parse_number_list(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, FieldValue)]) -> FieldMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn numeric_strings_are_read_as_floats() {
        let map = fields(&[("a", FieldValue::from("2.5")), ("b", FieldValue::from(3))]);
        let inputs = CalculatorInputs::new(&map);
        assert_eq!(inputs.get_float("a").unwrap(), 2.5);
        assert_eq!(inputs.get_float("b").unwrap(), 3.0);
    }

    #[test]
    fn blank_fields_are_missing() {
        let map = fields(&[("a", FieldValue::from("")), ("b", FieldValue::Null)]);
        let inputs = CalculatorInputs::new(&map);
        assert_eq!(inputs.get_float("a"), Err(CalcError::missing("a")));
        assert_eq!(inputs.get_optional_float("b").unwrap(), None);
        assert!(!inputs.has("a"));
        assert_eq!(inputs.get_float_or("c", 7.0).unwrap(), 7.0);
    }

    #[test]
    fn non_numeric_text_is_invalid() {
        let map = fields(&[("a", FieldValue::from("ten"))]);
        let inputs = CalculatorInputs::new(&map);
        assert_eq!(inputs.get_float("a").unwrap_err().category(), "invalid_field");
    }

    #[test]
    fn unit_multiplier_is_applied() {
        let map = fields(&[
            ("mass", FieldValue::from(500)),
            ("mass_unit", FieldValue::from("0.001")),
            ("time", FieldValue::from(2)),
        ]);
        let inputs = CalculatorInputs::new(&map);
        assert_eq!(inputs.get_unit_float("mass").unwrap(), 0.5);
        assert_eq!(inputs.get_unit_float("time").unwrap(), 2.0);
    }

    #[test]
    fn integer_fields_reject_fractions() {
        let map = fields(&[("n", FieldValue::from(4.5)), ("k", FieldValue::from("3"))]);
        let inputs = CalculatorInputs::new(&map);
        assert!(inputs.get_integer("n").is_err());
        assert_eq!(inputs.get_integer("k").unwrap(), 3);
    }

    #[test]
    fn number_lists_are_parsed() {
        let map = fields(&[("dataStr", FieldValue::from("1, 2,3\n4"))]);
        let inputs = CalculatorInputs::new(&map);
        assert_eq!(inputs.get_number_list("dataStr").unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(inputs.get_number_list("missing").is_err());
    }
}
