use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;

/// Field name to raw value mapping handed to a calculator
pub type FieldMap = HashMap<String, FieldValue>;

/// Raw value of a single calculator input field
///
/// Form inputs arrive either as numbers or as free text. Numeric text is coerced
/// on read, so `"2.5"` and `2.5` are interchangeable for numeric fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    /// String value
    String(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Missing / cleared value
    Null,
}

// -------------------------------------------------------------------------------------------------
// Conversions between `FieldValue` and `serde_json::Value`.
// Front ends hand over JSON objects; nested arrays and objects have no meaning as a
// single form field and are rejected.
// -------------------------------------------------------------------------------------------------

impl From<FieldValue> for serde_json::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::String(s) => Self::String(s),
            FieldValue::Integer(i) => Self::Number(serde_json::Number::from(i)),
            FieldValue::Float(f) => serde_json::Number::from_f64(f).map_or(Self::Null, Self::Number),
            FieldValue::Boolean(b) => Self::Bool(b),
            FieldValue::Null => Self::Null,
        }
    }
}

impl TryFrom<&serde_json::Value> for FieldValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    return Err(anyhow!("Unsupported number value: {}", n));
                }
            }
            serde_json::Value::Bool(b) => Self::Boolean(*b),
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(anyhow!("Nested values are not valid field inputs: {}", value));
            }
        })
    }
}

impl FieldValue {
    /// Build a field map from a JSON object
    pub fn map_from_json(value: &serde_json::Value) -> Result<FieldMap> {
        let object = value
            .as_object()
            .ok_or_else(|| anyhow!("Expected a JSON object of fields, got {}", value))?;
        object
            .iter()
            .map(|(k, v)| Ok((k.clone(), Self::try_from(v)?)))
            .collect()
    }

    /// Numeric view of this value, parsing numeric text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::String(s) => s.trim().parse::<f64>().ok(),
            Self::Boolean(_) | Self::Null => None,
        }
    }

    /// Textual view of this value; numbers are rendered the way they were entered
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            Self::Null => None,
        }
    }

    /// True for `Null` and for strings that contain only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Type name used in validation messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(fl) => write!(f, "{fl}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_text_is_coerced() {
        assert_eq!(FieldValue::from(" 2.5 ").as_f64(), Some(2.5));
        assert_eq!(FieldValue::from(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::from("abc").as_f64(), None);
        assert_eq!(FieldValue::Null.as_f64(), None);
    }

    #[test]
    fn blank_detection() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from(0).is_blank());
    }

    #[test]
    fn json_object_becomes_field_map() {
        let map = FieldValue::map_from_json(&json!({"a": 1, "b": 2.5, "op": "+", "x": null}))
            .unwrap();
        assert_eq!(map["a"], FieldValue::Integer(1));
        assert_eq!(map["b"], FieldValue::Float(2.5));
        assert_eq!(map["op"], FieldValue::String("+".to_string()));
        assert_eq!(map["x"], FieldValue::Null);
    }

    #[test]
    fn nested_json_is_rejected() {
        assert!(FieldValue::try_from(&json!([1, 2])).is_err());
        assert!(FieldValue::map_from_json(&json!({"a": {"b": 1}})).is_err());
        assert!(FieldValue::map_from_json(&json!(5)).is_err());
    }

    #[test]
    fn untagged_deserialization() {
        let map: FieldMap = serde_json::from_str(r#"{"n": 4, "p": 0.5, "s": "1,2"}"#).unwrap();
        assert_eq!(map["n"], FieldValue::Integer(4));
        assert_eq!(map["p"], FieldValue::Float(0.5));
        assert_eq!(map["s"], FieldValue::String("1,2".to_string()));
    }
}
