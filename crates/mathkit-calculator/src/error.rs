//! Error handling for the calculation engine
//!
//! Every failure inside the engine is a `CalcError`. Errors never cross the
//! dispatch boundary as `Err`: the registry renders them into the `text` of a
//! `CalculationResult`, so the `Display` output of each variant is the exact
//! message a user sees.

use thiserror::Error;

/// Error type for parsing, numerical and solver failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Unparseable or disallowed expression text; the detail is kept for logs only
    #[error("Invalid function.")]
    Parse { message: String, expression: String },

    /// Mathematically invalid input (division by zero, singular system, ...)
    #[error("{message}")]
    Domain { message: String },

    /// Input outside the range a solver can handle
    #[error("{message}")]
    Range { message: String },

    /// Feature the engine deliberately does not provide
    #[error("{message}")]
    Unsupported { message: String },

    /// A required input field was not supplied
    #[error("Error: Please provide a value for '{field}'.")]
    MissingField { field: String },

    /// A field was supplied but could not be interpreted
    #[error("Error: Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

impl CalcError {
    /// Stable category label for logging
    pub fn category(&self) -> &'static str {
        match self {
            CalcError::Parse { .. } => "parse",
            CalcError::Domain { .. } => "domain",
            CalcError::Range { .. } => "range",
            CalcError::Unsupported { .. } => "unsupported",
            CalcError::MissingField { .. } => "missing_field",
            CalcError::InvalidField { .. } => "invalid_field",
        }
    }

    /// True when the error stems from user input rather than an engine limit
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::Parse { .. } | CalcError::MissingField { .. } | CalcError::InvalidField { .. }
        )
    }

    pub fn parse(expression: &str, message: impl Into<String>) -> Self {
        CalcError::Parse { message: message.into(), expression: expression.to_string() }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        CalcError::Domain { message: message.into() }
    }

    pub fn range(message: impl Into<String>) -> Self {
        CalcError::Range { message: message.into() }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        CalcError::Unsupported { message: message.into() }
    }

    pub fn missing(field: &str) -> Self {
        CalcError::MissingField { field: field.to_string() }
    }

    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidField { field: field.to_string(), reason: reason.into() }
    }
}

/// Result alias used across the engine
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_stable() {
        assert_eq!(CalcError::parse("x$", "bad char").category(), "parse");
        assert_eq!(CalcError::domain("d").category(), "domain");
        assert_eq!(CalcError::range("r").category(), "range");
        assert_eq!(CalcError::unsupported("u").category(), "unsupported");
        assert_eq!(CalcError::missing("a").category(), "missing_field");
        assert_eq!(CalcError::invalid("a", "nope").category(), "invalid_field");
    }

    #[test]
    fn parse_detail_is_not_displayed() {
        let err = CalcError::parse("foo(x)", "unknown function 'foo'");
        assert_eq!(err.to_string(), "Invalid function.");
    }

    #[test]
    fn domain_message_is_displayed_verbatim() {
        let err = CalcError::domain("Error: Division by zero is not allowed.");
        assert_eq!(err.to_string(), "Error: Division by zero is not allowed.");
        assert!(!err.is_input_error());
        assert!(CalcError::missing("a").is_input_error());
    }
}
