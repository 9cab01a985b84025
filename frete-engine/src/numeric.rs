//! Locale-tolerant numeric parsing for operator-entered values.
//!
//! Operators type amounts the Brazilian way ("1234,56"). The UI layer's
//! policy is to degrade to zero rather than block the calculation, but the
//! zero fallback is an explicit wrapper here so tests and callers can tell
//! "really zero" apart from "failed to parse".

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseNumberError {
    #[error("empty value")]
    Empty,

    #[error("not a number: '{0}'")]
    Invalid(String),
}

/// Parse a freight-form number, accepting a comma as the decimal separator.
pub fn parse_locale_number(raw: &str) -> Result<f64, ParseNumberError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ParseNumberError::Invalid(trimmed.to_string()))
}

/// Tolerant-parsing policy: any unparsable or empty field computes as 0.0.
/// This mirrors how the quoting form behaves while the operator is typing.
pub fn parse_or_zero(raw: &str) -> f64 {
    parse_locale_number(raw).unwrap_or(0.0)
}
