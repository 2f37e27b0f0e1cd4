//! Range checks for the two user-supplied quote parameters
//!
//! Precedence: a missing or zero value wins over an out-of-range amount,
//! which wins over an out-of-range duration. Only one message is reported.
//! A non-finite principal or rate counts as missing.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::calculator::LoanQuoteInput;

/// Smallest principal that can be quoted (XOF)
pub const MIN_PRINCIPAL: f64 = 10_000.0;

/// Largest principal that can be quoted (XOF)
pub const MAX_PRINCIPAL: f64 = 50_000_000.0;

/// Shortest loan duration in months
pub const MIN_DURATION_MONTHS: u32 = 3;

/// Longest loan duration in months
pub const MAX_DURATION_MONTHS: u32 = 300;

/// Which bound a quote input violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeViolation {
    /// Amount or duration missing or zero
    Missing,
    /// Amount outside [MIN_PRINCIPAL, MAX_PRINCIPAL]
    Amount,
    /// Duration outside [MIN_DURATION_MONTHS, MAX_DURATION_MONTHS]
    Duration,
}

impl RangeViolation {
    /// User-facing message shown next to the simulator
    pub fn message(&self) -> &'static str {
        match self {
            RangeViolation::Missing => "Le montant et la durée doivent être supérieurs à 0.",
            RangeViolation::Amount => "Le montant doit être entre 10,000 et 50,000,000 XOF.",
            RangeViolation::Duration => "La durée doit être entre 3 et 300 mois.",
        }
    }
}

/// The single error kind of the calculator.
///
/// Returned as a value, never raised: interactive typing produces invalid
/// input all the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutOfRange {
    pub violation: RangeViolation,
}

impl OutOfRange {
    pub fn new(violation: RangeViolation) -> Self {
        Self { violation }
    }

    pub fn message(&self) -> &'static str {
        self.violation.message()
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for OutOfRange {}

/// Classify a quote input, checking bounds in precedence order
pub fn validate(input: &LoanQuoteInput) -> Result<(), OutOfRange> {
    let principal = input.principal;
    let months = input.duration_months;

    if !principal.is_finite() || !input.annual_rate.is_finite() || principal == 0.0 || months == 0 {
        return Err(OutOfRange::new(RangeViolation::Missing));
    }

    if !(MIN_PRINCIPAL..=MAX_PRINCIPAL).contains(&principal) {
        return Err(OutOfRange::new(RangeViolation::Amount));
    }

    if !(MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS).contains(&months) {
        return Err(OutOfRange::new(RangeViolation::Duration));
    }

    Ok(())
}

/// Parse an amount typed into a form field.
///
/// Empty or non-numeric text reads as 0, i.e. missing.
pub fn parse_amount(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Parse a duration typed into a form field.
///
/// Empty or non-numeric text reads as 0 (missing). Negative or fractional
/// month counts cannot be quoted and map to a value above the duration bound.
pub fn parse_months(text: &str) -> u32 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => months_from_number(v),
        _ => 0,
    }
}

/// Convert a numeric month count to `u32`, see [`parse_months`]
pub fn months_from_number(value: f64) -> u32 {
    if !value.is_finite() || value == 0.0 {
        0
    } else if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        u32::MAX
    } else {
        value as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(principal: f64, months: u32) -> LoanQuoteInput {
        LoanQuoteInput::new(principal, months, 0.03)
    }

    #[test]
    fn test_missing_takes_precedence() {
        // Zero duration with an out-of-range amount still reports "missing"
        let err = validate(&input(5.0, 0)).unwrap_err();
        assert_eq!(err.violation, RangeViolation::Missing);

        let err = validate(&input(0.0, 500)).unwrap_err();
        assert_eq!(err.violation, RangeViolation::Missing);
    }

    #[test]
    fn test_amount_before_duration() {
        let err = validate(&input(9_999.0, 301)).unwrap_err();
        assert_eq!(err.violation, RangeViolation::Amount);
        assert_eq!(err.to_string(), "Le montant doit être entre 10,000 et 50,000,000 XOF.");
    }

    #[test]
    fn test_bounds_inclusive() {
        assert!(validate(&input(10_000.0, 3)).is_ok());
        assert!(validate(&input(50_000_000.0, 300)).is_ok());
        assert_eq!(
            validate(&input(50_000_001.0, 12)).unwrap_err().violation,
            RangeViolation::Amount
        );
        assert_eq!(
            validate(&input(100_000.0, 2)).unwrap_err().violation,
            RangeViolation::Duration
        );
    }

    #[test]
    fn test_negative_amount_is_range_error() {
        let err = validate(&input(-20_000.0, 12)).unwrap_err();
        assert_eq!(err.violation, RangeViolation::Amount);
    }

    #[test]
    fn test_nan_amount_is_missing() {
        let err = validate(&input(f64::NAN, 12)).unwrap_err();
        assert_eq!(err.violation, RangeViolation::Missing);
    }

    #[test]
    fn test_non_finite_rate_is_missing() {
        let err = validate(&LoanQuoteInput::new(1_000_000.0, 84, f64::NAN)).unwrap_err();
        assert_eq!(err.violation, RangeViolation::Missing);

        // Still ahead of range checks
        let err = validate(&LoanQuoteInput::new(5.0, 400, f64::INFINITY)).unwrap_err();
        assert_eq!(err.violation, RangeViolation::Missing);
    }

    #[test]
    fn test_parse_form_text() {
        assert_eq!(parse_amount(" 250000 "), 250_000.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);

        assert_eq!(parse_months("84"), 84);
        assert_eq!(parse_months(""), 0);
        assert_eq!(parse_months("12.5"), u32::MAX);
        assert_eq!(parse_months("-6"), u32::MAX);
    }
}
