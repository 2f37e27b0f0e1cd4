//! Amortization calculator: monthly payment, range validation, and display
//!
//! Every screen that shows a monthly payment goes through [`quote`]; the
//! function is pure and cheap enough to call on each keystroke.

mod calculator;
mod format;
pub mod schedule;
mod validation;

pub use calculator::{
    annuity_payment, monthly_payment, quote, LoanQuoteInput, LoanQuoteResult, QuoteOutcome,
    INDICATIVE_ANNUAL_RATE,
};
pub use format::{format_amount, group_thousands, CURRENCY, NOT_APPLICABLE};
pub use schedule::{AmortizationSchedule, ScheduleRow, ScheduleSummary};
pub use validation::{
    months_from_number, parse_amount, parse_months, validate, OutOfRange, RangeViolation,
    MAX_DURATION_MONTHS, MAX_PRINCIPAL, MIN_DURATION_MONTHS, MIN_PRINCIPAL,
};

/// Quote straight from the two form fields at the given annual rate
pub fn quote_form(amount_text: &str, duration_text: &str, annual_rate: f64) -> QuoteOutcome {
    let input = LoanQuoteInput::new(parse_amount(amount_text), parse_months(duration_text), annual_rate);
    quote(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_form_empty_fields() {
        let outcome = quote_form("", "84", INDICATIVE_ANNUAL_RATE);
        assert_eq!(outcome.violation(), Some(RangeViolation::Missing));
    }

    #[test]
    fn test_quote_form_fractional_duration() {
        // Amount error still wins over the unquotable duration
        let outcome = quote_form("5000", "12.5", INDICATIVE_ANNUAL_RATE);
        assert_eq!(outcome.violation(), Some(RangeViolation::Amount));

        let outcome = quote_form("50000", "12.5", INDICATIVE_ANNUAL_RATE);
        assert_eq!(outcome.violation(), Some(RangeViolation::Duration));
    }

    #[test]
    fn test_quote_form_valid() {
        let outcome = quote_form("1000000", "84", INDICATIVE_ANNUAL_RATE);
        assert_eq!(outcome.monthly_payment(), Some(13_213));
    }
}
