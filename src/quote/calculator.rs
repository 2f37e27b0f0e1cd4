//! Fixed-rate monthly payment for a standard amortizing loan

use serde::{Deserialize, Serialize};
use std::fmt;

use super::format::{format_amount, NOT_APPLICABLE};
use super::validation::{validate, OutOfRange, RangeViolation};

/// Indicative annual rate shown by the simulator (3%)
pub const INDICATIVE_ANNUAL_RATE: f64 = 0.03;

/// Parameters of a single quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    /// Amount borrowed (XOF)
    pub principal: f64,

    /// Number of monthly payments
    pub duration_months: u32,

    /// Annual rate as a decimal fraction (0.03 for 3%)
    pub annual_rate: f64,
}

impl LoanQuoteInput {
    pub fn new(principal: f64, duration_months: u32, annual_rate: f64) -> Self {
        Self {
            principal,
            duration_months,
            annual_rate,
        }
    }

    /// Input at the indicative 3% rate
    pub fn indicative(principal: f64, duration_months: u32) -> Self {
        Self::new(principal, duration_months, INDICATIVE_ANNUAL_RATE)
    }

    /// Periodic rate applied each month
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }
}

/// A computed quote, rounded to the whole currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuoteResult {
    pub monthly_payment: i64,
}

impl LoanQuoteResult {
    /// Unformatted payment, as sent to the backend
    pub fn raw(&self) -> i64 {
        self.monthly_payment
    }
}

impl fmt::Display for LoanQuoteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.monthly_payment))
    }
}

/// Either a payment or the "not applicable" marker with its reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOutcome {
    Quoted(LoanQuoteResult),
    NotApplicable(OutOfRange),
}

impl QuoteOutcome {
    pub fn is_applicable(&self) -> bool {
        matches!(self, QuoteOutcome::Quoted(_))
    }

    /// Raw monthly payment, `None` when not applicable
    pub fn monthly_payment(&self) -> Option<i64> {
        match self {
            QuoteOutcome::Quoted(result) => Some(result.raw()),
            QuoteOutcome::NotApplicable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&OutOfRange> {
        match self {
            QuoteOutcome::Quoted(_) => None,
            QuoteOutcome::NotApplicable(err) => Some(err),
        }
    }

    /// Validation message to surface, if any
    pub fn message(&self) -> Option<&'static str> {
        self.error().map(OutOfRange::message)
    }

    pub fn violation(&self) -> Option<RangeViolation> {
        self.error().map(|err| err.violation)
    }
}

impl fmt::Display for QuoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteOutcome::Quoted(result) => fmt::Display::fmt(result, f),
            QuoteOutcome::NotApplicable(_) => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// Level payment of an annuity-immediate, unrounded and unchecked.
///
/// `duration_months` must be positive. A zero rate degenerates to
/// straight-line repayment P / n.
///
/// `(1+m)^n - 1` is computed as `expm1(n * ln1p(m))` so rates too small to
/// move `1 + m` off 1.0 still give a finite payment close to P / n.
pub fn annuity_payment(principal: f64, duration_months: u32, annual_rate: f64) -> f64 {
    let m = annual_rate / 12.0;
    let n = duration_months as f64;

    let accrued = (n * m.ln_1p()).exp_m1();
    if accrued == 0.0 {
        return principal / n;
    }

    principal * m * (1.0 + accrued) / accrued
}

/// Unrounded monthly payment, `None` when the input cannot be quoted
pub fn monthly_payment(principal: f64, duration_months: u32, annual_rate: f64) -> Option<f64> {
    let input = LoanQuoteInput::new(principal, duration_months, annual_rate);
    validate(&input).ok()?;
    Some(annuity_payment(principal, duration_months, annual_rate))
}

/// Quote a loan: validate, compute, round half away from zero
pub fn quote(input: &LoanQuoteInput) -> QuoteOutcome {
    if let Err(err) = validate(input) {
        return QuoteOutcome::NotApplicable(err);
    }

    let payment = annuity_payment(input.principal, input.duration_months, input.annual_rate);
    QuoteOutcome::Quoted(LoanQuoteResult {
        monthly_payment: payment.round() as i64,
    })
}
