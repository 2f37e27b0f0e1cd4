//! Debt-ratio check: existing charges plus the new payment against income

use serde::{Deserialize, Serialize};

/// Maximum share of net monthly income going to loan repayments
pub const MAX_DEBT_RATIO: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affordability {
    pub monthly_income: f64,
    pub existing_payments: f64,
    pub new_payment: f64,

    /// (existing + new) / income
    pub debt_ratio: f64,
}

impl Affordability {
    /// Assess the ratio; `None` when income is missing or not positive
    pub fn assess(monthly_income: f64, existing_payments: f64, new_payment: f64) -> Option<Self> {
        if !monthly_income.is_finite() || monthly_income <= 0.0 {
            return None;
        }

        let existing_payments = existing_payments.max(0.0);
        Some(Self {
            monthly_income,
            existing_payments,
            new_payment,
            debt_ratio: (existing_payments + new_payment) / monthly_income,
        })
    }

    pub fn within_limit(&self) -> bool {
        self.debt_ratio <= MAX_DEBT_RATIO
    }

    /// Largest new payment that keeps the ratio at the limit
    pub fn headroom(&self) -> f64 {
        (self.monthly_income * MAX_DEBT_RATIO - self.existing_payments).max(0.0)
    }
}
