//! Repayment declarations and overdue tracking for active loans
//!
//! Borrowers repay through a mobile-money operator and attach the receipt;
//! the backend reconciles the payment. This module only checks that a
//! declaration is complete and works out which loans are late.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::documents::UploadedDocument;
use crate::quote::{parse_amount, AmortizationSchedule};

/// Mobile-money operators accepting repayments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Momo,
    Orange,
    Wave,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Momo, PaymentMethod::Orange, PaymentMethod::Wave];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Momo => "Mobile Money (MTN)",
            PaymentMethod::Orange => "Moov Money (MOOV)",
            PaymentMethod::Wave => "Celtis Cash (CELTIS)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Veuillez remplir tous les champs")]
pub struct IncompleteRepayment;

/// A repayment as entered by the borrower
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepaymentSubmission {
    pub method: Option<PaymentMethod>,
    pub amount: String,
    pub receipt: Option<UploadedDocument>,
}

impl RepaymentSubmission {
    /// Check that method, amount, and receipt are all present.
    ///
    /// Returns the declared amount. Empty, non-numeric, or non-positive
    /// amounts count as missing.
    pub fn validate(&self) -> Result<f64, IncompleteRepayment> {
        let amount = parse_amount(&self.amount);
        if self.method.is_none() || self.receipt.is_none() || amount <= 0.0 {
            return Err(IncompleteRepayment);
        }
        Ok(amount)
    }
}

/// A live loan with its next instalment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveLoan {
    pub id: u64,
    pub label: String,
    pub monthly_amount: i64,
    pub due_date: NaiveDate,
}

impl ActiveLoan {
    /// Next unpaid instalment of a dated schedule.
    ///
    /// `None` when every period is paid or the schedule has no due dates.
    pub fn from_schedule(
        id: u64,
        label: impl Into<String>,
        schedule: &AmortizationSchedule,
        periods_paid: u32,
    ) -> Option<Self> {
        let row = schedule.rows.iter().find(|r| r.period == periods_paid + 1)?;
        Some(Self {
            id,
            label: label.into(),
            monthly_amount: row.payment.round() as i64,
            due_date: row.due_date?,
        })
    }

    /// Whole days past the due date, 0 when not yet due
    pub fn days_late(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.days_late(today) > 0
    }

    /// Status badge text
    pub fn status_label(&self, today: NaiveDate) -> String {
        match self.days_late(today) {
            0 => "À jour".to_string(),
            days => format!("Retard {} jours", days),
        }
    }
}

/// Loans past due, with their days late
pub fn overdue_loans(loans: &[ActiveLoan], today: NaiveDate) -> Vec<(&ActiveLoan, i64)> {
    loans
        .iter()
        .map(|loan| (loan, loan.days_late(today)))
        .filter(|(_, days)| *days > 0)
        .collect()
}
