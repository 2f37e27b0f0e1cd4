//! Loan Origination - quoting engine for the consumer loan platform
//!
//! This library provides:
//! - Fixed-rate monthly payment with range validation (one shared calculator)
//! - Amortization schedules with due dates
//! - Indicative rate policy by loan purpose
//! - Loan application step rules, document checklist, and debt-ratio check
//! - Submission payload carrying the unformatted monthly payment

pub mod application;
pub mod error;
pub mod quote;
pub mod rates;
pub mod runner;

// Re-export commonly used types
pub use application::{ApplicationDraft, LoanApplication, LoanPurpose};
pub use error::{LoanError, Result};
pub use quote::{quote, LoanQuoteInput, LoanQuoteResult, OutOfRange, QuoteOutcome};
pub use rates::RatePolicy;
pub use runner::{QuoteRequest, QuoteRunner};
