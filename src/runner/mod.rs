//! Quote runner for single and batch quotes
//!
//! Holds the rate policy once, then quotes any number of requests against
//! it. The policy is passed in explicitly rather than read from ambient state.

pub mod loader;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::application::LoanPurpose;
use crate::quote::{quote, AmortizationSchedule, LoanQuoteInput, OutOfRange, QuoteOutcome};
use crate::rates::RatePolicy;

/// One loan to quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub amount: f64,
    pub duration_months: u32,
    #[serde(default)]
    pub purpose: Option<LoanPurpose>,
}

impl QuoteRequest {
    pub fn new(amount: f64, duration_months: u32, purpose: Option<LoanPurpose>) -> Self {
        Self {
            amount,
            duration_months,
            purpose,
        }
    }
}

/// A request with the rate applied and its outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteRecord {
    pub request: QuoteRequest,
    pub annual_rate: f64,
    pub outcome: QuoteOutcome,
}

/// Pre-loaded runner for repeated quotes
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::new(RatePolicy::indicative());
/// for months in [12, 24, 36] {
///     let record = runner.quote(&QuoteRequest::new(1_000_000.0, months, None));
///     println!("{}", record.outcome);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QuoteRunner {
    policy: RatePolicy,
}

impl QuoteRunner {
    pub fn new(policy: RatePolicy) -> Self {
        Self { policy }
    }

    /// Runner at the flat indicative rate
    pub fn indicative() -> Self {
        Self::new(RatePolicy::indicative())
    }

    /// Calculator input for a request under this policy
    pub fn input_for(&self, request: &QuoteRequest) -> LoanQuoteInput {
        let rate = self.policy.rate_for_optional(request.purpose);
        LoanQuoteInput::new(request.amount, request.duration_months, rate)
    }

    /// Quote a single request
    pub fn quote(&self, request: &QuoteRequest) -> QuoteRecord {
        let input = self.input_for(request);
        QuoteRecord {
            request: *request,
            annual_rate: input.annual_rate,
            outcome: quote(&input),
        }
    }

    /// Quote many requests in parallel; output order matches input order
    pub fn quote_batch(&self, requests: &[QuoteRequest]) -> Vec<QuoteRecord> {
        let records: Vec<QuoteRecord> = requests.par_iter().map(|r| self.quote(r)).collect();
        let rejected = records.iter().filter(|r| !r.outcome.is_applicable()).count();
        log::info!("quoted {} request(s), {} not applicable", records.len(), rejected);
        records
    }

    /// Same amount over several durations
    pub fn quote_durations(
        &self,
        amount: f64,
        durations: &[u32],
        purpose: Option<LoanPurpose>,
    ) -> Vec<QuoteRecord> {
        durations
            .iter()
            .map(|&months| self.quote(&QuoteRequest::new(amount, months, purpose)))
            .collect()
    }

    /// Full schedule for a request
    pub fn schedule(
        &self,
        request: &QuoteRequest,
        first_due: Option<NaiveDate>,
    ) -> Result<AmortizationSchedule, OutOfRange> {
        AmortizationSchedule::build(&self.input_for(request), first_due)
    }

    pub fn policy(&self) -> &RatePolicy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut RatePolicy {
        &mut self.policy
    }
}

impl Default for QuoteRunner {
    fn default() -> Self {
        Self::indicative()
    }
}
