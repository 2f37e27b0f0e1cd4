//! Loan application: form model, step rules, documents, submission payload,
//! and repayments on active loans

mod affordability;
mod documents;
mod form;
mod payload;
mod repayment;
mod status;
mod steps;

pub use affordability::{Affordability, MAX_DEBT_RATIO};
pub use documents::{
    filter_profile_documents, DocumentCategory, DocumentLimitExceeded, DocumentSet, NoValidDocuments,
    UploadedDocument, ACCEPTED_MIME_TYPES, MAX_DOCUMENTS, MAX_PROFILE_DOCUMENT_BYTES, PROFILE_MIME_TYPES,
};
pub use form::{LoanApplication, LoanPurpose, RatePreference};
pub use payload::SubmissionPayload;
pub use repayment::{overdue_loans, ActiveLoan, IncompleteRepayment, PaymentMethod, RepaymentSubmission};
pub use status::{tally, ApplicationStatus};
pub use steps::{first_invalid_step, validate_step, FormStep, StepErrors};

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::quote::{quote, QuoteOutcome};
use crate::rates::RatePolicy;

/// A saved application in progress: form fields plus staged documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationDraft {
    #[serde(flatten)]
    pub form: LoanApplication,

    #[serde(default)]
    pub documents: DocumentSet,
}

impl ApplicationDraft {
    /// Load a draft from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a draft from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Quote the requested loan at the policy rate for its purpose
    pub fn quote(&self, policy: &RatePolicy) -> QuoteOutcome {
        let rate = policy.rate_for_optional(self.form.loan_purpose);
        quote(&self.form.quote_input(rate))
    }

    pub fn validate_step(&self, step: FormStep) -> StepErrors {
        validate_step(step, &self.form, &self.documents)
    }

    pub fn first_invalid_step(&self) -> Option<(FormStep, StepErrors)> {
        first_invalid_step(&self.form, &self.documents)
    }

    /// Debt ratio with the quoted payment; `None` without income or quote
    pub fn affordability(&self, policy: &RatePolicy) -> Option<Affordability> {
        let payment = self.quote(policy).monthly_payment()?;
        Affordability::assess(
            self.form.monthly_income_value(),
            self.form.existing_payments_value(),
            payment as f64,
        )
    }

    pub fn payload(&self, user_id: &str, policy: &RatePolicy) -> SubmissionPayload {
        SubmissionPayload::build(&self.form, user_id, &self.quote(policy))
    }
}
