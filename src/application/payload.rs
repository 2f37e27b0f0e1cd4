//! Form fields sent with a new loan application
//!
//! The backend receives a multipart post; this builds its text parts in
//! form order. File parts are attached by the transport layer.

use serde::Serialize;
use serde_json::{Map, Value};

use super::form::LoanApplication;
use crate::quote::QuoteOutcome;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionPayload {
    fields: Vec<(String, String)>,
}

impl SubmissionPayload {
    /// Collect every form field plus the raw monthly payment and user id.
    ///
    /// `monthlyPayment` is left out when the quote is not applicable.
    pub fn build(app: &LoanApplication, user_id: &str, quote: &QuoteOutcome) -> Self {
        let text = |s: &str| s.to_string();
        let flag = |b: bool| b.to_string();

        let mut fields = vec![
            ("firstName", text(&app.first_name)),
            ("lastName", text(&app.last_name)),
            ("email", text(&app.email)),
            ("phone", text(&app.phone)),
            ("birthDate", text(&app.birth_date)),
            ("maritalStatus", text(&app.marital_status)),
            ("address", text(&app.address)),
            ("city", text(&app.city)),
            ("postalCode", text(&app.postal_code)),
            ("country", text(&app.country)),
            ("profession", text(&app.profession)),
            ("employer", text(&app.employer)),
            ("monthlyIncome", text(&app.monthly_income)),
            ("employmentType", text(&app.employment_type)),
            ("expenses", text(&app.expenses)),
            ("yearsInProfession", text(&app.years_in_profession)),
            ("additionalIncome", text(&app.additional_income)),
            ("existingMonthlyPayments", text(&app.existing_monthly_payments)),
            ("loanPurpose", text(app.loan_purpose.map(|p| p.as_str()).unwrap_or(""))),
            ("loanAmount", text(&app.loan_amount)),
            ("loanDuration", text(&app.loan_duration)),
            ("preferredRate", text(app.preferred_rate.map(|r| r.as_str()).unwrap_or(""))),
            ("purpose", text(&app.purpose)),
            ("hasIncomeProof", flag(app.has_income_proof)),
            ("hasIdDocument", flag(app.has_id_document)),
            ("hasAddressProof", flag(app.has_address_proof)),
            ("hasEmploymentProof", flag(app.has_employment_proof)),
        ];

        if let Some(payment) = quote.monthly_payment() {
            fields.push(("monthlyPayment", payment.to_string()));
        }
        fields.push(("userId", text(user_id)));

        Self {
            fields: fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Fields as a flat JSON object
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}
