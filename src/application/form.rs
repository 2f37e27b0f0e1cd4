//! Loan application form data as entered by the applicant

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanError;
use crate::quote::{parse_amount, parse_months, LoanQuoteInput};

/// What the loan finances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanPurpose {
    Home,
    Car,
    Renovation,
    Personal,
    Business,
    Other,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 6] = [
        LoanPurpose::Home,
        LoanPurpose::Car,
        LoanPurpose::Renovation,
        LoanPurpose::Personal,
        LoanPurpose::Business,
        LoanPurpose::Other,
    ];

    /// Form value
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanPurpose::Home => "home",
            LoanPurpose::Car => "car",
            LoanPurpose::Renovation => "renovation",
            LoanPurpose::Personal => "personal",
            LoanPurpose::Business => "business",
            LoanPurpose::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanPurpose::Home => "Achat immobilier",
            LoanPurpose::Car => "Achat véhicule",
            LoanPurpose::Renovation => "Travaux/Rénovation",
            LoanPurpose::Personal => "Personnel",
            LoanPurpose::Business => "Professionnel",
            LoanPurpose::Other => "Autre",
        }
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanPurpose {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LoanPurpose::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LoanError::UnknownPurpose(s.to_string()))
    }
}

/// Preferred rate type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatePreference {
    #[serde(rename = "fixe")]
    Fixed,
    #[serde(rename = "variable")]
    Variable,
}

impl RatePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatePreference::Fixed => "fixe",
            RatePreference::Variable => "variable",
        }
    }
}

/// Everything the five-step form collects, kept as typed text.
///
/// Numeric fields stay as the applicant typed them; parsing happens when a
/// step is validated or a quote is requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanApplication {
    // Step 1: personal
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub marital_status: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,

    // Step 2: professional
    pub profession: String,
    pub employer: String,
    pub monthly_income: String,
    pub employment_type: String,

    // Step 3: financial
    pub expenses: String,
    pub years_in_profession: String,
    pub additional_income: String,
    pub existing_monthly_payments: String,

    // Step 4: loan details
    pub loan_purpose: Option<LoanPurpose>,
    pub loan_amount: String,
    pub loan_duration: String,
    pub preferred_rate: Option<RatePreference>,
    pub purpose: String,

    // Step 5: document attestations
    pub has_income_proof: bool,
    pub has_id_document: bool,
    pub has_address_proof: bool,
    pub has_employment_proof: bool,
}

impl LoanApplication {
    /// Quote input built from the loan-details step
    pub fn quote_input(&self, annual_rate: f64) -> LoanQuoteInput {
        LoanQuoteInput::new(
            parse_amount(&self.loan_amount),
            parse_months(&self.loan_duration),
            annual_rate,
        )
    }

    pub fn monthly_income_value(&self) -> f64 {
        parse_amount(&self.monthly_income)
    }

    pub fn existing_payments_value(&self) -> f64 {
        parse_amount(&self.existing_monthly_payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_parse() {
        assert_eq!("car".parse::<LoanPurpose>().unwrap(), LoanPurpose::Car);
        assert_eq!(" Home ".parse::<LoanPurpose>().unwrap(), LoanPurpose::Home);
        assert!("yacht".parse::<LoanPurpose>().is_err());
    }

    #[test]
    fn test_deserialize_camel_case_form() {
        let json = r#"{
            "firstName": "Awa",
            "loanPurpose": "renovation",
            "loanAmount": "2500000",
            "loanDuration": "36",
            "preferredRate": "fixe",
            "hasIdDocument": true
        }"#;
        let app: LoanApplication = serde_json::from_str(json).unwrap();

        assert_eq!(app.first_name, "Awa");
        assert_eq!(app.loan_purpose, Some(LoanPurpose::Renovation));
        assert_eq!(app.preferred_rate, Some(RatePreference::Fixed));
        assert!(app.has_id_document);
        assert!(app.last_name.is_empty());

        let input = app.quote_input(0.03);
        assert_eq!(input.principal, 2_500_000.0);
        assert_eq!(input.duration_months, 36);
    }
}
