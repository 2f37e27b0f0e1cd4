//! Required-field rules for each step of the application form

use serde::Serialize;
use std::collections::BTreeMap;

use super::documents::{DocumentCategory, DocumentSet};
use super::form::LoanApplication;
use crate::quote::{
    parse_amount, parse_months, MAX_DURATION_MONTHS, MAX_PRINCIPAL, MIN_DURATION_MONTHS, MIN_PRINCIPAL,
};

/// The five form steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FormStep {
    Personal = 1,
    Professional = 2,
    Financial = 3,
    Loan = 4,
    Documents = 5,
}

impl FormStep {
    pub const ALL: [FormStep; 5] = [
        FormStep::Personal,
        FormStep::Professional,
        FormStep::Financial,
        FormStep::Loan,
        FormStep::Documents,
    ];

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == number)
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormStep::Personal => "Informations personnelles",
            FormStep::Professional => "Informations professionnelles",
            FormStep::Financial => "Informations financières",
            FormStep::Loan => "Détails du prêt",
            FormStep::Documents => "Documents",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Completion percentage once this step is reached
    pub fn progress(&self) -> f64 {
        self.number() as f64 * 100.0 / Self::ALL.len() as f64
    }
}

/// Field name (camelCase, as in the form) to error message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepErrors(BTreeMap<&'static str, String>);

impl StepErrors {
    fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(field, message);
        }
    }

    fn insert(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Check one step of the form
pub fn validate_step(step: FormStep, app: &LoanApplication, documents: &DocumentSet) -> StepErrors {
    let mut errors = StepErrors::default();

    match step {
        FormStep::Personal => {
            errors.require("firstName", &app.first_name, "Le prénom est requis");
            errors.require("lastName", &app.last_name, "Le nom est requis");
            errors.require("email", &app.email, "L'email est requis");
            errors.require("phone", &app.phone, "Le téléphone est requis");
            errors.require("birthDate", &app.birth_date, "La date de naissance est requise");
            errors.require("maritalStatus", &app.marital_status, "La situation familiale est requise");
            errors.require("country", &app.country, "Le pays est requis");
        }
        FormStep::Professional => {
            errors.require("profession", &app.profession, "La profession est requise");
            errors.require("employer", &app.employer, "L'employeur est requis");
            errors.require("monthlyIncome", &app.monthly_income, "Le revenu mensuel est requis");
        }
        FormStep::Financial => {
            errors.require("expenses", &app.expenses, "Les charges mensuelles sont requises");
            errors.require(
                "yearsInProfession",
                &app.years_in_profession,
                "L'ancienneté professionnelle est requise",
            );
        }
        FormStep::Loan => validate_loan_details(app, &mut errors),
        FormStep::Documents => validate_documents(app, documents, &mut errors),
    }

    errors
}

fn validate_loan_details(app: &LoanApplication, errors: &mut StepErrors) {
    if app.loan_amount.trim().is_empty() {
        errors.insert("loanAmount", "Le montant demandé est requis");
    } else {
        let amount = parse_amount(&app.loan_amount);
        if !(MIN_PRINCIPAL..=MAX_PRINCIPAL).contains(&amount) {
            errors.insert("loanAmount", "Le montant doit être entre 10,000 et 50,000,000 XOF");
        }
    }

    if app.loan_duration.trim().is_empty() {
        errors.insert("loanDuration", "La durée du prêt est requise");
    } else {
        let months = parse_months(&app.loan_duration);
        if !(MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS).contains(&months) {
            errors.insert("loanDuration", "La durée doit être entre 3 et 300 mois");
        }
    }

    if app.loan_purpose.is_none() {
        errors.insert("loanPurpose", "L'objet du prêt est requis");
    }
    if app.preferred_rate.is_none() {
        errors.insert("preferredRate", "Le type de taux préféré est requis");
    }
    errors.require("purpose", &app.purpose, "La description du projet est requise");
}

fn validate_documents(app: &LoanApplication, documents: &DocumentSet, errors: &mut StepErrors) {
    if !app.has_income_proof {
        errors.insert("hasIncomeProof", "Le justificatif de revenus est requis");
    }
    if !app.has_id_document {
        errors.insert("hasIdDocument", "La pièce d'identité est requise");
    }
    if !app.has_address_proof {
        errors.insert("hasAddressProof", "Le justificatif de domicile est requis");
    }
    if !app.has_employment_proof {
        errors.insert("hasEmploymentProof", "Le justificatif d'emploi est requis");
    }

    if documents.len() < DocumentCategory::REQUIRED.len() {
        errors.insert("tempDocument", "Les quatre documents requis doivent être téléversés");
        return;
    }

    let missing = documents.missing_categories();
    if !missing.is_empty() {
        let labels: Vec<_> = missing.iter().map(|c| c.label()).collect();
        errors.insert("tempDocument", &format!("Documents manquants pour : {}", labels.join(", ")));
    }
}

/// Validate every step, returning the first one that fails
pub fn first_invalid_step(
    app: &LoanApplication,
    documents: &DocumentSet,
) -> Option<(FormStep, StepErrors)> {
    FormStep::ALL.into_iter().find_map(|step| {
        let errors = validate_step(step, app, documents);
        (!errors.is_valid()).then_some((step, errors))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::documents::UploadedDocument;
    use crate::application::form::{LoanPurpose, RatePreference};

    fn loan_step(amount: &str, duration: &str) -> LoanApplication {
        LoanApplication {
            loan_amount: amount.to_string(),
            loan_duration: duration.to_string(),
            loan_purpose: Some(LoanPurpose::Car),
            preferred_rate: Some(RatePreference::Fixed),
            purpose: "Véhicule électrique".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_personal_step_lists_every_missing_field() {
        let errors = validate_step(FormStep::Personal, &LoanApplication::default(), &DocumentSet::new());
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get("email"), Some("L'email est requis"));
        // address is optional
        assert!(errors.get("address").is_none());
    }

    #[test]
    fn test_loan_step_ranges() {
        let docs = DocumentSet::new();
        assert!(validate_step(FormStep::Loan, &loan_step("1000000", "84"), &docs).is_valid());

        let errors = validate_step(FormStep::Loan, &loan_step("9999", "301"), &docs);
        assert_eq!(
            errors.get("loanAmount"),
            Some("Le montant doit être entre 10,000 et 50,000,000 XOF")
        );
        assert_eq!(errors.get("loanDuration"), Some("La durée doit être entre 3 et 300 mois"));

        let errors = validate_step(FormStep::Loan, &loan_step("", ""), &docs);
        assert_eq!(errors.get("loanAmount"), Some("Le montant demandé est requis"));
        assert_eq!(errors.get("loanDuration"), Some("La durée du prêt est requise"));
    }

    #[test]
    fn test_documents_step_missing_categories() {
        let app = LoanApplication {
            has_income_proof: true,
            has_id_document: true,
            has_address_proof: true,
            has_employment_proof: true,
            ..Default::default()
        };
        let pdf = |n: &str| UploadedDocument::new(n, 10, "application/pdf");
        let docs = DocumentSet::from(vec![
            pdf("a").with_category(DocumentCategory::IncomeProof),
            pdf("b").with_category(DocumentCategory::IdDocument),
            pdf("c").with_category(DocumentCategory::IdDocument),
            pdf("d"),
        ]);

        let errors = validate_step(FormStep::Documents, &app, &docs);
        assert_eq!(
            errors.get("tempDocument"),
            Some("Documents manquants pour : Justificatif de domicile, Justificatif d'emploi")
        );
    }

    #[test]
    fn test_documents_step_too_few_files() {
        let errors = validate_step(FormStep::Documents, &LoanApplication::default(), &DocumentSet::new());
        assert_eq!(errors.len(), 5);
        assert_eq!(
            errors.get("tempDocument"),
            Some("Les quatre documents requis doivent être téléversés")
        );
    }

    #[test]
    fn test_step_navigation() {
        assert_eq!(FormStep::from_number(4), Some(FormStep::Loan));
        assert_eq!(FormStep::Loan.next(), Some(FormStep::Documents));
        assert_eq!(FormStep::Documents.next(), None);
        assert_eq!(FormStep::Personal.progress(), 20.0);
    }

    #[test]
    fn test_first_invalid_step() {
        let (step, _) = first_invalid_step(&LoanApplication::default(), &DocumentSet::new()).unwrap();
        assert_eq!(step, FormStep::Personal);
    }
}
