//! A complete application walks every step and yields a payload

use loan_origination::application::{
    ApplicationDraft, DocumentCategory, DocumentSet, FormStep, LoanApplication, LoanPurpose,
    RatePreference, UploadedDocument,
};
use loan_origination::RatePolicy;

fn complete_form() -> LoanApplication {
    LoanApplication {
        first_name: "Aminata".into(),
        last_name: "Diallo".into(),
        email: "aminata@example.com".into(),
        phone: "+221700000000".into(),
        birth_date: "1990-04-12".into(),
        marital_status: "married".into(),
        country: "SN".into(),
        profession: "Ingénieure".into(),
        employer: "SENELEC".into(),
        monthly_income: "900000".into(),
        employment_type: "cdi".into(),
        expenses: "200000".into(),
        years_in_profession: "8".into(),
        existing_monthly_payments: "70000".into(),
        loan_purpose: Some(LoanPurpose::Renovation),
        loan_amount: "4500000".into(),
        loan_duration: "72".into(),
        preferred_rate: Some(RatePreference::Fixed),
        purpose: "Panneaux solaires".into(),
        has_income_proof: true,
        has_id_document: true,
        has_address_proof: true,
        has_employment_proof: true,
        ..Default::default()
    }
}

fn complete_documents() -> DocumentSet {
    let mut docs = DocumentSet::new();
    docs.add(
        DocumentCategory::REQUIRED
            .iter()
            .enumerate()
            .map(|(i, cat)| UploadedDocument::new(format!("doc{}.pdf", i), 4096, "application/pdf").with_category(*cat))
            .collect(),
    )
    .unwrap();
    docs
}

#[test]
fn complete_draft_passes_every_step() {
    let draft = ApplicationDraft {
        form: complete_form(),
        documents: complete_documents(),
    };

    for step in FormStep::ALL {
        assert!(draft.validate_step(step).is_valid(), "step {:?} failed", step);
    }
    assert!(draft.first_invalid_step().is_none());

    let policy = RatePolicy::indicative();
    let affordability = draft.affordability(&policy).unwrap();
    assert!(affordability.within_limit());

    let payload = draft.payload("7", &policy);
    let expected = draft.quote(&policy).monthly_payment().unwrap().to_string();
    assert_eq!(payload.get("monthlyPayment"), Some(expected.as_str()));
    assert_eq!(payload.get("loanPurpose"), Some("renovation"));
}

#[test]
fn out_of_range_amount_blocks_loan_step() {
    let mut form = complete_form();
    form.loan_amount = "60000000".into();
    let draft = ApplicationDraft {
        form,
        documents: complete_documents(),
    };

    let (step, errors) = draft.first_invalid_step().unwrap();
    assert_eq!(step, FormStep::Loan);
    assert!(errors.get("loanAmount").is_some());
    assert!(draft.payload("7", &RatePolicy::indicative()).get("monthlyPayment").is_none());
}
