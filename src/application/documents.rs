//! Supporting documents attached to an application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// At most this many files per application
pub const MAX_DOCUMENTS: usize = 4;

/// MIME types the upload step accepts
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["application/pdf", "image/jpeg", "image/png", "image/jpg"];

/// MIME types accepted for profile (KYC) documents
pub const PROFILE_MIME_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Largest profile document accepted (5 MB)
pub const MAX_PROFILE_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Kind of supporting document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentCategory {
    IncomeProof,
    IdDocument,
    AddressProof,
    EmploymentProof,
}

impl DocumentCategory {
    /// Every category must be covered before submission
    pub const REQUIRED: [DocumentCategory; 4] = [
        DocumentCategory::IncomeProof,
        DocumentCategory::IdDocument,
        DocumentCategory::AddressProof,
        DocumentCategory::EmploymentProof,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentCategory::IncomeProof => "Justificatif de revenus",
            DocumentCategory::IdDocument => "Pièce d'identité",
            DocumentCategory::AddressProof => "Justificatif de domicile",
            DocumentCategory::EmploymentProof => "Justificatif d'emploi",
        }
    }
}

/// File metadata for one upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    #[serde(default)]
    pub category: Option<DocumentCategory>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: DocumentCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_accepted_type(&self) -> bool {
        ACCEPTED_MIME_TYPES.contains(&self.mime_type.as_str())
    }

    /// Type and size rules of the profile document upload
    pub fn is_valid_profile_document(&self) -> bool {
        PROFILE_MIME_TYPES.contains(&self.mime_type.as_str()) && self.size <= MAX_PROFILE_DOCUMENT_BYTES
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Maximum {max} fichiers autorisés")]
pub struct DocumentLimitExceeded {
    pub max: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Fichiers non valides ou trop lourds.")]
pub struct NoValidDocuments;

/// Keep the files a profile (KYC) upload accepts.
///
/// Invalid or oversized files are dropped; an upload left empty is refused.
pub fn filter_profile_documents(
    files: Vec<UploadedDocument>,
) -> Result<Vec<UploadedDocument>, NoValidDocuments> {
    let submitted = files.len();
    let kept: Vec<_> = files
        .into_iter()
        .filter(UploadedDocument::is_valid_profile_document)
        .collect();

    if kept.len() < submitted {
        log::debug!("dropped {} profile document(s)", submitted - kept.len());
    }
    if kept.is_empty() {
        return Err(NoValidDocuments);
    }
    Ok(kept)
}

/// Files staged for submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSet {
    documents: Vec<UploadedDocument>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a batch of files.
    ///
    /// Files of unaccepted types are dropped. If the accepted files would
    /// push the set past [`MAX_DOCUMENTS`], nothing is added.
    pub fn add(&mut self, files: Vec<UploadedDocument>) -> Result<usize, DocumentLimitExceeded> {
        let accepted: Vec<_> = files.into_iter().filter(UploadedDocument::is_accepted_type).collect();

        if self.documents.len() + accepted.len() > MAX_DOCUMENTS {
            log::warn!(
                "refusing {} file(s): {} already staged, limit {}",
                accepted.len(),
                self.documents.len(),
                MAX_DOCUMENTS
            );
            return Err(DocumentLimitExceeded { max: MAX_DOCUMENTS });
        }

        let added = accepted.len();
        self.documents.extend(accepted);
        Ok(added)
    }

    /// Tag a staged file; false if the index is out of bounds
    pub fn set_category(&mut self, index: usize, category: DocumentCategory) -> bool {
        match self.documents.get_mut(index) {
            Some(doc) => {
                doc.category = Some(category);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<UploadedDocument> {
        (index < self.documents.len()).then(|| self.documents.remove(index))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadedDocument> {
        self.documents.iter()
    }

    /// Required categories no staged file is tagged with, in checklist order
    pub fn missing_categories(&self) -> Vec<DocumentCategory> {
        DocumentCategory::REQUIRED
            .into_iter()
            .filter(|cat| !self.documents.iter().any(|d| d.category == Some(*cat)))
            .collect()
    }
}

impl From<Vec<UploadedDocument>> for DocumentSet {
    fn from(documents: Vec<UploadedDocument>) -> Self {
        Self { documents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> UploadedDocument {
        UploadedDocument::new(name, 1024, "application/pdf")
    }

    #[test]
    fn test_unaccepted_types_dropped() {
        let mut set = DocumentSet::new();
        let added = set
            .add(vec![pdf("a.pdf"), UploadedDocument::new("b.docx", 10, "application/msword")])
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_limit_refuses_whole_batch() {
        let mut set = DocumentSet::new();
        set.add(vec![pdf("1"), pdf("2"), pdf("3")]).unwrap();

        let err = set.add(vec![pdf("4"), pdf("5")]).unwrap_err();
        assert_eq!(err.max, MAX_DOCUMENTS);
        assert_eq!(set.len(), 3);

        assert_eq!(set.add(vec![pdf("4")]).unwrap(), 1);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_missing_categories_in_order() {
        let mut set = DocumentSet::new();
        set.add(vec![pdf("id"), pdf("pay")]).unwrap();
        assert!(set.set_category(0, DocumentCategory::IdDocument));
        assert!(!set.set_category(9, DocumentCategory::IncomeProof));

        assert_eq!(
            set.missing_categories(),
            vec![
                DocumentCategory::IncomeProof,
                DocumentCategory::AddressProof,
                DocumentCategory::EmploymentProof,
            ]
        );
    }

    #[test]
    fn test_profile_filter_type_and_size() {
        let files = vec![
            pdf("passport.pdf"),
            UploadedDocument::new("scan.jpg", 10, "image/jpg"),
            UploadedDocument::new("photo.png", MAX_PROFILE_DOCUMENT_BYTES, "image/png"),
            UploadedDocument::new("huge.png", MAX_PROFILE_DOCUMENT_BYTES + 1, "image/png"),
        ];

        let kept = filter_profile_documents(files).unwrap();
        let names: Vec<_> = kept.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["passport.pdf", "photo.png"]);
    }

    #[test]
    fn test_profile_filter_refuses_empty_upload() {
        let err = filter_profile_documents(vec![UploadedDocument::new("a.docx", 10, "application/msword")])
            .unwrap_err();
        assert_eq!(err.to_string(), "Fichiers non valides ou trop lourds.");
        assert!(filter_profile_documents(Vec::new()).is_err());
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut set = DocumentSet::from(vec![pdf("a")]);
        assert!(set.remove(3).is_none());
        assert_eq!(set.remove(0).map(|d| d.name), Some("a".to_string()));
        assert!(set.is_empty());
    }
}
