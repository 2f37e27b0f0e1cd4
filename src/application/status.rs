//! Application status codes returned by the backend

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "approuve")]
    Approved,
    #[serde(rename = "en_cours")]
    InReview,
    #[serde(rename = "rejete")]
    Rejected,
    #[serde(rename = "inconnu")]
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "approuve" => ApplicationStatus::Approved,
            "en_cours" => ApplicationStatus::InReview,
            "rejete" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Approved => "Approuvé",
            ApplicationStatus::InReview => "En cours",
            ApplicationStatus::Rejected => "Rejeté",
            ApplicationStatus::Unknown => "Inconnu",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ApplicationStatus::Approved => "Prêt approuvé et actif",
            ApplicationStatus::InReview => "Demande en cours d'analyse",
            ApplicationStatus::Rejected => "Demande rejetée",
            ApplicationStatus::Unknown => "Statut inconnu",
        }
    }

    /// Whether the loan is live and accrues payments
    pub fn is_active(&self) -> bool {
        matches!(self, ApplicationStatus::Approved)
    }
}

/// Count applications per status, in display order
pub fn tally<'a, I>(statuses: I) -> [(ApplicationStatus, usize); 3]
where
    I: IntoIterator<Item = &'a ApplicationStatus>,
{
    let mut counts = [
        (ApplicationStatus::Approved, 0),
        (ApplicationStatus::InReview, 0),
        (ApplicationStatus::Rejected, 0),
    ];
    for status in statuses {
        if let Some(slot) = counts.iter_mut().find(|slot| slot.0 == *status) {
            slot.1 += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ApplicationStatus::from_code("en_cours"), ApplicationStatus::InReview);
        assert_eq!(ApplicationStatus::from_code("archive"), ApplicationStatus::Unknown);

        let parsed: ApplicationStatus = serde_json::from_str("\"rejete\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Rejected);
        let parsed: ApplicationStatus = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Unknown);
    }

    #[test]
    fn test_tally() {
        let statuses = [
            ApplicationStatus::Approved,
            ApplicationStatus::InReview,
            ApplicationStatus::Rejected,
            ApplicationStatus::Approved,
            ApplicationStatus::Unknown,
        ];
        let counts = tally(&statuses);
        assert_eq!(counts[0], (ApplicationStatus::Approved, 2));
        assert_eq!(counts[1].1, 1);
        assert_eq!(counts[2].1, 1);
    }
}
