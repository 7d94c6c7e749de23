//! Cause (case file) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::Schema;

pub const DEFAULT_ORIGIN: &str = "Fiscalía";
pub const DEFAULT_SUBJECT_MATTER: &str = "Penal";

wire_enum! {
    /// Procedural status. Any value may be set by an edit.
    pub enum CauseStatus {
        UnderInvestigation => "investigacion",
        Judicialized => "judicializada",
        Closed => "cerrada",
        Archived => "archivada",
    }
}

impl Default for CauseStatus {
    fn default() -> Self {
        CauseStatus::UnderInvestigation
    }
}

wire_enum! {
    pub enum Priority {
        Low => "baja",
        Normal => "normal",
        High => "alta",
        Urgent => "urgente",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub kind: String,
    pub url: Option<String>,
    pub description: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cause {
    pub id: Uuid,
    pub title: Option<String>,
    /// RUC.
    pub case_number: String,
    /// RIT, assigned once the cause reaches a court.
    pub court_roll: Option<String>,
    pub origin: String,
    pub subject_matter: String,
    pub description: String,
    pub status: CauseStatus,
    pub priority: Priority,
    /// National id of the defendant.
    pub defendant_id: String,
    pub prosecutor_id: Option<String>,
    pub judge_id: Option<String>,
    pub evidence: Vec<Evidence>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCause {
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Case number (RUC) is required"))]
    pub case_number: String,
    pub court_roll: Option<String>,
    pub origin: Option<String>,
    pub subject_matter: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub status: Option<CauseStatus>,
    pub priority: Option<Priority>,
    #[validate(length(min = 1, message = "Defendant national id is required"))]
    pub defendant_id: String,
    pub prosecutor_id: Option<String>,
    pub judge_id: Option<String>,
}

impl Schema for CreateCause {
    const FIELDS: &'static [&'static str] = &["case_number", "description", "defendant_id"];
}

/// Partial update. `None` leaves a field untouched; for the optional text
/// fields an empty string clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCause {
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Case number (RUC) is required"))]
    pub case_number: Option<String>,
    pub court_roll: Option<String>,
    pub origin: Option<String>,
    pub subject_matter: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub status: Option<CauseStatus>,
    pub priority: Option<Priority>,
    #[validate(length(min = 1, message = "Defendant national id is required"))]
    pub defendant_id: Option<String>,
    pub prosecutor_id: Option<String>,
    pub judge_id: Option<String>,
}

impl Schema for UpdateCause {
    const FIELDS: &'static [&'static str] = &["case_number", "description", "defendant_id"];
}

impl UpdateCause {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.case_number.is_none()
            && self.court_roll.is_none()
            && self.origin.is_none()
            && self.subject_matter.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.defendant_id.is_none()
            && self.prosecutor_id.is_none()
            && self.judge_id.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct AddEvidence {
    #[validate(length(min = 1, message = "Evidence kind is required"))]
    pub kind: String,
    #[validate(url(message = "Evidence url must be a valid URL"))]
    pub url: Option<String>,
    #[validate(length(min = 1, message = "Evidence description is required"))]
    pub description: String,
}

impl Schema for AddEvidence {
    const FIELDS: &'static [&'static str] = &["kind", "url", "description"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_case_number_first() {
        let input: CreateCause = serde_json::from_str("{}").unwrap();
        let err = input.check().unwrap_err();
        assert_eq!(err.to_string(), "Case number (RUC) is required");
    }

    #[test]
    fn create_accepts_minimal_payload() {
        let input: CreateCause = serde_json::from_value(serde_json::json!({
            "caseNumber": "2300123456-7",
            "description": "Robo con intimidación",
            "defendantId": "9.876.543-2"
        }))
        .unwrap();
        assert!(input.check().is_ok());
        assert_eq!(input.status, None);
    }

    #[test]
    fn update_rejects_blanking_required_field() {
        let input = UpdateCause {
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            input.check().unwrap_err().to_string(),
            "Description is required"
        );
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(CauseStatus::default().as_str(), "investigacion");
        assert_eq!(
            "judicializada".parse::<CauseStatus>().unwrap(),
            CauseStatus::Judicialized
        );
        assert!("activa".parse::<CauseStatus>().is_err());
    }
}
