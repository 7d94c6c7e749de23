//! Warrant (judicial order) domain model and its state machine.
//!
//! ```text
//!              sign (juez/admin)
//!   pendiente ─────────────────▶ aprobada
//!       │
//!       │ reject (juez/admin, reason)
//!       ▼
//!   rechazada
//! ```
//!
//! `aprobada` and `rechazada` are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::Schema;

wire_enum! {
    pub enum WarrantType {
        Detention => "detencion",
        SearchAndSeizure => "allanamiento",
        AssetSeizure => "incautacion",
        Intervention => "intervencion",
        BankSecrecyLift => "secreto_bancario",
    }
}

wire_enum! {
    pub enum WarrantStatus {
        Pending => "pendiente",
        Approved => "aprobada",
        Rejected => "rechazada",
    }
}

impl WarrantStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WarrantStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Warrant {
    pub id: Uuid,
    pub cause_id: Uuid,
    #[serde(rename = "type")]
    pub warrant_type: WarrantType,
    pub target: String,
    pub reason: String,
    pub status: WarrantStatus,
    /// Display name of the requesting actor, always set server-side.
    pub requested_by: String,
    pub signed_by: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub signed_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Client payload for a warrant request.
///
/// Carries no `requestedBy`: unknown fields, including a forged
/// `requestedBy`, are ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestWarrant {
    #[validate(length(min = 1, message = "A linked cause is required"))]
    pub cause_id: String,
    #[serde(rename = "type")]
    #[validate(required(message = "Warrant type is required"))]
    pub warrant_type: Option<WarrantType>,
    #[validate(length(min = 1, message = "Target is required"))]
    pub target: String,
    #[validate(length(min = 10, message = "Justification must be at least 10 characters"))]
    pub reason: String,
}

impl Schema for RequestWarrant {
    const FIELDS: &'static [&'static str] = &["cause_id", "warrant_type", "target", "reason"];
}

/// Storage input: a validated request plus the server-resolved requester.
#[derive(Debug, Clone)]
pub struct CreateWarrant {
    pub cause_id: Uuid,
    pub warrant_type: WarrantType,
    pub target: String,
    pub reason: String,
    pub requested_by: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RejectWarrant {
    pub reason: String,
}

/// A resolution applied to a pending warrant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarrantTransition {
    Approve { signed_by: String },
    Reject { reason: String },
}

impl WarrantTransition {
    pub fn target_status(&self) -> WarrantStatus {
        match self {
            WarrantTransition::Approve { .. } => WarrantStatus::Approved,
            WarrantTransition::Reject { .. } => WarrantStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ignores_client_requested_by() {
        let input: RequestWarrant = serde_json::from_value(serde_json::json!({
            "causeId": "c-1",
            "type": "detencion",
            "target": "Roberto Muñoz",
            "reason": "Riesgo de fuga acreditado",
            "requestedBy": "someone-else"
        }))
        .unwrap();
        assert!(input.check().is_ok());
        assert_eq!(input.warrant_type, Some(WarrantType::Detention));
    }

    #[test]
    fn short_reason_is_rejected() {
        let input = RequestWarrant {
            cause_id: "c-1".into(),
            warrant_type: Some(WarrantType::SearchAndSeizure),
            target: "Av. Principal 1234".into(),
            reason: "porque sí".into(),
        };
        assert_eq!(
            input.check().unwrap_err().to_string(),
            "Justification must be at least 10 characters"
        );
    }

    #[test]
    fn missing_type_is_reported_in_order() {
        let input = RequestWarrant {
            cause_id: "c-1".into(),
            warrant_type: None,
            target: String::new(),
            reason: String::new(),
        };
        assert_eq!(
            input.check().unwrap_err().to_string(),
            "Warrant type is required"
        );
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!WarrantStatus::Pending.is_terminal());
        assert!(WarrantStatus::Approved.is_terminal());
        assert!(WarrantStatus::Rejected.is_terminal());
    }

    #[test]
    fn type_serializes_under_type_key() {
        let json = serde_json::to_value(WarrantType::BankSecrecyLift).unwrap();
        assert_eq!(json, "secreto_bancario");
    }
}
