//! Citation (court summons) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::Schema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub id: Uuid,
    pub cause_id: Uuid,
    pub cited_national_id: String,
    /// Hearing date as entered (e.g. `2024-11-20`).
    pub date: String,
    /// Hearing time as entered (e.g. `10:30`).
    pub time: String,
    pub place: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCitation {
    #[validate(length(min = 1, message = "Cause is required"))]
    pub cause_id: String,
    #[validate(length(min = 1, message = "Cited person's national id is required"))]
    pub cited_national_id: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,
    #[validate(length(min = 1, message = "Place is required"))]
    pub place: String,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

impl Schema for CreateCitation {
    const FIELDS: &'static [&'static str] =
        &["cause_id", "cited_national_id", "date", "time", "place", "reason"];
}
