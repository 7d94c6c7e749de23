//! Confiscation domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::Schema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Confiscation {
    pub id: Uuid,
    pub cause_id: Uuid,
    pub description: String,
    pub items: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateConfiscation {
    #[validate(length(min = 1, message = "Cause is required"))]
    pub cause_id: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Confiscated items are required"))]
    pub items: String,
    pub location: Option<String>,
}

impl Schema for CreateConfiscation {
    const FIELDS: &'static [&'static str] = &["cause_id", "description", "items"];
}
