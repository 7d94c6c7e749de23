//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub discord_id: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full desired state of a user after a login, keyed by `discord_id`.
///
/// Produced by login reconciliation and written as a single upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertUser {
    pub discord_id: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub role: Role,
}
