//! SurrealDB implementation of [`WarrantRepository`].
//!
//! Transitions are a compare-and-swap on `status = 'pendiente'`: the guard
//! and the write are one `UPDATE ... WHERE` statement, so of two concurrent
//! resolutions at most one applies.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{info, warn};
use tribunal_core::error::{TribunalError, TribunalResult};
use tribunal_core::models::warrant::{CreateWarrant, Warrant, WarrantStatus, WarrantTransition};
use tribunal_core::repository::WarrantRepository;
use uuid::Uuid;

use super::{parse_uuid, parse_wire};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct WarrantRow {
    cause_id: String,
    warrant_type: String,
    target: String,
    reason: String,
    status: String,
    requested_by: String,
    signed_by: Option<String>,
    rejection_reason: Option<String>,
    created_at: DateTime<Utc>,
    signed_at: Option<DateTime<Utc>>,
    resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, SurrealValue)]
struct WarrantRowWithId {
    record_id: String,
    cause_id: String,
    warrant_type: String,
    target: String,
    reason: String,
    status: String,
    requested_by: String,
    signed_by: Option<String>,
    rejection_reason: Option<String>,
    created_at: DateTime<Utc>,
    signed_at: Option<DateTime<Utc>>,
    resolved_at: Option<DateTime<Utc>>,
}

impl WarrantRow {
    fn into_warrant(self, id: Uuid) -> Result<Warrant, DbError> {
        Ok(Warrant {
            id,
            cause_id: parse_uuid("warrant cause id", &self.cause_id)?,
            warrant_type: parse_wire("warrant type", &self.warrant_type)?,
            target: self.target,
            reason: self.reason,
            status: parse_wire("warrant status", &self.status)?,
            requested_by: self.requested_by,
            signed_by: self.signed_by,
            rejection_reason: self.rejection_reason,
            created_at: self.created_at,
            signed_at: self.signed_at,
            resolved_at: self.resolved_at,
        })
    }
}

impl WarrantRowWithId {
    fn try_into_warrant(self) -> Result<Warrant, DbError> {
        let id = parse_uuid("warrant id", &self.record_id)?;
        WarrantRow {
            cause_id: self.cause_id,
            warrant_type: self.warrant_type,
            target: self.target,
            reason: self.reason,
            status: self.status,
            requested_by: self.requested_by,
            signed_by: self.signed_by,
            rejection_reason: self.rejection_reason,
            created_at: self.created_at,
            signed_at: self.signed_at,
            resolved_at: self.resolved_at,
        }
        .into_warrant(id)
    }
}

/// SurrealDB implementation of the Warrant repository.
#[derive(Clone)]
pub struct SurrealWarrantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealWarrantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find(&self, id: Uuid) -> Result<Option<Warrant>, DbError> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('warrant', $id)")
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<WarrantRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(|row| row.into_warrant(id))
            .transpose()
    }

    async fn list_where(
        &self,
        query: &'static str,
        bindings: Option<(&'static str, String)>,
    ) -> Result<Vec<Warrant>, DbError> {
        let mut builder = self.db.query(query);
        if let Some(binding) = bindings {
            builder = builder.bind(binding);
        }
        let mut result = builder.await?;
        let rows: Vec<WarrantRowWithId> = result.take(0)?;
        rows.into_iter()
            .map(WarrantRowWithId::try_into_warrant)
            .collect()
    }

    /// Why a transition that matched no pending record failed.
    async fn explain_missed_transition(&self, id: Uuid) -> TribunalError {
        match self.find(id).await {
            Ok(Some(current)) => TribunalError::conflict(format!(
                "warrant is already {}",
                current.status
            )),
            Ok(None) => DbError::not_found("warrant", id).into(),
            Err(e) => e.into(),
        }
    }
}

impl<C: Connection> WarrantRepository for SurrealWarrantRepository<C> {
    async fn create(&self, input: CreateWarrant) -> TribunalResult<Warrant> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('warrant', $id) SET \
                 cause_id = $cause_id, \
                 warrant_type = $warrant_type, \
                 target = $target, \
                 reason = $reason, \
                 status = $status, \
                 requested_by = $requested_by",
            )
            .bind(("id", id_str.clone()))
            .bind(("cause_id", input.cause_id.to_string()))
            .bind(("warrant_type", input.warrant_type.as_str().to_string()))
            .bind(("target", input.target))
            .bind(("reason", input.reason))
            .bind(("status", WarrantStatus::Pending.as_str().to_string()))
            .bind(("requested_by", input.requested_by))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("warrant", &id_str, e))?;

        let rows: Vec<WarrantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("warrant", id_str))?;

        Ok(row.into_warrant(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> TribunalResult<Warrant> {
        Ok(self
            .find(id)
            .await?
            .ok_or_else(|| DbError::not_found("warrant", id))?)
    }

    async fn list_by_cause(&self, cause_id: Uuid) -> TribunalResult<Vec<Warrant>> {
        Ok(self
            .list_where(
                "SELECT meta::id(id) AS record_id, * FROM warrant \
                 WHERE cause_id = $cause_id ORDER BY created_at DESC",
                Some(("cause_id", cause_id.to_string())),
            )
            .await?)
    }

    async fn list_pending(&self) -> TribunalResult<Vec<Warrant>> {
        Ok(self
            .list_where(
                "SELECT meta::id(id) AS record_id, * FROM warrant \
                 WHERE status = 'pendiente' ORDER BY created_at ASC",
                None,
            )
            .await?)
    }

    async fn transition(
        &self,
        id: Uuid,
        transition: WarrantTransition,
        at: DateTime<Utc>,
    ) -> TribunalResult<Warrant> {
        let status = transition.target_status();

        let builder = match transition {
            WarrantTransition::Approve { signed_by } => self
                .db
                .query(
                    "UPDATE type::record('warrant', $id) SET \
                     status = $status, signed_by = $signed_by, \
                     signed_at = $at, resolved_at = $at \
                     WHERE status = 'pendiente'",
                )
                .bind(("signed_by", signed_by)),
            WarrantTransition::Reject { reason } => self
                .db
                .query(
                    "UPDATE type::record('warrant', $id) SET \
                     status = $status, rejection_reason = $reason, \
                     resolved_at = $at \
                     WHERE status = 'pendiente'",
                )
                .bind(("reason", reason)),
        };

        let outcome = builder
            .bind(("id", id.to_string()))
            .bind(("status", status.as_str().to_string()))
            .bind(("at", at))
            .await
            .and_then(|mut response| {
                let rows: Vec<WarrantRow> = response.take(0)?;
                Ok(rows)
            });

        let rows = match outcome {
            Ok(rows) => rows,
            // A write conflict with a concurrent resolution surfaces as a
            // failed statement; the loser reports the state it lost to.
            Err(e) => {
                warn!(warrant_id = %id, error = %e, "Warrant transition statement failed");
                return Err(match self.find(id).await? {
                    Some(current) if current.status.is_terminal() => TribunalError::conflict(
                        format!("warrant is already {}", current.status),
                    ),
                    _ => DbError::from(e).into(),
                });
            }
        };

        match rows.into_iter().next() {
            Some(row) => {
                let warrant = row.into_warrant(id)?;
                info!(warrant_id = %id, status = %warrant.status, "Warrant resolved");
                Ok(warrant)
            }
            None => Err(self.explain_missed_transition(id).await),
        }
    }
}
