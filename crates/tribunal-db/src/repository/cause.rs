//! SurrealDB implementation of [`CauseRepository`].
//!
//! Every state-changing statement carries its state guard in the `WHERE`
//! clause (`is_deleted = false` for edits and trashing, `is_deleted = true`
//! for restore and purge). An empty result means the guard failed; a
//! follow-up read only decides which error to report.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;
use tribunal_core::error::{TribunalError, TribunalResult};
use tribunal_core::models::cause::{
    Cause, CreateCause, DEFAULT_ORIGIN, DEFAULT_SUBJECT_MATTER, Evidence, UpdateCause,
};
use tribunal_core::repository::CauseRepository;
use uuid::Uuid;

use super::{from_document, matches_query, parse_uuid, parse_wire, to_document};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CauseRow {
    title: Option<String>,
    case_number: String,
    court_roll: Option<String>,
    origin: String,
    subject_matter: String,
    description: String,
    status: String,
    priority: String,
    defendant_id: String,
    prosecutor_id: Option<String>,
    judge_id: Option<String>,
    evidence: serde_json::Value,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CauseRowWithId {
    record_id: String,
    title: Option<String>,
    case_number: String,
    court_roll: Option<String>,
    origin: String,
    subject_matter: String,
    description: String,
    status: String,
    priority: String,
    defendant_id: String,
    prosecutor_id: Option<String>,
    judge_id: Option<String>,
    evidence: serde_json::Value,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct DeletedFlagRow {
    is_deleted: bool,
}

impl CauseRow {
    fn into_cause(self, id: Uuid) -> Result<Cause, DbError> {
        Ok(Cause {
            id,
            title: self.title,
            case_number: self.case_number,
            court_roll: self.court_roll,
            origin: self.origin,
            subject_matter: self.subject_matter,
            description: self.description,
            status: parse_wire("cause status", &self.status)?,
            priority: parse_wire("cause priority", &self.priority)?,
            defendant_id: self.defendant_id,
            prosecutor_id: self.prosecutor_id,
            judge_id: self.judge_id,
            evidence: from_document("cause evidence", self.evidence)?,
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl CauseRowWithId {
    fn try_into_cause(self) -> Result<Cause, DbError> {
        let id = parse_uuid("cause id", &self.record_id)?;
        CauseRow {
            title: self.title,
            case_number: self.case_number,
            court_roll: self.court_roll,
            origin: self.origin,
            subject_matter: self.subject_matter,
            description: self.description,
            status: self.status,
            priority: self.priority,
            defendant_id: self.defendant_id,
            prosecutor_id: self.prosecutor_id,
            judge_id: self.judge_id,
            evidence: self.evidence,
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_cause(id)
    }
}

fn first_cause(rows: Vec<CauseRow>, id: Uuid) -> Result<Option<Cause>, DbError> {
    rows.into_iter().next().map(|row| row.into_cause(id)).transpose()
}

fn collect_causes(rows: Vec<CauseRowWithId>) -> Result<Vec<Cause>, DbError> {
    rows.into_iter()
        .map(CauseRowWithId::try_into_cause)
        .collect()
}

/// `Some("")` clears an optional text field.
fn clearable(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// SurrealDB implementation of the Cause repository.
#[derive(Clone)]
pub struct SurrealCauseRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCauseRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// `Some(is_deleted)` if the record exists at all.
    async fn deleted_flag(&self, id: Uuid) -> Result<Option<bool>, DbError> {
        let mut result = self
            .db
            .query("SELECT is_deleted FROM type::record('cause', $id)")
            .bind(("id", id.to_string()))
            .await?;
        let rows: Vec<DeletedFlagRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.is_deleted))
    }

    async fn list_where(&self, query: &str) -> Result<Vec<Cause>, DbError> {
        let mut result = self.db.query(query.to_string()).await?;
        let rows: Vec<CauseRowWithId> = result.take(0)?;
        collect_causes(rows)
    }
}

impl<C: Connection> CauseRepository for SurrealCauseRepository<C> {
    async fn create(
        &self,
        input: CreateCause,
        prosecutor_id: Option<String>,
    ) -> TribunalResult<Cause> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('cause', $id) SET \
                 title = $title, \
                 case_number = $case_number, \
                 court_roll = $court_roll, \
                 origin = $origin, \
                 subject_matter = $subject_matter, \
                 description = $description, \
                 status = $status, \
                 priority = $priority, \
                 defendant_id = $defendant_id, \
                 prosecutor_id = $prosecutor_id, \
                 judge_id = $judge_id, \
                 is_deleted = false",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title.and_then(clearable)))
            .bind(("case_number", input.case_number))
            .bind(("court_roll", input.court_roll.and_then(clearable)))
            .bind((
                "origin",
                input
                    .origin
                    .and_then(clearable)
                    .unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            ))
            .bind((
                "subject_matter",
                input
                    .subject_matter
                    .and_then(clearable)
                    .unwrap_or_else(|| DEFAULT_SUBJECT_MATTER.to_string()),
            ))
            .bind(("description", input.description))
            .bind((
                "status",
                input.status.unwrap_or_default().as_str().to_string(),
            ))
            .bind((
                "priority",
                input.priority.unwrap_or_default().as_str().to_string(),
            ))
            .bind(("defendant_id", input.defendant_id))
            .bind((
                "prosecutor_id",
                input.prosecutor_id.and_then(clearable).or(prosecutor_id),
            ))
            .bind(("judge_id", input.judge_id.and_then(clearable)))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("cause", &id_str, e))?;

        let rows: Vec<CauseRow> = result.take(0).map_err(DbError::from)?;
        let cause =
            first_cause(rows, id)?.ok_or_else(|| DbError::not_found("cause", &id_str))?;

        info!(cause_id = %id, case_number = %cause.case_number, "Cause created");
        Ok(cause)
    }

    async fn get(&self, id: Uuid) -> TribunalResult<Cause> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('cause', $id) \
                 WHERE is_deleted = false",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CauseRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_cause(rows, id)?.ok_or_else(|| DbError::not_found("cause", id_str))?)
    }

    async fn list(&self) -> TribunalResult<Vec<Cause>> {
        Ok(self
            .list_where(
                "SELECT meta::id(id) AS record_id, * FROM cause \
                 WHERE is_deleted = false ORDER BY created_at DESC",
            )
            .await?)
    }

    async fn update(&self, id: Uuid, input: UpdateCause) -> TribunalResult<Cause> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.case_number.is_some() {
            sets.push("case_number = $case_number");
        }
        if input.court_roll.is_some() {
            sets.push("court_roll = $court_roll");
        }
        if input.origin.is_some() {
            sets.push("origin = $origin");
        }
        if input.subject_matter.is_some() {
            sets.push("subject_matter = $subject_matter");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.priority.is_some() {
            sets.push("priority = $priority");
        }
        if input.defendant_id.is_some() {
            sets.push("defendant_id = $defendant_id");
        }
        if input.prosecutor_id.is_some() {
            sets.push("prosecutor_id = $prosecutor_id");
        }
        if input.judge_id.is_some() {
            sets.push("judge_id = $judge_id");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('cause', $id) SET {} \
             WHERE is_deleted = false",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", clearable(title)));
        }
        if let Some(case_number) = input.case_number {
            builder = builder.bind(("case_number", case_number));
        }
        if let Some(court_roll) = input.court_roll {
            builder = builder.bind(("court_roll", clearable(court_roll)));
        }
        if let Some(origin) = input.origin {
            builder = builder.bind((
                "origin",
                clearable(origin).unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
            ));
        }
        if let Some(subject_matter) = input.subject_matter {
            builder = builder.bind((
                "subject_matter",
                clearable(subject_matter).unwrap_or_else(|| DEFAULT_SUBJECT_MATTER.to_string()),
            ));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(priority) = input.priority {
            builder = builder.bind(("priority", priority.as_str().to_string()));
        }
        if let Some(defendant_id) = input.defendant_id {
            builder = builder.bind(("defendant_id", defendant_id));
        }
        if let Some(prosecutor_id) = input.prosecutor_id {
            builder = builder.bind(("prosecutor_id", clearable(prosecutor_id)));
        }
        if let Some(judge_id) = input.judge_id {
            builder = builder.bind(("judge_id", clearable(judge_id)));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::statement("cause", &id_str, e))?;

        let rows: Vec<CauseRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_cause(rows, id)?.ok_or_else(|| DbError::not_found("cause", id_str))?)
    }

    async fn soft_delete(&self, id: Uuid) -> TribunalResult<Cause> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('cause', $id) SET \
                 is_deleted = true, deleted_at = time::now() \
                 WHERE is_deleted = false",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CauseRow> = result.take(0).map_err(DbError::from)?;
        let cause = first_cause(rows, id)?.ok_or_else(|| DbError::not_found("cause", &id_str))?;

        info!(cause_id = %id, "Cause moved to trash");
        Ok(cause)
    }

    async fn restore(&self, id: Uuid) -> TribunalResult<Cause> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('cause', $id) SET \
                 is_deleted = false, deleted_at = NONE \
                 WHERE is_deleted = true",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CauseRow> = result.take(0).map_err(DbError::from)?;
        if let Some(cause) = first_cause(rows, id)? {
            info!(cause_id = %id, "Cause restored");
            return Ok(cause);
        }

        match self.deleted_flag(id).await? {
            Some(_) => Err(TribunalError::conflict("cause is not in the trash")),
            None => Err(DbError::not_found("cause", id_str).into()),
        }
    }

    async fn permanent_delete(&self, id: Uuid) -> TribunalResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "DELETE type::record('cause', $id) \
                 WHERE is_deleted = true RETURN BEFORE",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DeletedFlagRow> = result.take(0).map_err(DbError::from)?;
        if !rows.is_empty() {
            info!(cause_id = %id, "Cause permanently deleted");
            return Ok(());
        }

        match self.deleted_flag(id).await? {
            Some(_) => Err(TribunalError::conflict(
                "only causes in the trash can be permanently deleted",
            )),
            None => Err(DbError::not_found("cause", id_str).into()),
        }
    }

    async fn list_deleted(&self) -> TribunalResult<Vec<Cause>> {
        Ok(self
            .list_where(
                "SELECT meta::id(id) AS record_id, * FROM cause \
                 WHERE is_deleted = true ORDER BY deleted_at DESC",
            )
            .await?)
    }

    async fn search(&self, query: &str) -> TribunalResult<Vec<Cause>> {
        let live = self.list().await?;
        Ok(live
            .into_iter()
            .filter(|c| {
                matches_query(
                    query,
                    [
                        c.case_number.as_str(),
                        c.court_roll.as_deref().unwrap_or_default(),
                        c.description.as_str(),
                        c.defendant_id.as_str(),
                    ],
                )
            })
            .collect())
    }

    async fn add_evidence(&self, id: Uuid, evidence: Evidence) -> TribunalResult<Cause> {
        let id_str = id.to_string();
        let item = to_document("cause evidence", &evidence)?;

        let mut result = self
            .db
            .query(
                "UPDATE type::record('cause', $id) SET \
                 evidence = array::append(evidence, $item), \
                 updated_at = time::now() \
                 WHERE is_deleted = false",
            )
            .bind(("id", id_str.clone()))
            .bind(("item", item))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CauseRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_cause(rows, id)?.ok_or_else(|| DbError::not_found("cause", id_str))?)
    }
}
