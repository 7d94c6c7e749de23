//! SurrealDB implementation of [`CitationRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tribunal_core::error::TribunalResult;
use tribunal_core::models::citation::{Citation, CreateCitation};
use tribunal_core::repository::CitationRepository;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CitationRowWithId {
    record_id: String,
    cause_id: String,
    cited_national_id: String,
    hearing_date: String,
    hearing_time: String,
    place: String,
    reason: String,
    created_at: DateTime<Utc>,
}

impl CitationRowWithId {
    fn try_into_citation(self) -> Result<Citation, DbError> {
        Ok(Citation {
            id: parse_uuid("citation id", &self.record_id)?,
            cause_id: parse_uuid("citation cause id", &self.cause_id)?,
            cited_national_id: self.cited_national_id,
            date: self.hearing_date,
            time: self.hearing_time,
            place: self.place,
            reason: self.reason,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Citation repository.
#[derive(Clone)]
pub struct SurrealCitationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCitationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CitationRepository for SurrealCitationRepository<C> {
    async fn create(&self, cause_id: Uuid, input: CreateCitation) -> TribunalResult<Citation> {
        let id_str = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('citation', $id) SET \
                 cause_id = $cause_id, \
                 cited_national_id = $cited_national_id, \
                 hearing_date = $hearing_date, \
                 hearing_time = $hearing_time, \
                 place = $place, \
                 reason = $reason; \
                 SELECT meta::id(id) AS record_id, * FROM type::record('citation', $id);",
            )
            .bind(("id", id_str.clone()))
            .bind(("cause_id", cause_id.to_string()))
            .bind(("cited_national_id", input.cited_national_id))
            .bind(("hearing_date", input.date))
            .bind(("hearing_time", input.time))
            .bind(("place", input.place))
            .bind(("reason", input.reason))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("citation", &id_str, e))?;

        let rows: Vec<CitationRowWithId> = result.take(1).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("citation", id_str))?;

        Ok(row.try_into_citation()?)
    }

    async fn list_by_cause(&self, cause_id: Uuid) -> TribunalResult<Vec<Citation>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM citation \
                 WHERE cause_id = $cause_id ORDER BY created_at DESC",
            )
            .bind(("cause_id", cause_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CitationRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(CitationRowWithId::try_into_citation)
            .collect::<Result<Vec<_>, DbError>>()?)
    }
}
