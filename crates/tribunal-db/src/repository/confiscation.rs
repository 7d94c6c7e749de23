//! SurrealDB implementation of [`ConfiscationRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tribunal_core::error::TribunalResult;
use tribunal_core::models::confiscation::{Confiscation, CreateConfiscation};
use tribunal_core::repository::ConfiscationRepository;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ConfiscationRowWithId {
    record_id: String,
    cause_id: String,
    description: String,
    items: String,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

impl ConfiscationRowWithId {
    fn try_into_confiscation(self) -> Result<Confiscation, DbError> {
        Ok(Confiscation {
            id: parse_uuid("confiscation id", &self.record_id)?,
            cause_id: parse_uuid("confiscation cause id", &self.cause_id)?,
            description: self.description,
            items: self.items,
            location: self.location,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Confiscation repository.
#[derive(Clone)]
pub struct SurrealConfiscationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealConfiscationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ConfiscationRepository for SurrealConfiscationRepository<C> {
    async fn create(
        &self,
        cause_id: Uuid,
        input: CreateConfiscation,
    ) -> TribunalResult<Confiscation> {
        let id_str = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('confiscation', $id) SET \
                 cause_id = $cause_id, \
                 description = $description, \
                 items = $items, \
                 location = $location; \
                 SELECT meta::id(id) AS record_id, * FROM type::record('confiscation', $id);",
            )
            .bind(("id", id_str.clone()))
            .bind(("cause_id", cause_id.to_string()))
            .bind(("description", input.description))
            .bind(("items", input.items))
            .bind(("location", input.location))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("confiscation", &id_str, e))?;

        let rows: Vec<ConfiscationRowWithId> = result.take(1).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("confiscation", id_str))?;

        Ok(row.try_into_confiscation()?)
    }

    async fn list_by_cause(&self, cause_id: Uuid) -> TribunalResult<Vec<Confiscation>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM confiscation \
                 WHERE cause_id = $cause_id ORDER BY created_at DESC",
            )
            .bind(("cause_id", cause_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ConfiscationRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(ConfiscationRowWithId::try_into_confiscation)
            .collect::<Result<Vec<_>, DbError>>()?)
    }
}
