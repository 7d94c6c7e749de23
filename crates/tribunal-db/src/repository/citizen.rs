//! SurrealDB implementation of [`CitizenRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tribunal_core::error::TribunalResult;
use tribunal_core::models::citizen::{
    BackgroundEntry, CITIZEN_SCHEMA_VERSION, Citizen, CreateCitizen,
};
use tribunal_core::repository::CitizenRepository;
use uuid::Uuid;

use super::{from_document, matches_query, parse_uuid, to_document};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CitizenRow {
    schema_version: u32,
    national_id: String,
    full_name: String,
    nationality: Option<String>,
    notes: Option<String>,
    background: serde_json::Value,
    licenses: serde_json::Value,
    fines: serde_json::Value,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CitizenRowWithId {
    record_id: String,
    schema_version: u32,
    national_id: String,
    full_name: String,
    nationality: Option<String>,
    notes: Option<String>,
    background: serde_json::Value,
    licenses: serde_json::Value,
    fines: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl CitizenRow {
    fn into_citizen(self, id: Uuid) -> Result<Citizen, DbError> {
        Ok(Citizen {
            id,
            schema_version: self.schema_version,
            national_id: self.national_id,
            full_name: self.full_name,
            nationality: self.nationality,
            notes: self.notes,
            background: from_document("citizen background", self.background)?,
            licenses: from_document("citizen licenses", self.licenses)?,
            fines: from_document("citizen fines", self.fines)?,
            created_at: self.created_at,
        })
    }
}

impl CitizenRowWithId {
    fn try_into_citizen(self) -> Result<Citizen, DbError> {
        let id = parse_uuid("citizen id", &self.record_id)?;
        CitizenRow {
            schema_version: self.schema_version,
            national_id: self.national_id,
            full_name: self.full_name,
            nationality: self.nationality,
            notes: self.notes,
            background: self.background,
            licenses: self.licenses,
            fines: self.fines,
            created_at: self.created_at,
        }
        .into_citizen(id)
    }
}

/// SurrealDB implementation of the Citizen repository.
#[derive(Clone)]
pub struct SurrealCitizenRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCitizenRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find(&self, national_id: &str) -> Result<Option<Citizen>, DbError> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM citizen \
                 WHERE national_id = $national_id",
            )
            .bind(("national_id", national_id.trim().to_string()))
            .await?;

        let rows: Vec<CitizenRowWithId> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(CitizenRowWithId::try_into_citizen)
            .transpose()
    }
}

impl<C: Connection> CitizenRepository for SurrealCitizenRepository<C> {
    async fn create(&self, input: CreateCitizen) -> TribunalResult<Citizen> {
        let national_id = input.national_id.trim().to_string();
        if self.find(&national_id).await?.is_some() {
            return Err(DbError::Duplicate {
                entity: "citizen".into(),
                key: national_id,
            }
            .into());
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let licenses = to_document("citizen licenses", &input.licenses)?;
        let fines = to_document("citizen fines", &input.fines)?;

        let result = self
            .db
            .query(
                "CREATE type::record('citizen', $id) SET \
                 schema_version = $schema_version, \
                 national_id = $national_id, \
                 full_name = $full_name, \
                 nationality = $nationality, \
                 notes = $notes, \
                 licenses = $licenses, \
                 fines = $fines",
            )
            .bind(("id", id_str.clone()))
            .bind(("schema_version", CITIZEN_SCHEMA_VERSION))
            .bind(("national_id", national_id.clone()))
            .bind(("full_name", input.full_name))
            .bind(("nationality", input.nationality))
            .bind(("notes", input.notes))
            .bind(("licenses", licenses))
            .bind(("fines", fines))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("citizen", &national_id, e))?;

        let rows: Vec<CitizenRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("citizen", id_str))?;

        Ok(row.into_citizen(id)?)
    }

    async fn get_by_national_id(&self, national_id: &str) -> TribunalResult<Citizen> {
        Ok(self
            .find(national_id)
            .await?
            .ok_or_else(|| DbError::not_found("citizen", national_id))?)
    }

    async fn list(&self) -> TribunalResult<Vec<Citizen>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM citizen ORDER BY full_name ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CitizenRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(CitizenRowWithId::try_into_citizen)
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn search(&self, query: &str) -> TribunalResult<Vec<Citizen>> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|c| matches_query(query, [c.national_id.as_str(), c.full_name.as_str()]))
            .collect())
    }

    async fn append_background(
        &self,
        national_id: &str,
        entry: BackgroundEntry,
    ) -> TribunalResult<Citizen> {
        let citizen = self
            .find(national_id)
            .await?
            .ok_or_else(|| DbError::not_found("citizen", national_id))?;
        let item = to_document("citizen background", &entry)?;

        let mut result = self
            .db
            .query(
                "UPDATE type::record('citizen', $id) SET \
                 background = array::append(background, $item)",
            )
            .bind(("id", citizen.id.to_string()))
            .bind(("item", item))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CitizenRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("citizen", national_id))?;

        Ok(row.into_citizen(citizen.id)?)
    }
}
