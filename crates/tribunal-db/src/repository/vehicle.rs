//! SurrealDB implementation of [`VehicleRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tribunal_core::error::TribunalResult;
use tribunal_core::models::vehicle::{CreateVehicle, Vehicle, VehicleStatus, normalize_plate};
use tribunal_core::repository::VehicleRepository;
use uuid::Uuid;

use super::{matches_query, parse_uuid, parse_wire};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct VehicleRow {
    plate: String,
    make: Option<String>,
    model: String,
    color: Option<String>,
    owner_national_id: String,
    status: String,
    stolen_report: bool,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct VehicleRowWithId {
    record_id: String,
    plate: String,
    make: Option<String>,
    model: String,
    color: Option<String>,
    owner_national_id: String,
    status: String,
    stolen_report: bool,
    created_at: DateTime<Utc>,
}

impl VehicleRow {
    fn into_vehicle(self, id: Uuid) -> Result<Vehicle, DbError> {
        Ok(Vehicle {
            id,
            plate: self.plate,
            make: self.make,
            model: self.model,
            color: self.color,
            owner_national_id: self.owner_national_id,
            status: parse_wire("vehicle status", &self.status)?,
            stolen_report: self.stolen_report,
            created_at: self.created_at,
        })
    }
}

impl VehicleRowWithId {
    fn try_into_vehicle(self) -> Result<Vehicle, DbError> {
        let id = parse_uuid("vehicle id", &self.record_id)?;
        VehicleRow {
            plate: self.plate,
            make: self.make,
            model: self.model,
            color: self.color,
            owner_national_id: self.owner_national_id,
            status: self.status,
            stolen_report: self.stolen_report,
            created_at: self.created_at,
        }
        .into_vehicle(id)
    }
}

/// SurrealDB implementation of the Vehicle repository.
#[derive(Clone)]
pub struct SurrealVehicleRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealVehicleRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find(&self, plate: &str) -> Result<Option<Vehicle>, DbError> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM vehicle WHERE plate = $plate")
            .bind(("plate", normalize_plate(plate)))
            .await?;

        let rows: Vec<VehicleRowWithId> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(VehicleRowWithId::try_into_vehicle)
            .transpose()
    }
}

impl<C: Connection> VehicleRepository for SurrealVehicleRepository<C> {
    async fn create(&self, input: CreateVehicle) -> TribunalResult<Vehicle> {
        let plate = normalize_plate(&input.plate);
        if self.find(&plate).await?.is_some() {
            return Err(DbError::Duplicate {
                entity: "vehicle".into(),
                key: plate,
            }
            .into());
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let status = input.status.unwrap_or_default();

        let result = self
            .db
            .query(
                "CREATE type::record('vehicle', $id) SET \
                 plate = $plate, \
                 make = $make, \
                 model = $model, \
                 color = $color, \
                 owner_national_id = $owner_national_id, \
                 status = $status, \
                 stolen_report = $stolen_report",
            )
            .bind(("id", id_str.clone()))
            .bind(("plate", plate.clone()))
            .bind(("make", input.make))
            .bind(("model", input.model))
            .bind(("color", input.color))
            .bind(("owner_national_id", input.owner_national_id))
            .bind(("status", status.as_str().to_string()))
            .bind(("stolen_report", status == VehicleStatus::Stolen))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("vehicle", &plate, e))?;

        let rows: Vec<VehicleRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("vehicle", id_str))?;

        Ok(row.into_vehicle(id)?)
    }

    async fn get_by_plate(&self, plate: &str) -> TribunalResult<Vehicle> {
        Ok(self
            .find(plate)
            .await?
            .ok_or_else(|| DbError::not_found("vehicle", normalize_plate(plate)))?)
    }

    async fn list(&self) -> TribunalResult<Vec<Vehicle>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM vehicle ORDER BY plate ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VehicleRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(VehicleRowWithId::try_into_vehicle)
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn search(&self, query: &str) -> TribunalResult<Vec<Vehicle>> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|v| {
                matches_query(
                    query,
                    [
                        v.plate.as_str(),
                        v.make.as_deref().unwrap_or_default(),
                        v.model.as_str(),
                        v.owner_national_id.as_str(),
                    ],
                )
            })
            .collect())
    }
}
