//! Demo records for local development.

use surrealdb::{Connection, Surreal};
use tracing::info;
use tribunal_core::error::TribunalResult;
use tribunal_core::models::cause::{CauseStatus, CreateCause};
use tribunal_core::models::citizen::{CreateCitizen, LegacyCitizen};
use tribunal_core::models::vehicle::CreateVehicle;
use tribunal_core::repository::{CauseRepository, CitizenRepository, VehicleRepository};

use crate::repository::{
    SurrealCauseRepository, SurrealCitizenRepository, SurrealVehicleRepository,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub citizens: usize,
    pub vehicles: usize,
    pub causes: usize,
}

fn demo_citizens() -> Vec<CreateCitizen> {
    [
        ("12.345.678-9", "Juan Carlos Pérez González", Some("Sin antecedentes penales")),
        ("11.222.333-4", "María Fernanda López Soto", None),
        (
            "9.876.543-2",
            "Roberto Andrés Muñoz Vera",
            Some("Falta menor - Conducción sin licencia (2023)"),
        ),
    ]
    .into_iter()
    .map(|(rut, nombre, antecedentes)| {
        CreateCitizen::from(LegacyCitizen {
            rut: rut.into(),
            nombre: nombre.into(),
            antecedentes: antecedentes.map(Into::into),
        })
    })
    .collect()
}

fn demo_vehicles() -> Vec<CreateVehicle> {
    [
        ("ABCD12", "Toyota", "Corolla 2022", "12.345.678-9"),
        ("WXYZ99", "Chevrolet", "Spark 2021", "11.222.333-4"),
        ("QRST45", "Ford", "Ranger 2023", "9.876.543-2"),
    ]
    .into_iter()
    .map(|(plate, make, model, owner)| CreateVehicle {
        plate: plate.into(),
        make: Some(make.into()),
        model: model.into(),
        color: None,
        owner_national_id: owner.into(),
        status: None,
    })
    .collect()
}

/// Oldest first, so the newest-first listing matches the demo narrative.
fn demo_causes() -> Vec<CreateCause> {
    [
        (
            "2300111222-3",
            None,
            "Hurto simple de especies desde vehículo estacionado.",
            CauseStatus::Closed,
            "11.222.333-4",
        ),
        (
            "2300654321-0",
            Some("O-456-2024"),
            "Lesiones leves en riña callejera ocurrida el día 15 de noviembre de 2024 \
             en sector centro.",
            CauseStatus::UnderInvestigation,
            "12.345.678-9",
        ),
        (
            "2300123456-7",
            Some("O-123-2024"),
            "Robo con intimidación en local comercial ubicado en Av. Principal 1234. \
             El imputado habría ingresado al establecimiento portando arma blanca.",
            CauseStatus::Judicialized,
            "9.876.543-2",
        ),
    ]
    .into_iter()
    .map(|(ruc, rit, description, status, defendant)| CreateCause {
        case_number: ruc.into(),
        court_roll: rit.map(Into::into),
        description: description.into(),
        status: Some(status),
        defendant_id: defendant.into(),
        ..Default::default()
    })
    .collect()
}

/// Insert the demo citizens, vehicles and causes into an empty database.
///
/// Does nothing if any citizen already exists.
pub async fn seed_demo<C: Connection>(db: &Surreal<C>) -> TribunalResult<SeedSummary> {
    let citizens = SurrealCitizenRepository::new(db.clone());
    if !citizens.list().await?.is_empty() {
        info!("Database already populated, skipping demo seed");
        return Ok(SeedSummary::default());
    }
    let vehicles = SurrealVehicleRepository::new(db.clone());
    let causes = SurrealCauseRepository::new(db.clone());

    let mut summary = SeedSummary::default();
    for input in demo_citizens() {
        citizens.create(input).await?;
        summary.citizens += 1;
    }
    for input in demo_vehicles() {
        vehicles.create(input).await?;
        summary.vehicles += 1;
    }
    for input in demo_causes() {
        causes.create(input, None).await?;
        summary.causes += 1;
    }

    info!(
        citizens = summary.citizens,
        vehicles = summary.vehicles,
        causes = summary.causes,
        "Demo data seeded"
    );
    Ok(summary)
}
