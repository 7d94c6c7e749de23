//! Ancillary record stores: citizens, vehicles, and the confiscations and
//! citations attached to a cause.

use tracing::info;
use tribunal_core::error::TribunalResult;
use tribunal_core::models::citation::{Citation, CreateCitation};
use tribunal_core::models::citizen::{BackgroundEntry, Citizen, CreateCitizen};
use tribunal_core::models::confiscation::{Confiscation, CreateConfiscation};
use tribunal_core::models::user::User;
use tribunal_core::models::vehicle::{CreateVehicle, Vehicle};
use tribunal_core::policy::{Action, authorize};
use tribunal_core::repository::{
    CauseRepository, CitationRepository, CitizenRepository, ConfiscationRepository,
    VehicleRepository,
};
use tribunal_core::validation::Schema;
use uuid::Uuid;

use crate::parse_id;

// ---------------------------------------------------------------------------
// Citizens
// ---------------------------------------------------------------------------

pub struct CitizenService<Ci: CitizenRepository> {
    citizens: Ci,
}

impl<Ci: CitizenRepository> CitizenService<Ci> {
    pub fn new(citizens: Ci) -> Self {
        Self { citizens }
    }

    pub async fn create(&self, input: CreateCitizen) -> TribunalResult<Citizen> {
        input.check()?;
        self.citizens.create(input).await
    }

    pub async fn get(&self, national_id: &str) -> TribunalResult<Citizen> {
        self.citizens.get_by_national_id(national_id).await
    }

    pub async fn list(&self) -> TribunalResult<Vec<Citizen>> {
        self.citizens.list().await
    }

    pub async fn append_background(
        &self,
        actor: &User,
        national_id: &str,
        entry: BackgroundEntry,
    ) -> TribunalResult<Citizen> {
        authorize(actor.role, Action::AppendBackground)?;
        entry.check()?;
        let citizen = self.citizens.append_background(national_id, entry).await?;
        info!(national_id = %citizen.national_id, officer = %actor.display_name, "background entry added");
        Ok(citizen)
    }
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

pub struct VehicleService<V: VehicleRepository> {
    vehicles: V,
}

impl<V: VehicleRepository> VehicleService<V> {
    pub fn new(vehicles: V) -> Self {
        Self { vehicles }
    }

    pub async fn create(&self, input: CreateVehicle) -> TribunalResult<Vehicle> {
        input.check()?;
        self.vehicles.create(input).await
    }

    pub async fn get(&self, plate: &str) -> TribunalResult<Vehicle> {
        self.vehicles.get_by_plate(plate).await
    }

    pub async fn list(&self) -> TribunalResult<Vec<Vehicle>> {
        self.vehicles.list().await
    }
}

// ---------------------------------------------------------------------------
// Confiscations and citations
// ---------------------------------------------------------------------------

/// Records filed under a cause. Filing requires the cause to be live.
pub struct CaseRecordService<Co, Ct, C>
where
    Co: ConfiscationRepository,
    Ct: CitationRepository,
    C: CauseRepository,
{
    confiscations: Co,
    citations: Ct,
    causes: C,
}

impl<Co, Ct, C> CaseRecordService<Co, Ct, C>
where
    Co: ConfiscationRepository,
    Ct: CitationRepository,
    C: CauseRepository,
{
    pub fn new(confiscations: Co, citations: Ct, causes: C) -> Self {
        Self {
            confiscations,
            citations,
            causes,
        }
    }

    async fn live_cause(&self, raw: &str) -> TribunalResult<Uuid> {
        let cause = self.causes.get(parse_id("cause", raw)?).await?;
        Ok(cause.id)
    }

    pub async fn create_confiscation(
        &self,
        input: CreateConfiscation,
    ) -> TribunalResult<Confiscation> {
        input.check()?;
        let cause_id = self.live_cause(&input.cause_id).await?;
        self.confiscations.create(cause_id, input).await
    }

    pub async fn confiscations_for(&self, cause_id: Uuid) -> TribunalResult<Vec<Confiscation>> {
        self.confiscations.list_by_cause(cause_id).await
    }

    pub async fn create_citation(&self, input: CreateCitation) -> TribunalResult<Citation> {
        input.check()?;
        let cause_id = self.live_cause(&input.cause_id).await?;
        self.citations.create(cause_id, input).await
    }

    pub async fn citations_for(&self, cause_id: Uuid) -> TribunalResult<Vec<Citation>> {
        self.citations.list_by_cause(cause_id).await
    }
}
