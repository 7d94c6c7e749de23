//! Application state shared by every handler.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tribunal_auth::{AuthConfig, AuthError, AuthService, DiscordClient};
use tribunal_db::repository::{
    SurrealCauseRepository, SurrealCitationRepository, SurrealCitizenRepository,
    SurrealConfiscationRepository, SurrealSessionRepository, SurrealUserRepository,
    SurrealVehicleRepository, SurrealWarrantRepository,
};
use tribunal_workflow::{
    CaseRecordService, CauseService, CitizenService, SearchDispatcher, VehicleService,
    WarrantService,
};

pub type Auth = AuthService<SurrealUserRepository<Any>, SurrealSessionRepository<Any>, DiscordClient>;
pub type Causes = CauseService<SurrealCauseRepository<Any>>;
pub type Warrants = WarrantService<SurrealWarrantRepository<Any>, SurrealCauseRepository<Any>>;
pub type Citizens = CitizenService<SurrealCitizenRepository<Any>>;
pub type Vehicles = VehicleService<SurrealVehicleRepository<Any>>;
pub type CaseRecords = CaseRecordService<
    SurrealConfiscationRepository<Any>,
    SurrealCitationRepository<Any>,
    SurrealCauseRepository<Any>,
>;
pub type Search = SearchDispatcher<
    SurrealVehicleRepository<Any>,
    SurrealCitizenRepository<Any>,
    SurrealCauseRepository<Any>,
>;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<Auth>,
    pub causes: Arc<Causes>,
    pub warrants: Arc<Warrants>,
    pub citizens: Arc<Citizens>,
    pub vehicles: Arc<Vehicles>,
    pub case_records: Arc<CaseRecords>,
    pub search: Arc<Search>,
}

impl AppState {
    /// Wire every service onto one database handle.
    pub fn new(db: Surreal<Any>, auth_config: AuthConfig) -> Result<Self, AuthError> {
        let discord = DiscordClient::new(auth_config.discord.clone())?;
        let causes = || SurrealCauseRepository::new(db.clone());
        let citizens = || SurrealCitizenRepository::new(db.clone());
        let vehicles = || SurrealVehicleRepository::new(db.clone());

        Ok(Self {
            auth: Arc::new(AuthService::new(
                SurrealUserRepository::new(db.clone()),
                SurrealSessionRepository::new(db.clone()),
                discord,
                auth_config,
            )),
            causes: Arc::new(CauseService::new(causes())),
            warrants: Arc::new(WarrantService::new(
                SurrealWarrantRepository::new(db.clone()),
                causes(),
            )),
            citizens: Arc::new(CitizenService::new(citizens())),
            vehicles: Arc::new(VehicleService::new(vehicles())),
            case_records: Arc::new(CaseRecordService::new(
                SurrealConfiscationRepository::new(db.clone()),
                SurrealCitationRepository::new(db.clone()),
                causes(),
            )),
            search: Arc::new(SearchDispatcher::new(vehicles(), citizens(), causes())),
        })
    }
}
