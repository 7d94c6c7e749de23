//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups of a missing record return
//! [`TribunalError::NotFound`](crate::error::TribunalError::NotFound);
//! state-guarded writes on a record in the wrong state return
//! [`TribunalError::Conflict`](crate::error::TribunalError::Conflict).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::TribunalResult;
use crate::models::{
    cause::{Cause, CreateCause, Evidence, UpdateCause},
    citation::{Citation, CreateCitation},
    citizen::{BackgroundEntry, Citizen, CreateCitizen},
    confiscation::{Confiscation, CreateConfiscation},
    session::{CreateSession, Session},
    user::{UpsertUser, User},
    vehicle::{CreateVehicle, Vehicle},
    warrant::{CreateWarrant, Warrant, WarrantTransition},
};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TribunalResult<User>> + Send;
    fn get_by_discord_id(
        &self,
        discord_id: &str,
    ) -> impl Future<Output = TribunalResult<User>> + Send;
    /// Create the user or overwrite the stored fields, keyed by
    /// `discord_id`.
    fn upsert(&self, input: UpsertUser) -> impl Future<Output = TribunalResult<User>> + Send;
}

pub trait SessionRepository: Send + Sync {
    fn create(&self, input: CreateSession) -> impl Future<Output = TribunalResult<Session>> + Send;
    fn get_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = TribunalResult<Session>> + Send;
    fn invalidate(&self, id: Uuid) -> impl Future<Output = TribunalResult<()>> + Send;
    /// Remove all expired sessions; returns how many were removed.
    fn cleanup_expired(&self) -> impl Future<Output = TribunalResult<u64>> + Send;
}

// ---------------------------------------------------------------------------
// Causes
// ---------------------------------------------------------------------------

/// Cause lifecycle store.
///
/// Live and trashed causes are disjoint views: everything except
/// [`list_deleted`](Self::list_deleted), [`restore`](Self::restore) and
/// [`permanent_delete`](Self::permanent_delete) treats a trashed cause as
/// absent.
pub trait CauseRepository: Send + Sync {
    /// `prosecutor_id` is stored when the input does not carry one.
    fn create(
        &self,
        input: CreateCause,
        prosecutor_id: Option<String>,
    ) -> impl Future<Output = TribunalResult<Cause>> + Send;
    fn get(&self, id: Uuid) -> impl Future<Output = TribunalResult<Cause>> + Send;
    /// Live causes, newest first.
    fn list(&self) -> impl Future<Output = TribunalResult<Vec<Cause>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateCause,
    ) -> impl Future<Output = TribunalResult<Cause>> + Send;
    fn soft_delete(&self, id: Uuid) -> impl Future<Output = TribunalResult<Cause>> + Send;
    fn restore(&self, id: Uuid) -> impl Future<Output = TribunalResult<Cause>> + Send;
    fn permanent_delete(&self, id: Uuid) -> impl Future<Output = TribunalResult<()>> + Send;
    /// Trashed causes, most recently deleted first.
    fn list_deleted(&self) -> impl Future<Output = TribunalResult<Vec<Cause>>> + Send;
    /// Case-insensitive substring search over live causes.
    fn search(&self, query: &str) -> impl Future<Output = TribunalResult<Vec<Cause>>> + Send;
    fn add_evidence(
        &self,
        id: Uuid,
        evidence: Evidence,
    ) -> impl Future<Output = TribunalResult<Cause>> + Send;
}

// ---------------------------------------------------------------------------
// Warrants
// ---------------------------------------------------------------------------

pub trait WarrantRepository: Send + Sync {
    fn create(&self, input: CreateWarrant) -> impl Future<Output = TribunalResult<Warrant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TribunalResult<Warrant>> + Send;
    fn list_by_cause(
        &self,
        cause_id: Uuid,
    ) -> impl Future<Output = TribunalResult<Vec<Warrant>>> + Send;
    /// Pending warrants, oldest first.
    fn list_pending(&self) -> impl Future<Output = TribunalResult<Vec<Warrant>>> + Send;
    /// Apply `transition` iff the warrant is still pending.
    ///
    /// Implementations must make the pending check and the write a single
    /// atomic step, so that of two concurrent callers at most one succeeds.
    fn transition(
        &self,
        id: Uuid,
        transition: WarrantTransition,
        at: DateTime<Utc>,
    ) -> impl Future<Output = TribunalResult<Warrant>> + Send;
}

// ---------------------------------------------------------------------------
// Ancillary records
// ---------------------------------------------------------------------------

pub trait CitizenRepository: Send + Sync {
    fn create(&self, input: CreateCitizen) -> impl Future<Output = TribunalResult<Citizen>> + Send;
    fn get_by_national_id(
        &self,
        national_id: &str,
    ) -> impl Future<Output = TribunalResult<Citizen>> + Send;
    fn list(&self) -> impl Future<Output = TribunalResult<Vec<Citizen>>> + Send;
    fn search(&self, query: &str) -> impl Future<Output = TribunalResult<Vec<Citizen>>> + Send;
    fn append_background(
        &self,
        national_id: &str,
        entry: BackgroundEntry,
    ) -> impl Future<Output = TribunalResult<Citizen>> + Send;
}

pub trait VehicleRepository: Send + Sync {
    fn create(&self, input: CreateVehicle) -> impl Future<Output = TribunalResult<Vehicle>> + Send;
    fn get_by_plate(&self, plate: &str) -> impl Future<Output = TribunalResult<Vehicle>> + Send;
    fn list(&self) -> impl Future<Output = TribunalResult<Vec<Vehicle>>> + Send;
    fn search(&self, query: &str) -> impl Future<Output = TribunalResult<Vec<Vehicle>>> + Send;
}

pub trait ConfiscationRepository: Send + Sync {
    fn create(
        &self,
        cause_id: Uuid,
        input: CreateConfiscation,
    ) -> impl Future<Output = TribunalResult<Confiscation>> + Send;
    fn list_by_cause(
        &self,
        cause_id: Uuid,
    ) -> impl Future<Output = TribunalResult<Vec<Confiscation>>> + Send;
}

pub trait CitationRepository: Send + Sync {
    fn create(
        &self,
        cause_id: Uuid,
        input: CreateCitation,
    ) -> impl Future<Output = TribunalResult<Citation>> + Send;
    fn list_by_cause(
        &self,
        cause_id: Uuid,
    ) -> impl Future<Output = TribunalResult<Vec<Citation>>> + Send;
}
