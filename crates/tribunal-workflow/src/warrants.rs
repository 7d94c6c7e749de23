//! Warrant workflow: prosecutors request, judges sign or reject.
//!
//! Resolution is delegated to [`WarrantRepository::transition`], which
//! applies the change only while the warrant is still pending.

use chrono::Utc;
use tracing::info;
use tribunal_core::error::{TribunalError, TribunalResult};
use tribunal_core::models::user::User;
use tribunal_core::models::warrant::{
    CreateWarrant, RejectWarrant, RequestWarrant, Warrant, WarrantTransition,
};
use tribunal_core::policy::{Action, authorize};
use tribunal_core::repository::{CauseRepository, WarrantRepository};
use tribunal_core::validation::Schema;
use uuid::Uuid;

use crate::parse_id;

pub struct WarrantService<W: WarrantRepository, C: CauseRepository> {
    warrants: W,
    causes: C,
}

impl<W: WarrantRepository, C: CauseRepository> WarrantService<W, C> {
    pub fn new(warrants: W, causes: C) -> Self {
        Self { warrants, causes }
    }

    /// File a warrant request against a live cause. The requester is
    /// always the acting user.
    pub async fn request(&self, actor: &User, input: RequestWarrant) -> TribunalResult<Warrant> {
        authorize(actor.role, Action::RequestWarrant)?;
        input.check()?;
        let target = input.target.trim();
        if target.is_empty() {
            return Err(TribunalError::validation("Target is required"));
        }
        let Some(warrant_type) = input.warrant_type else {
            return Err(TribunalError::validation("Warrant type is required"));
        };

        let cause = self
            .causes
            .get(parse_id("cause", &input.cause_id)?)
            .await?;

        let warrant = self
            .warrants
            .create(CreateWarrant {
                cause_id: cause.id,
                warrant_type,
                target: target.to_string(),
                reason: input.reason,
                requested_by: actor.display_name.clone(),
            })
            .await?;
        info!(
            warrant_id = %warrant.id,
            cause_id = %cause.id,
            warrant_type = %warrant.warrant_type,
            requested_by = %warrant.requested_by,
            "warrant requested"
        );
        Ok(warrant)
    }

    pub async fn sign(&self, actor: &User, id: Uuid) -> TribunalResult<Warrant> {
        authorize(actor.role, Action::ResolveWarrant)?;
        let warrant = self
            .warrants
            .transition(
                id,
                WarrantTransition::Approve {
                    signed_by: actor.display_name.clone(),
                },
                Utc::now(),
            )
            .await?;
        info!(warrant_id = %id, signed_by = %actor.display_name, "warrant signed");
        Ok(warrant)
    }

    pub async fn reject(
        &self,
        actor: &User,
        id: Uuid,
        input: RejectWarrant,
    ) -> TribunalResult<Warrant> {
        authorize(actor.role, Action::ResolveWarrant)?;
        let reason = input.reason.trim();
        if reason.is_empty() {
            return Err(TribunalError::validation("A rejection reason is required"));
        }
        let warrant = self
            .warrants
            .transition(
                id,
                WarrantTransition::Reject {
                    reason: reason.to_string(),
                },
                Utc::now(),
            )
            .await?;
        info!(warrant_id = %id, rejected_by = %actor.display_name, "warrant rejected");
        Ok(warrant)
    }

    pub async fn get(&self, id: Uuid) -> TribunalResult<Warrant> {
        self.warrants.get_by_id(id).await
    }

    pub async fn list_by_cause(&self, cause_id: Uuid) -> TribunalResult<Vec<Warrant>> {
        self.warrants.list_by_cause(cause_id).await
    }

    /// The judge's inbox, oldest first.
    pub async fn list_pending(&self, actor: &User) -> TribunalResult<Vec<Warrant>> {
        authorize(actor.role, Action::ResolveWarrant)?;
        self.warrants.list_pending().await
    }
}
