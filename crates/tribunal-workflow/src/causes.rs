//! Cause lifecycle: create, edit, trash, restore, purge.

use chrono::Utc;
use tracing::info;
use tribunal_core::error::TribunalResult;
use tribunal_core::models::cause::{AddEvidence, Cause, CreateCause, Evidence, UpdateCause};
use tribunal_core::models::user::User;
use tribunal_core::repository::CauseRepository;
use tribunal_core::validation::Schema;
use uuid::Uuid;

pub struct CauseService<C: CauseRepository> {
    causes: C,
}

impl<C: CauseRepository> CauseService<C> {
    pub fn new(causes: C) -> Self {
        Self { causes }
    }

    /// Open a cause. The acting user becomes the prosecutor unless the
    /// input names one.
    pub async fn create(&self, actor: &User, input: CreateCause) -> TribunalResult<Cause> {
        input.check()?;
        let cause = self
            .causes
            .create(input, Some(actor.id.to_string()))
            .await?;
        info!(cause_id = %cause.id, case_number = %cause.case_number, actor = %actor.id, "cause created");
        Ok(cause)
    }

    pub async fn get(&self, id: Uuid) -> TribunalResult<Cause> {
        self.causes.get(id).await
    }

    pub async fn list(&self) -> TribunalResult<Vec<Cause>> {
        self.causes.list().await
    }

    pub async fn update(&self, id: Uuid, input: UpdateCause) -> TribunalResult<Cause> {
        input.check()?;
        if input.is_empty() {
            return self.causes.get(id).await;
        }
        self.causes.update(id, input).await
    }

    pub async fn soft_delete(&self, actor: &User, id: Uuid) -> TribunalResult<Cause> {
        let cause = self.causes.soft_delete(id).await?;
        info!(cause_id = %id, actor = %actor.id, "cause moved to trash");
        Ok(cause)
    }

    pub async fn restore(&self, actor: &User, id: Uuid) -> TribunalResult<Cause> {
        let cause = self.causes.restore(id).await?;
        info!(cause_id = %id, actor = %actor.id, "cause restored");
        Ok(cause)
    }

    pub async fn permanent_delete(&self, actor: &User, id: Uuid) -> TribunalResult<()> {
        self.causes.permanent_delete(id).await?;
        info!(cause_id = %id, actor = %actor.id, "cause permanently deleted");
        Ok(())
    }

    pub async fn list_deleted(&self) -> TribunalResult<Vec<Cause>> {
        self.causes.list_deleted().await
    }

    pub async fn search(&self, query: &str) -> TribunalResult<Vec<Cause>> {
        self.causes.search(query.trim()).await
    }

    pub async fn add_evidence(&self, id: Uuid, input: AddEvidence) -> TribunalResult<Cause> {
        input.check()?;
        self.causes
            .add_evidence(
                id,
                Evidence {
                    kind: input.kind,
                    url: input.url,
                    description: input.description,
                    added_at: Utc::now(),
                },
            )
            .await
    }
}
