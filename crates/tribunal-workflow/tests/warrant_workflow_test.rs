//! Integration tests for the warrant workflow.

use std::sync::Arc;

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tribunal_core::error::TribunalError;
use tribunal_core::models::cause::CreateCause;
use tribunal_core::models::role::Role;
use tribunal_core::models::user::User;
use tribunal_core::models::warrant::{RejectWarrant, RequestWarrant, WarrantStatus, WarrantType};
use tribunal_db::repository::{SurrealCauseRepository, SurrealWarrantRepository};
use tribunal_workflow::{CauseService, WarrantService};
use uuid::Uuid;

const SIGNERS: usize = 8;

type Warrants = WarrantService<SurrealWarrantRepository<Db>, SurrealCauseRepository<Db>>;

fn actor(role: Role, name: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        discord_id: format!("d-{name}"),
        display_name: name.into(),
        avatar: None,
        role,
        created_at: now,
        updated_at: now,
    }
}

async fn setup() -> (Warrants, CauseService<SurrealCauseRepository<Db>>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tribunal_db::run_migrations(&db).await.unwrap();
    (
        WarrantService::new(
            SurrealWarrantRepository::new(db.clone()),
            SurrealCauseRepository::new(db.clone()),
        ),
        CauseService::new(SurrealCauseRepository::new(db)),
    )
}

async fn open_cause(causes: &CauseService<SurrealCauseRepository<Db>>) -> Uuid {
    causes
        .create(
            &actor(Role::Prosecutor, "Fiscal Soto"),
            CreateCause {
                case_number: "2300123456-7".into(),
                description: "Robo con intimidación".into(),
                defendant_id: "9.876.543-2".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .id
}

fn detention(cause_id: Uuid) -> RequestWarrant {
    RequestWarrant {
        cause_id: cause_id.to_string(),
        warrant_type: Some(WarrantType::Detention),
        target: "Roberto Andrés Muñoz Vera".into(),
        reason: "Riesgo de fuga acreditado".into(),
    }
}

#[tokio::test]
async fn detention_is_requested_signed_and_locked() {
    let (warrants, causes) = setup().await;
    let cause_id = open_cause(&causes).await;
    let fiscal = actor(Role::Prosecutor, "Fiscal Soto");
    let juez = actor(Role::Judge, "Juez Rojas");

    let requested = warrants.request(&fiscal, detention(cause_id)).await.unwrap();
    assert_eq!(requested.status, WarrantStatus::Pending);
    assert_eq!(requested.requested_by, "Fiscal Soto");

    let signed = warrants.sign(&juez, requested.id).await.unwrap();
    assert_eq!(signed.status, WarrantStatus::Approved);
    assert_eq!(signed.signed_by.as_deref(), Some("Juez Rojas"));

    let err = warrants.sign(&juez, requested.id).await.unwrap_err();
    assert!(matches!(err, TribunalError::Conflict { .. }));
    assert_eq!(warrants.get(requested.id).await.unwrap(), signed);
}

#[tokio::test]
async fn requester_is_the_acting_user() {
    let (warrants, causes) = setup().await;
    let cause_id = open_cause(&causes).await;
    let juez = actor(Role::Judge, "Juez Rojas");

    let requested = warrants.request(&juez, detention(cause_id)).await.unwrap();
    assert_eq!(requested.requested_by, "Juez Rojas");
}

#[tokio::test]
async fn blank_rejection_reason_leaves_warrant_pending() {
    let (warrants, causes) = setup().await;
    let cause_id = open_cause(&causes).await;
    let requested = warrants
        .request(&actor(Role::Prosecutor, "Fiscal Soto"), detention(cause_id))
        .await
        .unwrap();
    let juez = actor(Role::Judge, "Juez Rojas");

    let err = warrants
        .reject(
            &juez,
            requested.id,
            RejectWarrant {
                reason: "   ".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::Validation { .. }));
    assert_eq!(
        warrants.get(requested.id).await.unwrap().status,
        WarrantStatus::Pending
    );

    let rejected = warrants
        .reject(
            &juez,
            requested.id,
            RejectWarrant {
                reason: "Antecedentes insuficientes".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, WarrantStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Antecedentes insuficientes")
    );
}

#[tokio::test]
async fn only_judges_resolve() {
    let (warrants, causes) = setup().await;
    let cause_id = open_cause(&causes).await;
    let fiscal = actor(Role::Prosecutor, "Fiscal Soto");
    let requested = warrants.request(&fiscal, detention(cause_id)).await.unwrap();

    let err = warrants.sign(&fiscal, requested.id).await.unwrap_err();
    assert!(matches!(err, TribunalError::Forbidden { .. }));
    let err = warrants.list_pending(&fiscal).await.unwrap_err();
    assert!(matches!(err, TribunalError::Forbidden { .. }));

    let admin = actor(Role::Admin, "Admin");
    assert_eq!(warrants.list_pending(&admin).await.unwrap().len(), 1);
    warrants.sign(&admin, requested.id).await.unwrap();
}

#[tokio::test]
async fn police_cannot_request() {
    let (warrants, causes) = setup().await;
    let cause_id = open_cause(&causes).await;

    let err = warrants
        .request(&actor(Role::Police, "Cabo Díaz"), detention(cause_id))
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::Forbidden { .. }));
}

#[tokio::test]
async fn request_needs_a_live_cause() {
    let (warrants, causes) = setup().await;
    let fiscal = actor(Role::Prosecutor, "Fiscal Soto");

    let err = warrants
        .request(&fiscal, detention(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::NotFound { .. }));

    let cause_id = open_cause(&causes).await;
    causes.soft_delete(&fiscal, cause_id).await.unwrap();
    let err = warrants
        .request(&fiscal, detention(cause_id))
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::NotFound { .. }));
}

#[tokio::test]
async fn short_reason_and_blank_target_are_invalid() {
    let (warrants, causes) = setup().await;
    let cause_id = open_cause(&causes).await;
    let fiscal = actor(Role::Prosecutor, "Fiscal Soto");

    let err = warrants
        .request(
            &fiscal,
            RequestWarrant {
                reason: "corto".into(),
                ..detention(cause_id)
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::Validation { .. }));

    let err = warrants
        .request(
            &fiscal,
            RequestWarrant {
                target: "  ".into(),
                ..detention(cause_id)
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::Validation { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_signatures_have_one_winner() {
    let (warrants, causes) = setup().await;
    let warrants = Arc::new(warrants);
    let cause_id = open_cause(&causes).await;
    let fiscal = actor(Role::Prosecutor, "Fiscal Soto");

    for _ in 0..5 {
        let id = warrants
            .request(&fiscal, detention(cause_id))
            .await
            .unwrap()
            .id;

        let signers: Vec<_> = (0..SIGNERS)
            .map(|n| {
                let warrants = Arc::clone(&warrants);
                let judge = actor(Role::Judge, &format!("Juez {n}"));
                tokio::spawn(async move { warrants.sign(&judge, id).await })
            })
            .collect();

        let mut winners = Vec::new();
        for handle in signers {
            match handle.await.unwrap() {
                Ok(signed) => winners.push(signed),
                Err(err) => assert!(matches!(err, TribunalError::Conflict { .. }), "{err}"),
            }
        }
        assert_eq!(winners.len(), 1, "exactly one signer wins");

        let stored = warrants.get(id).await.unwrap();
        assert_eq!(stored.status, WarrantStatus::Approved);
        assert_eq!(stored.signed_by, winners[0].signed_by);
    }
}

#[tokio::test]
async fn warrants_listed_per_cause() {
    let (warrants, causes) = setup().await;
    let cause_id = open_cause(&causes).await;
    let fiscal = actor(Role::Prosecutor, "Fiscal Soto");
    warrants.request(&fiscal, detention(cause_id)).await.unwrap();
    warrants
        .request(
            &fiscal,
            RequestWarrant {
                warrant_type: Some(WarrantType::SearchAndSeizure),
                target: "Av. Principal 1234".into(),
                ..detention(cause_id)
            },
        )
        .await
        .unwrap();

    assert_eq!(warrants.list_by_cause(cause_id).await.unwrap().len(), 2);
    assert!(
        warrants
            .list_by_cause(Uuid::new_v4())
            .await
            .unwrap()
            .is_empty()
    );
}
