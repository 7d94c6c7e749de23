//! Integration tests for causes, ancillary records and search dispatch.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tribunal_core::error::TribunalError;
use tribunal_core::models::cause::{AddEvidence, CauseStatus, CreateCause, UpdateCause};
use tribunal_core::models::citation::CreateCitation;
use tribunal_core::models::citizen::{BackgroundEntry, CreateCitizen};
use tribunal_core::models::confiscation::CreateConfiscation;
use tribunal_core::models::role::Role;
use tribunal_core::models::search::SearchResults;
use tribunal_core::models::user::User;
use tribunal_core::models::vehicle::CreateVehicle;
use tribunal_db::repository::{
    SurrealCauseRepository, SurrealCitationRepository, SurrealCitizenRepository,
    SurrealConfiscationRepository, SurrealVehicleRepository,
};
use tribunal_workflow::{
    CaseRecordService, CauseService, CitizenService, SearchDispatcher, VehicleService,
};
use uuid::Uuid;

struct Fixture {
    causes: CauseService<SurrealCauseRepository<Db>>,
    citizens: CitizenService<SurrealCitizenRepository<Db>>,
    vehicles: VehicleService<SurrealVehicleRepository<Db>>,
    records: CaseRecordService<
        SurrealConfiscationRepository<Db>,
        SurrealCitationRepository<Db>,
        SurrealCauseRepository<Db>,
    >,
    search: SearchDispatcher<
        SurrealVehicleRepository<Db>,
        SurrealCitizenRepository<Db>,
        SurrealCauseRepository<Db>,
    >,
}

async fn setup() -> Fixture {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tribunal_db::run_migrations(&db).await.unwrap();
    Fixture {
        causes: CauseService::new(SurrealCauseRepository::new(db.clone())),
        citizens: CitizenService::new(SurrealCitizenRepository::new(db.clone())),
        vehicles: VehicleService::new(SurrealVehicleRepository::new(db.clone())),
        records: CaseRecordService::new(
            SurrealConfiscationRepository::new(db.clone()),
            SurrealCitationRepository::new(db.clone()),
            SurrealCauseRepository::new(db.clone()),
        ),
        search: SearchDispatcher::new(
            SurrealVehicleRepository::new(db.clone()),
            SurrealCitizenRepository::new(db.clone()),
            SurrealCauseRepository::new(db),
        ),
    }
}

fn actor(role: Role) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        discord_id: "d-1".into(),
        display_name: "Usuario".into(),
        avatar: None,
        role,
        created_at: now,
        updated_at: now,
    }
}

fn robbery() -> CreateCause {
    CreateCause {
        case_number: "2300123456-7".into(),
        court_roll: Some("O-123-2024".into()),
        description: "Robo con intimidación".into(),
        defendant_id: "9.876.543-2".into(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Causes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_cause_is_under_investigation_and_owned_by_actor() {
    let fx = setup().await;
    let fiscal = actor(Role::Prosecutor);

    let cause = fx.causes.create(&fiscal, robbery()).await.unwrap();
    assert_eq!(cause.status, CauseStatus::UnderInvestigation);
    assert_eq!(cause.prosecutor_id, Some(fiscal.id.to_string()));
    assert!(!cause.is_deleted);
}

#[tokio::test]
async fn missing_case_number_is_invalid() {
    let fx = setup().await;
    let err = fx
        .causes
        .create(
            &actor(Role::Prosecutor),
            CreateCause {
                case_number: String::new(),
                ..robbery()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::Validation { .. }));
    assert!(fx.causes.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_update_returns_current_cause() {
    let fx = setup().await;
    let cause = fx
        .causes
        .create(&actor(Role::Prosecutor), robbery())
        .await
        .unwrap();

    let same = fx
        .causes
        .update(cause.id, UpdateCause::default())
        .await
        .unwrap();
    assert_eq!(same, cause);
}

#[tokio::test]
async fn trash_restore_and_purge() {
    let fx = setup().await;
    let admin = actor(Role::Admin);
    let cause = fx.causes.create(&admin, robbery()).await.unwrap();

    let err = fx.causes.permanent_delete(&admin, cause.id).await.unwrap_err();
    assert!(matches!(err, TribunalError::Conflict { .. }));

    fx.causes.soft_delete(&admin, cause.id).await.unwrap();
    assert_eq!(fx.causes.list_deleted().await.unwrap().len(), 1);
    assert!(fx.causes.search("robo").await.unwrap().is_empty());

    let restored = fx.causes.restore(&admin, cause.id).await.unwrap();
    assert_eq!(restored, cause);

    fx.causes.soft_delete(&admin, cause.id).await.unwrap();
    fx.causes.permanent_delete(&admin, cause.id).await.unwrap();
    assert!(fx.causes.list_deleted().await.unwrap().is_empty());
}

#[tokio::test]
async fn evidence_needs_a_valid_url() {
    let fx = setup().await;
    let cause = fx
        .causes
        .create(&actor(Role::Prosecutor), robbery())
        .await
        .unwrap();

    let err = fx
        .causes
        .add_evidence(
            cause.id,
            AddEvidence {
                kind: "foto".into(),
                url: Some("not a url".into()),
                description: "Fachada".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::Validation { .. }));

    let updated = fx
        .causes
        .add_evidence(
            cause.id,
            AddEvidence {
                kind: "foto".into(),
                url: Some("https://evidencia.example/1.jpg".into()),
                description: "Fachada".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.evidence.len(), 1);
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn background_requires_police_or_above() {
    let fx = setup().await;
    fx.citizens
        .create(CreateCitizen {
            national_id: "12.345.678-9".into(),
            full_name: "Juan Carlos Pérez González".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let entry = BackgroundEntry {
        title: "Hurto".into(),
        description: "Hurto simple".into(),
        place: "Centro".into(),
        officer: "Sgto. Díaz".into(),
        ..Default::default()
    };

    let err = fx
        .citizens
        .append_background(&actor(Role::Civilian), "12.345.678-9", entry.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::Forbidden { .. }));

    let err = fx
        .citizens
        .append_background(
            &actor(Role::Police),
            "12.345.678-9",
            BackgroundEntry {
                title: String::new(),
                ..entry.clone()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::Validation { .. }));

    let citizen = fx
        .citizens
        .append_background(&actor(Role::Police), "12.345.678-9", entry)
        .await
        .unwrap();
    assert_eq!(citizen.background.len(), 1);
}

#[tokio::test]
async fn duplicate_plate_is_already_exists() {
    let fx = setup().await;
    let corolla = CreateVehicle {
        plate: "ABCD12".into(),
        make: Some("Toyota".into()),
        model: "Corolla".into(),
        color: None,
        owner_national_id: "12.345.678-9".into(),
        status: None,
    };
    fx.vehicles.create(corolla.clone()).await.unwrap();

    let err = fx.vehicles.create(corolla).await.unwrap_err();
    assert!(matches!(err, TribunalError::AlreadyExists { .. }));
    assert_eq!(fx.vehicles.list().await.unwrap().len(), 1);
    assert_eq!(fx.vehicles.get("abcd12").await.unwrap().model, "Corolla");
}

#[tokio::test]
async fn case_records_need_a_live_cause() {
    let fx = setup().await;
    let admin = actor(Role::Admin);
    let cause = fx.causes.create(&admin, robbery()).await.unwrap();

    let confiscation = CreateConfiscation {
        cause_id: cause.id.to_string(),
        description: "Allanamiento".into(),
        items: "2 celulares".into(),
        location: None,
    };
    fx.records
        .create_confiscation(confiscation.clone())
        .await
        .unwrap();
    assert_eq!(fx.records.confiscations_for(cause.id).await.unwrap().len(), 1);

    let citation = CreateCitation {
        cause_id: cause.id.to_string(),
        cited_national_id: "9.876.543-2".into(),
        date: "2024-11-20".into(),
        time: "10:30".into(),
        place: "Juzgado de Garantía".into(),
        reason: "Audiencia de formalización".into(),
    };
    fx.records.create_citation(citation.clone()).await.unwrap();
    assert_eq!(fx.records.citations_for(cause.id).await.unwrap().len(), 1);

    fx.causes.soft_delete(&admin, cause.id).await.unwrap();
    let err = fx
        .records
        .create_confiscation(confiscation)
        .await
        .unwrap_err();
    assert!(matches!(err, TribunalError::NotFound { .. }));
    let err = fx.records.create_citation(citation).await.unwrap_err();
    assert!(matches!(err, TribunalError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn short_query_returns_all_collections_empty() {
    let fx = setup().await;
    fx.causes
        .create(&actor(Role::Prosecutor), robbery())
        .await
        .unwrap();

    let results = fx.search.dispatch("causas", " 2 ").await.unwrap();
    assert_eq!(results.causes, Some(vec![]));
    assert_eq!(results.citizens, Some(vec![]));
    assert_eq!(results.vehicles, Some(vec![]));
}

#[tokio::test]
async fn search_addresses_only_one_collection() {
    let fx = setup().await;
    let cause = fx
        .causes
        .create(&actor(Role::Prosecutor), robbery())
        .await
        .unwrap();

    let results = fx.search.dispatch("causas", "2300123456").await.unwrap();
    assert_eq!(results.causes, Some(vec![cause]));
    assert!(results.citizens.is_none());
    assert!(results.vehicles.is_none());

    let results = fx.search.dispatch("personas", "pérez").await.unwrap();
    assert_eq!(results.citizens, Some(vec![]));
    assert!(results.causes.is_none());
}

#[tokio::test]
async fn unknown_search_type_is_invalid() {
    let fx = setup().await;
    let err = fx.search.dispatch("armas", "glock").await.unwrap_err();
    assert!(matches!(err, TribunalError::Validation { .. }));
}

#[tokio::test]
async fn short_query_wins_over_unknown_type() {
    let fx = setup().await;
    let results = fx.search.dispatch("armas", "a").await.unwrap();
    assert_eq!(results, SearchResults::empty());
}
