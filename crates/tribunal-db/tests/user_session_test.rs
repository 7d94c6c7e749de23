//! Integration tests for the User and Session repositories.

use chrono::{Duration, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tribunal_core::error::TribunalError;
use tribunal_core::models::role::Role;
use tribunal_core::models::session::CreateSession;
use tribunal_core::models::user::UpsertUser;
use tribunal_core::repository::{SessionRepository, UserRepository};
use tribunal_db::repository::{SurrealSessionRepository, SurrealUserRepository};

async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tribunal_db::run_migrations(&db).await.unwrap();
    db
}

fn login(role: Role, name: &str) -> UpsertUser {
    UpsertUser {
        discord_id: "111222333".into(),
        display_name: name.into(),
        avatar: Some("a1b2c3".into()),
        role,
    }
}

#[tokio::test]
async fn upsert_creates_then_overwrites() {
    let repo = SurrealUserRepository::new(setup().await);

    let created = repo.upsert(login(Role::Civilian, "ana")).await.unwrap();
    assert_eq!(created.role, Role::Civilian);

    let updated = repo.upsert(login(Role::Judge, "Ana Rojas")).await.unwrap();
    assert_eq!(updated.id, created.id, "same discord id keeps the user");
    assert_eq!(updated.role, Role::Judge);
    assert_eq!(updated.display_name, "Ana Rojas");
    assert_eq!(updated.created_at, created.created_at);

    let fetched = repo.get_by_discord_id("111222333").await.unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(repo.get_by_id(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let repo = SurrealUserRepository::new(setup().await);
    let err = repo.get_by_discord_id("nope").await.unwrap_err();
    assert!(matches!(err, TribunalError::NotFound { .. }));
}

#[tokio::test]
async fn session_lookup_and_invalidate() {
    let db = setup().await;
    let user = SurrealUserRepository::new(db.clone())
        .upsert(login(Role::Prosecutor, "fiscal"))
        .await
        .unwrap();
    let repo = SurrealSessionRepository::new(db);

    let session = repo
        .create(CreateSession {
            user_id: user.id,
            token_hash: "abc123".into(),
            expires_at: Utc::now() + Duration::hours(24),
        })
        .await
        .unwrap();

    let found = repo.get_by_token_hash("abc123").await.unwrap();
    assert_eq!(found.id, session.id);
    assert_eq!(found.user_id, user.id);

    repo.invalidate(session.id).await.unwrap();
    let err = repo.get_by_token_hash("abc123").await.unwrap_err();
    assert!(matches!(err, TribunalError::NotFound { .. }));
}

#[tokio::test]
async fn cleanup_removes_only_expired_sessions() {
    let db = setup().await;
    let user = SurrealUserRepository::new(db.clone())
        .upsert(login(Role::Police, "carabinero"))
        .await
        .unwrap();
    let repo = SurrealSessionRepository::new(db);

    for (hash, offset) in [("old", -1), ("older", -48), ("fresh", 24)] {
        repo.create(CreateSession {
            user_id: user.id,
            token_hash: hash.into(),
            expires_at: Utc::now() + Duration::hours(offset),
        })
        .await
        .unwrap();
    }

    assert_eq!(repo.cleanup_expired().await.unwrap(), 2);
    assert!(repo.get_by_token_hash("fresh").await.is_ok());
    assert!(repo.get_by_token_hash("old").await.is_err());
}
