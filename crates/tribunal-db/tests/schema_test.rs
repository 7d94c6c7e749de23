//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    tribunal_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    for table in [
        "user",
        "session",
        "cause",
        "warrant",
        "citizen",
        "vehicle",
        "confiscation",
        "citation",
        "_migration",
    ] {
        assert!(info_str.contains(table), "missing {table} table");
    }
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    tribunal_db::run_migrations(&db).await.unwrap();
    tribunal_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn warrant_status_is_constrained() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tribunal_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE warrant SET cause_id = 'c', warrant_type = 'detencion', \
             target = 't', reason = 'r', status = 'firmada', requested_by = 'x'",
        )
        .await
        .unwrap()
        .check();
    assert!(result.is_err(), "unknown status must be rejected");
}

#[tokio::test]
async fn connect_through_any_engine() {
    let manager = tribunal_db::DbManager::connect(&tribunal_db::DbConfig::default())
        .await
        .unwrap();
    tribunal_db::run_migrations(manager.client()).await.unwrap();
}
