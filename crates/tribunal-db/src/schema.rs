//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode. UUIDs are record keys and
//! foreign keys are stored as strings. Enums are stored as their wire
//! strings with ASSERT constraints.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users (upserted on every Discord login)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD discord_id ON TABLE user TYPE string;
DEFINE FIELD display_name ON TABLE user TYPE string;
DEFINE FIELD avatar ON TABLE user TYPE option<string>;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['admin', 'juez', 'fiscal', 'policia', 'abogado', 'civil'];
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_discord_id ON TABLE user \
    COLUMNS discord_id UNIQUE;

-- =======================================================================
-- Sessions (hash of the opaque cookie token)
-- =======================================================================
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE session TYPE string;
DEFINE FIELD token_hash ON TABLE session TYPE string;
DEFINE FIELD expires_at ON TABLE session TYPE datetime;
DEFINE FIELD created_at ON TABLE session TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_session_token ON TABLE session \
    COLUMNS token_hash UNIQUE;
DEFINE INDEX idx_session_user ON TABLE session \
    COLUMNS user_id;

-- =======================================================================
-- Causes (soft-deletable)
-- =======================================================================
DEFINE TABLE cause SCHEMAFULL;
DEFINE FIELD title ON TABLE cause TYPE option<string>;
DEFINE FIELD case_number ON TABLE cause TYPE string;
DEFINE FIELD court_roll ON TABLE cause TYPE option<string>;
DEFINE FIELD origin ON TABLE cause TYPE string;
DEFINE FIELD subject_matter ON TABLE cause TYPE string;
DEFINE FIELD description ON TABLE cause TYPE string;
DEFINE FIELD status ON TABLE cause TYPE string \
    ASSERT $value IN ['investigacion', 'judicializada', 'cerrada', 'archivada'];
DEFINE FIELD priority ON TABLE cause TYPE string \
    ASSERT $value IN ['baja', 'normal', 'alta', 'urgente'];
DEFINE FIELD defendant_id ON TABLE cause TYPE string;
DEFINE FIELD prosecutor_id ON TABLE cause TYPE option<string>;
DEFINE FIELD judge_id ON TABLE cause TYPE option<string>;
DEFINE FIELD evidence ON TABLE cause TYPE array DEFAULT [];
DEFINE FIELD evidence.* ON TABLE cause TYPE object FLEXIBLE;
DEFINE FIELD is_deleted ON TABLE cause TYPE bool DEFAULT false;
DEFINE FIELD deleted_at ON TABLE cause TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE cause TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE cause TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_cause_deleted ON TABLE cause \
    COLUMNS is_deleted;

-- =======================================================================
-- Warrants (state machine guarded by conditional updates)
-- =======================================================================
DEFINE TABLE warrant SCHEMAFULL;
DEFINE FIELD cause_id ON TABLE warrant TYPE string;
DEFINE FIELD warrant_type ON TABLE warrant TYPE string \
    ASSERT $value IN ['detencion', 'allanamiento', 'incautacion', \
        'intervencion', 'secreto_bancario'];
DEFINE FIELD target ON TABLE warrant TYPE string;
DEFINE FIELD reason ON TABLE warrant TYPE string;
DEFINE FIELD status ON TABLE warrant TYPE string \
    ASSERT $value IN ['pendiente', 'aprobada', 'rechazada'];
DEFINE FIELD requested_by ON TABLE warrant TYPE string;
DEFINE FIELD signed_by ON TABLE warrant TYPE option<string>;
DEFINE FIELD rejection_reason ON TABLE warrant TYPE option<string>;
DEFINE FIELD created_at ON TABLE warrant TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD signed_at ON TABLE warrant TYPE option<datetime>;
DEFINE FIELD resolved_at ON TABLE warrant TYPE option<datetime>;
DEFINE INDEX idx_warrant_cause ON TABLE warrant \
    COLUMNS cause_id;
DEFINE INDEX idx_warrant_status ON TABLE warrant \
    COLUMNS status;

-- =======================================================================
-- Citizens (canonical versioned document)
-- =======================================================================
DEFINE TABLE citizen SCHEMAFULL;
DEFINE FIELD schema_version ON TABLE citizen TYPE int;
DEFINE FIELD national_id ON TABLE citizen TYPE string;
DEFINE FIELD full_name ON TABLE citizen TYPE string;
DEFINE FIELD nationality ON TABLE citizen TYPE option<string>;
DEFINE FIELD notes ON TABLE citizen TYPE option<string>;
DEFINE FIELD background ON TABLE citizen TYPE array DEFAULT [];
DEFINE FIELD background.* ON TABLE citizen TYPE object FLEXIBLE;
DEFINE FIELD licenses ON TABLE citizen TYPE array DEFAULT [];
DEFINE FIELD licenses.* ON TABLE citizen TYPE object FLEXIBLE;
DEFINE FIELD fines ON TABLE citizen TYPE array DEFAULT [];
DEFINE FIELD fines.* ON TABLE citizen TYPE object FLEXIBLE;
DEFINE FIELD created_at ON TABLE citizen TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_citizen_national_id ON TABLE citizen \
    COLUMNS national_id UNIQUE;

-- =======================================================================
-- Vehicles
-- =======================================================================
DEFINE TABLE vehicle SCHEMAFULL;
DEFINE FIELD plate ON TABLE vehicle TYPE string;
DEFINE FIELD make ON TABLE vehicle TYPE option<string>;
DEFINE FIELD model ON TABLE vehicle TYPE string;
DEFINE FIELD color ON TABLE vehicle TYPE option<string>;
DEFINE FIELD owner_national_id ON TABLE vehicle TYPE string;
DEFINE FIELD status ON TABLE vehicle TYPE string \
    ASSERT $value IN ['operativo', 'robado', 'en_revision', 'dado_de_baja', \
        'inmovilizado', 'embargado'];
DEFINE FIELD stolen_report ON TABLE vehicle TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE vehicle TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_vehicle_plate ON TABLE vehicle \
    COLUMNS plate UNIQUE;

-- =======================================================================
-- Confiscations and citations (append-only, keyed by cause)
-- =======================================================================
DEFINE TABLE confiscation SCHEMAFULL;
DEFINE FIELD cause_id ON TABLE confiscation TYPE string;
DEFINE FIELD description ON TABLE confiscation TYPE string;
DEFINE FIELD items ON TABLE confiscation TYPE string;
DEFINE FIELD location ON TABLE confiscation TYPE option<string>;
DEFINE FIELD created_at ON TABLE confiscation TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_confiscation_cause ON TABLE confiscation \
    COLUMNS cause_id;

DEFINE TABLE citation SCHEMAFULL;
DEFINE FIELD cause_id ON TABLE citation TYPE string;
DEFINE FIELD cited_national_id ON TABLE citation TYPE string;
DEFINE FIELD hearing_date ON TABLE citation TYPE string;
DEFINE FIELD hearing_time ON TABLE citation TYPE string;
DEFINE FIELD place ON TABLE citation TYPE string;
DEFINE FIELD reason ON TABLE citation TYPE string;
DEFINE FIELD created_at ON TABLE citation TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_citation_cause ON TABLE citation \
    COLUMNS cause_id;
";

// -----------------------------------------------------------------------
// Migration runner
// -----------------------------------------------------------------------

/// Apply every migration newer than the recorded schema version.
///
/// Idempotent: running it against an up-to-date database is a no-op.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "Migration v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

        info!(version = migration.version, "Migration applied");
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
