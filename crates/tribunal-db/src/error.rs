//! Database-specific error types and conversions.

use tribunal_core::error::TribunalError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity} with key {key}")]
    Duplicate { entity: String, key: String },

    #[error("Invalid stored value: {0}")]
    Decode(String),
}

impl DbError {
    pub(crate) fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub(crate) fn decode(what: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode(format!("{what}: {err}"))
    }

    /// Map a failed statement, recognising unique-index violations.
    pub(crate) fn statement(entity: &str, key: &str, err: surrealdb::Error) -> Self {
        if err.to_string().contains("already contains") {
            Self::Duplicate {
                entity: entity.into(),
                key: key.into(),
            }
        } else {
            Self::Surreal(err)
        }
    }
}

impl From<DbError> for TribunalError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => TribunalError::NotFound { entity, id },
            DbError::Duplicate { entity, key } => TribunalError::AlreadyExists { entity, key },
            other => TribunalError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_entity_and_id() {
        let err: TribunalError = DbError::not_found("cause", "abc").into();
        assert!(matches!(
            err,
            TribunalError::NotFound { ref entity, ref id } if entity == "cause" && id == "abc"
        ));
    }

    #[test]
    fn duplicate_becomes_already_exists() {
        let err: TribunalError = DbError::Duplicate {
            entity: "vehicle".into(),
            key: "ABCD12".into(),
        }
        .into();
        assert!(matches!(err, TribunalError::AlreadyExists { .. }));
    }

    #[test]
    fn decode_is_a_database_error() {
        let err: TribunalError = DbError::decode("status", "bogus").into();
        assert!(matches!(err, TribunalError::Database(_)));
    }
}
