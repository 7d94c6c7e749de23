//! Error types for the judicial portal.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TribunalError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity} with key {key}")]
    AlreadyExists { entity: String, key: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Action not permitted: {reason}")]
    Forbidden { reason: String },

    #[error("Invalid state: {reason}")]
    Conflict { reason: String },

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TribunalError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}

pub type TribunalResult<T> = Result<T, TribunalError>;
