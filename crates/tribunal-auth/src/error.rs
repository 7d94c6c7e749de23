//! Authentication error types.

use thiserror::Error;
use tribunal_core::error::TribunalError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identity provider returned HTTP {status} from {endpoint}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("identity provider profile is incomplete")]
    IncompleteProfile,

    #[error("guild id or bot token is not configured")]
    GuildNotConfigured,

    #[error("invalid identity provider configuration: {0}")]
    Config(String),

    #[error("session not found")]
    SessionInvalid,

    #[error("session has expired")]
    SessionExpired,
}

impl From<AuthError> for TribunalError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SessionInvalid | AuthError::SessionExpired => TribunalError::Unauthorized,
            other => TribunalError::IdentityProvider(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_are_unauthorized() {
        assert!(matches!(
            TribunalError::from(AuthError::SessionExpired),
            TribunalError::Unauthorized
        ));
        assert!(matches!(
            TribunalError::from(AuthError::SessionInvalid),
            TribunalError::Unauthorized
        ));
    }

    #[test]
    fn provider_errors_keep_their_message() {
        let err = TribunalError::from(AuthError::Status {
            endpoint: "token",
            status: 401,
        });
        match err {
            TribunalError::IdentityProvider(msg) => assert!(msg.contains("401")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
