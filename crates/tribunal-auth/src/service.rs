//! Authentication service: login, session lookup and logout.

use chrono::{DateTime, Duration, Utc};
use tribunal_core::error::{TribunalError, TribunalResult};
use tribunal_core::models::session::CreateSession;
use tribunal_core::models::user::User;
use tribunal_core::repository::{SessionRepository, UserRepository};
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::discord::IdentityProvider;
use crate::error::AuthError;
use crate::resolver;
use crate::token;

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Raw opaque session token (set as the cookie value, not stored).
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

/// Where to redirect a new login, and the nonce its callback must return.
#[derive(Debug, Clone)]
pub struct LoginStart {
    pub state: String,
    pub url: String,
}

/// Authentication service.
///
/// Generic over repository implementations and the identity provider so
/// that the auth layer has no dependency on the database crate.
pub struct AuthService<U: UserRepository, S: SessionRepository, P: IdentityProvider> {
    user_repo: U,
    session_repo: S,
    provider: P,
    config: AuthConfig,
}

impl<U: UserRepository, S: SessionRepository, P: IdentityProvider> AuthService<U, S, P> {
    pub fn new(user_repo: U, session_repo: S, provider: P, config: AuthConfig) -> Self {
        Self {
            user_repo,
            session_repo,
            provider,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Begin a login: a fresh `state` nonce and the provider URL carrying it.
    pub fn begin_login(&self) -> LoginStart {
        let state = token::generate_login_state();
        let url = self.provider.authorize_url(&state);
        LoginStart { state, url }
    }

    /// Complete an OAuth callback: resolve the user's role from the
    /// provider, store the user and open a session.
    pub async fn login(&self, code: &str) -> TribunalResult<LoginOutput> {
        let access_token = self.provider.exchange_code(code).await?;
        let identity = self.provider.fetch_identity(&access_token).await?;

        // Role sync failures degrade to the lowest privilege.
        let memberships = match self.provider.fetch_member_roles(&identity.id).await {
            Ok(roles) => roles,
            Err(e) => {
                warn!(discord_id = %identity.id, error = %e, "could not fetch guild roles");
                Vec::new()
            }
        };
        let role = resolver::resolve(&memberships, &self.config.roles, &identity.id);

        let existing = match self.user_repo.get_by_discord_id(&identity.id).await {
            Ok(user) => Some(user),
            Err(TribunalError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };
        let desired = resolver::reconcile(
            existing.as_ref(),
            &identity,
            role,
            self.config.merge_policy,
        );
        let user = self.user_repo.upsert(desired).await?;

        let raw = token::generate_session_token();
        let expires_at = Utc::now() + Duration::seconds(self.config.session_lifetime_secs as i64);
        self.session_repo
            .create(CreateSession {
                user_id: user.id,
                token_hash: token::hash_session_token(&raw),
                expires_at,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "login succeeded");
        Ok(LoginOutput {
            token: raw,
            user,
            expires_at,
        })
    }

    /// Resolve a raw session token to its user.
    pub async fn authenticate(&self, raw_token: &str) -> TribunalResult<User> {
        let token_hash = token::hash_session_token(raw_token);
        let session = self
            .session_repo
            .get_by_token_hash(&token_hash)
            .await
            .map_err(|e| match e {
                TribunalError::NotFound { .. } => AuthError::SessionInvalid.into(),
                other => other,
            })?;

        if session.expires_at <= Utc::now() {
            if let Err(e) = self.session_repo.invalidate(session.id).await {
                warn!(session_id = %session.id, error = %e, "could not drop expired session");
            }
            return Err(AuthError::SessionExpired.into());
        }

        self.user_repo
            .get_by_id(session.user_id)
            .await
            .map_err(|e| match e {
                TribunalError::NotFound { .. } => AuthError::SessionInvalid.into(),
                other => other,
            })
    }

    /// Drop the session behind a raw token. Unknown tokens are ignored.
    pub async fn logout(&self, raw_token: &str) -> TribunalResult<()> {
        let token_hash = token::hash_session_token(raw_token);
        match self.session_repo.get_by_token_hash(&token_hash).await {
            Ok(session) => self.session_repo.invalidate(session.id).await,
            Err(TribunalError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn purge_expired(&self) -> TribunalResult<u64> {
        let removed = self.session_repo.cleanup_expired().await?;
        if removed > 0 {
            info!(removed, "purged expired sessions");
        }
        Ok(removed)
    }
}
