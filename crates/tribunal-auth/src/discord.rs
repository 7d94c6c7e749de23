//! Discord OAuth2 and guild member lookups.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::DiscordConfig;
use crate::error::AuthError;

/// The provider's view of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// External identity provider used by the login flow.
pub trait IdentityProvider: Send + Sync {
    /// Where to send the browser to start a login. `state` comes back
    /// unchanged on the callback.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for a user access token.
    fn exchange_code(&self, code: &str) -> impl Future<Output = Result<String, AuthError>> + Send;

    fn fetch_identity(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Identity, AuthError>> + Send;

    /// Role ids the user holds in the configured guild.
    fn fetch_member_roles(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, AuthError>> + Send;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GuildMember {
    #[serde(default)]
    roles: Vec<String>,
}

/// [`IdentityProvider`] backed by the Discord REST API.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    config: DiscordConfig,
    authorize_url: Url,
}

impl DiscordClient {
    pub fn new(config: DiscordConfig) -> Result<Self, AuthError> {
        let http = Client::builder()
            .user_agent(concat!("tribunal/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let authorize_url = Url::parse_with_params(
            &config.authorize_endpoint,
            &[
                ("client_id", config.client_id.as_str()),
                ("redirect_uri", config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "identify email"),
            ],
        )
        .map_err(|e| AuthError::Config(e.to_string()))?;

        Ok(Self {
            http,
            config,
            authorize_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base.trim_end_matches('/'))
    }
}

fn ensure_success(response: &reqwest::Response, endpoint: &'static str) -> Result<(), AuthError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(AuthError::Status {
            endpoint,
            status: status.as_u16(),
        })
    }
}

impl IdentityProvider for DiscordClient {
    fn authorize_url(&self, state: &str) -> String {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut().append_pair("state", state);
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let response = self
            .http
            .post(self.endpoint("/oauth2/token"))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;
        ensure_success(&response, "oauth2/token")?;

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn fetch_identity(&self, access_token: &str) -> Result<Identity, AuthError> {
        let response = self
            .http
            .get(self.endpoint("/users/@me"))
            .bearer_auth(access_token)
            .send()
            .await?;
        ensure_success(&response, "users/@me")?;

        let identity: Identity = response.json().await?;
        if identity.id.is_empty() || identity.username.is_empty() {
            return Err(AuthError::IncompleteProfile);
        }
        Ok(identity)
    }

    async fn fetch_member_roles(&self, user_id: &str) -> Result<Vec<String>, AuthError> {
        let (Some(guild_id), Some(bot_token)) = (&self.config.guild_id, &self.config.bot_token)
        else {
            return Err(AuthError::GuildNotConfigured);
        };

        let response = self
            .http
            .get(self.endpoint(&format!("/guilds/{guild_id}/members/{user_id}")))
            .header(reqwest::header::AUTHORIZATION, format!("Bot {bot_token}"))
            .send()
            .await?;
        ensure_success(&response, "guilds/members")?;

        let member: GuildMember = response.json().await?;
        Ok(member.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DiscordClient {
        DiscordClient::new(DiscordConfig {
            client_id: "123".into(),
            redirect_uri: "https://portal.example/auth/discord/callback".into(),
            ..DiscordConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn authorize_url_carries_client_and_scope() {
        let url = Url::parse(&client().authorize_url("xyz")).unwrap();
        let params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.host_str(), Some("discord.com"));
        assert!(params.contains(&("client_id".into(), "123".into())));
        assert!(params.contains(&("response_type".into(), "code".into())));
        assert!(params.contains(&("scope".into(), "identify email".into())));
        assert!(params.contains(&("state".into(), "xyz".into())));
        assert!(params.contains(&(
            "redirect_uri".into(),
            "https://portal.example/auth/discord/callback".into()
        )));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let c = DiscordClient::new(DiscordConfig {
            api_base: "http://127.0.0.1:1/api/".into(),
            ..DiscordConfig::default()
        })
        .unwrap();
        assert_eq!(c.endpoint("/users/@me"), "http://127.0.0.1:1/api/users/@me");
    }

    #[tokio::test]
    async fn member_roles_need_guild_config() {
        let err = client().fetch_member_roles("555").await.unwrap_err();
        assert!(matches!(err, AuthError::GuildNotConfigured));
    }

    #[test]
    fn identity_tolerates_missing_avatar() {
        let identity: Identity =
            serde_json::from_str(r#"{"id":"1","username":"ana","global_name":null}"#).unwrap();
        assert_eq!(identity.avatar, None);
    }
}
