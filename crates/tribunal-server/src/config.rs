//! Server configuration from flags and environment variables.

use std::net::SocketAddr;

use clap::Parser;
use tribunal_auth::config::{AuthConfig, DiscordConfig, RoleMapping};
use tribunal_db::DbConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "tribunal-server", version, about = "Judicial portal HTTP API")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "TRIBUNAL_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// SurrealDB endpoint (`mem://`, `ws://host:port`, ...).
    #[arg(long, env = "TRIBUNAL_DB_URL", default_value = "mem://")]
    pub db_url: String,

    #[arg(long, env = "TRIBUNAL_DB_NAMESPACE", default_value = "tribunal")]
    pub db_namespace: String,

    #[arg(long, env = "TRIBUNAL_DB_DATABASE", default_value = "main")]
    pub db_database: String,

    #[arg(long, env = "TRIBUNAL_DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "TRIBUNAL_DB_PASS", hide_env_values = true)]
    pub db_pass: Option<String>,

    /// Load demo citizens, vehicles and causes into an empty database.
    #[arg(long, env = "TRIBUNAL_SEED_DEMO")]
    pub seed_demo: bool,

    #[arg(long, env = "DISCORD_CLIENT_ID", default_value = "")]
    pub discord_client_id: String,

    #[arg(
        long,
        env = "DISCORD_CLIENT_SECRET",
        default_value = "",
        hide_env_values = true
    )]
    pub discord_client_secret: String,

    #[arg(
        long,
        env = "DISCORD_REDIRECT_URI",
        default_value = "http://localhost:5000/auth/discord/callback"
    )]
    pub discord_redirect_uri: String,

    #[arg(long, env = "DISCORD_GUILD_ID")]
    pub discord_guild_id: Option<String>,

    #[arg(long, env = "DISCORD_BOT_TOKEN", hide_env_values = true)]
    pub discord_bot_token: Option<String>,

    /// Discord user ids that always log in as `admin`.
    #[arg(long, env = "TRIBUNAL_ADMIN_IDS", value_delimiter = ',')]
    pub admin_ids: Vec<String>,

    /// Mark the session cookie `Secure` (HTTPS deployments).
    #[arg(long, env = "TRIBUNAL_COOKIE_SECURE")]
    pub cookie_secure: bool,
}

impl ServerConfig {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
            username: self.db_user.clone(),
            password: self.db_pass.clone(),
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            discord: DiscordConfig {
                client_id: self.discord_client_id.clone(),
                client_secret: self.discord_client_secret.clone(),
                redirect_uri: self.discord_redirect_uri.clone(),
                guild_id: self.discord_guild_id.clone(),
                bot_token: self.discord_bot_token.clone(),
                ..DiscordConfig::default()
            },
            roles: RoleMapping {
                admin_overrides: self
                    .admin_ids
                    .iter()
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect(),
                ..RoleMapping::default()
            },
            cookie_secure: self.cookie_secure,
            ..AuthConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_embedded_database() {
        let config = ServerConfig::parse_from(["tribunal-server"]);
        assert_eq!(config.db_config().url, "mem://");
        assert_eq!(config.bind.port(), 5000);
        assert!(!config.seed_demo);
    }

    #[test]
    fn admin_ids_are_split_and_trimmed() {
        let config = ServerConfig::parse_from([
            "tribunal-server",
            "--admin-ids",
            "111, 222,,333",
            "--cookie-secure",
        ]);
        let auth = config.auth_config();
        assert_eq!(auth.roles.admin_overrides, vec!["111", "222", "333"]);
        assert!(auth.cookie_secure);
        assert_eq!(auth.roles.judge_roles, RoleMapping::default().judge_roles);
    }
}
