//! Authentication configuration.

use crate::resolver::MergePolicy;

/// Discord application and guild settings.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Must match a redirect registered on the Discord application.
    pub redirect_uri: String,
    /// Guild whose member roles decide the portal role. `None` disables
    /// role sync and every login resolves to the lowest privilege.
    pub guild_id: Option<String>,
    pub bot_token: Option<String>,
    /// REST base, overridable for tests.
    pub api_base: String,
    pub authorize_endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: "http://localhost:5000/auth/discord/callback".into(),
            guild_id: None,
            bot_token: None,
            api_base: "https://discord.com/api/v10".into(),
            authorize_endpoint: "https://discord.com/oauth2/authorize".into(),
            timeout_secs: 10,
        }
    }
}

/// Which guild role ids map onto which portal role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMapping {
    pub judge_roles: Vec<String>,
    pub prosecutor_roles: Vec<String>,
    /// Discord user ids that always resolve to `admin`.
    pub admin_overrides: Vec<String>,
}

impl Default for RoleMapping {
    fn default() -> Self {
        Self {
            judge_roles: vec![
                // Juez
                "1326535548797583421".into(),
                // Presidente de la corte
                "1411570917267607613".into(),
            ],
            prosecutor_roles: vec![
                // Fiscal Preferente
                "1408642405007364157".into(),
                // Fiscal Adjunto
                "1408642519650013298".into(),
                // Fiscal Regional
                "1326534543846543410".into(),
                // Fiscal Nacional
                "1326534442394845215".into(),
            ],
            admin_overrides: Vec::new(),
        }
    }
}

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub discord: DiscordConfig,
    pub roles: RoleMapping,
    pub merge_policy: MergePolicy,
    /// Session lifetime in seconds (default: 86_400 = 24 hours).
    pub session_lifetime_secs: u64,
    pub cookie_name: String,
    /// Cookie carrying the OAuth `state` nonce between login start and
    /// callback.
    pub state_cookie_name: String,
    /// How long a started login may take to come back (default: 600).
    pub state_lifetime_secs: u64,
    /// Set the `Secure` attribute on the session cookie.
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            roles: RoleMapping::default(),
            merge_policy: MergePolicy::default(),
            session_lifetime_secs: 86_400,
            cookie_name: "tribunal_session".into(),
            state_cookie_name: "tribunal_oauth_state".into(),
            state_lifetime_secs: 600,
            cookie_secure: false,
        }
    }
}
