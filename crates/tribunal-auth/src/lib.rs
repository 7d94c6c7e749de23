//! Tribunal Auth — Discord OAuth login, role resolution and opaque
//! cookie sessions.

pub mod config;
pub mod discord;
pub mod error;
pub mod resolver;
pub mod service;
pub mod token;

pub use config::{AuthConfig, DiscordConfig, RoleMapping};
pub use discord::{DiscordClient, Identity, IdentityProvider};
pub use error::AuthError;
pub use resolver::MergePolicy;
pub use service::{AuthService, LoginOutput, LoginStart};
