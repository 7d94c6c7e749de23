//! Tribunal Server — HTTP API for the judicial portal.
//!
//! # Endpoints
//!
//! ## Public
//! - `GET /health` - Health check
//! - `GET /api/auth/discord` - Start a Discord login
//! - `GET /auth/discord/callback` - Discord OAuth callback
//!
//! ## Session
//! - `GET /api/auth/me` - Current user
//! - `POST /api/auth/logout` - End the session
//!
//! ## Causes
//! - `GET|POST /api/causes`
//! - `GET /api/causes/trash`
//! - `GET|PUT|DELETE /api/causes/{id}`
//! - `POST /api/causes/{id}/restore`
//! - `DELETE /api/causes/{id}/permanent`
//! - `POST /api/causes/{id}/evidence`
//!
//! ## Warrants
//! - `POST /api/warrants`
//! - `GET /api/warrants/pending`
//! - `GET /api/warrants/cause/{cause_id}`
//! - `GET /api/warrants/{id}`
//! - `PATCH /api/warrants/{id}/sign`
//! - `PATCH /api/warrants/{id}/reject`
//!
//! ## Records and search
//! - `GET /api/search/{kind}/{query}`
//! - `GET|POST /api/citizens`, `GET /api/citizens/{national_id}`,
//!   `POST /api/citizens/{national_id}/background`
//! - `GET|POST /api/vehicles`, `GET /api/vehicles/{plate}`
//! - `POST /api/confiscations`, `GET /api/confiscations/{cause_id}`
//! - `POST /api/citations`, `GET /api/citations/{cause_id}`
//!
//! Every route outside the public group passes through
//! [`middleware::policy::require_policy`].

pub mod config;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use router::create_router;
pub use state::AppState;
