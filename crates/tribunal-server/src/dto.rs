//! Response bodies and query parameters that are not domain models.

use serde::{Deserialize, Serialize};
use tribunal_core::models::cause::Cause;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A trash transition result.
#[derive(Debug, Serialize, Deserialize)]
pub struct CauseMessage {
    pub message: String,
    pub cause: Cause,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query string of the OAuth redirect back from Discord.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
