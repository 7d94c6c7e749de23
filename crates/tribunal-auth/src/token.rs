//! Opaque session token generation and hashing, plus the OAuth `state`
//! nonce.
//!
//! The raw token only ever lives in the client's cookie; the database
//! stores its SHA-256 hash.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Generate a cryptographically random session token (32 bytes,
/// base64url-encoded without padding).
pub fn generate_session_token() -> String {
    let bytes: [u8; 32] = rand::Rng::random(&mut rand::rng());
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Random nonce tying an OAuth callback to the browser that started it.
pub fn generate_login_state() -> String {
    let bytes: [u8; 16] = rand::Rng::random(&mut rand::rng());
    URL_SAFE_NO_PAD.encode(bytes)
}

/// The callback's `state` must equal the nonce issued at login start.
pub fn login_state_matches(issued: Option<&str>, returned: Option<&str>) -> bool {
    match (issued, returned) {
        (Some(issued), Some(returned)) => !issued.is_empty() && issued == returned,
        _ => false,
    }
}

/// Hex-encoded SHA-256 of a raw session token.
pub fn hash_session_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_is_url_safe() {
        let token = generate_session_token();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        // 32 bytes → 43 base64url chars.
        assert_eq!(token.len(), 43);
    }

    #[test]
    fn tokens_are_not_repeated() {
        assert_ne!(generate_session_token(), generate_session_token());
    }

    #[test]
    fn login_state_must_round_trip() {
        let state = generate_login_state();
        assert_eq!(state.len(), 22);
        assert!(login_state_matches(Some(&state), Some(&state)));
        assert!(!login_state_matches(Some(&state), Some("forged")));
        assert!(!login_state_matches(Some(&state), None));
        assert!(!login_state_matches(None, Some(&state)));
        assert!(!login_state_matches(Some(""), Some("")));
    }

    #[test]
    fn hash_is_deterministic_hex() {
        let h = hash_session_token("some-session-token");
        assert_eq!(h, hash_session_token("some-session-token"));
        assert_eq!(h.len(), 64);
        assert_ne!(h, hash_session_token("other-token"));
    }
}
