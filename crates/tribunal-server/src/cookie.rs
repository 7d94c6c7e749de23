//! Session and login-state cookie encoding.

use axum::http::{HeaderMap, header::COOKIE};
use tribunal_auth::AuthConfig;

/// Value of the cookie called `name`, if the request carries one.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(config: &AuthConfig, token: &str) -> String {
    build(config, &config.cookie_name, token, config.session_lifetime_secs)
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_cookie(config: &AuthConfig) -> String {
    build(config, &config.cookie_name, "", 0)
}

/// `Set-Cookie` value holding the OAuth `state` of a started login.
pub fn state_cookie(config: &AuthConfig, state: &str) -> String {
    build(config, &config.state_cookie_name, state, config.state_lifetime_secs)
}

pub fn clear_state_cookie(config: &AuthConfig) -> String {
    build(config, &config.state_cookie_name, "", 0)
}

fn build(config: &AuthConfig, name: &str, value: &str, max_age: u64) -> String {
    let secure = if config.cookie_secure { "; Secure" } else { "" };
    format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}{secure}")
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn finds_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; tribunal_session=abc123; lang=es"),
        );
        assert_eq!(read_cookie(&headers, "tribunal_session"), Some("abc123"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("tribunal_session="));
        assert_eq!(read_cookie(&headers, "tribunal_session"), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let config = AuthConfig::default();
        let cookie = session_cookie(&config, "tok");
        assert!(cookie.starts_with("tribunal_session=tok; "));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));

        let secure = AuthConfig {
            cookie_secure: true,
            ..AuthConfig::default()
        };
        assert!(clear_cookie(&secure).ends_with("Max-Age=0; Secure"));
    }

    #[test]
    fn state_cookie_is_short_lived() {
        let config = AuthConfig::default();
        let cookie = state_cookie(&config, "nonce");
        assert!(cookie.starts_with("tribunal_oauth_state=nonce; "));
        assert!(cookie.contains("Max-Age=600"));
        assert!(clear_state_cookie(&config).starts_with("tribunal_oauth_state=; "));
    }
}
