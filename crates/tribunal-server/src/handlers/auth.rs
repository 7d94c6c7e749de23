//! Discord login, current user and logout.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use tracing::warn;
use tribunal_auth::token::login_state_matches;
use tribunal_core::models::user::User;

use crate::cookie::{clear_cookie, clear_state_cookie, read_cookie, session_cookie, state_cookie};
use crate::dto::{CallbackParams, MessageResponse};
use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

const AFTER_LOGIN: &str = "/dashboard";
const LOGIN_FAILED: &str = "/?error=auth_failed";

pub async fn start_login(State(state): State<AppState>) -> Response {
    let login = state.auth.begin_login();
    (
        [(SET_COOKIE, state_cookie(state.auth.config(), &login.state))],
        Redirect::to(&login.url),
    )
        .into_response()
}

pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    let config = state.auth.config();
    let failed = || {
        (
            [(SET_COOKIE, clear_state_cookie(config))],
            Redirect::to(LOGIN_FAILED),
        )
            .into_response()
    };

    let issued = read_cookie(&headers, &config.state_cookie_name);
    if !login_state_matches(issued, params.state.as_deref()) {
        warn!("login callback with missing or mismatched state");
        return failed();
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        warn!(error = ?params.error, "login callback without code");
        return failed();
    };

    match state.auth.login(&code).await {
        Ok(login) => (
            AppendHeaders([
                (SET_COOKIE, clear_state_cookie(config)),
                (SET_COOKIE, session_cookie(config, &login.token)),
            ]),
            Redirect::to(AFTER_LOGIN),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "login failed");
            failed()
        }
    }
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let config = state.auth.config();
    if let Some(token) = read_cookie(&headers, &config.cookie_name) {
        state.auth.logout(token).await?;
    }
    Ok((
        [(SET_COOKIE, clear_cookie(config))],
        Json(MessageResponse::new("Sesión cerrada")),
    )
        .into_response())
}
