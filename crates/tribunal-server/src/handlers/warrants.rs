//! Warrant endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tribunal_core::models::warrant::{RejectWarrant, RequestWarrant, Warrant};
use tribunal_workflow::parse_id;

use crate::error::ApiResult;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub async fn request(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(input): ApiJson<RequestWarrant>,
) -> ApiResult<(StatusCode, Json<Warrant>)> {
    let warrant = state.warrants.request(&user, input).await?;
    Ok((StatusCode::CREATED, Json(warrant)))
}

pub async fn pending(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Warrant>>> {
    Ok(Json(state.warrants.list_pending(&user).await?))
}

pub async fn by_cause(
    State(state): State<AppState>,
    Path(cause_id): Path<String>,
) -> ApiResult<Json<Vec<Warrant>>> {
    Ok(Json(
        state
            .warrants
            .list_by_cause(parse_id("cause", &cause_id)?)
            .await?,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Warrant>> {
    Ok(Json(state.warrants.get(parse_id("warrant", &id)?).await?))
}

pub async fn sign(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Warrant>> {
    Ok(Json(
        state.warrants.sign(&user, parse_id("warrant", &id)?).await?,
    ))
}

pub async fn reject(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<RejectWarrant>,
) -> ApiResult<Json<Warrant>> {
    Ok(Json(
        state
            .warrants
            .reject(&user, parse_id("warrant", &id)?, input)
            .await?,
    ))
}
