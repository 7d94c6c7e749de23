//! Cause endpoints, including the trash.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tribunal_core::models::cause::{AddEvidence, Cause, CreateCause, UpdateCause};
use tribunal_workflow::parse_id;

use crate::dto::{CauseMessage, MessageResponse};
use crate::error::ApiResult;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Cause>>> {
    Ok(Json(state.causes.list().await?))
}

pub async fn trash(State(state): State<AppState>) -> ApiResult<Json<Vec<Cause>>> {
    Ok(Json(state.causes.list_deleted().await?))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(input): ApiJson<CreateCause>,
) -> ApiResult<(StatusCode, Json<Cause>)> {
    let cause = state.causes.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(cause)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Cause>> {
    Ok(Json(state.causes.get(parse_id("cause", &id)?).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateCause>,
) -> ApiResult<Json<Cause>> {
    Ok(Json(
        state.causes.update(parse_id("cause", &id)?, input).await?,
    ))
}

pub async fn soft_delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<CauseMessage>> {
    let cause = state
        .causes
        .soft_delete(&user, parse_id("cause", &id)?)
        .await?;
    Ok(Json(CauseMessage {
        message: "Causa movida a papelera".into(),
        cause,
    }))
}

pub async fn restore(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<CauseMessage>> {
    let cause = state.causes.restore(&user, parse_id("cause", &id)?).await?;
    Ok(Json(CauseMessage {
        message: "Causa restaurada".into(),
        cause,
    }))
}

pub async fn permanent_delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .causes
        .permanent_delete(&user, parse_id("cause", &id)?)
        .await?;
    Ok(Json(MessageResponse::new("Causa eliminada permanentemente")))
}

pub async fn add_evidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<AddEvidence>,
) -> ApiResult<Json<Cause>> {
    Ok(Json(
        state
            .causes
            .add_evidence(parse_id("cause", &id)?, input)
            .await?,
    ))
}
