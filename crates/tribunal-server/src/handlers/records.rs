//! Citizens, vehicles, confiscations and citations.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tribunal_core::models::citation::{Citation, CreateCitation};
use tribunal_core::models::citizen::{BackgroundEntry, Citizen, CreateCitizen};
use tribunal_core::models::confiscation::{Confiscation, CreateConfiscation};
use tribunal_core::models::vehicle::{CreateVehicle, Vehicle};
use tribunal_workflow::parse_id;

use crate::error::ApiResult;
use crate::extract::{ApiJson, CurrentUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Citizens
// ---------------------------------------------------------------------------

pub async fn list_citizens(State(state): State<AppState>) -> ApiResult<Json<Vec<Citizen>>> {
    Ok(Json(state.citizens.list().await?))
}

pub async fn create_citizen(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCitizen>,
) -> ApiResult<(StatusCode, Json<Citizen>)> {
    let citizen = state.citizens.create(input).await?;
    Ok((StatusCode::CREATED, Json(citizen)))
}

pub async fn get_citizen(
    State(state): State<AppState>,
    Path(national_id): Path<String>,
) -> ApiResult<Json<Citizen>> {
    Ok(Json(state.citizens.get(&national_id).await?))
}

pub async fn append_background(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(national_id): Path<String>,
    ApiJson(entry): ApiJson<BackgroundEntry>,
) -> ApiResult<(StatusCode, Json<Citizen>)> {
    let citizen = state
        .citizens
        .append_background(&user, &national_id, entry)
        .await?;
    Ok((StatusCode::CREATED, Json(citizen)))
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

pub async fn list_vehicles(State(state): State<AppState>) -> ApiResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.vehicles.list().await?))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateVehicle>,
) -> ApiResult<(StatusCode, Json<Vehicle>)> {
    let vehicle = state.vehicles.create(input).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> ApiResult<Json<Vehicle>> {
    Ok(Json(state.vehicles.get(&plate).await?))
}

// ---------------------------------------------------------------------------
// Confiscations and citations
// ---------------------------------------------------------------------------

pub async fn create_confiscation(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateConfiscation>,
) -> ApiResult<(StatusCode, Json<Confiscation>)> {
    let confiscation = state.case_records.create_confiscation(input).await?;
    Ok((StatusCode::CREATED, Json(confiscation)))
}

pub async fn confiscations_for(
    State(state): State<AppState>,
    Path(cause_id): Path<String>,
) -> ApiResult<Json<Vec<Confiscation>>> {
    Ok(Json(
        state
            .case_records
            .confiscations_for(parse_id("cause", &cause_id)?)
            .await?,
    ))
}

pub async fn create_citation(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCitation>,
) -> ApiResult<(StatusCode, Json<Citation>)> {
    let citation = state.case_records.create_citation(input).await?;
    Ok((StatusCode::CREATED, Json(citation)))
}

pub async fn citations_for(
    State(state): State<AppState>,
    Path(cause_id): Path<String>,
) -> ApiResult<Json<Vec<Citation>>> {
    Ok(Json(
        state
            .case_records
            .citations_for(parse_id("cause", &cause_id)?)
            .await?,
    ))
}
