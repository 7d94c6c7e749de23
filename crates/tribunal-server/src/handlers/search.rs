use axum::{
    Json,
    extract::{Path, State},
};
use tribunal_core::models::search::SearchResults;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn search(
    State(state): State<AppState>,
    Path((kind, query)): Path<(String, String)>,
) -> ApiResult<Json<SearchResults>> {
    Ok(Json(state.search.dispatch(&kind, &query).await?))
}
