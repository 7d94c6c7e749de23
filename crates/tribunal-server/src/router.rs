//! API Router

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    middleware,
    routing::{delete, get, patch, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, causes, health, records, search, warrants};
use crate::middleware::require_policy;
use crate::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/discord", get(auth::start_login))
        .route("/auth/discord/callback", get(auth::callback));

    let protected = Router::new()
        // Session
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        // Causes
        .route("/api/causes", get(causes::list).post(causes::create))
        .route("/api/causes/trash", get(causes::trash))
        .route(
            "/api/causes/{id}",
            get(causes::get)
                .put(causes::update)
                .delete(causes::soft_delete),
        )
        .route("/api/causes/{id}/restore", post(causes::restore))
        .route("/api/causes/{id}/permanent", delete(causes::permanent_delete))
        .route("/api/causes/{id}/evidence", post(causes::add_evidence))
        // Warrants
        .route("/api/warrants", post(warrants::request))
        .route("/api/warrants/pending", get(warrants::pending))
        .route("/api/warrants/cause/{cause_id}", get(warrants::by_cause))
        .route("/api/warrants/{id}", get(warrants::get))
        .route("/api/warrants/{id}/sign", patch(warrants::sign))
        .route("/api/warrants/{id}/reject", patch(warrants::reject))
        // Search
        .route("/api/search/{kind}/{query}", get(search::search))
        // Records
        .route(
            "/api/citizens",
            get(records::list_citizens).post(records::create_citizen),
        )
        .route("/api/citizens/{national_id}", get(records::get_citizen))
        .route(
            "/api/citizens/{national_id}/background",
            post(records::append_background),
        )
        .route(
            "/api/vehicles",
            get(records::list_vehicles).post(records::create_vehicle),
        )
        .route("/api/vehicles/{plate}", get(records::get_vehicle))
        .route("/api/confiscations", post(records::create_confiscation))
        .route(
            "/api/confiscations/{cause_id}",
            get(records::confiscations_for),
        )
        .route("/api/citations", post(records::create_citation))
        .route("/api/citations/{cause_id}", get(records::citations_for))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_policy,
        ));

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE]);

    public
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
