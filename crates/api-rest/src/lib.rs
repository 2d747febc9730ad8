//! # API REST
//!
//! REST API for the ward view.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, session header)
//!
//! Uses `api-shared` for response types and `ward-core` for everything else.

#![warn(rust_2018_idioms)]

use api_shared::{HealthRes, HealthService, ListLocationsRes, LocationRes, WardViewRes};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use ward_core::WardViewService;

/// Request header naming the caller's session location.
pub const SESSION_LOCATION_HEADER: &str = "x-session-location";

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    service: Arc<WardViewService>,
}

impl AppState {
    pub fn new(service: WardViewService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_locations, session_ward_view, ward_view),
    components(schemas(
        api_shared::HealthRes,
        api_shared::LocationRes,
        api_shared::ListLocationsRes,
        api_shared::NotificationRes,
        api_shared::BedTypeRes,
        api_shared::BedRes,
        api_shared::WardPatientRes,
        api_shared::BedOccupancyRes,
        api_shared::WardViewRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST application.
///
/// Routes:
/// - `GET /health`
/// - `GET /locations`
/// - `GET /ward` (session location)
/// - `GET /ward/:location_uuid`
/// - Swagger UI at `/swagger-ui`, OpenAPI document at `/api-docs/openapi.json`
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/locations", get(list_locations))
        .route("/ward", get(session_ward_view))
        .route("/ward/:location_uuid", get(ward_view))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn session_override(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_LOCATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/locations",
    responses(
        (status = 200, description = "All known locations", body = ListLocationsRes)
    )
)]
/// List every known location
#[axum::debug_handler]
async fn list_locations(State(state): State<AppState>) -> Json<ListLocationsRes> {
    let locations = state
        .service
        .locations()
        .iter()
        .map(LocationRes::from)
        .collect();
    Json(ListLocationsRes { locations })
}

#[utoipa::path(
    get,
    path = "/ward",
    params(
        ("x-session-location" = Option<String>, Header, description = "Session location uuid")
    ),
    responses(
        (status = 200, description = "Ward view of the session location", body = WardViewRes)
    )
)]
/// Ward view of the session location
///
/// The session location is taken from the `x-session-location` header when it names a known
/// location, otherwise the configured default is used.
#[axum::debug_handler]
async fn session_ward_view(State(state): State<AppState>, headers: HeaderMap) -> Json<WardViewRes> {
    let presentation = state.service.render(None, session_override(&headers)).await;
    Json(WardViewRes::from(&presentation))
}

#[utoipa::path(
    get,
    path = "/ward/{location_uuid}",
    params(
        ("location_uuid" = String, Path, description = "Location uuid"),
        ("x-session-location" = Option<String>, Header, description = "Session location uuid")
    ),
    responses(
        (status = 200, description = "Ward view of the location; unknown locations and fetch failures are reported in-band", body = WardViewRes)
    )
)]
/// Ward view of the location named in the path
///
/// Every outcome, including an unknown location or a failed admission fetch, is a `200` whose
/// body carries the render mode and the banner to show.
#[axum::debug_handler]
async fn ward_view(
    State(state): State<AppState>,
    Path(location_uuid): Path<String>,
    headers: HeaderMap,
) -> Json<WardViewRes> {
    tracing::debug!(location = %location_uuid, "ward view requested");
    let presentation = state
        .service
        .render(Some(location_uuid), session_override(&headers))
        .await;
    Json(WardViewRes::from(&presentation))
}
