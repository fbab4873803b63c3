//! # Web API Route Definitions

use crate::web::handlers;
use crate::web::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Listing routes:
/// - `/{form_id}/filteredResponses` - Filtered, paginated submissions
pub fn response_routes() -> Router<AppState> {
    Router::new().route(
        "/{form_id}/filteredResponses",
        get(handlers::responses::filtered_responses),
    )
}

/// Table management routes:
/// - `/generateSchema` - Create missing tables
/// - `/populateTables` - Copy upstream submissions into the tables
pub fn schema_routes() -> Router<AppState> {
    Router::new()
        .route("/generateSchema", post(handlers::schema::generate_schema))
        .route("/populateTables", post(handlers::schema::populate))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
