//! # Web API
//!
//! Axum routes over the listing orchestrator and ingestion.

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use errors::{ApiError, ApiResult};
pub use state::AppState;

/// Create the web application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let app = Router::new()
        .merge(routes::health_routes())
        .merge(routes::schema_routes())
        .merge(routes::response_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Web application created with all routes and middleware");
    app
}
