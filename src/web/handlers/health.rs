//! # Health Check Handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::database::health_check;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
}

/// Database round trip: GET /health
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    match health_check(&state.pool).await {
        Ok(true) => Ok(Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })),
        Ok(false) => {
            error!("Database health check returned an unexpected value");
            Err(ApiError::ServiceUnavailable)
        }
        Err(err) => {
            error!(error = %err, "Database health check failed");
            Err(ApiError::ServiceUnavailable)
        }
    }
}
