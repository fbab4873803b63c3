//! # Table Management Handlers

use axum::extract::State;
use axum::Json;
use tracing::{error, info};

use super::MessageResponse;
use crate::database::create_schema;
use crate::error::FormResponsesError;
use crate::services::populate_tables;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

/// POST /generateSchema
pub async fn generate_schema(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    create_schema(&state.pool).await.map_err(|err| {
        error!(error = %err, "Schema creation failed");
        ApiError::schema_failed(err)
    })?;

    Ok(Json(MessageResponse::new("Successfully created tables")))
}

/// POST /populateTables
pub async fn populate(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    match populate_tables(&state.pool, state.form_source.as_ref()).await {
        Ok(summary) => {
            info!(
                submissions = summary.submissions,
                questions = summary.questions,
                answers = summary.answers,
                "Populate request completed"
            );
            Ok(Json(MessageResponse::new("Successfully populated tables")))
        }
        Err(FormResponsesError::UpstreamError(reason)) => {
            error!(reason = %reason, "Seed data fetch failed");
            Err(ApiError::SeedDataUnavailable)
        }
        Err(err) => Err(ApiError::populate_failed(err)),
    }
}
