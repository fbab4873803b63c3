//! # Listing Handler
//!
//! Query parameters that fail to deserialize are treated as absent, so a
//! malformed request still gets the default listing.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::{error, info, warn};

use crate::models::ListingResponse;
use crate::query_builder::QueryMetadata;
use crate::services::{FilterParams, FilteredResponsesQuery};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

/// The extracted parameters, or their defaults when the query string
/// could not be read
fn or_default<T: Default>(extracted: Result<Query<T>, QueryRejection>, kind: &str) -> T {
    extracted.map(|Query(params)| params).unwrap_or_else(|rejection| {
        warn!(error = %rejection, kind, "Ignoring unreadable query parameters");
        T::default()
    })
}

/// GET /{form_id}/filteredResponses
pub async fn filtered_responses(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
    filters: Result<Query<FilterParams>, QueryRejection>,
    metadata: Result<Query<QueryMetadata>, QueryRejection>,
) -> ApiResult<Json<ListingResponse>> {
    let filters = or_default(filters, "filters");
    let metadata = or_default(metadata, "listing");

    let query = FilteredResponsesQuery::from_params(&filters, metadata);
    info!(
        form_id = %form_id,
        filters = query.filters().len(),
        status = query.metadata().status().as_str(),
        "Listing filtered responses"
    );

    let mut conn = state.pool.acquire().await.map_err(|err| {
        error!(error = %err, "Failed to acquire a database connection");
        ApiError::query_failed(err)
    })?;

    let data = query.execute(&mut *conn).await.map_err(|err| {
        error!(error = %err, "Listing query failed");
        ApiError::query_failed(err)
    })?;

    Ok(Json(ListingResponse { data }))
}
