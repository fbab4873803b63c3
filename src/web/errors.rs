//! # Web API Error Types
//!
//! Every failure is a JSON body `{"message": ...}`. Leverages thiserror for
//! the message text and Axum's IntoResponse for HTTP conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Web API specific errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Encountered an error when trying to query for results. The issue encountered was: {0}")]
    QueryFailed(String),

    #[error("Failed to generate tables. The following error was encountered: {0}.")]
    SchemaFailed(String),

    #[error("Failed to fetch seed data")]
    SeedDataUnavailable,

    #[error("Failed to populate tables for the following reason: {0}")]
    PopulateFailed(String),

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,
}

impl ApiError {
    pub fn query_failed(err: impl std::fmt::Display) -> Self {
        Self::QueryFailed(err.to_string())
    }

    pub fn schema_failed(err: impl std::fmt::Display) -> Self {
        Self::SchemaFailed(err.to_string())
    }

    pub fn populate_failed(err: impl std::fmt::Display) -> Self {
        Self::PopulateFailed(err.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "message": self.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
