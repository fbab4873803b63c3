use crate::common::{FailingFormSource, StaticFormSource};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use form_responses::client::FormSource;
use form_responses::web::{create_app, AppState};
use form_responses::FormResponsesError;
use serde_json::Value;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn unreachable_pool() -> sqlx::MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(
            MySqlConnectOptions::new()
                .host("127.0.0.1")
                .port(1)
                .username("nobody")
                .database("form_responses"),
        )
}

fn app(form_source: Arc<dyn FormSource>) -> Router {
    create_app(AppState::new(unreachable_pool(), form_source))
}

fn app_with_empty_source() -> Router {
    app(Arc::new(StaticFormSource::default()))
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

#[tokio::test]
async fn test_listing_database_failure_is_reported_as_message() {
    let (status, body) = send(
        app_with_empty_source(),
        Method::GET,
        "/cLZojxk94ous/filteredResponses?filters=%5B%5D&limit=10",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["message"].as_str().expect("message string");
    assert!(message.starts_with(
        "Encountered an error when trying to query for results. The issue encountered was: "
    ));
}

#[tokio::test]
async fn test_unreadable_parameters_are_not_rejected() {
    // repeated keys fail query deserialization; the handler still runs
    // the listing instead of answering 400
    let (status, body) = send(
        app_with_empty_source(),
        Method::GET,
        "/cLZojxk94ous/filteredResponses?status=finished&status=in_progress&filters=x&filters=y",
    )
    .await;

    assert_ne!(status, StatusCode::BAD_REQUEST);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"]
        .as_str()
        .expect("message string")
        .starts_with("Encountered an error when trying to query for results."));
}

#[tokio::test]
async fn test_populate_upstream_failure() {
    let source = FailingFormSource {
        error: || FormResponsesError::upstream("submissions request failed with status: 401"),
    };
    let (status, body) = send(app(Arc::new(source)), Method::POST, "/populateTables").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch seed data");
}

#[tokio::test]
async fn test_populate_database_failure() {
    let (status, body) = send(app_with_empty_source(), Method::POST, "/populateTables").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"]
        .as_str()
        .expect("message string")
        .starts_with("Failed to populate tables for the following reason: "));
}

#[tokio::test]
async fn test_generate_schema_failure() {
    let (status, body) = send(app_with_empty_source(), Method::POST, "/generateSchema").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["message"].as_str().expect("message string");
    assert!(message.starts_with("Failed to generate tables. The following error was encountered: "));
    assert!(message.ends_with('.'));
}

#[tokio::test]
async fn test_health_reports_unavailable_database() {
    let (status, body) = send(app_with_empty_source(), Method::GET, "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_wrong_method_and_unknown_route() {
    let (status, _) = send(app_with_empty_source(), Method::GET, "/populateTables").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(app_with_empty_source(), Method::GET, "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
