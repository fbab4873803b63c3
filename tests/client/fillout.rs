use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use form_responses::client::{FilloutClient, FormSource};
use form_responses::config::FilloutConfig;
use form_responses::models::SubmissionStatus;
use form_responses::FormResponsesError;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const SERVED_PER_PAGE: usize = 2;

#[derive(Clone, Default)]
struct Upstream {
    total: usize,
    fail: bool,
    requests: Arc<Mutex<Vec<(String, HashMap<String, String>, Option<String>)>>>,
}

async fn submissions(
    State(upstream): State<Upstream>,
    Path(form_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    upstream
        .requests
        .lock()
        .expect("request log")
        .push((form_id, params.clone(), authorization));

    if upstream.fail {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let offset: usize = params
        .get("offset")
        .and_then(|offset| offset.parse().ok())
        .unwrap_or(0);
    let responses: Vec<Value> = (offset..upstream.total.min(offset + SERVED_PER_PAGE))
        .map(|i| {
            json!({
                "submissionId": format!("s{i}"),
                "submissionTime": "2024-02-01T08:30:00.000Z",
                "lastUpdatedAt": "2024-02-01T08:30:00.000Z",
                "editLink": format!("https://forms.example/edit/s{i}"),
                "questions": [{"id": "color", "name": "Color", "type": "ShortAnswer", "value": "red"}],
                "calculations": [],
                "urlParameters": []
            })
        })
        .collect();

    Ok(Json(json!({
        "responses": responses,
        "totalResponses": upstream.total,
        "pageCount": upstream.total.div_ceil(SERVED_PER_PAGE)
    })))
}

async fn serve(upstream: Upstream) -> FilloutClient {
    let app = Router::new()
        .route("/v1/api/forms/{form_id}/submissions", get(submissions))
        .with_state(upstream);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let address = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stand-in server");
    });

    FilloutClient::new(&FilloutConfig {
        base_url: format!("http://{address}/v1/api"),
        form_id: "form123".to_string(),
        secret: "sk_test".to_string(),
    })
    .expect("valid client")
}

#[tokio::test]
async fn test_pages_until_total_is_reached() {
    let upstream = Upstream {
        total: 5,
        ..Default::default()
    };
    let client = serve(upstream.clone()).await;

    let submissions = client
        .fetch_submissions(SubmissionStatus::Finished)
        .await
        .expect("fetch succeeds");

    assert_eq!(submissions.len(), 5);
    assert_eq!(submissions[4].submission_id, "s4");
    assert_eq!(submissions[0].submission_time, "2024-02-01 08:30:00");
    assert_eq!(submissions[0].questions[0].value(), Some("red"));

    let requests = upstream.requests.lock().expect("request log");
    let offsets: Vec<&str> = requests
        .iter()
        .map(|(_, params, _)| params["offset"].as_str())
        .collect();
    assert_eq!(offsets, vec!["0", "2", "4"]);
    let (form_id, params, authorization) = &requests[0];
    assert_eq!(form_id, "form123");
    assert_eq!(params["includeEditLink"], "true");
    assert_eq!(params["limit"], "150");
    assert!(!params.contains_key("status"));
    assert_eq!(authorization.as_deref(), Some("Bearer sk_test"));
}

#[tokio::test]
async fn test_in_progress_requests_carry_status() {
    let upstream = Upstream {
        total: 1,
        ..Default::default()
    };
    let client = serve(upstream.clone()).await;

    let submissions = client
        .fetch_submissions(SubmissionStatus::InProgress)
        .await
        .expect("fetch succeeds");

    assert_eq!(submissions[0].status, SubmissionStatus::InProgress);
    let requests = upstream.requests.lock().expect("request log");
    assert_eq!(requests[0].1["status"], "in_progress");
}

#[tokio::test]
async fn test_empty_form_makes_one_request() {
    let upstream = Upstream::default();
    let client = serve(upstream.clone()).await;

    let submissions = client
        .fetch_submissions(SubmissionStatus::Finished)
        .await
        .expect("fetch succeeds");

    assert!(submissions.is_empty());
    assert_eq!(upstream.requests.lock().expect("request log").len(), 1);
}

#[tokio::test]
async fn test_rejected_request_is_an_upstream_error() {
    let client = serve(Upstream {
        fail: true,
        ..Default::default()
    })
    .await;

    assert!(matches!(
        client.fetch_submissions(SubmissionStatus::Finished).await,
        Err(FormResponsesError::UpstreamError(_))
    ));
}
