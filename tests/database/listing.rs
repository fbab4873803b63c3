use crate::common::StaticFormSource;
use form_responses::database::{create_schema, health_check};
use form_responses::models::{Submission, SubmissionStatus};
use form_responses::query_builder::QueryMetadata;
use form_responses::services::{populate_tables, FilterParams, FilteredResponsesQuery};
use serde_json::json;
use sqlx::MySqlPool;

fn upstream(id: &str, submitted: &str, color: &str, age: i64, status: SubmissionStatus) -> Submission {
    Submission::from_api_json(
        &json!({
            "submissionId": id,
            "submissionTime": submitted,
            "lastUpdatedAt": submitted,
            "editLink": format!("https://forms.example/edit/{id}"),
            "questions": [
                {"id": "color", "name": "Favorite color", "type": "ShortAnswer", "value": color},
                {"id": "age", "name": "Age", "type": "NumberInput", "value": age}
            ]
        }),
        status,
    )
    .expect("valid submission")
}

async fn seeded(pool: &MySqlPool) {
    create_schema(pool).await.expect("schema");
    let source = StaticFormSource::new(
        vec![
            upstream("s1", "2024-01-01T10:00:00.000Z", "red", 41, SubmissionStatus::Finished),
            upstream("s2", "2024-01-02T10:00:00.000Z", "blue", 25, SubmissionStatus::Finished),
            upstream("s3", "2024-01-03T10:00:00.000Z", "red", 9, SubmissionStatus::Finished),
        ],
        vec![upstream("s4", "2024-01-04T10:00:00.000Z", "red", 50, SubmissionStatus::InProgress)],
    );
    let summary = populate_tables(pool, &source).await.expect("populate");
    assert_eq!(summary.submissions, 4);
    assert_eq!(summary.questions, 2);
}

fn mixed(id: &str, submitted: &str, due: &str, score: &str, nickname: &str) -> Submission {
    Submission::from_api_json(
        &json!({
            "submissionId": id,
            "submissionTime": submitted,
            "lastUpdatedAt": submitted,
            "questions": [
                {"id": "due", "name": "Due date", "type": "DatePicker", "value": due},
                {"id": "score", "name": "Score", "type": "ShortAnswer", "value": score},
                {"id": "nickname", "name": "Nickname", "type": "ShortAnswer", "value": nickname}
            ]
        }),
        SubmissionStatus::Finished,
    )
    .expect("valid submission")
}

/// Answers of every kind the filter CASE dispatches on
async fn seeded_mixed(pool: &MySqlPool) {
    create_schema(pool).await.expect("schema");
    let source = StaticFormSource::new(
        vec![
            mixed("m1", "2024-01-01T10:00:00.000Z", "2024-05-10T00:00:00.000Z", "-3.5", "Red"),
            mixed("m2", "2024-01-02T10:00:00.000Z", "2024-04-20T00:00:00.000Z", "10", "apple"),
            mixed("m3", "2024-01-03T10:00:00.000Z", "soon", "100", "zebra"),
        ],
        Vec::new(),
    );
    let summary = populate_tables(pool, &source).await.expect("populate");
    assert_eq!(summary.submissions, 3);
    assert_eq!(summary.questions, 3);
}

async fn list(pool: &MySqlPool, filters: &str, metadata: serde_json::Value) -> Vec<String> {
    let params = FilterParams {
        filters: Some(filters.to_string()),
    };
    let metadata: QueryMetadata = serde_json::from_value(metadata).expect("valid metadata");
    let mut conn = pool.acquire().await.expect("connection");
    FilteredResponsesQuery::from_params(&params, metadata)
        .execute(&mut *conn)
        .await
        .expect("listing")
        .into_iter()
        .map(|response| response.submission_id)
        .collect()
}

#[sqlx::test(migrations = false)]
async fn test_schema_creation_is_repeatable(pool: MySqlPool) {
    create_schema(&pool).await.expect("first run");
    create_schema(&pool).await.expect("second run");
    assert!(health_check(&pool).await.expect("health check"));
}

#[sqlx::test(migrations = false)]
async fn test_unfiltered_listing(pool: MySqlPool) {
    seeded(&pool).await;

    assert_eq!(list(&pool, "[]", json!({})).await, vec!["s1", "s2", "s3"]);
    assert_eq!(
        list(&pool, "[]", json!({"sort": "desc", "limit": "2"})).await,
        vec!["s3", "s2"]
    );
    assert_eq!(list(&pool, "[]", json!({"status": "in_progress"})).await, vec!["s4"]);
}

#[sqlx::test(migrations = false)]
async fn test_every_filter_must_match(pool: MySqlPool) {
    seeded(&pool).await;

    let red = r#"[{"id": "color", "condition": "equals", "value": "red"}]"#;
    assert_eq!(list(&pool, red, json!({})).await, vec!["s1", "s3"]);

    // 30 < age, compared numerically
    let red_over_thirty = r#"[
        {"id": "color", "condition": "equals", "value": "red"},
        {"id": "age", "condition": "less_than", "value": 30}
    ]"#;
    assert_eq!(list(&pool, red_over_thirty, json!({})).await, vec!["s1"]);

    let not_red = r#"[{"id": "color", "condition": "does_not_equal", "value": "red"}]"#;
    assert_eq!(list(&pool, not_red, json!({})).await, vec!["s2"]);

    let unknown_question = r#"[{"id": "missing", "condition": "equals", "value": "red"}]"#;
    assert!(list(&pool, unknown_question, json!({})).await.is_empty());
}

#[sqlx::test(migrations = false)]
async fn test_date_bounds_and_edit_link(pool: MySqlPool) {
    seeded(&pool).await;

    assert_eq!(
        list(&pool, "[]", json!({"afterDate": "2024-01-01T12:00:00.000Z"})).await,
        vec!["s2", "s3"]
    );

    let params = FilterParams::default();
    let metadata: QueryMetadata =
        serde_json::from_value(json!({"includeEditLink": "true", "limit": "1"})).expect("metadata");
    let mut conn = pool.acquire().await.expect("connection");
    let responses = FilteredResponsesQuery::from_params(&params, metadata)
        .execute(&mut *conn)
        .await
        .expect("listing");
    assert_eq!(responses[0].edit_link.as_deref(), Some("https://forms.example/edit/s1"));
    assert_eq!(responses[0].submission_time, "2024-01-01 10:00:00");
    assert_eq!(responses[0].questions.len(), 2);
}

#[sqlx::test(migrations = false)]
async fn test_datetimes_compare_chronologically(pool: MySqlPool) {
    seeded_mixed(&pool).await;

    // filter value on the left: 2024-05-01 > due
    let before = r#"[{"id": "due", "condition": "greater_than", "value": "2024-05-01T00:00:00.000Z"}]"#;
    assert_eq!(list(&pool, before, json!({})).await, vec!["m2"]);

    let after = r#"[{"id": "due", "condition": "less_than", "value": "2024-05-01T00:00:00.000Z"}]"#;
    assert_eq!(list(&pool, after, json!({})).await, vec!["m1"]);

    // "soon" is not a datetime, so even not_equals leaves it out
    let other_day = r#"[{"id": "due", "condition": "not_equals", "value": "2024-05-10T00:00:00.000Z"}]"#;
    assert_eq!(list(&pool, other_day, json!({})).await, vec!["m2"]);
}

#[sqlx::test(migrations = false)]
async fn test_datetime_filter_never_matches_text(pool: MySqlPool) {
    seeded_mixed(&pool).await;

    for condition in ["equals", "not_equals", "less_than", "greater_than"] {
        let filters = json!([{"id": "nickname", "condition": condition, "value": "2024-05-01T00:00:00.000Z"}]);
        assert!(
            list(&pool, &filters.to_string(), json!({})).await.is_empty(),
            "{condition} matched text answers"
        );
    }
}

#[sqlx::test(migrations = false)]
async fn test_numbers_compare_numerically(pool: MySqlPool) {
    seeded_mixed(&pool).await;

    // -3.5 < score
    let above = r#"[{"id": "score", "condition": "less_than", "value": "-3.5"}]"#;
    assert_eq!(list(&pool, above, json!({})).await, vec!["m2", "m3"]);

    // 9 > score; lexically "9" > "100" would also keep m3
    let below = r#"[{"id": "score", "condition": "greater_than", "value": 9}]"#;
    assert_eq!(list(&pool, below, json!({})).await, vec!["m1"]);

    let exact = r#"[{"id": "score", "condition": "equals", "value": 10}]"#;
    assert_eq!(list(&pool, exact, json!({})).await, vec!["m2"]);
}

#[sqlx::test(migrations = false)]
async fn test_number_filter_never_matches_text(pool: MySqlPool) {
    seeded_mixed(&pool).await;

    for condition in ["equals", "not_equals", "less_than", "greater_than"] {
        let filters = json!([{"id": "nickname", "condition": condition, "value": 42}]);
        assert!(
            list(&pool, &filters.to_string(), json!({})).await.is_empty(),
            "{condition} matched text answers"
        );
    }
}

#[sqlx::test(migrations = false)]
async fn test_text_compares_under_the_column_collation(pool: MySqlPool) {
    seeded_mixed(&pool).await;

    // "b" < nickname
    let after_b = r#"[{"id": "nickname", "condition": "less_than", "value": "b"}]"#;
    assert_eq!(list(&pool, after_b, json!({})).await, vec!["m1", "m3"]);

    let red = r#"[{"id": "nickname", "condition": "equals", "value": "red"}]"#;
    assert_eq!(list(&pool, red, json!({})).await, vec!["m1"]);
}
