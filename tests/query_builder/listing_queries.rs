use form_responses::query_builder::{
    compile_having, CandidateCount, FilterSet, QueryMetadata, SqlParam,
};
use form_responses::services::FilteredResponsesQuery;

fn two_question_filters() -> FilterSet {
    FilterSet::parse(
        r#"[
            {"id": "color", "condition": "equals", "value": "red"},
            {"id": "age", "condition": "greater_than", "value": 30}
        ]"#,
    )
}

#[test]
fn test_having_keeps_only_complete_candidates() {
    let filters = two_question_filters();
    let having = compile_having(
        "submission.submission_id",
        &filters,
        &[
            CandidateCount::new("s1", 2),
            CandidateCount::new("s2", 1),
            CandidateCount::new("s3", 2),
        ],
    )
    .expect("two eligible candidates");

    assert_eq!(
        having.sql,
        "(submission.submission_id = ? AND count(*) = ?) OR (submission.submission_id = ? AND count(*) = ?)"
    );
    assert_eq!(
        having.params,
        vec![
            SqlParam::text("s1"),
            SqlParam::Integer(2),
            SqlParam::text("s3"),
            SqlParam::Integer(2)
        ]
    );
}

#[test]
fn test_no_eligible_candidate_compiles_nothing() {
    let filters = two_question_filters();
    assert!(compile_having(
        "submission.submission_id",
        &filters,
        &[CandidateCount::new("s1", 1)]
    )
    .is_none());
    assert!(compile_having("submission.submission_id", &filters, &[]).is_none());
}

#[test]
fn test_filtered_scan_lines_up_filter_and_having_parameters() {
    let filters = two_question_filters();
    let metadata: QueryMetadata =
        serde_json::from_value(serde_json::json!({"sort": "desc", "limit": "25", "offset": "50"}))
            .expect("valid metadata");
    let query = FilteredResponsesQuery::new(filters.clone(), metadata);
    let having = compile_having(
        "submission.submission_id",
        &filters,
        &[CandidateCount::new("s9", 2)],
    )
    .expect("eligible candidate");

    let scan = query.filtered_scan_query(having);
    assert_eq!(scan.placeholder_count(), scan.params.len());
    assert_eq!(scan.params.len(), 9 * 2 + 2);
    assert_eq!(scan.params[0], SqlParam::text("color"));
    assert_eq!(scan.params[1], SqlParam::text("red"));
    assert_eq!(scan.params[9], SqlParam::text("age"));
    assert_eq!(scan.params[10], SqlParam::text("30"));
    assert_eq!(scan.params[18], SqlParam::text("s9"));
    assert_eq!(scan.params[19], SqlParam::Integer(2));
    assert!(scan.sql.contains("GROUP BY submission.submission_id HAVING"));
    assert!(scan
        .sql
        .ends_with("ORDER BY submission.submission_time desc LIMIT 50,25"));
}

#[test]
fn test_existence_scan_honors_status_and_bounds() {
    let metadata: QueryMetadata = serde_json::from_value(serde_json::json!({
        "status": "in_progress",
        "afterDate": "2024-01-01T00:00:00.000Z",
        "beforeDate": "2024-03-01"
    }))
    .expect("valid metadata");
    let scan = FilteredResponsesQuery::new(two_question_filters(), metadata).existence_scan_query();

    assert_eq!(scan.placeholder_count(), scan.params.len());
    assert_eq!(
        scan.params,
        vec![
            SqlParam::text("0"),
            SqlParam::text("2024-01-01 00:00:00"),
            SqlParam::text("color"),
            SqlParam::text("age")
        ]
    );
    assert!(scan.sql.contains("submission.submission_time > ? AND 1"));
    assert!(!scan.sql.contains("LIMIT"));
}
