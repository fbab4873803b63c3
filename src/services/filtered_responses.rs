//! # Filtered Responses
//!
//! Composes filters, metadata and the HAVING compiler into the two listing
//! shapes and reassembles the flat rows into nested submissions.
//!
//! Without filters one query lists submissions directly. With filters the
//! listing runs in two phases:
//!
//! 1. the existence scan finds submissions with any answer to a filtered
//!    question and how many of those questions each one answered
//! 2. the filtered scan keeps rows passing a filter and demands, through
//!    HAVING, one passing row per filtered question
//!
//! Either way a final query reads every answered question of the matched
//! submissions, and the rows are merged onto their submissions in listing
//! order.

use crate::constants::{columns, joins, tables};
use crate::database::ResponseStore;
use crate::error::Result;
use crate::logging::log_query_operation;
use crate::models::{Question, Submission, SubmissionResponse};
use crate::query_builder::{
    compile_having, CandidateCount, FilterSet, QueryBuilder, QueryMetadata, SqlFragment,
    SqlParam, WhereClause,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

const SUBMISSION_FIELDS: [&str; 5] = [
    columns::SUBMISSION_ID,
    columns::SUBMISSION_TIME,
    columns::SUBMISSION_LAST_UPDATED_AT,
    columns::SUBMISSION_EDIT_LINK,
    columns::SUBMISSION_STATUS_ID,
];

const CANDIDATE_FIELDS: [&str; 3] = [
    columns::SUBMISSION_ID,
    "group_concat(DISTINCT question.id) AS question_ids",
    "COUNT(DISTINCT question.id) AS question_count",
];

const QUESTION_ANSWER_FIELDS: [&str; 5] = [
    columns::QUESTION_ID,
    columns::QUESTION_NAME,
    columns::QUESTION_TYPE,
    columns::ANSWER_SUBMISSION_ID,
    columns::ANSWER_VALUE,
];

/// The `filters` request parameter: a JSON-encoded array of
/// `{id, condition, value}` objects
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterParams {
    pub filters: Option<String>,
}

impl FilterParams {
    pub fn filter_set(&self) -> FilterSet {
        self.filters
            .as_deref()
            .map(FilterSet::parse)
            .unwrap_or_default()
    }
}

/// One listing request
#[derive(Debug, Clone, Default)]
pub struct FilteredResponsesQuery {
    filters: FilterSet,
    metadata: QueryMetadata,
}

impl FilteredResponsesQuery {
    pub fn new(filters: FilterSet, metadata: QueryMetadata) -> Self {
        Self { filters, metadata }
    }

    pub fn from_params(params: &FilterParams, metadata: QueryMetadata) -> Self {
        Self::new(params.filter_set(), metadata)
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn metadata(&self) -> &QueryMetadata {
        &self.metadata
    }

    fn joined_submissions() -> QueryBuilder {
        QueryBuilder::new(tables::SUBMISSION)
            .inner_join(tables::ANSWER, joins::ANSWER_ON_SUBMISSION)
            .inner_join(tables::QUESTION, joins::QUESTION_ON_ANSWER)
    }

    /// Status and date bounds, AND-ed
    fn with_bounds(&self, builder: QueryBuilder) -> QueryBuilder {
        builder
            .where_fragment(self.metadata.status_clause(columns::SUBMISSION_STATUS_ID))
            .where_fragment(self.metadata.after_date_clause(columns::SUBMISSION_TIME))
            .where_fragment(self.metadata.before_date_clause(columns::SUBMISSION_TIME))
    }

    fn ordered_page(&self, builder: QueryBuilder) -> QueryBuilder {
        builder
            .order_by(self.metadata.order_by_clause(columns::SUBMISSION_TIME))
            .limit(self.metadata.limit_clause())
    }

    /// Direct listing used when no filter is active
    pub fn unfiltered_listing_query(&self) -> SqlFragment {
        let builder = self.with_bounds(Self::joined_submissions().select(&SUBMISSION_FIELDS));
        self.ordered_page(builder.group_by(&[columns::SUBMISSION_ID]))
            .build()
    }

    /// Phase 1: submissions with any answer to a filtered question
    pub fn existence_scan_query(&self) -> SqlFragment {
        let question_ids = self
            .filters
            .question_ids()
            .into_iter()
            .map(SqlParam::Text)
            .collect();

        self.with_bounds(Self::joined_submissions().select(&CANDIDATE_FIELDS))
            .where_clause(WhereClause::in_condition(columns::QUESTION_ID, question_ids))
            .group_by(&[columns::SUBMISSION_ID])
            .build()
    }

    /// Phase 2: submissions passing every filter, restricted to the
    /// candidates named in `having`
    pub fn filtered_scan_query(&self, having: SqlFragment) -> SqlFragment {
        let builder = Self::joined_submissions()
            .select(&SUBMISSION_FIELDS)
            .where_fragment(
                self.filters
                    .compile(columns::ANSWER_VALUE, columns::QUESTION_ID),
            )
            .group_by(&[columns::SUBMISSION_ID])
            .having(having);
        self.ordered_page(builder).build()
    }

    /// Every answered question of the given submissions, grouped by
    /// submission and ordered by question id
    pub fn question_answers_query(submission_ids: &[String]) -> SqlFragment {
        QueryBuilder::new(tables::ANSWER)
            .distinct()
            .select(&QUESTION_ANSWER_FIELDS)
            .inner_join(tables::QUESTION, joins::QUESTION_ON_ANSWER)
            .where_clause(WhereClause::in_condition(
                columns::ANSWER_SUBMISSION_ID,
                submission_ids.iter().cloned().map(SqlParam::Text).collect(),
            ))
            .order_by(SqlFragment::raw(format!(
                "ORDER BY {}, {}",
                columns::ANSWER_SUBMISSION_ID,
                columns::QUESTION_ID
            )))
            .build()
    }

    /// Run the listing against `store`; all queries share its connection
    pub async fn execute<S: ResponseStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<Vec<SubmissionResponse>> {
        let started = Instant::now();

        let submissions = if self.filters.is_empty() {
            store
                .fetch_submissions(&self.unfiltered_listing_query())
                .await?
        } else {
            match self.filtered_submissions(store).await? {
                Some(submissions) => submissions,
                None => return Ok(Vec::new()),
            }
        };

        if submissions.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = submissions
            .iter()
            .map(|submission| submission.submission_id.clone())
            .collect();
        let questions = store
            .fetch_questions(&Self::question_answers_query(&ids))
            .await?;

        let responses = assemble(
            submissions,
            questions,
            self.metadata.include_edit_link(),
        );

        log_query_operation(
            "filtered_responses",
            Some(tables::SUBMISSION),
            Some(responses.len()),
            "success",
            Some(started.elapsed().as_millis() as u64),
            None,
        );
        Ok(responses)
    }

    /// Both phases; `None` when phase 1 leaves nothing to scan
    async fn filtered_submissions<S: ResponseStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<Option<Vec<Submission>>> {
        let candidates = store
            .fetch_candidates(&self.existence_scan_query())
            .await?;

        if candidates.is_empty() {
            debug!(
                filters = self.filters.len(),
                "No submission answered a filtered question"
            );
            return Ok(None);
        }

        let counts: Vec<CandidateCount> = candidates
            .iter()
            .map(|row| {
                debug!(
                    submission_id = %row.submission_id,
                    question_ids = %row.question_ids,
                    question_count = row.question_count,
                    "Existence scan candidate"
                );
                CandidateCount::new(row.submission_id.clone(), row.distinct_question_count())
            })
            .collect();

        let Some(having) = compile_having(columns::SUBMISSION_ID, &self.filters, &counts) else {
            debug!(
                candidates = counts.len(),
                "No candidate answered every filtered question"
            );
            return Ok(None);
        };

        let submissions = store
            .fetch_submissions(&self.filtered_scan_query(having))
            .await?;
        Ok(Some(submissions))
    }
}

/// Attach each submission's questions and reduce to the client shape,
/// keeping the listing order of `submissions`
pub fn assemble(
    submissions: Vec<Submission>,
    questions: Vec<Question>,
    include_edit_link: bool,
) -> Vec<SubmissionResponse> {
    let mut by_submission: HashMap<String, Vec<Question>> = HashMap::new();
    for question in questions {
        if let Some(submission_id) = question.submission_id().map(str::to_string) {
            by_submission.entry(submission_id).or_default().push(question);
        }
    }

    submissions
        .into_iter()
        .map(|mut submission| {
            submission.questions = by_submission
                .remove(&submission.submission_id)
                .unwrap_or_default();
            SubmissionResponse::from_submission(&submission, include_edit_link)
        })
        .collect()
}
