//! # Table Population
//!
//! Copies every finished and in-progress submission from the upstream form
//! source into the three tables. Both fetches complete before a
//! transaction is opened; the inserts then run in one transaction so a
//! failure leaves nothing committed.

use crate::client::FormSource;
use crate::constants::tables;
use crate::database::execute_fragment;
use crate::error::{FormResponsesError, Result};
use crate::logging::{log_error, log_query_operation};
use crate::models::{Answer, Question, Submission, SubmissionStatus};
use crate::query_builder::SqlFragment;
use serde::Serialize;
use sqlx::MySqlPool;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, warn};

/// Rows per multi-row `INSERT`, keeping each statement well below the
/// server's placeholder limit
pub const INSERT_BATCH_SIZE: usize = 1000;

/// Row counts written by one population run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulateSummary {
    pub submissions: usize,
    pub questions: usize,
    pub answers: usize,
}

/// The insert statements for a batch of upstream submissions
#[derive(Debug, Clone, Default)]
pub struct IngestionPlan {
    submissions: Vec<Submission>,
}

impl IngestionPlan {
    pub fn new(submissions: Vec<Submission>) -> Self {
        Self { submissions }
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Question definitions, first occurrence of each id wins
    pub fn unique_questions(&self) -> Vec<&Question> {
        let mut seen = HashSet::new();
        self.submissions
            .iter()
            .flat_map(|submission| submission.questions.iter())
            .filter(|question| seen.insert(question.id.as_str()))
            .collect()
    }

    pub fn answers(&self) -> Vec<&Answer> {
        self.submissions
            .iter()
            .flat_map(|submission| submission.questions.iter())
            .filter_map(|question| question.answer.as_ref())
            .collect()
    }

    pub fn summary(&self) -> PopulateSummary {
        PopulateSummary {
            submissions: self.submissions.len(),
            questions: self.unique_questions().len(),
            answers: self.answers().len(),
        }
    }

    pub fn submission_inserts(&self) -> Vec<SqlFragment> {
        insert_statements(
            tables::SUBMISSION,
            "submission_id, submission_time, last_updated_at, edit_link, status_id",
            self.submissions.iter().map(Submission::insertion_clause).collect(),
        )
    }

    pub fn question_inserts(&self) -> Vec<SqlFragment> {
        insert_statements(
            tables::QUESTION,
            "id, name, type",
            self.unique_questions()
                .into_iter()
                .map(Question::insertion_clause)
                .collect(),
        )
    }

    pub fn answer_inserts(&self) -> Vec<SqlFragment> {
        insert_statements(
            tables::ANSWER,
            "submission_id, question_id, value",
            self.answers()
                .into_iter()
                .map(Answer::insertion_clause)
                .collect(),
        )
    }

    /// Submissions, then questions, then answers. Empty collections
    /// produce no statement.
    pub fn statements(&self) -> Vec<SqlFragment> {
        let mut statements = self.submission_inserts();
        statements.extend(self.question_inserts());
        statements.extend(self.answer_inserts());
        statements
    }
}

/// `INSERT INTO table (columns) VALUES (...), (...)` in batches
fn insert_statements(table: &str, columns: &str, rows: Vec<SqlFragment>) -> Vec<SqlFragment> {
    rows.chunks(INSERT_BATCH_SIZE)
        .map(|batch| {
            let mut statement = SqlFragment::raw(format!("INSERT INTO {table} ({columns}) VALUES"));
            statement.push(SqlFragment::join(batch.iter().cloned(), ", "));
            statement
        })
        .collect()
}

/// Fetch finished and in-progress submissions. Any failure here is an
/// upstream error.
pub async fn fetch_seed_data(source: &dyn FormSource) -> Result<Vec<Submission>> {
    let mut submissions = Vec::new();
    for status in [SubmissionStatus::Finished, SubmissionStatus::InProgress] {
        let fetched = source.fetch_submissions(status).await.map_err(|err| match err {
            FormResponsesError::UpstreamError(_) => err,
            other => FormResponsesError::upstream(other.to_string()),
        })?;
        submissions.extend(fetched);
    }
    Ok(submissions)
}

/// Fetch upstream data and insert it in one transaction
pub async fn populate_tables(pool: &MySqlPool, source: &dyn FormSource) -> Result<PopulateSummary> {
    let started = Instant::now();

    let plan = match fetch_seed_data(source).await {
        Ok(submissions) => IngestionPlan::new(submissions),
        Err(err) => {
            log_error("populate", "fetch_seed_data", &err.to_string(), None);
            return Err(err);
        }
    };

    let mut tx = pool.begin().await?;
    for statement in plan.statements() {
        if let Err(err) = execute_fragment(&mut *tx, &statement).await {
            log_error("populate", "insert", &err.to_string(), None);
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback after failed insert also failed");
            }
            return Err(err);
        }
    }
    tx.commit().await?;

    let summary = plan.summary();
    log_query_operation(
        "populate_tables",
        None,
        Some(summary.submissions + summary.questions + summary.answers),
        "success",
        Some(started.elapsed().as_millis() as u64),
        None,
    );
    info!(
        submissions = summary.submissions,
        questions = summary.questions,
        answers = summary.answers,
        "Tables populated"
    );
    Ok(summary)
}
