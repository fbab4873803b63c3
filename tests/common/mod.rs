//! Shared test doubles and fixtures

use async_trait::async_trait;
use form_responses::client::FormSource;
use form_responses::database::ResponseStore;
use form_responses::models::{Answer, CandidateRow, Question, Submission, SubmissionStatus};
use form_responses::query_builder::SqlFragment;
use form_responses::{FormResponsesError, Result};
use std::collections::HashMap;

/// Which store method a recorded query went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Candidates,
    Submissions,
    Questions,
}

/// Store that returns canned rows and records every query it is given
#[derive(Debug, Default)]
pub struct ScriptedStore {
    pub candidates: Vec<CandidateRow>,
    pub submissions: Vec<Submission>,
    pub questions: Vec<Question>,
    pub fail_on: Option<QueryKind>,
    pub executed: Vec<(QueryKind, SqlFragment)>,
}

impl ScriptedStore {
    pub fn kinds(&self) -> Vec<QueryKind> {
        self.executed.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn query(&self, kind: QueryKind) -> &SqlFragment {
        self.executed
            .iter()
            .find(|(executed, _)| *executed == kind)
            .map(|(_, query)| query)
            .expect("query was executed")
    }

    fn record(&mut self, kind: QueryKind, query: &SqlFragment) -> Result<()> {
        assert_eq!(
            query.placeholder_count(),
            query.params.len(),
            "placeholders and parameters diverge in {kind:?} query"
        );
        self.executed.push((kind, query.clone()));
        if self.fail_on == Some(kind) {
            return Err(FormResponsesError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ResponseStore for ScriptedStore {
    async fn fetch_candidates(&mut self, query: &SqlFragment) -> Result<Vec<CandidateRow>> {
        self.record(QueryKind::Candidates, query)?;
        Ok(self.candidates.clone())
    }

    async fn fetch_submissions(&mut self, query: &SqlFragment) -> Result<Vec<Submission>> {
        self.record(QueryKind::Submissions, query)?;
        Ok(self.submissions.clone())
    }

    async fn fetch_questions(&mut self, query: &SqlFragment) -> Result<Vec<Question>> {
        self.record(QueryKind::Questions, query)?;
        Ok(self.questions.clone())
    }
}

/// Form source serving fixed submissions per status
#[derive(Debug, Default)]
pub struct StaticFormSource {
    pub by_status: HashMap<&'static str, Vec<Submission>>,
}

impl StaticFormSource {
    pub fn new(finished: Vec<Submission>, in_progress: Vec<Submission>) -> Self {
        let mut by_status = HashMap::new();
        by_status.insert(SubmissionStatus::Finished.as_str(), finished);
        by_status.insert(SubmissionStatus::InProgress.as_str(), in_progress);
        Self { by_status }
    }
}

#[async_trait]
impl FormSource for StaticFormSource {
    async fn fetch_submissions(&self, status: SubmissionStatus) -> Result<Vec<Submission>> {
        Ok(self.by_status.get(status.as_str()).cloned().unwrap_or_default())
    }
}

/// Form source whose every request fails with the given error
pub struct FailingFormSource {
    pub error: fn() -> FormResponsesError,
}

#[async_trait]
impl FormSource for FailingFormSource {
    async fn fetch_submissions(&self, _status: SubmissionStatus) -> Result<Vec<Submission>> {
        Err((self.error)())
    }
}

pub fn submission(id: &str, submission_time: &str) -> Submission {
    Submission {
        submission_id: id.to_string(),
        submission_time: submission_time.to_string(),
        last_updated_at: submission_time.to_string(),
        edit_link: Some(format!("https://forms.example/edit/{id}")),
        status: SubmissionStatus::Finished,
        questions: Vec::new(),
    }
}

pub fn answered(submission_id: &str, question_id: &str, value: Option<&str>) -> Question {
    Question::new(question_id, format!("Question {question_id}"), "ShortAnswer").with_answer(
        Answer::new(submission_id, question_id, value.map(str::to_string)),
    )
}
