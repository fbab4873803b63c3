use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Existence-scan row: a submission that answered at least one filtered
/// question, with the distinct question ids as a comma-separated list and
/// their count.
///
/// The list is subject to `group_concat_max_len`, so the count is read from
/// its own `COUNT(DISTINCT ...)` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub submission_id: String,
    pub question_ids: String,
    pub question_count: i64,
}

impl CandidateRow {
    pub fn new(
        submission_id: impl Into<String>,
        question_ids: impl Into<String>,
        question_count: i64,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            question_ids: question_ids.into(),
            question_count,
        }
    }

    pub fn distinct_question_count(&self) -> usize {
        usize::try_from(self.question_count).unwrap_or(0)
    }
}
