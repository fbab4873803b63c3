use super::answer::Answer;
use super::question::Question;
use super::SubmissionStatus;
use crate::error::{FormResponsesError, Result};
use crate::query_builder::{SqlFragment, SqlParam};
use crate::utils::iso_datetime;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};

/// Submission is the entity of the schema: one form response.
/// Maps to the `submission` table.
///
/// Datetimes are held in canonical `YYYY-MM-DD HH:MM:SS` form. `questions`
/// is not persisted on this row; it is filled during ingestion and result
/// assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,
    pub submission_time: String,
    pub last_updated_at: String,
    pub edit_link: Option<String>,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One page of `GET /forms/{formId}/submissions`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSubmissionPage {
    pub responses: Vec<ApiSubmission>,
    #[serde(default)]
    pub total_responses: Option<u64>,
}

/// Submission as returned by the upstream form API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSubmission {
    pub submission_id: String,
    pub submission_time: String,
    pub last_updated_at: String,
    #[serde(default)]
    pub edit_link: Option<String>,
    #[serde(default)]
    pub questions: Vec<ApiQuestion>,
}

/// Question with its answer inline, as returned by the upstream form API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiQuestion {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

impl Submission {
    /// Map an upstream submission into an entity with questions and
    /// answers attached. Datetimes and string answers are canonicalized.
    pub fn from_api(api: ApiSubmission, status: SubmissionStatus) -> Self {
        let submission_id = api.submission_id;
        let questions = api
            .questions
            .into_iter()
            .map(|question| {
                let answer = Answer::from_api_value(
                    submission_id.clone(),
                    question.id.clone(),
                    &question.value,
                );
                Question::new(question.id, question.name, question.kind).with_answer(answer)
            })
            .collect();

        Self {
            submission_id,
            submission_time: iso_datetime::canonicalize(&api.submission_time),
            last_updated_at: iso_datetime::canonicalize(&api.last_updated_at),
            edit_link: api.edit_link,
            status,
            questions,
        }
    }

    /// Deserialize one upstream submission object; missing or mistyped
    /// fields are a `ModelError`.
    pub fn from_api_json(raw: &Value, status: SubmissionStatus) -> Result<Self> {
        let api = ApiSubmission::deserialize(raw).map_err(|err| {
            FormResponsesError::model(format!("invalid upstream submission: {err}"))
        })?;
        Ok(Self::from_api(api, status))
    }

    /// `(?, ?, ?, ?, ?)` bound to id, submission time, last update,
    /// edit link and status code
    pub fn insertion_clause(&self) -> SqlFragment {
        SqlFragment::new(
            "(?, ?, ?, ?, ?)",
            vec![
                SqlParam::text(self.submission_id.clone()),
                SqlParam::text(self.submission_time.clone()),
                SqlParam::text(self.last_updated_at.clone()),
                SqlParam::from(self.edit_link.clone()),
                SqlParam::Integer(i64::from(self.status.code())),
            ],
        )
    }
}

fn canonical_datetime(row: &MySqlRow, column: &str) -> std::result::Result<String, sqlx::Error> {
    let value: NaiveDateTime = row.try_get(column)?;
    Ok(iso_datetime::canonicalize_datetime(&value.and_utc()))
}

/// Reads `submission_id`, `submission_time`, `last_updated_at`,
/// `edit_link` and `status_id`.
impl<'r> FromRow<'r, MySqlRow> for Submission {
    fn from_row(row: &'r MySqlRow) -> std::result::Result<Self, sqlx::Error> {
        let status_id: i32 = row.try_get("status_id")?;
        let status =
            SubmissionStatus::from_code(status_id).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status_id".to_string(),
                source: format!("unknown submission status {status_id}").into(),
            })?;

        Ok(Submission {
            submission_id: row.try_get("submission_id")?,
            submission_time: canonical_datetime(row, "submission_time")?,
            last_updated_at: canonical_datetime(row, "last_updated_at")?,
            edit_link: row.try_get("edit_link")?,
            status,
            questions: Vec::new(),
        })
    }
}
