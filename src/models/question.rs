use super::answer::Answer;
use crate::query_builder::{SqlFragment, SqlParam};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};

/// Question is a deduplicated attribute definition shared by every
/// submission that answers it. Maps to the `question` table.
///
/// `answer` is attached only while assembling results or ingesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub answer: Option<Answer>,
}

impl Question {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            answer: None,
        }
    }

    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answer = Some(answer);
        self
    }

    /// Submission the attached answer belongs to
    pub fn submission_id(&self) -> Option<&str> {
        self.answer.as_ref().map(|answer| answer.submission_id.as_str())
    }

    pub fn value(&self) -> Option<&str> {
        self.answer.as_ref().and_then(|answer| answer.value.as_deref())
    }

    /// `(?, ?, ?)` bound to id, name and type
    pub fn insertion_clause(&self) -> SqlFragment {
        SqlFragment::new(
            "(?, ?, ?)",
            vec![
                SqlParam::text(self.id.clone()),
                SqlParam::text(self.name.clone()),
                SqlParam::text(self.kind.clone()),
            ],
        )
    }
}

/// Reads a joined question/answer row: `id`, `name`, `type`,
/// `submission_id` and `value`.
impl<'r> FromRow<'r, MySqlRow> for Question {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let answer = Answer::new(
            row.try_get::<String, _>("submission_id")?,
            id.clone(),
            row.try_get("value")?,
        );
        Ok(Question {
            id,
            name: row.try_get("name")?,
            kind: row.try_get("type")?,
            answer: Some(answer),
        })
    }
}
