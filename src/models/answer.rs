use crate::query_builder::{SqlFragment, SqlParam};
use crate::utils::iso_datetime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer is the value row of the schema: one submission's answer to one
/// question. Maps to the `answer` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub submission_id: String,
    pub question_id: String,
    pub value: Option<String>,
}

impl Answer {
    pub fn new(
        submission_id: impl Into<String>,
        question_id: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            question_id: question_id.into(),
            value,
        }
    }

    /// Build an answer from the upstream API's raw `value` field
    pub fn from_api_value(
        submission_id: impl Into<String>,
        question_id: impl Into<String>,
        raw: &Value,
    ) -> Self {
        Self::new(submission_id, question_id, normalize_value(raw))
    }

    /// `(?, ?, ?)` bound to submission id, question id and value
    pub fn insertion_clause(&self) -> SqlFragment {
        SqlFragment::new(
            "(?, ?, ?)",
            vec![
                SqlParam::text(self.submission_id.clone()),
                SqlParam::text(self.question_id.clone()),
                SqlParam::from(self.value.clone()),
            ],
        )
    }
}

/// Stored text form of an upstream answer value.
///
/// Null stays null, strings are canonicalized, other scalars are
/// stringified and structured values are kept as compact JSON.
pub fn normalize_value(raw: &Value) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::String(text) => Some(iso_datetime::canonicalize(text)),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(_) | Value::Object(_) => Some(raw.to_string()),
    }
}
