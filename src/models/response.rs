use super::question::Question;
use super::submission::Submission;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a successful listing request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingResponse {
    pub data: Vec<SubmissionResponse>,
}

/// A question as exposed to clients: answer metadata is reduced to its value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<String>,
}

impl From<&Question> for QuestionResponse {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            name: question.name.clone(),
            kind: question.kind.clone(),
            value: question.value().map(str::to_string),
        }
    }
}

/// The allow-listed submission fields returned to clients, in the shape of
/// the upstream form API. `calculations`, `documents`, `urlParameters` and
/// `quiz` are not stored and are always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub submission_id: String,
    pub submission_time: String,
    pub last_updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub edit_link: Option<String>,
    pub questions: Vec<QuestionResponse>,
    pub calculations: Vec<Value>,
    pub documents: Vec<Value>,
    pub url_parameters: Vec<Value>,
    pub quiz: Map<String, Value>,
}

impl SubmissionResponse {
    /// `editLink` is present only when `include_edit_link` is set
    pub fn from_submission(submission: &Submission, include_edit_link: bool) -> Self {
        Self {
            submission_id: submission.submission_id.clone(),
            submission_time: submission.submission_time.clone(),
            last_updated_at: submission.last_updated_at.clone(),
            edit_link: if include_edit_link {
                submission.edit_link.clone()
            } else {
                None
            },
            questions: submission.questions.iter().map(QuestionResponse::from).collect(),
            calculations: Vec::new(),
            documents: Vec::new(),
            url_parameters: Vec::new(),
            quiz: Map::new(),
        }
    }
}
