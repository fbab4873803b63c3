//! # Entity Models
//!
//! The three rows of the entity-attribute-value schema plus the row and
//! response shapes used by the listing queries.
//!
//! - [`Submission`] is the entity
//! - [`Question`] is the shared attribute definition
//! - [`Answer`] is the per-submission value
//!
//! Each entity is built either from a storage row (explicit `FromRow`
//! implementations that fail on missing or mistyped columns) or from the
//! upstream form API's JSON, and compiles its own `(?, ?, ...)` insertion
//! clause for ingestion.

pub mod answer;
pub mod question;
pub mod response;
pub mod rows;
pub mod submission;

pub use answer::Answer;
pub use question::Question;
pub use response::{ListingResponse, QuestionResponse, SubmissionResponse};
pub use rows::CandidateRow;
pub use submission::{ApiQuestion, ApiSubmission, ApiSubmissionPage, Submission};

use crate::constants::status_codes;
use serde::{Deserialize, Serialize};

/// Completion state of a submission, stored as `submission.status_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Finished,
    InProgress,
}

impl SubmissionStatus {
    pub fn code(&self) -> i32 {
        match self {
            SubmissionStatus::Finished => status_codes::FINISHED,
            SubmissionStatus::InProgress => status_codes::IN_PROGRESS,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            status_codes::FINISHED => Some(SubmissionStatus::Finished),
            status_codes::IN_PROGRESS => Some(SubmissionStatus::InProgress),
            _ => None,
        }
    }

    /// Value of the upstream API's `status` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Finished => "finished",
            SubmissionStatus::InProgress => "in_progress",
        }
    }
}
