//! # Schema Constants
//!
//! Table names, qualified column names and request defaults shared by the
//! query builders and the orchestrator. Only these names are ever
//! interpolated into SQL text; every client-supplied value is bound.

/// Table names of the entity-attribute-value schema
pub mod tables {
    pub const SUBMISSION: &str = "submission";
    pub const QUESTION: &str = "question";
    pub const ANSWER: &str = "answer";
}

/// Fully qualified column names used in generated SQL
pub mod columns {
    pub const SUBMISSION_ID: &str = "submission.submission_id";
    pub const SUBMISSION_TIME: &str = "submission.submission_time";
    pub const SUBMISSION_LAST_UPDATED_AT: &str = "submission.last_updated_at";
    pub const SUBMISSION_EDIT_LINK: &str = "submission.edit_link";
    pub const SUBMISSION_STATUS_ID: &str = "submission.status_id";

    pub const QUESTION_ID: &str = "question.id";
    pub const QUESTION_NAME: &str = "question.name";
    pub const QUESTION_TYPE: &str = "question.type";

    pub const ANSWER_SUBMISSION_ID: &str = "answer.submission_id";
    pub const ANSWER_QUESTION_ID: &str = "answer.question_id";
    pub const ANSWER_VALUE: &str = "answer.value";
}

/// Join conditions for the submission -> answer -> question chain
pub mod joins {
    pub const ANSWER_ON_SUBMISSION: &str = "answer.submission_id = submission.submission_id";
    pub const QUESTION_ON_ANSWER: &str = "question.id = answer.question_id";
}

/// Defaults applied when request metadata is absent or malformed
pub mod defaults {
    pub const LIMIT: u64 = 150;
    pub const OFFSET: u64 = 0;
    pub const INCLUDE_EDIT_LINK: bool = false;
}

/// Stored values of `submission.status_id`
pub mod status_codes {
    pub const IN_PROGRESS: i32 = 0;
    pub const FINISHED: i32 = 1;
}
