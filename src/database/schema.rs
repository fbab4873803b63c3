//! Schema DDL for the submission, question and answer tables.

use super::store::execute_fragment;
use crate::error::Result;
use crate::query_builder::SqlFragment;
use sqlx::MySqlPool;
use tracing::info;

pub const CREATE_SUBMISSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS submission (
    submission_id varchar(50) PRIMARY KEY,
    submission_time datetime NOT NULL,
    last_updated_at datetime NOT NULL,
    edit_link varchar(200),
    status_id int NOT NULL,
    INDEX IX_STATUS (status_id),
    INDEX IX_LAST_UPDATED_AT (last_updated_at),
    INDEX IX_SUBMISSION_TIME (submission_time)
)";

pub const CREATE_QUESTION_TABLE: &str = "CREATE TABLE IF NOT EXISTS question (
    id varchar(50) PRIMARY KEY,
    name varchar(200) NOT NULL,
    type varchar(50) NOT NULL
)";

pub const CREATE_ANSWER_TABLE: &str = "CREATE TABLE IF NOT EXISTS answer (
    submission_id varchar(50),
    question_id varchar(50),
    value varchar(200),
    INDEX IX_SUBMISSION_ID_QUESTION_ID (submission_id, question_id)
)";

/// Statements run by [`create_schema`], in order
pub const SCHEMA_STATEMENTS: [&str; 3] = [
    CREATE_SUBMISSION_TABLE,
    CREATE_QUESTION_TABLE,
    CREATE_ANSWER_TABLE,
];

/// Create any missing tables inside one transaction
pub async fn create_schema(pool: &MySqlPool) -> Result<()> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA_STATEMENTS {
        execute_fragment(&mut *tx, &SqlFragment::raw(statement)).await?;
    }
    tx.commit().await?;

    info!(tables = SCHEMA_STATEMENTS.len(), "Schema created");
    Ok(())
}
