//! # Response Store
//!
//! The storage seam used by the listing orchestrator. Each call runs one
//! compiled [`SqlFragment`] with its parameters bound in order and maps
//! the rows through the models' explicit `FromRow` implementations.

use crate::error::Result;
use crate::models::{CandidateRow, Question, Submission};
use crate::query_builder::{SqlFragment, SqlParam};
use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlConnection};
use sqlx::query::{Query, QueryAs};
use sqlx::MySql;

/// Row sets needed by one listing request, all read over the same
/// connection
#[async_trait]
pub trait ResponseStore: Send {
    /// Existence scan rows
    async fn fetch_candidates(&mut self, query: &SqlFragment) -> Result<Vec<CandidateRow>>;

    /// Submission rows of a listing or filtered scan
    async fn fetch_submissions(&mut self, query: &SqlFragment) -> Result<Vec<Submission>>;

    /// Joined question/answer rows for result assembly
    async fn fetch_questions(&mut self, query: &SqlFragment) -> Result<Vec<Question>>;
}

#[async_trait]
impl ResponseStore for MySqlConnection {
    async fn fetch_candidates(&mut self, query: &SqlFragment) -> Result<Vec<CandidateRow>> {
        let rows = bind_query_as(sqlx::query_as::<_, CandidateRow>(&query.sql), &query.params)
            .fetch_all(&mut *self)
            .await?;
        Ok(rows)
    }

    async fn fetch_submissions(&mut self, query: &SqlFragment) -> Result<Vec<Submission>> {
        let rows = bind_query_as(sqlx::query_as::<_, Submission>(&query.sql), &query.params)
            .fetch_all(&mut *self)
            .await?;
        Ok(rows)
    }

    async fn fetch_questions(&mut self, query: &SqlFragment) -> Result<Vec<Question>> {
        let rows = bind_query_as(sqlx::query_as::<_, Question>(&query.sql), &query.params)
            .fetch_all(&mut *self)
            .await?;
        Ok(rows)
    }
}

/// Run a statement that returns no rows; yields the affected row count
pub async fn execute_fragment(conn: &mut MySqlConnection, fragment: &SqlFragment) -> Result<u64> {
    let result = bind_query(sqlx::query(&fragment.sql), &fragment.params)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

fn bind_query_as<'q, O>(
    mut query: QueryAs<'q, MySql, O, MySqlArguments>,
    params: &'q [SqlParam],
) -> QueryAs<'q, MySql, O, MySqlArguments> {
    for param in params {
        query = match param {
            SqlParam::Text(value) => query.bind(value.as_str()),
            SqlParam::Integer(value) => query.bind(*value),
            SqlParam::Null => query.bind(None::<String>),
        };
    }
    query
}

fn bind_query<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &'q [SqlParam],
) -> Query<'q, MySql, MySqlArguments> {
    for param in params {
        query = match param {
            SqlParam::Text(value) => query.bind(value.as_str()),
            SqlParam::Integer(value) => query.bind(*value),
            SqlParam::Null => query.bind(None::<String>),
        };
    }
    query
}
