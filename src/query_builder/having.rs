//! # HAVING Count Matching
//!
//! The filtered scan ORs every filter together in its WHERE clause, so a
//! submission survives the join with one row per question whose answer
//! passed. Requiring that row count to equal the number of filtered
//! questions turns the OR into "matches all filters". The count comes from
//! the existence scan, which records how many of the filtered questions
//! each candidate answered at all.

use super::filter::FilterSet;
use super::fragment::{SqlFragment, SqlParam};
use tracing::debug;

/// Distinct filtered questions a candidate submission has answers for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCount {
    pub submission_id: String,
    pub count: usize,
}

impl CandidateCount {
    pub fn new(submission_id: impl Into<String>, count: usize) -> Self {
        Self {
            submission_id: submission_id.into(),
            count,
        }
    }
}

/// Compile `(id = ? AND count(*) = ?) OR ...`, one clause per candidate,
/// each bound to the candidate's id and its own pre-scan count.
///
/// Candidates that answered fewer questions than the filter set covers
/// cannot match every filter and get no clause. Returns `None` when no
/// candidate remains.
pub fn compile_having(
    id_column: &str,
    filters: &FilterSet,
    counts: &[CandidateCount],
) -> Option<SqlFragment> {
    let required = filters.required_matches();
    let clauses: Vec<SqlFragment> = counts
        .iter()
        .filter(|candidate| candidate.count >= required)
        .map(|candidate| {
            SqlFragment::new(
                format!("({id_column} = ? AND count(*) = ?)"),
                vec![
                    SqlParam::text(candidate.submission_id.clone()),
                    SqlParam::Integer(candidate.count as i64),
                ],
            )
        })
        .collect();

    debug!(
        candidates = counts.len(),
        eligible = clauses.len(),
        required,
        "Compiled HAVING clause"
    );

    if clauses.is_empty() {
        return None;
    }
    Some(SqlFragment::join(clauses, " OR "))
}
