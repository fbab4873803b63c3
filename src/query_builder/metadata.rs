//! # Query Metadata
//!
//! Pagination, sort direction, status, date bounds and the edit-link flag of
//! a listing request. Each compiles independently to a fragment; malformed
//! or missing input falls back to a default instead of failing.

use super::fragment::{SqlFragment, SqlParam};
use super::pagination::{parse_leading_integer, Pagination};
use crate::constants::defaults;
use crate::models::SubmissionStatus;
use crate::utils::iso_datetime;
use serde::Deserialize;

/// A request parameter that may arrive as text (query strings) or as a
/// native JSON scalar
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawParam {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl RawParam {
    fn as_u64(&self) -> Option<u64> {
        match self {
            RawParam::Number(number) => number
                .as_u64()
                .or_else(|| number.as_f64().filter(|n| *n >= 0.0).map(|n| n.trunc() as u64)),
            RawParam::Text(text) => parse_leading_integer(text),
            RawParam::Bool(_) => None,
        }
    }
}

/// Sort direction for `ORDER BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Exactly `asc` or `desc`; anything else is the default
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetadata {
    pub limit: Option<RawParam>,
    pub offset: Option<RawParam>,
    pub sort: Option<String>,
    pub status: Option<String>,
    pub after_date: Option<String>,
    pub before_date: Option<String>,
    pub include_edit_link: Option<RawParam>,
}

impl QueryMetadata {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.limit.as_ref().and_then(RawParam::as_u64),
            self.offset.as_ref().and_then(RawParam::as_u64),
        )
    }

    /// Always a concrete `LIMIT offset,limit`
    pub fn limit_clause(&self) -> SqlFragment {
        self.pagination().to_fragment()
    }

    pub fn sort_direction(&self) -> SortDirection {
        SortDirection::parse(self.sort.as_deref())
    }

    pub fn order_by_clause(&self, column: &str) -> SqlFragment {
        SqlFragment::raw(format!("ORDER BY {column} {}", self.sort_direction().as_sql()))
    }

    /// Unspecified or unrecognized status means finished
    pub fn status(&self) -> SubmissionStatus {
        match self.status.as_deref() {
            Some("in_progress") => SubmissionStatus::InProgress,
            _ => SubmissionStatus::Finished,
        }
    }

    pub fn status_clause(&self, column: &str) -> SqlFragment {
        SqlFragment::new(
            format!("{column} = ?"),
            vec![SqlParam::text(self.status().code().to_string())],
        )
    }

    pub fn before_date_clause(&self, column: &str) -> SqlFragment {
        date_bound_clause(column, "<", self.before_date.as_deref())
    }

    pub fn after_date_clause(&self, column: &str) -> SqlFragment {
        date_bound_clause(column, ">", self.after_date.as_deref())
    }

    /// Native `true`, or the exact string `"true"`
    pub fn include_edit_link(&self) -> bool {
        match &self.include_edit_link {
            Some(RawParam::Bool(flag)) => *flag,
            Some(RawParam::Text(text)) => text == "true",
            _ => defaults::INCLUDE_EDIT_LINK,
        }
    }
}

/// A bound is only applied when it is a recognized ISO datetime; otherwise
/// the clause is the tautology `1`.
fn date_bound_clause(column: &str, operator: &str, bound: Option<&str>) -> SqlFragment {
    match bound {
        Some(bound) if iso_datetime::is_date_like(bound) => SqlFragment::new(
            format!("{column} {operator} ?"),
            vec![SqlParam::Text(iso_datetime::canonicalize(bound))],
        ),
        _ => SqlFragment::tautology(),
    }
}
