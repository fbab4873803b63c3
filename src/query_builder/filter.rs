//! # Answer Filters
//!
//! A [`Filter`] is one `(question id, condition, value)` triple supplied by a
//! client. It compiles to a self-contained boolean SQL expression over one
//! answer row whose comparison semantics depend on what the two values look
//! like:
//!
//! 1. both datetimes: compare chronologically
//! 2. exactly one datetime: no match
//! 3. both numbers: compare numerically
//! 4. exactly one number: no match
//! 5. otherwise: compare as strings
//!
//! The comparison runs inside MySQL, so numeric casts and string collation
//! are the server's.
//!
//! Filters are grouped into a [`FilterSet`]. Invalid filters are dropped on
//! the way in and never reach SQL generation.

use super::conditions::{Condition, WhereClause};
use super::fragment::{SqlFragment, SqlParam};
use crate::utils::iso_datetime;
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Signed integer or decimal. Written without `?` so that placeholder
/// counting over generated SQL stays exact.
pub const NUMBER_PATTERN: &str = "^-{0,1}[0-9]+([.][0-9]+){0,1}$";

/// Comparison requested by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCondition {
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
}

impl FilterCondition {
    /// Parse a condition name; `does_not_equal` is accepted for `not_equals`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "equals" => Some(FilterCondition::Equals),
            "not_equals" | "does_not_equal" => Some(FilterCondition::NotEquals),
            "less_than" => Some(FilterCondition::LessThan),
            "greater_than" => Some(FilterCondition::GreaterThan),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCondition::Equals => "equals",
            FilterCondition::NotEquals => "not_equals",
            FilterCondition::LessThan => "less_than",
            FilterCondition::GreaterThan => "greater_than",
        }
    }

    /// SQL operator for this condition
    pub fn operator(&self) -> &'static str {
        match self {
            FilterCondition::Equals => "=",
            FilterCondition::NotEquals => "!=",
            FilterCondition::LessThan => "<",
            FilterCondition::GreaterThan => ">",
        }
    }

}

/// Value a filter compares against
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(serde_json::Number),
}

impl FilterValue {
    /// Text form bound into the compiled SQL
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FilterValue::Text(value) => Cow::Borrowed(value.as_str()),
            FilterValue::Number(value) => Cow::Owned(value.to_string()),
        }
    }

    fn to_param(&self) -> SqlParam {
        SqlParam::Text(self.as_text().into_owned())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(iso_datetime::canonicalize(value))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(iso_datetime::canonicalize(&value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value.into())
    }
}

/// One client-supplied answer filter
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub id: Option<String>,
    /// `None` when the client sent an unrecognized condition
    pub condition: Option<FilterCondition>,
    pub value: Option<FilterValue>,
}

impl Filter {
    /// Build a filter; date-like string values are canonicalized
    pub fn new(id: impl Into<String>, condition: FilterCondition, value: impl Into<FilterValue>) -> Self {
        Self {
            id: Some(id.into()),
            condition: Some(condition),
            value: Some(value.into()),
        }
    }

    /// Read a filter from a `{id, condition, value}` JSON object.
    ///
    /// Fields of the wrong shape are treated as absent, which makes the
    /// filter invalid rather than failing the request.
    pub fn from_json(raw: &Value) -> Self {
        let id = match raw.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };
        let condition = raw
            .get("condition")
            .and_then(Value::as_str)
            .and_then(FilterCondition::parse);
        let value = match raw.get("value") {
            Some(Value::String(value)) => Some(FilterValue::from(value.as_str())),
            Some(Value::Number(value)) => Some(FilterValue::Number(value.clone())),
            Some(Value::Bool(value)) => Some(FilterValue::Text(value.to_string())),
            _ => None,
        };
        Self {
            id,
            condition,
            value,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.id.is_some() && self.condition.is_some()
    }

    /// SQL operator; unknown conditions fall back to `=`
    pub fn operator(&self) -> &'static str {
        self.condition.map_or("=", |condition| condition.operator())
    }

    /// Compile to `(id_column = ? AND CASE ... END = 1)`.
    ///
    /// The filter value is bound once per reference: nine parameters in
    /// total, the question id first.
    pub fn compile(&self, value_column: &str, id_column: &str) -> SqlFragment {
        let op = self.operator();
        let as_datetime = |expr: &str| format!("CAST({expr} AS DATETIME)");
        let as_number = |expr: &str| format!("CAST({expr} AS DECIMAL(65,30))");
        let is_number = |expr: &str| format!("{expr} REGEXP '{NUMBER_PATTERN}'");

        let sql = [
            format!("({id_column} = ? AND CASE"),
            format!(
                "WHEN {} IS NOT NULL AND {} IS NOT NULL THEN {} {op} {}",
                as_datetime("?"),
                as_datetime(value_column),
                as_datetime("?"),
                as_datetime(value_column)
            ),
            format!(
                "WHEN ({} IS NULL) <> ({} IS NULL) THEN 0",
                as_datetime("?"),
                as_datetime(value_column)
            ),
            format!(
                "WHEN {} = 1 AND {} = 1 THEN {} {op} {}",
                is_number("?"),
                is_number(value_column),
                as_number("?"),
                as_number(value_column)
            ),
            format!(
                "WHEN {} = 0 AND {} = 1 THEN 0",
                is_number("?"),
                is_number(value_column)
            ),
            format!(
                "WHEN {} = 1 AND {} = 0 THEN 0",
                is_number("?"),
                is_number(value_column)
            ),
            format!("ELSE ? {op} {value_column}"),
            "END = 1)".to_string(),
        ]
        .join(" ");

        let id = SqlParam::from(self.id.clone());
        let value = self.value.as_ref().map_or(SqlParam::Null, FilterValue::to_param);
        let mut params = Vec::with_capacity(9);
        params.push(id);
        params.extend(std::iter::repeat(value).take(8));

        SqlFragment::new(sql, params)
    }

}

/// The active filters of one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Keep only valid filters
    pub fn new(filters: impl IntoIterator<Item = Filter>) -> Self {
        let filters = filters
            .into_iter()
            .filter(|filter| {
                let valid = filter.is_valid();
                if !valid {
                    warn!(
                        id = ?filter.id,
                        condition = ?filter.condition,
                        "Dropping invalid filter"
                    );
                }
                valid
            })
            .collect();
        Self { filters }
    }

    /// Parse the JSON-encoded `filters` request parameter.
    ///
    /// A document that is not a JSON array is dropped as a whole.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => Self::new(items.iter().map(Filter::from_json)),
            Ok(other) => {
                warn!(kind = %json_kind(&other), "Ignoring filters parameter that is not an array");
                Self::default()
            }
            Err(err) => {
                warn!(error = %err, "Ignoring malformed filters parameter");
                Self::default()
            }
        }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Distinct question ids in first-seen order
    pub fn question_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.filters.iter().filter_map(|filter| filter.id.as_ref()) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// Number of joined answer rows a submission needs to match every filter
    pub fn required_matches(&self) -> usize {
        self.question_ids().len()
    }

    /// Filters per question id, in first-seen order
    fn grouped(&self) -> Vec<(String, Vec<&Filter>)> {
        self.question_ids()
            .into_iter()
            .map(|id| {
                let group = self
                    .filters
                    .iter()
                    .filter(|filter| filter.id.as_deref() == Some(id.as_str()))
                    .collect();
                (id, group)
            })
            .collect()
    }

    /// OR across questions of the AND of that question's filters.
    ///
    /// An answer row passes when it satisfies every filter on its question;
    /// the HAVING clause then demands one passing row per question.
    pub fn compile(&self, value_column: &str, id_column: &str) -> SqlFragment {
        let per_question = self
            .grouped()
            .into_iter()
            .map(|(_, group)| {
                let clause = WhereClause::and(
                    group
                        .iter()
                        .map(|filter| Condition::Fragment(filter.compile(value_column, id_column)))
                        .collect(),
                );
                Condition::Fragment(clause.to_fragment())
            })
            .collect();
        let compiled = WhereClause::or(per_question).to_fragment();
        debug!(
            filters = self.filters.len(),
            params = compiled.params.len(),
            "Compiled filter set"
        );
        compiled
    }

}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
