/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
    Null,
}

impl SqlParam {
    pub fn text(value: impl Into<String>) -> Self {
        SqlParam::Text(value.into())
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<Option<String>> for SqlParam {
    fn from(value: Option<String>) -> Self {
        value.map_or(SqlParam::Null, SqlParam::Text)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Integer(value)
    }
}

/// SQL template text plus the parameters for its placeholders, in order.
///
/// Every compiler in the query builder returns one of these. Concatenating
/// fragments concatenates their parameter lists in the same order, so the
/// i-th `?` of the combined text always lines up with the i-th parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl SqlFragment {
    pub fn new(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Fragment with no placeholders
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    /// Always-true predicate used in place of an ignored condition
    pub fn tautology() -> Self {
        Self::raw("1")
    }

    /// `column IN (?, ?, ...)`; callers must not pass an empty list
    pub fn in_list(column: &str, values: impl IntoIterator<Item = SqlParam>) -> Self {
        let params: Vec<SqlParam> = values.into_iter().collect();
        let placeholders = vec!["?"; params.len()].join(", ");
        Self::new(format!("{column} IN ({placeholders})"), params)
    }

    /// Join fragments with `separator`, merging parameters in order
    pub fn join(fragments: impl IntoIterator<Item = SqlFragment>, separator: &str) -> Self {
        let mut sql_parts = Vec::new();
        let mut params = Vec::new();
        for fragment in fragments {
            sql_parts.push(fragment.sql);
            params.extend(fragment.params);
        }
        Self::new(sql_parts.join(separator), params)
    }

    pub fn parenthesized(self) -> Self {
        Self::new(format!("({})", self.sql), self.params)
    }

    /// Append another fragment after a single space
    pub fn push(&mut self, other: SqlFragment) {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql.push(' ');
        }
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
    }

    pub fn push_str(&mut self, sql: &str) {
        self.push(SqlFragment::raw(sql));
    }

    /// Number of `?` placeholders in the template text.
    ///
    /// Generated SQL never contains a literal `?` outside placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}
