use super::fragment::SqlFragment;
use super::{Join, WhereClause};

/// SELECT builder that keeps placeholders and parameters aligned.
///
/// Clauses are emitted in SQL order (WHERE, GROUP BY, HAVING, ORDER BY,
/// LIMIT) and their parameters are appended in exactly that order.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_table: String,
    distinct: bool,
    select_fields: Vec<String>,
    joins: Vec<Join>,
    where_clauses: Vec<WhereClause>,
    group_by: Vec<String>,
    having: Option<SqlFragment>,
    order_by: Option<SqlFragment>,
    limit: Option<SqlFragment>,
}

impl QueryBuilder {
    /// Create a new query builder for the given table
    pub fn new(table: &str) -> Self {
        Self {
            base_table: table.to_string(),
            distinct: false,
            select_fields: vec!["*".to_string()],
            joins: Vec::new(),
            where_clauses: Vec::new(),
            group_by: Vec::new(),
            having: None,
            order_by: None,
            limit: None,
        }
    }

    /// Set specific fields to select
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// SELECT DISTINCT
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Add a JOIN clause
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Add an INNER JOIN
    pub fn inner_join(self, table: &str, on_condition: &str) -> Self {
        self.join(Join::inner(table, on_condition))
    }

    /// Add a WHERE clause; multiple clauses are AND-ed
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        self.where_clauses.push(clause);
        self
    }

    /// Add a precompiled WHERE fragment
    pub fn where_fragment(self, fragment: SqlFragment) -> Self {
        self.where_clause(WhereClause::fragment(fragment))
    }

    /// Add GROUP BY clause
    pub fn group_by(mut self, fields: &[&str]) -> Self {
        self.group_by.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Set the HAVING predicate
    pub fn having(mut self, fragment: SqlFragment) -> Self {
        self.having = Some(fragment);
        self
    }

    /// Set a complete `ORDER BY ...` fragment
    pub fn order_by(mut self, fragment: SqlFragment) -> Self {
        self.order_by = Some(fragment);
        self
    }

    /// Set a complete `LIMIT ...` fragment
    pub fn limit(mut self, fragment: SqlFragment) -> Self {
        self.limit = Some(fragment);
        self
    }

    /// Build the complete SQL text and its ordered parameters
    pub fn build(&self) -> SqlFragment {
        let mut query = SqlFragment::raw("SELECT");

        if self.distinct {
            query.push_str("DISTINCT");
        }

        query.push_str(&self.select_fields.join(", "));

        // FROM clause
        query.push_str(&format!("FROM {}", self.base_table));

        // JOIN clauses
        for join in &self.joins {
            query.push_str(&join.to_sql());
        }

        // WHERE clauses
        if !self.where_clauses.is_empty() {
            query.push_str("WHERE");
            query.push(SqlFragment::join(
                self.where_clauses.iter().map(WhereClause::to_fragment),
                " AND ",
            ));
        }

        // GROUP BY
        if !self.group_by.is_empty() {
            query.push_str(&format!("GROUP BY {}", self.group_by.join(", ")));
        }

        // HAVING
        if let Some(ref having) = self.having {
            query.push_str("HAVING");
            query.push(having.clone());
        }

        // ORDER BY
        if let Some(ref order_by) = self.order_by {
            query.push(order_by.clone());
        }

        // LIMIT
        if let Some(ref limit) = self.limit {
            query.push(limit.clone());
        }

        query
    }
}
