use super::fragment::{SqlFragment, SqlParam};

/// Represents different types of SQL conditions
#[derive(Debug, Clone)]
pub enum Condition {
    In {
        field: String,
        values: Vec<SqlParam>,
    },
    Fragment(SqlFragment),
}

impl Condition {
    /// Convert condition to a parameterized fragment
    pub fn to_fragment(&self) -> SqlFragment {
        match self {
            Condition::In { field, values } => {
                if values.is_empty() {
                    // IN () is not valid SQL; an empty set matches nothing
                    return SqlFragment::raw("0");
                }
                SqlFragment::in_list(field, values.iter().cloned())
            }
            Condition::Fragment(fragment) => fragment.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    fn separator(self) -> &'static str {
        match self {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        }
    }
}

/// Represents a WHERE clause that can contain multiple conditions
#[derive(Debug, Clone)]
pub struct WhereClause {
    pub conditions: Vec<Condition>,
    pub operator: LogicalOperator,
}

impl WhereClause {
    /// Create WHERE IN clause
    pub fn in_condition(field: &str, values: Vec<SqlParam>) -> Self {
        Self::and(vec![Condition::In {
            field: field.to_string(),
            values,
        }])
    }

    /// Wrap a precompiled fragment
    pub fn fragment(fragment: SqlFragment) -> Self {
        Self::and(vec![Condition::Fragment(fragment)])
    }

    /// Combine multiple conditions with AND
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with OR
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::Or,
        }
    }

    /// Convert to a parameterized fragment
    pub fn to_fragment(&self) -> SqlFragment {
        if self.conditions.is_empty() {
            return SqlFragment::tautology();
        }

        if self.conditions.len() == 1 {
            return self.conditions[0].to_fragment();
        }

        SqlFragment::join(
            self.conditions.iter().map(Condition::to_fragment),
            self.operator.separator(),
        )
        .parenthesized()
    }
}
