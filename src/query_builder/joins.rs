/// An `INNER JOIN table ON condition` clause
#[derive(Debug, Clone)]
pub struct Join {
    pub table: String,
    pub on_condition: String,
}

impl Join {
    /// Create an INNER JOIN
    pub fn inner(table: &str, on_condition: &str) -> Self {
        Self {
            table: table.to_string(),
            on_condition: on_condition.to_string(),
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        format!("INNER JOIN {} ON {}", self.table, self.on_condition)
    }
}
