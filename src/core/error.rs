use thiserror::Error;

/// Every failure a statement can produce. The display text is what the
/// learner sees, so not-found variants carry the names they could have used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Could not find a {0} clause in the statement")]
    Clause(String),
    #[error("Table '{name}' not found. Available tables: {}", .available.join(", "))]
    TableNotFound { name: String, available: Vec<String> },
    #[error("Column '{name}' not found. Available columns: {}", .available.join(", "))]
    ColumnNotFound { name: String, available: Vec<String> },
    #[error("Unsupported statement. Supported statements are SELECT, CREATE TABLE and INSERT")]
    UnsupportedStatement,
    #[error("Malformed {clause} clause: {detail}")]
    MalformedClause { clause: String, detail: String },
    #[error("Table '{0}' is a built-in table and cannot be redefined")]
    ReadOnlyTable(String),
}

impl ExecutionError {
    pub fn malformed(clause: &str, detail: impl Into<String>) -> Self {
        Self::MalformedClause {
            clause: clause.to_string(),
            detail: detail.into(),
        }
    }
}
