use crate::core::{Catalog, ExecutionError, Value};
use crate::parser::{parse_statement, Statement};
use log::debug;
use serde::{Deserialize, Serialize};

use super::ddl::DdlExecutor;
use super::dml::DmlExecutor;
use super::queries::SelectExecutor;

pub struct QueryExecutor;

/// A successful statement: positional rows aligned to `columns`.
///
/// CREATE TABLE and INSERT return no columns and no rows, only a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub message: String,
}

impl QueryResult {
    #[must_use]
    pub fn rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let message = format!("{} rows", rows.len());
        Self {
            columns,
            rows,
            message,
        }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            message: message.into(),
        }
    }

    /// Values of one output column, by header name.
    #[must_use]
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

/// What the presentation layer receives: either the result or the error
/// text, serialized as `{columns, rows, message}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExecutionOutcome {
    Success(QueryResult),
    Failure { error: String },
}

impl ExecutionOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn result(&self) -> Option<&QueryResult> {
        match self {
            Self::Success(result) => Some(result),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error } => Some(error),
        }
    }
}

impl From<Result<QueryResult, ExecutionError>> for ExecutionOutcome {
    fn from(result: Result<QueryResult, ExecutionError>) -> Self {
        match result {
            Ok(result) => Self::Success(result),
            Err(err) => Self::Failure {
                error: err.to_string(),
            },
        }
    }
}

impl QueryExecutor {
    /// Run one parsed statement against the catalog.
    ///
    /// A failing statement leaves the catalog untouched: every check runs
    /// before the single mutation at the end of CREATE TABLE and INSERT.
    pub fn execute(catalog: &mut Catalog, stmt: Statement) -> Result<QueryResult, ExecutionError> {
        match stmt {
            Statement::Select(clauses) => SelectExecutor::select(catalog, &clauses),
            Statement::CreateTable {
                name,
                columns,
                if_not_exists,
            } => DdlExecutor::create_table(catalog, &name, &columns, if_not_exists),
            Statement::Insert {
                table,
                columns,
                values,
            } => DmlExecutor::insert(catalog, &table, columns, values),
        }
    }

    /// Parse and run one statement string.
    pub fn execute_sql(catalog: &mut Catalog, sql: &str) -> Result<QueryResult, ExecutionError> {
        let stmt = parse_statement(sql)?;
        debug!("executing {stmt:?}");
        Self::execute(catalog, stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::starter_catalog;

    #[test]
    fn test_success_wire_shape() {
        let outcome = ExecutionOutcome::Success(QueryResult::rows(
            vec!["n".to_string()],
            vec![vec![Value::Integer(3)]],
        ));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"columns": ["n"], "rows": [[3]], "message": "1 rows"})
        );
    }

    #[test]
    fn test_failure_wire_shape() {
        let outcome: ExecutionOutcome = Err(ExecutionError::UnsupportedStatement).into();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert!(json["error"].as_str().unwrap().contains("CREATE TABLE"));
    }

    #[test]
    fn test_execute_sql_routes_statements() {
        let mut catalog = starter_catalog();
        let result = QueryExecutor::execute_sql(&mut catalog, "CREATE TABLE t (a INT)").unwrap();
        assert!(result.columns.is_empty());
        QueryExecutor::execute_sql(&mut catalog, "INSERT INTO t VALUES (5)").unwrap();
        let result = QueryExecutor::execute_sql(&mut catalog, "SELECT a FROM t").unwrap();
        assert_eq!(
            result.column_values("a").unwrap(),
            vec![&Value::Integer(0), &Value::Integer(5)]
        );
    }
}
