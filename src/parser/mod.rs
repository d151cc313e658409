// Module declarations
mod statement;
mod common;
mod clauses;
mod ddl;
mod dml;
mod queries;

pub use statement::{
    Statement,
    ClauseSet,
    ColumnDef,
    Condition,
    SortOrder,
    OrderBy,
    SelectExpr,
    SelectItem,
    AggregateCall,
    AggregateFunction,
    AggregateTarget,
    JoinType,
    JoinClause,
    TableRef,
};
pub use clauses::split_clauses;
pub use queries::{aggregate_call, condition};

use crate::core::ExecutionError;
use log::debug;
use nom::combinator::all_consuming;

/// Statement kinds the executor understands, decided from the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    CreateTable,
    Insert,
    Unsupported,
}

/// Trailing semicolons and surrounding whitespace are not part of the statement.
#[must_use]
pub fn normalize(input: &str) -> &str {
    input.trim().trim_end_matches(';').trim_end()
}

#[must_use]
pub fn classify(input: &str) -> StatementKind {
    let mut words = normalize(input)
        .split(|c: char| !common::is_word_char(c))
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_uppercase);

    match words.next().as_deref() {
        Some("SELECT") => StatementKind::Select,
        Some("INSERT") => StatementKind::Insert,
        Some("CREATE") => {
            let next = match words.next() {
                Some(w) if w == "TEMP" || w == "TEMPORARY" => words.next(),
                other => other,
            };
            if next.as_deref() == Some("TABLE") {
                StatementKind::CreateTable
            } else {
                StatementKind::Unsupported
            }
        }
        _ => StatementKind::Unsupported,
    }
}

/// Route a statement to the parser for its kind.
pub fn parse_statement(input: &str) -> Result<Statement, ExecutionError> {
    let input = normalize(input);
    let kind = classify(input);
    debug!("statement kind {kind:?}: {input}");

    match kind {
        StatementKind::Select => split_clauses(input).map(Statement::Select),
        StatementKind::CreateTable => all_consuming(ddl::create_table)(input)
            .map(|(_, stmt)| stmt)
            .map_err(|_| {
                ExecutionError::malformed(
                    "CREATE TABLE",
                    "expected CREATE TABLE <name> (<column> <type>, ...)",
                )
            }),
        StatementKind::Insert => all_consuming(dml::insert)(input)
            .map(|(_, stmt)| stmt)
            .map_err(|_| {
                ExecutionError::malformed(
                    "INSERT",
                    "expected INSERT INTO <table> [(<columns>)] VALUES (<values>)",
                )
            }),
        StatementKind::Unsupported => Err(ExecutionError::UnsupportedStatement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    #[test]
    fn test_classify() {
        assert_eq!(classify("  select * from concepts;"), StatementKind::Select);
        assert_eq!(classify("CREATE TABLE t (a int)"), StatementKind::CreateTable);
        assert_eq!(classify("create temporary table t (a int)"), StatementKind::CreateTable);
        assert_eq!(classify("INSERT INTO t VALUES (1)"), StatementKind::Insert);
        assert_eq!(classify("CREATE INDEX i ON t(a)"), StatementKind::Unsupported);
        assert_eq!(classify("DELETE FROM concepts"), StatementKind::Unsupported);
        assert_eq!(classify(";"), StatementKind::Unsupported);
    }

    #[test]
    fn test_trailing_semicolon_is_stripped() {
        let stmt = parse_statement("SELECT * FROM concepts LIMIT 2;;  ").unwrap();
        match stmt {
            Statement::Select(clauses) => assert_eq!(clauses.limit, Some(2)),
            other => panic!("Expected SELECT, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_insert() {
        let stmt = parse_statement("INSERT INTO t (a) VALUES ('x');").unwrap();
        assert_eq!(
            stmt,
            Statement::Insert {
                table: "t".to_string(),
                columns: Some(vec!["a".to_string()]),
                values: vec![Value::Text("x".to_string())],
            }
        );
    }

    #[test]
    fn test_malformed_insert() {
        let err = parse_statement("INSERT INTO t (a)").unwrap_err();
        assert!(matches!(err, ExecutionError::MalformedClause { ref clause, .. } if clause == "INSERT"));
    }

    #[test]
    fn test_unsupported_statement() {
        let err = parse_statement("DELETE FROM concepts").unwrap_err();
        assert_eq!(err, ExecutionError::UnsupportedStatement);
        let message = err.to_string();
        assert!(message.contains("SELECT"));
        assert!(message.contains("CREATE TABLE"));
        assert!(message.contains("INSERT"));
    }
}
