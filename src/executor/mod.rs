/// Executor module - runs parsed statements against a catalog
///
/// Structure:
/// - conditions: WHERE clause evaluation
/// - aggregates: COUNT / SUM / AVG / MIN / MAX over a group
/// - queries: the SELECT pipeline (FROM, JOIN, WHERE, GROUP BY, ORDER BY, LIMIT)
/// - ddl: CREATE TABLE
/// - dml: INSERT
/// - dispatcher: statement routing and the result types

pub mod conditions;
pub mod aggregates;
pub mod queries;
pub mod ddl;
pub mod dml;
pub mod dispatcher;

pub use conditions::ConditionEvaluator;
pub use aggregates::Aggregator;
pub use queries::SelectExecutor;
pub use ddl::DdlExecutor;
pub use dml::DmlExecutor;
pub use dispatcher::{ExecutionOutcome, QueryExecutor, QueryResult};
